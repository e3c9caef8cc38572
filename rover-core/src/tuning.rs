use std::path::Path;

use config::{Config, ConfigError, File};
use log::debug;
use serde::Deserialize;

/// Handling parameters for one vehicle. Fixed once the vehicle is spawned.
///
/// Values are not range-checked; a negative `max_speed` or zero
/// `ground_ray_count` produces whatever the control laws make of it.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct VehicleTuning {
    // Movement
    pub acceleration: f64,
    pub max_speed: f64,
    pub air_control_multiplier: f64,

    // Steering
    pub steering_strength: f64,
    // TODO: wire into steering once the low-speed turning feel is signed off;
    // the steering law does not read it yet
    pub steering_at_low_speed: f64,

    // Grip
    pub lateral_grip: f64,

    // Stability
    pub upright_torque: f64,
    pub angular_damping: f64,

    // Auto recovery
    pub recovery_torque: f64,
    pub recovery_speed_threshold: f64,

    // Grounding
    pub ground_ray_length: f64,
    pub ground_ray_count: usize,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            acceleration: 30.0,
            max_speed: 18.0,
            air_control_multiplier: 0.4,
            steering_strength: 4.5,
            steering_at_low_speed: 2.0,
            lateral_grip: 0.2,
            upright_torque: 25.0,
            angular_damping: 4.0,
            recovery_torque: 15.0,
            recovery_speed_threshold: 1.5,
            ground_ray_length: 1.2,
            ground_ray_count: 5,
        }
    }
}

impl VehicleTuning {
    /// Reads tuning overrides from a YAML file; fields the file leaves out keep
    /// their defaults, and a missing file yields the defaults outright.
    pub fn load(path: impl AsRef<Path>) -> Result<VehicleTuning, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .build()?;

        let tuning: VehicleTuning = config.try_deserialize()?;
        debug!("vehicle tuning from {}: {:?}", path.as_ref().display(), tuning);
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tuning = VehicleTuning::load("no-such-tuning.yaml").unwrap();
        assert_eq!(tuning, VehicleTuning::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let tuning: VehicleTuning =
            serde_yaml::from_str("max_speed: 25.0\nground_ray_count: 9\n").unwrap();
        assert_eq!(tuning.max_speed, 25.0);
        assert_eq!(tuning.ground_ray_count, 9);
        assert_eq!(tuning.acceleration, 30.0);
        assert_eq!(tuning.lateral_grip, 0.2);
    }
}
