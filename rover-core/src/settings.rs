use std::path::Path;

use config::{Config, ConfigError, File};
use glam::DVec3;
use serde::Deserialize;

// How the chase camera trails the active vehicle
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct CameraSettings {
    // in the target's local frame: +z forward, +y up
    pub offset: DVec3,
    pub position_smooth_time: f64,
    pub rotation_smooth_speed: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_smooth_speed: f64,
    pub max_speed_for_zoom: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            offset: DVec3::new(0.0, 3.5, -9.0),
            position_smooth_time: 0.12,
            rotation_smooth_speed: 7.0,
            min_zoom: 6.0,
            max_zoom: 10.0,
            zoom_smooth_speed: 3.0,
            max_speed_for_zoom: 40.0,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub physics_tick_ms: u64,
    pub frame_ms: u64,
    pub sim_ticks: u64,
    pub vehicle_amount: usize,
    pub realtime: bool,
    pub telemetry_every_ticks: u64,
    pub tuning_path: String,
    #[serde(default)]
    pub camera: CameraSettings,
}

impl Settings {
    /// Layers the YAML file at `path` (if it exists) over the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("physics_tick_ms", 20)?
            .set_default("frame_ms", 16)?
            .set_default("sim_ticks", 3000)?
            .set_default("vehicle_amount", 2)?
            .set_default("realtime", false)?
            .set_default("telemetry_every_ticks", 50)?
            .set_default("tuning_path", "tuning.yaml")?
            .add_source(File::from(path.as_ref()).required(false))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    // a zero-length frame never accumulates a tick, a zero-length tick
    // divides by zero when interpolating
    fn validate(&self) -> Result<(), ConfigError> {
        if self.physics_tick_ms == 0 {
            return Err(ConfigError::Message(
                "physics_tick_ms must be at least 1".to_string(),
            ));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Message("frame_ms must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn fixed_delta(&self) -> f64 {
        self.physics_tick_ms as f64 / 1000.0
    }

    pub fn frame_delta(&self) -> f64 {
        self.frame_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("definitely-not-here.yaml").unwrap();
        assert_eq!(settings.physics_tick_ms, 20);
        assert_eq!(settings.vehicle_amount, 2);
        assert!(!settings.realtime);
        assert_eq!(settings.tuning_path, "tuning.yaml");
        assert!(settings
            .camera
            .offset
            .abs_diff_eq(DVec3::new(0.0, 3.5, -9.0), 1e-9));
        assert!((settings.fixed_delta() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_zero_frame_length_is_rejected() {
        let path = std::env::temp_dir().join("rover-settings-zero-frame.yaml");
        std::fs::write(&path, "frame_ms: 0\nsim_ticks: 10\n").unwrap();
        let result = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        match result {
            Err(ConfigError::Message(message)) => assert!(message.contains("frame_ms")),
            other => panic!("expected a rejected frame length, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_tick_length_is_rejected() {
        let mut settings = Settings::load("definitely-not-here.yaml").unwrap();
        settings.physics_tick_ms = 0;
        assert!(settings.validate().is_err());

        settings.physics_tick_ms = 1;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join("rover-settings-override.yaml");
        std::fs::write(&path, "sim_ticks: 10\nvehicle_amount: 3\n").unwrap();
        let settings = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        let settings = settings.unwrap();
        assert_eq!(settings.sim_ticks, 10);
        assert_eq!(settings.vehicle_amount, 3);
        assert_eq!(settings.frame_ms, 16);
    }
}
