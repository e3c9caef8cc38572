use glam::{DMat3, DQuat, DVec3};
use log::{info, warn};

use rover_core::entity_location::EntityLocation;
use rover_core::{CameraSettings, VehicleID};

use crate::physics::math::{clamp01, inverse_lerp, lerp, smooth_damp, try_normalize};

/// Third-person chase camera. Trails a point behind and above the vehicle it
/// was handed, turns to face the way that vehicle faces, and widens its field
/// of view as the vehicle speeds up.
pub struct CameraFollow {
    settings: CameraSettings,
    pub location: EntityLocation,
    pub fov: f64,
    position_velocity: DVec3,
    target: Option<VehicleID>,
}

impl CameraFollow {
    pub fn new(settings: CameraSettings) -> CameraFollow {
        CameraFollow {
            settings,
            location: EntityLocation::default(),
            fov: settings.min_zoom * 10.0,
            position_velocity: DVec3::ZERO,
            target: None,
        }
    }

    pub fn target(&self) -> Option<VehicleID> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<VehicleID>) {
        match target {
            Some(id) => info!("camera now following vehicle {}", id),
            None if self.target.is_some() => warn!("camera lost its target"),
            None => {}
        }
        self.target = target;
        self.position_velocity = DVec3::ZERO;
    }

    // where the camera wants to sit for a target at `target`
    pub fn desired_position(&self, target: &EntityLocation) -> DVec3 {
        target.transform_point(self.settings.offset)
    }

    /// Runs after the physics steps of a frame, with the target's render
    /// location and current speed. Does nothing without a target.
    pub fn late_update(&mut self, target: &EntityLocation, target_speed: f64, delta_time: f64) {
        if self.target.is_none() || delta_time <= 0.0 {
            return;
        }

        self.location.position = smooth_damp(
            self.location.position,
            self.desired_position(target),
            &mut self.position_velocity,
            self.settings.position_smooth_time,
            delta_time,
        );

        if let Some(look) = look_rotation(target.forward(), DVec3::Y) {
            let t = clamp01(self.settings.rotation_smooth_speed * delta_time);
            self.location.rotation = self.location.rotation.slerp(look, t).normalize();
        }

        let t = inverse_lerp(0.0, self.settings.max_speed_for_zoom, target_speed);
        let desired_fov = lerp(self.settings.min_zoom * 10.0, self.settings.max_zoom * 10.0, t);
        self.fov = lerp(self.fov, desired_fov, self.settings.zoom_smooth_speed * delta_time);
    }
}

// Rotation whose +z faces `forward` with +y as close to `up` as it gets.
// None when the two are parallel.
fn look_rotation(forward: DVec3, up: DVec3) -> Option<DQuat> {
    let forward = try_normalize(forward)?;
    let right = try_normalize(up.cross(forward))?;
    let up = forward.cross(right);
    Some(DQuat::from_mat3(&DMat3::from_cols(right, up, forward)).normalize())
}
