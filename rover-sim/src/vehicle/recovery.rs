use glam::DVec3;

use rover_core::tuning::VehicleTuning;

use crate::physics::math::try_normalize;
use crate::physics::rigid_body::{BodySnapshot, ForceMode};

use super::command::ControlCommand;

// dot(vehicle up, world up) above this counts as upright enough
pub const UPRIGHT_DOT: f64 = 0.3;

/// Flip recovery. Only a (nearly) stationary vehicle that is on its side or
/// roof gets righted, and always toward world up since it may be touching
/// nothing at all. Fast tumbles are left for stability to sort out once the
/// vehicle lands.
pub fn recover(body: &BodySnapshot, tuning: &VehicleTuning) -> Option<ControlCommand> {
    if !(body.speed() <= tuning.recovery_speed_threshold) {
        return None;
    }

    let up = body.up();
    let upside_down = up.dot(DVec3::Y);
    if upside_down > UPRIGHT_DOT {
        return None;
    }

    let torque_axis = up.cross(DVec3::Y);
    let vector = if torque_axis.length_squared() > f64::EPSILON {
        torque_axis * tuning.recovery_torque
    } else {
        // lying exactly on the roof: roll over about the flattened nose
        let flat_forward = body.forward() * DVec3::new(1.0, 0.0, 1.0);
        try_normalize(flat_forward).unwrap_or(DVec3::X) * tuning.recovery_torque
    };

    Some(ControlCommand::Torque {
        vector,
        mode: ForceMode::Acceleration,
    })
}
