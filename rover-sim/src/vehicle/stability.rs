use rover_core::tuning::VehicleTuning;

use crate::physics::rigid_body::{BodySnapshot, ForceMode};

use super::command::ControlCommand;
use super::grounding::GroundSensing;

// Anti-flip: while grounded, pull the vehicle's up axis toward the ground
// normal. Purely proportional; damping comes from the body's own angular
// damping.
pub fn stabilize(
    body: &BodySnapshot,
    ground: &GroundSensing,
    tuning: &VehicleTuning,
) -> Option<ControlCommand> {
    if !ground.grounded {
        return None;
    }

    let torque_axis = body.up().cross(ground.normal);
    if !torque_axis.is_finite() || torque_axis.length_squared() <= f64::EPSILON {
        return None;
    }

    Some(ControlCommand::Torque {
        vector: torque_axis * tuning.upright_torque,
        mode: ForceMode::Acceleration,
    })
}
