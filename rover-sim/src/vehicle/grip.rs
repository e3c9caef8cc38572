use rover_core::tuning::VehicleTuning;

use crate::physics::math::project_onto_unit;
use crate::physics::rigid_body::{BodySnapshot, ForceMode};

use super::command::ControlCommand;
use super::grounding::GroundSensing;

// Arcade traction: every tick, push back against a fraction of whatever
// velocity isn't along the vehicle's nose. A grip of 1 kills slides almost
// instantly, a grip near 0 lets the vehicle drift freely.
pub fn grip(
    body: &BodySnapshot,
    ground: &GroundSensing,
    tuning: &VehicleTuning,
) -> Option<ControlCommand> {
    if !ground.grounded {
        return None;
    }

    let velocity = body.linear_velocity;
    let forward = ground.direction_along_ground(body.forward())?;
    let lateral_velocity = velocity - project_onto_unit(velocity, forward);
    if !lateral_velocity.is_finite() || lateral_velocity.length_squared() <= f64::EPSILON {
        return None;
    }

    Some(ControlCommand::Force {
        vector: -lateral_velocity * tuning.lateral_grip,
        mode: ForceMode::Acceleration,
    })
}
