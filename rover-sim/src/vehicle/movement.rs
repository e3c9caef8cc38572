use rover_core::tuning::VehicleTuning;
use rover_core::vehicle_inputs::VehicleInputs;

use crate::physics::math::{project_onto_unit, try_normalize};
use crate::physics::rigid_body::{BodySnapshot, ForceMode};

use super::command::ControlCommand;
use super::grounding::GroundSensing;

// Forward / reverse drive along the ground plane. Off the ground the same
// push is scaled down by the air control multiplier.
pub fn thrust(
    body: &BodySnapshot,
    ground: &GroundSensing,
    inputs: &VehicleInputs,
    tuning: &VehicleTuning,
) -> Option<ControlCommand> {
    if !inputs.is_throttling() {
        return None;
    }

    // None when the nose points straight into or out of the ground
    let forward_on_ground = ground.direction_along_ground(body.forward())?;
    let control = if ground.grounded {
        1.0
    } else {
        tuning.air_control_multiplier
    };

    Some(ControlCommand::Force {
        vector: forward_on_ground * inputs.throttle * tuning.acceleration * control,
        mode: ForceMode::Acceleration,
    })
}

// Caps speed in the ground plane while the throttle is held. Velocity along
// the ground normal is left alone so jumps and falls are not slowed, and a
// coasting vehicle keeps whatever speed a slope or a landing gave it.
pub fn limit_speed(
    body: &BodySnapshot,
    ground: &GroundSensing,
    inputs: &VehicleInputs,
    tuning: &VehicleTuning,
) -> Option<ControlCommand> {
    if !inputs.is_throttling() {
        return None;
    }

    let velocity = body.linear_velocity;
    if !velocity.is_finite() {
        return None;
    }

    let planar_velocity = ground.along_ground(velocity);
    if planar_velocity.length() <= tuning.max_speed {
        return None;
    }

    let limited = try_normalize(planar_velocity)? * tuning.max_speed;
    Some(ControlCommand::SetLinearVelocity(
        limited + project_onto_unit(velocity, ground.normal),
    ))
}
