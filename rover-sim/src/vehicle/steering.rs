use rover_core::tuning::VehicleTuning;
use rover_core::vehicle_inputs::VehicleInputs;

use crate::physics::math::clamp01;
use crate::physics::rigid_body::{BodySnapshot, ForceMode};

use super::command::ControlCommand;
use super::grounding::GroundSensing;

// below this planar speed steering does nothing, so a parked vehicle can't
// be spun in place
pub const MIN_STEERING_SPEED: f64 = 0.2;

/// Velocity-guided yaw. The target yaw rate grows with planar speed up to
/// full authority at `max_speed`, and each tick the yaw rate about the ground
/// normal is snapped to that target with a velocity change, so holding the
/// stick never winds up extra spin.
pub fn steer(
    body: &BodySnapshot,
    ground: &GroundSensing,
    inputs: &VehicleInputs,
    tuning: &VehicleTuning,
) -> Option<ControlCommand> {
    if !ground.grounded || !inputs.is_steering() {
        return None;
    }

    let speed = ground.along_ground(body.linear_velocity).length();
    if !(speed >= MIN_STEERING_SPEED) {
        return None;
    }

    let speed_factor = if tuning.max_speed > 0.0 {
        clamp01(speed / tuning.max_speed)
    } else {
        1.0
    };
    let desired_yaw = inputs.steer * tuning.steering_strength * speed_factor;
    let current_yaw = body.angular_velocity.dot(ground.normal);

    Some(ControlCommand::Torque {
        vector: ground.normal * (desired_yaw - current_yaw),
        mode: ForceMode::VelocityChange,
    })
}

#[cfg(test)]
mod tests {
    use glam::{DQuat, DVec3};

    use super::*;
    use crate::physics::bounding_box::BoundingBox;
    use rover_core::entity_location::EntityLocation;

    fn moving(velocity: DVec3, angular_velocity: DVec3) -> BodySnapshot {
        let location = EntityLocation::new(DVec3::new(0.0, 0.5, 0.0), DQuat::IDENTITY);
        BodySnapshot {
            location,
            linear_velocity: velocity,
            angular_velocity,
            bounds: BoundingBox::around(location.position, DVec3::new(2.0, 1.0, 4.0), location.rotation),
        }
    }

    #[test]
    fn test_no_steering_while_crawling() {
        let tuning = VehicleTuning::default();
        let ground = GroundSensing::on_surface(DVec3::Y);
        for speed in [0.0, 0.05, 0.19] {
            // vertical speed doesn't count toward steering speed
            let body = moving(DVec3::new(0.0, 5.0, speed), DVec3::ZERO);
            assert!(steer(&body, &ground, &VehicleInputs::new(0.0, 1.0), &tuning).is_none());
        }
    }

    #[test]
    fn test_no_steering_in_the_air() {
        let tuning = VehicleTuning::default();
        let body = moving(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO);
        let command = steer(
            &body,
            &GroundSensing::airborne(),
            &VehicleInputs::new(1.0, 1.0),
            &tuning,
        );
        assert!(command.is_none());
    }

    #[test]
    fn test_steering_authority_scales_with_speed() {
        let tuning = VehicleTuning::default();
        let ground = GroundSensing::on_surface(DVec3::Y);
        let inputs = VehicleInputs::new(0.0, 1.0);

        let half = steer(&moving(DVec3::new(0.0, 0.0, 9.0), DVec3::ZERO), &ground, &inputs, &tuning)
            .unwrap();
        assert!(half.vector().abs_diff_eq(DVec3::new(0.0, 2.25, 0.0), 1e-12));

        // past max speed authority stays at full
        let full = steer(&moving(DVec3::new(0.0, 0.0, 36.0), DVec3::ZERO), &ground, &inputs, &tuning)
            .unwrap();
        assert!(full.vector().abs_diff_eq(DVec3::new(0.0, 4.5, 0.0), 1e-12));
        assert!(matches!(
            full,
            ControlCommand::Torque {
                mode: ForceMode::VelocityChange,
                ..
            }
        ));
    }

    #[test]
    fn test_correction_is_relative_to_current_yaw() {
        let tuning = VehicleTuning::default();
        let ground = GroundSensing::on_surface(DVec3::Y);
        let inputs = VehicleInputs::new(0.0, -1.0);
        // already spinning faster than asked; roll rate is ignored
        let body = moving(DVec3::new(0.0, 0.0, 18.0), DVec3::new(1.0, -6.0, 0.0));
        let command = steer(&body, &ground, &inputs, &tuning).unwrap();
        assert!(command.vector().abs_diff_eq(DVec3::new(0.0, 1.5, 0.0), 1e-12));
    }
}
