use glam::DVec3;

use crate::physics::rigid_body::{ForceMode, RigidBody};

use super::grounding::GroundSensing;

// What a control law asks of the rigid body
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ControlCommand {
    Force { vector: DVec3, mode: ForceMode },
    Torque { vector: DVec3, mode: ForceMode },
    SetLinearVelocity(DVec3),
}

impl ControlCommand {
    pub fn apply_to<B: RigidBody + ?Sized>(&self, body: &mut B) {
        match *self {
            ControlCommand::Force { vector, mode } => body.add_force(vector, mode),
            ControlCommand::Torque { vector, mode } => body.add_torque(vector, mode),
            ControlCommand::SetLinearVelocity(velocity) => body.set_linear_velocity(velocity),
        }
    }

    // the force, torque or velocity carried by this command
    pub fn vector(&self) -> DVec3 {
        match *self {
            ControlCommand::Force { vector, .. } | ControlCommand::Torque { vector, .. } => vector,
            ControlCommand::SetLinearVelocity(velocity) => velocity,
        }
    }
}

// The control laws, in the order they run each tick
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Behavior {
    Movement,
    SpeedLimit,
    Steering,
    Grip,
    Stability,
    Recovery,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IssuedCommand {
    pub behavior: Behavior,
    pub command: ControlCommand,
}

// Everything one controller tick sensed and issued
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlFrame {
    pub sensing: GroundSensing,
    pub commands: Vec<IssuedCommand>,
}

impl ControlFrame {
    pub fn command_from(&self, behavior: Behavior) -> Option<&ControlCommand> {
        self.commands
            .iter()
            .find(|issued| issued.behavior == behavior)
            .map(|issued| &issued.command)
    }

    pub fn is_idle(&self) -> bool {
        self.commands.is_empty()
    }
}
