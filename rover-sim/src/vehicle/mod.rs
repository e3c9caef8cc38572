//! The arcade vehicle controller.
//!
//! Once per physics step [`VehicleController::fixed_update`] senses the
//! ground and then runs six control laws against the rigid body, always in
//! this order:
//!
//! 1. [`movement::thrust`] and [`movement::limit_speed`]
//! 2. [`steering::steer`]
//! 3. [`grip::grip`]
//! 4. [`stability::stabilize`]
//! 5. [`recovery::recover`]
//!
//! Each law is a pure function of a body snapshot, the grounding result, the
//! latest inputs and the vehicle's tuning. The controller re-reads the body
//! between laws, so a law sees any velocity an earlier law wrote directly
//! (the speed clamp, the steering snap) but not accelerations still waiting
//! for the integrator.

use log::trace;

use rover_core::tuning::VehicleTuning;
use rover_core::vehicle_inputs::VehicleInputs;

use crate::physics::raycast::RayCaster;
use crate::physics::rigid_body::RigidBody;

pub mod command;
pub mod grip;
pub mod grounding;
pub mod movement;
pub mod recovery;
pub mod sampling;
pub mod stability;
pub mod steering;


use command::{Behavior, ControlCommand, ControlFrame, IssuedCommand};
use grounding::{sense_ground, GroundSensing};
use sampling::{RandomSphere, SampleOriginGenerator};

pub struct VehicleController {
    tuning: VehicleTuning,
    inputs: VehicleInputs,
    sensing: GroundSensing,
    sampler: Box<dyn SampleOriginGenerator>,
    enabled: bool,
}

impl VehicleController {
    pub fn new(tuning: VehicleTuning) -> Self {
        Self::with_sampler(tuning, Box::new(RandomSphere::new()))
    }

    pub fn with_sampler(tuning: VehicleTuning, sampler: Box<dyn SampleOriginGenerator>) -> Self {
        VehicleController {
            tuning,
            inputs: VehicleInputs::default(),
            sensing: GroundSensing::airborne(),
            sampler,
            enabled: true,
        }
    }

    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    pub fn inputs(&self) -> VehicleInputs {
        self.inputs
    }

    // called once per rendered frame with the freshest input sample
    pub fn set_inputs(&mut self, inputs: VehicleInputs) {
        self.inputs = inputs;
    }

    // last grounding result; stale while the controller is disabled
    pub fn sensing(&self) -> GroundSensing {
        self.sensing
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    // a disabled controller neither senses nor pushes the body
    pub fn disable(&mut self) {
        self.enabled = false;
        self.inputs = VehicleInputs::default();
    }

    /// Runs one physics step of control against `body`, returning everything
    /// that was sensed and issued.
    pub fn fixed_update<B, C>(&mut self, body: &mut B, world: &C) -> ControlFrame
    where
        B: RigidBody + ?Sized,
        C: RayCaster + ?Sized,
    {
        if !self.enabled {
            return ControlFrame {
                sensing: self.sensing,
                commands: Vec::new(),
            };
        }

        let tuning = &self.tuning;
        let inputs = &self.inputs;
        let ground = sense_ground(&body.snapshot().bounds, tuning, world, self.sampler.as_mut());
        self.sensing = ground;

        let mut frame = ControlFrame {
            sensing: ground,
            commands: Vec::new(),
        };
        let mut issue = |body: &mut B, behavior: Behavior, command: Option<ControlCommand>| {
            if let Some(command) = command {
                trace!("{:?}: {:?}", behavior, command);
                command.apply_to(body);
                frame.commands.push(IssuedCommand { behavior, command });
            }
        };

        let command = movement::thrust(&body.snapshot(), &ground, inputs, tuning);
        issue(&mut *body, Behavior::Movement, command);
        let command = movement::limit_speed(&body.snapshot(), &ground, inputs, tuning);
        issue(&mut *body, Behavior::SpeedLimit, command);
        let command = steering::steer(&body.snapshot(), &ground, inputs, tuning);
        issue(&mut *body, Behavior::Steering, command);
        let command = grip::grip(&body.snapshot(), &ground, tuning);
        issue(&mut *body, Behavior::Grip, command);
        let command = stability::stabilize(&body.snapshot(), &ground, tuning);
        issue(&mut *body, Behavior::Stability, command);
        let command = recovery::recover(&body.snapshot(), tuning);
        issue(&mut *body, Behavior::Recovery, command);

        frame
    }
}
