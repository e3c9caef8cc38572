use std::thread;
use std::time::{Duration, Instant};

use log::{info, trace, warn};

use rover_core::tuning::VehicleTuning;
use rover_core::vehicle_inputs::VehicleInputs;
use rover_core::Settings;

use crate::camera::CameraFollow;
use crate::garage::Garage;
use crate::input::{InputSource, ScriptedInput};
use crate::physics::terrain::Terrain;
use crate::vehicles::Fleet;

/// Owns the world and drives it: a variable-rate frame loop that samples
/// input, catches the physics up in fixed steps, then moves the camera.
pub struct SimServer {
    settings: Settings,
    terrain: Terrain,
    fleet: Fleet,
    garage: Garage,
    camera: CameraFollow,
    input: Box<dyn InputSource>,
    frame: u64,
    tick: u64,
    accumulator: f64,
}

impl SimServer {
    pub fn new(settings: Settings, tuning: VehicleTuning) -> SimServer {
        let fleet = Fleet::spawn(settings.vehicle_amount, tuning);
        SimServer::with_parts(
            settings,
            Terrain::test_course(),
            fleet,
            Box::new(ScriptedInput::demo()),
        )
    }

    pub fn with_parts(
        settings: Settings,
        terrain: Terrain,
        mut fleet: Fleet,
        input: Box<dyn InputSource>,
    ) -> SimServer {
        let mut camera = CameraFollow::new(settings.camera);
        let garage = Garage::new(fleet.ids(), &mut fleet, &mut camera);
        info!(
            "simulating {} vehicles at {} ms per tick",
            fleet.ids().len(),
            settings.physics_tick_ms
        );

        SimServer {
            settings,
            terrain,
            fleet,
            garage,
            camera,
            input,
            frame: 0,
            tick: 0,
            accumulator: 0.0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn garage(&self) -> &Garage {
        &self.garage
    }

    pub fn camera(&self) -> &CameraFollow {
        &self.camera
    }

    /// Runs frames until `ticks` physics steps have happened. Halfway through,
    /// control moves to the next vehicle in the garage.
    pub fn run(&mut self, ticks: u64) {
        let frame_duration = Duration::from_millis(self.settings.frame_ms);
        let handover_tick = ticks / 2;
        let mut handed_over = false;

        while self.tick < ticks {
            let start_time = Instant::now();

            self.run_frame(ticks);

            if !handed_over && self.tick >= handover_tick {
                handed_over = true;
                self.garage.activate_next(&mut self.fleet, &mut self.camera);
            }

            if self.settings.realtime {
                match frame_duration.checked_sub(start_time.elapsed()) {
                    Some(remaining) => thread::sleep(remaining),
                    None => warn!("frame {} took longer than configured length", self.frame),
                }
            }
        }

        for vehicle in self.fleet.iter() {
            info!("finished: {}", vehicle.telemetry());
        }
    }

    // one rendered frame: input, as many fixed steps as fit, then the camera
    fn run_frame(&mut self, max_ticks: u64) {
        let fixed_delta = self.settings.fixed_delta();
        self.accumulator += self.settings.frame_delta();

        let axes = self.input.sample(self.frame);
        if let Some(vehicle) = self
            .garage
            .active_vehicle()
            .and_then(|id| self.fleet.get_mut(id))
        {
            vehicle.controller.set_inputs(VehicleInputs::from(axes));
        }

        while self.accumulator >= fixed_delta && self.tick < max_ticks {
            self.fixed_update(fixed_delta);
            self.accumulator -= fixed_delta;
        }

        self.late_update();
        self.frame += 1;
    }

    fn fixed_update(&mut self, delta_time: f64) {
        for (id, frame) in self.fleet.fixed_update(delta_time, &self.terrain) {
            for issued in &frame.commands {
                trace!(
                    "tick {} vehicle {} {:?}: {:?}",
                    self.tick,
                    id,
                    issued.behavior,
                    issued.command
                );
            }
        }
        self.tick += 1;

        let every = self.settings.telemetry_every_ticks;
        if every > 0 && self.tick % every == 0 {
            if let Some(vehicle) = self
                .garage
                .active_vehicle()
                .and_then(|id| self.fleet.get(id))
            {
                info!("tick {}: {}", self.tick, vehicle.telemetry());
            }
        }
    }

    fn late_update(&mut self) {
        let target = match self.camera.target().and_then(|id| self.fleet.get(id)) {
            Some(vehicle) => vehicle,
            None => return,
        };

        // how far between the last physics step and the next this frame is
        let alpha = self.accumulator / self.settings.fixed_delta();
        let location = target.body.render_location(alpha);
        let speed = target.body.linear_velocity.length();
        self.camera
            .late_update(&location, speed, self.settings.frame_delta());
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use rover_core::tuning::VehicleTuning;
    use rover_core::vehicle_inputs::InputAxes;

    use super::*;
    use crate::vehicle::sampling::FixedPattern;
    use crate::vehicle::VehicleController;
    use crate::vehicles::Vehicle;

    fn get_test_settings() -> Settings {
        Settings {
            physics_tick_ms: 20,
            frame_ms: 16,
            sim_ticks: 100,
            vehicle_amount: 2,
            realtime: false,
            telemetry_every_ticks: 0,
            tuning_path: String::new(),
            camera: Default::default(),
        }
    }

    fn get_test_fleet(amount: usize) -> Fleet {
        Fleet::from_vehicles(
            (0..amount)
                .map(|id| {
                    let controller = VehicleController::with_sampler(
                        VehicleTuning::default(),
                        Box::new(FixedPattern::cross()),
                    );
                    Vehicle::spawn_with_controller(id, controller)
                })
                .collect(),
        )
    }

    fn full_throttle() -> Box<dyn InputSource> {
        Box::new(ScriptedInput::new(vec![(0, InputAxes::new(1.0, 0.0))]))
    }

    #[test]
    fn test_runs_exact_tick_count() {
        let mut server = SimServer::with_parts(
            get_test_settings(),
            Terrain::flat(0.0),
            get_test_fleet(1),
            full_throttle(),
        );
        server.run(37);
        assert_eq!(server.tick(), 37);
    }

    #[test]
    fn test_only_active_vehicle_drives() {
        let mut server = SimServer::with_parts(
            get_test_settings(),
            Terrain::flat(0.0),
            get_test_fleet(2),
            full_throttle(),
        );
        // frame by frame, so there is no handover
        while server.tick() < 40 {
            server.run_frame(40);
        }

        let driven = server.fleet().get(0).unwrap();
        let parked = server.fleet().get(1).unwrap();
        assert!(driven.body.location.position.z > 1.0);
        assert!(parked
            .body
            .location
            .position
            .abs_diff_eq(DVec3::new(4.0, 0.5, 0.0), 1e-9));
    }

    #[test]
    fn test_hands_over_halfway() {
        let mut server = SimServer::with_parts(
            get_test_settings(),
            Terrain::flat(0.0),
            get_test_fleet(2),
            full_throttle(),
        );
        server.run(100);

        assert_eq!(server.garage().active_vehicle(), Some(1));
        assert_eq!(server.camera().target(), Some(1));
        assert!(!server.fleet().get(0).unwrap().controller.is_enabled());
        assert!(server.fleet().get(1).unwrap().controller.is_enabled());
        // the second vehicle got the remaining ticks of throttle
        assert!(server.fleet().get(1).unwrap().body.location.position.z > 1.0);
    }

    #[test]
    fn test_camera_follows_active_vehicle() {
        let mut server = SimServer::with_parts(
            get_test_settings(),
            Terrain::flat(0.0),
            get_test_fleet(1),
            full_throttle(),
        );
        server.run(200);

        let vehicle = server.fleet().get(0).unwrap();
        let camera = server.camera();
        // trailing behind and above
        assert!(camera.location.position.z < vehicle.body.location.position.z);
        assert!(camera.location.position.y > vehicle.body.location.position.y);
        assert!(camera.fov > 60.0);
    }
}
