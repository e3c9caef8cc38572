use std::fmt;

use glam::{DQuat, DVec3};

use rover_core::entity_location::EntityLocation;
use rover_core::tuning::VehicleTuning;
use rover_core::VehicleID;

use crate::garage::VehicleSwitch;
use crate::physics::rigid_body::{BodySetup, RigidBody, SimpleBody};
use crate::physics::terrain::Terrain;
use crate::vehicle::command::ControlFrame;
use crate::vehicle::VehicleController;

// Every vehicle shares one box; 2 wide, 1 tall, 4 long
pub const VEHICLE_SIZE: DVec3 = glam::const_dvec3!([2.0, 1.0, 4.0]);

// Lined up side by side behind the start line, all facing +z
fn get_starting_position_from_vehicle_number(vehicle_number: VehicleID) -> DVec3 {
    DVec3::new(4.0 * vehicle_number as f64, VEHICLE_SIZE.y / 2.0, 0.0)
}

pub struct Vehicle {
    pub id: VehicleID,
    pub controller: VehicleController,
    pub body: SimpleBody,
}

impl Vehicle {
    /// A vehicle parked on its spot with the controller tuned and the body
    /// configured for arcade handling.
    pub fn spawn(id: VehicleID, tuning: VehicleTuning) -> Vehicle {
        Vehicle::spawn_with_controller(id, VehicleController::new(tuning))
    }

    pub fn spawn_with_controller(id: VehicleID, controller: VehicleController) -> Vehicle {
        let location = EntityLocation::new(
            get_starting_position_from_vehicle_number(id),
            DQuat::IDENTITY,
        );
        let mut body = SimpleBody::new(location, VEHICLE_SIZE);
        body.configure(&BodySetup::arcade_vehicle(
            controller.tuning().angular_damping,
        ));

        Vehicle {
            id,
            controller,
            body,
        }
    }

    // one fixed step: control first, then integrate everything it asked for
    pub fn fixed_update(&mut self, delta_time: f64, terrain: &Terrain) -> ControlFrame {
        let frame = self.controller.fixed_update(&mut self.body, terrain);
        self.body.integrate(delta_time, terrain);
        frame
    }

    pub fn telemetry(&self) -> VehicleTelemetry {
        VehicleTelemetry {
            id: self.id,
            position: self.body.location.position,
            speed: self.body.linear_velocity.length(),
            grounded: self.controller.sensing().grounded,
            upright: self.body.location.up().dot(DVec3::Y),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VehicleTelemetry {
    pub id: VehicleID,
    pub position: DVec3,
    pub speed: f64,
    pub grounded: bool,
    pub upright: f64,
}

impl fmt::Display for VehicleTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vehicle {} at ({:.2}, {:.2}, {:.2}) speed {:.2} grounded {} upright {:.2}",
            self.id,
            self.position.x,
            self.position.y,
            self.position.z,
            self.speed,
            self.grounded,
            self.upright
        )
    }
}

// All vehicles in the world, indexed by id
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn spawn(amount: usize, tuning: VehicleTuning) -> Fleet {
        Fleet {
            vehicles: (0..amount).map(|id| Vehicle::spawn(id, tuning)).collect(),
        }
    }

    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Fleet {
        Fleet { vehicles }
    }

    pub fn ids(&self) -> Vec<VehicleID> {
        self.vehicles.iter().map(|vehicle| vehicle.id).collect()
    }

    pub fn get(&self, id: VehicleID) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn get_mut(&mut self, id: VehicleID) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|vehicle| vehicle.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn fixed_update(
        &mut self,
        delta_time: f64,
        terrain: &Terrain,
    ) -> Vec<(VehicleID, ControlFrame)> {
        self.vehicles
            .iter_mut()
            .map(|vehicle| (vehicle.id, vehicle.fixed_update(delta_time, terrain)))
            .collect()
    }
}

impl VehicleSwitch for Fleet {
    fn set_vehicle_enabled(&mut self, id: VehicleID, enabled: bool) {
        if let Some(vehicle) = self.get_mut(id) {
            if enabled {
                vehicle.controller.enable();
            } else {
                vehicle.controller.disable();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::sampling::FixedPattern;

    #[test]
    fn test_spawn_positions_dont_overlap() {
        let fleet = Fleet::spawn(4, VehicleTuning::default());
        let vehicles: Vec<&Vehicle> = fleet.iter().collect();
        for pair in vehicles.windows(2) {
            let gap = pair[1].body.bounds.min_x - pair[0].body.bounds.max_x;
            assert!(gap > 0.0);
        }
        // parked on the ground, not in it
        assert!(vehicles
            .iter()
            .all(|vehicle| vehicle.body.bounds.min_y.abs() < 1e-12));
    }

    #[test]
    fn test_spawned_body_is_configured() {
        let tuning = VehicleTuning {
            angular_damping: 7.0,
            ..VehicleTuning::default()
        };
        let vehicle = Vehicle::spawn(1, tuning);
        assert_eq!(vehicle.body.setup, BodySetup::arcade_vehicle(7.0));
    }

    #[test]
    fn test_switch_toggles_controller() {
        let mut fleet = Fleet::spawn(2, VehicleTuning::default());
        fleet.set_vehicle_enabled(1, false);
        assert!(fleet.get(0).unwrap().controller.is_enabled());
        assert!(!fleet.get(1).unwrap().controller.is_enabled());

        // unknown ids are ignored
        fleet.set_vehicle_enabled(9, false);
        assert_eq!(fleet.ids(), vec![0, 1]);
    }

    #[test]
    fn test_parked_vehicle_stays_parked() {
        let controller =
            VehicleController::with_sampler(VehicleTuning::default(), Box::new(FixedPattern::cross()));
        let mut vehicle = Vehicle::spawn_with_controller(0, controller);
        let terrain = Terrain::flat(0.0);

        for _ in 0..100 {
            vehicle.fixed_update(0.02, &terrain);
        }

        let telemetry = vehicle.telemetry();
        assert!(telemetry.grounded);
        assert!(telemetry.speed < 1e-9);
        assert!((telemetry.upright - 1.0).abs() < 1e-9);
        assert!(telemetry
            .position
            .abs_diff_eq(DVec3::new(0.0, 0.5, 0.0), 1e-9));
    }
}
