use log::{debug, info};

use rover_core::VehicleID;

use crate::camera::CameraFollow;

/// Whatever owns the vehicles' controllers. The garage only ever flips them
/// on and off.
pub trait VehicleSwitch {
    fn set_vehicle_enabled(&mut self, id: VehicleID, enabled: bool);
}

// The vehicles a player can cycle through; at most one is driven at a time
pub struct Garage {
    vehicles: Vec<VehicleID>,
    active: Option<usize>,
}

impl Garage {
    /// Parks every vehicle, then hands the first one (if any) to the player
    /// and the camera.
    pub fn new<W: VehicleSwitch + ?Sized>(
        vehicles: Vec<VehicleID>,
        world: &mut W,
        camera: &mut CameraFollow,
    ) -> Garage {
        for &id in &vehicles {
            world.set_vehicle_enabled(id, false);
        }

        let mut garage = Garage {
            vehicles,
            active: None,
        };
        garage.activate(0, world, camera);
        garage
    }

    pub fn vehicles(&self) -> &[VehicleID] {
        &self.vehicles
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_vehicle(&self) -> Option<VehicleID> {
        self.active.map(|index| self.vehicles[index])
    }

    /// Switches control to the vehicle at `index`. Returns false (and changes
    /// nothing) when the index is out of range or already active.
    pub fn activate<W: VehicleSwitch + ?Sized>(
        &mut self,
        index: usize,
        world: &mut W,
        camera: &mut CameraFollow,
    ) -> bool {
        if index >= self.vehicles.len() {
            debug!("no vehicle in garage slot {}", index);
            return false;
        }
        if self.active == Some(index) {
            return false;
        }

        if let Some(current) = self.active_vehicle() {
            world.set_vehicle_enabled(current, false);
        }
        let next = self.vehicles[index];
        world.set_vehicle_enabled(next, true);
        self.active = Some(index);
        camera.set_target(Some(next));

        info!("garage slot {} active, driving vehicle {}", index, next);
        true
    }

    // adds a parked vehicle; the first one ever added is activated
    pub fn add<W: VehicleSwitch + ?Sized>(
        &mut self,
        id: VehicleID,
        world: &mut W,
        camera: &mut CameraFollow,
    ) -> usize {
        world.set_vehicle_enabled(id, false);
        self.vehicles.push(id);
        if self.active.is_none() {
            self.activate(0, world, camera);
        }
        self.vehicles.len() - 1
    }

    // activates the slot after the active one, wrapping around
    pub fn activate_next<W: VehicleSwitch + ?Sized>(
        &mut self,
        world: &mut W,
        camera: &mut CameraFollow,
    ) -> bool {
        if self.vehicles.is_empty() {
            return false;
        }
        let next = self.active.map_or(0, |index| (index + 1) % self.vehicles.len());
        self.activate(next, world, camera)
    }
}
