use glam::{DQuat, DVec3};
use log::warn;

use rover_core::entity_location::EntityLocation;

use super::bounding_box::BoundingBox;
use super::math::project_onto_unit;
use super::terrain::Terrain;

pub const GRAVITY: f64 = 9.81;

// most sub-steps a continuous-collision body takes in one tick
const MAX_SUBSTEPS: usize = 8;

/// How a force or torque command is turned into a velocity change. Both modes
/// ignore mass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ForceMode {
    // continuous; integrated over the step as an acceleration
    Acceleration,
    // applied to the velocity immediately, once
    VelocityChange,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionDetection {
    Discrete,
    ContinuousDynamic,
}

// One-time rigid body configuration applied when a vehicle spawns
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodySetup {
    pub mass: f64,
    pub linear_damping: f64,
    pub angular_damping: f64,
    pub use_gravity: bool,
    pub is_kinematic: bool,
    pub interpolate: bool,
    pub collision_detection: CollisionDetection,
    // body-local offset from the box center
    pub center_of_mass: DVec3,
}

impl BodySetup {
    pub fn arcade_vehicle(angular_damping: f64) -> BodySetup {
        BodySetup {
            mass: 1.0,
            linear_damping: 0.2,
            angular_damping,
            use_gravity: true,
            is_kinematic: false,
            interpolate: true,
            collision_detection: CollisionDetection::ContinuousDynamic,
            center_of_mass: DVec3::new(0.0, -0.3, 0.0),
        }
    }
}

// Read-only view of a body at one instant
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodySnapshot {
    pub location: EntityLocation,
    pub linear_velocity: DVec3,
    pub angular_velocity: DVec3,
    pub bounds: BoundingBox,
}

impl BodySnapshot {
    pub fn forward(&self) -> DVec3 {
        self.location.forward()
    }

    pub fn up(&self) -> DVec3 {
        self.location.up()
    }

    pub fn speed(&self) -> f64 {
        self.linear_velocity.length()
    }
}

/// The integrator a vehicle controller drives. Commands accumulate until the
/// integrator's next step, except velocity changes and direct velocity writes,
/// which are visible to the very next `snapshot`.
pub trait RigidBody {
    fn configure(&mut self, setup: &BodySetup);
    fn snapshot(&self) -> BodySnapshot;
    fn add_force(&mut self, force: DVec3, mode: ForceMode);
    fn add_torque(&mut self, torque: DVec3, mode: ForceMode);
    fn set_linear_velocity(&mut self, velocity: DVec3);
}

// A box-shaped body integrated with semi-implicit Euler against a Terrain.
// Rotational inertia is treated as unit, so torques act directly as angular
// accelerations.
#[derive(Clone, Debug)]
pub struct SimpleBody {
    pub location: EntityLocation,
    pub previous_location: EntityLocation,
    pub linear_velocity: DVec3,
    pub angular_velocity: DVec3,
    pub size: DVec3,
    pub bounds: BoundingBox,
    pub setup: BodySetup,
    pending_linear_acceleration: DVec3,
    pending_angular_acceleration: DVec3,
    in_contact: bool,
}

impl SimpleBody {
    pub fn new(location: EntityLocation, size: DVec3) -> SimpleBody {
        SimpleBody {
            location,
            previous_location: location,
            linear_velocity: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
            size,
            bounds: BoundingBox::around(location.position, size, location.rotation),
            setup: BodySetup::arcade_vehicle(0.0),
            pending_linear_acceleration: DVec3::ZERO,
            pending_angular_acceleration: DVec3::ZERO,
            in_contact: false,
        }
    }

    pub fn is_in_contact(&self) -> bool {
        self.in_contact
    }

    // where to draw the body `alpha` of the way from the last step to the next
    pub fn render_location(&self, alpha: f64) -> EntityLocation {
        if self.setup.interpolate {
            self.previous_location.interpolate(&self.location, alpha)
        } else {
            self.location
        }
    }

    pub fn world_center_of_mass(&self) -> DVec3 {
        self.location.transform_point(self.setup.center_of_mass)
    }

    fn substeps(&self, dt: f64) -> usize {
        match self.setup.collision_detection {
            CollisionDetection::Discrete => 1,
            CollisionDetection::ContinuousDynamic => {
                // never move more than half the thinnest side per sub-step
                let thinnest = self.size.min_element().max(1e-3);
                let travel = self.linear_velocity.length() * dt;
                ((travel / (0.5 * thinnest)).ceil() as usize).clamp(1, MAX_SUBSTEPS)
            }
        }
    }

    /// Advances the body by `dt` seconds, consuming every accumulated force
    /// and torque.
    pub fn integrate(&mut self, dt: f64, terrain: &Terrain) {
        self.previous_location = self.location;
        if self.setup.is_kinematic || dt <= 0.0 {
            self.clear_pending();
            return;
        }

        let gravity = if self.setup.use_gravity {
            DVec3::new(0.0, -GRAVITY, 0.0)
        } else {
            DVec3::ZERO
        };

        let mut angular_acceleration = self.pending_angular_acceleration;
        if self.in_contact && self.setup.use_gravity {
            // weight hanging below the support point rights the body
            let lever = self.world_center_of_mass() - self.location.position;
            angular_acceleration += lever.cross(gravity);
        }

        self.linear_velocity += (self.pending_linear_acceleration + gravity) * dt;
        self.linear_velocity *= 1.0 / (1.0 + dt * self.setup.linear_damping);
        self.angular_velocity += angular_acceleration * dt;
        self.angular_velocity *= 1.0 / (1.0 + dt * self.setup.angular_damping);

        if !self.linear_velocity.is_finite() || !self.angular_velocity.is_finite() {
            warn!("non-finite body velocity, zeroing it");
            self.linear_velocity = DVec3::ZERO;
            self.angular_velocity = DVec3::ZERO;
        }

        let substeps = self.substeps(dt);
        let sub_dt = dt / substeps as f64;
        self.in_contact = false;
        for _ in 0..substeps {
            self.location.position += self.linear_velocity * sub_dt;
            let spin = DQuat::from_scaled_axis(self.angular_velocity * sub_dt);
            self.location.rotation = (spin * self.location.rotation).normalize();
            self.update_bounds();
            self.in_contact |= self.resolve_ground_contact(terrain);
        }

        self.clear_pending();
    }

    fn update_bounds(&mut self) {
        self.bounds
            .set_dimensions(&self.location.position, &self.size, self.location.rotation);
    }

    // push the box out of the surface under it and drop velocity into it
    fn resolve_ground_contact(&mut self, terrain: &Terrain) -> bool {
        let center = self.bounds.center();
        let surface = terrain.surface_at(center.x, center.z);
        let penetration = surface.height - self.bounds.min_y;
        if penetration < 0.0 {
            return false;
        }

        self.location.position.y += penetration;
        self.update_bounds();

        let into_surface = self.linear_velocity.dot(surface.normal);
        if into_surface < 0.0 {
            self.linear_velocity -= project_onto_unit(self.linear_velocity, surface.normal);
        }
        true
    }

    fn clear_pending(&mut self) {
        self.pending_linear_acceleration = DVec3::ZERO;
        self.pending_angular_acceleration = DVec3::ZERO;
    }
}

impl RigidBody for SimpleBody {
    fn configure(&mut self, setup: &BodySetup) {
        self.setup = *setup;
    }

    fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            location: self.location,
            linear_velocity: self.linear_velocity,
            angular_velocity: self.angular_velocity,
            bounds: self.bounds,
        }
    }

    fn add_force(&mut self, force: DVec3, mode: ForceMode) {
        match mode {
            ForceMode::Acceleration => self.pending_linear_acceleration += force,
            ForceMode::VelocityChange => self.linear_velocity += force,
        }
    }

    fn add_torque(&mut self, torque: DVec3, mode: ForceMode) {
        match mode {
            ForceMode::Acceleration => self.pending_angular_acceleration += torque,
            ForceMode::VelocityChange => self.angular_velocity += torque,
        }
    }

    fn set_linear_velocity(&mut self, velocity: DVec3) {
        self.linear_velocity = velocity;
    }
}
