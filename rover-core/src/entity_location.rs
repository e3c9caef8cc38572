use glam::{DQuat, DVec3};

// EntityLocation is where a body is and which way it faces. Local axes follow
// the usual vehicle convention: +z forward, +y up, +x right.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EntityLocation {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for EntityLocation {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl EntityLocation {
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    pub fn right(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    // local-space point to world space
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.rotation * local
    }

    // linear blend of position, spherical blend of rotation
    pub fn interpolate(&self, next: &EntityLocation, alpha: f64) -> EntityLocation {
        let alpha = alpha.clamp(0.0, 1.0);
        EntityLocation {
            position: self.position.lerp(next.position, alpha),
            rotation: self.rotation.slerp(next.rotation, alpha).normalize(),
        }
    }
}
