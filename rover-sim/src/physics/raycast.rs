use glam::DVec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub point: DVec3,
    // unit normal of the surface that was hit
    pub normal: DVec3,
    pub distance: f64,
}

/// Collision query service used for ground sensing.
///
/// `direction` is expected to be unit length. Rays whose origin is already
/// inside solid geometry report no hit.
pub trait RayCaster {
    fn cast(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<RayHit>;
}
