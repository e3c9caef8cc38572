use glam::DVec3;

use rover_core::tuning::VehicleTuning;

use crate::physics::bounding_box::BoundingBox;
use crate::physics::math::{project_on_plane, try_normalize};
use crate::physics::raycast::RayCaster;

use super::sampling::SampleOriginGenerator;

// sample origins scatter over this fraction of the bounds' x extent
const SAMPLE_RADIUS_FRACTION: f64 = 0.5;

/// Result of one grounding pass. `normal` only means something while
/// `grounded` is set; otherwise it is world up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundSensing {
    pub grounded: bool,
    pub normal: DVec3,
    pub hits: usize,
}

impl Default for GroundSensing {
    fn default() -> Self {
        GroundSensing::airborne()
    }
}

impl GroundSensing {
    pub fn airborne() -> Self {
        GroundSensing {
            grounded: false,
            normal: DVec3::Y,
            hits: 0,
        }
    }

    pub fn on_surface(normal: DVec3) -> Self {
        GroundSensing {
            grounded: true,
            normal: try_normalize(normal).unwrap_or(DVec3::Y),
            hits: 1,
        }
    }

    // the part of `v` that lies in the ground plane
    pub fn along_ground(&self, v: DVec3) -> DVec3 {
        project_on_plane(v, self.normal)
    }

    // `direction` flattened onto the ground plane; None when it points
    // straight into or out of the ground
    pub fn direction_along_ground(&self, direction: DVec3) -> Option<DVec3> {
        try_normalize(self.along_ground(direction))
    }
}

/// Casts `ground_ray_count` rays straight down from scattered points around
/// the bounds center and averages the normals of whatever they hit.
pub fn sense_ground<C, S>(
    bounds: &BoundingBox,
    tuning: &VehicleTuning,
    caster: &C,
    sampler: &mut S,
) -> GroundSensing
where
    C: RayCaster + ?Sized,
    S: SampleOriginGenerator + ?Sized,
{
    let center = bounds.center();
    let radius = bounds.extents().x * SAMPLE_RADIUS_FRACTION;

    sampler.begin_pass();
    let mut hits = 0;
    let mut normal_sum = DVec3::ZERO;
    for _ in 0..tuning.ground_ray_count {
        let origin = center + sampler.next_offset(radius);
        if let Some(hit) = caster.cast(origin, -DVec3::Y, tuning.ground_ray_length) {
            normal_sum += hit.normal;
            hits += 1;
        }
    }

    if hits == 0 {
        return GroundSensing::airborne();
    }

    GroundSensing {
        grounded: true,
        // opposing normals (a knife-edge) cancel out; fall back to up
        normal: try_normalize(normal_sum).unwrap_or(DVec3::Y),
        hits,
    }
}
