use glam::{DVec2, DVec3};

use super::math::try_normalize;
use super::ramp::Ramp;
use super::raycast::{RayCaster, RayHit};

// refinement passes once a marching ray has crossed the surface
const BISECTION_STEPS: usize = 24;

// A flat ground plane with ramps standing on it
#[derive(Clone, Debug)]
pub struct Terrain {
    pub ground_height: f64,
    pub ramps: Vec<Ramp>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfacePoint {
    pub height: f64,
    pub normal: DVec3,
}

impl Terrain {
    pub fn flat(ground_height: f64) -> Terrain {
        Terrain {
            ground_height,
            ramps: Vec::new(),
        }
    }

    pub fn with_ramp(mut self, ramp: Ramp) -> Terrain {
        self.ramps.push(ramp);
        self
    }

    // The stock test course: open ground with a ramp rising toward +z ahead
    // of the start line
    pub fn test_course() -> Terrain {
        Terrain::flat(0.0).with_ramp(Ramp {
            footprint: [[-6.0, 6.0], [40.0, 60.0]],
            min_height: 0.0,
            max_height: 4.0,
            incline_direction: DVec2::Y,
        })
    }

    // the topmost surface directly above or below (x, z)
    pub fn surface_at(&self, x: f64, z: f64) -> SurfacePoint {
        let ground = SurfacePoint {
            height: self.ground_height,
            normal: DVec3::Y,
        };

        self.ramps
            .iter()
            .filter_map(|ramp| {
                ramp.get_height_at_coordinates(x, z)
                    .map(|height| SurfacePoint {
                        height,
                        normal: ramp.surface_normal(),
                    })
            })
            .fold(ground, |best, candidate| {
                if candidate.height > best.height {
                    candidate
                } else {
                    best
                }
            })
    }

    fn is_below_surface(&self, point: DVec3) -> bool {
        point.y < self.surface_at(point.x, point.z).height
    }

    fn march(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<RayHit> {
        let step = (max_distance / 64.0).clamp(1e-3, 0.05);
        let mut previous = 0.0;
        let mut travelled = step.min(max_distance);

        loop {
            if self.is_below_surface(origin + direction * travelled) {
                let (mut outside, mut inside) = (previous, travelled);
                for _ in 0..BISECTION_STEPS {
                    let mid = (outside + inside) / 2.0;
                    if self.is_below_surface(origin + direction * mid) {
                        inside = mid;
                    } else {
                        outside = mid;
                    }
                }
                let point = origin + direction * inside;
                let surface = self.surface_at(point.x, point.z);
                return Some(RayHit {
                    point: DVec3::new(point.x, surface.height, point.z),
                    normal: surface.normal,
                    distance: inside,
                });
            }

            if travelled >= max_distance {
                return None;
            }
            previous = travelled;
            travelled = (travelled + step).min(max_distance);
        }
    }
}

impl RayCaster for Terrain {
    fn cast(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<RayHit> {
        let direction = try_normalize(direction)?;
        if !origin.is_finite() || !(max_distance > 0.0) || self.is_below_surface(origin) {
            return None;
        }

        // straight down is what grounding asks for; answer it exactly
        if direction.x == 0.0 && direction.z == 0.0 {
            if direction.y > 0.0 {
                return None;
            }
            let surface = self.surface_at(origin.x, origin.z);
            let distance = origin.y - surface.height;
            return if distance <= max_distance {
                Some(RayHit {
                    point: DVec3::new(origin.x, surface.height, origin.z),
                    normal: surface.normal,
                    distance,
                })
            } else {
                None
            };
        }

        self.march(origin, direction, max_distance)
    }
}
