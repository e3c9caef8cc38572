//! Where the grounding rays start.
//!
//! Each ray starts at the center of the collision bounds plus an offset from a
//! [`SampleOriginGenerator`]. Vehicles in play use [`RandomSphere`], which
//! scatters the rays over a fresh random cloud every tick so any mesh shape
//! gets sensed without per-model wheel placement. The flip side is that a
//! vehicle parked on a ledge can flicker between grounded and airborne.
//! Tests use [`FixedPattern`] or a seeded [`RandomSphere`] instead.

use glam::DVec3;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait SampleOriginGenerator {
    // called once per grounding pass, before any offsets are drawn
    fn begin_pass(&mut self) {}

    // an offset from the bounds center no longer than `radius`
    fn next_offset(&mut self, radius: f64) -> DVec3;
}

// Uniform points inside a sphere
pub struct RandomSphere<R: Rng> {
    rng: R,
}

impl RandomSphere<ThreadRng> {
    pub fn new() -> Self {
        RandomSphere {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomSphere<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSphere<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomSphere {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> SampleOriginGenerator for RandomSphere<R> {
    fn next_offset(&mut self, radius: f64) -> DVec3 {
        // rejection sampling from the enclosing cube
        loop {
            let candidate = DVec3::new(
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
            );
            if candidate.length_squared() <= 1.0 {
                return candidate * radius;
            }
        }
    }
}

// The same offsets, in the same order, every pass. Offsets are given in
// unit-sphere space and scaled by the requested radius.
pub struct FixedPattern {
    offsets: Vec<DVec3>,
    cursor: usize,
}

impl FixedPattern {
    pub fn new(offsets: Vec<DVec3>) -> Self {
        FixedPattern { offsets, cursor: 0 }
    }

    // every ray from the bounds center
    pub fn centered() -> Self {
        FixedPattern::new(vec![DVec3::ZERO])
    }

    // center plus the four horizontal compass points
    pub fn cross() -> Self {
        FixedPattern::new(vec![
            DVec3::ZERO,
            DVec3::X,
            -DVec3::X,
            DVec3::Z,
            -DVec3::Z,
        ])
    }
}

impl SampleOriginGenerator for FixedPattern {
    fn begin_pass(&mut self) {
        self.cursor = 0;
    }

    fn next_offset(&mut self, radius: f64) -> DVec3 {
        if self.offsets.is_empty() {
            return DVec3::ZERO;
        }
        let offset = self.offsets[self.cursor % self.offsets.len()];
        self.cursor += 1;
        let length = offset.length();
        if length > 1.0 {
            offset / length * radius
        } else {
            offset * radius
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_offsets_stay_inside_sphere() {
        let mut sampler = RandomSphere::seeded(7);
        for _ in 0..500 {
            assert!(sampler.next_offset(0.5).length() <= 0.5 + 1e-12);
        }
    }

    #[test]
    fn test_seeded_samplers_agree() {
        let mut a = RandomSphere::seeded(42);
        let mut b = RandomSphere::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.next_offset(1.0), b.next_offset(1.0));
        }
    }

    #[test]
    fn test_fixed_pattern_restarts_each_pass() {
        let mut pattern = FixedPattern::cross();
        pattern.begin_pass();
        let first: Vec<DVec3> = (0..3).map(|_| pattern.next_offset(2.0)).collect();
        pattern.begin_pass();
        let second: Vec<DVec3> = (0..3).map(|_| pattern.next_offset(2.0)).collect();
        assert_eq!(first, second);
        assert_eq!(first[1], DVec3::new(2.0, 0.0, 0.0));
    }
}
