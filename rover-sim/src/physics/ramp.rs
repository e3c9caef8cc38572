use glam::{DVec2, DVec3};

use super::math::try_normalize;

// Defines the 2D footprint of a ramp:
// [[min_x, max_x]; [min_z, max_z]]
pub type Footprint = [[f64; 2]; 2];

// An inclined plane rising from `min_height` to `max_height` across its
// footprint. The sides and back of the ramp are solid; only the top surface
// is modelled.
#[derive(Clone, Copy, Debug)]
pub struct Ramp {
    pub footprint: Footprint,
    pub min_height: f64,
    pub max_height: f64,
    // points in the direction of the incline (x, z)
    pub incline_direction: DVec2,
}

impl Ramp {
    pub fn coordinates_in_footprint(&self, x: f64, z: f64) -> bool {
        x >= self.footprint[0][0]
            && x <= self.footprint[0][1]
            && z >= self.footprint[1][0]
            && z <= self.footprint[1][1]
    }

    // the footprint corners at the bottom and top of the incline
    fn get_low_and_high_corners(&self) -> (DVec2, DVec2) {
        let [[min_x, max_x], [min_z, max_z]] = self.footprint;
        let incline_x = self.incline_direction.x;
        let incline_z = self.incline_direction.y;

        let low = DVec2::new(
            if incline_x < 0.0 { max_x } else { min_x },
            if incline_z < 0.0 { max_z } else { min_z },
        );
        let high = DVec2::new(
            if incline_x > 0.0 {
                max_x
            } else if incline_x < 0.0 {
                min_x
            } else {
                low.x
            },
            if incline_z > 0.0 {
                max_z
            } else if incline_z < 0.0 {
                min_z
            } else {
                low.y
            },
        );
        (low, high)
    }

    // None outside the footprint
    pub fn get_height_at_coordinates(&self, x: f64, z: f64) -> Option<f64> {
        if !self.coordinates_in_footprint(x, z) {
            return None;
        }

        let (low_corner, high_corner) = self.get_low_and_high_corners();
        let incline_vector = high_corner - low_corner;
        let run_squared = incline_vector.length_squared();
        if run_squared <= f64::EPSILON {
            return Some(self.max_height);
        }

        let proportion =
            ((DVec2::new(x, z) - low_corner).dot(incline_vector) / run_squared).clamp(0.0, 1.0);
        Some(self.min_height + proportion * (self.max_height - self.min_height))
    }

    pub fn get_incline_vector(&self) -> DVec3 {
        let (low_corner, high_corner) = self.get_low_and_high_corners();

        DVec3::new(high_corner.x, self.max_height, high_corner.y)
            - DVec3::new(low_corner.x, self.min_height, low_corner.y)
    }

    // upward-facing unit normal of the ramp surface
    pub fn surface_normal(&self) -> DVec3 {
        let incline = self.get_incline_vector();
        let across = DVec3::new(incline.z, 0.0, -incline.x);
        let mut normal = match try_normalize(across.cross(incline)) {
            Some(normal) => normal,
            None => return DVec3::Y,
        };
        // when close, these can oscillate back and forth, so just make sure it's pointing positive
        if normal.y < 0.0 {
            normal *= -1.0;
        }
        normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_rising_toward(direction: DVec2) -> Ramp {
        Ramp {
            footprint: [[0.0, 10.0], [0.0, 4.0]],
            min_height: 0.0,
            max_height: 5.0,
            incline_direction: direction,
        }
    }

    #[test]
    fn test_height_rises_along_incline() {
        let ramp = ramp_rising_toward(DVec2::X);
        assert_eq!(ramp.get_height_at_coordinates(0.0, 2.0), Some(0.0));
        assert_eq!(ramp.get_height_at_coordinates(5.0, 2.0), Some(2.5));
        assert_eq!(ramp.get_height_at_coordinates(10.0, 1.0), Some(5.0));
        assert_eq!(ramp.get_height_at_coordinates(11.0, 1.0), None);
    }

    #[test]
    fn test_height_for_negative_incline() {
        let ramp = ramp_rising_toward(-DVec2::X);
        assert_eq!(ramp.get_height_at_coordinates(10.0, 2.0), Some(0.0));
        assert_eq!(ramp.get_height_at_coordinates(0.0, 2.0), Some(5.0));
        assert_eq!(ramp.get_height_at_coordinates(7.5, 2.0), Some(1.25));
    }

    #[test]
    fn test_surface_normal_tilts_against_incline() {
        let ramp = ramp_rising_toward(DVec2::X);
        let normal = ramp.surface_normal();
        assert!((normal.length() - 1.0).abs() < 1e-12);
        assert!(normal.y > 0.0);
        assert!(normal.x < 0.0);
        assert!(normal.z.abs() < 1e-12);
        // perpendicular to the incline
        assert!(normal.dot(ramp.get_incline_vector()).abs() < 1e-9);
    }
}
