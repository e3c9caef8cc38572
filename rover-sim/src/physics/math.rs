use glam::DVec3;

// below this length a vector has no usable direction
pub const DEGENERATE_LENGTH: f64 = 1e-6;

pub fn try_normalize(v: DVec3) -> Option<DVec3> {
    let length = v.length();
    if length.is_finite() && length > DEGENERATE_LENGTH {
        Some(v / length)
    } else {
        None
    }
}

// component of `v` lying in the plane whose normal is `unit_normal`
pub fn project_on_plane(v: DVec3, unit_normal: DVec3) -> DVec3 {
    v - unit_normal * v.dot(unit_normal)
}

// component of `v` along `unit_axis`
pub fn project_onto_unit(v: DVec3, unit_axis: DVec3) -> DVec3 {
    unit_axis * v.dot(unit_axis)
}

pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * clamp01(t)
}

pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < f64::EPSILON {
        return 0.0;
    }
    clamp01((value - a) / (b - a))
}

// Critically damped spring toward `target` (Game Programming Gems 4, 1.10);
// `velocity` carries the spring state between calls
pub fn smooth_damp(
    current: DVec3,
    target: DVec3,
    velocity: &mut DVec3,
    smooth_time: f64,
    delta_time: f64,
) -> DVec3 {
    if delta_time <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * delta_time;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + change * omega) * delta_time;
    *velocity = (*velocity - temp * omega) * exp;
    let mut output = target + (change + temp) * exp;

    // don't overshoot
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = (output - target) / delta_time;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_normalize_rejects_degenerate() {
        assert!(try_normalize(DVec3::ZERO).is_none());
        assert!(try_normalize(DVec3::new(f64::NAN, 0.0, 0.0)).is_none());
        assert!(try_normalize(DVec3::new(0.0, 3.0, 4.0))
            .unwrap()
            .abs_diff_eq(DVec3::new(0.0, 0.6, 0.8), 1e-12));
    }

    #[test]
    fn test_plane_projection_removes_normal_component() {
        let v = DVec3::new(3.0, -2.0, 1.0);
        let on_plane = project_on_plane(v, DVec3::Y);
        assert!(on_plane.abs_diff_eq(DVec3::new(3.0, 0.0, 1.0), 1e-12));
        assert!((on_plane + project_onto_unit(v, DVec3::Y)).abs_diff_eq(v, 1e-12));
    }

    #[test]
    fn test_inverse_lerp_clamps() {
        assert_eq!(inverse_lerp(0.0, 40.0, 80.0), 1.0);
        assert_eq!(inverse_lerp(0.0, 40.0, -5.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 40.0, 10.0), 0.25);
        assert_eq!(inverse_lerp(1.0, 1.0, 10.0), 0.0);
    }

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let target = DVec3::new(10.0, 0.0, 0.0);
        let mut current = DVec3::ZERO;
        let mut velocity = DVec3::ZERO;
        for _ in 0..200 {
            current = smooth_damp(current, target, &mut velocity, 0.12, 1.0 / 60.0);
            assert!(current.x <= target.x + 1e-9);
        }
        assert!(current.abs_diff_eq(target, 1e-3));
    }
}
