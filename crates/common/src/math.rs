use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Margin kept between the pitch limit and straight up/down.
pub const PITCH_EPSILON: f32 = 0.01;

/// Vectors shorter than this (squared) are treated as having no direction.
pub const MIN_LENGTH_SQUARED: f32 = 1e-6;

/// Wrap an angle into (-π, π].
///
/// Non-finite input maps to 0 so a bad frame can't poison later ones.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Clamp a pitch angle to `[-(π/2 - epsilon), π/2 - epsilon]`.
///
/// `epsilon` is raised to at least [`PITCH_EPSILON`]'s order of magnitude so the
/// result stays strictly inside (-π/2, π/2). NaN maps to level (0).
pub fn clamp_pitch(pitch: f32, epsilon: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    let epsilon = if epsilon.is_finite() { epsilon.max(1e-4) } else { PITCH_EPSILON };
    let limit = (FRAC_PI_2 - epsilon).max(0.0);
    pitch.clamp(-limit, limit)
}

/// Normalize `v`, or return the zero vector when it is too short to have a
/// meaningful direction.
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if !len_sq.is_finite() || len_sq < MIN_LENGTH_SQUARED {
        return Vec3::ZERO;
    }
    v / len_sq.sqrt()
}

/// Project a direction onto the ground plane (y = 0) and renormalize it.
pub fn flatten(v: Vec3) -> Vec3 {
    safe_normalize(Vec3::new(v.x, 0.0, v.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        for i in -200..=200 {
            let a = i as f32 * 0.37;
            let w = wrap_angle(a);
            assert!(w > -PI && w <= PI, "{a} wrapped to {w}");
        }
    }

    #[test]
    fn wrap_angle_maps_minus_pi_to_pi() {
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(PI) - PI).abs() < 1e-5);
    }

    #[test]
    fn wrap_angle_preserves_small_angles() {
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn wrap_angle_rejects_non_finite() {
        assert_eq!(wrap_angle(f32::NAN), 0.0);
        assert_eq!(wrap_angle(f32::INFINITY), 0.0);
    }

    #[test]
    fn clamp_pitch_is_strictly_inside_vertical() {
        for p in [-1e9, -10.0, -FRAC_PI_2, -1.0, 0.0, 1.0, FRAC_PI_2, 10.0, 1e9] {
            let c = clamp_pitch(p, PITCH_EPSILON);
            assert!(c > -FRAC_PI_2 && c < FRAC_PI_2, "{p} clamped to {c}");
        }
        assert_eq!(clamp_pitch(f32::INFINITY, PITCH_EPSILON), FRAC_PI_2 - PITCH_EPSILON);
        assert_eq!(clamp_pitch(f32::NAN, PITCH_EPSILON), 0.0);
    }

    #[test]
    fn clamp_pitch_leaves_valid_values_alone() {
        assert_eq!(clamp_pitch(0.3, PITCH_EPSILON), 0.3);
        assert_eq!(clamp_pitch(-0.3, PITCH_EPSILON), -0.3);
    }

    #[test]
    fn safe_normalize_guards_tiny_vectors() {
        assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(safe_normalize(Vec3::splat(1e-5)), Vec3::ZERO);
        assert_eq!(safe_normalize(Vec3::new(f32::NAN, 0.0, 0.0)), Vec3::ZERO);
        let n = safe_normalize(Vec3::new(3.0, 0.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flatten_drops_vertical_component() {
        let f = flatten(Vec3::new(1.0, 5.0, 1.0));
        assert_eq!(f.y, 0.0);
        assert!((f.length() - 1.0).abs() < 1e-6);
        assert_eq!(flatten(Vec3::Y), Vec3::ZERO);
    }
}
