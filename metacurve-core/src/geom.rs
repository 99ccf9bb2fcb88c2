//! Angle and vector helpers on top of `kurbo`.
//!
//! All angles are in radians. Signed angles are counter-clockwise positive
//! and normalised into (−π, π].

use core::f64::consts::{PI, TAU};

use crate::types::{Scalar, Vec2, NEAR_ZERO};

/// Normalise an angle into (−π, π].
pub fn normalize_angle(a: Scalar) -> Scalar {
    let r = a.rem_euclid(TAU);
    if r > PI {
        r - TAU
    } else {
        r
    }
}

/// Signed angle that rotates `from` onto `to`, in (−π, π].
///
/// Returns 0 if either vector is zero.
pub fn signed_angle(from: Vec2, to: Vec2) -> Scalar {
    if is_zero(from) || is_zero(to) {
        return 0.0;
    }
    normalize_angle(from.cross(to).atan2(from.dot(to)))
}

/// Rotate `v` counter-clockwise by `angle`.
#[inline]
pub fn rotate(v: Vec2, angle: Scalar) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x.mul_add(c, -(v.y * s)), v.x.mul_add(s, v.y * c))
}

/// Unit vector in the direction of `v`, or `None` for a (near-)zero vector.
pub fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    if len < NEAR_ZERO {
        None
    } else {
        Some(v / len)
    }
}

#[inline]
pub fn is_zero(v: Vec2) -> bool {
    v.hypot() < NEAR_ZERO
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EPSILON;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn normalize_wraps_into_half_open_range() {
        assert!((normalize_angle(PI + 0.5) - (0.5 - PI)).abs() < EPSILON);
        assert!((normalize_angle(-PI) - PI).abs() < EPSILON);
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < EPSILON);
        assert!((normalize_angle(-0.5) + 0.5).abs() < EPSILON);
    }

    #[test]
    fn signed_angle_is_counter_clockwise_positive() {
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 2.0);
        assert!((signed_angle(x, y) - FRAC_PI_2).abs() < EPSILON);
        assert!((signed_angle(y, x) + FRAC_PI_2).abs() < EPSILON);
        assert!((signed_angle(x, -x) - PI).abs() < EPSILON);
        assert!(signed_angle(Vec2::ZERO, y).abs() < EPSILON);
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(Vec2::new(2.0, 0.0), FRAC_PI_2);
        assert!(v.x.abs() < EPSILON);
        assert!((v.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn unit_rejects_zero() {
        assert!(unit(Vec2::ZERO).is_none());
        let u = unit(Vec2::new(0.0, -5.0)).unwrap();
        assert!((u.y + 1.0).abs() < EPSILON);
    }
}
