//! Control points from resolved tangents.
//!
//! Once both tangents of a segment are known, Hobby's velocity function
//! fixes how far each control point sits from its endpoint, relative to the
//! chord length. `AtLeast` tensions additionally keep the control polygon
//! inside the triangle formed by the chord and the two tangent lines.

use crate::bezier::CubicSegment;
use crate::geom;
use crate::types::{Endpoints, Join, ResolvedSegment, Scalar, Tension, NEAR_ZERO};

/// Compute the Bezier control points of a resolved segment.
///
/// Explicit control points are kept as given; a zero-length chord puts
/// both control points on the endpoints.
pub fn compute_controls(seg: ResolvedSegment) -> CubicSegment {
    let (entry_tension, exit_tension) = match seg.join {
        Join::Controls(u, v) => return CubicSegment::new(seg.start, u, v, seg.end),
        Join::Tension { entry, exit } => (entry, exit),
    };

    let chord = seg.chord();
    if geom::is_zero(chord) {
        return CubicSegment::new(seg.start, seg.start, seg.end, seg.end);
    }

    let theta = geom::signed_angle(chord, seg.entry);
    let phi = geom::signed_angle(seg.exit, chord);
    let (va, vb) = velocities(theta, phi, entry_tension, exit_tension);

    let u = seg.start + geom::rotate(chord, theta) * va;
    let v = seg.end - geom::rotate(chord, -phi) * vb;
    CubicSegment::new(seg.start, u, v, seg.end)
}

/// Hobby's velocity function `f(θ, φ)`: the distance from the start point
/// to its control point, as a fraction of the chord length, at unit tension.
///
/// ```text
/// f(θ, φ) = (2 + √2·(sin θ − sin φ/16)·(sin φ − sin θ/16)·(cos θ − cos φ))
///         / (3·(1 + ((√5 − 1)/2)·cos θ + ((3 − √5)/2)·cos φ))
/// ```
pub fn hobby_f(theta: Scalar, phi: Scalar) -> Scalar {
    let (st, ct) = theta.sin_cos();
    let (sf, cf) = phi.sin_cos();
    velocity(st, ct, sf, cf)
}

/// Relative control-point distances `(va, vb)` for offsets `theta`, `phi`.
///
/// Each side is `f / tension`; an `AtLeast` side is further capped by the
/// bounding triangle when one exists.
pub fn velocities(theta: Scalar, phi: Scalar, entry: Tension, exit: Tension) -> (Scalar, Scalar) {
    let (st, ct) = theta.sin_cos();
    let (sf, cf) = phi.sin_cos();
    let mut va = velocity(st, ct, sf, cf) / entry.value().abs();
    let mut vb = velocity(sf, cf, st, ct) / exit.value().abs();

    if let Some(sine) = bounding_triangle(st, sf, (theta + phi).sin()) {
        if entry.is_at_least() {
            va = va.min(sf.abs() / sine);
        }
        if exit.is_at_least() {
            vb = vb.min(st.abs() / sine);
        }
    }
    (va, vb)
}

/// `|sin(θ + φ)|` when the tangent lines and the chord form a triangle.
///
/// That requires both tangents to turn away from the chord on the same
/// side, with `sin θ`, `sin φ` and `sin(θ + φ)` all non-zero and of one sign.
pub fn bounding_triangle(sin_theta: Scalar, sin_phi: Scalar, sin_sum: Scalar) -> Option<Scalar> {
    let nonzero = [sin_theta, sin_phi, sin_sum].iter().all(|s| s.abs() > NEAR_ZERO);
    let same_sign = sin_theta.signum() == sin_phi.signum() && sin_phi.signum() == sin_sum.signum();
    (nonzero && same_sign).then_some(sin_sum.abs())
}

fn velocity(st: Scalar, ct: Scalar, sf: Scalar, cf: Scalar) -> Scalar {
    let sqrt2 = core::f64::consts::SQRT_2;
    let sqrt5 = 5.0_f64.sqrt();

    let num = (sqrt2 * (st - sf / 16.0) * (sf - st / 16.0)).mul_add(ct - cf, 2.0);
    let denom = 3.0 * (0.5 * (3.0 - sqrt5)).mul_add(cf, (0.5 * (sqrt5 - 1.0)).mul_add(ct, 1.0));

    // Only reachable with both angles at a half turn.
    if denom.abs() < NEAR_ZERO {
        return 0.0;
    }
    num / denom
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
