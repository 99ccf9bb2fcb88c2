//! Assembling Hobby's turning-angle equations.
//!
//! The unknowns are offset angles between each segment's tangent and its
//! chord. Mock-curvature continuity at every interior point gives one
//! linear equation linking the offsets of the two segments that meet there;
//! runs of an open path yield a tridiagonal system, a free loop a cyclic
//! one.
//!
//! References:
//! - John D. Hobby, "Smooth, Easy to Compute Interpolating Splines",
//!   *Discrete and Computational Geometry* 1 (1986), pp. 123-140.
//! - D.E. Knuth, *METAFONT: The Program*, §§273-287.

use crate::error::{CurveError, End, Result};
use crate::geom;
use crate::types::{DirectionSpec, Endpoints, Scalar, Segment};

/// Per-segment equation coefficients.
///
/// With `α = 1/entry tension`, `β = 1/exit tension` and chord length `L`:
/// `a = α/(β²L)`, `b = (3−α)/(β²L)`, `c = (3−β)/(α²L)`, `d = β/(α²L)`.
/// `a` and `b` appear in the equation at the segment's end point, `c` and
/// `d` in the equation at its start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a: Scalar,
    pub b: Scalar,
    pub c: Scalar,
    pub d: Scalar,
}

impl Coefficients {
    pub fn of(seg: &Segment) -> Self {
        let (alpha, beta) = reciprocal_tensions(seg);
        let len = seg.chord().hypot();
        let bl = beta * beta * len;
        let al = alpha * alpha * len;
        Self {
            a: alpha / bl,
            b: (3.0 - alpha) / bl,
            c: (3.0 - beta) / al,
            d: beta / al,
        }
    }
}

/// Coefficients of the boundary equation `a·θ + c·θ_end = r` at a run end.
///
/// `θ` is the entry offset of the segment and `θ_end` the offset at its far
/// end measured like an entry offset (the negated exit offset).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointCoefficients {
    pub a: Scalar,
    pub c: Scalar,
    pub r: Scalar,
}

/// Boundary coefficients for one end of `seg`.
///
/// `End::Exit` applies the endpoint formula to the segment as given;
/// `End::Entry` applies it to the reversed segment, which turns the known
/// entry into a far-end condition. `index` is only used for error reporting.
pub fn endpoint_coefficients(seg: &Segment, index: usize, end: End) -> Result<EndpointCoefficients> {
    let seg = match end {
        End::Exit => *seg,
        End::Entry => seg.reversed(),
    };
    match seg.exit {
        DirectionSpec::Curl(gamma) => {
            let (alpha, beta) = reciprocal_tensions(&seg);
            let ratio = gamma / (alpha * alpha);
            Ok(EndpointCoefficients {
                a: ((3.0 - beta) * beta * beta).mul_add(ratio, alpha),
                c: (beta * beta * beta).mul_add(ratio, 3.0 - alpha),
                r: 0.0,
            })
        }
        DirectionSpec::Given(dir) => Ok(EndpointCoefficients {
            a: 0.0,
            c: 1.0,
            r: geom::signed_angle(seg.chord(), dir),
        }),
        DirectionSpec::Open => Err(CurveError::MissingBoundary {
            segment: index,
            end,
        }),
    }
}

/// Turning angles at the points of an open run of segments.
///
/// Entry `k` is the angle from chord `k - 1` to chord `k`; the two run ends
/// (entries `0` and `n`) are zero.
pub fn line_turning_angles(run: &[Segment]) -> Vec<Scalar> {
    let n = run.len();
    let mut psi = vec![0.0; n + 1];
    for k in 1..n {
        psi[k] = geom::signed_angle(run[k - 1].chord(), run[k].chord());
    }
    psi
}

/// Turning angles at every point of a loop; entry `k` is the angle from
/// the chord arriving at point `k` to the chord leaving it.
pub fn loop_turning_angles(segments: &[Segment]) -> Vec<Scalar> {
    let n = segments.len();
    (0..n)
        .map(|k| geom::signed_angle(segments[(k + n - 1) % n].chord(), segments[k].chord()))
        .collect()
}

/// A tridiagonal system in the layout expected by the solvers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TridiagonalSystem {
    pub lower: Vec<Scalar>,
    pub diag: Vec<Scalar>,
    pub upper: Vec<Scalar>,
    pub rhs: Vec<Scalar>,
}

impl TridiagonalSystem {
    fn with_size(n: usize) -> Self {
        Self {
            lower: Vec::with_capacity(n.saturating_sub(1)),
            diag: Vec::with_capacity(n),
            upper: Vec::with_capacity(n.saturating_sub(1)),
            rhs: Vec::with_capacity(n),
        }
    }
}

/// A cyclic tridiagonal system: the band plus its two wrap-around corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CyclicSystem {
    pub band: TridiagonalSystem,
    pub corner_low_left: Scalar,
    pub corner_up_right: Scalar,
}

/// Equations for a run of `N ≥ 1` segments with known end conditions.
///
/// The `N + 1` unknowns are the entry offsets `θ₀..θ_{N−1}` followed by the
/// far-end offset `θ_N` (the negated exit offset of the last segment).
/// `psi` comes from [`line_turning_angles`]; `first_index` is the position
/// of the run in its path, for error reporting.
pub fn line_system(run: &[Segment], psi: &[Scalar], first_index: usize) -> Result<TridiagonalSystem> {
    let (Some(first), Some(last)) = (run.first(), run.last()) else {
        return Err(CurveError::EmptyRun);
    };
    let n = run.len();
    if psi.len() != n + 1 {
        return Err(CurveError::DimensionMismatch);
    }
    let coeffs: Vec<Coefficients> = run.iter().map(Coefficients::of).collect();
    let mut sys = TridiagonalSystem::with_size(n + 1);

    let start = endpoint_coefficients(first, first_index, End::Entry)?;
    sys.diag.push(start.c);
    sys.upper.push(start.a);
    sys.rhs.push(start.a.mul_add(-psi[1], start.r));

    for k in 1..n {
        let (prev, next) = (coeffs[k - 1], coeffs[k]);
        sys.lower.push(prev.a);
        sys.diag.push(prev.b + next.c);
        sys.upper.push(next.d);
        sys.rhs.push(-prev.b.mul_add(psi[k], next.d * psi[k + 1]));
    }

    let end = endpoint_coefficients(last, first_index + n - 1, End::Exit)?;
    sys.lower.push(end.a);
    sys.diag.push(end.c);
    sys.rhs.push(end.r);

    Ok(sys)
}

/// Equations for a loop with no direction constraints at all.
///
/// One unknown per segment, its entry offset; row `k` is the equation at
/// point `k`. `psi` comes from [`loop_turning_angles`].
pub fn loop_system(segments: &[Segment], psi: &[Scalar]) -> Result<CyclicSystem> {
    let n = segments.len();
    if n == 0 {
        return Err(CurveError::EmptyRun);
    }
    if psi.len() != n {
        return Err(CurveError::DimensionMismatch);
    }
    let coeffs: Vec<Coefficients> = segments.iter().map(Coefficients::of).collect();
    let mut band = TridiagonalSystem::with_size(n);

    for k in 0..n {
        let prev = coeffs[(k + n - 1) % n];
        let next = coeffs[k];
        if k > 0 {
            band.lower.push(prev.a);
        }
        band.diag.push(prev.b + next.c);
        if k + 1 < n {
            band.upper.push(next.d);
        }
        band.rhs.push(-prev.b.mul_add(psi[k], next.d * psi[(k + 1) % n]));
    }

    Ok(CyclicSystem {
        band,
        corner_low_left: coeffs[n - 1].d,
        corner_up_right: coeffs[n - 1].a,
    })
}

fn reciprocal_tensions(seg: &Segment) -> (Scalar, Scalar) {
    let (entry, exit) = seg.join.tensions();
    (1.0 / entry.value().abs(), 1.0 / exit.value().abs())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Join, Point, Tension, Vec2, EPSILON};
    use core::f64::consts::FRAC_PI_2;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn unit_tension_coefficients() {
        let c = Coefficients::of(&seg(0.0, 0.0, 2.0, 0.0));
        assert!((c.a - 0.5).abs() < EPSILON);
        assert!((c.b - 1.0).abs() < EPSILON);
        assert!((c.c - 1.0).abs() < EPSILON);
        assert!((c.d - 0.5).abs() < EPSILON);
    }

    #[test]
    fn tension_two_coefficients() {
        let mut s = seg(0.0, 0.0, 1.0, 0.0);
        s.join = Join::Tension {
            entry: Tension::Exact(2.0),
            exit: Tension::AtLeast(1.0),
        };
        // alpha = 1/2, beta = 1
        let c = Coefficients::of(&s);
        assert!((c.a - 0.5).abs() < EPSILON);
        assert!((c.b - 2.5).abs() < EPSILON);
        assert!((c.c - 8.0).abs() < EPSILON);
        assert!((c.d - 4.0).abs() < EPSILON);
    }

    #[test]
    fn unit_curl_endpoint() {
        let mut s = seg(0.0, 0.0, 1.0, 0.0);
        s.exit = DirectionSpec::Curl(1.0);
        let e = endpoint_coefficients(&s, 0, End::Exit).unwrap();
        assert!((e.a - 3.0).abs() < EPSILON);
        assert!((e.c - 3.0).abs() < EPSILON);
        assert!(e.r.abs() < EPSILON);
    }

    #[test]
    fn given_endpoint_reads_angle_off_chord() {
        let mut s = seg(0.0, 0.0, 1.0, 0.0);
        s.entry = DirectionSpec::Given(Vec2::new(0.0, 1.0));
        s.exit = DirectionSpec::Given(Vec2::new(0.0, -1.0));
        let start = endpoint_coefficients(&s, 0, End::Entry).unwrap();
        assert!(start.a.abs() < EPSILON && (start.c - 1.0).abs() < EPSILON);
        assert!((start.r - FRAC_PI_2).abs() < EPSILON);
        let end = endpoint_coefficients(&s, 0, End::Exit).unwrap();
        assert!((end.r + FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn open_endpoint_is_a_precondition_violation() {
        let s = seg(0.0, 0.0, 1.0, 0.0);
        assert_eq!(
            endpoint_coefficients(&s, 7, End::Entry),
            Err(CurveError::MissingBoundary {
                segment: 7,
                end: End::Entry
            })
        );
    }

    #[test]
    fn turning_angles_of_square() {
        let segs = [
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 1.0, 0.0, 0.0),
        ];
        for psi in loop_turning_angles(&segs) {
            assert!((psi - FRAC_PI_2).abs() < EPSILON);
        }
        let line = line_turning_angles(&segs);
        assert_eq!(line.len(), 5);
        assert!(line[0].abs() < EPSILON && line[4].abs() < EPSILON);
        assert!((line[2] - FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn line_system_shape() {
        let mut segs = vec![seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 2.0, 1.0), seg(2.0, 1.0, 3.0, 1.0)];
        segs[0].entry = DirectionSpec::Curl(1.0);
        segs[2].exit = DirectionSpec::Given(Vec2::new(1.0, 0.0));
        let psi = line_turning_angles(&segs);
        let sys = line_system(&segs, &psi, 0).unwrap();
        assert_eq!(sys.diag.len(), 4);
        assert_eq!(sys.lower.len(), 3);
        assert_eq!(sys.upper.len(), 3);
        assert_eq!(sys.rhs.len(), 4);
        // Last row pins the exit direction: 0·θ₂ + 1·θ₃ = 0.
        assert!(sys.lower[2].abs() < EPSILON);
        assert!((sys.diag[3] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn empty_line_is_rejected() {
        assert_eq!(line_system(&[], &[0.0], 0), Err(CurveError::EmptyRun));
        assert_eq!(loop_system(&[], &[]), Err(CurveError::EmptyRun));
    }

    #[test]
    fn loop_corners_come_from_last_segment() {
        let mut segs = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 0.0, 1.0),
            seg(0.0, 1.0, 0.0, 0.0),
        ];
        segs[2].join = Join::Tension {
            entry: Tension::Exact(2.0),
            exit: Tension::Exact(1.0),
        };
        let psi = loop_turning_angles(&segs);
        let sys = loop_system(&segs, &psi).unwrap();
        let last = Coefficients::of(&segs[2]);
        assert!((sys.corner_up_right - last.a).abs() < EPSILON);
        assert!((sys.corner_low_left - last.d).abs() < EPSILON);
        assert_eq!(sys.band.lower.len(), 2);
        assert_eq!(sys.band.upper.len(), 2);
    }
}
