//! Turning sparse direction constraints into tangent vectors.
//!
//! Every segment gets two offset angles: `theta`, from its chord to its
//! entry tangent, and `phi`, from its exit tangent to its chord. Open paths
//! are split into runs and each run is solved on its own; a loop with no
//! constraints at all is solved as one cyclic system; a loop with some
//! constraints is rotated so that a constrained point comes first and then
//! solved like an open path.

use tracing::{debug, trace};

use crate::equations::{self, endpoint_coefficients};
use crate::error::{CurveError, End, Result};
use crate::geom;
use crate::partition::line_runs;
use crate::tridiagonal::{solve_cyclic_tridiagonal, solve_tridiagonal};
use crate::types::{DirectionSpec, Endpoints, Path, ResolvedSegment, Scalar, Segment, Vec2};

/// Solved offset angles of one segment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offsets {
    /// Signed angle from the chord to the entry tangent.
    pub theta: Scalar,
    /// Signed angle from the exit tangent to the chord.
    pub phi: Scalar,
}

/// Resolve every segment's entry and exit tangent.
///
/// Expects a path that went through
/// [`fill_defaults`](crate::defaults::fill_defaults); a run boundary that is
/// still `Open` is reported as [`CurveError::MissingBoundary`].
pub fn resolve_directions(path: Path) -> Result<Path<ResolvedSegment>> {
    let closed = path.is_closed();
    let segments = path.into_segments();
    if segments.is_empty() {
        return Ok(Path::from_parts(Vec::new(), closed));
    }

    let offsets = if !closed {
        solve_lines(&segments)?
    } else if segments.iter().all(|s| s.entry.is_open() && s.exit.is_open()) {
        solve_free_loop(&segments)?
    } else {
        solve_anchored_loop(&segments)?
    };

    let resolved = segments
        .iter()
        .zip(offsets)
        .map(|(seg, off)| apply_offsets(seg, off))
        .collect();
    Ok(Path::from_parts(resolved, closed))
}

/// Turn solved offsets into tangent vectors.
///
/// A `Given` end keeps its vector; otherwise the unit chord is rotated by
/// `theta` (entry) or `-phi` (exit). A zero chord yields the zero vector.
pub fn apply_offsets(seg: &Segment, off: Offsets) -> ResolvedSegment {
    let dir = geom::unit(seg.chord());
    let rotated = |angle: Scalar| dir.map_or(Vec2::ZERO, |u| geom::rotate(u, angle));
    let entry = match seg.entry {
        DirectionSpec::Given(d) => d,
        _ => rotated(off.theta),
    };
    let exit = match seg.exit {
        DirectionSpec::Given(d) => d,
        _ => rotated(-off.phi),
    };
    ResolvedSegment {
        start: seg.start,
        entry,
        join: seg.join,
        exit,
        end: seg.end,
    }
}

/// Solve every run of an open segment sequence.
fn solve_lines(segments: &[Segment]) -> Result<Vec<Offsets>> {
    let mut offsets = Vec::with_capacity(segments.len());
    for run in line_runs(segments)? {
        debug!(start = run.start, len = run.len(), "solving line run");
        offsets.extend(solve_line(&segments[run.clone()], run.start)?);
    }
    Ok(offsets)
}

/// Solve a single run whose first entry and last exit are specified.
///
/// `first_index` is the run's position in its path, for error reporting.
pub fn solve_line(run: &[Segment], first_index: usize) -> Result<Vec<Offsets>> {
    match run {
        [] => Err(CurveError::EmptyRun),
        [seg] => solve_single(seg, first_index).map(|off| vec![off]),
        _ => {
            let n = run.len();
            let psi = equations::line_turning_angles(run);
            let sys = equations::line_system(run, &psi, first_index)?;
            let theta = solve_tridiagonal(&sys.lower, &sys.diag, &sys.upper, &sys.rhs)?;
            trace!(?theta, "line angles");
            Ok((0..n)
                .map(|i| Offsets {
                    theta: theta[i],
                    phi: -(psi[i + 1] + theta[i + 1]),
                })
                .collect())
        }
    }
}

/// Closed-form solution for a run of one segment.
pub fn solve_single(seg: &Segment, index: usize) -> Result<Offsets> {
    let chord = seg.chord();
    match (seg.entry, seg.exit) {
        (DirectionSpec::Given(d0), DirectionSpec::Given(d1)) => Ok(Offsets {
            theta: geom::signed_angle(chord, d0),
            phi: geom::signed_angle(d1, chord),
        }),
        (DirectionSpec::Given(d0), DirectionSpec::Curl(_)) => {
            let theta = geom::signed_angle(chord, d0);
            let end = endpoint_coefficients(seg, index, End::Exit)?;
            let theta_end = end.a.mul_add(-theta, end.r) / end.c;
            Ok(Offsets {
                theta,
                phi: -theta_end,
            })
        }
        (DirectionSpec::Curl(_), DirectionSpec::Given(_)) => {
            let rev = solve_single(&seg.reversed(), index)?;
            Ok(Offsets {
                theta: -rev.phi,
                phi: -rev.theta,
            })
        }
        (DirectionSpec::Curl(_), DirectionSpec::Curl(_)) => Ok(Offsets::default()),
        (DirectionSpec::Open, _) => Err(CurveError::MissingBoundary {
            segment: index,
            end: End::Entry,
        }),
        (_, DirectionSpec::Open) => Err(CurveError::MissingBoundary {
            segment: index,
            end: End::Exit,
        }),
    }
}

/// A loop without any direction or curl: one cyclic system over all points.
fn solve_free_loop(segments: &[Segment]) -> Result<Vec<Offsets>> {
    let n = segments.len();
    debug!(len = n, "solving free loop");
    let psi = equations::loop_turning_angles(segments);
    let sys = equations::loop_system(segments, &psi)?;
    let band = &sys.band;
    let theta = solve_cyclic_tridiagonal(
        &band.lower,
        &band.diag,
        &band.upper,
        &band.rhs,
        sys.corner_low_left,
        sys.corner_up_right,
    )?;
    trace!(?theta, "loop angles");
    Ok((0..n)
        .map(|k| {
            let next = (k + 1) % n;
            Offsets {
                theta: theta[k],
                phi: -(psi[next] + theta[next]),
            }
        })
        .collect())
}

/// A loop with at least one constrained point, solved as an open sequence
/// starting at a constrained point.
fn solve_anchored_loop(segments: &[Segment]) -> Result<Vec<Offsets>> {
    let n = segments.len();
    let shift = anchor(segments)?;
    debug!(len = n, shift, "solving anchored loop");

    let mut rotated = segments.to_vec();
    rotated.rotate_left(shift);
    let mut offsets = solve_lines(&rotated).map_err(|err| unrotate_error(err, shift, n))?;
    offsets.rotate_right(shift);
    Ok(offsets)
}

/// How far to rotate a loop so that its head has a specified entry.
fn anchor(segments: &[Segment]) -> Result<usize> {
    if segments[0].entry.is_specified() {
        return Ok(0);
    }
    if segments.get(1).is_some_and(|s| s.entry.is_specified()) {
        return Ok(1);
    }
    segments
        .iter()
        .position(|s| s.entry.is_specified())
        .ok_or(CurveError::MissingBoundary {
            segment: 0,
            end: End::Entry,
        })
}

/// Map segment indices reported against a rotated loop back to the original.
fn unrotate_error(err: CurveError, shift: usize, n: usize) -> CurveError {
    match err {
        CurveError::MissingBoundary { segment, end } => CurveError::MissingBoundary {
            segment: (segment + shift) % n,
            end,
        },
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
