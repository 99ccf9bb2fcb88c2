//! Filling in unspecified directions before solving.
//!
//! Boundary rules run first (curl 1 at open-path ends, copying across the
//! seam of a loop), then directions implied by explicit control points and
//! degenerate chords, and finally copying across shared points so every
//! point that is constrained on one side is constrained on both.

use crate::geom;
use crate::types::{DirectionSpec, Endpoints, Join, Path, Point, Segment};

/// Replace as many `Open` directions as the defaulting rules allow.
pub fn fill_defaults(path: Path) -> Path {
    let closed = path.is_closed();
    let mut segments = path.into_segments();
    if segments.is_empty() {
        return Path::from_parts(segments, closed);
    }

    if closed {
        copy_across_seam(&mut segments);
    } else {
        curl_open_ends(&mut segments);
    }

    for seg in &mut segments {
        infer_from_join(seg);
    }

    copy_left(&mut segments, closed);
    copy_right(&mut segments, closed);

    Path::from_parts(segments, closed)
}

/// An open path's first entry and last exit default to curl 1.
fn curl_open_ends(segments: &mut [Segment]) {
    if let Some(first) = segments.first_mut() {
        if first.entry.is_open() {
            first.entry = DirectionSpec::Curl(1.0);
        }
    }
    if let Some(last) = segments.last_mut() {
        if last.exit.is_open() {
            last.exit = DirectionSpec::Curl(1.0);
        }
    }
}

/// On a loop, the first entry and last exit meet at the same point.
fn copy_across_seam(segments: &mut [Segment]) {
    let n = segments.len();
    let (entry, exit) = (segments[0].entry, segments[n - 1].exit);
    match (entry.is_specified(), exit.is_specified()) {
        (true, false) => segments[n - 1].exit = entry,
        (false, true) => segments[0].entry = exit,
        _ => {}
    }
}

/// Directions implied by the join itself.
///
/// Explicit control points fix the tangent at each end; where a control
/// point sits on its endpoint the end falls back to curl 1. A tension join
/// over a zero-length chord has no chord direction to offset from, so its
/// open ends become curl 1 too.
fn infer_from_join(seg: &mut Segment) {
    match seg.join {
        Join::Controls(u, v) => {
            if seg.entry.is_open() {
                seg.entry = direction_between(seg.start, u);
            }
            if seg.exit.is_open() {
                seg.exit = direction_between(v, seg.end);
            }
        }
        Join::Tension { .. } if geom::is_zero(seg.chord()) => {
            if seg.entry.is_open() {
                seg.entry = DirectionSpec::Curl(1.0);
            }
            if seg.exit.is_open() {
                seg.exit = DirectionSpec::Curl(1.0);
            }
        }
        Join::Tension { .. } => {}
    }
}

fn direction_between(from: Point, to: Point) -> DirectionSpec {
    geom::unit(to - from).map_or(DirectionSpec::Curl(1.0), DirectionSpec::Given)
}

/// Indices `(i, j)` of segments meeting at a shared point, `i` arriving and
/// `j` leaving. Closed paths include the seam.
fn adjacent_pairs(n: usize, closed: bool) -> impl Iterator<Item = (usize, usize)> {
    let count = if closed { n } else { n.saturating_sub(1) };
    (0..count).map(move |i| (i, (i + 1) % n))
}

/// Fill an open exit from the following segment's entry.
fn copy_left(segments: &mut [Segment], closed: bool) {
    for (i, j) in adjacent_pairs(segments.len(), closed) {
        if segments[i].exit.is_open() && segments[j].entry.is_specified() {
            segments[i].exit = segments[j].entry;
        }
    }
}

/// Fill an open entry from the preceding segment's exit.
fn copy_right(segments: &mut [Segment], closed: bool) {
    for (i, j) in adjacent_pairs(segments.len(), closed) {
        if segments[j].entry.is_open() && segments[i].exit.is_specified() {
            segments[j].entry = segments[i].exit;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
