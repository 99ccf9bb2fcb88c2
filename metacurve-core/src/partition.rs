//! Splitting a segment sequence into independently solvable runs.

use std::ops::Range;

use crate::error::{CurveError, End, Result};
use crate::types::Segment;

/// Partition `segments` into maximal runs whose first entry and last exit
/// are specified and whose interior ends are all open.
///
/// A run ends after segment `i` as soon as either side of the point between
/// `i` and `i + 1` carries a direction or curl. Runs are returned in order
/// and cover the whole slice.
pub fn line_runs(segments: &[Segment]) -> Result<Vec<Range<usize>>> {
    let mut runs = Vec::new();
    let mut start = 0;

    for (i, seg) in segments.iter().enumerate() {
        let breaks = segments
            .get(i + 1)
            .is_none_or(|next| seg.exit.is_specified() || next.entry.is_specified());
        if breaks {
            runs.push(start..i + 1);
            start = i + 1;
        }
    }

    for run in &runs {
        if segments[run.start].entry.is_open() {
            return Err(CurveError::MissingBoundary {
                segment: run.start,
                end: End::Entry,
            });
        }
        if segments[run.end - 1].exit.is_open() {
            return Err(CurveError::MissingBoundary {
                segment: run.end - 1,
                end: End::Exit,
            });
        }
    }

    Ok(runs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DirectionSpec, Point, Vec2};

    fn chain(n: usize) -> Vec<Segment> {
        (0..n)
            .map(|i| {
                #[expect(clippy::cast_precision_loss, reason = "small test indices")]
                let x = i as f64;
                Segment::new(Point::new(x, 0.0), Point::new(x + 1.0, 0.0))
            })
            .collect()
    }

    #[test]
    fn empty_input_has_no_runs() {
        assert!(line_runs(&[]).unwrap().is_empty());
    }

    #[test]
    fn single_run_between_curls() {
        let mut segs = chain(4);
        segs[0].entry = DirectionSpec::Curl(1.0);
        segs[3].exit = DirectionSpec::Curl(1.0);
        assert_eq!(line_runs(&segs).unwrap(), vec![0..4]);
    }

    #[test]
    fn splits_at_every_specified_point() {
        let mut segs = chain(5);
        let up = DirectionSpec::Given(Vec2::new(0.0, 1.0));
        segs[0].entry = DirectionSpec::Curl(1.0);
        segs[1].exit = up;
        segs[2].entry = up;
        segs[3].exit = DirectionSpec::Curl(2.0);
        segs[4].entry = DirectionSpec::Curl(2.0);
        segs[4].exit = DirectionSpec::Curl(1.0);
        assert_eq!(line_runs(&segs).unwrap(), vec![0..2, 2..4, 4..5]);
    }

    #[test]
    fn one_sided_break_reports_missing_boundary() {
        let mut segs = chain(3);
        segs[0].entry = DirectionSpec::Curl(1.0);
        segs[0].exit = DirectionSpec::Curl(1.0);
        segs[2].exit = DirectionSpec::Curl(1.0);
        assert_eq!(
            line_runs(&segs),
            Err(CurveError::MissingBoundary {
                segment: 1,
                end: End::Entry
            })
        );
    }

    #[test]
    fn open_path_end_reports_missing_exit() {
        let mut segs = chain(2);
        segs[0].entry = DirectionSpec::Curl(1.0);
        assert_eq!(
            line_runs(&segs),
            Err(CurveError::MissingBoundary {
                segment: 1,
                end: End::Exit
            })
        );
    }
}
