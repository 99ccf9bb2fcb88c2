//! Incremental path construction in the spirit of MetaPost path expressions.
//!
//! `z0{dir}..tension a and b..{dir}z1--z2..controls u and v..z3..cycle`
//! becomes
//!
//! ```
//! # use metacurve_core::builder::PathBuilder;
//! # use metacurve_core::types::{DirectionSpec, Point, Tension};
//! # fn main() -> metacurve_core::error::Result<()> {
//! let path = PathBuilder::new(Point::new(0.0, 0.0))
//!     .leave(DirectionSpec::angle(90.0))?
//!     .tension(Tension::Exact(2.0), Tension::AtLeast(1.0))?
//!     .arrive(DirectionSpec::angle(0.0))?
//!     .curve_to(Point::new(10.0, 10.0))
//!     .line_to(Point::new(20.0, 10.0))
//!     .controls_to(Point::new(25.0, 5.0), Point::new(25.0, 0.0), Point::new(20.0, 0.0))
//!     .close()?;
//! assert_eq!(path.len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! Settings made with [`leave`](PathBuilder::leave),
//! [`arrive`](PathBuilder::arrive) and [`tension`](PathBuilder::tension)
//! apply to the next segment only.

use crate::error::Result;
use crate::types::{DirectionSpec, Join, Path, Point, Segment, Tension};

/// Builds a [`Path`] one segment at a time.
#[derive(Debug, Clone)]
#[must_use]
pub struct PathBuilder {
    start: Point,
    current: Point,
    segments: Vec<Segment>,
    leave: DirectionSpec,
    arrive: DirectionSpec,
    tension: (Tension, Tension),
}

impl PathBuilder {
    /// Start a path at `start`.
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
            segments: Vec::new(),
            leave: DirectionSpec::Open,
            arrive: DirectionSpec::Open,
            tension: (Tension::default(), Tension::default()),
        }
    }

    /// Direction or curl leaving the current point (`{dir}..`).
    pub fn leave(mut self, dir: DirectionSpec) -> Result<Self> {
        self.leave = validated_direction(dir)?;
        Ok(self)
    }

    /// Direction or curl arriving at the next point (`..{dir}`).
    pub fn arrive(mut self, dir: DirectionSpec) -> Result<Self> {
        self.arrive = validated_direction(dir)?;
        Ok(self)
    }

    /// Tensions of the next segment (`..tension a and b..`).
    pub fn tension(mut self, entry: Tension, exit: Tension) -> Result<Self> {
        self.tension = (validated_tension(entry)?, validated_tension(exit)?);
        Ok(self)
    }

    /// Smooth segment to `p` (`..`).
    pub fn curve_to(self, p: Point) -> Self {
        let (entry, exit) = self.tension;
        self.push(p, Join::Tension { entry, exit })
    }

    /// Straight segment to `p` (`--`): unit curl on any end not set otherwise.
    pub fn line_to(mut self, p: Point) -> Self {
        if self.leave.is_open() {
            self.leave = DirectionSpec::Curl(1.0);
        }
        if self.arrive.is_open() {
            self.arrive = DirectionSpec::Curl(1.0);
        }
        self.curve_to(p)
    }

    /// Segment to `p` with explicit control points (`..controls u and v..`).
    pub fn controls_to(self, u: Point, v: Point, p: Point) -> Self {
        self.push(p, Join::Controls(u, v))
    }

    /// Finish as an open path.
    pub fn open(self) -> Result<Path> {
        Path::open(self.segments)
    }

    /// Finish as a loop (`..cycle`).
    ///
    /// A smooth segment back to the start point is added unless the path is
    /// already there, in which case pending settings are dropped.
    pub fn close(self) -> Result<Path> {
        let builder = if self.current == self.start {
            self
        } else {
            let start = self.start;
            self.curve_to(start)
        };
        Path::closed(builder.segments)
    }

    fn push(mut self, p: Point, join: Join) -> Self {
        self.segments.push(Segment {
            start: self.current,
            entry: std::mem::take(&mut self.leave),
            join,
            exit: std::mem::take(&mut self.arrive),
            end: p,
        });
        self.tension = (Tension::default(), Tension::default());
        self.current = p;
        self
    }
}

/// Normalise a given direction and check curls.
fn validated_direction(dir: DirectionSpec) -> Result<DirectionSpec> {
    match dir {
        DirectionSpec::Given(v) => DirectionSpec::toward(v),
        DirectionSpec::Curl(gamma) => DirectionSpec::curl(gamma),
        DirectionSpec::Open => Ok(DirectionSpec::Open),
    }
}

fn validated_tension(t: Tension) -> Result<Tension> {
    match t {
        Tension::Exact(v) => Tension::exact(v),
        Tension::AtLeast(v) => Tension::at_least(v),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use crate::types::Vec2;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn curve_to_builds_smooth_segments() {
        let path = PathBuilder::new(p(0.0, 0.0))
            .curve_to(p(1.0, 1.0))
            .curve_to(p(2.0, 0.0))
            .open()
            .unwrap();
        assert!(!path.is_closed());
        assert_eq!(path.len(), 2);
        for seg in path.segments() {
            assert!(seg.entry.is_open() && seg.exit.is_open());
            assert_eq!(seg.join, Join::SMOOTH);
        }
        assert_eq!(path.segments()[1].start, p(1.0, 1.0));
    }

    #[test]
    fn settings_apply_to_next_segment_only() {
        let path = PathBuilder::new(p(0.0, 0.0))
            .leave(DirectionSpec::Given(Vec2::new(0.0, 5.0)))
            .unwrap()
            .tension(Tension::Exact(2.0), Tension::AtLeast(3.0))
            .unwrap()
            .arrive(DirectionSpec::Curl(2.0))
            .unwrap()
            .curve_to(p(1.0, 0.0))
            .curve_to(p(2.0, 0.0))
            .open()
            .unwrap();
        let s = path.segments();
        assert_eq!(s[0].entry, DirectionSpec::Given(Vec2::new(0.0, 1.0)));
        assert_eq!(s[0].exit, DirectionSpec::Curl(2.0));
        assert_eq!(
            s[0].join,
            Join::Tension {
                entry: Tension::Exact(2.0),
                exit: Tension::AtLeast(3.0)
            }
        );
        assert!(s[1].entry.is_open() && s[1].exit.is_open());
        assert_eq!(s[1].join, Join::SMOOTH);
    }

    #[test]
    fn line_to_curls_unset_ends() {
        let up = DirectionSpec::Given(Vec2::new(0.0, 1.0));
        let path = PathBuilder::new(p(0.0, 0.0))
            .leave(up)
            .unwrap()
            .line_to(p(1.0, 0.0))
            .open()
            .unwrap();
        let seg = path.segments()[0];
        assert_eq!(seg.entry, up);
        assert_eq!(seg.exit, DirectionSpec::Curl(1.0));
    }

    #[test]
    fn controls_to_records_explicit_join() {
        let path = PathBuilder::new(p(0.0, 0.0))
            .controls_to(p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0))
            .open()
            .unwrap();
        assert_eq!(path.segments()[0].join, Join::Controls(p(0.0, 1.0), p(1.0, 1.0)));
    }

    #[test]
    fn close_adds_return_segment() {
        let path = PathBuilder::new(p(0.0, 0.0))
            .curve_to(p(1.0, 0.0))
            .curve_to(p(1.0, 1.0))
            .close()
            .unwrap();
        assert!(path.is_closed());
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[2].end, p(0.0, 0.0));
    }

    #[test]
    fn close_at_start_adds_nothing() {
        let path = PathBuilder::new(p(0.0, 0.0))
            .curve_to(p(1.0, 0.0))
            .curve_to(p(1.0, 1.0))
            .line_to(p(0.0, 0.0))
            .close()
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[2].exit, DirectionSpec::Curl(1.0));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let b = PathBuilder::new(p(0.0, 0.0));
        assert_eq!(
            b.clone().leave(DirectionSpec::Given(Vec2::ZERO)).unwrap_err(),
            CurveError::InvalidDirection
        );
        assert_eq!(
            b.clone().arrive(DirectionSpec::Curl(0.0)).unwrap_err(),
            CurveError::InvalidCurl(0.0)
        );
        assert_eq!(
            b.tension(Tension::Exact(1.0), Tension::AtLeast(-2.0)).unwrap_err(),
            CurveError::InvalidTension(-2.0)
        );
    }
}
