//! Core types shared across the `metacurve` pipeline.
//!
//! A [`Path`] is a container of segments plus a closed/open flag. The
//! segment type changes as the path moves through the pipeline:
//! [`Segment`] (sparse constraints) → [`ResolvedSegment`] (tangent vectors
//! at both ends) → [`CubicSegment`](crate::bezier::CubicSegment) (explicit
//! control points).

pub use kurbo::{Point, Vec2};

use crate::error::{CurveError, Result};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias for the floating-point type used throughout.
pub type Scalar = f64;

/// Tolerance for geometric comparisons (coincident points, zero chords).
pub const EPSILON: Scalar = 1.0 / 65536.0;

/// Threshold below which a pivot or denominator is treated as zero.
pub const NEAR_ZERO: Scalar = 1e-12;

// ---------------------------------------------------------------------------
// DirectionSpec
// ---------------------------------------------------------------------------

/// Direction constraint at one end of a join.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DirectionSpec {
    /// Let the solver choose the direction.
    #[default]
    Open,
    /// Curl parameter; 1.0 is the default at open-path endpoints.
    Curl(Scalar),
    /// A fixed tangent direction (unit vector).
    Given(Vec2),
}

impl DirectionSpec {
    /// A given direction from any non-zero vector.
    pub fn toward(v: Vec2) -> Result<Self> {
        let len = v.hypot();
        if !len.is_finite() || len < NEAR_ZERO {
            return Err(CurveError::InvalidDirection);
        }
        Ok(Self::Given(v / len))
    }

    /// A given direction at `degrees` counter-clockwise from the x axis.
    pub fn angle(degrees: Scalar) -> Self {
        Self::Given(Vec2::from_angle(degrees.to_radians()))
    }

    /// A curl constraint; `gamma` must be positive.
    pub fn curl(gamma: Scalar) -> Result<Self> {
        if gamma > 0.0 && gamma.is_finite() {
            Ok(Self::Curl(gamma))
        } else {
            Err(CurveError::InvalidCurl(gamma))
        }
    }

    #[inline]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    #[inline]
    pub const fn is_specified(&self) -> bool {
        !self.is_open()
    }

    /// The same constraint seen from the other end of a reversed segment.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Given(d) => Self::Given(-d),
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Tension
// ---------------------------------------------------------------------------

/// Tension at one end of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tension {
    /// Use exactly this tension.
    Exact(Scalar),
    /// Use at least this tension, raising it if needed to keep the curve
    /// inside its bounding triangle (MetaPost `tension atleast`).
    AtLeast(Scalar),
}

impl Tension {
    /// Validated exact tension.
    pub fn exact(t: Scalar) -> Result<Self> {
        check_tension(t).map(Self::Exact)
    }

    /// Validated "at least" tension.
    pub fn at_least(t: Scalar) -> Result<Self> {
        check_tension(t).map(Self::AtLeast)
    }

    /// The numeric tension regardless of kind.
    #[inline]
    pub const fn value(self) -> Scalar {
        match self {
            Self::Exact(t) | Self::AtLeast(t) => t,
        }
    }

    #[inline]
    pub const fn is_at_least(self) -> bool {
        matches!(self, Self::AtLeast(_))
    }
}

impl Default for Tension {
    fn default() -> Self {
        Self::Exact(1.0)
    }
}

fn check_tension(t: Scalar) -> Result<Scalar> {
    if t > 0.0 && t.is_finite() {
        Ok(t)
    } else {
        Err(CurveError::InvalidTension(t))
    }
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// What lies between the two points of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Join {
    /// Unresolved: the solver picks control points from these tensions.
    Tension { entry: Tension, exit: Tension },
    /// Fully resolved: explicit Bezier control points.
    Controls(Point, Point),
}

impl Join {
    /// `..` with unit tension on both ends.
    pub const SMOOTH: Self = Self::Tension {
        entry: Tension::Exact(1.0),
        exit: Tension::Exact(1.0),
    };

    /// The join seen from the other end.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Tension { entry, exit } => Self::Tension {
                entry: exit,
                exit: entry,
            },
            Self::Controls(u, v) => Self::Controls(v, u),
        }
    }

    /// Tensions used by the equations; control joins behave like unit tension.
    pub(crate) const fn tensions(&self) -> (Tension, Tension) {
        match *self {
            Self::Tension { entry, exit } => (entry, exit),
            Self::Controls(..) => (Tension::Exact(1.0), Tension::Exact(1.0)),
        }
    }
}

impl Default for Join {
    fn default() -> Self {
        Self::SMOOTH
    }
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// Common accessors for every segment representation.
pub trait Endpoints {
    fn start(&self) -> Point;
    fn end(&self) -> Point;

    /// Vector from start to end.
    fn chord(&self) -> Vec2 {
        self.end() - self.start()
    }
}

/// A segment with sparse direction constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub entry: DirectionSpec,
    pub join: Join,
    pub exit: DirectionSpec,
    pub end: Point,
}

impl Segment {
    /// A `..` segment with no direction constraints and unit tension.
    pub const fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            entry: DirectionSpec::Open,
            join: Join::SMOOTH,
            exit: DirectionSpec::Open,
            end,
        }
    }

    /// The same segment traversed from end to start.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            entry: self.exit.reversed(),
            join: self.join.reversed(),
            exit: self.entry.reversed(),
            end: self.start,
        }
    }
}

impl Endpoints for Segment {
    fn start(&self) -> Point {
        self.start
    }
    fn end(&self) -> Point {
        self.end
    }
}

/// A segment whose tangent directions are known at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSegment {
    pub start: Point,
    pub entry: Vec2,
    pub join: Join,
    pub exit: Vec2,
    pub end: Point,
}

impl ResolvedSegment {
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            entry: -self.exit,
            join: self.join.reversed(),
            exit: -self.entry,
            end: self.start,
        }
    }
}

impl Endpoints for ResolvedSegment {
    fn start(&self) -> Point {
        self.start
    }
    fn end(&self) -> Point {
        self.end
    }
}

impl From<ResolvedSegment> for Segment {
    /// Forget that the directions were computed: both ends become `Given`.
    fn from(seg: ResolvedSegment) -> Self {
        Self {
            start: seg.start,
            entry: DirectionSpec::Given(seg.entry),
            join: seg.join,
            exit: DirectionSpec::Given(seg.exit),
            end: seg.end,
        }
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// An ordered sequence of segments, optionally closed into a loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<S = Segment> {
    pub(crate) segments: Vec<S>,
    pub(crate) closed: bool,
}

impl<S: Endpoints> Path<S> {
    /// Build an open path, checking that consecutive segments share points.
    pub fn open(segments: Vec<S>) -> Result<Self> {
        check_connected(&segments)?;
        Ok(Self {
            segments,
            closed: false,
        })
    }

    /// Build a closed path; the last segment must end where the first starts.
    pub fn closed(segments: Vec<S>) -> Result<Self> {
        check_connected(&segments)?;
        if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
            if first.start() != last.end() {
                return Err(CurveError::NotClosed);
            }
        }
        Ok(Self {
            segments,
            closed: true,
        })
    }
}

impl<S> Path<S> {
    /// An empty open path.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            closed: false,
        }
    }

    pub fn segments(&self) -> &[S] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<S> {
        self.segments
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Apply a per-segment transform, keeping the topology.
    ///
    /// Used by the pipeline stages; the closure must preserve endpoints.
    pub(crate) fn map_segments<T>(self, f: impl FnMut(S) -> T) -> Path<T> {
        Path {
            segments: self.segments.into_iter().map(f).collect(),
            closed: self.closed,
        }
    }

    pub(crate) const fn from_parts(segments: Vec<S>, closed: bool) -> Self {
        Self { segments, closed }
    }
}

impl<S> Default for Path<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_connected<S: Endpoints>(segments: &[S]) -> Result<()> {
    for (i, pair) in segments.windows(2).enumerate() {
        if pair[0].end() != pair[1].start() {
            return Err(CurveError::Disconnected { segment: i + 1 });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
