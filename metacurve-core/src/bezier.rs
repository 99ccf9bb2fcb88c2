//! Solved cubic segments and their assembly into curves.
//!
//! [`CubicSegment`] is what the control-point stage emits; a
//! [`CubicPath`] converts to a `kurbo::BezPath` for rendering or further
//! geometric processing.

use kurbo::BezPath;

use crate::types::{Endpoints, Path, Point, Scalar, Vec2};

/// Four control points of a cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// A path whose segments all carry explicit control points.
pub type CubicPath = Path<CubicSegment>;

impl CubicSegment {
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the point at parameter `t` in [0, 1].
    #[expect(
        clippy::many_single_char_names,
        reason = "standard Bezier math variable names (a, b, c, d, s, t)"
    )]
    #[must_use]
    pub fn eval(&self, t: Scalar) -> Point {
        let s = 1.0 - t;
        let a = s * s * s;
        let b = 3.0 * s * s * t;
        let c = 3.0 * s * t * t;
        let d = t * t * t;
        Point::new(
            d.mul_add(
                self.p3.x,
                a.mul_add(self.p0.x, b.mul_add(self.p1.x, c * self.p2.x)),
            ),
            d.mul_add(
                self.p3.y,
                a.mul_add(self.p0.y, b.mul_add(self.p1.y, c * self.p2.y)),
            ),
        )
    }

    /// Evaluate the derivative (tangent vector) at parameter `t` in [0, 1].
    #[must_use]
    pub fn eval_deriv(&self, t: Scalar) -> Vec2 {
        let s = 1.0 - t;
        let a = 3.0 * s * s;
        let b = 6.0 * s * t;
        let c = 3.0 * t * t;
        (self.p1 - self.p0) * a + (self.p2 - self.p1) * b + (self.p3 - self.p2) * c
    }

    /// The same curve traversed from `p3` to `p0`.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            p0: self.p3,
            p1: self.p2,
            p2: self.p1,
            p3: self.p0,
        }
    }

    /// Axis-aligned bounding box of the control-point hull: `(min, max)`.
    #[must_use]
    pub fn bbox(&self) -> (Point, Point) {
        let min_x = self.p0.x.min(self.p1.x).min(self.p2.x).min(self.p3.x);
        let min_y = self.p0.y.min(self.p1.y).min(self.p2.y).min(self.p3.y);
        let max_x = self.p0.x.max(self.p1.x).max(self.p2.x).max(self.p3.x);
        let max_y = self.p0.y.max(self.p1.y).max(self.p2.y).max(self.p3.y);
        (Point::new(min_x, min_y), Point::new(max_x, max_y))
    }
}

impl Endpoints for CubicSegment {
    fn start(&self) -> Point {
        self.p0
    }
    fn end(&self) -> Point {
        self.p3
    }
}

impl CubicPath {
    /// Convert to a `kurbo::BezPath`: one `MoveTo`, a `CurveTo` per segment,
    /// and a `ClosePath` for closed paths.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bp = BezPath::new();
        let Some(first) = self.segments.first() else {
            return bp;
        };

        bp.move_to(first.p0);
        for seg in &self.segments {
            bp.curve_to(seg.p1, seg.p2, seg.p3);
        }
        if self.closed {
            bp.close_path();
        }
        bp
    }

    /// Point at time `t`, where integer times are the path's points.
    ///
    /// Open paths clamp `t` into `[0, len]`; closed paths wrap around.
    pub fn point_at(&self, t: Scalar) -> Option<Point> {
        let (seg, frac) = self.locate(t)?;
        Some(self.segments[seg].eval(frac))
    }

    /// Tangent vector at time `t` (see [`CubicPath::point_at`]).
    pub fn direction_at(&self, t: Scalar) -> Option<Vec2> {
        let (seg, frac) = self.locate(t)?;
        Some(self.segments[seg].eval_deriv(frac))
    }

    /// The path traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::from_parts(
            self.segments.iter().rev().map(|s| s.reversed()).collect(),
            self.closed,
        )
    }

    /// Bounding box of all control-point hulls, `None` for an empty path.
    pub fn bbox(&self) -> Option<(Point, Point)> {
        self.segments.iter().map(CubicSegment::bbox).reduce(|(a0, a1), (b0, b1)| {
            (
                Point::new(a0.x.min(b0.x), a0.y.min(b0.y)),
                Point::new(a1.x.max(b1.x), a1.y.max(b1.y)),
            )
        })
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "segment counts and times are small and non-negative after clamping"
    )]
    fn locate(&self, t: Scalar) -> Option<(usize, Scalar)> {
        let n = self.segments.len();
        if n == 0 {
            return None;
        }
        let n_f = n as Scalar;
        let t = if self.closed {
            t.rem_euclid(n_f)
        } else {
            t.clamp(0.0, n_f)
        };
        let seg = (t.floor() as usize).min(n - 1);
        Some((seg, t - seg as Scalar))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
