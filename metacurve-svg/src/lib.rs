//! SVG preview of solved `metacurve` paths.
//!
//! Converts [`CubicPath`]s into an SVG [`Document`] using the `svg` crate.
//!
//! Key design points:
//! - Path coordinates have Y pointing **up**; SVG has Y pointing **down**.
//!   All Y coordinates are negated at render time so that no global
//!   transform is needed.
//! - Path data is built as raw `d` strings to preserve `f64` precision
//!   (the `svg` crate's `Data` builder uses `f32`).
//! - Control polygons are an optional overlay drawn under the curves.

use svg::node::element::{Circle, Group, Path as SvgPath};
use svg::Document;

use metacurve_core::types::{Point, Scalar};
use metacurve_core::{CubicPath, CubicSegment};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Extra margin around the bounding box. Default: 1.0.
    pub margin: Scalar,
    /// Number of decimal places for coordinates. Default: 4.
    pub precision: usize,
    /// Stroke width of the curves. Default: 0.5.
    pub stroke_width: Scalar,
    /// Draw each segment's control polygon. Default: false.
    pub show_controls: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 1.0,
            precision: 4,
            stroke_width: 0.5,
            show_controls: false,
        }
    }
}

/// Render `paths` to an SVG [`Document`].
///
/// The `viewBox` spans the control-point hulls of all paths plus
/// [`RenderOptions::margin`].
#[must_use]
pub fn render(paths: &[CubicPath], opts: &RenderOptions) -> Document {
    let mut content = Group::new();
    if opts.show_controls {
        for path in paths {
            content = content.add(render_controls(path, opts));
        }
    }
    for path in paths {
        content = content.add(render_curve(path, opts));
    }

    build_document(bounds(paths), opts, content)
}

/// Render `paths` to an SVG string.
#[must_use]
pub fn render_to_string(paths: &[CubicPath], opts: &RenderOptions) -> String {
    render(paths, opts).to_string()
}

// ---------------------------------------------------------------------------
// Element renderers
// ---------------------------------------------------------------------------

fn render_curve(path: &CubicPath, opts: &RenderOptions) -> SvgPath {
    SvgPath::new()
        .set("d", path_to_d(path, opts.precision))
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", fmt_scalar(opts.stroke_width, opts.precision))
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round")
}

/// Handles from each endpoint to its control point, with a dot on every
/// control point.
fn render_controls(path: &CubicPath, opts: &RenderOptions) -> Group {
    let width = opts.stroke_width / 2.0;
    let mut d = String::with_capacity(path.len() * 60);
    let mut group = Group::new().set("class", "controls");

    for seg in path.segments() {
        for (from, to) in [(seg.p0, seg.p1), (seg.p3, seg.p2)] {
            d.push('M');
            write_point(&mut d, from.x, -from.y, opts.precision);
            d.push('L');
            write_point(&mut d, to.x, -to.y, opts.precision);
        }
        for cp in [seg.p1, seg.p2] {
            group = group.add(
                Circle::new()
                    .set("cx", fmt_scalar(cp.x, opts.precision))
                    .set("cy", fmt_scalar(-cp.y, opts.precision))
                    .set("r", fmt_scalar(width * 2.0, opts.precision))
                    .set("fill", "gray"),
            );
        }
    }

    group.add(
        SvgPath::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", "gray")
            .set("stroke-width", fmt_scalar(width, opts.precision)),
    )
}

// ---------------------------------------------------------------------------
// Path → SVG "d" attribute
// ---------------------------------------------------------------------------

/// Convert a [`CubicPath`] to an SVG path data string.
///
/// Uses cubic Bezier commands (M, C, Z). Y coordinates are negated.
fn path_to_d(path: &CubicPath, precision: usize) -> String {
    let Some(first) = path.segments().first() else {
        return String::new();
    };

    let mut d = String::with_capacity(path.len() * 40);
    d.push('M');
    write_point(&mut d, first.p0.x, -first.p0.y, precision);

    for CubicSegment { p1, p2, p3, .. } in path.segments() {
        d.push('C');
        write_point(&mut d, p1.x, -p1.y, precision);
        d.push(' ');
        write_point(&mut d, p2.x, -p2.y, precision);
        d.push(' ');
        write_point(&mut d, p3.x, -p3.y, precision);
    }

    if path.is_closed() {
        d.push('Z');
    }

    d
}

/// Write "x,y" to the string with the given precision.
///
/// Normalizes negative zero to positive zero for cleaner output.
fn write_point(d: &mut String, x: Scalar, y: Scalar, precision: usize) {
    use std::fmt::Write;
    let x = if x == 0.0 { 0.0 } else { x };
    let y = if y == 0.0 { 0.0 } else { y };
    let _ = write!(d, "{x:.precision$},{y:.precision$}");
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_owned()
        } else {
            trimmed.to_owned()
        }
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

fn bounds(paths: &[CubicPath]) -> Option<(Point, Point)> {
    paths
        .iter()
        .filter_map(CubicPath::bbox)
        .reduce(|(a0, a1), (b0, b1)| {
            (
                Point::new(a0.x.min(b0.x), a0.y.min(b0.y)),
                Point::new(a1.x.max(b1.x), a1.y.max(b1.y)),
            )
        })
}

/// Build the final SVG [`Document`].
///
/// The `viewBox` is computed by negating the Y range of the bounding box:
/// SVG `min_y = -max.y`, SVG `max_y = -min.y`.
fn build_document(bb: Option<(Point, Point)>, opts: &RenderOptions, content: Group) -> Document {
    let m = opts.margin;

    let (vb_x, vb_y, vb_w, vb_h) = bb.map_or((0.0, 0.0, 100.0, 100.0), |(min, max)| {
        (
            min.x - m,
            -max.y - m,
            2.0f64.mul_add(m, max.x - min.x),
            2.0f64.mul_add(m, max.y - min.y),
        )
    });

    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(vb_x, opts.precision),
                fmt_scalar(vb_y, opts.precision),
                fmt_scalar(vb_w, opts.precision),
                fmt_scalar(vb_h, opts.precision),
            ),
        )
        .set("width", format!("{}pt", fmt_scalar(vb_w, opts.precision)))
        .set("height", format!("{}pt", fmt_scalar(vb_h, opts.precision)))
        .add(content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use metacurve_core::types::Path;

    /// A straight segment from (0,0) to (10,0).
    fn make_line() -> CubicPath {
        let seg = CubicSegment::new(
            Point::ZERO,
            Point::new(10.0 / 3.0, 0.0),
            Point::new(20.0 / 3.0, 0.0),
            Point::new(10.0, 0.0),
        );
        Path::open(vec![seg]).unwrap()
    }

    /// Square 0,0 → 10,0 → 10,10 → 0,10 → cycle with straight edges.
    fn make_square() -> CubicPath {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let segs = (0..4)
            .map(|i| {
                let (a, b) = (pts[i], pts[(i + 1) % 4]);
                CubicSegment::new(a, a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0), b)
            })
            .collect();
        Path::closed(segs).unwrap()
    }

    // -- path_to_d tests --

    #[test]
    fn test_path_to_d_empty() {
        assert_eq!(path_to_d(&CubicPath::new(), 4), "");
    }

    #[test]
    fn test_path_to_d_line() {
        let d = path_to_d(&make_line(), 2);
        assert!(d.starts_with("M0.00,0.00"), "unexpected start: {d}");
        assert!(d.contains('C'));
        assert!(!d.contains('Z'));
        assert!(d.ends_with("10.00,0.00"), "unexpected end: {d}");
    }

    #[test]
    fn test_path_to_d_y_negation() {
        let seg = CubicSegment::new(
            Point::new(5.0, 10.0),
            Point::new(5.0, 10.0),
            Point::new(5.0, 10.0),
            Point::new(5.0, 10.0),
        );
        let d = path_to_d(&Path::open(vec![seg]).unwrap(), 1);
        assert!(d.contains("5.0,-10.0"), "Y should be negated: {d}");
    }

    #[test]
    fn test_path_to_d_cyclic() {
        let d = path_to_d(&make_square(), 2);
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('C').count(), 4);
    }

    // -- formatting --

    #[test]
    fn test_fmt_scalar_strips_zeros() {
        assert_eq!(fmt_scalar(1.5, 4), "1.5");
        assert_eq!(fmt_scalar(2.0, 4), "2");
        assert_eq!(fmt_scalar(-0.00001, 2), "0");
        assert_eq!(fmt_scalar(12.0, 0), "12");
    }

    // -- documents --

    #[test]
    fn test_render_viewbox_flips_y() {
        let svg = render_to_string(&[make_square()], &RenderOptions::default());
        assert!(svg.contains(r#"viewBox="-1 -11 12 12""#), "{svg}");
        assert!(svg.contains(r#"width="12pt""#));
    }

    #[test]
    fn test_render_empty_uses_default_viewbox() {
        let svg = render_to_string(&[], &RenderOptions::default());
        assert!(svg.contains(r#"viewBox="0 0 100 100""#), "{svg}");
    }

    #[test]
    fn test_render_one_path_element_per_curve() {
        let svg = render_to_string(&[make_line(), make_square()], &RenderOptions::default());
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_render_control_overlay() {
        let opts = RenderOptions {
            show_controls: true,
            ..RenderOptions::default()
        };
        let svg = render_to_string(&[make_line()], &opts);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(r#"class="controls""#));
    }
}
