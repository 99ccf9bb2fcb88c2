//! MetaPost-style text rendering of solved paths.

use std::fmt::Write;

use metacurve_core::{CubicPath, Point};

/// One line per path: `(x,y)..controls (x,y) and (x,y)..(x,y)`, ending in
/// `..cycle` for closed paths.
pub fn format_text(paths: &[CubicPath], precision: usize) -> String {
    let mut out = String::new();
    for path in paths {
        let _ = writeln!(out, "{}", format_path(path, precision));
    }
    out
}

fn format_path(path: &CubicPath, precision: usize) -> String {
    let segments = path.segments();
    let Some(first) = segments.first() else {
        return String::new();
    };

    let mut s = format_point(first.p0, precision);
    for (i, seg) in segments.iter().enumerate() {
        let _ = write!(
            s,
            "..controls {} and {}..",
            format_point(seg.p1, precision),
            format_point(seg.p2, precision)
        );
        if path.is_closed() && i + 1 == segments.len() {
            s.push_str("cycle");
        } else {
            s.push_str(&format_point(seg.p3, precision));
        }
    }
    s
}

fn format_point(p: Point, precision: usize) -> String {
    format!(
        "({},{})",
        format_coord(p.x, precision),
        format_coord(p.y, precision)
    )
}

/// Fixed precision with trailing zeros stripped; never prints `-0`.
fn format_coord(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        &s
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use metacurve_core::{CubicSegment, Path};

    fn third_line() -> CubicSegment {
        CubicSegment::new(
            Point::new(0.0, 0.0),
            Point::new(1.0 / 3.0, 0.0),
            Point::new(2.0 / 3.0, -0.0),
            Point::new(1.0, 0.0),
        )
    }

    #[test]
    fn open_path_lists_every_point() {
        let path = Path::open(vec![third_line()]).unwrap();
        assert_eq!(
            format_text(&[path], 4),
            "(0,0)..controls (0.3333,0) and (0.6667,0)..(1,0)\n"
        );
    }

    #[test]
    fn closed_path_ends_in_cycle() {
        let back = CubicSegment::new(
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        );
        let path = Path::closed(vec![third_line(), back]).unwrap();
        let text = format_text(&[path], 2);
        assert!(text.ends_with("..controls (1,1) and (0,1)..cycle\n"), "{text}");
        assert_eq!(text.matches("controls").count(), 2);
    }

    #[test]
    fn coordinates_drop_trailing_zeros() {
        assert_eq!(format_coord(2.5, 4), "2.5");
        assert_eq!(format_coord(-0.00001, 3), "0");
        assert_eq!(format_coord(7.0, 0), "7");
    }
}
