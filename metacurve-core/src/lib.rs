//! Smooth cubic curves through points, after Hobby's METAFONT/MetaPost
//! algorithm.
//!
//! [`solve`] runs the whole pipeline: unspecified directions are filled in
//! ([`defaults`]), turning-angle equations are solved per run
//! ([`resolve`]), and tangents plus tensions become Bezier control points
//! ([`controls`]).

pub mod error;
pub mod types;

pub mod bezier;
pub mod builder;
pub mod controls;
pub mod defaults;
pub mod equations;
pub mod geom;
pub mod partition;
pub mod resolve;
pub mod tridiagonal;

use tracing::debug_span;

pub use bezier::{CubicPath, CubicSegment};
pub use builder::PathBuilder;
pub use error::{CurveError, Result};
pub use types::{DirectionSpec, Join, Path, Point, Segment, Tension, Vec2};

/// Compute explicit control points for every segment of `path`.
pub fn solve(path: Path) -> Result<CubicPath> {
    let span = debug_span!("solve", segments = path.len(), closed = path.is_closed());
    let _enter = span.enter();

    let filled = defaults::fill_defaults(path);
    let resolved = resolve::resolve_directions(filled)?;
    Ok(resolved.map_segments(controls::compute_controls))
}
