//! JSON input format.
//!
//! ```json
//! { "paths": [ {
//!     "closed": false,
//!     "knots": [ { "point": [0, 0], "outgoing": { "angle": 90 } },
//!                { "point": [10, 10] },
//!                { "point": [20, 0], "incoming": { "curl": 2 } } ],
//!     "joins": [ { "tension": { "entry": 1.5, "exit": 1, "at_least": true } }, "line" ]
//! } ] }
//! ```
//!
//! `outgoing` constrains the curve leaving a knot, `incoming` the curve
//! arriving at it. `joins[k]` describes the segment from knot `k` to the
//! next; missing entries are smooth unit-tension joins.

use serde::Deserialize;

use metacurve_core::{DirectionSpec, Path, PathBuilder, Point, Tension, Vec2};

use crate::error::CliError;

/// Top-level input document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub paths: Vec<PathSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathSpec {
    #[serde(default)]
    pub closed: bool,
    pub knots: Vec<KnotSpec>,
    #[serde(default)]
    pub joins: Vec<JoinSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnotSpec {
    pub point: (f64, f64),
    #[serde(default)]
    pub incoming: Option<DirSpec>,
    #[serde(default)]
    pub outgoing: Option<DirSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirSpec {
    /// Degrees counter-clockwise from the x axis.
    Angle(f64),
    Vector((f64, f64)),
    Curl(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinSpec {
    /// `..`
    #[default]
    Curve,
    /// `--`
    Line,
    Tension(TensionSpec),
    Controls([(f64, f64); 2]),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TensionSpec {
    #[serde(default = "unit")]
    pub entry: f64,
    #[serde(default = "unit")]
    pub exit: f64,
    #[serde(default)]
    pub at_least: bool,
}

const fn unit() -> f64 {
    1.0
}

impl DirSpec {
    fn to_direction(self) -> DirectionSpec {
        match self {
            Self::Angle(deg) => DirectionSpec::angle(deg),
            Self::Vector((x, y)) => DirectionSpec::Given(Vec2::new(x, y)),
            Self::Curl(gamma) => DirectionSpec::Curl(gamma),
        }
    }
}

impl TensionSpec {
    const fn tensions(self) -> (Tension, Tension) {
        if self.at_least {
            (Tension::AtLeast(self.entry), Tension::AtLeast(self.exit))
        } else {
            (Tension::Exact(self.entry), Tension::Exact(self.exit))
        }
    }
}

impl KnotSpec {
    const fn point(&self) -> Point {
        Point::new(self.point.0, self.point.1)
    }
}

impl PathSpec {
    /// Build the core path; `index` labels errors.
    pub fn to_path(&self, index: usize) -> Result<Path, CliError> {
        let n = self.knots.len();
        let segments = match (self.closed, n) {
            (_, 0) => return Err(CliError::input(index, "path has no knots")),
            (false, 1) => return Err(CliError::input(index, "open path needs at least two knots")),
            (true, n) => n,
            (false, n) => n - 1,
        };
        if self.joins.len() > segments {
            return Err(CliError::input(
                index,
                format!("{} joins given for {segments} segments", self.joins.len()),
            ));
        }

        let curve_err = CliError::curve(index);
        let mut builder = PathBuilder::new(self.knots[0].point());
        for k in 0..segments {
            let from = &self.knots[k];
            let to = &self.knots[(k + 1) % n];
            if let Some(dir) = from.outgoing {
                builder = builder.leave(dir.to_direction()).map_err(&curve_err)?;
            }
            if let Some(dir) = to.incoming {
                builder = builder.arrive(dir.to_direction()).map_err(&curve_err)?;
            }
            builder = match self.joins.get(k).copied().unwrap_or_default() {
                JoinSpec::Curve => builder.curve_to(to.point()),
                JoinSpec::Line => builder.line_to(to.point()),
                JoinSpec::Tension(spec) => {
                    let (entry, exit) = spec.tensions();
                    builder
                        .tension(entry, exit)
                        .map_err(&curve_err)?
                        .curve_to(to.point())
                }
                JoinSpec::Controls([u, v]) => builder.controls_to(
                    Point::new(u.0, u.1),
                    Point::new(v.0, v.1),
                    to.point(),
                ),
            };
        }

        if self.closed {
            builder.close()
        } else {
            builder.open()
        }
        .map_err(curve_err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use metacurve_core::{CurveError, Join};

    fn parse(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_all_direction_and_join_forms() {
        let doc = parse(
            r#"{ "paths": [ {
                "knots": [
                    { "point": [0, 0], "outgoing": { "angle": 90 } },
                    { "point": [1, 1], "incoming": { "vector": [1, 0] } },
                    { "point": [2, 0], "outgoing": { "curl": 2 } },
                    { "point": [3, 0] }
                ],
                "joins": [
                    { "tension": { "entry": 2, "at_least": true } },
                    "line",
                    { "controls": [[2, 1], [3, 1]] }
                ]
            } ] }"#,
        );
        let spec = &doc.paths[0];
        assert!(!spec.closed);
        assert_eq!(spec.knots[0].outgoing, Some(DirSpec::Angle(90.0)));
        assert_eq!(spec.knots[2].outgoing, Some(DirSpec::Curl(2.0)));
        assert_eq!(
            spec.joins[0],
            JoinSpec::Tension(TensionSpec {
                entry: 2.0,
                exit: 1.0,
                at_least: true
            })
        );
        assert_eq!(spec.joins[1], JoinSpec::Line);

        let path = spec.to_path(0).unwrap();
        let s = path.segments();
        assert_eq!(path.len(), 3);
        assert_eq!(s[0].exit, DirectionSpec::Given(Vec2::new(1.0, 0.0)));
        assert_eq!(
            s[0].join,
            Join::Tension {
                entry: Tension::AtLeast(2.0),
                exit: Tension::AtLeast(1.0)
            }
        );
        assert_eq!(s[1].entry, DirectionSpec::Curl(1.0));
        assert_eq!(s[2].entry, DirectionSpec::Curl(2.0));
        assert_eq!(s[2].join, Join::Controls(Point::new(2.0, 1.0), Point::new(3.0, 1.0)));
    }

    #[test]
    fn closed_path_wraps_to_first_knot() {
        let doc = parse(
            r#"{ "paths": [ { "closed": true, "knots": [
                { "point": [0, 0], "incoming": { "angle": 270 } },
                { "point": [1, 0] },
                { "point": [0, 1] }
            ] } ] }"#,
        );
        let path = doc.paths[0].to_path(0).unwrap();
        assert!(path.is_closed());
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[2].end, Point::ZERO);
        assert!(path.segments()[2].exit.is_specified());
    }

    #[test]
    fn structural_errors_name_the_path() {
        let doc = parse(r#"{ "paths": [ { "knots": [ { "point": [0, 0] } ] } ] }"#);
        let err = doc.paths[0].to_path(3).unwrap_err();
        assert_eq!(err.to_string(), "path 3: open path needs at least two knots");

        let doc = parse(
            r#"{ "paths": [ { "knots": [ { "point": [0, 0] }, { "point": [1, 0] } ],
                 "joins": ["line", "line"] } ] }"#,
        );
        assert!(matches!(doc.paths[0].to_path(0), Err(CliError::Input { .. })));
    }

    #[test]
    fn invalid_constraints_are_curve_errors() {
        let doc = parse(
            r#"{ "paths": [ { "knots": [
                { "point": [0, 0], "outgoing": { "vector": [0, 0] } },
                { "point": [1, 0] }
            ] } ] }"#,
        );
        assert!(matches!(
            doc.paths[0].to_path(1),
            Err(CliError::Curve {
                index: 1,
                source: CurveError::InvalidDirection
            })
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let r: Result<Document, _> =
            serde_json::from_str(r#"{ "paths": [], "scale": 2 }"#);
        assert!(r.is_err());
    }
}
