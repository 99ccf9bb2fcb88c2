use thiserror::Error;

/// Which end of a segment an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// The start point (entry direction).
    Entry,
    /// The end point (exit direction).
    Exit,
}

impl std::fmt::Display for End {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => f.write_str("entry"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Errors returned while building or solving a path.
///
/// `EmptyRun` and `MissingBoundary` are internal precondition violations:
/// they mean direction defaulting failed to pin a run boundary, not that the
/// caller supplied bad input.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CurveError {
    #[error("attempted to solve a line run with no segments")]
    EmptyRun,

    #[error("segment {segment} has no direction or curl at its {end}")]
    MissingBoundary { segment: usize, end: End },

    #[error("singular linear system of size {size}")]
    SingularSystem { size: usize },

    #[error("linear system has inconsistent dimensions")]
    DimensionMismatch,

    #[error("segment {segment} does not start where the previous one ends")]
    Disconnected { segment: usize },

    #[error("closed path does not end where it starts")]
    NotClosed,

    #[error("direction vector has zero length")]
    InvalidDirection,

    #[error("curl must be positive, got {0}")]
    InvalidCurl(f64),

    #[error("tension must be positive, got {0}")]
    InvalidTension(f64),
}

pub type Result<T> = std::result::Result<T, CurveError>;
