use std::io;
use std::path::PathBuf;

use metacurve_core::CurveError;
use thiserror::Error;

/// Everything that can stop the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid input document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("path {index}: {message}")]
    Input { index: usize, message: String },

    #[error("path {index}: {source}")]
    Curve {
        index: usize,
        #[source]
        source: CurveError,
    },
}

impl CliError {
    pub(crate) fn input(index: usize, message: impl Into<String>) -> Self {
        Self::Input {
            index,
            message: message.into(),
        }
    }

    pub(crate) fn curve(index: usize) -> impl Fn(CurveError) -> Self {
        move |source| Self::Curve { index, source }
    }
}
