use std::path::PathBuf;

use genreport_common::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GedError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode GED input: {0}")]
    Decode(String),

    /// `line` is 1-based.
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl GedError {
    pub(crate) fn line(line: usize, message: impl Into<String>) -> Self {
        Self::Line {
            line,
            message: message.into(),
        }
    }
}
