use thiserror::Error;

use crate::config::ConfigError;
use crate::connectivity::ConnectivityReport;

/// Every way a numbering run can abort. No variant ever comes with a partial table.
#[derive(Debug, Error)]
pub enum NumberingError {
    /// The root selector did not resolve to a person.
    #[error("root '{selector}' not found in the family graph")]
    UnknownRoot { selector: String },

    /// A default root was requested from a graph without individuals.
    #[error("no individuals found; cannot choose a root")]
    EmptyGraph,

    /// Non-special persons without any relation path to the root.
    #[error("connectivity check failed: {0}")]
    Connectivity(ConnectivityReport),

    /// Internal post-condition failure. Indicates a defect, not bad input.
    #[error("numbering invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl NumberingError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// The connectivity diagnostic, if this is a connectivity failure.
    pub fn connectivity_report(&self) -> Option<&ConnectivityReport> {
        match self {
            Self::Connectivity(report) => Some(report),
            _ => None,
        }
    }
}
