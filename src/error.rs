use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a single problem instance.
///
/// Infeasible and unbounded solves are NOT errors; they are legitimate
/// outcomes carried by `SolveStatus` and reported as-is.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("solve failed: {0}")]
    Engine(String),

    #[error("internal invariant violation: {0}")]
    Invariant(String),
}

impl FlowError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        FlowError::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        FlowError::Configuration(msg.into())
    }
}
