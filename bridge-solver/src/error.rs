//! Error types for the bridge solver

use thiserror::Error;

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("computation failed in {stage} analysis: {message}")]
    Computation {
        stage: &'static str,
        message: String,
    },

    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SolverError {
    /// Stable machine-readable kind, used as the `error` field of a
    /// structured error result.
    pub fn kind(&self) -> &'static str {
        match self {
            SolverError::InsufficientData(_) => "insufficient_data",
            SolverError::Computation { .. } => "computation_error",
            SolverError::Serialization(_) => "output_error",
        }
    }

    /// True for errors that are a terminal, valid outcome of a request
    /// rather than an engine fault worth retrying elsewhere.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SolverError::InsufficientData(_))
    }
}

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = SolverError::InsufficientData("no beams".to_string());
        assert_eq!(err.kind(), "insufficient_data");
        assert!(err.is_terminal());

        let err = SolverError::Computation {
            stage: "stress",
            message: "bad section".to_string(),
        };
        assert_eq!(err.kind(), "computation_error");
        assert!(!err.is_terminal());
    }
}
