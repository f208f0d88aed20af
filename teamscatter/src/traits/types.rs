//! Utility types shared across the crate.
use std::fmt;

/// Type to handle evaluation related errors
#[derive(Debug)]
pub enum EvalError {
    /// Failure to run some business logic
    Failed(String),

    /// Violated divisibility or sizing constraint on the process grid
    InvalidGrid(String),

    /// I/O failure
    Io(std::io::Error),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Failed(e) => write!(f, "Failed: {}", e),
            EvalError::InvalidGrid(e) => write!(f, "Invalid grid: {}", e),
            EvalError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Io(e) => Some(e),
            EvalError::Failed(_e) => None,
            EvalError::InvalidGrid(_e) => None,
        }
    }
}

impl From<std::io::Error> for EvalError {
    fn from(e: std::io::Error) -> Self {
        EvalError::Io(e)
    }
}
