use thiserror::Error;
use crate::error::{SetupError, ShapeError, TensorError};

/// Top level crate error, constructed from more specific error.
#[derive(Debug, Clone, Error)]
pub enum BellmanError{
    /// Solver or environment was constructed with parameters that cannot work,
    /// e.g. missing policy for policy iteration.
    #[error("Setup error: {source}")]
    Setup{
        #[source]
        source: SetupError
    },
    /// Tensor shapes do not agree with declared numbers of states and actions.
    #[error("Shape error: {source}")]
    Shape{
        #[source]
        source: ShapeError
    },
    /// Errors in tensor processing.
    #[error("Tensor operation error: \"{error}\"")]
    Tensor{
        #[source]
        error: TensorError,
    },
    /// Standard Input/Output error.
    #[error("Error in I/O operation: {explanation:}")]
    IO{
        explanation: String
    },

    /// Custom error to return if error does not fit any other category.
    #[error("Custom: {0}")]
    Custom(String),
}

impl From<tch::TchError> for BellmanError{
    fn from(source: tch::TchError) -> BellmanError{
        BellmanError::Tensor {
            error: TensorError::from(source),
        }
    }
}

impl From<std::io::Error> for BellmanError{
    fn from(source: std::io::Error) -> Self {
        BellmanError::IO {
            explanation: format!("{source}")
        }
    }
}
