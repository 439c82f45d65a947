use thiserror::Error;
use crate::error::BellmanError;

#[derive(Debug, Clone, Error)]
pub enum TensorError{
    #[error("Torch error: {origin} in context: {context:}")]
    Torch{
        origin: String,
        context: String
    }
}

impl TensorError{
    pub fn from_tch_with_context(error: tch::TchError, context: String) -> Self{
        Self::Torch {
            origin: format!("{error}"),
            context,
        }
    }
}

impl From<TensorError> for BellmanError{
    fn from(source: TensorError) -> BellmanError{
        BellmanError::Tensor{
            error: source,
        }
    }
}

impl From<tch::TchError> for TensorError{
    fn from(source: tch::TchError) -> TensorError{
        TensorError::Torch {
            origin: format!("{}", source),
            context: String::from("unspecified")
        }
    }
}
