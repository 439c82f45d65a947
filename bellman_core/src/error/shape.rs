use thiserror::Error;
use crate::error::BellmanError;

/// Tensor does not have shape implied by numbers of states and actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError{
    #[error("Tensor '{name}' has shape {found:?}, expected {expected:?}")]
    Mismatch{
        name: String,
        expected: Vec<i64>,
        found: Vec<i64>,
    },
    #[error("Tensor '{name}' should have {expected} dimensions, but has {found}")]
    Rank{
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Data should have the same length, but left is {left:} and right is {right:}. {context:}")]
    LengthMismatch{
        left: usize,
        right: usize,
        context: String,
    },
}

impl ShapeError{

    /// Compares tensor size with expected, returns [`ShapeError::Mismatch`] when they differ.
    pub fn check(name: &str, tensor: &tch::Tensor, expected: &[i64]) -> Result<(), ShapeError>{
        let found = tensor.size();
        if found.as_slice() != expected{
            return Err(ShapeError::Mismatch {
                name: name.to_string(),
                expected: expected.to_vec(),
                found,
            })
        }
        Ok(())
    }
}

impl From<ShapeError> for BellmanError{
    fn from(source: ShapeError) -> Self {
        BellmanError::Shape {
            source
        }
    }
}
