use thiserror::Error;
use crate::error::BellmanError;

/// Errors in parameters used to construct solvers and environments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError{
    #[error("Algorithm {algorithm} requires initial policy, but none was provided")]
    MissingPolicy{
        algorithm: String,
    },
    #[error("Discount factor must be in open interval (0, 1), got {gamma}")]
    DiscountOutOfRange{
        gamma: f64,
    },
    #[error("Number of evaluation sweeps must be positive")]
    ZeroEvaluationSweeps,
    #[error("Policy selects action {action} in state {state}, but only {number_of_actions} actions exist")]
    ActionOutOfRange{
        state: usize,
        action: i64,
        number_of_actions: usize,
    },
    #[error("Transition distribution for state {state} and action {action} is invalid: {reason}")]
    InvalidDistribution{
        state: usize,
        action: usize,
        reason: String,
    },
    #[error("Environment must have at least one state and one action (states: {states}, actions: {actions})")]
    EmptySpace{
        states: usize,
        actions: usize,
    },
    #[error("Index {index} of {what} is out of range (limit {limit})")]
    IndexOutOfRange{
        what: String,
        index: usize,
        limit: usize,
    },
    #[error("Parameter {name} has invalid value {value}")]
    InvalidParameter{
        name: String,
        value: String,
    },
    #[error("Initial policy must have integral kind, got {kind}")]
    NonIntegralPolicy{
        kind: String,
    },
    #[error("Tensor '{name}' must have floating point kind, got {kind}")]
    NonFloatingKind{
        name: String,
        kind: String,
    },
    #[error("Rewards and transitions differ in kind: {rewards} vs {transitions}")]
    KindMismatch{
        rewards: String,
        transitions: String,
    },
    #[error("Rewards and transitions are on different devices: {rewards} vs {transitions}")]
    DeviceMismatch{
        rewards: String,
        transitions: String,
    },
    #[error("Missing transition row for state {state} and action {action}")]
    MissingTransition{
        state: usize,
        action: usize,
    },
}

impl From<SetupError> for BellmanError{
    fn from(source: SetupError) -> Self {
        BellmanError::Setup {
            source
        }
    }
}
