use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};
use bellman_core::error::SetupError;

/// Element-wise closeness used to decide if value estimate stopped changing:
/// `|old - new| <= atol + rtol * |new|`.
#[derive(Copy, Clone, Debug, PartialEq, CopyGetters, Setters, Serialize, Deserialize)]
#[getset(get_copy = "pub", set = "pub")]
pub struct Tolerance{
    rtol: f64,
    atol: f64,
}

impl Tolerance{
    pub fn new(rtol: f64, atol: f64) -> Self{
        Self{rtol, atol}
    }
}

impl Default for Tolerance{
    fn default() -> Self {
        Self{
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

/// Minimal configuration every dynamic programming solver needs.
pub trait DpConfigBasic{
    fn discount_factor(&self) -> f64;
    fn convergence_tolerance(&self) -> Tolerance;
}

/// Configuration shared by value iteration and policy iteration.
#[derive(Copy, Clone, Debug, PartialEq, CopyGetters, Setters, Serialize, Deserialize)]
#[getset(get_copy = "pub", set = "pub")]
pub struct ConfigDp{
    /// Discount factor, must be in `(0, 1)`.
    gamma: f64,
    #[serde(default)]
    tolerance: Tolerance,
}

impl ConfigDp{
    pub fn new(gamma: f64) -> Self{
        Self{
            gamma,
            tolerance: Tolerance::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self{
        self.tolerance = tolerance;
        self
    }

    pub fn check(&self) -> Result<(), SetupError>{
        // negated so that NaN is rejected too
        if !(self.gamma > 0.0 && self.gamma < 1.0){
            return Err(SetupError::DiscountOutOfRange {gamma: self.gamma})
        }
        for (name, value) in [("rtol", self.tolerance.rtol), ("atol", self.tolerance.atol)]{
            if !(value >= 0.0){
                return Err(SetupError::InvalidParameter {name: name.into(), value: format!("{value}")})
            }
        }
        Ok(())
    }
}

impl Default for ConfigDp{
    fn default() -> Self {
        Self::new(0.9)
    }
}

impl DpConfigBasic for ConfigDp{
    fn discount_factor(&self) -> f64 {
        self.gamma
    }

    fn convergence_tolerance(&self) -> Tolerance {
        self.tolerance
    }
}

/// Configuration for modified policy iteration: [`ConfigDp`] with number of evaluation sweeps
/// performed in every outer iteration.
#[derive(Copy, Clone, Debug, PartialEq, CopyGetters, Setters, Serialize, Deserialize)]
#[getset(get_copy = "pub", set = "pub")]
pub struct ConfigModifiedPolicyIteration{
    #[serde(flatten)]
    dp: ConfigDp,
    evaluation_sweeps: usize,
}

impl ConfigModifiedPolicyIteration{
    pub fn new(gamma: f64, evaluation_sweeps: usize) -> Self{
        Self{
            dp: ConfigDp::new(gamma),
            evaluation_sweeps,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self{
        self.dp = self.dp.with_tolerance(tolerance);
        self
    }

    pub fn check(&self) -> Result<(), SetupError>{
        self.dp.check()?;
        if self.evaluation_sweeps == 0{
            return Err(SetupError::ZeroEvaluationSweeps)
        }
        Ok(())
    }
}

impl Default for ConfigModifiedPolicyIteration{
    fn default() -> Self {
        Self{
            dp: ConfigDp::default(),
            evaluation_sweeps: 5,
        }
    }
}

impl DpConfigBasic for ConfigModifiedPolicyIteration{
    fn discount_factor(&self) -> f64 {
        self.dp.gamma
    }

    fn convergence_tolerance(&self) -> Tolerance {
        self.dp.tolerance
    }
}
