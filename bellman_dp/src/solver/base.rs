use std::mem;
use tch::{Device, Kind, Tensor};
use bellman_core::env::MdpEnvironment;
use bellman_core::error::{BellmanError, SetupError, ShapeError, TensorError};
use crate::config::{ConfigDp, DpConfigBasic, Tolerance};
use crate::operators::{bellman_q_values, policies_equal, values_close};

/// Result of [`MdpSolver::run`].
#[derive(Debug)]
pub struct RunSummary{
    /// Final value estimate, shape `[S]`.
    pub value: Tensor,
    /// Final policy, shape `[S]` of `i64` action indices.
    pub policy: Option<Tensor>,
    /// Number of performed steps.
    pub iterations: usize,
    /// Whether the last convergence check succeeded.
    pub converged: bool,
}

impl RunSummary{
    /// Final value copied to a vector of `f64`.
    pub fn value_vec(&self) -> Result<Vec<f64>, TensorError>{
        let v = self.value.f_to_kind(Kind::Double)?.to_device(Device::Cpu);
        Vec::<f64>::try_from(&v)
            .map_err(|e| TensorError::from_tch_with_context(e, "Converting value tensor to vector".into()))
    }

    /// Final policy copied to a vector of action indices, `None` when no policy exists.
    pub fn policy_vec(&self) -> Result<Option<Vec<i64>>, TensorError>{
        self.policy.as_ref().map(|p| -> Result<Vec<i64>, TensorError> {
            let p = p.f_to_kind(Kind::Int64)?.to_device(Device::Cpu);
            Vec::<i64>::try_from(&p)
                .map_err(|e| TensorError::from_tch_with_context(e, "Converting policy tensor to vector".into()))
        }).transpose()
    }
}

/// State shared by the dynamic programming solvers: borrowed model, current and previous
/// value estimate and policy, configuration.
///
/// Buffers are never modified in place, [`advance`](SolverState::advance) moves current tensors
/// to the previous slot and stores new ones. State owns its buffers exclusively: initial tensors
/// are copied on construction and only copies are handed out by `advance`.
pub struct SolverState<'a, E: MdpEnvironment>{
    env: &'a E,
    values: Tensor,
    policy: Option<Tensor>,
    old_values: Option<Tensor>,
    old_policy: Option<Tensor>,
    config: ConfigDp,
}

impl<'a, E: MdpEnvironment> SolverState<'a, E>{

    /// Validates model and initial estimates.
    /// Initial value is copied with kind and device of the reward tensor, policy is copied as [`Kind::Int64`].
    /// Policy must have integral kind.
    pub fn new(env: &'a E, init_value: Tensor, init_policy: Option<Tensor>, config: ConfigDp) -> Result<Self, BellmanError>{
        config.check()?;
        env.check_shapes()?;
        let rewards = env.rewards();
        let states = env.number_of_states() as i64;
        ShapeError::check("initial value", &init_value, &[states])?;
        let values = init_value.f_to_kind(rewards.kind())
            .map_err(|e| TensorError::from_tch_with_context(e, "Converting initial value".into()))?
            .to_device(rewards.device())
            .copy();
        let policy = match init_policy{
            Some(p) => Some(Self::prepare_policy(env, p)?),
            None => None,
        };
        Ok(Self{
            env,
            values,
            policy,
            old_values: None,
            old_policy: None,
            config,
        })
    }

    fn prepare_policy(env: &E, policy: Tensor) -> Result<Tensor, BellmanError>{
        ShapeError::check("initial policy", &policy, &[env.number_of_states() as i64])?;
        if !matches!(policy.kind(), Kind::Uint8 | Kind::Int8 | Kind::Int16 | Kind::Int | Kind::Int64){
            return Err(SetupError::NonIntegralPolicy {kind: format!("{:?}", policy.kind())}.into())
        }
        let policy = policy.f_to_kind(Kind::Int64)
            .map_err(|e| TensorError::from_tch_with_context(e, "Converting initial policy".into()))?;
        let actions = Vec::<i64>::try_from(&policy.to_device(Device::Cpu))
            .map_err(|e| TensorError::from_tch_with_context(e, "Reading initial policy".into()))?;
        let number_of_actions = env.number_of_actions();
        if let Some((state, action)) = actions.iter().enumerate()
            .find(|(_, a)| **a < 0 || **a >= number_of_actions as i64){

            return Err(SetupError::ActionOutOfRange {
                state, action: *action, number_of_actions
            }.into())
        }
        Ok(policy.to_device(env.rewards().device()).copy())
    }

    /// Fails with [`SetupError::MissingPolicy`] when policy is absent.
    pub fn require_policy(&self, algorithm: &str) -> Result<&Tensor, SetupError>{
        self.policy.as_ref().ok_or_else(|| SetupError::MissingPolicy {
            algorithm: algorithm.to_string()
        })
    }

    pub fn env(&self) -> &'a E{
        self.env
    }

    pub fn values(&self) -> &Tensor{
        &self.values
    }

    pub fn policy(&self) -> Option<&Tensor>{
        self.policy.as_ref()
    }

    pub fn old_values(&self) -> Option<&Tensor>{
        self.old_values.as_ref()
    }

    pub fn old_policy(&self) -> Option<&Tensor>{
        self.old_policy.as_ref()
    }

    pub fn config(&self) -> &ConfigDp{
        &self.config
    }

    pub fn gamma(&self) -> f64{
        self.config.discount_factor()
    }

    pub fn tolerance(&self) -> Tolerance{
        self.config.convergence_tolerance()
    }

    /// Current estimate becomes previous one, given tensors become current.
    /// Returns copies of the new tensors, not sharing storage with the state.
    pub fn advance(&mut self, values: Tensor, policy: Option<Tensor>) -> (Tensor, Option<Tensor>){
        let shared = (values.copy(), policy.as_ref().map(|p| p.copy()));
        self.old_values = Some(mem::replace(&mut self.values, values));
        self.old_policy = mem::replace(&mut self.policy, policy);
        shared
    }

    /// Action values `[S, A]` under current value estimate.
    pub fn q_values(&self) -> Result<Tensor, BellmanError>{
        Ok(bellman_q_values(self.env.rewards(), self.env.transitions(), &self.values, self.gamma())?)
    }

    /// `false` until the first [`advance`](SolverState::advance).
    pub fn values_converged(&self) -> Result<bool, BellmanError>{
        match &self.old_values{
            None => Ok(false),
            Some(old) => Ok(values_close(old, &self.values, self.tolerance())?)
        }
    }

    /// `false` until both previous and current policy exist.
    pub fn policy_converged(&self) -> Result<bool, BellmanError>{
        match (&self.old_policy, &self.policy){
            (Some(old), Some(current)) => Ok(policies_equal(old, current)?),
            _ => Ok(false)
        }
    }
}

/// Iterative solver of finite Markov decision process.
pub trait MdpSolver{

    /// Name used in log messages.
    fn name(&self) -> &'static str;

    /// Current value estimate, shape `[S]`.
    fn value(&self) -> &Tensor;

    /// Current policy, shape `[S]`, if any exists.
    fn policy(&self) -> Option<&Tensor>;

    /// Performs one update, returning new value and policy.
    fn step(&mut self) -> Result<(Tensor, Option<Tensor>), BellmanError>;

    /// Checks if solver reached fixed point. Returns `false` before first [`step`](MdpSolver::step).
    fn converge(&self) -> Result<bool, BellmanError>;

    /// Runs solver loop.
    /// + With `iteration_cap` of `None` steps until [`converge`](MdpSolver::converge) reports `true`.
    ///   __This never returns if solver does not converge.__
    /// + With `Some(n)` performs exactly `n` steps and reports if the last one converged.
    ///   `Some(0)` performs no step.
    fn run(&mut self, iteration_cap: Option<usize>) -> Result<RunSummary, BellmanError>{
        if iteration_cap == Some(0){
            return Ok(RunSummary{
                value: self.value().copy(),
                policy: self.policy().map(|p| p.copy()),
                iterations: 0,
                converged: self.converge()?,
            })
        }
        let mut iteration = 0;
        loop{
            iteration += 1;
            let (value, policy) = self.step()?;
            let converged = self.converge()?;
            #[cfg(feature = "log_debug")]
            log::debug!("{}: iteration {} finished, converged: {}", self.name(), iteration, converged);
            #[cfg(feature = "log_trace")]
            log::trace!("{}: value after iteration {}: {:?}", self.name(), iteration, value);
            match iteration_cap{
                None if converged => {
                    #[cfg(feature = "log_info")]
                    log::info!("{}: converged in {} iterations.", self.name(), iteration);
                    return Ok(RunSummary{value, policy, iterations: iteration, converged})
                },
                Some(n) if n == iteration => {
                    #[cfg(feature = "log_info")]
                    log::info!("{}: run {} iterations and the value is {}converged", self.name(), n,
                        if converged {""} else {"not "});
                    return Ok(RunSummary{value, policy, iterations: iteration, converged})
                },
                _ => {}
            }
        }
    }
}
