use tch::Tensor;
use bellman_core::env::MdpEnvironment;
use bellman_core::error::BellmanError;
use crate::config::ConfigDp;
use crate::operators::{bellman_q_values, greedy};
use crate::solver::{MdpSolver, SolverState};

/// Value iteration. Every step applies Bellman optimality operator to the whole value estimate:
/// `V[s] = max_a (R[s, a] + gamma * sum_s' T[s, a, s'] * V_old[s'])`, policy is the maximising action.
/// Converged when consecutive value estimates are element-wise close.
pub struct ValueIteration<'a, E: MdpEnvironment>{
    state: SolverState<'a, E>,
}

impl<'a, E: MdpEnvironment> ValueIteration<'a, E>{

    /// Initial policy is optional, it is replaced by the greedy one after first step.
    pub fn new(env: &'a E, init_value: Tensor, init_policy: Option<Tensor>, gamma: f64) -> Result<Self, BellmanError>{
        Self::with_config(env, init_value, init_policy, ConfigDp::new(gamma))
    }

    pub fn with_config(env: &'a E, init_value: Tensor, init_policy: Option<Tensor>, config: ConfigDp) -> Result<Self, BellmanError>{
        Ok(Self{
            state: SolverState::new(env, init_value, init_policy, config)?
        })
    }

    pub fn state(&self) -> &SolverState<'a, E>{
        &self.state
    }

    /// Action values under current value estimate.
    pub fn q_values(&self) -> Result<Tensor, BellmanError>{
        self.state.q_values()
    }
}

impl<E: MdpEnvironment> MdpSolver for ValueIteration<'_, E>{
    fn name(&self) -> &'static str {
        "value iteration"
    }

    fn value(&self) -> &Tensor {
        self.state.values()
    }

    fn policy(&self) -> Option<&Tensor> {
        self.state.policy()
    }

    fn step(&mut self) -> Result<(Tensor, Option<Tensor>), BellmanError> {
        let env = self.state.env();
        let q = bellman_q_values(env.rewards(), env.transitions(), self.state.values(), self.state.gamma())?;
        let (values, policy) = greedy(&q)?;
        Ok(self.state.advance(values, Some(policy)))
    }

    fn converge(&self) -> Result<bool, BellmanError> {
        self.state.values_converged()
    }
}
