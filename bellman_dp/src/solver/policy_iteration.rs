use tch::Tensor;
use bellman_core::env::MdpEnvironment;
use bellman_core::error::{BellmanError, SetupError, TensorError};
use crate::config::ConfigDp;
use crate::operators::{bellman_q_values, PolicyModel};
use crate::solver::{MdpSolver, SolverState};

const NAME: &str = "policy iteration";

/// Policy iteration with a single evaluation sweep per iteration.
///
/// Every step:
/// 1. evaluates previous policy with __one__ synchronous sweep
///    `V[s] = R[s, pi_old[s]] + gamma * sum_s' T[s, pi_old[s], s'] * V_old[s']`;
/// 2. improves policy greedily against the new value.
///
/// Unlike textbook policy iteration the evaluation is not solved to convergence, so the value
/// estimate keeps moving after the policy settles. Use [`ModifiedPolicyIteration`](crate::solver::ModifiedPolicyIteration)
/// for more sweeps per step. Converged when two consecutive policies are identical.
pub struct PolicyIteration<'a, E: MdpEnvironment>{
    state: SolverState<'a, E>,
}

impl<'a, E: MdpEnvironment> PolicyIteration<'a, E>{

    /// `init_policy` is required, `None` yields [`SetupError::MissingPolicy`].
    pub fn new(env: &'a E, init_value: Tensor, init_policy: Option<Tensor>, gamma: f64) -> Result<Self, BellmanError>{
        Self::with_config(env, init_value, init_policy, ConfigDp::new(gamma))
    }

    pub fn with_config(env: &'a E, init_value: Tensor, init_policy: Option<Tensor>, config: ConfigDp) -> Result<Self, BellmanError>{
        if init_policy.is_none(){
            #[cfg(feature = "log_error")]
            log::error!("Policy iteration constructed without initial policy");
            return Err(SetupError::MissingPolicy {algorithm: NAME.into()}.into())
        }
        Ok(Self{
            state: SolverState::new(env, init_value, init_policy, config)?
        })
    }

    pub fn state(&self) -> &SolverState<'a, E>{
        &self.state
    }

    pub fn q_values(&self) -> Result<Tensor, BellmanError>{
        self.state.q_values()
    }
}

impl<E: MdpEnvironment> MdpSolver for PolicyIteration<'_, E>{
    fn name(&self) -> &'static str {
        NAME
    }

    fn value(&self) -> &Tensor {
        self.state.values()
    }

    fn policy(&self) -> Option<&Tensor> {
        self.state.policy()
    }

    fn step(&mut self) -> Result<(Tensor, Option<Tensor>), BellmanError> {
        let env = self.state.env();
        let (rewards, transitions) = (env.rewards(), env.transitions());
        let gamma = self.state.gamma();
        let old_policy = self.state.require_policy(NAME)?;

        let model = PolicyModel::new(rewards, transitions, old_policy)?;
        let values = model.sweep(self.state.values(), gamma)?;

        let policy = bellman_q_values(rewards, transitions, &values, gamma)?
            .f_argmax(1, false)
            .map_err(|e| TensorError::from_tch_with_context(e, "Policy improvement (argmax)".into()))?;

        Ok(self.state.advance(values, Some(policy)))
    }

    fn converge(&self) -> Result<bool, BellmanError> {
        self.state.policy_converged()
    }
}
