use tch::Tensor;
use bellman_core::env::MdpEnvironment;
use bellman_core::error::{BellmanError, SetupError};
use crate::config::ConfigModifiedPolicyIteration;
use crate::operators::{bellman_q_values, greedy, PolicyModel};
use crate::solver::{MdpSolver, SolverState};

const NAME: &str = "modified policy iteration";

/// Modified policy iteration.
///
/// Every step performs `evaluation_sweeps` chained synchronous evaluation sweeps of the current
/// policy, starting from the current value, and then one value iteration update on the evaluated
/// value, which yields both the new value and the new greedy policy.
/// Convergence compares the value produced by the step with the value the step started from.
///
/// With one sweep a step is __not__ equal to a value iteration step: it is an evaluation sweep
/// followed by a value iteration step.
pub struct ModifiedPolicyIteration<'a, E: MdpEnvironment>{
    state: SolverState<'a, E>,
    evaluation_sweeps: usize,
}

impl<'a, E: MdpEnvironment> ModifiedPolicyIteration<'a, E>{

    pub fn new(env: &'a E, init_value: Tensor, init_policy: Option<Tensor>, gamma: f64, evaluation_sweeps: usize)
        -> Result<Self, BellmanError>{
        Self::with_config(env, init_value, init_policy, ConfigModifiedPolicyIteration::new(gamma, evaluation_sweeps))
    }

    pub fn with_config(env: &'a E, init_value: Tensor, init_policy: Option<Tensor>, config: ConfigModifiedPolicyIteration)
        -> Result<Self, BellmanError>{
        config.check()?;
        if init_policy.is_none(){
            #[cfg(feature = "log_error")]
            log::error!("Modified policy iteration constructed without initial policy");
            return Err(SetupError::MissingPolicy {algorithm: NAME.into()}.into())
        }
        Ok(Self{
            state: SolverState::new(env, init_value, init_policy, config.dp())?,
            evaluation_sweeps: config.evaluation_sweeps(),
        })
    }

    pub fn evaluation_sweeps(&self) -> usize{
        self.evaluation_sweeps
    }

    pub fn state(&self) -> &SolverState<'a, E>{
        &self.state
    }

    pub fn q_values(&self) -> Result<Tensor, BellmanError>{
        self.state.q_values()
    }
}

impl<E: MdpEnvironment> MdpSolver for ModifiedPolicyIteration<'_, E>{
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

        let model = PolicyModel::new(rewards, transitions, self.state.require_policy(NAME)?)?;
        let mut evaluated = model.sweep(self.state.values(), gamma)?;
        for _ in 1..self.evaluation_sweeps{
            evaluated = model.sweep(&evaluated, gamma)?;
        }
        #[cfg(feature = "log_trace")]
        log::trace!("{NAME}: value after {} evaluation sweeps: {:?}", self.evaluation_sweeps, evaluated);

        let q = bellman_q_values(rewards, transitions, &evaluated, gamma)?;
        let (values, policy) = greedy(&q)?;
        Ok(self.state.advance(values, Some(policy)))
    }

    fn converge(&self) -> Result<bool, BellmanError> {
        self.state.values_converged()
    }
}

#[cfg(test)]
mod tests{
    use tch::Tensor;
    use bellman_core::demo::{grid_world, two_state_uniform, GridWorldConfig};
    use bellman_core::env::MdpEnvironment;
    use bellman_core::error::{BellmanError, SetupError};
    use crate::operators::{bellman_q_values, evaluation_sweep, greedy};
    use crate::solver::testing::*;
    use crate::solver::{MdpSolver, ModifiedPolicyIteration, ValueIteration};

    #[test]
    fn setup_errors(){
        let env = two_state_uniform().unwrap();
        assert!(matches!(
            ModifiedPolicyIteration::new(&env, zeros(2), None, 0.9, 3),
            Err(BellmanError::Setup {source: SetupError::MissingPolicy {..}})
        ));
        assert!(matches!(
            ModifiedPolicyIteration::new(&env, zeros(2), Some(actions(&[0, 0])), 0.9, 0),
            Err(BellmanError::Setup {source: SetupError::ZeroEvaluationSweeps})
        ));
    }

    #[test]
    fn step_chains_sweeps_before_improvement(){
        let env = two_state_uniform().unwrap();
        let mut solver = ModifiedPolicyIteration::new(&env, zeros(2), Some(actions(&[0, 0])), 0.9, 2).unwrap();
        assert!(!solver.converge().unwrap());
        let (v, pi) = solver.step().unwrap();
        // sweeps: [5, -1] then [6.8, 0.8], improvement adds 0.45 * 7.6 to R[s, 1]
        assert_close(&to_vec(&v), &[13.42, 5.42], 1e-12);
        assert_eq!(to_actions(&pi.unwrap()), vec![1, 1]);
        assert_close(&to_vec(solver.state().old_values().unwrap()), &[0.0, 0.0], 0.0);
    }

    #[test]
    fn single_sweep_is_evaluation_then_value_iteration(){
        let config = GridWorldConfig::default();
        let env = grid_world(&config).unwrap();
        let states = env.number_of_states();
        let policy = actions(&vec![2; states]);
        let init = filled(states, 0.3);

        let mut mpi = ModifiedPolicyIteration::new(&env, init.shallow_clone(), Some(policy.shallow_clone()), 0.95, 1).unwrap();
        let (mpi_value, mpi_policy) = mpi.step().unwrap();

        let evaluated = evaluation_sweep(env.rewards(), env.transitions(), &policy, &init, 0.95).unwrap();
        let q = bellman_q_values(env.rewards(), env.transitions(), &evaluated, 0.95).unwrap();
        let (expected_value, expected_policy) = greedy(&q).unwrap();
        assert_close(&to_vec(&mpi_value), &to_vec(&expected_value), 1e-12);
        assert_eq!(to_actions(&mpi_policy.unwrap()), to_actions(&expected_policy));

        // and it differs from a plain value iteration step
        let mut vi = ValueIteration::new(&env, init, None, 0.95).unwrap();
        let (vi_value, _) = vi.step().unwrap();
        let differs = to_vec(&vi_value).iter().zip(to_vec(&mpi_value))
            .any(|(a, b)| (a - b).abs() > 1e-9);
        assert!(differs);
    }

    #[test]
    fn fixed_point_converges_on_first_check(){
        let env = ring(4);
        let mut solver = ModifiedPolicyIteration::new(&env, filled(4, 100.0), Some(actions(&[1; 4])), 0.9, 3).unwrap();
        solver.step().unwrap();
        assert!(solver.converge().unwrap());
        assert_close(&to_vec(solver.value()), &[100.0; 4], 1e-9);
    }

    #[test]
    fn two_state_reaches_optimum(){
        let env = two_state_uniform().unwrap();
        let mut solver = ModifiedPolicyIteration::new(&env, zeros(2), Some(actions(&[0, 0])), 0.9, 5).unwrap();
        let summary = solver.run(None).unwrap();
        assert!(summary.converged);
        assert_eq!(summary.policy_vec().unwrap(), Some(vec![1, 1]));
        assert_close(&summary.value_vec().unwrap(), &[64.0, 56.0], 1e-2);
    }

    #[test]
    fn more_sweeps_need_fewer_iterations(){
        let env = two_state_uniform().unwrap();
        let mut vi = ValueIteration::new(&env, zeros(2), None, 0.9).unwrap();
        let mut mpi = ModifiedPolicyIteration::new(&env, zeros(2), Some(actions(&[1, 1])), 0.9, 10).unwrap();
        let vi = vi.run(None).unwrap();
        let mpi = mpi.run(None).unwrap();
        assert!(mpi.iterations < vi.iterations);
    }

    #[test]
    fn extra_step_keeps_converged_value(){
        let env = two_state_uniform().unwrap();
        let mut solver = ModifiedPolicyIteration::new(&env, zeros(2), Some(actions(&[1, 1])), 0.9, 4).unwrap();
        solver.run(None).unwrap();
        solver.step().unwrap();
        assert!(solver.converge().unwrap());
    }

    #[test]
    fn value_tensor_kind_follows_rewards(){
        let env = two_state_uniform().unwrap();
        let solver = ModifiedPolicyIteration::new(&env, Tensor::from_slice(&[0.0f32, 0.0]), Some(actions(&[1, 1])), 0.9, 2).unwrap();
        assert_eq!(solver.value().kind(), env.rewards().kind());
    }
}
