use bellman_core::demo::{corridor, grid_world, two_state_uniform, GridWorldConfig};
use bellman_core::env::{MdpEnvironment, TabularEnvironment};
use bellman_core::tch::{Kind, Tensor};
use bellman_dp::config::{ConfigDp, ConfigModifiedPolicyIteration, Tolerance};
use bellman_dp::solver::{MdpSolver, ModifiedPolicyIteration, PolicyIteration, RunSummary, ValueIteration};
use crate::error::ExampleError;
use crate::loading::load_environment;
use crate::options::{Algorithm, EnvironmentArgs, EnvironmentKind, SolverArgs};

pub fn build_environment(args: &EnvironmentArgs) -> Result<TabularEnvironment, ExampleError>{
    let env = match args.environment{
        EnvironmentKind::TwoState => two_state_uniform()?,
        EnvironmentKind::Corridor => corridor(args.size, 10.0, args.step_cost)?,
        EnvironmentKind::GridWorld => {
            let side = args.size.max(2);
            grid_world(&GridWorldConfig{
                width: side,
                height: side,
                slip: args.slip,
                goal: (side - 1, side - 1),
                pit: Some((side / 2, side / 2 - 1)),
                ..Default::default()
            })?
        },
        EnvironmentKind::File => {
            let path = args.file.as_ref().ok_or(ExampleError::MissingFile)?;
            load_environment(path)?
        }
    };
    log::info!("Environment with {} states and {} actions", env.number_of_states(), env.number_of_actions());
    Ok(env)
}

fn dp_config(args: &SolverArgs) -> ConfigDp{
    ConfigDp::new(args.gamma).with_tolerance(Tolerance::new(args.rtol, args.atol))
}

/// Zero value and policy choosing action `0` everywhere.
pub fn initial_estimates<E: MdpEnvironment>(env: &E) -> (Tensor, Tensor){
    let states = env.number_of_states() as i64;
    let options = (env.rewards().kind(), env.rewards().device());
    (Tensor::zeros([states], options), Tensor::zeros([states], (Kind::Int64, options.1)))
}

/// Runs modified policy iteration with `sweeps` evaluation sweeps.
pub fn solve_modified<E: MdpEnvironment>(env: &E, args: &SolverArgs, sweeps: usize) -> Result<RunSummary, ExampleError>{
    let (values, policy) = initial_estimates(env);
    let config = ConfigModifiedPolicyIteration::new(args.gamma, sweeps)
        .with_tolerance(Tolerance::new(args.rtol, args.atol));
    let mut solver = ModifiedPolicyIteration::with_config(env, values, Some(policy), config)?;
    Ok(solver.run(args.iterations)?)
}

pub fn solve<E: MdpEnvironment>(env: &E, algorithm: Algorithm, args: &SolverArgs) -> Result<RunSummary, ExampleError>{
    let (values, policy) = initial_estimates(env);
    let summary = match algorithm{
        Algorithm::Value => ValueIteration::with_config(env, values, None, dp_config(args))?.run(args.iterations)?,
        Algorithm::Policy => PolicyIteration::with_config(env, values, Some(policy), dp_config(args))?.run(args.iterations)?,
        Algorithm::Modified => return solve_modified(env, args, args.sweeps),
    };
    Ok(summary)
}

/// Human readable table of value and policy.
pub fn format_summary(summary: &RunSummary) -> Result<String, ExampleError>{
    let values = summary.value_vec().map_err(bellman_core::error::BellmanError::from)?;
    let policy = summary.policy_vec().map_err(bellman_core::error::BellmanError::from)?;
    let mut out = format!("iterations: {}, converged: {}\n", summary.iterations, summary.converged);
    for (s, v) in values.iter().enumerate(){
        match &policy{
            Some(p) => out.push_str(&format!("{s:>4} {v:>14.6} {:>4}\n", p[s])),
            None => out.push_str(&format!("{s:>4} {v:>14.6}    -\n")),
        }
    }
    Ok(out)
}
