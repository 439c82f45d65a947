use clap::Parser;
use bellman_examples::loading::save_description;
use bellman_examples::options::SolveOptions;
use bellman_examples::runner::{build_environment, format_summary, solve};
use bellman_examples::setup::setup_logger;

fn main() -> anyhow::Result<()>{
    let cli = SolveOptions::parse();
    setup_logger(cli.logging.log_level, cli.logging.log_level_solver, &cli.logging.log_file)?;

    let env = build_environment(&cli.environment)?;
    if let Some(path) = &cli.dump_environment{
        save_description(path, &env.describe()?)?;
        log::info!("Environment description written to {:?}", path);
    }

    log::info!("Solving with {:?}, gamma = {}", cli.algorithm, cli.solver.gamma);
    let summary = solve(&env, cli.algorithm, &cli.solver)?;
    if !summary.converged{
        log::warn!("Solver did not converge in {} iterations", summary.iterations);
    }
    print!("{}", format_summary(&summary)?);
    Ok(())
}
