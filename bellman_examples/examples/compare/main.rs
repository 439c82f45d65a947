use std::time::Instant;
use clap::Parser;
use bellman_examples::options::{Algorithm, CompareOptions};
use bellman_examples::runner::{build_environment, solve, solve_modified};
use bellman_examples::setup::setup_logger;

fn main() -> anyhow::Result<()>{
    let cli = CompareOptions::parse();
    setup_logger(cli.logging.log_level, cli.logging.log_level_solver, &cli.logging.log_file)?;

    let env = build_environment(&cli.environment)?;

    let mut rows = Vec::new();
    for algorithm in [Algorithm::Value, Algorithm::Policy]{
        let start = Instant::now();
        let summary = solve(&env, algorithm, &cli.solver)?;
        rows.push((format!("{algorithm:?}"), summary, start.elapsed()));
    }
    for sweeps in &cli.sweep_counts{
        let start = Instant::now();
        let summary = solve_modified(&env, &cli.solver, *sweeps)?;
        rows.push((format!("Modified(k={sweeps})"), summary, start.elapsed()));
    }

    let reference = rows.first().map(|(_, s, _)| s.value_vec()).transpose()?.unwrap_or_default();
    println!("{:<18} {:>10} {:>10} {:>14} {:>12}", "algorithm", "iterations", "converged", "max |dV|", "time [ms]");
    for (name, summary, elapsed) in rows{
        let values = summary.value_vec()?;
        let difference = values.iter().zip(reference.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        log::debug!("{name}: policy {:?}", summary.policy_vec()?);
        println!("{:<18} {:>10} {:>10} {:>14.3e} {:>12.3}",
            name, summary.iterations, summary.converged, difference, elapsed.as_secs_f64() * 1000.0);
    }
    Ok(())
}
