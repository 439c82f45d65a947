use std::path::PathBuf;
use clap::{Args, Parser, ValueEnum};
use log::LevelFilter;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Algorithm{
    Value,
    Policy,
    Modified,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnvironmentKind{
    TwoState,
    Corridor,
    GridWorld,
    File,
}

#[derive(Args, Clone, Debug)]
pub struct LoggingArgs{
    #[arg(short = 'v', long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    #[arg(short = 'a', long = "log-level-solver", default_value = "info")]
    pub log_level_solver: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct EnvironmentArgs{
    #[arg(short = 'e', long = "environment", value_enum, default_value = "two-state")]
    pub environment: EnvironmentKind,

    /// Environment description (`.json`, `.yaml` or `.yml`), used with `--environment file`.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Corridor length or grid world side.
    #[arg(short = 's', long = "size", default_value = "4")]
    pub size: usize,

    /// Grid world slip probability.
    #[arg(long = "slip", default_value = "0.2")]
    pub slip: f64,

    /// Corridor step cost.
    #[arg(long = "step-cost", default_value = "1.0")]
    pub step_cost: f64,
}

#[derive(Args, Clone, Debug)]
pub struct SolverArgs{
    #[arg(short = 'g', long = "gamma", default_value = "0.9")]
    pub gamma: f64,

    /// Exact number of iterations, run until convergence if absent.
    #[arg(short = 'i', long = "iterations")]
    pub iterations: Option<usize>,

    /// Evaluation sweeps of modified policy iteration.
    #[arg(short = 'k', long = "sweeps", default_value = "5")]
    pub sweeps: usize,

    #[arg(long = "rtol", default_value = "1e-5")]
    pub rtol: f64,

    #[arg(long = "atol", default_value = "1e-8")]
    pub atol: f64,
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Solve Markov decision process with dynamic programming", long_about = None)]
pub struct SolveOptions{
    #[command(flatten)]
    pub logging: LoggingArgs,

    #[command(flatten)]
    pub environment: EnvironmentArgs,

    #[command(flatten)]
    pub solver: SolverArgs,

    #[arg(short = 'A', long = "algorithm", value_enum, default_value = "value")]
    pub algorithm: Algorithm,

    /// Write the used environment description to file (`.json`, `.yaml` or `.yml`).
    #[arg(long = "dump-environment")]
    pub dump_environment: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Compare dynamic programming solvers on one environment", long_about = None)]
pub struct CompareOptions{
    #[command(flatten)]
    pub logging: LoggingArgs,

    #[command(flatten)]
    pub environment: EnvironmentArgs,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Sweep counts of modified policy iteration to compare.
    #[arg(long = "sweep-counts", value_delimiter = ',', num_args = 1.., default_value = "1,5,20")]
    pub sweep_counts: Vec<usize>,
}
