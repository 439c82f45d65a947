use std::path::PathBuf;
use log::LevelFilter;

/// Installs `fern` dispatcher writing to stdout or to `log_file`.
/// `log_level` applies to binaries and this crate, `solver_log_level` to `bellman_core` and `bellman_dp`.
pub fn setup_logger(log_level: LevelFilter, solver_log_level: LevelFilter, log_file: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let dispatch  = fern::Dispatch::new()

        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log_level)
        .level_for("bellman_examples", log_level)
        .level_for("bellman_core", solver_log_level)
        .level_for("bellman_dp", solver_log_level);

    match log_file{
        None => dispatch.chain(std::io::stdout()),
        Some(f) => dispatch.chain(fern::log_file(f)?)
    }
        .apply()?;
    Ok(())
}
