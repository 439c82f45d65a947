use std::path::PathBuf;
use thiserror::Error;
use bellman_core::error::BellmanError;

/// Errors of the command line front end.
#[derive(Debug, Error)]
pub enum ExampleError{
    #[error("Solver error: {0}")]
    Bellman(#[from] BellmanError),
    #[error("Failed accessing file {path:?}: {source}")]
    Io{
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed parsing JSON environment description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed parsing YAML environment description: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unsupported environment file extension of {0:?}, expected .json, .yaml or .yml")]
    UnknownFormat(PathBuf),
    #[error("Environment file is required for environment kind 'file'")]
    MissingFile,
}
