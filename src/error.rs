use std::path::PathBuf;
use thiserror::Error;

/// Why a submission was turned away. Neither case touches core state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("input is empty after trimming")]
    Empty,
    #[error("an analysis is already in flight")]
    Busy,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("analysis task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SessionLogError {
    #[error("session log I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session log serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
