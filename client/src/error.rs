use std::io;

use thiserror::Error;

use common::ConfigError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode grid: {0}")]
    Json(#[from] serde_json::Error),
}
