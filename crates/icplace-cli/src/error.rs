use icplace::engine::config::{ConfigError, ConfigLoadError};
use icplace::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ConfigLoad(#[from] ConfigLoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
