use thiserror::Error;

/// Which step of loading or saving a config went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to write config: {0}")]
    Write(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("config validation error: {0}")]
    Invalid(String),
}
