//! Configuration errors

use super::spec::SpecError;

/// Errors that can occur while loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid library specification: {0}")]
    Spec(#[from] SpecError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
