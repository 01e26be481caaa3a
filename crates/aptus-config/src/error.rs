//! Configuration errors.

use thiserror::Error;

/// Errors loading or validating `aptus.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Validation errors, joined as `path: message; ...`.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// A `${VAR}` reference names an unset variable.
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),
}
