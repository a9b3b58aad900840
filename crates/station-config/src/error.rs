//! Configuration errors.

use thiserror::Error;

/// Failures loading or validating a [`StationConfig`](crate::StationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// [`ConfigLoader::load_or_default`](crate::ConfigLoader::load_or_default)
    /// treats this as "use the defaults".
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// First error reported by the validator, keyed by its dotted path.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A `${VAR}` reference in the file has no value.
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
