//! Error types for loading and building extractor configuration.

use layered_keyphrase::KeyphraseError;
use thiserror::Error;

/// Errors that can occur while reading a configuration or turning it into
/// pipelines.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid TOML or does not fit the schema.
    #[error("failed to parse config: {message}")]
    Parse { message: String },

    /// The configuration file could not be read.
    #[error("failed to load config: {path}: {message}")]
    Load { path: String, message: String },

    /// A pipeline names a stage that does not exist.
    #[error("pipeline `{pipeline}` uses unknown stage `{name}`")]
    UnknownStage { pipeline: String, name: String },

    /// A generator tag pattern is not a valid regular expression.
    #[error("invalid tag pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for KeyphraseError {
    fn from(err: ConfigError) -> Self {
        KeyphraseError::Configuration(err.to_string())
    }
}
