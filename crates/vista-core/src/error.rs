//! Error types for Vista
//!
//! Layout derivation has no failure path. Errors only arise while loading
//! configuration.

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Empty value for {0}")]
    EmptyField(&'static str),

    #[error("Invalid colour for {field}: {value}")]
    InvalidColour { field: &'static str, value: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
