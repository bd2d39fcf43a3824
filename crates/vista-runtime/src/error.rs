//! Runtime errors

use thiserror::Error;
use vista_core::ConfigError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("compositor has stopped")]
    CompositorStopped,

    #[error("compositor event queue is full")]
    QueueFull,

    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to install tracing subscriber: {0}")]
    Tracing(String),
}

pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
