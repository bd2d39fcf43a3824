//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::{RuntimeError, RuntimeResult};

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Install the global subscriber. `RUST_LOG` overrides `default_level`.
/// Fails if a subscriber is already installed.
pub fn init_tracing(format: LogFormat, default_level: &str) -> RuntimeResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| RuntimeError::Tracing(e.to_string()))
}
