use thiserror::Error;

use crate::app::config::ConfigError;

/// Top-level error type for the bridge.
///
/// Log callers never see these; only setup and shutdown return them.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No tokio runtime available to spawn dispatch workers")]
    NoRuntime,

    #[error("A global logger is already installed: {0}")]
    LoggerAlreadySet(#[from] log::SetLoggerError),

    #[error("Drain timed out after {timeout_ms}ms with {pending} events still queued")]
    DrainTimeout { timeout_ms: u64, pending: usize },
}
