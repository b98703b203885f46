pub mod config;
pub mod initialization;
pub mod installer;
pub mod logging_system;
pub mod stdin;

pub use config::{BridgeConfig, ConfigError, LogFormat, LogLevel};
pub use initialization::InitializationError;
pub use installer::Bridge;
pub use logging_system::{LoggingSystem, setup_logging_safe};

use crate::sink::TracingSink;
use clap::Parser;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> anyhow::Result<()> {
    let config = BridgeConfig::parse().finalize()?;

    setup_logging_safe(config.log_level, config.log_format, &config.log_directives)?;
    info!("Starting rask-log-bridge v{}", get_version());
    info!(
        "Configuration: workers={}, queue_capacity={}, dispatch_timeout={}s",
        config.workers, config.queue_capacity, config.dispatch_timeout_secs
    );

    let bridge = Bridge::new(&config, Arc::new(TracingSink::new()))?;
    bridge.install_global()?;

    let hook = bridge.hook();
    let lines = stdin::forward_lines(BufReader::new(tokio::io::stdin()), hook.as_ref());
    tokio::select! {
        result = lines => {
            let forwarded = result?;
            info!(forwarded, "Input closed");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        }
    }

    let snapshot = bridge.shutdown().await?;
    info!(
        accepted = snapshot.accepted,
        delivered = snapshot.delivered,
        unrouted = snapshot.unrouted,
        dropped_full = snapshot.dropped_full,
        timed_out = snapshot.timed_out,
        "rask-log-bridge stopped"
    );
    Ok(())
}
