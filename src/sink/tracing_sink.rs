use super::LogSink;
use crate::domain::{Fields, SinkLevel};
use std::future::Future;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub const FORWARDED_TARGET: &str = "rask_log_bridge::forwarded";

/// Writes forwarded events through the process-wide `tracing` dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn write<'a>(
        &'a self,
        scope: &'a CancellationToken,
        level: SinkLevel,
        message: &'a str,
        fields: &'a Fields,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if scope.is_cancelled() {
                return;
            }

            let pipe = fields.pipe();
            match level {
                SinkLevel::Debug => debug!(target: FORWARDED_TARGET, pipe, "{message}"),
                SinkLevel::Info => info!(target: FORWARDED_TARGET, pipe, "{message}"),
                SinkLevel::Warn => warn!(target: FORWARDED_TARGET, pipe, "{message}"),
                SinkLevel::Error => error!(target: FORWARDED_TARGET, pipe, "{message}"),
            }
        })
    }
}
