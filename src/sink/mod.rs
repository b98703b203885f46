pub mod tracing_sink;

use crate::domain::{Fields, SinkLevel};
use std::future::Future;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

pub use tracing_sink::TracingSink;

/// Downstream leveled log sink.
///
/// Every write carries a cancellation scope bounding how long the sink may
/// take, the message, and the supplementary fields. Writes cannot fail from
/// the bridge's point of view; a sink that can fail must swallow the error.
///
/// This trait is dyn-compatible by using boxed futures instead of `impl Future`.
pub trait LogSink: Send + Sync {
    fn write<'a>(
        &'a self,
        scope: &'a CancellationToken,
        level: SinkLevel,
        message: &'a str,
        fields: &'a Fields,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}
