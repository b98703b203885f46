//! Severity forwarder.
//!
//! Log callers hand events to a `DispatchHandle`, which routes them through
//! the severity table and queues them without ever blocking. A fixed pool of
//! workers drains the queue into a `LogSink`, giving each write its own
//! bounded-duration scope. Delivery order across workers is not preserved.

pub mod dispatcher;
pub mod stats;

pub use dispatcher::{DispatchConfig, DispatchHandle, Dispatcher};
pub use stats::{DispatchSnapshot, DispatchStats};
