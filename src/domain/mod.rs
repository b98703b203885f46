//! Domain layer for rask-log-bridge.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEvent`: One forwarded log line, consumed once by a dispatch worker
//! - `Severity`: Upstream severity (Trace/Debug/Info/Warn/Error/Fatal/Panic)
//! - `SinkLevel`: The four downstream levels and the static routing table
//! - `BridgeError`: Top-level error type

pub mod error;
pub mod fields;
pub mod log_event;
pub mod routing;
pub mod severity;

pub use error::BridgeError;
pub use fields::Fields;
pub use log_event::{LogEvent, Pipe};
pub use routing::{SinkLevel, route};
pub use severity::Severity;
