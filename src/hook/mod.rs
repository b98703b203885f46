//! `log` facade side of the bridge.
//!
//! `HookLogger` is the `log::Log` implementation installed as the global
//! logger. It fans every record out to the registered `Hook`s whose levels
//! include the record's severity. `ForwardingHook` is the hook that hands
//! events to the dispatcher.

pub mod forwarding;
pub mod logger;

use crate::domain::{BridgeError, Severity};

pub use forwarding::ForwardingHook;
pub use logger::HookLogger;

/// A log entry as seen by a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEntry {
    pub severity: Severity,
    pub message: String,
}

impl HookEntry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

impl From<&log::Record<'_>> for HookEntry {
    fn from(record: &log::Record<'_>) -> Self {
        Self {
            severity: record.level().into(),
            message: record.args().to_string(),
        }
    }
}

/// Callback invoked for every entry whose severity is in `levels()`.
pub trait Hook: Send + Sync {
    fn levels(&self) -> &'static [Severity];

    fn fire(&self, entry: &HookEntry) -> Result<(), BridgeError>;
}
