use super::routing::{SinkLevel, route};
use super::severity::Severity;
use serde::{Deserialize, Serialize};

pub const HOOK_PIPE: &str = "logrusTFLogFire";
pub const ADAPTER_PIPE: &str = "rigTFLogLogger";

/// Which call site produced a forwarded event.
///
/// Attached downstream as the `pipe` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pipe {
    /// Fired by a hook registered on the `log` facade.
    Hook,
    /// Emitted through a `FormatLogger` method.
    Adapter,
}

impl Pipe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pipe::Hook => HOOK_PIPE,
            Pipe::Adapter => ADAPTER_PIPE,
        }
    }
}

/// A single log line on its way to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub message: String,
    pub severity: Severity,
    pub pipe: Pipe,
}

impl LogEvent {
    pub fn new(message: impl Into<String>, severity: Severity, pipe: Pipe) -> Self {
        Self {
            message: message.into(),
            severity,
            pipe,
        }
    }

    pub fn sink_level(&self) -> Option<SinkLevel> {
        route(self.severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_tags() {
        assert_eq!(Pipe::Hook.as_str(), "logrusTFLogFire");
        assert_eq!(Pipe::Adapter.as_str(), "rigTFLogLogger");
    }

    #[test]
    fn test_event_sink_level_follows_routing() {
        let event = LogEvent::new("boom", Severity::Panic, Pipe::Hook);
        assert_eq!(event.sink_level(), Some(SinkLevel::Error));

        let event = LogEvent::new("ping", Severity::Trace, Pipe::Adapter);
        assert_eq!(event.sink_level(), None);
    }
}
