use super::{Hook, HookEntry};
use crate::dispatch::DispatchHandle;
use crate::domain::{BridgeError, LogEvent, Pipe, Severity};

/// Hook that forwards every entry to the dispatcher, tagged `logrusTFLogFire`.
#[derive(Debug, Clone)]
pub struct ForwardingHook {
    dispatch: DispatchHandle,
}

impl ForwardingHook {
    pub fn new(dispatch: DispatchHandle) -> Self {
        Self { dispatch }
    }
}

impl Hook for ForwardingHook {
    fn levels(&self) -> &'static [Severity] {
        Severity::ALL
    }

    /// Always succeeds; what happens downstream is not reported back.
    fn fire(&self, entry: &HookEntry) -> Result<(), BridgeError> {
        self.dispatch.dispatch(LogEvent::new(
            entry.message.clone(),
            entry.severity,
            Pipe::Hook,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{DispatchConfig, Dispatcher};
    use crate::domain::SinkLevel;
    use crate::test_support::RecordingSink;
    use std::sync::Arc;

    #[test]
    fn test_subscribes_to_all_levels() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();
        let dispatcher =
            Dispatcher::start(DispatchConfig::default(), Arc::new(RecordingSink::new())).unwrap();

        let hook = ForwardingHook::new(dispatcher.handle());
        assert_eq!(hook.levels(), Severity::ALL);
    }

    #[tokio::test]
    async fn test_fire_maps_severities() {
        let sink = Arc::new(RecordingSink::new());
        let dispatcher = Dispatcher::start(DispatchConfig::default(), sink.clone()).unwrap();
        let hook = ForwardingHook::new(dispatcher.handle());

        for severity in Severity::ALL {
            assert!(hook.fire(&HookEntry::new(*severity, severity.as_str())).is_ok());
        }

        dispatcher.shutdown().await.unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 6, "trace must not reach the sink");
        for record in &records {
            let expected = match record.message.as_str() {
                "debug" => SinkLevel::Debug,
                "info" => SinkLevel::Info,
                "warn" => SinkLevel::Warn,
                "error" | "fatal" | "panic" => SinkLevel::Error,
                other => panic!("Unexpected message {other}"),
            };
            assert_eq!(record.level, expected);
            assert_eq!(record.pipe(), "logrusTFLogFire");
        }
    }
}
