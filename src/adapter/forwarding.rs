use super::FormatLogger;
use crate::dispatch::DispatchHandle;
use crate::domain::{LogEvent, Pipe, Severity};
use std::fmt;

/// `FormatLogger` that forwards to the dispatcher, tagged `rigTFLogLogger`.
#[derive(Debug, Clone)]
pub struct ForwardingLogger {
    dispatch: DispatchHandle,
}

impl ForwardingLogger {
    pub fn new(dispatch: DispatchHandle) -> Self {
        Self { dispatch }
    }

    fn fire(&self, severity: Severity, args: fmt::Arguments<'_>) {
        // Resolve the format on the caller's thread; the event owns its message
        self.dispatch
            .dispatch(LogEvent::new(fmt::format(args), severity, Pipe::Adapter));
    }
}

impl FormatLogger for ForwardingLogger {
    fn tracef(&self, args: fmt::Arguments<'_>) {
        self.fire(Severity::Trace, args);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.fire(Severity::Debug, args);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.fire(Severity::Info, args);
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.fire(Severity::Warn, args);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.fire(Severity::Error, args);
    }
}
