use super::severity::Severity;
use serde::{Deserialize, Serialize};

/// The four levels a `LogSink` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl SinkLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkLevel::Debug => "debug",
            SinkLevel::Info => "info",
            SinkLevel::Warn => "warn",
            SinkLevel::Error => "error",
        }
    }
}

impl From<SinkLevel> for tracing::Level {
    fn from(level: SinkLevel) -> Self {
        match level {
            SinkLevel::Debug => tracing::Level::DEBUG,
            SinkLevel::Info => tracing::Level::INFO,
            SinkLevel::Warn => tracing::Level::WARN,
            SinkLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Severity routing table, indexed in `Severity` declaration order.
///
/// Trace has no downstream level and is dropped on every path.
/// Fatal and Panic fold into Error.
const ROUTES: [(Severity, Option<SinkLevel>); 7] = [
    (Severity::Trace, None),
    (Severity::Debug, Some(SinkLevel::Debug)),
    (Severity::Info, Some(SinkLevel::Info)),
    (Severity::Warn, Some(SinkLevel::Warn)),
    (Severity::Error, Some(SinkLevel::Error)),
    (Severity::Fatal, Some(SinkLevel::Error)),
    (Severity::Panic, Some(SinkLevel::Error)),
];

/// Downstream level for `severity`, or `None` when the event is dropped.
#[inline]
pub fn route(severity: Severity) -> Option<SinkLevel> {
    ROUTES[severity as usize].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_in_declaration_order() {
        for (index, (severity, _)) in ROUTES.iter().enumerate() {
            assert_eq!(*severity as usize, index, "row {index} is out of order");
        }
    }

    #[test]
    fn test_route_table() {
        let cases = [
            (Severity::Debug, Some(SinkLevel::Debug)),
            (Severity::Info, Some(SinkLevel::Info)),
            (Severity::Warn, Some(SinkLevel::Warn)),
            (Severity::Error, Some(SinkLevel::Error)),
            (Severity::Fatal, Some(SinkLevel::Error)),
            (Severity::Panic, Some(SinkLevel::Error)),
            (Severity::Trace, None),
        ];

        for (severity, expected) in cases {
            assert_eq!(route(severity), expected, "severity: {severity}");
        }
    }

    #[test]
    fn test_sink_level_to_tracing_level() {
        assert_eq!(tracing::Level::from(SinkLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(SinkLevel::Error), tracing::Level::ERROR);
    }
}
