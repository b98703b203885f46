use super::config::{LogFormat, LogLevel};
use super::initialization::{FallbackStrategy, InitializationError, LogDirective};
use crate::sink::tracing_sink::FORWARDED_TARGET;
use parking_lot::RwLock;
use std::sync::{Mutex, Once};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Builds the `EnvFilter` and installs the global tracing subscriber.
pub struct LoggingSystem {
    directives: RwLock<Vec<LogDirective>>,
    fallback_level: LogLevel,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: RwLock::new(Vec::new()),
            fallback_level: LogLevel::Info,
        }
    }

    /// Parse and add a directive, applying the error's fallback strategy.
    pub fn add_directive(&self, directive_str: &str) -> Result<(), InitializationError> {
        match LogDirective::parse(directive_str) {
            Ok(directive) => {
                self.directives.write().push(directive);
                Ok(())
            }
            Err(e) => match e.fallback_strategy() {
                FallbackStrategy::UseDefaultLevel => {
                    eprintln!("Warning: {e}, using default level");
                    let target = directive_str.split('=').next().unwrap_or("unknown").trim();
                    self.directives
                        .write()
                        .push(LogDirective::new(target, self.fallback_level));
                    Ok(())
                }
                FallbackStrategy::SkipDirective => {
                    eprintln!("Warning: {e}, skipping directive");
                    Ok(())
                }
                FallbackStrategy::UseStderrLogging => Err(e),
            },
        }
    }

    /// Forwarded events always pass; the configured level only governs the
    /// bridge's own diagnostics.
    pub fn add_default_directives(&self) {
        let defaults = [
            (FORWARDED_TARGET, LogLevel::Trace),
            ("tokio", LogLevel::Warn),
            ("mio", LogLevel::Warn),
        ];

        let mut directives = self.directives.write();
        for (target, level) in defaults {
            directives.push(LogDirective::new(target, level));
        }
    }

    /// Default directives followed by `directives`, each parsed through
    /// `add_directive`.
    pub fn with_directives<S: AsRef<str>>(directives: &[S]) -> Result<Self, InitializationError> {
        let logging_system = Self::new();
        logging_system.add_default_directives();
        for directive in directives {
            logging_system.add_directive(directive.as_ref())?;
        }
        Ok(logging_system)
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();

        let mut filter_parts = Vec::with_capacity(directives.len() + 1);
        filter_parts.push(default_level.as_str().to_string());
        filter_parts.extend(directives.iter().map(LogDirective::to_filter_string));

        filter_parts.join(",")
    }

    pub fn initialize_tracing(
        &self,
        default_level: LogLevel,
        format: LogFormat,
    ) -> Result<(), InitializationError> {
        let filter_string = self.build_filter_string(default_level);

        let env_filter = EnvFilter::try_new(&filter_string).map_err(|e| {
            InitializationError::LoggingInitFailed {
                details: format!("Failed to create EnvFilter with '{filter_string}'"),
                source: Box::new(e),
            }
        })?;

        // set_global_default rather than try_init: try_init would also claim
        // the `log` facade, which belongs to the hook logger
        let result = match format {
            LogFormat::Json => tracing::subscriber::set_global_default(
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().flatten_event(true).with_target(true)),
            ),
            LogFormat::Compact => tracing::subscriber::set_global_default(
                tracing_subscriber::registry().with(env_filter).with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .compact(),
                ),
            ),
        };

        result.map_err(|e| InitializationError::LoggingInitFailed {
            details: "Failed to set global tracing subscriber".to_string(),
            source: Box::new(e),
        })
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global subscriber once; later calls report the first outcome.
pub fn setup_logging_safe(
    level: LogLevel,
    format: LogFormat,
    directives: &[String],
) -> Result<(), InitializationError> {
    static INIT: Once = Once::new();
    static INIT_ERROR: Mutex<Option<String>> = Mutex::new(None);

    INIT.call_once(|| {
        let result = LoggingSystem::with_directives(directives)
            .and_then(|logging_system| logging_system.initialize_tracing(level, format));

        if let Err(e) = result
            && let Ok(mut slot) = INIT_ERROR.lock()
        {
            *slot = Some(e.to_string());
        }
    });

    let first_error = INIT_ERROR.lock().ok().and_then(|slot| slot.clone());
    match first_error {
        None => Ok(()),
        Some(details) => Err(InitializationError::LoggingInitFailed {
            details,
            source: Box::new(std::io::Error::other("Logging initialization error")),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_directives() {
        let logging_system = LoggingSystem::new();
        logging_system.add_default_directives();

        assert_eq!(logging_system.directive_count(), 3);
        let filter = logging_system.build_filter_string(LogLevel::Warn);
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("rask_log_bridge::forwarded=trace"));
        assert!(filter.contains("tokio=warn"));
    }

    #[test]
    fn test_add_directive_fallbacks() {
        let logging_system = LoggingSystem::new();

        let cases = [
            ("hyper=warn", 1),            // valid
            ("no_equals_sign", 1),        // skipped
            ("target=invalid_level", 2),  // default level
            ("=empty", 2),                // skipped
        ];

        for (directive, expected_count) in cases {
            assert!(logging_system.add_directive(directive).is_ok(), "{directive}");
            assert_eq!(logging_system.directive_count(), expected_count, "{directive}");
        }

        assert!(
            logging_system
                .build_filter_string(LogLevel::Info)
                .contains("target=info")
        );
    }

    #[test]
    fn test_with_directives_extends_defaults() {
        let directives = ["hyper=debug", "missing_level", "app=loud"];
        let logging_system = LoggingSystem::with_directives(&directives[..]).unwrap();

        // three defaults, "missing_level" skipped, "app" falls back to info
        assert_eq!(logging_system.directive_count(), 5);
        let filter = logging_system.build_filter_string(LogLevel::Warn);
        assert!(filter.contains("rask_log_bridge::forwarded=trace"));
        assert!(filter.contains("hyper=debug"));
        assert!(filter.contains("app=info"));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_empty_filter_is_default_level() {
        let logging_system = LoggingSystem::new();
        assert_eq!(logging_system.build_filter_string(LogLevel::Debug), "debug");
    }

    #[test]
    fn test_concurrent_directive_modification() {
        let logging_system = Arc::new(LoggingSystem::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let logging_system = logging_system.clone();
                thread::spawn(move || logging_system.add_directive(&format!("target{i}=info")))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().is_ok());
        }

        assert_eq!(logging_system.directive_count(), 50);
    }
}
