use super::{FormatLogger, NoopLogger};
use parking_lot::RwLock;
use std::sync::Arc;

static LOGGER: RwLock<Option<Arc<dyn FormatLogger>>> = parking_lot::const_rwlock(None);

/// Replace the process-wide formatted logger.
pub fn set_logger(logger: Arc<dyn FormatLogger>) {
    *LOGGER.write() = Some(logger);
}

/// The process-wide formatted logger, or a no-op one if none was set.
pub fn logger() -> Arc<dyn FormatLogger> {
    match LOGGER.read().as_ref() {
        Some(logger) => logger.clone(),
        None => Arc::new(NoopLogger),
    }
}

pub fn reset_logger() {
    *LOGGER.write() = None;
}

pub fn is_set() -> bool {
    LOGGER.read().is_some()
}
