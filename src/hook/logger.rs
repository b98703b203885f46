use super::{Hook, HookEntry};
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::RwLock;
use std::sync::Arc;

/// `log::Log` implementation that only fires hooks.
///
/// Filtering is left to `log::set_max_level`; `enabled` accepts everything.
#[derive(Default)]
pub struct HookLogger {
    hooks: RwLock<Vec<Arc<dyn Hook>>>,
}

impl HookLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(self, hook: Arc<dyn Hook>) -> Self {
        self.add_hook(hook);
        self
    }

    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.hooks.write().push(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }

    /// Fire every hook subscribed to the entry's severity.
    pub fn fire(&self, entry: &HookEntry) {
        let hooks = self.hooks.read();
        for hook in hooks.iter() {
            if hook.levels().contains(&entry.severity) {
                // Hooks report success or failure, but there is nobody to tell
                let _ = hook.fire(entry);
            }
        }
    }

    /// Install as the process-wide `log` logger and open it to every level.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }
}

impl Log for HookLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.fire(&HookEntry::from(record));
        }
    }

    fn flush(&self) {}
}
