use super::config::BridgeConfig;
use crate::adapter::{self, ForwardingLogger};
use crate::dispatch::{DispatchSnapshot, Dispatcher};
use crate::domain::BridgeError;
use crate::hook::{ForwardingHook, HookLogger};
use crate::sink::LogSink;
use std::sync::Arc;
use tracing::info;

/// Wires the `log` facade and the formatted-logger slot to a `LogSink`.
///
/// Construction only starts the dispatch workers. Nothing process-wide is
/// touched until `install_global`, so tests and embedders can use `hook()`
/// and `adapter()` directly.
pub struct Bridge {
    dispatcher: Dispatcher,
    hook: Arc<ForwardingHook>,
    adapter: Arc<ForwardingLogger>,
}

impl Bridge {
    pub fn new(config: &BridgeConfig, sink: Arc<dyn LogSink>) -> Result<Self, BridgeError> {
        config.validate()?;
        let dispatcher = Dispatcher::start(config.dispatch_config(), sink)?;

        Ok(Self {
            hook: Arc::new(ForwardingHook::new(dispatcher.handle())),
            adapter: Arc::new(ForwardingLogger::new(dispatcher.handle())),
            dispatcher,
        })
    }

    pub fn hook(&self) -> Arc<ForwardingHook> {
        self.hook.clone()
    }

    pub fn adapter(&self) -> Arc<ForwardingLogger> {
        self.adapter.clone()
    }

    /// Register the forwarding hook on the `log` facade for every severity,
    /// open the facade to Trace, and put the adapter in the global slot.
    ///
    /// The `log` facade accepts one logger per process, so a second call
    /// fails with `LoggerAlreadySet`. The adapter slot is still replaced.
    pub fn install_global(&self) -> Result<(), BridgeError> {
        let installed = HookLogger::new().with_hook(self.hook.clone()).install();
        adapter::set_logger(self.adapter.clone());
        installed?;

        info!("Log bridge installed as global logger");
        Ok(())
    }

    pub fn stats(&self) -> DispatchSnapshot {
        self.dispatcher.stats()
    }

    /// Stop intake and drain queued events. See `Dispatcher::shutdown`.
    pub async fn shutdown(self) -> Result<DispatchSnapshot, BridgeError> {
        self.dispatcher.shutdown().await
    }
}
