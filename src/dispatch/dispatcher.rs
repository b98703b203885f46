use super::stats::{DispatchSnapshot, DispatchStats};
use crate::app::config::ConfigError;
use crate::domain::{BridgeError, Fields, LogEvent};
use crate::sink::LogSink;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);
// Fits inside a typical container stop grace period.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(4);

type SharedReceiver = Arc<Mutex<mpsc::Receiver<LogEvent>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    pub queue_capacity: usize,
    pub workers: usize,
    /// Upper bound on a single sink write.
    pub dispatch_timeout: Duration,
    /// Upper bound on draining the queue during shutdown.
    pub drain_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            workers: DEFAULT_WORKERS,
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "Queue capacity must be greater than 0".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidConfig(
                "Worker count must be greater than 0".to_string(),
            ));
        }
        if self.dispatch_timeout.is_zero() {
            return Err(ConfigError::InvalidConfig(
                "Dispatch timeout must be greater than 0".to_string(),
            ));
        }
        if self.drain_timeout.is_zero() {
            return Err(ConfigError::InvalidConfig(
                "Drain timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cheap, cloneable entry point used by hooks and adapters.
#[derive(Clone)]
pub struct DispatchHandle {
    tx: mpsc::Sender<LogEvent>,
    intake: CancellationToken,
    stats: Arc<DispatchStats>,
}

impl std::fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("queued", &self.queued())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl DispatchHandle {
    /// Hand an event off for delivery. Never blocks, never fails the caller.
    pub fn dispatch(&self, event: LogEvent) {
        if event.sink_level().is_none() {
            self.stats.record_unrouted();
            return;
        }

        if self.intake.is_cancelled() {
            self.stats.record_dropped_closed(1);
            return;
        }

        match self.tx.try_send(event) {
            Ok(()) => self.stats.record_accepted(),
            Err(TrySendError::Full(_)) => self.stats.record_dropped_full(),
            Err(TrySendError::Closed(_)) => self.stats.record_dropped_closed(1),
        }
    }

    /// Events waiting in the queue.
    pub fn queued(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.intake.is_cancelled()
    }

    pub fn stats(&self) -> DispatchSnapshot {
        self.stats.snapshot()
    }
}

/// Owns the worker pool behind a set of `DispatchHandle`s.
pub struct Dispatcher {
    handle: DispatchHandle,
    rx: SharedReceiver,
    workers: Vec<JoinHandle<()>>,
    hard_stop: CancellationToken,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Spawn the worker pool on the current tokio runtime.
    pub fn start(config: DispatchConfig, sink: Arc<dyn LogSink>) -> Result<Self, BridgeError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| BridgeError::NoRuntime)?;

        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let rx: SharedReceiver = Arc::new(Mutex::new(rx));
        let stats = Arc::new(DispatchStats::new());
        let intake = CancellationToken::new();
        let hard_stop = CancellationToken::new();

        let workers = (0..config.workers)
            .map(|id| {
                runtime.spawn(run_worker(
                    id,
                    rx.clone(),
                    sink.clone(),
                    stats.clone(),
                    intake.clone(),
                    hard_stop.clone(),
                    config.dispatch_timeout,
                ))
            })
            .collect();

        debug!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "Dispatch workers started"
        );

        Ok(Self {
            handle: DispatchHandle { tx, intake, stats },
            rx,
            workers,
            hard_stop,
            config,
        })
    }

    pub fn handle(&self) -> DispatchHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn stats(&self) -> DispatchSnapshot {
        self.handle.stats()
    }

    /// Stop taking events, drain what is queued, then stop the workers.
    ///
    /// Handles stay valid afterwards; events sent through them are counted
    /// as `dropped_closed`. If draining exceeds `drain_timeout`, in-flight
    /// writes are cancelled and the remaining queue is discarded.
    pub async fn shutdown(mut self) -> Result<DispatchSnapshot, BridgeError> {
        self.handle.intake.cancel();
        let queued = self.handle.queued();
        info!(queued, "Draining dispatch queue");

        let drained = tokio::time::timeout(
            self.config.drain_timeout,
            join_all(self.workers.iter_mut()),
        )
        .await;

        let timed_out = match drained {
            Ok(results) => {
                for result in results {
                    if let Err(e) = result {
                        warn!("Dispatch worker ended abnormally: {}", e);
                    }
                }
                false
            }
            Err(_) => {
                self.hard_stop.cancel();
                // Workers observe the cancelled scope and exit promptly.
                // Handles already polled to completion must not be polled again.
                for worker in &mut self.workers {
                    if !worker.is_finished()
                        && let Err(e) = worker.await
                    {
                        warn!("Dispatch worker ended abnormally: {}", e);
                    }
                }
                true
            }
        };

        let leftover = {
            let mut rx = self.rx.lock().await;
            rx.close();
            let mut count = 0u64;
            while rx.try_recv().is_ok() {
                count += 1;
            }
            count
        };
        if leftover > 0 {
            self.handle.stats.record_dropped_closed(leftover);
        }

        let snapshot = self.handle.stats();
        if timed_out {
            warn!(pending = leftover, "Drain timeout exceeded");
            return Err(BridgeError::DrainTimeout {
                timeout_ms: self.config.drain_timeout.as_millis() as u64,
                pending: leftover as usize,
            });
        }

        info!(
            delivered = snapshot.delivered,
            timed_out = snapshot.timed_out,
            dropped_full = snapshot.dropped_full,
            "Dispatch queue drained"
        );
        Ok(snapshot)
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // Dropped without shutdown: stop everything immediately.
        self.handle.intake.cancel();
        self.hard_stop.cancel();
    }
}

async fn run_worker(
    id: usize,
    rx: SharedReceiver,
    sink: Arc<dyn LogSink>,
    stats: Arc<DispatchStats>,
    intake: CancellationToken,
    hard_stop: CancellationToken,
    dispatch_timeout: Duration,
) {
    loop {
        let next = {
            let mut rx = rx.lock().await;
            tokio::select! {
                biased;
                () = hard_stop.cancelled() => None,
                event = rx.recv() => event,
                // Intake closed and nothing left to pick up
                () = intake.cancelled() => rx.try_recv().ok(),
            }
        };

        let Some(event) = next else {
            break;
        };

        deliver(sink.as_ref(), event, &stats, &hard_stop, dispatch_timeout).await;
    }

    debug!(worker = id, "Dispatch worker stopped");
}

async fn deliver(
    sink: &dyn LogSink,
    event: LogEvent,
    stats: &DispatchStats,
    hard_stop: &CancellationToken,
    dispatch_timeout: Duration,
) {
    let Some(level) = event.sink_level() else {
        stats.record_unrouted();
        return;
    };

    let scope = hard_stop.child_token();
    let _cancel_on_exit = scope.clone().drop_guard();
    let fields = Fields::for_pipe(event.pipe);

    let outcome = tokio::time::timeout(dispatch_timeout, async {
        tokio::select! {
            () = sink.write(&scope, level, &event.message, &fields) => true,
            () = scope.cancelled() => false,
        }
    })
    .await;

    match outcome {
        Ok(true) => stats.record_delivered(),
        Ok(false) => stats.record_cancelled(),
        Err(_) => {
            stats.record_timed_out();
            warn!(
                pipe = event.pipe.as_str(),
                timeout_ms = dispatch_timeout.as_millis() as u64,
                "Sink write abandoned after timeout"
            );
        }
    }
}
