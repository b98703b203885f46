use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free dispatch counters, shared by the handle and every worker.
#[derive(Debug, Default)]
pub struct DispatchStats {
    accepted: AtomicU64,
    delivered: AtomicU64,
    timed_out: AtomicU64,
    cancelled: AtomicU64,
    unrouted: AtomicU64,
    dropped_full: AtomicU64,
    dropped_closed: AtomicU64,
}

/// Point-in-time copy of `DispatchStats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSnapshot {
    /// Queued for delivery.
    pub accepted: u64,
    /// Sink write completed within the dispatch timeout.
    pub delivered: u64,
    /// Abandoned after the dispatch timeout expired.
    pub timed_out: u64,
    /// Abandoned because shutdown gave up waiting.
    pub cancelled: u64,
    /// Severity has no downstream level (Trace).
    pub unrouted: u64,
    /// Queue was full.
    pub dropped_full: u64,
    /// Dispatcher had already stopped taking events.
    pub dropped_closed: u64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timed_out(&self) {
        self.timed_out.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancelled(&self) {
        self.cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unrouted(&self) {
        self.unrouted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_full(&self) {
        self.dropped_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_closed(&self, count: u64) {
        self.dropped_closed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            unrouted: self.unrouted.load(Ordering::Relaxed),
            dropped_full: self.dropped_full.load(Ordering::Relaxed),
            dropped_closed: self.dropped_closed.load(Ordering::Relaxed),
        }
    }
}

impl DispatchSnapshot {
    /// Events that reached a terminal state after being accepted.
    pub fn settled(&self) -> u64 {
        self.delivered + self.timed_out + self.cancelled
    }
}
