//! Shared test support utilities
//!
//! Provides in-memory `LogSink` implementations that capture what the bridge
//! writes, for use in unit and integration tests.

use crate::domain::{Fields, SinkLevel};
use crate::sink::LogSink;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

/// One captured sink write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub level: SinkLevel,
    pub message: String,
    pub fields: Fields,
}

impl RecordedWrite {
    pub fn pipe(&self) -> &'static str {
        self.fields.pipe()
    }
}

/// Sink that records every write immediately.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<RecordedWrite>>,
    notify: Notify,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RecordedWrite> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until at least `count` writes have been recorded.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.notify.notified();
                if self.len() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }
}

impl LogSink for RecordingSink {
    fn write<'a>(
        &'a self,
        _scope: &'a CancellationToken,
        level: SinkLevel,
        message: &'a str,
        fields: &'a Fields,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.records.lock().push(RecordedWrite {
                level,
                message: message.to_string(),
                fields: *fields,
            });
            self.notify.notify_waiters();
        })
    }
}

/// Sink that sleeps before recording, to simulate a slow downstream.
#[derive(Debug)]
pub struct SlowSink {
    delay: Duration,
    started: Mutex<Vec<String>>,
    completed: Mutex<Vec<RecordedWrite>>,
}

impl SlowSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
        }
    }

    /// Messages whose write has begun.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().clone()
    }

    /// Writes that ran to completion.
    pub fn completed(&self) -> Vec<RecordedWrite> {
        self.completed.lock().clone()
    }
}

impl LogSink for SlowSink {
    fn write<'a>(
        &'a self,
        _scope: &'a CancellationToken,
        level: SinkLevel,
        message: &'a str,
        fields: &'a Fields,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.started.lock().push(message.to_string());
            tokio::time::sleep(self.delay).await;
            self.completed.lock().push(RecordedWrite {
                level,
                message: message.to_string(),
                fields: *fields,
            });
        })
    }
}
