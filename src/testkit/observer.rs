//! Channel observer that records every event.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;

use crate::domain::CloseInfo;
use crate::error::ChannelError;
use crate::port::ChannelObserver;

const WAIT_LIMIT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Events captured from one session.
#[derive(Debug, Default)]
pub struct Recorded {
    pub messages: Vec<Value>,
    pub errors: Vec<ChannelError>,
    pub closes: Vec<CloseInfo>,
}

/// Shared view of a [`RecordingObserver`]'s events.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingLog {
    pub fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock()
    }

    /// Wait until at least `count` messages were recorded.
    ///
    /// # Panics
    ///
    /// Panics if they do not arrive within five seconds.
    pub async fn wait_for_messages(&self, count: usize) {
        self.wait_until(|r| r.messages.len() >= count, "messages")
            .await;
    }

    /// Wait until at least `count` errors were recorded.
    ///
    /// # Panics
    ///
    /// Panics if they do not arrive within five seconds.
    pub async fn wait_for_errors(&self, count: usize) {
        self.wait_until(|r| r.errors.len() >= count, "errors").await;
    }

    /// Wait until the session reported its close.
    ///
    /// # Panics
    ///
    /// Panics if no close arrives within five seconds.
    pub async fn wait_for_close(&self) {
        self.wait_until(|r| !r.closes.is_empty(), "close").await;
    }

    async fn wait_until(&self, done: impl Fn(&Recorded) -> bool, what: &str) {
        let poll = async {
            while !done(&self.inner.lock()) {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };
        if tokio::time::timeout(WAIT_LIMIT, poll).await.is_err() {
            panic!("timed out waiting for {what}: {:?}", *self.inner.lock());
        }
    }
}

/// Observer that appends every callback to a [`RecordingLog`].
#[derive(Debug, Default)]
pub struct RecordingObserver {
    log: RecordingLog,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> RecordingLog {
        self.log.clone()
    }
}

impl ChannelObserver for RecordingObserver {
    fn on_message(&mut self, message: Value) {
        self.log.lock().messages.push(message);
    }

    fn on_error(&mut self, error: ChannelError) {
        self.log.lock().errors.push(error);
    }

    fn on_close(&mut self, info: CloseInfo) {
        self.log.lock().closes.push(info);
    }
}
