//! Debounced feedback batching.
//!
//! `record_feedback` only appends to memory. The first item of a window
//! schedules a single flush after the configured delay; every item recorded
//! before that flush rides along in the same batch.

use async_trait::async_trait;
use chrono::Utc;
use common::config::DEFAULT_FEEDBACK_FLUSH_MS;
use edge::FunctionInvoker;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_FLUSH_DELAY: Duration = Duration::from_millis(DEFAULT_FEEDBACK_FLUSH_MS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub operation_id: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub timestamp: String,
}

impl FeedbackItem {
    pub fn new(operation_id: impl Into<String>, rating: f64) -> Self {
        Self {
            operation_id: operation_id.into(),
            rating,
            comments: None,
            user_id: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Destination of flushed batches
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn process(&self, batch: Vec<FeedbackItem>) -> anyhow::Result<()>;
}

/// Sends each batch to a remote function as `{"items": [...]}`
pub struct InvokerFeedbackSink {
    invoker: Arc<dyn FunctionInvoker>,
    function: String,
}

impl InvokerFeedbackSink {
    pub fn new(invoker: Arc<dyn FunctionInvoker>, function: impl Into<String>) -> Self {
        Self {
            invoker,
            function: function.into(),
        }
    }
}

#[async_trait]
impl FeedbackSink for InvokerFeedbackSink {
    async fn process(&self, batch: Vec<FeedbackItem>) -> anyhow::Result<()> {
        let count = batch.len();
        self.invoker
            .invoke(&self.function, json!({ "items": batch }))
            .await?;
        info!(function = %self.function, items = count, "Feedback batch stored");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct QueueState {
    items: Vec<FeedbackItem>,
    timer_pending: bool,
}

struct QueueInner {
    state: Mutex<QueueState>,
    delay: Duration,
    sink: Arc<dyn FeedbackSink>,
    flushes: AtomicU64,
}

impl QueueInner {
    /// Swap the queue for an empty one and hand the batch to the sink.
    /// Only the timer clears the pending flag so at most one timer exists.
    async fn flush(&self, from_timer: bool) -> usize {
        let batch = {
            let mut state = self.state.lock();
            if from_timer {
                state.timer_pending = false;
            }
            std::mem::take(&mut state.items)
        };

        if batch.is_empty() {
            debug!("Feedback flush found an empty queue");
            return 0;
        }

        let count = batch.len();
        self.flushes.fetch_add(1, Ordering::Relaxed);
        debug!(items = count, "Flushing feedback batch");

        if let Err(e) = self.sink.process(batch).await {
            error!(items = count, "Failed to process feedback batch: {}", e);
        }
        count
    }
}

/// Cloning yields another handle to the same queue
#[derive(Clone)]
pub struct FeedbackQueue {
    inner: Arc<QueueInner>,
}

impl FeedbackQueue {
    pub fn new(sink: Arc<dyn FeedbackSink>, delay: Duration) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                state: Mutex::new(QueueState::default()),
                delay,
                sink,
                flushes: AtomicU64::new(0),
            }),
        }
    }

    /// Append without I/O. Schedules the window's flush on the current Tokio
    /// runtime when none is pending.
    pub fn record_feedback(&self, item: FeedbackItem) {
        let schedule = {
            let mut state = self.inner.state.lock();
            state.items.push(item);
            if state.timer_pending {
                false
            } else {
                state.timer_pending = true;
                true
            }
        };

        if !schedule {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                handle.spawn(async move {
                    tokio::time::sleep(inner.delay).await;
                    inner.flush(true).await;
                });
            }
            Err(_) => {
                // Keep the item; the next call made inside a runtime schedules the flush
                self.inner.state.lock().timer_pending = false;
                warn!("No async runtime available; feedback flush deferred");
            }
        }
    }

    /// Flush immediately, e.g. at shutdown. A pending timer stays scheduled
    /// and will find whatever arrives afterwards.
    pub async fn flush_now(&self) -> usize {
        self.inner.flush(false).await
    }

    pub fn pending(&self) -> usize {
        self.inner.state.lock().items.len()
    }

    pub fn timer_pending(&self) -> bool {
        self.inner.state.lock().timer_pending
    }

    /// Number of non-empty batches handed to the sink
    pub fn flush_count(&self) -> u64 {
        self.inner.flushes.load(Ordering::Relaxed)
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}
