//! Call tracing for facade operations.
//!
//! Traces are kept most-recent-first in a bounded buffer. Operation logging is
//! de-duplicated through a seen-set that lives as long as the tracer and is
//! never evicted; long-lived hosts should watch `distinct_logged_operations`.

use chrono::Utc;
use common::TracingSettings;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashSet, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use uuid::Uuid;

pub use common::config::DEFAULT_TRACE_CAPACITY;

/// Characters of serialized input that feed the de-duplication hash
const INPUT_HASH_PREFIX: usize = 100;

/// Record of a single facade call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTrace {
    pub operation: String,
    pub context: String,
    pub trace_id: String,
    /// RFC 3339 / ISO-8601
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl CallTrace {
    pub fn succeeded(mut self) -> Self {
        self.success = true;
        self.error = None;
        self
    }

    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.success = false;
        self.error = Some(error.into());
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceOptions {
    /// Copy the call input into `parameters`
    pub include_input: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceStats {
    pub recorded: u64,
    pub failures: u64,
    pub buffered: usize,
    pub distinct_logged_operations: usize,
}

#[derive(Debug)]
pub struct CallTracer {
    capacity: usize,
    default_options: TraceOptions,
    buffer: Mutex<VecDeque<CallTrace>>,
    seen: Mutex<HashSet<String>>,
    recorded: AtomicU64,
    failures: AtomicU64,
}

impl CallTracer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            default_options: TraceOptions::default(),
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            seen: Mutex::new(HashSet::new()),
            recorded: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    pub fn from_settings(settings: &TracingSettings) -> Self {
        let mut tracer = Self::new(settings.capacity);
        tracer.default_options.include_input = settings.include_input;
        tracer
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_options(&self) -> TraceOptions {
        self.default_options
    }

    /// Build a trace. `parameters` is only ever populated when
    /// `include_input` is set.
    pub fn create_trace(
        &self,
        service: &str,
        operation: &str,
        input: Option<&Value>,
        options: Option<TraceOptions>,
    ) -> CallTrace {
        let options = options.unwrap_or(self.default_options);
        let parameters = if options.include_input {
            input.cloned()
        } else {
            None
        };

        CallTrace {
            operation: operation.to_string(),
            context: service.to_string(),
            trace_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            parameters,
            success: true,
            error: None,
            duration_ms: None,
        }
    }

    /// Push to the front; the oldest entries fall off past capacity.
    pub fn record_trace(&self, trace: CallTrace) {
        self.recorded.fetch_add(1, Ordering::Relaxed);
        if !trace.success {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }

        let mut buffer = self.buffer.lock();
        buffer.push_front(trace);
        if buffer.len() > self.capacity {
            buffer.truncate(self.capacity);
        }
    }

    /// Up to `limit` traces, most recent first
    pub fn get_recent_traces(&self, limit: usize) -> Vec<CallTrace> {
        self.buffer.lock().iter().take(limit).cloned().collect()
    }

    /// Log an operation once per `(operation, context, input-hash)` key.
    /// Returns whether this call produced the log line.
    pub fn log_operation(&self, operation: &str, context: &str, input: Option<&Value>) -> bool {
        let key = dedup_key(operation, context, input);
        let first = self.seen.lock().insert(key);
        if first {
            debug!(operation = %operation, context = %context, "AI operation invoked");
        }
        first
    }

    pub fn stats(&self) -> TraceStats {
        TraceStats {
            recorded: self.recorded.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            buffered: self.buffer.lock().len(),
            distinct_logged_operations: self.seen.lock().len(),
        }
    }

    /// Drop buffered traces. Counters and the seen-set are kept.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for CallTracer {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_CAPACITY)
    }
}

fn dedup_key(operation: &str, context: &str, input: Option<&Value>) -> String {
    let mut hasher = DefaultHasher::new();
    if let Some(input) = input {
        let serialized = input.to_string();
        let prefix: String = serialized.chars().take(INPUT_HASH_PREFIX).collect();
        prefix.hash(&mut hasher);
    }
    format!("{}:{}:{:016x}", context, operation, hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_capacity_follows_settings() {
        let tracer = CallTracer::default();
        assert_eq!(tracer.capacity(), TracingSettings::default().capacity);
    }

    #[test]
    fn test_input_is_not_captured_by_default() {
        let tracer = CallTracer::default();
        let input = json!({"patientId": "p-123"});

        let trace = tracer.create_trace("clinical", "matchTrials", Some(&input), None);
        assert!(trace.parameters.is_none());
        let serialized = serde_json::to_string(&trace).unwrap();
        assert!(!serialized.contains("parameters"));
        assert!(!serialized.contains("p-123"));

        let trace = tracer.create_trace(
            "clinical",
            "matchTrials",
            Some(&input),
            Some(TraceOptions {
                include_input: true,
            }),
        );
        assert_eq!(trace.parameters, Some(input));
    }

    #[test]
    fn test_trace_fields() {
        let tracer = CallTracer::default();
        let a = tracer.create_trace("policy", "simulateImpact", None, None);
        let b = tracer.create_trace("policy", "simulateImpact", None, None);

        assert_eq!(a.context, "policy");
        assert_eq!(a.operation, "simulateImpact");
        assert_ne!(a.trace_id, b.trace_id);
        assert!(chrono::DateTime::parse_from_rfc3339(&a.timestamp).is_ok());

        let failed = a.failed("timeout").with_duration(12);
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("timeout"));
        assert_eq!(failed.duration_ms, Some(12));
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let tracer = CallTracer::new(100);
        for i in 0..105 {
            let trace = tracer.create_trace("knowledge", &format!("op-{}", i), None, None);
            tracer.record_trace(trace);
        }

        let recent = tracer.get_recent_traces(100);
        assert_eq!(recent.len(), 100);
        assert_eq!(recent[0].operation, "op-104");
        assert_eq!(recent[99].operation, "op-5");
        assert!(recent.iter().all(|t| t.operation != "op-4"));

        let stats = tracer.stats();
        assert_eq!(stats.recorded, 105);
        assert_eq!(stats.buffered, 100);
    }

    #[test]
    fn test_recent_traces_respects_limit() {
        let tracer = CallTracer::new(10);
        for i in 0..3 {
            tracer.record_trace(tracer.create_trace("events", &format!("op-{}", i), None, None));
        }
        let recent = tracer.get_recent_traces(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].operation, "op-2");
        assert_eq!(tracer.get_recent_traces(50).len(), 3);

        tracer.clear();
        assert!(tracer.get_recent_traces(50).is_empty());
    }

    #[test]
    fn test_log_operation_deduplicates() {
        let tracer = CallTracer::default();
        let input = json!({"query": "diabetes"});

        assert!(tracer.log_operation("search", "knowledge", Some(&input)));
        assert!(!tracer.log_operation("search", "knowledge", Some(&input)));
        assert!(tracer.log_operation("search", "knowledge", Some(&json!({"query": "asthma"}))));
        assert!(tracer.log_operation("search", "support", Some(&input)));
        assert!(tracer.log_operation("search", "knowledge", None));

        assert_eq!(tracer.stats().distinct_logged_operations, 4);
    }

    #[test]
    fn test_dedup_uses_truncated_input() {
        let tracer = CallTracer::default();
        let long_prefix = "x".repeat(200);
        let a = json!({ "text": format!("{}A", long_prefix) });
        let b = json!({ "text": format!("{}B", long_prefix) });

        assert!(tracer.log_operation("summarize", "knowledge", Some(&a)));
        assert!(!tracer.log_operation("summarize", "knowledge", Some(&b)));
    }

    #[test]
    fn test_failures_are_counted() {
        let tracer = CallTracer::new(5);
        tracer.record_trace(tracer.create_trace("admin", "insights", None, None).failed("boom"));
        tracer.record_trace(tracer.create_trace("admin", "insights", None, None).succeeded());
        assert_eq!(tracer.stats().failures, 1);
    }

    #[test]
    fn test_from_settings() {
        let tracer = CallTracer::from_settings(&TracingSettings {
            capacity: 7,
            include_input: true,
        });
        assert_eq!(tracer.capacity(), 7);
        let trace = tracer.create_trace("events", "summarize", Some(&json!(1)), None);
        assert_eq!(trace.parameters, Some(json!(1)));
    }
}
