//! In-process invoker for tests: records every call and replays scripted
//! results per function name.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

use crate::invoker::{FunctionInvoker, InvokeError};

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    pub function: String,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct ScriptedInvoker {
    scripted: Mutex<HashMap<String, VecDeque<Result<Value, InvokeError>>>>,
    default: Mutex<Option<Result<Value, InvokeError>>>,
    calls: Mutex<Vec<InvocationRecord>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `message` unless something more specific is scripted.
    pub fn always_failing(message: &str) -> Self {
        let invoker = Self::new();
        invoker.set_default(Err(InvokeError::function(message)));
        invoker
    }

    pub fn always_returning(value: Value) -> Self {
        let invoker = Self::new();
        invoker.set_default(Ok(value));
        invoker
    }

    pub fn set_default(&self, result: Result<Value, InvokeError>) {
        *self.default.lock() = Some(result);
    }

    /// Queue one result for `function`; queued results are consumed in order.
    pub fn respond(&self, function: &str, result: Result<Value, InvokeError>) {
        self.scripted
            .lock()
            .entry(function.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn respond_ok(&self, function: &str, value: Value) {
        self.respond(function, Ok(value));
    }

    pub fn fail(&self, function: &str, message: &str) {
        self.respond(function, Err(InvokeError::function(message)));
    }

    pub fn calls(&self) -> Vec<InvocationRecord> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, function: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.function == function)
            .count()
    }

    pub fn last_call(&self) -> Option<InvocationRecord> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl FunctionInvoker for ScriptedInvoker {
    async fn invoke(&self, function: &str, body: Value) -> Result<Value, InvokeError> {
        self.calls.lock().push(InvocationRecord {
            function: function.to_string(),
            body,
        });

        let queued = self
            .scripted
            .lock()
            .get_mut(function)
            .and_then(|queue| queue.pop_front());
        if let Some(result) = queued {
            return result;
        }

        match self.default.lock().clone() {
            Some(result) => result,
            None => Err(InvokeError::function(format!(
                "No scripted response for {}",
                function
            ))),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_then_default() {
        let invoker = ScriptedInvoker::always_failing("offline");
        invoker.respond_ok("support-chat", json!({"answer": "hi"}));

        let first = invoker.invoke("support-chat", json!({"q": 1})).await;
        let second = invoker.invoke("support-chat", json!({"q": 2})).await;

        assert_eq!(first, Ok(json!({"answer": "hi"})));
        assert_eq!(second, Err(InvokeError::function("offline")));
        assert_eq!(invoker.call_count("support-chat"), 2);
        assert_eq!(invoker.last_call().unwrap().body, json!({"q": 2}));
    }

    #[tokio::test]
    async fn test_unscripted_call_fails() {
        let invoker = ScriptedInvoker::new();
        let result = invoker.invoke("unknown", Value::Null).await;
        assert!(result.unwrap_err().message().contains("unknown"));
    }
}
