//! Shared call path of every domain facade.
//!
//! Idle -> Invoking -> Success | Failure. Success decodes the function's JSON
//! into the declared result type; failure is normalized, logged and turned
//! into that type's fallback. Nothing is retried.

use common::{FailureKind, OperationError, OperationTimer};
use edge::{coerce_payload, FunctionInvoker};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use crate::fallback::Fallback;
use crate::feedback::FeedbackQueue;
use crate::service_type::ServiceType;
use crate::tracer::CallTracer;

/// Shared collaborators handed to every facade at construction
#[derive(Clone)]
pub struct FacadeDeps {
    pub invoker: Arc<dyn FunctionInvoker>,
    pub tracer: Arc<CallTracer>,
    pub feedback: FeedbackQueue,
}

#[derive(Clone)]
pub struct FacadeCore {
    service: ServiceType,
    invoker: Arc<dyn FunctionInvoker>,
    tracer: Arc<CallTracer>,
}

impl FacadeCore {
    pub fn new(service: ServiceType, deps: &FacadeDeps) -> Self {
        Self {
            service,
            invoker: Arc::clone(&deps.invoker),
            tracer: Arc::clone(&deps.tracer),
        }
    }

    pub fn service(&self) -> ServiceType {
        self.service
    }

    pub fn is_available(&self) -> bool {
        true
    }

    /// Invoke `function` and always produce a `T`.
    pub async fn call<T>(&self, operation: &str, function: &str, body: Value) -> T
    where
        T: DeserializeOwned + Fallback,
    {
        match self.try_call::<T>(operation, function, body).await {
            Ok(result) => result,
            Err(err) => T::fallback(err.user_message()),
        }
    }

    /// Same call path, surfacing the normalized error instead of a fallback.
    pub async fn try_call<T>(
        &self,
        operation: &str,
        function: &str,
        body: Value,
    ) -> Result<T, OperationError>
    where
        T: DeserializeOwned + Fallback,
    {
        let context = self.service.as_str();
        self.tracer.log_operation(operation, context, Some(&body));
        let trace = self.tracer.create_trace(context, operation, Some(&body), None);

        let mut timer = OperationTimer::new(format!("{}.{}", context, operation));
        timer.add_field("function", function);
        let invoked = self.invoker.invoke(function, body).await;
        let duration_ms = timer.finish_with_result(&invoked);

        let outcome = match invoked {
            Ok(payload) => decode::<T>(function, payload).map_err(|e| (FailureKind::Parse, e)),
            Err(e) => Err((FailureKind::Invocation, anyhow::Error::from(e))),
        };

        let trace = trace.with_duration(duration_ms);
        match outcome {
            Ok(result) => {
                self.tracer.record_trace(trace.succeeded());
                Ok(result)
            }
            Err((kind, cause)) => {
                let err = OperationError::normalize(cause, operation, context);
                error!(
                    service = %self.service,
                    function = %function,
                    trace_id = %trace.trace_id,
                    kind = %kind,
                    "AI service call failed: {}",
                    err
                );
                self.tracer.record_trace(trace.failed(err.user_message()));
                Err(err)
            }
        }
    }
}

/// Decode a function payload. Strings are treated as raw model output and
/// run through salvage first. Anything that does not end up as a JSON object,
/// including an empty payload, counts as a parse failure.
fn decode<T>(function: &str, payload: Value) -> anyhow::Result<T>
where
    T: DeserializeOwned + Fallback,
{
    let payload = coerce_payload(payload, T::salvage_fields())
        .map_err(|e| anyhow::anyhow!("Invalid response from {}: {}", function, e))?;

    match payload {
        Value::Object(_) => serde_json::from_value::<T>(payload)
            .map_err(|e| anyhow::anyhow!("Invalid response from {}: {}", function, e)),
        Value::Null => anyhow::bail!("Empty response from {}", function),
        _ => anyhow::bail!(
            "Invalid response from {}: expected a JSON object, got {}",
            function,
            json_kind(&payload)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
