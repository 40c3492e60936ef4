use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure of a single remote function invocation.
///
/// `Display` is the human-readable message that ends up in fallback `error`
/// fields, so variants carrying a remote message print it verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvokeError {
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Function(String),

    #[error("Failed to decode response from {function}: {reason}")]
    Decode { function: String, reason: String },

    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

impl InvokeError {
    pub fn function(message: impl Into<String>) -> Self {
        InvokeError::Function(message.into())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            InvokeError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error half of the `{data, error}` union returned by function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeErrorBody {
    pub message: String,
}

/// The `{data, error}` envelope of the remote invoke contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvokeResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<InvokeErrorBody>,
}

impl InvokeResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(InvokeErrorBody {
                message: message.into(),
            }),
        }
    }

    /// Collapse the union; an error always wins over data.
    pub fn into_result(self) -> Result<Value, InvokeError> {
        match (self.error, self.data) {
            (Some(error), _) => Err(InvokeError::Function(error.message)),
            (None, Some(data)) => Ok(data),
            (None, None) => Ok(Value::Null),
        }
    }

    /// Detect an envelope-shaped JSON value. Anything carrying keys other than
    /// `data`/`error` is a plain payload and is returned untouched.
    pub fn from_value(value: Value) -> Result<Value, InvokeError> {
        let is_envelope = match &value {
            Value::Object(map) => {
                !map.is_empty()
                    && map.keys().all(|k| k == "data" || k == "error")
                    && (map.contains_key("data")
                        || map.get("error").map(|e| !e.is_null()).unwrap_or(false))
            }
            _ => false,
        };

        if !is_envelope {
            return Ok(value);
        }

        let Value::Object(mut map) = value else {
            return Ok(Value::Null);
        };
        let error = map.remove("error").unwrap_or(Value::Null);
        let data = map.remove("data");

        match error {
            Value::Null => Ok(data.unwrap_or(Value::Null)),
            Value::String(message) => Err(InvokeError::Function(message)),
            Value::Object(obj) => {
                let message = obj
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let message = message.unwrap_or_else(|| Value::Object(obj).to_string());
                Err(InvokeError::Function(message))
            }
            other => Err(InvokeError::Function(other.to_string())),
        }
    }
}

/// The single external protocol boundary: invoke a named serverless function
/// with a JSON body.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    async fn invoke(&self, function: &str, body: Value) -> Result<Value, InvokeError>;

    /// Short name for logs
    fn name(&self) -> &str {
        "invoker"
    }
}
