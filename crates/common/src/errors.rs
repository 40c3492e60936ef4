//! Error taxonomy shared by every crate in the workspace.
//!
//! Two kinds of failure exist at this layer: configuration problems, which are
//! fatal and surface while clients are being built, and operation failures,
//! which are normalized into [`OperationError`] so that every log line and
//! every fallback value carries the same shape.

use std::fmt;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A failure wrapped with the operation that produced it.
///
/// `message` keeps the display text of the original cause so callers can hand
/// it to users unchanged, while `source` keeps the full chain for diagnostics.
#[derive(Error, Debug)]
#[error("{context}.{operation} failed: {message}")]
pub struct OperationError {
    pub operation: String,
    pub context: String,
    pub message: String,
    #[source]
    pub source: anyhow::Error,
}

impl OperationError {
    /// Wrap any error with an operation name and a context tag.
    pub fn normalize(
        error: impl Into<anyhow::Error>,
        operation: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let source = error.into();
        let mut message = source.to_string();
        if message.trim().is_empty() {
            message = "Unknown error".to_string();
        }

        Self {
            operation: operation.into(),
            context: context.into(),
            message,
            source,
        }
    }

    /// Message suitable for an `error` field shown to users.
    pub fn user_message(&self) -> &str {
        &self.message
    }

    /// Every message in the cause chain, outermost first.
    pub fn chain(&self) -> Vec<String> {
        self.source.chain().map(|cause| cause.to_string()).collect()
    }
}

/// Attach operation/context tags to a `Result`.
pub trait ResultExt<T> {
    fn in_operation(self, operation: &str, context: &str) -> Result<T, OperationError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn in_operation(self, operation: &str, context: &str) -> Result<T, OperationError> {
        self.map_err(|e| OperationError::normalize(e, operation, context))
    }
}

/// Where a failure was observed. Used as a structured logging field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Invocation,
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Invocation => "invocation",
            FailureKind::Parse => "parse",
        };
        f.write_str(name)
    }
}
