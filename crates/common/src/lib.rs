//! Shared infrastructure for the AI service layer: error taxonomy and
//! normalizer, environment configuration, structured logging.

pub mod config;
pub mod errors;
pub mod structured_logging;

pub use config::{FeedbackSettings, PlatformConfig, TracingSettings};
pub use errors::{ConfigError, ConfigResult, FailureKind, OperationError, ResultExt};
pub use structured_logging::{init_structured_logging, LoggingConfig, OperationTimer};
