use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{ConfigError, ConfigResult};

pub const DEFAULT_TRACE_CAPACITY: usize = 100;
pub const DEFAULT_FEEDBACK_FLUSH_MS: u64 = 5000;
pub const DEFAULT_FEEDBACK_FUNCTION: &str = "ai-feedback";

/// Runtime configuration for the AI service layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the Supabase project, e.g. `https://xyz.supabase.co`
    pub supabase_url: String,
    /// Anonymous/service API key sent with every function invocation
    #[serde(skip_serializing)]
    pub api_key: String,
    pub tracing: TracingSettings,
    pub feedback: FeedbackSettings,
    pub log_json: bool,
    pub log_level: String,
}

/// Call tracer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingSettings {
    /// Ring buffer capacity
    pub capacity: usize,
    /// Capture invocation input in trace `parameters`
    pub include_input: bool,
}

impl Default for TracingSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_TRACE_CAPACITY,
            include_input: false,
        }
    }
}

/// Feedback batching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSettings {
    pub flush_delay_ms: u64,
    /// Remote function receiving flushed batches
    pub function: String,
}

impl FeedbackSettings {
    pub fn flush_delay(&self) -> Duration {
        Duration::from_millis(self.flush_delay_ms)
    }
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            flush_delay_ms: DEFAULT_FEEDBACK_FLUSH_MS,
            function: DEFAULT_FEEDBACK_FUNCTION.to_string(),
        }
    }
}

impl PlatformConfig {
    pub fn new(supabase_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            api_key: api_key.into(),
            tracing: TracingSettings::default(),
            feedback: FeedbackSettings::default(),
            log_json: false,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from the process environment (and `.env` if present).
    ///
    /// A missing or empty API key is a fatal configuration error.
    pub fn from_env() -> ConfigResult<Self> {
        dotenv::dotenv().ok();

        let supabase_url = required_var("SUPABASE_URL")?;
        let api_key = required_var("SUPABASE_ANON_KEY")?;

        let mut config = Self::new(supabase_url, api_key);
        config.tracing.capacity = parsed_var("AI_TRACE_CAPACITY", DEFAULT_TRACE_CAPACITY)?;
        config.tracing.include_input = bool_var("AI_TRACE_INCLUDE_INPUT", false)?;
        config.feedback.flush_delay_ms =
            parsed_var("AI_FEEDBACK_FLUSH_MS", DEFAULT_FEEDBACK_FLUSH_MS)?;
        if let Ok(function) = env::var("AI_FEEDBACK_FUNCTION") {
            if !function.trim().is_empty() {
                config.feedback.function = function;
            }
        }
        config.log_json = bool_var("AI_LOG_JSON", false)?;
        if let Ok(level) = env::var("AI_LOG_LEVEL") {
            config.log_level = level;
        }

        if config.tracing.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                var: "AI_TRACE_CAPACITY".to_string(),
                value: "0".to_string(),
                reason: "capacity must be positive".to_string(),
            });
        }

        Ok(config)
    }

    pub fn with_trace_capacity(mut self, capacity: usize) -> Self {
        self.tracing.capacity = capacity;
        self
    }

    pub fn with_include_input(mut self, include_input: bool) -> Self {
        self.tracing.include_input = include_input;
        self
    }

    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback.flush_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_feedback_function(mut self, function: impl Into<String>) -> Self {
        self.feedback.function = function.into();
        self
    }
}

fn required_var(name: &str) -> ConfigResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> ConfigResult<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            var: name.to_string(),
            value: raw.clone(),
            reason: "expected an unsigned integer".to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn bool_var(name: &str, default: bool) -> ConfigResult<bool> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                var: name.to_string(),
                value: raw,
                reason: "expected a boolean".to_string(),
            }),
        },
        Err(_) => Ok(default),
    }
}
