//! Structured logging implementation for the Firebase AI request layer.
//!
//! Provides trait-based logging with structured field support.

use serde_json::Value;
use crate::config::LogLevel;

/// Placeholder written over redacted values.
const REDACTED: &str = "***REDACTED***";

/// Field names whose values never reach a log sink.
const SENSITIVE_KEYS: [&str; 14] = [
    "api_key", "apiKey", "key", "x-goog-api-key",
    "token", "access_token", "accessToken",
    "app_check_token", "X-Firebase-AppCheck",
    "secret", "password", "credential",
    "authorization", "Authorization",
];

/// Logger trait for structured logging.
///
/// Implementations can integrate with various logging backends (e.g. tracing,
/// log, custom). The request layer takes one as a trait object so tests can
/// observe what was logged.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

impl LogLevel {
    fn rank(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }
}

/// Structured logger implementation using the tracing crate.
///
/// Emits events under the `firebase_ai` target with the logger name and the
/// JSON-formatted context as fields.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger with the given name.
    ///
    /// # Example
    /// ```
    /// use integrations_firebase_ai::observability::StructuredLogger;
    ///
    /// let logger = StructuredLogger::new("firebase_ai.request");
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level for this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level.rank() <= self.level.rank()
    }

    /// Redact sensitive fields from log data, recursing into nested objects.
    fn redact_sensitive_fields(&self, mut fields: Value) -> Value {
        if let Some(obj) = fields.as_object_mut() {
            for key in &SENSITIVE_KEYS {
                if obj.contains_key(*key) {
                    obj.insert((*key).to_string(), Value::String(REDACTED.to_string()));
                }
            }

            for (_, value) in obj.iter_mut() {
                if value.is_object() {
                    *value = self.redact_sensitive_fields(value.take());
                }
            }
        }

        fields
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new("firebase_ai")
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Debug) {
            return;
        }

        let redacted_fields = self.redact_sensitive_fields(fields);
        tracing::debug!(
            target: "firebase_ai",
            logger = %self.name,
            fields = %redacted_fields,
            "{}",
            message
        );
    }

    fn info(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Info) {
            return;
        }

        let redacted_fields = self.redact_sensitive_fields(fields);
        tracing::info!(
            target: "firebase_ai",
            logger = %self.name,
            fields = %redacted_fields,
            "{}",
            message
        );
    }

    fn warn(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Warn) {
            return;
        }

        let redacted_fields = self.redact_sensitive_fields(fields);
        tracing::warn!(
            target: "firebase_ai",
            logger = %self.name,
            fields = %redacted_fields,
            "{}",
            message
        );
    }

    fn error(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Error) {
            return;
        }

        let redacted_fields = self.redact_sensitive_fields(fields);
        tracing::error!(
            target: "firebase_ai",
            logger = %self.name,
            fields = %redacted_fields,
            "{}",
            message
        );
    }
}

/// Logger used when none is configured.
pub type DefaultLogger = StructuredLogger;

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}
