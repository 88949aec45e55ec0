//! Observability layer for the Firebase AI request layer.
//!
//! Provides structured logging with sensitive data redaction.
//!
//! # Example
//!
//! ```rust
//! use integrations_firebase_ai::observability::{Logger, StructuredLogger};
//! use integrations_firebase_ai::config::LogLevel;
//! use serde_json::json;
//!
//! let logger = StructuredLogger::new("firebase_ai.request")
//!     .with_level(LogLevel::Debug);
//!
//! logger.debug("Dispatching request", json!({
//!     "task": "countTokens",
//!     "backend": "vertexai"
//! }));
//! ```

pub mod logging;

pub use logging::{DefaultLogger, Logger, NoopLogger, StructuredLogger};
