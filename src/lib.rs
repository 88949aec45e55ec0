//! # Firebase AI Request Layer
//!
//! Request dispatch for the Firebase AI backends: the Gemini Developer API
//! (`generativelanguage.googleapis.com`) and Vertex AI through Firebase
//! (`firebasevertexai.googleapis.com`).
//!
//! ## Features
//!
//! - Deterministic request URLs for both backends, with `alt=sse` streaming
//! - Header assembly with concurrent Firebase Auth and App Check token fetch
//! - Per-request timeout enforced through a cancellation token
//! - Error classification with the server's message and details preserved
//! - Detection of a disabled Firebase AI API with remediation steps
//! - Secure credential handling with `SecretString`
//! - Mock transport, providers and logger for testing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_firebase_ai::{ApiSettings, BackendKind, CountTokensRequest, Content, FirebaseAiClient};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ApiSettings::builder()
//!         .api_key(SecretString::new("your-api-key".into()))
//!         .project("my-project")
//!         .backend(BackendKind::VertexAi)
//!         .build()?;
//!
//!     let client = FirebaseAiClient::builder().settings(settings).build()?;
//!
//!     let request = CountTokensRequest {
//!         contents: vec![Content::user_text("Why is the sky blue?")],
//!         ..Default::default()
//!     };
//!     let response = client.count_tokens("gemini-2.0-flash", &request, None).await?;
//!     println!("{} tokens", response.total_tokens);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - Client facade and builder
//! - `config` - Settings, backends, request options and constants
//! - `auth` - Firebase Auth and App Check provider traits
//! - `transport` - URL construction, headers, dispatch and the HTTP seam
//! - `error` - Error types and response classification
//! - `methods` - Model methods (`countTokens`) and model name helpers
//! - `observability` - Structured logging

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod methods;
pub mod observability;
pub mod transport;

// Development/testing modules - always available for integration tests
pub mod mocks;
pub mod fixtures;

// Re-exports for convenience
pub use auth::{AppCheckToken, AppCheckTokenProvider, AuthToken, AuthTokenProvider};
pub use client::{FirebaseAiClient, FirebaseAiClientBuilder};
pub use config::{
    ApiSettings, ApiSettingsBuilder, BackendKind, LogLevel, RequestOptions, DEFAULT_API_VERSION,
    DEFAULT_FETCH_TIMEOUT, DEFAULT_LOCATION,
};
pub use error::{AiError, AiErrorCode, AiResult, CustomErrorData, ErrorDetails};
pub use methods::{Content, CountTokensRequest, CountTokensResponse, Part, Role};
pub use transport::{Dispatcher, HttpResponse, HttpTransport, ReqwestTransport, RequestUrl, Task};
