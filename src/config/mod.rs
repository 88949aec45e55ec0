//! Configuration types for the Firebase AI request layer.

mod backend;
mod settings;

pub use backend::BackendKind;
pub use settings::{ApiSettings, ApiSettingsBuilder};

use std::time::Duration;
use url::Url;

use crate::error::AiError;

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default Vertex AI location.
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Host of the Gemini Developer API backend.
pub const GOOGLE_AI_DOMAIN: &str = "generativelanguage.googleapis.com";

/// Host of the Firebase-proxied Vertex AI backend.
pub const VERTEX_AI_DOMAIN: &str = "firebasevertexai.googleapis.com";

/// Default upper bound for a single request (180 seconds).
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(180);

/// Language token of the client identification header.
pub const LANGUAGE_TAG: &str = "gl-rs";

/// Version reported in the client identification header.
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

/// Per-request overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Upper bound for the request. `None` or zero selects
    /// [`DEFAULT_FETCH_TIMEOUT`].
    pub timeout: Option<Duration>,
    /// Replaces the backend's default base URL.
    pub base_url: Option<Url>,
    /// Replaces [`DEFAULT_API_VERSION`].
    pub api_version: Option<String>,
}

impl RequestOptions {
    /// Create a new options builder.
    pub fn builder() -> RequestOptionsBuilder {
        RequestOptionsBuilder::default()
    }

    /// Effective timeout for a request using these options.
    pub fn effective_timeout(options: Option<&RequestOptions>) -> Duration {
        options
            .and_then(|o| o.timeout)
            .filter(|t| !t.is_zero())
            .unwrap_or(DEFAULT_FETCH_TIMEOUT)
    }
}

/// Builder for [`RequestOptions`].
#[derive(Default)]
pub struct RequestOptionsBuilder {
    options: RequestOptions,
}

impl RequestOptionsBuilder {
    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, url: &str) -> Result<Self, AiError> {
        self.options.base_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Set a custom API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.options.api_version = Some(version.to_string());
        self
    }

    /// Build the options.
    pub fn build(self) -> RequestOptions {
        self.options
    }
}
