//! Per-client API settings.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;

use super::{BackendKind, DEFAULT_LOCATION};
use crate::auth::{AppCheckTokenProvider, AuthTokenProvider};
use crate::error::{AiError, AiErrorCode};

/// Settings shared by every request of one client instance.
///
/// Immutable once built; the request layer only ever borrows it, so a single
/// `Arc<ApiSettings>` can back any number of concurrent requests.
#[derive(Clone)]
pub struct ApiSettings {
    /// Firebase Web API key.
    pub api_key: SecretString,
    /// Firebase project id.
    pub project: String,
    /// Firebase app id.
    pub app_id: Option<String>,
    /// Region for the Vertex AI backend, empty for Google AI.
    pub location: String,
    /// Target backend.
    pub backend: BackendKind,
    /// Privacy opt-in gating the app id header.
    pub automatic_data_collection_enabled: Option<bool>,
    /// Firebase Auth token source.
    pub auth_provider: Option<Arc<dyn AuthTokenProvider>>,
    /// App Check token source.
    pub app_check_provider: Option<Arc<dyn AppCheckTokenProvider>>,
}

impl ApiSettings {
    /// Create a new settings builder.
    pub fn builder() -> ApiSettingsBuilder {
        ApiSettingsBuilder::default()
    }

    /// Create settings from environment variables.
    ///
    /// Reads `FIREBASE_API_KEY`, `FIREBASE_PROJECT_ID`, `FIREBASE_APP_ID`,
    /// `FIREBASE_AI_BACKEND`, `FIREBASE_AI_LOCATION` and
    /// `FIREBASE_AI_DATA_COLLECTION`.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("FIREBASE_API_KEY").unwrap_or_default();
        let project = std::env::var("FIREBASE_PROJECT_ID").unwrap_or_default();

        let mut builder = Self::builder()
            .api_key(SecretString::new(api_key))
            .project(&project);

        if let Ok(app_id) = std::env::var("FIREBASE_APP_ID") {
            builder = builder.app_id(&app_id);
        }
        if let Ok(backend) = std::env::var("FIREBASE_AI_BACKEND") {
            builder = builder.backend(backend.parse()?);
        }
        if let Ok(location) = std::env::var("FIREBASE_AI_LOCATION") {
            builder = builder.location(&location);
        }
        if let Some(enabled) = std::env::var("FIREBASE_AI_DATA_COLLECTION")
            .ok()
            .and_then(|s| s.trim().parse::<bool>().ok())
        {
            builder = builder.automatic_data_collection_enabled(enabled);
        }

        builder.build()
    }

    /// Whether the app id may be attached to outgoing requests.
    pub fn sends_app_id(&self) -> bool {
        self.automatic_data_collection_enabled == Some(true)
            && self.app_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub(crate) fn api_key_value(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &"[REDACTED]")
            .field("project", &self.project)
            .field("app_id", &self.app_id)
            .field("location", &self.location)
            .field("backend", &self.backend)
            .field(
                "automatic_data_collection_enabled",
                &self.automatic_data_collection_enabled,
            )
            .field("auth_provider", &self.auth_provider.is_some())
            .field("app_check_provider", &self.app_check_provider.is_some())
            .finish()
    }
}

/// Builder for [`ApiSettings`].
#[derive(Default)]
pub struct ApiSettingsBuilder {
    api_key: Option<SecretString>,
    project: Option<String>,
    app_id: Option<String>,
    location: Option<String>,
    backend: Option<BackendKind>,
    automatic_data_collection_enabled: Option<bool>,
    auth_provider: Option<Arc<dyn AuthTokenProvider>>,
    app_check_provider: Option<Arc<dyn AppCheckTokenProvider>>,
}

impl ApiSettingsBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Set the project id.
    pub fn project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    /// Set the app id.
    pub fn app_id(mut self, app_id: &str) -> Self {
        self.app_id = Some(app_id.to_string());
        self
    }

    /// Set the Vertex AI location.
    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// Set the backend.
    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the automatic data collection flag.
    pub fn automatic_data_collection_enabled(mut self, enabled: bool) -> Self {
        self.automatic_data_collection_enabled = Some(enabled);
        self
    }

    /// Set the Firebase Auth token provider.
    pub fn auth_provider(mut self, provider: Arc<dyn AuthTokenProvider>) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    /// Set the App Check token provider.
    pub fn app_check_provider(mut self, provider: Arc<dyn AppCheckTokenProvider>) -> Self {
        self.app_check_provider = Some(provider);
        self
    }

    /// Build the settings.
    pub fn build(self) -> Result<ApiSettings, AiError> {
        let api_key = self
            .api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                AiError::new(
                    AiErrorCode::NoApiKey,
                    "The \"apiKey\" field is empty in the Firebase config. \
                     Firebase AI requires this field to contain a valid API key.",
                )
            })?;

        let project = self
            .project
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                AiError::new(
                    AiErrorCode::NoProjectId,
                    "The \"projectId\" field is empty in the Firebase config. \
                     Firebase AI requires this field to contain a valid project ID.",
                )
            })?;

        let backend = self.backend.unwrap_or_default();
        let location = match (backend, self.location) {
            (BackendKind::VertexAi, Some(location)) if !location.is_empty() => location,
            (BackendKind::VertexAi, _) => DEFAULT_LOCATION.to_string(),
            (BackendKind::GoogleAi, location) => location.unwrap_or_default(),
        };

        Ok(ApiSettings {
            api_key,
            project,
            app_id: self.app_id,
            location,
            backend,
            automatic_data_collection_enabled: self.automatic_data_collection_enabled,
            auth_provider: self.auth_provider,
            app_check_provider: self.app_check_provider,
        })
    }
}
