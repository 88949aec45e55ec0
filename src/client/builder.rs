//! Builder for creating Firebase AI client instances.

use secrecy::SecretString;
use std::sync::Arc;

use crate::auth::{AppCheckTokenProvider, AuthTokenProvider};
use crate::config::{ApiSettings, ApiSettingsBuilder, BackendKind};
use crate::error::AiResult;
use crate::observability::{DefaultLogger, Logger};
use crate::transport::{Dispatcher, HttpTransport};

use super::FirebaseAiClient;

/// Builder for creating a [`FirebaseAiClient`] instance.
///
/// # Example
///
/// ```no_run
/// use integrations_firebase_ai::client::FirebaseAiClient;
/// use integrations_firebase_ai::config::BackendKind;
/// use secrecy::SecretString;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FirebaseAiClient::builder()
///     .api_key(SecretString::new("your-api-key".into()))
///     .project("my-project")
///     .backend(BackendKind::VertexAi)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct FirebaseAiClientBuilder {
    settings: Option<ApiSettings>,
    settings_builder: ApiSettingsBuilder,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl FirebaseAiClientBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            settings: None,
            settings_builder: ApiSettings::builder(),
            transport: None,
            logger: None,
        }
    }

    /// Use already validated settings; the individual setters are then ignored.
    pub fn settings(mut self, settings: ApiSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.settings_builder = self.settings_builder.api_key(key);
        self
    }

    /// Sets the Firebase project id.
    pub fn project(mut self, project: &str) -> Self {
        self.settings_builder = self.settings_builder.project(project);
        self
    }

    /// Sets the Firebase app id.
    pub fn app_id(mut self, app_id: &str) -> Self {
        self.settings_builder = self.settings_builder.app_id(app_id);
        self
    }

    /// Sets the Vertex AI location.
    pub fn location(mut self, location: &str) -> Self {
        self.settings_builder = self.settings_builder.location(location);
        self
    }

    /// Sets the backend.
    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.settings_builder = self.settings_builder.backend(backend);
        self
    }

    /// Opts in to sending the app id with every request.
    pub fn automatic_data_collection_enabled(mut self, enabled: bool) -> Self {
        self.settings_builder = self.settings_builder.automatic_data_collection_enabled(enabled);
        self
    }

    /// Sets the Firebase Auth provider.
    pub fn auth_provider(mut self, provider: Arc<dyn AuthTokenProvider>) -> Self {
        self.settings_builder = self.settings_builder.auth_provider(provider);
        self
    }

    /// Sets the App Check provider.
    pub fn app_check_provider(mut self, provider: Arc<dyn AppCheckTokenProvider>) -> Self {
        self.settings_builder = self.settings_builder.app_check_provider(provider);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are incomplete or the default HTTP
    /// transport cannot be created.
    pub fn build(self) -> AiResult<FirebaseAiClient> {
        let settings = match self.settings {
            Some(settings) => settings,
            None => self.settings_builder.build()?,
        };

        let dispatcher = match (self.transport, self.logger) {
            (Some(transport), logger) => Dispatcher::new(
                transport,
                logger.unwrap_or_else(|| Arc::new(DefaultLogger::default())),
            ),
            (None, None) => Dispatcher::with_defaults()?,
            (None, Some(logger)) => Dispatcher::with_defaults()?.with_logger(logger),
        };

        Ok(FirebaseAiClient {
            settings: Arc::new(settings),
            dispatcher,
        })
    }
}

impl Default for FirebaseAiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
