//! Credential providers for Firebase AI requests.
//!
//! Both providers are optional collaborators owned by the embedding
//! application. Their absence is a valid, unauthenticated configuration.

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

/// Error reported alongside an App Check token.
pub type AppCheckError = Box<dyn Error + Send + Sync>;

/// Firebase Auth ID token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    /// The bearer token value.
    pub access_token: String,
}

impl AuthToken {
    /// Create a token from its raw value.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// App Check attestation token.
///
/// When `error` is set the provider could not refresh the token; `token`
/// then holds a placeholder that is still sent, and the error is only
/// reported as a warning.
pub struct AppCheckToken {
    /// The attestation token value.
    pub token: String,
    /// Soft failure reported by the provider.
    pub error: Option<AppCheckError>,
}

impl AppCheckToken {
    /// A token obtained without errors.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            error: None,
        }
    }

    /// A token accompanied by a provider-reported error.
    pub fn with_error(token: impl Into<String>, error: impl Into<AppCheckError>) -> Self {
        Self {
            token: token.into(),
            error: Some(error.into()),
        }
    }
}

impl fmt::Debug for AppCheckToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCheckToken")
            .field("token", &"[REDACTED]")
            .field("error", &self.error.as_ref().map(ToString::to_string))
            .finish()
    }
}

/// Source of Firebase Auth tokens.
#[async_trait]
pub trait AuthTokenProvider: Send + Sync {
    /// Fetch the current user's token, or `None` when nobody is signed in.
    async fn get_auth_token(&self) -> Option<AuthToken>;
}

/// Source of App Check tokens.
#[async_trait]
pub trait AppCheckTokenProvider: Send + Sync {
    /// Fetch an App Check token, or `None` when App Check is unavailable.
    async fn get_app_check_token(&self) -> Option<AppCheckToken>;
}
