//! Header assembly for Firebase AI requests.

use serde_json::json;
use std::collections::HashMap;

use super::request_url::RequestUrl;
use crate::auth::{AppCheckToken, AuthToken};
use crate::config::{LANGUAGE_TAG, PACKAGE_VERSION};
use crate::observability::Logger;

/// Content type of every request body.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// Client identification header.
pub const API_CLIENT_HEADER: &str = "x-goog-api-client";
/// API key header.
pub const API_KEY_HEADER: &str = "x-goog-api-key";
/// App id header, sent only with the data collection opt-in.
pub const APP_ID_HEADER: &str = "X-Firebase-Appid";
/// App Check token header.
pub const APP_CHECK_HEADER: &str = "X-Firebase-AppCheck";
/// Firebase Auth header.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Value of the client identification header, e.g. `gl-rs/0.1.0 fire/0.1.0`.
pub fn get_client_headers() -> String {
    format!("{LANGUAGE_TAG}/{PACKAGE_VERSION} fire/{PACKAGE_VERSION}")
}

/// Assemble the headers for a request.
///
/// The auth and App Check providers are queried concurrently and the headers
/// are only returned once both have answered. A provider that is absent, or
/// that answers `None`, simply leaves its header out. An App Check token that
/// comes with an error is still sent; the error is logged as a warning.
pub async fn get_headers(url: &RequestUrl<'_>, logger: &dyn Logger) -> HashMap<String, String> {
    let settings = url.settings;

    let mut headers = HashMap::new();
    headers.insert(CONTENT_TYPE_HEADER.to_string(), "application/json".to_string());
    headers.insert(API_CLIENT_HEADER.to_string(), get_client_headers());
    headers.insert(API_KEY_HEADER.to_string(), settings.api_key_value().to_string());

    if settings.sends_app_id() {
        if let Some(app_id) = &settings.app_id {
            headers.insert(APP_ID_HEADER.to_string(), app_id.clone());
        }
    }

    let app_check = async {
        match &settings.app_check_provider {
            Some(provider) => provider.get_app_check_token().await,
            None => None,
        }
    };
    let auth = async {
        match &settings.auth_provider {
            Some(provider) => provider.get_auth_token().await,
            None => None,
        }
    };
    let (app_check, auth): (Option<AppCheckToken>, Option<AuthToken>) =
        futures::join!(app_check, auth);

    if let Some(app_check) = app_check {
        if let Some(error) = &app_check.error {
            let backend = settings.backend.name();
            logger.warn(
                &format!("[{backend}] Unable to obtain a valid App Check token: {error}"),
                json!({ "backend": backend, "error": error.to_string() }),
            );
        }
        headers.insert(APP_CHECK_HEADER.to_string(), app_check.token);
    }

    if let Some(auth) = auth {
        headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            format!("Firebase {}", auth.access_token),
        );
    }

    headers
}
