//! Main error type for the Firebase AI request layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Result type alias for Firebase AI operations.
pub type AiResult<T> = Result<T, AiError>;

/// Service prefix used when rendering error messages and codes.
pub const AI_SERVICE: &str = "AI";

/// Stable, machine-readable error codes.
///
/// Callers branch on these for retry and remediation decisions; the wire
/// strings never change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiErrorCode {
    /// Generic, otherwise unclassified error.
    Error,
    /// The request could not be built.
    RequestError,
    /// The response could not be interpreted.
    ResponseError,
    /// The network call failed or returned a non-success status.
    FetchError,
    /// Request content was rejected locally.
    InvalidContent,
    /// The Firebase AI API is not enabled for the project.
    ApiNotEnabled,
    /// No API key was configured.
    NoApiKey,
    /// No project id was configured.
    NoProjectId,
    /// No model name was supplied.
    NoModel,
    /// A response body could not be parsed.
    ParseFailed,
}

impl AiErrorCode {
    /// Wire string for this code.
    pub fn as_str(self) -> &'static str {
        match self {
            AiErrorCode::Error => "error",
            AiErrorCode::RequestError => "request-error",
            AiErrorCode::ResponseError => "response-error",
            AiErrorCode::FetchError => "fetch-error",
            AiErrorCode::InvalidContent => "invalid-content",
            AiErrorCode::ApiNotEnabled => "api-not-enabled",
            AiErrorCode::NoApiKey => "no-api-key",
            AiErrorCode::NoProjectId => "no-project-id",
            AiErrorCode::NoModel => "no-model",
            AiErrorCode::ParseFailed => "parse-failed",
        }
    }
}

impl fmt::Display for AiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link inside a `google.rpc.Help` error detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HelpLink {
    /// Human readable description of the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One structured entry of `error.details` in a server error body.
///
/// Only the fields the classifier inspects are typed; everything else is kept
/// in `extra` so no diagnostic information is lost.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Detail type URL, e.g. `type.googleapis.com/google.rpc.ErrorInfo`.
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub type_url: Option<String>,
    /// Machine readable reason, e.g. `SERVICE_DISABLED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Error domain, e.g. `googleapis.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Additional key/value metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Help links attached to the detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<HelpLink>>,
    /// Any other fields, such as `detail` on `google.rpc.DebugInfo`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorDetails {
    /// Builds a detail from an arbitrary JSON value.
    ///
    /// Values that do not fit the typed shape are preserved under `extra`
    /// (non-objects under the `value` key).
    pub fn from_value(value: &Value) -> Self {
        if let Ok(details) = serde_json::from_value::<ErrorDetails>(value.clone()) {
            return details;
        }
        let mut extra = Map::new();
        match value {
            Value::Object(obj) => extra.extend(obj.clone()),
            other => {
                extra.insert("value".to_string(), other.clone());
            }
        }
        ErrorDetails {
            extra,
            ..ErrorDetails::default()
        }
    }
}

/// Raw diagnostic fields attached to a classified HTTP failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomErrorData {
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text.
    pub status_text: String,
    /// Structured `error.details` entries, in server order.
    pub error_details: Vec<ErrorDetails>,
}

/// Error raised by the Firebase AI request layer.
///
/// Constructed once at the failure site and never mutated afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{service}: {message} ({service}/{code})", service = AI_SERVICE)]
pub struct AiError {
    /// Stable error code.
    pub code: AiErrorCode,
    /// Human readable message.
    pub message: String,
    /// HTTP diagnostics, present for classified responses only.
    pub custom_error_data: Option<CustomErrorData>,
}

impl AiError {
    /// Creates an error without HTTP diagnostics.
    pub fn new(code: AiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            custom_error_data: None,
        }
    }

    /// Attaches HTTP diagnostics to the error.
    pub fn with_custom_data(mut self, data: CustomErrorData) -> Self {
        self.custom_error_data = Some(data);
        self
    }

    /// HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        self.custom_error_data.as_ref().map(|d| d.status)
    }

    /// Returns true if retrying the same request may succeed.
    ///
    /// Transport failures, throttling and server-side errors qualify; client
    /// errors and configuration problems do not.
    pub fn is_retryable(&self) -> bool {
        if self.code != AiErrorCode::FetchError {
            return false;
        }
        match self.status() {
            None => true,
            Some(status) => status == 429 || status >= 500,
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::new(
            AiErrorCode::ParseFailed,
            format!("Failed to parse JSON: {err}"),
        )
    }
}

impl From<url::ParseError> for AiError {
    fn from(err: url::ParseError) -> Self {
        AiError::new(AiErrorCode::RequestError, format!("Invalid base URL: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_display_includes_service_and_code() {
        let error = AiError::new(AiErrorCode::FetchError, "boom");
        assert_eq!(error.to_string(), "AI: boom (AI/fetch-error)");
    }

    #[test]
    fn test_code_wire_strings_match_serde() {
        let serialized = serde_json::to_value(AiErrorCode::ApiNotEnabled).unwrap();
        assert_eq!(serialized, json!("api-not-enabled"));
        assert_eq!(AiErrorCode::ApiNotEnabled.as_str(), "api-not-enabled");
    }

    #[test]
    fn test_is_retryable() {
        let transport = AiError::new(AiErrorCode::FetchError, "connection reset");
        assert!(transport.is_retryable());

        let server = AiError::new(AiErrorCode::FetchError, "oops").with_custom_data(CustomErrorData {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            error_details: vec![],
        });
        assert!(server.is_retryable());

        let client = AiError::new(AiErrorCode::FetchError, "bad").with_custom_data(CustomErrorData {
            status: 400,
            ..CustomErrorData::default()
        });
        assert!(!client.is_retryable());

        let disabled = AiError::new(AiErrorCode::ApiNotEnabled, "enable it");
        assert!(!disabled.is_retryable());
    }

    #[test]
    fn test_error_details_from_typed_value() {
        let value = json!({
            "@type": "type.googleapis.com/google.rpc.ErrorInfo",
            "reason": "SERVICE_DISABLED",
            "domain": "googleapis.com",
            "metadata": {"service": "firebasevertexai.googleapis.com"}
        });
        let details = ErrorDetails::from_value(&value);
        assert_eq!(details.reason.as_deref(), Some("SERVICE_DISABLED"));
        assert_eq!(
            details.type_url.as_deref(),
            Some("type.googleapis.com/google.rpc.ErrorInfo")
        );
        assert!(details.extra.is_empty());
    }

    #[test]
    fn test_error_details_keeps_unknown_shapes() {
        let details = ErrorDetails::from_value(&json!({"links": "not-a-list", "detail": "x"}));
        assert!(details.links.is_none());
        assert_eq!(details.extra.get("links"), Some(&json!("not-a-list")));
        assert_eq!(details.extra.get("detail"), Some(&json!("x")));

        let scalar = ErrorDetails::from_value(&json!("plain"));
        assert_eq!(scalar.extra.get("value"), Some(&json!("plain")));
    }
}
