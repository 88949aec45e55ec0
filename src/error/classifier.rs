//! Classification of failed HTTP responses.

use serde_json::Value;

use super::types::{AiError, AiErrorCode, CustomErrorData, ErrorDetails};
use crate::config::VERTEX_AI_DOMAIN;
use crate::transport::RequestUrl;

/// `reason` of the `google.rpc.ErrorInfo` detail sent for a disabled service.
pub const SERVICE_DISABLED_REASON: &str = "SERVICE_DISABLED";

/// Description of the help link sent alongside a disabled service.
pub const API_ACTIVATION_LINK_DESCRIPTION: &str = "Google developers console API activation";

/// Turn a non-success response into an [`AiError`].
///
/// The message carries, in order, the status, the status text, the server's
/// `error.message` and every `error.details` entry rendered as JSON. A body
/// that is missing or not JSON leaves only the status part. The one special
/// case is a disabled Firebase AI API, reported as
/// [`AiErrorCode::ApiNotEnabled`] with remediation steps.
pub fn classify_response(
    url: &RequestUrl<'_>,
    status: u16,
    status_text: &str,
    body: Option<&[u8]>,
) -> AiError {
    let json = body
        .filter(|b| !b.is_empty())
        .and_then(|b| serde_json::from_slice::<Value>(b).ok());
    let error = json.as_ref().and_then(|j| j.get("error"));

    let server_message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str);
    let raw_details: &[Value] = error
        .and_then(|e| e.get("details"))
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice);

    let error_details: Vec<ErrorDetails> = raw_details.iter().map(ErrorDetails::from_value).collect();

    let custom_data = CustomErrorData {
        status,
        status_text: status_text.to_string(),
        error_details,
    };

    if is_api_not_enabled(status, &custom_data.error_details) {
        return AiError::new(AiErrorCode::ApiNotEnabled, api_not_enabled_message(&url.settings.project))
            .with_custom_data(custom_data);
    }

    let mut message = format!("Error fetching from {url}: {}", status_line(status, status_text));
    if let Some(server_message) = server_message {
        message.push(' ');
        message.push_str(server_message);
    }
    for detail in raw_details {
        message.push(' ');
        message.push_str(&detail.to_string());
    }

    AiError::new(AiErrorCode::FetchError, message).with_custom_data(custom_data)
}

fn status_line(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("[{status}]")
    } else {
        format!("[{status} {status_text}]")
    }
}

/// Matches the 403 body the backend sends when the Firebase AI API has never
/// been enabled for the project. Other 403s stay generic fetch errors.
fn is_api_not_enabled(status: u16, details: &[ErrorDetails]) -> bool {
    if status != 403 {
        return false;
    }

    let service_disabled = details
        .iter()
        .any(|d| d.reason.as_deref() == Some(SERVICE_DISABLED_REASON));
    let activation_link = details.iter().any(|d| {
        d.links
            .as_ref()
            .and_then(|links| links.first())
            .and_then(|link| link.description.as_deref())
            .is_some_and(|desc| desc.contains(API_ACTIVATION_LINK_DESCRIPTION))
    });

    service_disabled && activation_link
}

fn api_not_enabled_message(project: &str) -> String {
    format!(
        "The Firebase AI SDK requires the Firebase AI API ('{VERTEX_AI_DOMAIN}') to be \
         enabled in your Firebase project. Enable it in the Firebase Console at \
         https://console.firebase.google.com/project/{project}/genai/ by clicking \
         \"Get started\". If the API was enabled recently, wait a few minutes for the \
         change to propagate and retry."
    )
}
