//! Model methods built on top of the dispatcher.
//!
//! This module contains the request and response types shared by the
//! methods, and the helpers that turn a model name into a resource path.

mod count_tokens;

pub use count_tokens::{
    count_tokens, map_count_tokens_request, CountTokensRequest, CountTokensResponse,
    ModalityTokenCount,
};

use serde::{Deserialize, Serialize};

use crate::config::BackendKind;
use crate::error::{AiError, AiErrorCode, AiResult};

/// A part of a content message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Part {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary data.
    InlineData {
        /// The inline data blob.
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// Reference to a file in Cloud Storage.
    FileData {
        /// The file reference.
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

impl Part {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

/// Base64-encoded data with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// MIME type of the data.
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// File reference with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// MIME type of the file.
    pub mime_type: String,
    /// `gs://` URI of the file.
    pub file_uri: String,
}

/// The role of a message author.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Model role.
    Model,
    /// Function role.
    Function,
    /// System role.
    System,
}

/// A content message with a role and parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    /// The role of the content author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the content.
    pub parts: Vec<Part>,
}

impl Content {
    /// A user message made of a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User),
            parts: vec![Part::text(text)],
        }
    }
}

/// Resource path of `model` on `backend`.
///
/// The Gemini Developer API addresses models as `models/{name}`. Vertex AI
/// addresses them under a publisher, `publishers/google/models/{name}`; names
/// that already carry a publisher or tuned-model path are used as given.
pub fn normalize_model_name(model: &str, backend: BackendKind) -> AiResult<String> {
    let model = model.trim();
    if model.is_empty() {
        return Err(AiError::new(
            AiErrorCode::NoModel,
            "Must provide a model name. Example: getGenerativeModel({ model: 'my-model-name' })",
        ));
    }

    let path = match backend {
        BackendKind::GoogleAi => {
            if model.starts_with("models/") || model.starts_with("tunedModels/") {
                model.to_string()
            } else {
                format!("models/{model}")
            }
        }
        BackendKind::VertexAi => {
            if model.contains('/') {
                if model.starts_with("models/") {
                    format!("publishers/google/{model}")
                } else {
                    model.to_string()
                }
            } else {
                format!("publishers/google/models/{model}")
            }
        }
    };
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_google_ai() {
        assert_eq!(
            normalize_model_name("gemini-2.0-flash", BackendKind::GoogleAi).unwrap(),
            "models/gemini-2.0-flash"
        );
        assert_eq!(
            normalize_model_name("models/gemini-2.0-flash", BackendKind::GoogleAi).unwrap(),
            "models/gemini-2.0-flash"
        );
        assert_eq!(
            normalize_model_name("tunedModels/my-tune", BackendKind::GoogleAi).unwrap(),
            "tunedModels/my-tune"
        );
    }

    #[test]
    fn test_normalize_vertex_ai() {
        assert_eq!(
            normalize_model_name("gemini-2.0-flash", BackendKind::VertexAi).unwrap(),
            "publishers/google/models/gemini-2.0-flash"
        );
        assert_eq!(
            normalize_model_name("models/gemini-2.0-flash", BackendKind::VertexAi).unwrap(),
            "publishers/google/models/gemini-2.0-flash"
        );
        assert_eq!(
            normalize_model_name(
                "projects/my-project/locations/us-central1/publishers/google/models/my-model",
                BackendKind::VertexAi
            )
            .unwrap(),
            "projects/my-project/locations/us-central1/publishers/google/models/my-model"
        );
    }

    #[test]
    fn test_normalize_empty_model() {
        let err = normalize_model_name("  ", BackendKind::VertexAi).unwrap_err();
        assert_eq!(err.code, AiErrorCode::NoModel);
    }

    #[test]
    fn test_content_serialization() {
        let content = Content::user_text("hello");
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "user", "parts": [{"text": "hello"}]})
        );
    }
}
