//! `countTokens` on top of the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Content;
use crate::config::{ApiSettings, BackendKind, RequestOptions};
use crate::error::AiResult;
use crate::transport::{Dispatcher, Task};

/// Request for counting tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensRequest {
    /// The contents to count tokens for.
    pub contents: Vec<Content>,
    /// System instruction counted alongside the contents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

/// Token count of one modality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModalityTokenCount {
    /// Modality name, e.g. `TEXT` or `IMAGE`.
    pub modality: String,
    /// Tokens counted for the modality.
    pub token_count: u32,
}

/// Response from counting tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    /// The total number of tokens.
    pub total_tokens: u32,
    /// Billable characters, reported by Vertex AI only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_billable_characters: Option<u32>,
    /// Breakdown of the prompt tokens per modality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens_details: Option<Vec<ModalityTokenCount>>,
}

/// Body of a `countTokens` call to the Gemini Developer API, which expects
/// the contents wrapped in a `generateContentRequest` naming the model.
pub fn map_count_tokens_request(request: &CountTokensRequest, model: &str) -> serde_json::Value {
    let mut inner = json!({
        "model": model,
        "contents": request.contents,
    });
    if let Some(system_instruction) = &request.system_instruction {
        inner["systemInstruction"] = json!(system_instruction);
    }
    json!({ "generateContentRequest": inner })
}

/// Count the tokens `request` would use on `model`.
///
/// `model` is the resource path, e.g. `publishers/google/models/gemini-2.0-flash`.
pub async fn count_tokens(
    dispatcher: &Dispatcher,
    settings: &ApiSettings,
    model: &str,
    request: &CountTokensRequest,
    options: Option<&RequestOptions>,
) -> AiResult<CountTokensResponse> {
    let body = match settings.backend {
        BackendKind::GoogleAi => serde_json::to_string(&map_count_tokens_request(request, model))?,
        BackendKind::VertexAi => serde_json::to_string(request)?,
    };

    let response = dispatcher
        .make_request(model, Task::CountTokens, settings, false, body, options)
        .await?;
    response.json().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiErrorCode;
    use crate::fixtures::load_fixture;
    use crate::mocks::{MockHttpTransport, MockLogger};
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;
    use std::sync::Arc;

    fn settings(backend: BackendKind) -> ApiSettings {
        ApiSettings::builder()
            .api_key(SecretString::new("key".into()))
            .project("my-project")
            .app_id("my-appid")
            .backend(backend)
            .build()
            .unwrap()
    }

    fn request() -> CountTokensRequest {
        CountTokensRequest {
            contents: vec![Content::user_text("hello")],
            ..Default::default()
        }
    }

    fn setup(status: u16, fixture: &str) -> (Dispatcher, Arc<MockHttpTransport>) {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(status, &load_fixture(fixture));
        let dispatcher = Dispatcher::new(transport.clone(), Arc::new(MockLogger::new()));
        (dispatcher, transport)
    }

    #[tokio::test]
    async fn test_total_tokens() {
        let (dispatcher, transport) = setup(200, "vertexai/unary-success-total-tokens.json");
        let settings = settings(BackendKind::VertexAi);

        let result = count_tokens(&dispatcher, &settings, "model", &request(), None)
            .await
            .unwrap();

        assert_eq!(result.total_tokens, 6);
        assert_eq!(result.total_billable_characters, Some(16));
        transport.verify_request(0, crate::transport::HttpMethod::Post, "model:countTokens");
        let body = transport.last_request().unwrap().body.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("contents"));
    }

    #[tokio::test]
    async fn test_modality_details() {
        let (dispatcher, _) = setup(200, "vertexai/unary-success-detailed-token-response.json");
        let settings = settings(BackendKind::VertexAi);

        let result = count_tokens(&dispatcher, &settings, "model", &request(), None)
            .await
            .unwrap();

        assert_eq!(result.total_tokens, 1837);
        assert_eq!(result.total_billable_characters, Some(117));
        let details = result.prompt_tokens_details.unwrap();
        assert_eq!(details[0].modality, "IMAGE");
        assert_eq!(details[0].token_count, 1806);
    }

    #[tokio::test]
    async fn test_no_billable_characters() {
        let (dispatcher, _) = setup(200, "vertexai/unary-success-no-billable-characters.json");
        let settings = settings(BackendKind::VertexAi);

        let result = count_tokens(&dispatcher, &settings, "model", &request(), None)
            .await
            .unwrap();

        assert_eq!(result.total_tokens, 258);
        assert!(result.total_billable_characters.is_none());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("totalBillableCharacters").is_none());
    }

    #[tokio::test]
    async fn test_model_not_found() {
        let (dispatcher, _) = setup(404, "vertexai/unary-failure-model-not-found.json");
        let settings = settings(BackendKind::VertexAi);

        let err = count_tokens(&dispatcher, &settings, "model", &request(), None)
            .await
            .unwrap_err();

        assert_eq!(err.code, AiErrorCode::FetchError);
        assert!(err.message.contains("404"));
        assert!(err.message.contains("not found"));
    }

    #[tokio::test]
    async fn test_google_ai_request_mapping() {
        let (dispatcher, transport) = setup(200, "googleai/unary-success-total-tokens.json");
        let settings = settings(BackendKind::GoogleAi);

        count_tokens(&dispatcher, &settings, "model", &request(), None)
            .await
            .unwrap();

        let body = transport.last_request().unwrap().body.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(sent, map_count_tokens_request(&request(), "model"));
        assert_eq!(sent["generateContentRequest"]["model"], "model");
        assert_eq!(
            sent["generateContentRequest"]["contents"][0]["parts"][0]["text"],
            "hello"
        );
    }
}
