//! Client facade over the dispatcher and the model methods.

mod builder;

pub use builder::FirebaseAiClientBuilder;

use bytes::Bytes;
use std::sync::Arc;

use crate::config::{ApiSettings, RequestOptions};
use crate::error::AiResult;
use crate::methods::{self, CountTokensRequest, CountTokensResponse};
use crate::transport::{Dispatcher, HttpResponse, Task};

/// Firebase AI client bound to one set of [`ApiSettings`].
///
/// Cloning is cheap; clones share the settings and the transport.
#[derive(Clone)]
pub struct FirebaseAiClient {
    settings: Arc<ApiSettings>,
    dispatcher: Dispatcher,
}

impl FirebaseAiClient {
    /// Create a new builder.
    pub fn builder() -> FirebaseAiClientBuilder {
        FirebaseAiClientBuilder::new()
    }

    /// Settings of this client.
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Send an opaque body to `{resource_path}:{task}`.
    ///
    /// See [`Dispatcher::make_request`].
    pub async fn make_request(
        &self,
        resource_path: &str,
        task: Task,
        stream: bool,
        body: impl Into<Bytes>,
        options: Option<&RequestOptions>,
    ) -> AiResult<HttpResponse> {
        self.dispatcher
            .make_request(resource_path, task, &self.settings, stream, body, options)
            .await
    }

    /// Count the tokens `request` would use on `model`.
    ///
    /// `model` may be a bare name such as `gemini-2.0-flash`; it is expanded
    /// to the backend's resource path first.
    pub async fn count_tokens(
        &self,
        model: &str,
        request: &CountTokensRequest,
        options: Option<&RequestOptions>,
    ) -> AiResult<CountTokensResponse> {
        let model = methods::normalize_model_name(model, self.settings.backend)?;
        methods::count_tokens(&self.dispatcher, &self.settings, &model, request, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;
    use crate::error::AiErrorCode;
    use crate::methods::Content;
    use crate::mocks::{MockHttpTransport, MockLogger};
    use crate::transport::HttpMethod;
    use secrecy::SecretString;

    fn client(backend: BackendKind, transport: &Arc<MockHttpTransport>) -> FirebaseAiClient {
        FirebaseAiClient::builder()
            .api_key(SecretString::new("key".into()))
            .project("my-project")
            .backend(backend)
            .transport(transport.clone())
            .logger(Arc::new(MockLogger::new()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_count_tokens_normalizes_model() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, r#"{"totalTokens":3}"#);
        let client = client(BackendKind::VertexAi, &transport);

        let request = CountTokensRequest {
            contents: vec![Content::user_text("hi")],
            ..Default::default()
        };
        let response = client
            .count_tokens("gemini-2.0-flash", &request, None)
            .await
            .unwrap();

        assert_eq!(response.total_tokens, 3);
        transport.verify_request(
            0,
            HttpMethod::Post,
            "/v1beta/publishers/google/models/gemini-2.0-flash:countTokens",
        );
    }

    #[tokio::test]
    async fn test_count_tokens_without_model() {
        let transport = Arc::new(MockHttpTransport::new());
        let client = client(BackendKind::GoogleAi, &transport);

        let err = client
            .count_tokens("", &CountTokensRequest::default(), None)
            .await
            .unwrap_err();

        assert_eq!(err.code, AiErrorCode::NoModel);
        transport.verify_request_count(0);
    }

    #[tokio::test]
    async fn test_make_request_streams_raw_body() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_response(200, "OK", "data: {}\n\n");
        let client = client(BackendKind::GoogleAi, &transport);

        let response = client
            .make_request("models/gemini-pro", Task::StreamGenerateContent, true, "{}", None)
            .await
            .unwrap();

        assert_eq!(response.text().await.unwrap(), "data: {}\n\n");
        transport.verify_request(
            0,
            HttpMethod::Post,
            "generativelanguage.googleapis.com/v1beta/models/gemini-pro:streamGenerateContent?alt=sse",
        );
    }
}
