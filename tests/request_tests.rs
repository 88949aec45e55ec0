//! End-to-end tests of request dispatch against the mock transport.

use integrations_firebase_ai::mocks::{
    MockAppCheckTokenProvider, MockAuthTokenProvider, MockHttpTransport, MockLogger,
};
use integrations_firebase_ai::transport::{
    HttpMethod, APP_CHECK_HEADER, APP_ID_HEADER, AUTHORIZATION_HEADER,
};
use integrations_firebase_ai::{
    AiErrorCode, ApiSettings, BackendKind, Dispatcher, RequestOptions, RequestUrl, Task,
};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

fn settings_builder(backend: BackendKind) -> integrations_firebase_ai::ApiSettingsBuilder {
    ApiSettings::builder()
        .api_key(SecretString::new("key".into()))
        .project("my-project")
        .app_id("my-appid")
        .backend(backend)
}

fn dispatcher(transport: &Arc<MockHttpTransport>, logger: &Arc<MockLogger>) -> Dispatcher {
    Dispatcher::new(transport.clone(), logger.clone())
}

#[test]
fn test_url_stream_flag_for_every_task() {
    // Arrange
    let settings = settings_builder(BackendKind::VertexAi).build().unwrap();
    let tasks = [
        Task::GenerateContent,
        Task::StreamGenerateContent,
        Task::CountTokens,
        Task::EmbedContent,
        Task::BatchEmbedContents,
        Task::Predict,
    ];

    for task in tasks {
        // Act
        let streamed = RequestUrl::new("models/m", task, &settings, true, None).to_string();
        let unary = RequestUrl::new("models/m", task, &settings, false, None).to_string();

        // Assert
        let suffix = format!("models/m:{}", task.wire_name());
        assert!(streamed.contains(&suffix) && streamed.ends_with("?alt=sse"));
        assert!(unary.contains(&suffix) && !unary.contains("alt=sse"));
        for value in ["key", "my-project", "my-appid", "us-central1"] {
            assert!(!streamed.contains(value), "{value} leaked into {streamed}");
        }
    }
}

#[test]
fn test_url_host_per_backend_and_override() {
    // Arrange
    let google = settings_builder(BackendKind::GoogleAi).build().unwrap();
    let vertex = settings_builder(BackendKind::VertexAi).build().unwrap();
    let options = RequestOptions::builder()
        .base_url("https://proxy.example.com")
        .unwrap()
        .build();

    // Act & Assert
    assert!(RequestUrl::new("models/m", Task::GenerateContent, &google, false, None)
        .to_string()
        .starts_with("https://generativelanguage.googleapis.com/"));
    assert!(RequestUrl::new("models/m", Task::GenerateContent, &vertex, false, None)
        .to_string()
        .starts_with("https://firebasevertexai.googleapis.com/"));
    assert!(
        RequestUrl::new("models/m", Task::GenerateContent, &vertex, false, Some(&options))
            .to_string()
            .starts_with("https://proxy.example.com/")
    );
}

#[tokio::test]
async fn test_headers_follow_settings() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "{}");
    transport.enqueue_json_response(200, "{}");
    let logger = Arc::new(MockLogger::new());
    let dispatcher = dispatcher(&transport, &logger);

    let with_everything = settings_builder(BackendKind::VertexAi)
        .automatic_data_collection_enabled(true)
        .auth_provider(Arc::new(MockAuthTokenProvider::new(Some("T"))))
        .app_check_provider(Arc::new(MockAppCheckTokenProvider::new("X")))
        .build()
        .unwrap();
    let bare = settings_builder(BackendKind::VertexAi)
        .automatic_data_collection_enabled(false)
        .build()
        .unwrap();

    // Act
    for settings in [&with_everything, &bare] {
        dispatcher
            .make_request("models/m", Task::GenerateContent, settings, false, "{}", None)
            .await
            .unwrap();
    }

    // Assert
    transport.verify_header(0, AUTHORIZATION_HEADER, "Firebase T");
    transport.verify_header(0, APP_CHECK_HEADER, "X");
    transport.verify_header(0, APP_ID_HEADER, "my-appid");

    let requests = transport.get_requests();
    assert!(!requests[1].headers.contains_key(AUTHORIZATION_HEADER));
    assert!(!requests[1].headers.contains_key(APP_CHECK_HEADER));
    assert!(!requests[1].headers.contains_key(APP_ID_HEADER));
}

#[tokio::test]
async fn test_app_check_soft_error_is_fail_open() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "{}");
    let logger = Arc::new(MockLogger::new());
    let settings = settings_builder(BackendKind::GoogleAi)
        .app_check_provider(Arc::new(MockAppCheckTokenProvider::with_error(
            "X",
            "throttled",
        )))
        .build()
        .unwrap();

    // Act
    let response = dispatcher(&transport, &logger)
        .make_request("models/m", Task::GenerateContent, &settings, false, "{}", None)
        .await;

    // Assert
    assert!(response.is_ok());
    transport.verify_header(0, APP_CHECK_HEADER, "X");
    let warnings = logger.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("googleai"));
    assert!(warnings[0].message.contains("throttled"));
}

#[tokio::test]
async fn test_error_message_carries_status_message_and_details() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_response(
        500,
        "Server Error",
        r#"{"error":{"message":"extra info","details":[{"detail":"X"}]}}"#,
    );
    let logger = Arc::new(MockLogger::new());
    let settings = settings_builder(BackendKind::VertexAi).build().unwrap();

    // Act
    let err = dispatcher(&transport, &logger)
        .make_request("models/m", Task::GenerateContent, &settings, false, "{}", None)
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.code, AiErrorCode::FetchError);
    assert!(err.message.contains("500 Server Error"));
    assert!(err.message.contains("extra info"));
    assert!(err.message.contains(r#"{"detail":"X"}"#));
    assert_eq!(
        err.to_string(),
        format!("AI: {} (AI/fetch-error)", err.message)
    );
}

#[tokio::test(start_paused = true)]
async fn test_timeout_from_options() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_hang();
    let logger = Arc::new(MockLogger::new());
    let settings = settings_builder(BackendKind::VertexAi).build().unwrap();
    let options = RequestOptions::builder()
        .timeout(Duration::from_secs(2))
        .build();

    // Act
    let err = dispatcher(&transport, &logger)
        .make_request("models/m", Task::GenerateContent, &settings, false, "{}", Some(&options))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.code, AiErrorCode::FetchError);
    assert!(err.custom_error_data.is_none());
    transport.verify_request(0, HttpMethod::Post, "models/m:generateContent");
    assert!(!logger.warnings().is_empty());
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "{}");
    transport.enqueue_response(500, "Server Error", "");
    let logger = Arc::new(MockLogger::new());
    let dispatcher = dispatcher(&transport, &logger);
    let settings = settings_builder(BackendKind::VertexAi).build().unwrap();

    // Act
    let (first, second) = tokio::join!(
        dispatcher.make_request("models/a", Task::GenerateContent, &settings, false, "{}", None),
        dispatcher.make_request("models/b", Task::GenerateContent, &settings, false, "{}", None),
    );

    // Assert
    assert_eq!(
        [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    transport.verify_request_count(2);
}
