//! Mock implementations for testing.
//!
//! This module provides mock implementations of the transport, the credential
//! providers and the logger for testing the request layer in isolation.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::auth::{AppCheckToken, AppCheckTokenProvider, AuthToken, AuthTokenProvider};
use crate::config::LogLevel;
use crate::observability::Logger;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

enum MockReply {
    Response {
        status: u16,
        status_text: String,
        headers: HashMap<String, String>,
        body: Bytes,
    },
    Error(TransportError),
    Hang,
    HangingBody {
        status: u16,
        status_text: String,
    },
}

/// Mock HTTP transport for testing.
///
/// Replies are consumed in the order they were enqueued and every request is
/// recorded for later verification.
///
/// # Example
///
/// ```
/// use integrations_firebase_ai::mocks::MockHttpTransport;
/// use integrations_firebase_ai::transport::{HttpMethod, HttpRequest, HttpTransport};
/// use std::collections::HashMap;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() {
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, r#"{"totalTokens": 6}"#);
///
/// let request = HttpRequest {
///     method: HttpMethod::Post,
///     url: "https://example.com".to_string(),
///     headers: HashMap::new(),
///     body: None,
/// };
///
/// let response = transport.send(request, CancellationToken::new()).await.unwrap();
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # }
/// ```
pub struct MockHttpTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Enqueue a response with an explicit status text.
    pub fn enqueue_response(&self, status: u16, status_text: &str, body: &str) {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        lock(&self.replies).push_back(MockReply::Response {
            status,
            status_text: status_text.to_string(),
            headers,
            body: Bytes::from(body.to_string()),
        });
    }

    /// Enqueue a JSON response using the canonical status text.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default();
        self.enqueue_response(status, status_text, body);
    }

    /// Enqueue a transport error.
    pub fn enqueue_error(&self, error: TransportError) {
        lock(&self.replies).push_back(MockReply::Error(error));
    }

    /// Enqueue a reply that never arrives; the request only ends when it is
    /// cancelled.
    pub fn enqueue_hang(&self) {
        lock(&self.replies).push_back(MockReply::Hang);
    }

    /// Enqueue a response whose status arrives but whose body never does.
    pub fn enqueue_hanging_body(&self, status: u16, status_text: &str) {
        lock(&self.replies).push_back(MockReply::HangingBody {
            status,
            status_text: status_text.to_string(),
        });
    }

    /// Get all requests that were made.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Get the last request that was made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Verify that exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = lock(&self.requests).len();
        assert_eq!(actual, expected, "Expected {expected} requests, got {actual}");
    }

    /// Verify that a request was made with the expected method and URL.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = lock(&self.requests);
        assert!(index < requests.len(), "No request at index {index}");

        let request = &requests[index];
        assert_eq!(request.method, method, "Expected method {method:?}, got {:?}", request.method);
        assert!(
            request.url.contains(url_contains),
            "Expected URL to contain '{url_contains}', got '{}'",
            request.url
        );
    }

    /// Verify that a request contains a specific header.
    pub fn verify_header(&self, index: usize, header_name: &str, header_value: &str) {
        let requests = lock(&self.requests);
        assert!(index < requests.len(), "No request at index {index}");

        let actual_value = requests[index].headers.get(header_name);
        assert_eq!(
            actual_value.map(String::as_str),
            Some(header_value),
            "Expected header '{header_name}' to be '{header_value}', got {actual_value:?}"
        );
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(
        &self,
        request: HttpRequest,
        cancel: CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        let reply = lock(&self.replies).pop_front();
        match reply {
            Some(MockReply::Response {
                status,
                status_text,
                headers,
                body,
            }) => Ok(HttpResponse::from_bytes(status, status_text, headers, body)),
            Some(MockReply::Error(error)) => Err(error),
            Some(MockReply::HangingBody {
                status,
                status_text,
            }) => Ok(HttpResponse {
                status,
                status_text,
                headers: HashMap::new(),
                body: Box::pin(futures::stream::pending::<Result<Bytes, TransportError>>()),
            }),
            Some(MockReply::Hang) => {
                cancel.cancelled().await;
                Err(TransportError::Aborted)
            }
            None => Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            )),
        }
    }
}

/// Mock Firebase Auth provider.
pub struct MockAuthTokenProvider {
    token: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockAuthTokenProvider {
    /// Provider answering with `token` (`None` means signed out).
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every answer by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times the provider was queried.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthTokenProvider for MockAuthTokenProvider {
    async fn get_auth_token(&self) -> Option<AuthToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.token.as_deref().map(AuthToken::new)
    }
}

/// Mock App Check provider.
pub struct MockAppCheckTokenProvider {
    token: Option<String>,
    error: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockAppCheckTokenProvider {
    /// Provider answering with a valid token.
    pub fn new(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            error: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider answering with a token and a soft error.
    pub fn with_error(token: &str, error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(token)
        }
    }

    /// Provider answering with no token at all.
    pub fn empty() -> Self {
        Self {
            token: None,
            error: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every answer by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times the provider was queried.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AppCheckTokenProvider for MockAppCheckTokenProvider {
    async fn get_app_check_token(&self) -> Option<AppCheckToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let token = self.token.as_deref()?;
        Some(match &self.error {
            Some(error) => AppCheckToken::with_error(token, error.as_str()),
            None => AppCheckToken::new(token),
        })
    }
}

/// A log entry captured by [`MockLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Level the entry was logged at.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
    /// Structured fields.
    pub fields: Value,
}

/// Logger that records every entry.
#[derive(Default)]
pub struct MockLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MockLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.entries).clone()
    }

    /// Recorded warnings.
    pub fn warnings(&self) -> Vec<LogEntry> {
        self.entries_at(LogLevel::Warn)
    }

    /// Recorded entries at `level`.
    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        lock(&self.entries)
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    fn record(&self, level: LogLevel, message: &str, fields: Value) {
        lock(&self.entries).push(LogEntry {
            level,
            message: message.to_string(),
            fields,
        });
    }
}

impl Logger for MockLogger {
    fn debug(&self, message: &str, fields: Value) {
        self.record(LogLevel::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: Value) {
        self.record(LogLevel::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        self.record(LogLevel::Warn, message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        self.record(LogLevel::Error, message, fields);
    }
}
