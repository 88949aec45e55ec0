//! Request dispatch: URL, headers, timeout and error classification.

use bytes::Bytes;
use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::error::TransportError;
use super::headers::get_headers;
use super::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use super::reqwest::ReqwestTransport;
use super::request_url::RequestUrl;
use super::task::Task;
use crate::config::{ApiSettings, RequestOptions};
use crate::error::{classify_response, AiError, AiErrorCode, AiResult};
use crate::observability::{DefaultLogger, Logger};

/// Connect timeout of the default reqwest transport.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Aborts the timeout task when the request finishes first.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Sends requests to the Firebase AI backends.
///
/// Every call is a single attempt: no retries, no caching and no sharing
/// between concurrent calls.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    logger: Arc<dyn Logger>,
}

impl Dispatcher {
    /// Create a dispatcher over the given transport and logger.
    pub fn new(transport: Arc<dyn HttpTransport>, logger: Arc<dyn Logger>) -> Self {
        Self { transport, logger }
    }

    /// Create a dispatcher over a reqwest transport with the default logger.
    pub fn with_defaults() -> AiResult<Self> {
        let transport = ReqwestTransport::new(DEFAULT_CONNECT_TIMEOUT)
            .map_err(|e| AiError::new(AiErrorCode::Error, e.to_string()))?;
        Ok(Self::new(Arc::new(transport), Arc::new(DefaultLogger::default())))
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Send `body` to `{resource_path}:{task}` and return the raw response.
    ///
    /// On a 2xx status the response is returned with its body unread, so
    /// `stream` callers can consume server-sent events as they arrive. Any
    /// other status is turned into an [`AiError`] by
    /// [`classify_response`]. Transport failures, including the timeout,
    /// surface as [`AiErrorCode::FetchError`].
    pub async fn make_request(
        &self,
        resource_path: &str,
        task: Task,
        settings: &ApiSettings,
        stream: bool,
        body: impl Into<Bytes>,
        options: Option<&RequestOptions>,
    ) -> AiResult<HttpResponse> {
        let url = RequestUrl::new(resource_path, task, settings, stream, options);
        let url_string = url.to_string();
        let timeout = RequestOptions::effective_timeout(options);

        self.logger.debug(
            "Dispatching request",
            json!({
                "url": url_string,
                "task": task.wire_name(),
                "backend": settings.backend.name(),
                "stream": stream,
                "timeout_ms": u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        );

        let headers = get_headers(&url, self.logger.as_ref()).await;
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: url_string.clone(),
            headers,
            body: Some(body.into()),
        };

        let cancel = CancellationToken::new();
        let _timer = AbortOnDrop(tokio::spawn({
            let cancel = cancel.clone();
            async move {
                tokio::time::sleep(timeout).await;
                cancel.cancel();
            }
        }));

        let response = match self.transport.send(request, cancel.clone()).await {
            Ok(response) => response,
            Err(error) => return Err(self.fetch_failed(&url_string, &error, timeout)),
        };

        if response.is_success() {
            return Ok(response);
        }

        let status = response.status;
        let status_text = response.status_text.clone();
        let body = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(self.fetch_failed(&url_string, &TransportError::Aborted, timeout));
            }
            body = read_body(response) => body,
        };

        let error = classify_response(&url, status, &status_text, body.as_deref());
        self.logger.warn(
            "Request failed",
            json!({
                "url": url_string,
                "status": status,
                "code": error.code.as_str(),
            }),
        );
        Err(error)
    }

    fn fetch_failed(&self, url: &str, error: &TransportError, timeout: Duration) -> AiError {
        let cause = match error {
            TransportError::Aborted => format!("Request aborted after {}ms", timeout.as_millis()),
            other => other.to_string(),
        };
        self.logger.warn(
            "Request could not be completed",
            json!({ "url": url, "error": cause }),
        );
        AiError::new(
            AiErrorCode::FetchError,
            format!("Error fetching from {url}: {cause}"),
        )
    }
}

/// Read an error body; a body that fails midway counts as absent.
async fn read_body(response: HttpResponse) -> Option<Vec<u8>> {
    let mut body = response.body;
    let mut buf = Vec::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk.ok()?);
    }
    Some(buf)
}
