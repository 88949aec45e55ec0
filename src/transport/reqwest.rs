//! Reqwest-based HTTP transport implementation.

use super::error::TransportError;
use super::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use ::reqwest::Client;
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Reqwest-based HTTP transport.
///
/// The client carries no overall timeout of its own; the deadline of each
/// request is enforced through the cancellation token passed to
/// [`send`](HttpTransport::send).
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport with the given connect timeout.
    pub fn new(connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn convert_method(method: HttpMethod) -> ::reqwest::Method {
        match method {
            HttpMethod::Post => ::reqwest::Method::POST,
        }
    }

    /// Every header must survive conversion; the value is left out of the
    /// error since it may be a credential.
    fn convert_headers(
        headers: HashMap<String, String>,
    ) -> Result<::reqwest::header::HeaderMap, TransportError> {
        let mut header_map = ::reqwest::header::HeaderMap::new();
        for (key, value) in headers {
            match (
                ::reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                ::reqwest::header::HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(val)) => {
                    header_map.insert(name, val);
                }
                _ => return Err(TransportError::Request(format!("Invalid header {key}"))),
            }
        }
        Ok(header_map)
    }

    fn extract_headers(headers: &::reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpRequest,
        cancel: CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(Self::convert_method(request.method), &request.url)
            .headers(Self::convert_headers(request.headers)?);

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(TransportError::Aborted),
            result = req_builder.send() => result.map_err(|e| {
                if e.is_request() {
                    TransportError::Request(e.to_string())
                } else {
                    TransportError::Connection(e.to_string())
                }
            })?,
        };

        let status = response.status();
        let headers = Self::extract_headers(response.headers());
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| TransportError::Body(e.to_string())));

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: Box::pin(body),
        })
    }
}
