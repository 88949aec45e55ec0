//! Core HTTP transport abstractions for the Firebase AI request layer.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{stream, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

use super::error::TransportError;
use crate::error::{AiError, AiErrorCode};

/// HTTP request for the transport layer.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Bytes>,
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// POST
    Post,
}

/// Chunked body stream of a response.
pub type ChunkedStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Raw HTTP response handed back to callers.
///
/// The body is left unread so streaming (`alt=sse`) and unary responses
/// share one shape; use [`bytes`](Self::bytes), [`text`](Self::text) or
/// [`json`](Self::json) to consume it.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text (canonical reason phrase).
    pub status_text: String,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: ChunkedStream,
}

impl HttpResponse {
    /// Build a response from a fully buffered body.
    pub fn from_bytes(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<Bytes>,
    ) -> Self {
        let body: Bytes = body.into();
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body: Box::pin(stream::iter(std::iter::once(Ok::<Bytes, TransportError>(body)))),
        }
    }

    /// Build a response from a list of body chunks.
    pub fn from_chunks(status: u16, status_text: impl Into<String>, chunks: Vec<Bytes>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: HashMap::new(),
            body: Box::pin(stream::iter(chunks.into_iter().map(Ok::<Bytes, TransportError>))),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the whole body.
    pub async fn bytes(self) -> Result<Bytes, TransportError> {
        let mut body = self.body;
        let mut buf = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Read the whole body as UTF-8 text.
    pub async fn text(self) -> Result<String, TransportError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| TransportError::Body(e.to_string()))
    }

    /// Read the whole body and deserialize it as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, AiError> {
        let bytes = self
            .bytes()
            .await
            .map_err(|e| AiError::new(AiErrorCode::ResponseError, e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// HTTP transport abstraction for testability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    ///
    /// Implementations must stop waiting and return
    /// [`TransportError::Aborted`] once `cancel` fires.
    async fn send(
        &self,
        request: HttpRequest,
        cancel: CancellationToken,
    ) -> Result<HttpResponse, TransportError>;
}
