//! Transport layer error types.

/// Transport error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established or was lost.
    #[error("Connection error: {0}")]
    Connection(String),
    /// The request was cancelled before a response arrived.
    #[error("Request aborted")]
    Aborted,
    /// The request could not be built or sent.
    #[error("Request error: {0}")]
    Request(String),
    /// The response body failed while being read.
    #[error("Failed to read response body: {0}")]
    Body(String),
}
