//! Backend selection for Firebase AI requests.

use std::fmt;
use std::str::FromStr;

use super::{GOOGLE_AI_DOMAIN, VERTEX_AI_DOMAIN};
use crate::error::{AiError, AiErrorCode};

/// The server integration a request targets.
///
/// Carried inside every [`ApiSettings`](super::ApiSettings); callers branch on
/// the variant or use the accessors below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BackendKind {
    /// Gemini Developer API, hosted directly.
    #[default]
    GoogleAi,
    /// Vertex AI Gemini API, proxied through Firebase in a region.
    VertexAi,
}

impl BackendKind {
    /// Short name used in log messages.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::GoogleAi => "googleai",
            BackendKind::VertexAi => "vertexai",
        }
    }

    /// Default host serving this backend.
    pub fn default_domain(self) -> &'static str {
        match self {
            BackendKind::GoogleAi => GOOGLE_AI_DOMAIN,
            BackendKind::VertexAi => VERTEX_AI_DOMAIN,
        }
    }

    /// Default base URL (scheme and host) for this backend.
    pub fn default_base_url(self) -> String {
        format!("https://{}", self.default_domain())
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "googleai" | "google_ai" | "google-ai" => Ok(BackendKind::GoogleAi),
            "vertexai" | "vertex_ai" | "vertex-ai" => Ok(BackendKind::VertexAi),
            other => Err(AiError::new(
                AiErrorCode::Error,
                format!("Unknown backend '{other}', expected 'googleai' or 'vertexai'"),
            )),
        }
    }
}
