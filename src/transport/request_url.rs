//! Request URL construction for the Firebase AI backends.

use std::fmt;

use super::task::Task;
use crate::config::{ApiSettings, RequestOptions, DEFAULT_API_VERSION};

/// Fully describes the endpoint of one request.
///
/// Rendering is pure: the same inputs always produce the same string, and no
/// settings field (API key, project, app id, location) is ever part of it.
/// Credentials travel in headers only.
#[derive(Debug, Clone, Copy)]
pub struct RequestUrl<'a> {
    /// Resource path, e.g. `models/gemini-2.0-flash`.
    pub resource_path: &'a str,
    /// Operation to invoke on the resource.
    pub task: Task,
    /// Settings of the calling client.
    pub settings: &'a ApiSettings,
    /// Request a server-sent-events response.
    pub stream: bool,
    /// Per-request overrides.
    pub options: Option<&'a RequestOptions>,
}

impl<'a> RequestUrl<'a> {
    /// Describe a request endpoint.
    pub fn new(
        resource_path: &'a str,
        task: Task,
        settings: &'a ApiSettings,
        stream: bool,
        options: Option<&'a RequestOptions>,
    ) -> Self {
        Self {
            resource_path,
            task,
            settings,
            stream,
            options,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        match self.options.and_then(|o| o.base_url.as_ref()) {
            Some(url) => url.as_str().trim_end_matches('/').to_string(),
            None => self.settings.backend.default_base_url(),
        }
    }

    /// API version path segment.
    pub fn api_version(&self) -> &str {
        self.options
            .and_then(|o| o.api_version.as_deref())
            .unwrap_or(DEFAULT_API_VERSION)
    }
}

impl fmt::Display for RequestUrl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}:{}",
            self.base_url(),
            self.api_version(),
            self.resource_path.trim_start_matches('/'),
            self.task
        )?;
        if self.stream {
            f.write_str("?alt=sse")?;
        }
        Ok(())
    }
}
