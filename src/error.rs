//! Error types for API calls and page loading.

/// Errors produced by REST calls against the bookkeeping API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The configured session cookie is not a valid header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The request never produced a response (connection refused, DNS, etc.).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API response error: status {status}")]
    Status { status: u16 },

    /// The response body could not be decoded into the expected shape.
    #[error("API response parse failed: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the error means the server explicitly rejected the session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403 })
    }
}

/// Errors produced by page loaders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// A required route parameter was absent or empty.
    #[error("missing route parameter `{0}`")]
    MissingParam(&'static str),

    /// No page matches the requested path.
    #[error("no route matches `{0}`")]
    NotFound(String),

    /// Loader output could not be serialized.
    #[error("page data encode failed: {0}")]
    Encode(String),
}
