//! Error types for fetching.

/// Error from a fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request to {url} failed: {source}")]
    HttpRequest {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: ureq::Error,
    },

    /// HTTP response error (server returned error status).
    #[error("HTTP error from {url}: {status} - {body}")]
    HttpResponse {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },
}

impl FetchError {
    /// HTTP status associated with the error, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse { status, .. } => Some(*status),
            Self::HttpRequest { .. } => None,
        }
    }
}
