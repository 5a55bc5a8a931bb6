//! Mock fetcher for testing.
//!
//! Provides [`MockFetcher`] for unit testing without network access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{CachePolicy, Fetch, FetchError};

/// Mock fetcher for testing.
///
/// Serves bodies registered with the builder methods and records every
/// request so tests can assert on URLs and cache policies. Unregistered
/// URLs answer with a 404 response.
///
/// # Example
///
/// ```ignore
/// use docsnip_fetch::{CachePolicy, Fetch, MockFetcher};
///
/// let fetcher = MockFetcher::new().with_response("https://a/b", "body");
/// assert_eq!(fetcher.fetch("https://a/b", CachePolicy::Default).unwrap(), "body");
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, Result<String, u16>>,
    requests: RwLock<Vec<(String, CachePolicy)>>,
}

impl MockFetcher {
    /// Create a fetcher with no registered responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with_response(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    /// Answer `url` with an HTTP error status.
    #[must_use]
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Err(status));
        self
    }

    /// Requests made so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, CachePolicy)> {
        self.requests.read().unwrap().clone()
    }

    /// Number of requests made for `url`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .read()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .count()
    }
}

impl Fetch for MockFetcher {
    fn fetch(&self, url: &str, policy: CachePolicy) -> Result<String, FetchError> {
        self.requests
            .write()
            .unwrap()
            .push((url.to_owned(), policy));

        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::HttpResponse {
                url: url.to_owned(),
                status: *status,
                body: String::new(),
            }),
            None => Err(FetchError::HttpResponse {
                url: url.to_owned(),
                status: 404,
                body: "Not Found".to_owned(),
            }),
        }
    }
}
