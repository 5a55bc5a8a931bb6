//! Fetch capability for docsnip.
//!
//! Every network boundary in docsnip (snippet pages, the search endpoint,
//! the runner readme and CI options files) goes through the [`Fetch`] trait,
//! so the logic built on top of it is testable without a network.
//!
//! # Implementations
//!
//! - [`HttpFetcher`]: blocking HTTP client backed by a shared `ureq` agent
//! - [`MockFetcher`]: canned responses for tests (behind `mock` feature flag)

mod error;
mod http;
#[cfg(feature = "mock")]
mod mock;

pub use error::FetchError;
pub use http::HttpFetcher;
#[cfg(feature = "mock")]
pub use mock::MockFetcher;

/// Cache policy for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Let intermediaries serve cached responses.
    #[default]
    Default,
    /// Force revalidation (`Cache-Control: no-cache`).
    NoCache,
}

/// Retrieves text documents by URL.
pub trait Fetch {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request fails or the server answers
    /// with an error status.
    fn fetch(&self, url: &str, policy: CachePolicy) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str, policy: CachePolicy) -> Result<String, FetchError> {
        (**self).fetch(url, policy)
    }
}
