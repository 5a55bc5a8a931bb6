//! Search endpoint client.

use docsnip_fetch::{CachePolicy, Fetch, FetchError};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::debug;

use crate::hit::SearchHit;

/// Characters escaped when a term is placed in a path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Error from a search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The endpoint could not be reached or answered with an error.
    #[error("search request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The response was not a JSON array of results.
    #[error("invalid search response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Site-relative paths of the search endpoint and results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    /// Prefix of the JSON endpoint, e.g. `/api/search/`.
    pub api_path: String,
    /// Prefix of the full results page, e.g. `/SearchResults/`.
    pub results_path: String,
}

impl Default for SearchPaths {
    fn default() -> Self {
        Self {
            api_path: "/api/search/".to_owned(),
            results_path: "/SearchResults/".to_owned(),
        }
    }
}

impl SearchPaths {
    /// Site-relative endpoint URL for `term`.
    #[must_use]
    pub fn api_url(&self, term: &str) -> String {
        format!("{}{}", self.api_path, encode_segment(term))
    }

    /// Site-relative results page URL for `term`.
    #[must_use]
    pub fn results_url(&self, term: &str) -> String {
        format!("{}{}", self.results_path, encode_segment(term))
    }
}

fn encode_segment(term: &str) -> String {
    utf8_percent_encode(term, SEGMENT_ENCODE_SET).to_string()
}

/// Queries the search endpoint of one site.
pub struct SearchClient<F> {
    fetcher: F,
    base_url: String,
    paths: SearchPaths,
}

impl<F: Fetch> SearchClient<F> {
    /// Create a client for the site at `base_url` (scheme and host).
    #[must_use]
    pub fn new(fetcher: F, base_url: &str, paths: SearchPaths) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
            paths,
        }
    }

    #[must_use]
    pub fn paths(&self) -> &SearchPaths {
        &self.paths
    }

    /// Results for `term`, bypassing caches.
    pub fn search(&self, term: &str) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!("{}{}", self.base_url, self.paths.api_url(term));
        debug!(url = %url, "searching");
        let body = self.fetcher.fetch(&url, CachePolicy::NoCache)?;
        let hits: Vec<SearchHit> = serde_json::from_str(&body)?;
        debug!(term, hits = hits.len(), "search answered");
        Ok(hits)
    }
}
