//! Snippet loading errors.

use docsnip_fetch::FetchError;

/// Error while loading a snippet.
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    /// The page URL has no version segment after the documentation base.
    #[error("no documentation version in page URL {0}")]
    NoVersion(String),

    /// The page URL or the snippet URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The target container does not exist on the page.
    #[error("container #{0} not found")]
    ContainerNotFound(String),

    /// The snippet page could not be fetched.
    #[error("failed to fetch snippet: {0}")]
    Fetch(#[from] FetchError),
}
