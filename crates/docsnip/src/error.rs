//! CLI error types.

use docsnip_config::ConfigError;
use docsnip_platforms::PlatformsError;
use docsnip_search::SearchError;
use docsnip_snippets::SnippetError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Snippet(#[from] SnippetError),

    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("{0}")]
    Platforms(#[from] PlatformsError),

    #[error("{0}")]
    Validation(String),
}
