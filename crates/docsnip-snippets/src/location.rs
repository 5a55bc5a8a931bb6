//! Snippet identity and URLs.

use url::Url;

use crate::error::SnippetError;

/// A pre-rendered HTML fragment in a sibling project's documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Repository name, e.g. `device-detection-cxx`.
    pub project: String,
    /// Documentation version, taken from the current page URL.
    pub version: String,
    /// HTML file under the version directory.
    pub file: String,
    /// Id of the fragment within the file.
    pub tag: String,
}

impl Snippet {
    /// URL of the snippet page relative to the current page.
    #[must_use]
    pub fn relative_url(&self) -> String {
        snippet_url(&self.project, &self.version, &self.file)
    }
}

/// Documentation version of a page.
///
/// Returns the path segment immediately following `doc_base`, e.g. `4.4`
/// for `https://site/documentation/4.4/Foo.html`. Returns `None` when the
/// marker is absent or the segment is empty.
#[must_use]
pub fn doc_version(page_url: &str, doc_base: &str) -> Option<String> {
    let marker = format!("{doc_base}/");
    let start = page_url.find(&marker)? + marker.len();
    let rest = &page_url[start..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let version = &rest[..end];
    (!version.is_empty()).then(|| version.to_owned())
}

/// Relative URL of a snippet page: `../../{project}/{version}/{file}`.
#[must_use]
pub fn snippet_url(project: &str, version: &str, file: &str) -> String {
    format!("../../{project}/{version}/{file}")
}

/// Parse the URL of the page a snippet is shown on.
pub fn parse_page_url(page_url: &str) -> Result<Url, SnippetError> {
    Url::parse(page_url).map_err(|source| SnippetError::InvalidUrl {
        url: page_url.to_owned(),
        source,
    })
}

/// Resolve `relative` against `page_url` the way the browser does.
pub fn resolve_url(page_url: &str, relative: &str) -> Result<Url, SnippetError> {
    parse_page_url(page_url)?
        .join(relative)
        .map_err(|source| SnippetError::InvalidUrl {
            url: relative.to_owned(),
            source,
        })
}
