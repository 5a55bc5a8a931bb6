//! Fetch-and-render driver for the tested platforms table.

use std::cell::OnceCell;

use docsnip_fetch::{CachePolicy, Fetch, FetchError};
use serde_json::Value;
use tracing::{info, warn};

use crate::options::{ConfigKey, group_by_platform};
use crate::runners::RunnerCatalog;
use crate::table::render_table;

/// Placeholder replaced by the project name in the options URL.
const PROJECT_PLACEHOLDER: &str = "{project}";

/// Error building a tested platforms table.
#[derive(Debug, thiserror::Error)]
pub enum PlatformsError {
    /// The project's CI options could not be fetched.
    #[error("failed to fetch CI options for {project}: {source}")]
    Options {
        project: String,
        #[source]
        source: FetchError,
    },

    /// The CI options were not a JSON array.
    #[error("invalid CI options for {project}: {source}")]
    InvalidOptions {
        project: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Builds tested platforms tables, fetching the runner readme at most once.
pub struct TestedVersions<F> {
    fetcher: F,
    readme_url: String,
    options_url: String,
    catalog: OnceCell<RunnerCatalog>,
}

impl<F: Fetch> TestedVersions<F> {
    /// Create a builder.
    ///
    /// `options_url` contains `{project}`, replaced per table.
    #[must_use]
    pub fn new(fetcher: F, readme_url: impl Into<String>, options_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            readme_url: readme_url.into(),
            options_url: options_url.into(),
            catalog: OnceCell::new(),
        }
    }

    /// Runner catalog, fetched on first use.
    ///
    /// A failed fetch yields an empty catalog for this call (platforms then
    /// render as bare image labels) and is retried on the next call.
    #[must_use]
    pub fn catalog(&self) -> RunnerCatalog {
        if let Some(catalog) = self.catalog.get() {
            return catalog.clone();
        }
        match self.fetcher.fetch(&self.readme_url, CachePolicy::Default) {
            Ok(markdown) => self
                .catalog
                .get_or_init(|| RunnerCatalog::parse(&markdown))
                .clone(),
            Err(e) => {
                warn!(url = %self.readme_url, error = %e, "runner readme unavailable");
                RunnerCatalog::default()
            }
        }
    }

    /// CI options of `project`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformsError`] if the options file cannot be fetched or
    /// is not a JSON array.
    pub fn options(&self, project: &str) -> Result<Vec<Value>, PlatformsError> {
        let url = self.options_url.replace(PROJECT_PLACEHOLDER, project);
        let body = self
            .fetcher
            .fetch(&url, CachePolicy::Default)
            .map_err(|source| PlatformsError::Options {
                project: project.to_owned(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| PlatformsError::InvalidOptions {
            project: project.to_owned(),
            source,
        })
    }

    /// Render the table of platforms `project` is tested on.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformsError`] if the project's options are unavailable.
    pub fn build(&self, project: &str, keys: &[ConfigKey]) -> Result<String, PlatformsError> {
        let options = self.options(project)?;
        let platforms = group_by_platform(&options, keys);
        let catalog = self.catalog();
        info!(
            project,
            entries = options.len(),
            platforms = platforms.len(),
            "built tested platforms table"
        );
        Ok(render_table(&platforms, keys, &catalog))
    }
}
