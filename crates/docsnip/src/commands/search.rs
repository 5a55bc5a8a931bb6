//! `docsnip search` command implementation.

use std::time::Instant;

use clap::Args;
use docsnip_config::Config;
use docsnip_fetch::Fetch;
use docsnip_search::{Delivery, Key, KeyOutcome, SearchBox, SearchClient};

use super::{http_fetcher, search_paths};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Search term.
    term: String,

    /// Print the results page URL instead of querying (as pressing Enter does).
    #[arg(long)]
    navigate: bool,
}

/// What a search run produced.
#[derive(Debug, PartialEq, Eq)]
enum SearchOutcome {
    /// Absolute URL of the full results page.
    Navigate(String),
    /// Rendered result list.
    Results(String),
    /// The endpoint returned no hits.
    NoResults,
}

impl SearchArgs {
    /// Execute the search command.
    ///
    /// # Errors
    ///
    /// Returns an error if `site.base_url` is unset or the search request
    /// fails.
    pub(crate) fn execute(self, config: &Config) -> Result<(), CliError> {
        let output = Output::new();
        let base_url = config.require_base_url()?;
        let client = SearchClient::new(http_fetcher(config), base_url, search_paths(config));
        let mut search_box = SearchBox::new(search_paths(config), config.search.debounce());

        match self.run(&client, &mut search_box, base_url)? {
            SearchOutcome::Navigate(url) => output.result(&url),
            SearchOutcome::Results(html) => {
                if let Some(class) = search_box.opener_class() {
                    output.highlight(&format!("Search opener class: {class}"));
                }
                output.result(&html);
            }
            SearchOutcome::NoResults => {
                output.warning(&format!("No results for \"{}\"", self.term));
            }
        }
        Ok(())
    }

    /// Type the term into `search_box` and run the query it issues.
    fn run<F: Fetch>(
        &self,
        client: &SearchClient<F>,
        search_box: &mut SearchBox,
        base_url: &str,
    ) -> Result<SearchOutcome, CliError> {
        let key = if self.navigate { Key::Enter } else { Key::Other };
        let deadline = match search_box.on_key(&self.term, key, Instant::now()) {
            KeyOutcome::Navigate(path) => {
                return Ok(SearchOutcome::Navigate(format!("{base_url}{path}")));
            }
            KeyOutcome::Scheduled(deadline) => deadline,
        };

        let Some(query) = search_box.poll(deadline) else {
            return Ok(SearchOutcome::NoResults);
        };
        let hits = client.search(&query)?;
        match search_box.deliver(&query, &hits) {
            Delivery::Rendered => Ok(search_box
                .results_html()
                .map_or(SearchOutcome::NoResults, |html| {
                    SearchOutcome::Results(html.to_owned())
                })),
            Delivery::Stale | Delivery::Empty => Ok(SearchOutcome::NoResults),
        }
    }
}
