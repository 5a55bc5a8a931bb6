//! CLI command implementations.
//!
//! Each command maps the loaded [`Config`] onto the settings types of the
//! library crates through the helpers below.

pub(crate) mod restore;
pub(crate) mod search;
pub(crate) mod snippet;
pub(crate) mod tested_versions;

pub(crate) use restore::RestoreArgs;
pub(crate) use search::SearchArgs;
pub(crate) use snippet::SnippetArgs;
pub(crate) use tested_versions::TestedVersionsArgs;

use docsnip_config::Config;
use docsnip_fetch::HttpFetcher;
use docsnip_search::SearchPaths;
use docsnip_snippets::SnippetSettings;
use docsnip_tabs::{SelectionCookie, TabClasses, TabSettings};

fn http_fetcher(config: &Config) -> HttpFetcher {
    HttpFetcher::new(config.http.timeout())
}

fn tab_settings(config: &Config) -> TabSettings {
    let tabs = &config.tabs;
    TabSettings {
        classes: TabClasses {
            button: tabs.button_class.clone(),
            active: tabs.active_class.clone(),
            panel: tabs.panel_class.clone(),
            lang_attribute: tabs.lang_attribute.clone(),
        },
        cookie: SelectionCookie::new(tabs.cookie_name.clone()),
    }
}

fn snippet_settings(config: &Config) -> SnippetSettings {
    SnippetSettings {
        doc_base: config.site.doc_base.clone(),
        default_tag: config.snippets.default_tag.clone(),
        container_id: config.snippets.container_id.clone(),
        example_suffix: config.snippets.example_suffix.clone(),
    }
}

fn search_paths(config: &Config) -> SearchPaths {
    SearchPaths {
        api_path: config.search.api_path.clone(),
        results_path: config.search.results_path.clone(),
    }
}
