//! Search box state.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::client::SearchPaths;
use crate::debouncer::Debouncer;
use crate::hit::{SearchHit, render_results};

/// Class set on the search opener once results are shown.
pub const OPENED_CLASS: &str = "c-search is-openable is-opened";

/// Key code of Enter.
const ENTER_KEY_CODE: u32 = 13;

/// Key that changed the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

impl Key {
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        if code == ENTER_KEY_CODE {
            Self::Enter
        } else {
            Self::Other
        }
    }
}

/// What a keystroke asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Navigate to the full results page at this site-relative URL.
    Navigate(String),
    /// A query was scheduled; poll after the deadline.
    Scheduled(Instant),
}

/// What happened to a delivered response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Results were rendered.
    Rendered,
    /// The input changed since the query was issued; ignored.
    Stale,
    /// No results; previous results kept.
    Empty,
}

/// Autocomplete state for one search input.
#[derive(Debug)]
pub struct SearchBox {
    paths: SearchPaths,
    debouncer: Debouncer,
    input: String,
    results: Option<String>,
    opened: bool,
}

impl SearchBox {
    #[must_use]
    pub fn new(paths: SearchPaths, debounce: Duration) -> Self {
        Self {
            paths,
            debouncer: Debouncer::new(debounce),
            input: String::new(),
            results: None,
            opened: false,
        }
    }

    /// Handle a keystroke that left the input holding `value`.
    pub fn on_key(&mut self, value: &str, key: Key, now: Instant) -> KeyOutcome {
        value.clone_into(&mut self.input);
        match key {
            Key::Enter => {
                self.debouncer.cancel();
                KeyOutcome::Navigate(self.paths.results_url(value))
            }
            Key::Other => {
                self.debouncer.schedule(value, now);
                let deadline = self.debouncer.deadline().unwrap_or(now);
                KeyOutcome::Scheduled(deadline)
            }
        }
    }

    /// Query to issue now, if the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let term = self.debouncer.take_due(now)?;
        debug!(term = %term, "issuing search");
        Some(term)
    }

    /// Deliver the response to `query`.
    ///
    /// Renders only non-empty results for the query the input still holds.
    pub fn deliver(&mut self, query: &str, hits: &[SearchHit]) -> Delivery {
        if query != self.input {
            debug!(query, current = %self.input, "discarding stale search results");
            return Delivery::Stale;
        }
        if hits.is_empty() {
            return Delivery::Empty;
        }
        self.results = Some(render_results(hits));
        self.opened = true;
        Delivery::Rendered
    }

    /// Current input value.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Rendered result list, if any.
    #[must_use]
    pub fn results_html(&self) -> Option<&str> {
        self.results.as_deref()
    }

    /// Class of the opener element once results have been shown.
    #[must_use]
    pub fn opener_class(&self) -> Option<&'static str> {
        self.opened.then_some(OPENED_CLASS)
    }
}
