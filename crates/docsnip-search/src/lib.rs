//! Search box autocomplete for docsnip.
//!
//! Each keystroke restarts a quiet period; once it elapses the current
//! input is sent to the search endpoint. Responses are rendered only if the
//! input still holds the query they answer, so a slow answer for `cat`
//! never replaces results while the reader has typed on to `catalog`.
//! Enter skips the endpoint and navigates to the full results page.
//!
//! Time is passed in explicitly, which keeps [`SearchBox`] deterministic
//! under test and independent of any timer facility.

mod client;
mod debouncer;
mod hit;
mod widget;

pub use client::{SearchClient, SearchError, SearchPaths};
pub use debouncer::Debouncer;
pub use hit::{SearchHit, render_results};
pub use widget::{Delivery, Key, KeyOutcome, OPENED_CLASS, SearchBox};
