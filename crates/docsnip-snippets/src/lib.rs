//! Example snippet loading for docsnip.
//!
//! Documentation for one project borrows code examples rendered by a
//! sibling project's documentation. A snippet is fetched from
//! `../../{project}/{version}/{file}`, the fragment with the requested id is
//! cut out, links authored for this site are pointed at the sibling project,
//! and a "Go to original page..." link is prepended.
//!
//! The loader talks to the page through [`SnippetHost`] and to the network
//! through [`docsnip_fetch::Fetch`].

mod error;
mod fragment;
mod links;
mod loader;
mod location;

pub use error::SnippetError;
pub use fragment::extract_fragment;
pub use links::{original_link, rewrite_links};
pub use loader::{LoadedSnippet, SnippetHost, SnippetLoader, SnippetSettings};
pub use location::{Snippet, doc_version, parse_page_url, resolve_url, snippet_url};
