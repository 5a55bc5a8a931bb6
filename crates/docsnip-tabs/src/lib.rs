//! Tab selection for docsnip.
//!
//! Documentation pages render groups of sibling tab buttons (one per
//! language, platform, etc.). This crate tracks which button in each group
//! is active, remembers the chosen labels in a single cookie, and re-applies
//! them when a page loads.
//!
//! # Architecture
//!
//! - [`TabDom`]: capability trait over the host page (class toggling,
//!   visibility, sibling lookup)
//! - [`CookieAccess`]: capability trait over `document.cookie`
//! - [`SelectionMemory`]: the remembered labels, passed into and returned
//!   from [`activate`]
//! - [`TabController`]: wires the two capabilities together for clicks and
//!   restore-on-load
//! - [`MemoryPage`] / [`MemoryCookies`]: in-memory implementations for
//!   headless use and tests
//!
//! # Example
//!
//! ```
//! use docsnip_tabs::{CookieAccess, MemoryCookies, MemoryPage, TabController, TabSettings};
//!
//! let settings = TabSettings::default();
//! let mut page = MemoryPage::new(settings.classes.clone());
//! let group = page.add_container();
//! let java = page.add_button(group, "Java");
//! let python = page.add_button(group, "Python");
//!
//! let mut cookies = MemoryCookies::new();
//! let controller = TabController::new(settings);
//! controller.select(&mut page, &mut cookies, python);
//!
//! assert!(page.is_active(python));
//! assert!(!page.is_active(java));
//! assert_eq!(cookies.cookie_header(), "selectedTabs=Python");
//! ```

mod controller;
mod cookie_store;
mod dom;
mod machine;
mod memory;
mod page;

pub use controller::{Click, TabController};
pub use cookie_store::{CookieAccess, MemoryCookies, SelectionCookie};
pub use dom::{Display, NodeId, SnippetTarget, TabAction, TabDom};
pub use machine::{TabClasses, TabSettings, activate, show_language};
pub use memory::SelectionMemory;
pub use page::{Element, MemoryPage};
