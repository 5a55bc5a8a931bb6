//! Cookie access and the selection cookie adapter.

use cookie::Cookie;
use tracing::{debug, warn};

use crate::memory::SelectionMemory;

/// Access to the page's cookies, with `document.cookie` semantics.
pub trait CookieAccess {
    /// All cookies as a `name=value; name=value` header.
    fn cookie_header(&self) -> String;

    /// Store one cookie given as `name=value[; attributes]`.
    fn set_cookie(&mut self, cookie: &str);
}

/// In-memory cookie jar.
///
/// Setting a cookie replaces any existing cookie with the same name and
/// keeps insertion order otherwise, like a browser's `document.cookie`.
#[derive(Debug, Default, Clone)]
pub struct MemoryCookies {
    entries: Vec<(String, String)>,
}

impl MemoryCookies {
    /// Create an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a jar from a `document.cookie` style header.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        let entries = Cookie::split_parse(header)
            .filter_map(Result::ok)
            .map(|c| (c.name().to_owned(), c.value().to_owned()))
            .collect();
        Self { entries }
    }
}

impl CookieAccess for MemoryCookies {
    fn cookie_header(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_cookie(&mut self, cookie: &str) {
        let parsed = match Cookie::parse(cookie) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(cookie, error = %e, "ignoring malformed cookie");
                return;
            }
        };
        let (name, value) = (parsed.name().to_owned(), parsed.value().to_owned());
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }
}

/// Reads and writes [`SelectionMemory`] in one named cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCookie {
    name: String,
}

impl Default for SelectionCookie {
    fn default() -> Self {
        Self::new("selectedTabs")
    }
}

impl SelectionCookie {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the remembered labels. A missing cookie is an empty memory.
    pub fn read(&self, cookies: &impl CookieAccess) -> SelectionMemory {
        let header = cookies.cookie_header();
        Cookie::split_parse(header.as_str())
            .filter_map(Result::ok)
            .find(|c| c.name() == self.name)
            .map(|c| SelectionMemory::parse(c.value()))
            .unwrap_or_default()
    }

    /// Write `memory` back. No path or expiry is set, so the cookie is
    /// session-scoped unless the browser keeps it.
    pub fn write(&self, cookies: &mut impl CookieAccess, memory: &SelectionMemory) {
        let cookie = Cookie::new(self.name.as_str(), memory.to_string());
        debug!(cookie = %cookie, "writing selection cookie");
        cookies.set_cookie(&cookie.to_string());
    }
}
