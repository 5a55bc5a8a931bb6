//! Snippet loader.

use docsnip_fetch::{CachePolicy, Fetch};
use docsnip_tabs::{
    Click, CookieAccess, Display, MemoryPage, NodeId, SnippetTarget, TabController, TabDom,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::SnippetError;
use crate::fragment::extract_fragment;
use crate::links::{original_link, rewrite_links};
use crate::location::{Snippet, doc_version, parse_page_url, resolve_url};

/// Shown in the container when the snippet page cannot be fetched.
const FETCH_FAILED_NOTICE: &str = r#"<div class="snippet-error">Unable to load example.</div>"#;

/// Shown in the container when the fetched page lacks the fragment.
const EMPTY_NOTICE: &str = r#"<div class="snippet-empty">Example not available.</div>"#;

/// Page operations the loader needs.
pub trait SnippetHost {
    /// Make the container visible. Returns false if it does not exist.
    fn show_container(&mut self, container: &str) -> bool;

    /// Replace the container's content.
    fn set_container_html(&mut self, container: &str, html: &str);
}

impl SnippetHost for MemoryPage {
    fn show_container(&mut self, container: &str) -> bool {
        match self.element_by_id(container) {
            Some(node) => {
                self.set_display(node, Display::Block);
                true
            }
            None => false,
        }
    }

    fn set_container_html(&mut self, container: &str, html: &str) {
        if let Some(node) = self.element_by_id(container) {
            self.set_html(node, html);
        }
    }
}

/// Names and defaults used when loading snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetSettings {
    /// Path segment preceding the version in page URLs.
    pub doc_base: String,
    /// Fragment id used for examples.
    pub default_tag: String,
    /// Container receiving examples.
    pub container_id: String,
    /// Appended to an example name to form its filename.
    pub example_suffix: String,
}

impl Default for SnippetSettings {
    fn default() -> Self {
        Self {
            doc_base: "documentation".to_owned(),
            default_tag: "primary".to_owned(),
            container_id: "grabbed-example".to_owned(),
            example_suffix: "-example.html".to_owned(),
        }
    }
}

/// A snippet placed in its container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSnippet {
    pub snippet: Snippet,
    /// Absolute URL the snippet was fetched from.
    pub url: Url,
    /// Final container content: footer link followed by the fragment.
    pub html: String,
}

/// Fetches snippets and places them in containers.
pub struct SnippetLoader<F> {
    fetcher: F,
    settings: SnippetSettings,
}

impl<F: Fetch> SnippetLoader<F> {
    #[must_use]
    pub fn new(fetcher: F, settings: SnippetSettings) -> Self {
        Self { fetcher, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &SnippetSettings {
        &self.settings
    }

    /// Target for an example named `name` in `project`.
    #[must_use]
    pub fn example_target(&self, project: &str, name: &str) -> SnippetTarget {
        SnippetTarget {
            project: project.to_owned(),
            file: format!("{name}{}", self.settings.example_suffix),
            tag: self.settings.default_tag.clone(),
            container: self.settings.container_id.clone(),
        }
    }

    /// Load `target` into its container.
    ///
    /// The container is shown and cleared first. Returns `Ok(None)` when the
    /// fetched page has no element with the target's id; the container then
    /// shows an "not available" notice. On fetch failure the container shows
    /// an error notice and the error is returned.
    pub fn load(
        &self,
        host: &mut impl SnippetHost,
        page_url: &str,
        target: &SnippetTarget,
    ) -> Result<Option<LoadedSnippet>, SnippetError> {
        if !host.show_container(&target.container) {
            warn!(container = %target.container, "snippet container not found");
            return Err(SnippetError::ContainerNotFound(target.container.clone()));
        }
        host.set_container_html(&target.container, "");

        let result = self.fetch_snippet(page_url, target);
        match &result {
            Ok(Some(loaded)) => {
                host.set_container_html(&target.container, &loaded.html);
                info!(url = %loaded.url, container = %target.container, "loaded snippet");
            }
            Ok(None) => {
                host.set_container_html(&target.container, EMPTY_NOTICE);
                warn!(tag = %target.tag, file = %target.file, "snippet fragment not found");
            }
            Err(e) => {
                host.set_container_html(&target.container, FETCH_FAILED_NOTICE);
                warn!(error = %e, file = %target.file, "snippet load failed");
            }
        }
        result
    }

    fn fetch_snippet(
        &self,
        page_url: &str,
        target: &SnippetTarget,
    ) -> Result<Option<LoadedSnippet>, SnippetError> {
        let version = doc_version(page_url, &self.settings.doc_base)
            .ok_or_else(|| SnippetError::NoVersion(page_url.to_owned()))?;
        let snippet = Snippet {
            project: target.project.clone(),
            version,
            file: target.file.clone(),
            tag: target.tag.clone(),
        };
        let relative = snippet.relative_url();
        let page_base = parse_page_url(page_url)?;
        let url = resolve_url(page_url, &relative)?;
        debug!(url = %url, tag = %snippet.tag, "fetching snippet");

        let page = self.fetcher.fetch(url.as_str(), CachePolicy::Default)?;
        let Some(fragment) = extract_fragment(&page, &snippet.tag) else {
            return Ok(None);
        };

        let body = rewrite_links(
            &fragment,
            &page_base,
            &self.settings.doc_base,
            &snippet.project,
        );
        let html = format!("{}{body}", original_link(&relative));
        Ok(Some(LoadedSnippet { snippet, url, html }))
    }

    /// Perform the snippet load a click asked for, if any.
    pub fn handle_click(
        &self,
        host: &mut impl SnippetHost,
        page_url: &str,
        click: &Click,
    ) -> Result<Option<LoadedSnippet>, SnippetError> {
        match click {
            Click::LoadExample { project, name } => {
                let target = self.example_target(project, name);
                self.load(host, page_url, &target)
            }
            Click::LoadSnippet(target) => self.load(host, page_url, target),
            Click::Selected | Click::ShowedLanguage(_) => Ok(None),
        }
    }

    /// Click a tab button and run any snippet load it triggers.
    pub fn click<H: TabDom + SnippetHost>(
        &self,
        controller: &TabController,
        page: &mut H,
        cookies: &mut impl CookieAccess,
        page_url: &str,
        button: NodeId,
    ) -> Result<Option<LoadedSnippet>, SnippetError> {
        let click = controller.click(page, cookies, button);
        self.handle_click(page, page_url, &click)
    }

    /// Restore remembered tabs and run the snippet loads they trigger.
    ///
    /// A failed load does not stop the remaining ones; every load outcome
    /// is returned in click order.
    pub fn restore<H: TabDom + SnippetHost>(
        &self,
        controller: &TabController,
        page: &mut H,
        cookies: &mut impl CookieAccess,
        page_url: &str,
    ) -> Vec<Result<LoadedSnippet, SnippetError>> {
        controller
            .restore(page, cookies)
            .iter()
            .filter_map(|click| self.handle_click(page, page_url, click).transpose())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use docsnip_fetch::MockFetcher;
    use docsnip_tabs::{Element, MemoryCookies, TabAction, TabSettings};
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE_URL: &str = "https://site.test/documentation/4.4/Foo.html";
    const SNIPPET_URL: &str = "https://site.test/device-detection-cxx/4.4/hash-example.html";

    fn snippet_page() -> &'static str {
        r#"<html><body><div id="nav"><a href="/documentation/4.4/index.html">home</a></div><div id="primary"><p>See <a href="/documentation/4.4/a.html">a</a></p></div></body></html>"#
    }

    fn page_with_container() -> (MemoryPage, NodeId) {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let body = page.body();
        let container = page.add_element(body, Element::new().id("grabbed-example").text("old"));
        (page, container)
    }

    fn loader(fetcher: MockFetcher) -> SnippetLoader<MockFetcher> {
        SnippetLoader::new(fetcher, SnippetSettings::default())
    }

    #[test]
    fn test_load_example() {
        let loader = loader(MockFetcher::new().with_response(SNIPPET_URL, snippet_page()));
        let (mut page, container) = page_with_container();
        let target = loader.example_target("device-detection-cxx", "hash");

        let loaded = loader.load(&mut page, PAGE_URL, &target).unwrap().unwrap();

        let expected = concat!(
            r#"<div id="grabbed-example-link" style="text-align:right;"><a href="../../device-detection-cxx/4.4/hash-example.html" class="b-link--dotted">Go to original page...</a></div>"#,
            r#"<div id="primary"><p>See <a href="https://site.test/device-detection-cxx/4.4/a.html">a</a></p></div>"#,
        );
        assert_eq!(loaded.html, expected);
        assert_eq!(loaded.url.as_str(), SNIPPET_URL);
        assert_eq!(loaded.snippet.version, "4.4");
        assert_eq!(page.html(container), Some(expected));
        assert_eq!(page.display(container), Some(Display::Block));
    }

    #[test]
    fn test_load_rewrites_relative_links_to_project() {
        let loader = loader(MockFetcher::new().with_response(
            SNIPPET_URL,
            r#"<div id="primary"><a href="classFoo.html">Foo</a> <a href="../4.3/b.html">b</a></div>"#,
        ));
        let (mut page, _) = page_with_container();
        let target = loader.example_target("device-detection-cxx", "hash");

        let loaded = loader.load(&mut page, PAGE_URL, &target).unwrap().unwrap();

        assert!(loaded.html.ends_with(concat!(
            r#"<div id="primary"><a href="https://site.test/device-detection-cxx/4.4/classFoo.html">Foo</a> "#,
            r#"<a href="https://site.test/device-detection-cxx/4.3/b.html">b</a></div>"#
        )));
    }

    #[test]
    fn test_load_missing_fragment_shows_notice() {
        let loader = loader(
            MockFetcher::new().with_response(SNIPPET_URL, "<html><body>nothing</body></html>"),
        );
        let (mut page, container) = page_with_container();
        let target = loader.example_target("device-detection-cxx", "hash");

        let result = loader.load(&mut page, PAGE_URL, &target).unwrap();

        assert!(result.is_none());
        assert_eq!(page.html(container), Some(EMPTY_NOTICE));
    }

    #[test]
    fn test_load_fetch_failure_shows_notice() {
        let loader = loader(MockFetcher::new().with_status(SNIPPET_URL, 500));
        let (mut page, container) = page_with_container();
        let target = loader.example_target("device-detection-cxx", "hash");

        let err = loader.load(&mut page, PAGE_URL, &target).unwrap_err();

        assert!(matches!(err, SnippetError::Fetch(_)));
        assert_eq!(page.html(container), Some(FETCH_FAILED_NOTICE));
    }

    #[test]
    fn test_load_without_version() {
        let fetcher = MockFetcher::new();
        let loader = loader(fetcher);
        let (mut page, _) = page_with_container();
        let target = loader.example_target("p", "hash");

        let err = loader
            .load(&mut page, "https://site.test/about.html", &target)
            .unwrap_err();

        assert!(matches!(err, SnippetError::NoVersion(_)));
    }

    #[test]
    fn test_load_missing_container() {
        let fetcher = MockFetcher::new();
        let loader = loader(fetcher);
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let target = loader.example_target("p", "hash");

        let err = loader.load(&mut page, PAGE_URL, &target).unwrap_err();

        assert!(matches!(err, SnippetError::ContainerNotFound(id) if id == "grabbed-example"));
    }

    #[test]
    fn test_load_custom_snippet_target() {
        let url = "https://site.test/pipeline-java/4.4/readme.html";
        let loader = loader(
            MockFetcher::new().with_response(url, r#"<section id="usage">use it</section>"#),
        );
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let body = page.body();
        let container = page.add_element(body, Element::new().id("usage-box"));
        let target = SnippetTarget {
            project: "pipeline-java".to_owned(),
            file: "readme.html".to_owned(),
            tag: "usage".to_owned(),
            container: "usage-box".to_owned(),
        };

        loader.load(&mut page, PAGE_URL, &target).unwrap();

        assert!(
            page.html(container)
                .unwrap()
                .ends_with(r#"<section id="usage">use it</section>"#)
        );
    }

    #[test]
    fn test_restore_reloads_remembered_example() {
        let loader = loader(MockFetcher::new().with_response(SNIPPET_URL, snippet_page()));
        let controller = TabController::default();
        let (mut page, container) = page_with_container();
        let group = page.add_container();
        let cxx = page.add_button_with_action(
            group,
            "C++",
            TabAction::GrabExample {
                project: "device-detection-cxx".to_owned(),
                name: "hash".to_owned(),
            },
        );
        page.add_button(group, "Java");
        let mut cookies = MemoryCookies::from_header("selectedTabs=C++");

        let loads = loader.restore(&controller, &mut page, &mut cookies, PAGE_URL);

        assert_eq!(loads.len(), 1);
        assert!(loads[0].is_ok());
        assert!(page.is_active(cxx));
        assert!(page.html(container).unwrap().contains("device-detection-cxx/4.4/a.html"));
    }

    #[test]
    fn test_click_plain_tab_loads_nothing() {
        let fetcher = MockFetcher::new();
        let loader = loader(fetcher);
        let controller = TabController::default();
        let (mut page, _) = page_with_container();
        let group = page.add_container();
        let java = page.add_button(group, "Java");
        let mut cookies = MemoryCookies::new();

        let loaded = loader
            .click(&controller, &mut page, &mut cookies, PAGE_URL, java)
            .unwrap();

        assert!(loaded.is_none());
        assert!(page.is_active(java));
    }
}
