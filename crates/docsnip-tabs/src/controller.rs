//! Click dispatch and restore-on-load.

use tracing::{debug, info};

use crate::cookie_store::CookieAccess;
use crate::dom::{NodeId, SnippetTarget, TabAction, TabDom};
use crate::machine::{TabSettings, activate, show_language};
use crate::memory::SelectionMemory;

/// Result of clicking a tab button.
///
/// Snippet loads are returned rather than performed so the caller can run
/// them with its own fetcher, the way the browser queues a load callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    /// The button was activated.
    Selected,
    /// The button was activated and its language panel shown.
    ShowedLanguage(String),
    /// The button was activated; its example should now be loaded.
    LoadExample {
        project: String,
        name: String,
    },
    /// The button was activated; its snippet should now be loaded.
    LoadSnippet(SnippetTarget),
}

/// Drives the state machine against a page and its cookies.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    settings: TabSettings,
}

impl TabController {
    #[must_use]
    pub fn new(settings: TabSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &TabSettings {
        &self.settings
    }

    /// Activate `button` and persist the updated selection.
    pub fn select(&self, dom: &mut impl TabDom, cookies: &mut impl CookieAccess, button: NodeId) {
        let memory = self.settings.cookie.read(cookies);
        let memory = activate(dom, &self.settings.classes, button, memory);
        self.settings.cookie.write(cookies, &memory);
    }

    /// Click `button`, running its action.
    pub fn click(
        &self,
        dom: &mut impl TabDom,
        cookies: &mut impl CookieAccess,
        button: NodeId,
    ) -> Click {
        let action = dom.action(button);
        self.select(dom, cookies, button);

        match action {
            TabAction::Select => Click::Selected,
            TabAction::ShowSnippet { language } => {
                show_language(dom, &self.settings.classes, button, &language);
                Click::ShowedLanguage(language)
            }
            TabAction::GrabExample { project, name } => Click::LoadExample { project, name },
            TabAction::GrabSnippet(target) => Click::LoadSnippet(target),
        }
    }

    /// Re-apply remembered selections after a page load.
    ///
    /// For each remembered label, in cookie order, clicks every tab button
    /// on the page whose label matches. Later clicks may undo earlier ones
    /// when labels share a group. Returns the clicks in the order made.
    pub fn restore(&self, dom: &mut impl TabDom, cookies: &mut impl CookieAccess) -> Vec<Click> {
        let memory: SelectionMemory = self.settings.cookie.read(cookies);
        if memory.is_empty() {
            debug!("no remembered tabs to restore");
            return Vec::new();
        }

        let mut clicks = Vec::new();
        for label in memory.labels() {
            let buttons: Vec<NodeId> = dom
                .elements_with_class(&self.settings.classes.button)
                .into_iter()
                .filter(|&node| dom.label(node) == *label)
                .collect();
            debug!(label = %label, matches = buttons.len(), "restoring tab");
            for button in buttons {
                clicks.push(self.click(dom, cookies, button));
            }
        }

        info!(
            labels = memory.len(),
            clicks = clicks.len(),
            "restored tab selection"
        );
        clicks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie_store::MemoryCookies;
    use crate::page::MemoryPage;

    fn controller() -> TabController {
        TabController::default()
    }

    #[test]
    fn test_select_writes_cookie() {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let group = page.add_container();
        let a = page.add_button(group, "A");
        let b = page.add_button(group, "B");
        let mut cookies = MemoryCookies::new();

        controller().select(&mut page, &mut cookies, a);
        assert_eq!(cookies.cookie_header(), "selectedTabs=A");

        controller().select(&mut page, &mut cookies, b);
        assert_eq!(cookies.cookie_header(), "selectedTabs=B");
        assert!(!page.is_active(a));
    }

    #[test]
    fn test_restore_activates_matching_labels() {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let first = page.add_container();
        let java = page.add_button(first, "Java");
        let c = page.add_button(first, "C");
        let second = page.add_container();
        let python = page.add_button(second, "Python");
        let c2 = page.add_button(second, "C");
        let mut cookies = MemoryCookies::from_header("selectedTabs=Java,Python");

        let clicks = controller().restore(&mut page, &mut cookies);

        assert_eq!(clicks, vec![Click::Selected, Click::Selected]);
        assert!(page.is_active(java));
        assert!(page.is_active(python));
        assert!(!page.is_active(c));
        assert!(!page.is_active(c2));
        assert_eq!(cookies.cookie_header(), "selectedTabs=Java,Python");
    }

    #[test]
    fn test_restore_matches_every_group() {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let mut pythons = Vec::new();
        for _ in 0..3 {
            let group = page.add_container();
            page.add_button(group, "Java");
            pythons.push(page.add_button(group, "Python"));
        }
        let mut cookies = MemoryCookies::from_header("selectedTabs=Python");

        controller().restore(&mut page, &mut cookies);

        assert!(pythons.iter().all(|&p| page.is_active(p)));
        assert_eq!(page.active_labels(), ["Python", "Python", "Python"]);
    }

    #[test]
    fn test_restore_later_label_wins_in_shared_group() {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let group = page.add_container();
        let java = page.add_button(group, "Java");
        let python = page.add_button(group, "Python");
        let mut cookies = MemoryCookies::from_header("selectedTabs=Java,Python");

        controller().restore(&mut page, &mut cookies);

        assert!(!page.is_active(java));
        assert!(page.is_active(python));
        assert_eq!(cookies.cookie_header(), "selectedTabs=Python");
    }

    #[test]
    fn test_restore_without_cookie_is_noop() {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let group = page.add_container();
        let a = page.add_button(group, "A");
        let mut cookies = MemoryCookies::new();

        assert!(controller().restore(&mut page, &mut cookies).is_empty());
        assert!(!page.is_active(a));
        assert_eq!(cookies.cookie_header(), "");
    }

    #[test]
    fn test_click_show_snippet() {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let group = page.add_container();
        let python = page.add_button_with_action(
            group,
            "Python",
            TabAction::ShowSnippet {
                language: "python".to_owned(),
            },
        );
        let java_panel = page.add_panel(group, "java", "");
        let python_panel = page.add_panel(group, "python", "");
        let mut cookies = MemoryCookies::new();

        let click = controller().click(&mut page, &mut cookies, python);

        assert_eq!(click, Click::ShowedLanguage("python".to_owned()));
        assert!(page.is_active(python));
        assert_eq!(page.display(java_panel), Some(crate::Display::None));
        assert_eq!(page.display(python_panel), Some(crate::Display::Block));
    }

    #[test]
    fn test_click_grab_example_returns_load() {
        let mut page = MemoryPage::new(TabSettings::default().classes);
        let group = page.add_container();
        let cxx = page.add_button_with_action(
            group,
            "C++",
            TabAction::GrabExample {
                project: "device-detection-cxx".to_owned(),
                name: "getting_started".to_owned(),
            },
        );
        let mut cookies = MemoryCookies::new();

        let click = controller().click(&mut page, &mut cookies, cxx);

        assert_eq!(
            click,
            Click::LoadExample {
                project: "device-detection-cxx".to_owned(),
                name: "getting_started".to_owned(),
            }
        );
        assert_eq!(cookies.cookie_header(), "selectedTabs=C++");
    }
}
