//! Tab selection state machine.
//!
//! Each button is either active (carries the active class) or inactive.
//! Activating a button deactivates its direct siblings only, so separate
//! groups on the same page keep their own active button.

use crate::cookie_store::SelectionCookie;
use crate::dom::{Display, NodeId, TabDom};
use crate::memory::SelectionMemory;

/// Class and attribute names used by the page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabClasses {
    /// Carried by every tab button.
    pub button: String,
    /// Marks the active button.
    pub active: String,
    /// Carried by alternate-language content panels.
    pub panel: String,
    /// Names a panel's language.
    pub lang_attribute: String,
}

impl Default for TabClasses {
    fn default() -> Self {
        Self {
            button: "b-btn--tab".to_owned(),
            active: "b-btn--tab--is-active".to_owned(),
            panel: "c-tabgroup__main".to_owned(),
            lang_attribute: "data-lang".to_owned(),
        }
    }
}

impl TabClasses {
    /// Whether `node` is an alternate-language content panel.
    pub(crate) fn is_language_panel(&self, dom: &impl TabDom, node: NodeId) -> bool {
        dom.has_class(node, &self.panel) && dom.attribute(node, &self.lang_attribute).is_some()
    }
}

/// Markup names plus the cookie used to remember selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabSettings {
    pub classes: TabClasses,
    pub cookie: SelectionCookie,
}

/// Make `button` the active one among its siblings.
///
/// Marks `button` active and every sibling inactive, hides sibling
/// language panels, and returns `memory` updated: `button`'s label added,
/// labels of the deactivated siblings removed.
#[must_use]
pub fn activate(
    dom: &mut impl TabDom,
    classes: &TabClasses,
    button: NodeId,
    mut memory: SelectionMemory,
) -> SelectionMemory {
    for sibling in dom.siblings(button) {
        if sibling == button {
            if !dom.has_class(sibling, &classes.active) {
                dom.add_class(sibling, &classes.active);
            }
            memory.insert(&dom.label(sibling));
            continue;
        }

        if dom.has_class(sibling, &classes.active) {
            dom.remove_class(sibling, &classes.active);
        }
        memory.remove(&dom.label(sibling));
        if classes.is_language_panel(&*dom, sibling) {
            dom.set_display(sibling, Display::None);
        }
    }
    memory
}

/// Show the sibling panel for `language` and hide the other panels.
///
/// Only siblings carrying the panel class are touched; panels without a
/// language attribute are hidden.
pub fn show_language(dom: &mut impl TabDom, classes: &TabClasses, button: NodeId, language: &str) {
    for sibling in dom.siblings(button) {
        if !dom.has_class(sibling, &classes.panel) {
            continue;
        }
        let display = if dom.attribute(sibling, &classes.lang_attribute).as_deref() == Some(language)
        {
            Display::Block
        } else {
            Display::None
        };
        dom.set_display(sibling, display);
    }
}
