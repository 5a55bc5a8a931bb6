//! In-memory page model.
//!
//! [`MemoryPage`] is a tiny element tree implementing [`TabDom`]. It backs
//! headless use (the CLI `restore` command) and tests.

use crate::dom::{Display, NodeId, TabAction, TabDom};
use crate::machine::TabClasses;

/// Element description used when building a [`MemoryPage`].
#[derive(Debug, Clone, Default)]
pub struct Element {
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    action: TabAction,
}

impl Element {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn action(mut self, action: TabAction) -> Self {
        self.action = action;
        self
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
    display: Option<Display>,
    html: String,
}

/// In-memory element tree.
///
/// Node 0 is the document body; containers hang off it and buttons or
/// panels hang off containers.
#[derive(Debug)]
pub struct MemoryPage {
    classes: TabClasses,
    nodes: Vec<Node>,
}

impl MemoryPage {
    /// Create a page with an empty body.
    #[must_use]
    pub fn new(classes: TabClasses) -> Self {
        let body = Node {
            parent: None,
            children: Vec::new(),
            element: Element::new(),
            display: None,
            html: String::new(),
        };
        Self {
            classes,
            nodes: vec![body],
        }
    }

    /// The document body.
    #[must_use]
    pub fn body(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Append an element under `parent`.
    pub fn add_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let html = element.text.clone();
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            element,
            display: None,
            html,
        });
        if let Some(node) = self.nodes.get_mut(parent.index()) {
            node.children.push(id);
        }
        id
    }

    /// Append an empty container to the body.
    pub fn add_container(&mut self) -> NodeId {
        self.add_element(self.body(), Element::new())
    }

    /// Append a plain tab button labeled `label`.
    pub fn add_button(&mut self, parent: NodeId, label: &str) -> NodeId {
        self.add_button_with_action(parent, label, TabAction::Select)
    }

    /// Append a tab button with a click action.
    pub fn add_button_with_action(
        &mut self,
        parent: NodeId,
        label: &str,
        action: TabAction,
    ) -> NodeId {
        let element = Element::new()
            .class(self.classes.button.clone())
            .text(label)
            .action(action);
        self.add_element(parent, element)
    }

    /// Append a language content panel.
    pub fn add_panel(&mut self, parent: NodeId, language: &str, text: &str) -> NodeId {
        let element = Element::new()
            .class(self.classes.panel.clone())
            .attr(self.classes.lang_attribute.clone(), language)
            .text(text);
        self.add_element(parent, element)
    }

    /// Whether `node` carries the active class.
    #[must_use]
    pub fn is_active(&self, node: NodeId) -> bool {
        self.has_class(node, &self.classes.active)
    }

    /// Classes of `node` in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(node.index())
            .map_or(&[][..], |n| n.element.classes.as_slice())
    }

    /// Display last set on `node`, if any.
    #[must_use]
    pub fn display(&self, node: NodeId) -> Option<Display> {
        self.nodes.get(node.index()).and_then(|n| n.display)
    }

    /// Labels of all active tab buttons, page-wide.
    #[must_use]
    pub fn active_labels(&self) -> Vec<String> {
        self.elements_with_class(&self.classes.button)
            .into_iter()
            .filter(|&node| self.is_active(node))
            .map(|node| self.label(node))
            .collect()
    }

    /// Element whose id is `id`.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.element.id.as_deref() == Some(id))
            .map(NodeId::new)
    }

    /// Inner HTML of `node`.
    #[must_use]
    pub fn html(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index()).map(|n| n.html.as_str())
    }

    /// Replace the inner HTML of `node`.
    pub fn set_html(&mut self, node: NodeId, html: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.html = html.into();
        }
    }
}

impl TabDom for MemoryPage {
    fn siblings(&self, node: NodeId) -> Vec<NodeId> {
        let parent = self.nodes.get(node.index()).and_then(|n| n.parent);
        match parent.and_then(|p| self.nodes.get(p.index())) {
            Some(parent) => parent.children.clone(),
            None => vec![node],
        }
    }

    fn label(&self, node: NodeId) -> String {
        self.nodes
            .get(node.index())
            .map(|n| n.element.text.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node.index())
            && !n.element.classes.iter().any(|c| c == class)
        {
            n.element.classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.element.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(node.index())?
            .element
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_display(&mut self, node: NodeId, display: Display) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.display = Some(display);
        }
    }

    fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_with_class(self.body(), class, &mut found);
        found
    }

    fn action(&self, node: NodeId) -> TabAction {
        self.nodes
            .get(node.index())
            .map(|n| n.element.action.clone())
            .unwrap_or_default()
    }
}

impl MemoryPage {
    /// Depth-first walk in document order.
    fn collect_with_class(&self, node: NodeId, class: &str, found: &mut Vec<NodeId>) {
        if self.has_class(node, class) {
            found.push(node);
        }
        if let Some(n) = self.nodes.get(node.index()) {
            for &child in &n.children {
                self.collect_with_class(child, class, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_siblings_include_node() {
        let mut page = MemoryPage::new(TabClasses::default());
        let group = page.add_container();
        let a = page.add_button(group, "A");
        let b = page.add_button(group, "B");
        assert_eq!(page.siblings(a), vec![a, b]);
    }

    #[test]
    fn test_body_is_its_own_sibling() {
        let page = MemoryPage::new(TabClasses::default());
        assert_eq!(page.siblings(page.body()), vec![page.body()]);
    }

    #[test]
    fn test_elements_with_class_document_order() {
        let mut page = MemoryPage::new(TabClasses::default());
        let first = page.add_container();
        let second = page.add_container();
        let b = page.add_button(second, "B");
        let a = page.add_button(first, "A");
        assert_eq!(page.elements_with_class("b-btn--tab"), vec![a, b]);
    }

    #[test]
    fn test_element_by_id_and_html() {
        let mut page = MemoryPage::new(TabClasses::default());
        let body = page.body();
        let div = page.add_element(body, Element::new().id("grabbed-example"));
        assert_eq!(page.element_by_id("grabbed-example"), Some(div));
        page.set_html(div, "<p>hi</p>");
        assert_eq!(page.html(div), Some("<p>hi</p>"));
        assert_eq!(page.element_by_id("missing"), None);
    }

    #[test]
    fn test_add_class_no_duplicates() {
        let mut page = MemoryPage::new(TabClasses::default());
        let group = page.add_container();
        let a = page.add_button(group, "A");
        page.add_class(a, "x");
        page.add_class(a, "x");
        assert_eq!(page.classes(a), ["b-btn--tab", "x"]);
        page.remove_class(a, "x");
        assert_eq!(page.classes(a), ["b-btn--tab"]);
    }
}
