//! Capability interface over the host page.

/// Opaque handle to an element of the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// CSS `display` value set on content panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}

/// Where a snippet button loads its content from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetTarget {
    /// Repository name, e.g. `device-detection-cxx`.
    pub project: String,
    /// Pre-rendered HTML file under the version directory.
    pub file: String,
    /// Id of the fragment to extract from the fetched page.
    pub tag: String,
    /// Id of the container receiving the snippet.
    pub container: String,
}

/// What a tab button does when clicked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TabAction {
    /// Plain activation.
    #[default]
    Select,
    /// Activate, then show the sibling panel for `language`.
    ShowSnippet {
        language: String,
    },
    /// Activate, then load the named example into the default container.
    GrabExample {
        project: String,
        name: String,
    },
    /// Activate, then load an arbitrary snippet.
    GrabSnippet(SnippetTarget),
}

/// Operations the tab state machine needs from the page.
///
/// Lookups that miss are no-ops: a node without a parent is its own only
/// sibling, a missing attribute is `None`.
pub trait TabDom {
    /// Children of `node`'s parent in document order, including `node`.
    fn siblings(&self, node: NodeId) -> Vec<NodeId>;

    /// Visible text of `node`.
    fn label(&self, node: NodeId) -> String;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_display(&mut self, node: NodeId, display: Display);

    /// Every element carrying `class`, page-wide, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<NodeId>;

    /// Click behavior of a tab button.
    fn action(&self, node: NodeId) -> TabAction;
}
