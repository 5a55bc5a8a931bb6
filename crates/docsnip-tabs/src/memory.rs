//! Remembered tab labels.

use std::fmt;

/// Labels of the tabs the reader has chosen, in the order they were chosen.
///
/// Labels are the synchronization key across groups: a "Python" tab chosen
/// in one group restores every "Python" tab on the next page. Serialized as
/// a comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMemory {
    labels: Vec<String>,
}

impl SelectionMemory {
    /// Create an empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-joined cookie value.
    ///
    /// Empty entries are dropped. Repeated labels are kept, matching what
    /// was written.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let labels = value
            .split(',')
            .filter(|label| !label.is_empty())
            .map(str::to_owned)
            .collect();
        Self { labels }
    }

    /// Whether `label` is remembered.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Remember `label` unless already present. Returns true if added.
    pub fn insert(&mut self, label: &str) -> bool {
        if self.contains(label) || label.is_empty() {
            return false;
        }
        self.labels.push(label.to_owned());
        true
    }

    /// Forget the first occurrence of `label`. Returns true if removed.
    pub fn remove(&mut self, label: &str) -> bool {
        match self.labels.iter().position(|l| l == label) {
            Some(index) => {
                self.labels.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remembered labels in order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl fmt::Display for SelectionMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join(","))
    }
}
