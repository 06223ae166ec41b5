//! List nesting state.

/// One active list on the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    /// Whether the list is numbered
    pub ordered: bool,
}

impl ListContext {
    /// JIRA marker for items at this level.
    pub fn marker(self) -> char {
        if self.ordered {
            '#'
        } else {
            '*'
        }
    }
}

/// Stack of the lists currently being traversed, outermost first.
///
/// Its depth always equals the number of list ancestors of the node being
/// rendered.
#[derive(Debug, Clone, Default)]
pub struct ListStack {
    entries: Vec<ListContext>,
}

impl ListStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a list.
    pub fn push(&mut self, ordered: bool) {
        self.entries.push(ListContext { ordered });
    }

    /// Leaves the innermost list.
    pub fn pop(&mut self) -> Option<ListContext> {
        self.entries.pop()
    }

    /// Number of lists currently open.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns true outside of any list.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the item prefix, one marker per level (`*`, `#`, `#*`, ...).
    pub fn prefix(&self) -> String {
        self.entries.iter().map(|entry| entry.marker()).collect()
    }
}
