//! Segment trie
//!
//! Each node owns its children outright, so the structure is a pure tree.
//! A node carrying a value is a terminal (registered) route; a node without
//! one is only a prefix of longer routes and never matches on its own.

use std::collections::HashMap;

/// One path segment in the route tree
#[derive(Debug)]
pub struct RouteNode<H> {
    label: String,
    children: HashMap<String, RouteNode<H>>,
    handler: Option<H>,
}

impl<H> RouteNode<H> {
    /// Create an empty root node
    pub fn root() -> Self {
        Self::with_label(String::new())
    }

    fn with_label(label: String) -> Self {
        Self {
            label,
            children: HashMap::new(),
            handler: None,
        }
    }

    /// Segment label of this node (empty for the root)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether a handler is bound to this node
    pub fn is_terminal(&self) -> bool {
        self.handler.is_some()
    }

    /// Bind `handler` at the node reached by `segments`, creating missing
    /// intermediate nodes on the way
    ///
    /// # Errors
    ///
    /// Returns the rejected handler if the final node is already terminal.
    /// The existing binding is left untouched. Intermediate nodes created
    /// before the conflict was detected are kept; they carry no handler and
    /// so never match.
    pub fn insert(&mut self, segments: &[&str], handler: H) -> Result<(), H> {
        let mut current = self;
        for &segment in segments {
            current = current
                .children
                .entry(segment.to_string())
                .or_insert_with(|| RouteNode::with_label(segment.to_string()));
        }

        if current.handler.is_some() {
            return Err(handler);
        }
        current.handler = Some(handler);
        Ok(())
    }

    /// Find the handler bound to exactly `segments`
    ///
    /// Returns `None` when any segment has no matching child, or when the
    /// final node is a pure prefix.
    pub fn lookup(&self, segments: &[&str]) -> Option<&H> {
        let mut current = self;
        for segment in segments {
            current = current.children.get(*segment)?;
        }
        current.handler.as_ref()
    }

    /// Number of terminal nodes in this subtree
    pub fn terminal_count(&self) -> usize {
        let own = usize::from(self.is_terminal());
        own + self
            .children
            .values()
            .map(RouteNode::terminal_count)
            .sum::<usize>()
    }
}

impl<H> Default for RouteNode<H> {
    fn default() -> Self {
        Self::root()
    }
}
