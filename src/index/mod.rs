//! Element Index Module
//!
//! A flat, randomly addressable view over an element tree. The index holds
//! handles, not elements, and records the tree revision it was built from:
//!
//! ```text
//! ElementIndex
//! ├── elements: Vec<ElementId>   # root first, then document order
//! └── revision: u64              # XmlTree::revision() at build time
//! ```
//!
//! Handles in an index never dangle, since the arena only grows. An index
//! built before a structural edit is still incomplete, so it is reported as
//! stale and must be rebuilt before the next mutation.

pub mod builder;

pub use builder::flatten;

use crate::dom::{ElementId, XmlTree};
use crate::error::{Error, Result};

/// Flattened snapshot of every element in a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementIndex {
    elements: Vec<ElementId>,
    revision: u64,
}

impl ElementIndex {
    /// Flatten the whole tree, starting at its root
    pub fn build(tree: &XmlTree) -> Self {
        let elements = flatten(tree, tree.root());
        tracing::debug!(
            "Indexed {} elements at revision {}",
            elements.len(),
            tree.revision()
        );
        ElementIndex {
            elements,
            revision: tree.revision(),
        }
    }

    /// Indexed handles, root first
    #[inline]
    pub fn as_slice(&self) -> &[ElementId] {
        &self.elements
    }

    /// Number of indexed elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the index holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Check whether a handle is part of this snapshot
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    /// Tree revision this index reflects
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Check whether the tree changed structurally since this index was built
    #[inline]
    pub fn is_stale(&self, tree: &XmlTree) -> bool {
        self.revision != tree.revision()
    }

    /// Fail with `Error::StaleIndex` unless the index reflects `tree`
    pub fn ensure_current(&self, tree: &XmlTree) -> Result<()> {
        if self.is_stale(tree) {
            return Err(Error::StaleIndex {
                indexed: self.revision,
                current: tree.revision(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::XmlElement;

    #[test]
    fn test_build_index() {
        let tree = XmlTree::parse(b"<root><a/><b><c/></b></root>").unwrap();
        let index = ElementIndex::build(&tree);

        assert_eq!(index.len(), 4);
        assert_eq!(index.as_slice()[0], tree.root());
        assert!(index.as_slice().iter().all(|&id| tree.contains(id)));
        assert!(!index.is_stale(&tree));
    }

    #[test]
    fn test_index_goes_stale_after_append() {
        let mut tree = XmlTree::parse(b"<root/>").unwrap();
        let index = ElementIndex::build(&tree);
        tree.append_child(tree.root(), XmlElement::new("x")).unwrap();

        assert!(index.is_stale(&tree));
        assert!(matches!(
            index.ensure_current(&tree),
            Err(Error::StaleIndex { indexed: 0, current: 1 })
        ));

        let rebuilt = ElementIndex::build(&tree);
        assert_eq!(rebuilt.len(), 2);
        assert!(rebuilt.ensure_current(&tree).is_ok());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let tree = XmlTree::parse(b"<a><b/><c><d/></c></a>").unwrap();
        let first = ElementIndex::build(&tree);
        let second = ElementIndex::build(&tree);
        assert_eq!(first, second);
    }
}
