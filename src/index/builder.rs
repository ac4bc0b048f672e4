//! Index Builder
//!
//! Flattens an element tree into a sequence of handles.

use crate::dom::{ElementId, XmlTree};

/// Collect every element reachable from `root`, root included
///
/// Order is depth-first document order with the root first. Each element
/// appears exactly once. Returns an empty vector if `root` is not part of
/// `tree`.
pub fn flatten(tree: &XmlTree, root: ElementId) -> Vec<ElementId> {
    if !tree.contains(root) {
        return Vec::new();
    }

    let mut elements = Vec::with_capacity(tree.len());
    // descendants() never yields its starting element
    elements.push(root);
    elements.extend(tree.descendants(root));
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::XmlElement;

    #[test]
    fn test_flatten_includes_root() {
        let tree = XmlTree::parse(b"<root/>").unwrap();
        assert_eq!(flatten(&tree, tree.root()), vec![tree.root()]);
    }

    #[test]
    fn test_flatten_nested() {
        let tree = XmlTree::parse(b"<a><b><c/></b><d/></a>").unwrap();
        let flat = flatten(&tree, tree.root());

        let names: Vec<_> = flat.iter().map(|&id| tree.get(id).unwrap().name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_flatten_subtree() {
        let tree = XmlTree::parse(b"<a><b><c/><c/></b><d/></a>").unwrap();
        let b = tree.root_element().children()[0];
        assert_eq!(flatten(&tree, b).len(), 3);
    }

    #[test]
    fn test_flatten_sees_appended_elements() {
        let mut tree = XmlTree::parse(b"<a><b/></a>").unwrap();
        let b = tree.root_element().children()[0];
        tree.append_child(b, XmlElement::new("x")).unwrap();
        tree.append_child(tree.root(), XmlElement::new("y")).unwrap();

        let names: Vec<_> = flatten(&tree, tree.root())
            .iter()
            .map(|&id| tree.get(id).unwrap().name())
            .collect();
        assert_eq!(names, vec!["a", "b", "x", "y"]);
    }

    #[test]
    fn test_flatten_unknown_root() {
        let tree = XmlTree::parse(b"<a/>").unwrap();
        assert!(flatten(&tree, ElementId(5)).is_empty());
    }
}
