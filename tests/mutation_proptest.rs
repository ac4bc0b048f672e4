//! Property-based tests for flattening, cloning and spam mutation
//!
//! Trees are generated as a list of parent choices: element `i` is
//! appended under one of the elements created before it.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::Index;
use xmlspam::{
    childless_clone, flatten, spam_into, ElementId, ElementIndex, RandomSelector, XmlAttribute,
    XmlElement, XmlTree, SPAM_CLONES,
};

/// Generate a random element identity
fn element_strategy() -> impl Strategy<Value = XmlElement> {
    (
        "[a-z][a-z0-9]{0,6}",
        prop::collection::vec(("[a-z]{1,4}", "[a-zA-Z0-9 <&>]{0,8}"), 0..3),
        "[a-zA-Z0-9 ]{0,10}",
    )
        .prop_map(|(name, attrs, content)| {
            let mut element = XmlElement::new(name);
            // Attribute names must be unique within an element
            let mut seen = HashSet::new();
            for (attr_name, value) in attrs {
                if seen.insert(attr_name.clone()) {
                    element.attributes.push(XmlAttribute::new(attr_name, value));
                }
            }
            element.content = content.into_bytes();
            element
        })
}

/// Generate a tree plus the handles of all its elements in creation order
fn tree_strategy() -> impl Strategy<Value = (XmlTree, Vec<ElementId>)> {
    (
        element_strategy(),
        prop::collection::vec((any::<Index>(), element_strategy()), 0..40),
    )
        .prop_map(|(root, rest)| {
            let mut tree = XmlTree::with_root(root);
            let mut ids = vec![tree.root()];
            for (parent, element) in rest {
                let parent = ids[parent.index(ids.len())];
                let id = tree.append_child(parent, element).unwrap();
                ids.push(id);
            }
            (tree, ids)
        })
}

proptest! {
    #[test]
    fn flatten_visits_every_element_once((tree, ids) in tree_strategy()) {
        let flat = flatten(&tree, tree.root());
        prop_assert_eq!(flat.len(), ids.len());
        prop_assert_eq!(flat[0], tree.root());

        let unique: HashSet<_> = flat.iter().copied().collect();
        let expected: HashSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), flat.len());
        prop_assert_eq!(unique, expected);
    }

    #[test]
    fn flatten_is_pure((tree, _ids) in tree_strategy()) {
        let before = tree.clone();
        let first = ElementIndex::build(&tree);
        let second = ElementIndex::build(&tree);
        prop_assert_eq!(first, second);
        prop_assert_eq!(tree, before);
    }

    #[test]
    fn clone_is_childless_and_independent((tree, ids) in tree_strategy(), pick in any::<Index>()) {
        let id = ids[pick.index(ids.len())];
        let source = tree.get(id).unwrap().clone();

        let mut clone = childless_clone(&source);
        prop_assert!(clone.children().is_empty());
        prop_assert!(clone.same_identity(&source));

        clone.content.extend_from_slice(b"mutated");
        clone.attributes.push(XmlAttribute::new("zz-new", "1"));
        clone.local_name.push('x');
        prop_assert_eq!(tree.get(id).unwrap(), &source);
    }

    #[test]
    fn spam_adds_exactly_ten_clones(
        (tree, ids) in tree_strategy(),
        parent in any::<Index>(),
        child in any::<Index>(),
    ) {
        let mut tree = tree;
        let parent = ids[parent.index(ids.len())];
        let child = ids[child.index(ids.len())];
        let existing = tree.get(parent).unwrap().children().to_vec();
        let snapshot = tree.get(child).unwrap().clone();
        let total = tree.len();

        let outcome = spam_into(&mut tree, parent, child).unwrap();

        let children = tree.get(parent).unwrap().children().to_vec();
        prop_assert_eq!(children.len(), existing.len() + SPAM_CLONES);
        prop_assert_eq!(&children[..existing.len()], &existing[..]);
        prop_assert_eq!(&children[existing.len()..], &outcome.clones[..]);
        prop_assert_eq!(tree.len(), total + SPAM_CLONES);

        for &id in &outcome.clones {
            let clone = tree.get(id).unwrap();
            prop_assert!(clone.children().is_empty());
            prop_assert!(clone.same_identity(&snapshot));
        }
        prop_assert_eq!(flatten(&tree, tree.root()).len(), total + SPAM_CLONES);
    }

    #[test]
    fn self_selection_is_safe((tree, ids) in tree_strategy(), pick in any::<Index>()) {
        let mut tree = tree;
        let id = ids[pick.index(ids.len())];
        let existing = tree.get(id).unwrap().children().len();
        let snapshot = tree.get(id).unwrap().clone();

        spam_into(&mut tree, id, id).unwrap();

        let element = tree.get(id).unwrap();
        prop_assert_eq!(element.children().len(), existing + SPAM_CLONES);
        for &child in &element.children()[existing..] {
            let clone = tree.get(child).unwrap();
            prop_assert!(clone.children().is_empty());
            prop_assert!(clone.same_identity(&snapshot));
        }
    }

    #[test]
    fn serialized_mutation_reparses((tree, _ids) in tree_strategy(), seed in any::<u64>()) {
        let mut tree = tree;
        let index = ElementIndex::build(&tree);
        let mut selector = RandomSelector::seeded(seed);
        xmlspam::spam_element_breadth_wise(&mut tree, &index, &mut selector).unwrap();

        let bytes = tree.to_bytes().unwrap();
        let reparsed = XmlTree::parse(&bytes).unwrap();
        prop_assert_eq!(reparsed.len(), tree.len());
        prop_assert_eq!(reparsed.to_bytes().unwrap(), bytes);
    }
}
