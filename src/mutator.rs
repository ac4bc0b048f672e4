//! Spam Mutation
//!
//! The one structural edit this crate performs: pick a parent and a child
//! from the index (independently, with replacement) and append a batch of
//! childless clones of the child to the parent.

use rand::Rng;

use crate::dom::{ElementId, XmlTree};
use crate::error::{Error, Result};
use crate::index::ElementIndex;
use crate::select::RandomSelector;

/// Clones appended per spam operation
pub const SPAM_CLONES: usize = 10;

/// What a single spam operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpamOutcome {
    /// Element that received the clones
    pub parent: ElementId,
    /// Element that was cloned
    pub child: ElementId,
    /// Handles of the appended clones, in append order
    pub clones: Vec<ElementId>,
}

/// Select a parent and a child from `index` and append `SPAM_CLONES`
/// childless clones of the child to the parent
///
/// Parent and child may be the same element. The index must reflect the
/// current tree; a stale index fails with `Error::StaleIndex`.
pub fn spam_element_breadth_wise<R: Rng>(
    tree: &mut XmlTree,
    index: &ElementIndex,
    selector: &mut RandomSelector<R>,
) -> Result<SpamOutcome> {
    index.ensure_current(tree)?;

    let parent = selector.select(index)?;
    let child = selector.select(index)?;
    spam_into(tree, parent, child)
}

/// Append `SPAM_CLONES` childless clones of `child` to `parent`
///
/// The child is snapshotted once before anything is appended, so
/// self-attachment (`parent == child`) adds clones of the child as it was
/// before the call, never clones of clones.
pub fn spam_into(tree: &mut XmlTree, parent: ElementId, child: ElementId) -> Result<SpamOutcome> {
    if !tree.contains(parent) {
        return Err(Error::UnknownElement(parent));
    }
    let snapshot = tree
        .clone_childless(child)
        .ok_or(Error::UnknownElement(child))?;

    let mut clones = Vec::with_capacity(SPAM_CLONES);
    for _ in 0..SPAM_CLONES {
        clones.push(tree.append_child(parent, snapshot.clone())?);
    }

    tracing::trace!(
        "Appended {} clones of <{}> {} under {}",
        SPAM_CLONES,
        snapshot.name(),
        child,
        parent
    );

    Ok(SpamOutcome {
        parent,
        child,
        clones,
    })
}

/// Apply `rounds` spam operations, re-indexing before each one so every
/// round can select elements added by the previous rounds
pub fn spam_rounds<R: Rng>(
    tree: &mut XmlTree,
    rounds: usize,
    selector: &mut RandomSelector<R>,
) -> Result<Vec<SpamOutcome>> {
    let mut outcomes = Vec::with_capacity(rounds);
    for _ in 0..rounds {
        let index = ElementIndex::build(tree);
        outcomes.push(spam_element_breadth_wise(tree, &index, selector)?);
    }
    Ok(outcomes)
}
