//! Document Holder
//!
//! Owns the parsed tree, its element index and a human-readable log of the
//! operations performed on it. Lifecycle:
//!
//! ```text
//! Empty --read--> Loaded --build_index--> Indexed --spam--> Mutated
//!                                            ^                 |
//!                                            +---build_index---+
//! ```

use std::fs;
use std::path::Path;

use rand::Rng;

use crate::config::{MutationMode, MutatorConfig};
use crate::dom::{ElementId, XmlTree};
use crate::error::{Error, Result};
use crate::index::ElementIndex;
use crate::mutator::{spam_element_breadth_wise, spam_rounds, SpamOutcome, SPAM_CLONES};
use crate::select::RandomSelector;
use crate::strategy::generate_variants;

/// Where a holder is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderState {
    /// No document read yet
    Empty,
    /// Document read, no index built
    Loaded,
    /// Index reflects the current tree
    Indexed,
    /// Tree changed since the index was built
    Mutated,
}

/// Result of `XmlHolder::run`
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One entry per spam operation, in order
    pub outcomes: Vec<SpamOutcome>,
    /// The mutated copy in `MutationMode::Copy`; None when the holder's
    /// own tree was edited
    pub tree: Option<XmlTree>,
}

/// Holds one XML document and everything derived from it
#[derive(Debug)]
pub struct XmlHolder {
    tree: Option<XmlTree>,
    index: Option<ElementIndex>,
    description: Vec<String>,
}

impl XmlHolder {
    /// Create an empty holder whose log starts with `description`
    pub fn new(description: impl Into<String>) -> Self {
        XmlHolder {
            tree: None,
            index: None,
            description: vec![description.into()],
        }
    }

    /// Read and parse the XML file at `path`
    ///
    /// The whole file is read into memory before parsing. On failure the
    /// holder is left unchanged. On success any previous tree and index are
    /// replaced.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = XmlTree::parse(&bytes)?;

        tracing::info!("Read {} bytes of XML from {}", bytes.len(), path.display());
        self.replace_tree(tree, format!("Read in XML from: {}", path.display()));
        Ok(())
    }

    /// Parse an in-memory document; `source` names it in the log
    pub fn load_bytes(&mut self, bytes: &[u8], source: &str) -> Result<()> {
        let tree = XmlTree::parse(bytes)?;
        self.replace_tree(tree, format!("Loaded XML from: {}", source));
        Ok(())
    }

    fn replace_tree(&mut self, tree: XmlTree, entry: String) {
        self.tree = Some(tree);
        self.index = None;
        self.description.push(entry);
    }

    /// Flatten the current tree into a fresh index
    pub fn build_index(&mut self) -> Result<&ElementIndex> {
        let tree = self.tree.as_ref().ok_or(Error::NotLoaded)?;
        let index = ElementIndex::build(tree);
        self.description
            .push(format!("Indexed {} elements", index.len()));
        Ok(self.index.insert(index))
    }

    /// Randomly pick a parent and a child and append childless clones of the
    /// child to the parent, editing the loaded tree in place
    ///
    /// Needs an index that reflects the current tree. Afterwards the index is
    /// stale and `build_index` must run before the next call.
    pub fn spam<R: Rng>(&mut self, selector: &mut RandomSelector<R>) -> Result<SpamOutcome> {
        let tree = self.tree.as_mut().ok_or(Error::NotLoaded)?;
        let index = self.index.as_ref().ok_or(Error::NotIndexed)?;
        let outcome = spam_element_breadth_wise(tree, index, selector)?;

        let entry = describe(tree, &outcome);
        self.description.push(entry);
        Ok(outcome)
    }

    /// Like `spam`, but edits a copy of the loaded tree and returns it
    ///
    /// The copy gets its own index, so the holder's index is neither needed
    /// nor touched.
    pub fn spam_copy<R: Rng>(&self, selector: &mut RandomSelector<R>) -> Result<XmlTree> {
        let mut copy = self.tree.as_ref().ok_or(Error::NotLoaded)?.clone();
        let index = ElementIndex::build(&copy);
        spam_element_breadth_wise(&mut copy, &index, selector)?;
        Ok(copy)
    }

    /// Apply `config.rounds` spam operations in the configured mode,
    /// re-indexing before every round
    pub fn run(&mut self, config: &MutatorConfig) -> Result<RunReport> {
        let mut selector = config.selector();
        match config.mode {
            MutationMode::InPlace => {
                let mut outcomes = Vec::with_capacity(config.rounds);
                for _ in 0..config.rounds {
                    self.build_index()?;
                    outcomes.push(self.spam(&mut selector)?);
                }
                Ok(RunReport {
                    outcomes,
                    tree: None,
                })
            }
            MutationMode::Copy => {
                let mut copy = self.tree.as_ref().ok_or(Error::NotLoaded)?.clone();
                let outcomes = spam_rounds(&mut copy, config.rounds, &mut selector)?;
                self.description.push(format!(
                    "Mutated a copy with {} rounds ({} elements)",
                    config.rounds,
                    copy.len()
                ));
                Ok(RunReport {
                    outcomes,
                    tree: Some(copy),
                })
            }
        }
    }

    /// Independently mutated copies of the loaded tree, one per
    /// `config.variants`, each with `config.rounds` spam operations
    pub fn variants(&self, config: &MutatorConfig) -> Result<Vec<XmlTree>> {
        let tree = self.tree.as_ref().ok_or(Error::NotLoaded)?;
        generate_variants(tree, config)
    }

    /// Serialize the current tree
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.tree.as_ref().ok_or(Error::NotLoaded)?.to_bytes()
    }

    /// Serialize the current tree to a file
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;

        tracing::info!("Wrote {} bytes of XML to {}", bytes.len(), path.display());
        self.description
            .push(format!("Wrote XML to: {}", path.display()));
        Ok(())
    }

    /// Lifecycle state derived from the tree and index
    pub fn state(&self) -> HolderState {
        match (&self.tree, &self.index) {
            (None, _) => HolderState::Empty,
            (Some(_), None) => HolderState::Loaded,
            (Some(tree), Some(index)) if index.is_stale(tree) => HolderState::Mutated,
            (Some(_), Some(_)) => HolderState::Indexed,
        }
    }

    /// The loaded tree, if any
    pub fn tree(&self) -> Option<&XmlTree> {
        self.tree.as_ref()
    }

    /// Mutable access to the loaded tree
    ///
    /// Structural edits made through it bump the tree revision, so the index
    /// is reported as stale afterwards.
    pub fn tree_mut(&mut self) -> Option<&mut XmlTree> {
        self.tree.as_mut()
    }

    /// The last index built, which may be stale
    pub fn index(&self) -> Option<&ElementIndex> {
        self.index.as_ref()
    }

    /// Operation log, oldest first
    pub fn description(&self) -> &[String] {
        &self.description
    }

    /// Give up the holder and keep the tree
    pub fn into_tree(self) -> Option<XmlTree> {
        self.tree
    }
}

fn describe(tree: &XmlTree, outcome: &SpamOutcome) -> String {
    let name = |id: ElementId| {
        tree.get(id)
            .map(|e| e.name())
            .unwrap_or_else(|| "?".to_string())
    };
    format!(
        "Spammed {} clones of <{}> {} under <{}> {}",
        SPAM_CLONES,
        name(outcome.child),
        outcome.child,
        name(outcome.parent),
        outcome.parent
    )
}
