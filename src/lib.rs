//! xmlspam - Structural fuzz-mutator for XML document trees
//!
//! Loads a document, indexes every element, and repeatedly appends batches
//! of childless clones of a random element under another random element.
//! The perturbed trees are meant for stress-testing XML consumers.
//!
//! Pieces:
//! - `dom`: arena-based element tree with quick-xml parsing and serialization
//! - `index`: flattened, revision-stamped snapshot of a tree's elements
//! - `clone`: childless element copies
//! - `select`: uniform random element selection with an injected RNG
//! - `mutator`: the spam operation
//! - `holder`: document holder tying read, index and mutate together
//! - `strategy`: parallel generation of independent variants
//!
//! ```no_run
//! use xmlspam::{RandomSelector, XmlHolder};
//!
//! # fn main() -> xmlspam::Result<()> {
//! let mut holder = XmlHolder::new("fuzz input.xml");
//! holder.read("input.xml")?;
//! holder.build_index()?;
//! holder.spam(&mut RandomSelector::seeded(42))?;
//! holder.write("mutated.xml")?;
//! # Ok(())
//! # }
//! ```

pub mod clone;
pub mod config;
pub mod dom;
pub mod error;
pub mod holder;
pub mod index;
pub mod mutator;
pub mod select;
pub mod strategy;

pub use clone::childless_clone;
pub use config::{MutationMode, MutatorConfig};
pub use dom::{ElementId, XmlAttribute, XmlElement, XmlTree};
pub use error::{Error, ParseError, Result};
pub use holder::{HolderState, RunReport, XmlHolder};
pub use index::{flatten, ElementIndex};
pub use mutator::{spam_element_breadth_wise, spam_into, spam_rounds, SpamOutcome, SPAM_CLONES};
pub use select::RandomSelector;
pub use strategy::generate_variants;
