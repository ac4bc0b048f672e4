//! DOM Module - Arena-based XML element tree
//!
//! Implements the element model the mutator works on:
//! - Arena allocation for elements
//! - ElementId handles that stay valid while the tree grows
//! - Ordered child handle lists per element
//! - Namespace resolution stack used while parsing

pub mod document;
pub mod namespace;
pub mod node;

pub use document::{ChildIter, DescendantIter, XmlTree};
pub use namespace::NamespaceResolver;
pub use node::{ElementId, XmlAttribute, XmlElement};
