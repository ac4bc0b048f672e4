//! Error types
//!
//! Failures at the input boundary (I/O, malformed XML) are returned as values
//! so the caller decides whether to abort. Everything past that boundary works
//! on an already validated tree and only reports precondition violations.

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input file missing, unreadable or not fully read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input is not well-formed XML
    #[error("failed to parse XML: {0}")]
    Parse(#[from] ParseError),

    /// Serializing or writing the tree failed
    #[error("failed to write XML: {0}")]
    Write(#[from] io::Error),

    /// The XML writer rejected an event
    #[error("failed to serialize XML: {0}")]
    Serialize(#[from] quick_xml::Error),

    /// Handle does not name an element of this tree
    #[error("unknown element {0}")]
    UnknownElement(crate::dom::ElementId),

    /// The tree cannot address another element
    #[error("tree is full ({0} elements)")]
    TooManyElements(usize),

    /// Operation needs a document but none has been read
    #[error("no document loaded")]
    NotLoaded,

    /// Operation needs an element index but none has been built
    #[error("element index has not been built")]
    NotIndexed,

    /// Index was built from an older revision of the tree
    #[error("element index is stale (built at revision {indexed}, tree is at {current})")]
    StaleIndex { indexed: u64, current: u64 },

    /// Random selection from an index with no elements
    #[error("cannot select from an empty element index")]
    EmptyIndex,
}

/// Reasons a document is rejected by the parser
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Syntax error reported by the XML reader
    #[error("syntax error at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Attribute could not be read
    #[error("malformed attribute at byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    /// Non-whitespace text outside the root element
    #[error("text content not allowed at document level")]
    TextOutsideRoot,

    /// Name or CDATA section is not valid UTF-8
    #[error("invalid UTF-8 at byte {position}: {source}")]
    Utf8 {
        position: u64,
        #[source]
        source: Utf8Error,
    },

    /// Document contains no element at all
    #[error("document has no root element")]
    NoRootElement,

    /// A second element was found at document level
    #[error("document has multiple root elements (second is <{0}>)")]
    MultipleRoots(String),

    /// Input ended with an element still open
    #[error("unclosed tag: <{0}>")]
    UnclosedTag(String),

    /// End tag without a matching start tag
    #[error("unexpected end tag: </{0}>")]
    UnexpectedEndTag(String),

    /// More elements than an `ElementId` can address
    #[error("document has more than {} elements", u32::MAX)]
    TooManyElements,
}
