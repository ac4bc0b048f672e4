//! XML Element representation
//!
//! Elements live in the tree arena and refer to each other through
//! `ElementId` handles, never through references.

use std::fmt;

/// Stable element handle (index into the tree arena)
///
/// Handles stay valid for the lifetime of the tree: the arena only grows,
/// so appending to any child list never moves an existing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// Position of the element in the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Handle for an arena position, None past the `u32` range
    #[inline]
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(ElementId)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An attribute as written in the source (qualified name, unescaped value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
}

impl XmlAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        XmlAttribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Namespace prefix, if the tag was written as `prefix:local`
    pub prefix: Option<String>,
    /// Local name
    pub local_name: String,
    /// Namespace URI resolved at parse time
    pub namespace: Option<String>,
    /// Attributes in source order (namespace declarations included)
    pub attributes: Vec<XmlAttribute>,
    /// Unescaped text before the first child element
    pub content: Vec<u8>,
    /// Unescaped text after this element's end tag, inside the parent
    pub tail: Vec<u8>,
    /// Parent element (None for the root and for detached elements)
    pub(crate) parent: Option<ElementId>,
    /// Children in document order
    pub(crate) children: Vec<ElementId>,
}

impl XmlElement {
    /// Create a detached element with no attributes, content or children
    pub fn new(local_name: impl Into<String>) -> Self {
        XmlElement {
            prefix: None,
            local_name: local_name.into(),
            namespace: None,
            attributes: Vec::new(),
            content: Vec::new(),
            tail: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Qualified name as written in the source (`prefix:local` or `local`)
    pub fn name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Get attribute value by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Content bytes as UTF-8, if valid
    pub fn content_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    /// Parent element, if attached below another element
    #[inline]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child handles in document order
    #[inline]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Check if this element has children
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this element has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Compare name, namespace, attributes and content, ignoring position
    /// in the tree (parent, children, tail)
    pub fn same_identity(&self, other: &XmlElement) -> bool {
        self.prefix == other.prefix
            && self.local_name == other.local_name
            && self.namespace == other.namespace
            && self.attributes == other.attributes
            && self.content == other.content
    }
}
