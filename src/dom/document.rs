//! XML Tree - Arena-based DOM representation
//!
//! Elements are stored in a single arena and addressed by `ElementId`.
//! Each element keeps an ordered list of child handles, so appending to a
//! child list never moves or invalidates any other element.
//!
//! Parsing and serialization go through `quick-xml`. Comments, processing
//! instructions and the DOCTYPE are not part of the model and are dropped.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::namespace::NamespaceResolver;
use super::node::{ElementId, XmlAttribute, XmlElement};
use crate::error::{Error, ParseError, Result};

/// An XML element tree stored in arena format
///
/// The root element is always the first entry of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTree {
    /// Arena of elements
    elements: Vec<XmlElement>,
    /// Bumped on every structural edit
    revision: u64,
}

impl XmlTree {
    /// Create a tree holding a single root element
    ///
    /// Any parent or children the element carried are discarded.
    pub fn with_root(mut root: XmlElement) -> Self {
        root.parent = None;
        root.children.clear();
        root.tail.clear();
        XmlTree {
            elements: vec![root],
            revision: 0,
        }
    }

    /// Parse a well-formed XML document
    pub fn parse(input: &[u8]) -> std::result::Result<Self, ParseError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(false);

        let mut builder = TreeBuilder::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(start)) => builder.open(&start, position)?,
                Ok(Event::Empty(start)) => {
                    builder.open(&start, position)?;
                    builder.close(start.name().as_ref())?;
                }
                Ok(Event::End(end)) => builder.close(end.name().as_ref())?,
                Ok(Event::Text(text)) => {
                    let text = text.unescape().map_err(|source| ParseError::Syntax {
                        position,
                        source,
                    })?;
                    builder.text(text.as_bytes())?;
                }
                Ok(Event::CData(cdata)) => {
                    let cdata = cdata.into_inner();
                    std::str::from_utf8(&cdata)
                        .map_err(|source| ParseError::Utf8 { position, source })?;
                    builder.text(&cdata)?;
                }
                Ok(Event::Eof) => break,
                // Comments, PIs, declarations and DOCTYPE carry no element data
                Ok(_) => {}
                Err(source) => {
                    return Err(ParseError::Syntax {
                        position: reader.error_position() as u64,
                        source,
                    })
                }
            }
            buf.clear();
        }

        let tree = builder.finish()?;
        tracing::debug!(
            "Parsed {} elements, root <{}>",
            tree.len(),
            tree.root_element().name()
        );
        Ok(tree)
    }

    /// Root element ID
    #[inline]
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Root element
    pub fn root_element(&self) -> &XmlElement {
        &self.elements[0]
    }

    /// Get an element by ID
    pub fn get(&self, id: ElementId) -> Option<&XmlElement> {
        self.elements.get(id.index())
    }

    /// Get a mutable element by ID
    ///
    /// Structure (parent and children) is not reachable through this
    /// reference; use `append_child` for structural edits.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut XmlElement> {
        self.elements.get_mut(id.index())
    }

    /// Check whether a handle names an element of this tree
    #[inline]
    pub fn contains(&self, id: ElementId) -> bool {
        id.index() < self.elements.len()
    }

    /// Total number of elements in the arena
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// A tree always has its root
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Structural revision, bumped on every append
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a detached element as the last child of `parent`
    ///
    /// Fails with `Error::UnknownElement` if `parent` is not in the tree and
    /// with `Error::TooManyElements` once the arena cannot address another
    /// element.
    pub fn append_child(&mut self, parent: ElementId, mut element: XmlElement) -> Result<ElementId> {
        if !self.contains(parent) {
            return Err(Error::UnknownElement(parent));
        }
        let id = ElementId::from_index(self.elements.len())
            .ok_or(Error::TooManyElements(self.elements.len()))?;

        element.parent = Some(parent);
        element.children.clear();

        self.elements.push(element);
        self.elements[parent.index()].children.push(id);
        self.revision += 1;
        Ok(id)
    }

    /// Iterate over children of an element
    pub fn children(&self, id: ElementId) -> ChildIter<'_> {
        let children = self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[]);
        ChildIter {
            inner: children.iter(),
        }
    }

    /// Iterate over all descendants of an element (depth-first, document order)
    pub fn descendants(&self, id: ElementId) -> DescendantIter<'_> {
        // Children pushed in reverse so the first child is visited first
        let mut stack = Vec::new();
        if let Some(element) = self.get(id) {
            stack.extend(element.children.iter().rev().copied());
        }
        DescendantIter { tree: self, stack }
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize the tree to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Serialize the tree into a writer
    ///
    /// Elements without children or content are written as empty tags.
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = Writer::new(out);
        let mut stack = vec![Step::Open(self.root())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id) => {
                    let Some(element) = self.get(id) else {
                        continue;
                    };
                    let name = element.name();
                    let mut start = BytesStart::new(name.as_str());
                    for attr in &element.attributes {
                        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
                    }

                    if element.children.is_empty() && element.content.is_empty() {
                        writer.write_event(Event::Empty(start))?;
                        write_text(&mut writer, &element.tail)?;
                        continue;
                    }

                    writer.write_event(Event::Start(start))?;
                    write_text(&mut writer, &element.content)?;
                    stack.push(Step::Close(id));
                    stack.extend(element.children.iter().rev().map(|&c| Step::Open(c)));
                }
                Step::Close(id) => {
                    let Some(element) = self.get(id) else {
                        continue;
                    };
                    let name = element.name();
                    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
                    write_text(&mut writer, &element.tail)?;
                }
            }
        }

        Ok(())
    }
}

/// Pending serializer work
enum Step {
    Open(ElementId),
    Close(ElementId),
}

fn write_text<W: Write>(writer: &mut Writer<W>, text: &[u8]) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let text = String::from_utf8_lossy(text);
    writer.write_event(Event::Text(BytesText::new(&text)))?;
    Ok(())
}

/// Iterator over child elements
pub struct ChildIter<'a> {
    inner: std::slice::Iter<'a, ElementId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over descendant elements (depth-first)
pub struct DescendantIter<'a> {
    tree: &'a XmlTree,
    stack: Vec<ElementId>,
}

impl<'a> Iterator for DescendantIter<'a> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Add children to stack in reverse order (so first child is processed first)
        if let Some(element) = self.tree.get(current) {
            self.stack.extend(element.children.iter().rev().copied());
        }

        Some(current)
    }
}

// =============================================================================
// Tree construction from reader events
// =============================================================================

/// Incremental builder fed by `XmlTree::parse`
struct TreeBuilder {
    elements: Vec<XmlElement>,
    /// Open elements, innermost last
    stack: Vec<ElementId>,
    namespaces: NamespaceResolver,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            elements: Vec::with_capacity(256),
            stack: Vec::with_capacity(32),
            namespaces: NamespaceResolver::new(),
        }
    }

    /// Handle start/empty element
    fn open(&mut self, start: &BytesStart<'_>, position: u64) -> std::result::Result<(), ParseError> {
        let parent = self.stack.last().copied();
        if parent.is_none() && !self.elements.is_empty() {
            let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
            return Err(ParseError::MultipleRoots(name));
        }

        let qname = start.name();
        let local_name = name_str(qname.local_name().as_ref(), position)?;
        let prefix = match qname.prefix() {
            Some(prefix) => Some(name_str(prefix.as_ref(), position)?),
            None => None,
        };

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|source| ParseError::Attribute { position, source })?;
            let name = name_str(attr.key.as_ref(), position)?;
            let value = attr
                .unescape_value()
                .map_err(|source| ParseError::Syntax { position, source })?
                .into_owned();
            attributes.push(XmlAttribute { name, value });
        }

        // Declarations on this element are in scope for its own name
        self.namespaces.push_scope();
        self.namespaces.declare_from_attributes(
            attributes
                .iter()
                .map(|attr| (attr.name.as_str(), attr.value.as_str())),
        );
        let namespace = match &prefix {
            Some(prefix) => self.namespaces.resolve(prefix),
            None => self.namespaces.resolve_default(),
        }
        .map(str::to_string);

        let id = ElementId::from_index(self.elements.len()).ok_or(ParseError::TooManyElements)?;
        self.elements.push(XmlElement {
            prefix,
            local_name,
            namespace,
            attributes,
            content: Vec::new(),
            tail: Vec::new(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.elements[parent.index()].children.push(id);
        }
        self.stack.push(id);
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> std::result::Result<(), ParseError> {
        if self.stack.pop().is_none() {
            return Err(ParseError::UnexpectedEndTag(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }
        self.namespaces.pop_scope();
        Ok(())
    }

    /// Attach text to the open element: content before its first child,
    /// otherwise the tail of its last child
    fn text(&mut self, text: &[u8]) -> std::result::Result<(), ParseError> {
        let Some(&current) = self.stack.last() else {
            let is_whitespace = text
                .iter()
                .all(|&b| b == b' ' || b == b'\t' || b == b'\n' || b == b'\r');
            if is_whitespace {
                return Ok(());
            }
            return Err(ParseError::TextOutsideRoot);
        };

        let target = match self.elements[current.index()].children.last() {
            Some(&last_child) => &mut self.elements[last_child.index()].tail,
            None => &mut self.elements[current.index()].content,
        };
        target.extend_from_slice(text);
        Ok(())
    }

    fn finish(self) -> std::result::Result<XmlTree, ParseError> {
        if let Some(&open) = self.stack.first() {
            return Err(ParseError::UnclosedTag(self.elements[open.index()].name()));
        }
        if self.elements.is_empty() {
            return Err(ParseError::NoRootElement);
        }
        Ok(XmlTree {
            elements: self.elements,
            revision: 0,
        })
    }
}

fn name_str(bytes: &[u8], position: u64) -> std::result::Result<String, ParseError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|source| ParseError::Utf8 { position, source })
}
