//! Childless Cloning
//!
//! Produces a detached copy of one element's identity: name, namespace,
//! attributes and content. Children, tail and parent are left empty, so the
//! copy can be attached anywhere without dragging a subtree along.

use crate::dom::{ElementId, XmlElement, XmlTree};

/// Copy an element's identity into a new, detached element with no children
///
/// Every field is copied into fresh storage; editing the clone's attributes
/// or content never affects `element`, and vice versa.
pub fn childless_clone(element: &XmlElement) -> XmlElement {
    XmlElement {
        prefix: element.prefix.clone(),
        local_name: element.local_name.clone(),
        namespace: element.namespace.clone(),
        attributes: element.attributes.clone(),
        content: element.content.clone(),
        tail: Vec::new(),
        parent: None,
        children: Vec::new(),
    }
}

impl XmlTree {
    /// Childless clone of the element behind `id`
    pub fn clone_childless(&self, id: ElementId) -> Option<XmlElement> {
        self.get(id).map(childless_clone)
    }
}
