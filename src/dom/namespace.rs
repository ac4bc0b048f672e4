//! Namespace Resolution
//!
//! Stack-based namespace resolver used while building the tree.

/// Well-known namespace URIs
pub mod ns {
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
}

/// Namespace binding (prefix -> URI). The default namespace uses an empty prefix.
#[derive(Debug, Clone)]
struct NsBinding {
    prefix: String,
    uri: String,
    depth: usize,
}

/// Stack-based namespace resolver
#[derive(Debug)]
pub struct NamespaceResolver {
    /// Stack of namespace bindings
    bindings: Vec<NsBinding>,
    /// Current element depth
    depth: usize,
}

impl NamespaceResolver {
    /// Create a new namespace resolver with pre-declared xml and xmlns namespaces
    pub fn new() -> Self {
        let mut bindings = Vec::with_capacity(16);
        bindings.push(NsBinding {
            prefix: "xml".to_string(),
            uri: ns::XML.to_string(),
            depth: 0,
        });
        bindings.push(NsBinding {
            prefix: "xmlns".to_string(),
            uri: ns::XMLNS.to_string(),
            depth: 0,
        });
        NamespaceResolver { bindings, depth: 0 }
    }

    /// Enter a new element scope
    pub fn push_scope(&mut self) {
        self.depth += 1;
    }

    /// Leave an element scope, removing any bindings declared in it
    pub fn pop_scope(&mut self) {
        while let Some(binding) = self.bindings.last() {
            if binding.depth < self.depth {
                break;
            }
            self.bindings.pop();
        }
        self.depth = self.depth.saturating_sub(1);
    }

    /// Declare a namespace binding for the current scope
    pub fn declare(&mut self, prefix: &str, uri: &str) {
        // xml and xmlns are fixed
        if prefix == "xml" || prefix == "xmlns" {
            return;
        }

        self.bindings.push(NsBinding {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
            depth: self.depth,
        });
    }

    /// Declare the default namespace for current scope (`xmlns=""` undeclares it)
    pub fn declare_default(&mut self, uri: &str) {
        self.declare("", uri);
    }

    /// Scan an element's attributes for `xmlns` and `xmlns:*` declarations
    pub fn declare_from_attributes<'a, I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in attributes {
            if name == "xmlns" {
                self.declare_default(value);
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                self.declare(prefix, value);
            }
        }
    }

    /// Resolve a prefix to a namespace URI
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        // Search from most recent to oldest
        self.bindings
            .iter()
            .rev()
            .find(|binding| binding.prefix == prefix)
            .map(|binding| binding.uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    /// Resolve the default namespace
    pub fn resolve_default(&self) -> Option<&str> {
        self.resolve("")
    }

}

impl Default for NamespaceResolver {
    fn default() -> Self {
        Self::new()
    }
}
