//! # Node
//!
//! In-memory element of a structured document tree: a name, ordered string
//! attributes, ordered children, and optional character data.

/// One named node in a document tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Element name
    pub name: String,
    /// Ordered attribute pairs; order is preserved for stable output
    attrs: Vec<(String, String)>,
    /// Ordered child nodes
    pub children: Vec<Node>,
    /// Accumulated character data, trimmed
    pub chardata: String,
}

impl Node {
    /// Creates an empty node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing any existing value for the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Iterates attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Appends a child node.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_roundtrip() {
        let mut node = Node::new("rule");
        node.set_attr("protocol", "srm");
        assert_eq!(node.attr("protocol"), Some("srm"));
        assert_eq!(node.attr("missing"), None);
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut node = Node::new("rule");
        node.set_attr("protocol", "srm");
        node.set_attr("protocol", "rfio");
        assert_eq!(node.attr("protocol"), Some("rfio"));
        assert_eq!(node.attrs().count(), 1);
    }

    #[test]
    fn test_attr_order_preserved() {
        let node = Node::new("rule")
            .with_attr("b", "2")
            .with_attr("a", "1");
        let keys: Vec<&str> = node.attrs().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
