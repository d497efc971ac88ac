//! # Tree Query
//!
//! Simple slash-separated path lookups over a node tree. The first path
//! component names the root element itself; each further component selects
//! matching children, in document order.

use super::node::Node;

/// Returns every node reached by the given path expression.
///
/// `query(root, "storage-mapping/lfn-to-pfn")` yields all `lfn-to-pfn`
/// children of a `storage-mapping` root, in document order. An empty path
/// yields the root itself.
pub fn query<'a>(root: &'a Node, path: &str) -> Vec<&'a Node> {
    let mut components = path.split('/').filter(|c| !c.is_empty());
    let first = match components.next() {
        Some(first) => first,
        None => return vec![root],
    };

    let mut current: Vec<&Node> = if root.name == first {
        vec![root]
    } else {
        Vec::new()
    };

    for component in components {
        let mut next = Vec::new();
        for node in current {
            next.extend(node.children.iter().filter(|c| c.name == component));
        }
        current = next;
    }
    current
}
