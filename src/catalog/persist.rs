//! # Catalog Persistence
//!
//! Conversion between a catalog's rule set and its structured-tree external
//! representation: a `storage-mapping` root with one `lfn-to-pfn` or
//! `pfn-to-lfn` child per rule.
//!
//! Loading is deliberately lenient: entries missing a `protocol` or
//! `path-match` attribute are skipped and counted rather than failing the
//! whole load, so catalogs carrying unrelated or newer entry kinds stay
//! readable.

use crate::tree::{self, Node};

use super::errors::CatalogResult;
use super::rule::Rule;
use super::tfc::TrivialFileCatalog;

const ROOT_ELEMENT: &str = "storage-mapping";
const LFN_TO_PFN: &str = "lfn-to-pfn";
const PFN_TO_LFN: &str = "pfn-to-lfn";

/// Rules recovered from a tree, with a skipped-entry diagnostic.
#[derive(Debug, Default)]
pub struct TreeOutcome {
    pub lfn_rules: Vec<Rule>,
    pub pfn_rules: Vec<Rule>,
    /// Entries ignored for missing required attributes
    pub skipped: usize,
}

/// Builds the external tree representation of a catalog.
///
/// The derived compiled pattern is not persisted; `chain` is omitted when
/// absent or empty.
pub fn to_tree(catalog: &TrivialFileCatalog) -> Node {
    let mut root = Node::new(ROOT_ELEMENT);
    for rule in catalog.lfn_rules() {
        root.add_child(rule_to_node(LFN_TO_PFN, rule));
    }
    for rule in catalog.pfn_rules() {
        root.add_child(rule_to_node(PFN_TO_LFN, rule));
    }
    root
}

/// Recovers rule sets from a tree.
///
/// Fails only when a kept entry's `path-match` does not compile.
pub fn from_tree(root: &Node) -> CatalogResult<TreeOutcome> {
    let mut outcome = TreeOutcome::default();

    let path = format!("{}/{}", ROOT_ELEMENT, LFN_TO_PFN);
    for node in tree::query(root, &path) {
        match rule_from_node(node) {
            Some(rule) => outcome.lfn_rules.push(rule?),
            None => outcome.skipped += 1,
        }
    }

    let path = format!("{}/{}", ROOT_ELEMENT, PFN_TO_LFN);
    for node in tree::query(root, &path) {
        match rule_from_node(node) {
            Some(rule) => outcome.pfn_rules.push(rule?),
            None => outcome.skipped += 1,
        }
    }

    Ok(outcome)
}

fn rule_to_node(name: &str, rule: &Rule) -> Node {
    let mut node = Node::new(name)
        .with_attr("protocol", rule.protocol.as_str())
        .with_attr("path-match", rule.path_match.as_str())
        .with_attr("result", rule.result.as_str());
    if let Some(chain) = rule.chain.as_deref().filter(|c| !c.is_empty()) {
        node.set_attr("chain", chain);
    }
    node
}

/// Reads one rule entry; `None` marks an entry to skip.
fn rule_from_node(node: &Node) -> Option<CatalogResult<Rule>> {
    let protocol = node.attr("protocol")?;
    let path_match = node.attr("path-match")?;
    let result = node.attr("result").unwrap_or("");
    let chain = node
        .attr("chain")
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    Some(Rule::new(protocol, path_match, result, chain))
}
