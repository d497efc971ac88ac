//! # Rewrite Rule
//!
//! One LFN<->PFN mapping directive: a protocol tag, a prefix-anchored match
//! expression, a `$1` result template, and an optional chain to another
//! protocol's rule set.

use regex::Regex;

use super::errors::{CatalogError, CatalogResult};

/// A single catalog rewrite rule.
///
/// Built once, never mutated. The compiled pattern is derived from
/// `path_match` at construction time.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Transport tag this rule applies under (e.g. "srm", "root", "direct")
    pub protocol: String,
    /// Regular expression source, matched as a prefix against the input path
    pub path_match: String,
    /// Result template; every literal `$1` receives the capture tail
    pub result: String,
    /// Protocol to pre-resolve through before this rule's pattern is tested
    pub chain: Option<String>,
    compiled: Regex,
}

impl Rule {
    /// Builds a rule, compiling `path_match`.
    ///
    /// Fails only when the pattern does not compile. A missing protocol or
    /// result is not rejected here; such a rule simply never matches or
    /// produces an empty rewrite.
    pub fn new(
        protocol: impl Into<String>,
        path_match: impl Into<String>,
        result: impl Into<String>,
        chain: Option<String>,
    ) -> CatalogResult<Self> {
        let path_match = path_match.into();
        let compiled = Regex::new(&path_match).map_err(|e| CatalogError::InvalidPattern {
            pattern: path_match.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            protocol: protocol.into(),
            path_match,
            result: result.into(),
            chain,
            compiled,
        })
    }

    /// True when the pattern matches `path` starting at the first byte.
    ///
    /// Patterns are treated as prefix-anchored: they must match at position
    /// zero but need not consume the whole path.
    pub fn matches_prefix(&self, path: &str) -> bool {
        self.compiled.find(path).is_some_and(|m| m.start() == 0)
    }

    /// Splits `path` at the first pattern occurrence and returns the tail.
    ///
    /// When the pattern carries a capture group the tail is the first
    /// group's text; otherwise it is everything after the matched span.
    /// Catalog patterns are written both ways (`^/store/` and
    /// `/+store/(.*)`) and the two agree on what `$1` should receive.
    /// Returns `None` when the pattern does not occur in `path` at all,
    /// which callers treat as a non-match.
    pub fn capture_tail<'a>(&self, path: &'a str) -> Option<&'a str> {
        let caps = self.compiled.captures(path)?;
        if let Some(group) = caps.get(1) {
            return Some(group.as_str());
        }
        let end = caps.get(0)?.end();
        Some(&path[end..])
    }

    /// Applies the result template to a capture tail.
    pub fn apply(&self, tail: &str) -> String {
        self.result.replace("$1", tail)
    }
}
