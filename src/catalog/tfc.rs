//! # Trivial File Catalog
//!
//! The catalog store and resolution engine. Rules are kept in insertion
//! order, one ordered sequence per direction; the first rule whose protocol
//! and prefix pattern both match wins. A rule may chain through another
//! protocol, in which case the input is rewritten by the chained protocol's
//! rules before this rule's template is applied.

use std::fs;
use std::path::Path;

use crate::tree::{self, Node};

use super::contact;
use super::errors::{CatalogError, CatalogResult};
use super::persist;
use super::rule::Rule;

/// Mapping direction for a resolution query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LfnToPfn,
    PfnToLfn,
}

/// Diagnostic summary of a catalog load.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadReport {
    /// LFN-to-PFN rules loaded
    pub lfn_rules: usize,
    /// PFN-to-LFN rules loaded
    pub pfn_rules: usize,
    /// Entries ignored for missing required attributes
    pub skipped: usize,
}

/// A rule-based LFN<->PFN mapping catalog.
#[derive(Debug, Clone, Default)]
pub struct TrivialFileCatalog {
    /// Protocol assumed when a query supplies none
    pub preferred_protocol: Option<String>,
    lfn_rules: Vec<Rule>,
    pfn_rules: Vec<Rule>,
}

impl TrivialFileCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a contact string in one step.
    pub fn from_contact(contact: &str) -> CatalogResult<(Self, LoadReport)> {
        let mut tfc = Self::new();
        let report = tfc.load(contact)?;
        Ok((tfc, report))
    }

    /// Appends an LFN-to-PFN rule.
    ///
    /// Rules are never deduplicated, reordered, or mutated after insertion.
    pub fn add_lfn_to_pfn_rule(
        &mut self,
        protocol: impl Into<String>,
        path_match: impl Into<String>,
        result: impl Into<String>,
        chain: Option<String>,
    ) -> CatalogResult<()> {
        self.lfn_rules
            .push(Rule::new(protocol, path_match, result, chain)?);
        Ok(())
    }

    /// Appends a PFN-to-LFN rule.
    pub fn add_pfn_to_lfn_rule(
        &mut self,
        protocol: impl Into<String>,
        path_match: impl Into<String>,
        result: impl Into<String>,
        chain: Option<String>,
    ) -> CatalogResult<()> {
        self.pfn_rules
            .push(Rule::new(protocol, path_match, result, chain)?);
        Ok(())
    }

    /// Maps an LFN to a PFN, or `None` when no rule applies.
    pub fn match_lfn(&self, protocol: Option<&str>, lfn: &str) -> Option<String> {
        self.resolve(Direction::LfnToPfn, protocol, lfn)
    }

    /// Maps a PFN back to an LFN, or `None` when no rule applies.
    pub fn match_pfn(&self, protocol: Option<&str>, pfn: &str) -> Option<String> {
        self.resolve(Direction::PfnToLfn, protocol, pfn)
    }

    /// Resolves a path through the rule set for one direction.
    ///
    /// An empty or absent protocol falls back to the preferred protocol;
    /// the fallback is applied only at this boundary, never after a failed
    /// match. Returns `None` when no rule applies.
    pub fn resolve(
        &self,
        direction: Direction,
        protocol: Option<&str>,
        path: &str,
    ) -> Option<String> {
        let protocol = protocol
            .filter(|p| !p.is_empty())
            .or(self.preferred_protocol.as_deref())?;

        for rule in self.rules(direction) {
            if rule.protocol != protocol {
                continue;
            }
            if !rule.matches_prefix(path) {
                continue;
            }
            // Chain: rewrite through the chained protocol first. A chain
            // miss aborts the whole resolution rather than falling through
            // to later rules; callers rely on the strict pipeline.
            let resolved;
            let candidate = match &rule.chain {
                Some(chain) => {
                    resolved = self.resolve(direction, Some(chain.as_str()), path)?;
                    resolved.as_str()
                }
                None => path,
            };
            match rule.capture_tail(candidate) {
                Some(tail) => return Some(rule.apply(tail)),
                // pattern absent from the chain-resolved path: not usable
                None => continue,
            }
        }
        None
    }

    /// Rule sequence for one direction, in insertion order.
    pub fn rules(&self, direction: Direction) -> &[Rule] {
        match direction {
            Direction::LfnToPfn => &self.lfn_rules,
            Direction::PfnToLfn => &self.pfn_rules,
        }
    }

    /// LFN-to-PFN rules in insertion order.
    pub fn lfn_rules(&self) -> &[Rule] {
        &self.lfn_rules
    }

    /// PFN-to-LFN rules in insertion order.
    pub fn pfn_rules(&self) -> &[Rule] {
        &self.pfn_rules
    }

    /// Replaces the catalog contents from a contact string.
    ///
    /// Both rule sequences are cleared first; a failed load therefore
    /// leaves an empty catalog, never a partial one.
    pub fn load(&mut self, contact: &str) -> CatalogResult<LoadReport> {
        self.lfn_rules.clear();
        self.pfn_rules.clear();

        let protocol = contact::tfc_protocol(contact);
        self.preferred_protocol = (!protocol.is_empty()).then_some(protocol);

        let filename = contact::tfc_filename(contact);
        let path = Path::new(&filename);
        if !path.exists() {
            return Err(CatalogError::NotFound(filename));
        }

        let root = tree::parse_file(path).map_err(|e| CatalogError::Parse {
            path: filename.clone(),
            reason: e.to_string(),
        })?;
        let outcome = persist::from_tree(&root)?;

        let report = LoadReport {
            lfn_rules: outcome.lfn_rules.len(),
            pfn_rules: outcome.pfn_rules.len(),
            skipped: outcome.skipped,
        };
        self.lfn_rules = outcome.lfn_rules;
        self.pfn_rules = outcome.pfn_rules;
        Ok(report)
    }

    /// Builds the external tree representation of this catalog.
    pub fn save(&self) -> Node {
        persist::to_tree(self)
    }

    /// Writes the catalog to a file as pretty-printed XML.
    pub fn write(&self, path: &Path) -> CatalogResult<()> {
        let xml = tree::to_xml(&self.save()).map_err(|e| CatalogError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::write(path, xml).map_err(|e| CatalogError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_resolution() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/data/$1", None)
            .unwrap();
        assert_eq!(
            tfc.match_lfn(Some("direct"), "/store/foo.root"),
            Some("/data/foo.root".to_string())
        );
    }

    #[test]
    fn test_no_match_is_none() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/data/$1", None)
            .unwrap();
        assert_eq!(tfc.match_lfn(Some("direct"), "/user/foo.root"), None);
        assert_eq!(tfc.match_lfn(Some("srm"), "/store/foo.root"), None);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/first/$1", None)
            .unwrap();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/second/$1", None)
            .unwrap();
        assert_eq!(
            tfc.match_lfn(Some("direct"), "/store/a"),
            Some("/first/a".to_string())
        );
    }

    #[test]
    fn test_interleaved_protocols_skipped() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("srm", "^/store/", "srm://x/$1", None)
            .unwrap();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/data/$1", None)
            .unwrap();
        assert_eq!(
            tfc.match_lfn(Some("direct"), "/store/a"),
            Some("/data/a".to_string())
        );
    }

    #[test]
    fn test_preferred_protocol_default() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.preferred_protocol = Some("direct".to_string());
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/data/$1", None)
            .unwrap();
        assert_eq!(
            tfc.match_lfn(None, "/store/a"),
            Some("/data/a".to_string())
        );
        assert_eq!(
            tfc.match_lfn(Some(""), "/store/a"),
            Some("/data/a".to_string())
        );
        // explicit protocol is never overridden by the preferred one
        assert_eq!(tfc.match_lfn(Some("srm"), "/store/a"), None);
    }

    #[test]
    fn test_no_protocol_at_all() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/data/$1", None)
            .unwrap();
        assert_eq!(tfc.match_lfn(None, "/store/a"), None);
    }

    #[test]
    fn test_chain_resolves_through_other_protocol() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/data/$1", None)
            .unwrap();
        tfc.add_lfn_to_pfn_rule(
            "srm",
            "^/store/",
            "srm://x$1",
            Some("direct".to_string()),
        )
        .unwrap();
        // /store/foo.root -> (direct) /data/foo.root -> split on ^/store/
        // leaves no match, so the srm pattern is applied to the chained
        // result; /data/foo.root does not start with /store/ so the split
        // yields one part and the rule is passed over.
        assert_eq!(tfc.match_lfn(Some("srm"), "/store/foo.root"), None);

        // a chain whose output still matches the outer pattern rewrites
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("direct", "^/+store/", "/store/data/$1", None)
            .unwrap();
        tfc.add_lfn_to_pfn_rule(
            "srm",
            "^/store/",
            "srm://x/$1",
            Some("direct".to_string()),
        )
        .unwrap();
        assert_eq!(
            tfc.match_lfn(Some("srm"), "/store/foo.root"),
            Some("srm://x/data/foo.root".to_string())
        );
    }

    #[test]
    fn test_chain_miss_short_circuits() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule(
            "srm",
            "^/store/",
            "srm://x/$1",
            Some("direct".to_string()),
        )
        .unwrap();
        // a later chainless rule would match, but the chain miss aborts
        tfc.add_lfn_to_pfn_rule("srm", "^/store/", "srm://y/$1", None)
            .unwrap();
        assert_eq!(tfc.match_lfn(Some("srm"), "/store/foo.root"), None);
    }

    #[test]
    fn test_empty_capture_tail() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("root", "^/store/test.root$", "root://host/x$1", None)
            .unwrap();
        assert_eq!(
            tfc.match_lfn(Some("root"), "/store/test.root"),
            Some("root://host/x".to_string())
        );
    }

    #[test]
    fn test_reverse_mapping() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_pfn_to_lfn_rule("direct", "^/data/", "/store/$1", None)
            .unwrap();
        assert_eq!(
            tfc.match_pfn(Some("direct"), "/data/foo.root"),
            Some("/store/foo.root".to_string())
        );
    }

    #[test]
    fn test_missing_catalog_file() {
        let mut tfc = TrivialFileCatalog::new();
        tfc.add_lfn_to_pfn_rule("direct", "^/store/", "/data/$1", None)
            .unwrap();
        let err = tfc
            .load("trivialcatalog_file:/nonexistent/path?protocol=srm")
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        // a failed load leaves no partial rule state behind
        assert!(tfc.lfn_rules().is_empty());
        assert!(tfc.pfn_rules().is_empty());
    }
}
