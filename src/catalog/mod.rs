//! # Trivial File Catalog Module
//!
//! Rule-based LFN<->PFN translation: the rule model, the ordered catalog
//! store with its resolution engine, the contact-string parser, and the
//! tree persistence adapter.

pub mod contact;
pub mod errors;
pub mod persist;
pub mod rule;
pub mod tfc;

pub use contact::{tfc_filename, tfc_protocol, CATALOG_SCHEME};
pub use errors::{CatalogError, CatalogResult};
pub use persist::{from_tree, to_tree, TreeOutcome};
pub use rule::Rule;
pub use tfc::{Direction, LoadReport, TrivialFileCatalog};
