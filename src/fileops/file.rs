//! # Federated File Handle
//!
//! A file handle built from a logical file name. LFNs under the federation
//! namespaces are resolved to a PFN through the catalog, the PFN is split
//! into protocol/host/path/opaque parts, and a backend is picked once from
//! the protocol lookup table. Anything outside the federation namespaces is
//! handled verbatim by the local backend.

use crate::catalog::TrivialFileCatalog;

use super::backend::{backend_for, FileBackend};
use super::errors::{FileOpError, FileOpResult};

/// Namespace prefixes resolved through the catalog.
const LFN_PREFIXES: &[&str] = &["/store/", "/user/"];

/// True when the path is a federation logical name.
pub fn is_lfn(path: &str) -> bool {
    LFN_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// A file addressed by logical name, bound to one transport backend.
#[derive(Debug)]
pub struct FederatedFile {
    /// Logical file name as given
    pub lfn: String,
    /// Resolved physical file name
    pub pfn: String,
    /// Transport protocol tag from the PFN
    pub protocol: String,
    /// Remote host (with optional port), or "localhost"
    pub host: String,
    /// Path component of the PFN
    pub path: String,
    /// Transport-specific query suffix, including the leading '?', or empty
    pub opaque: String,
    /// PFN path prefix in front of the logical name, used to rewrite
    /// listings back into logical terms
    pub prefix: String,
    backend: Box<dyn FileBackend>,
}

impl FederatedFile {
    /// Builds a handle for `lfn`, resolving through `catalog` when the name
    /// is inside a federation namespace.
    pub fn new(
        lfn: &str,
        catalog: &TrivialFileCatalog,
        protocol: Option<&str>,
    ) -> FileOpResult<Self> {
        if is_lfn(lfn) {
            let pfn = catalog
                .match_lfn(protocol, lfn)
                .ok_or_else(|| FileOpError::NoMapping(lfn.to_string()))?;
            let parts = split_pfn(&pfn);
            let backend = backend_for(&parts.protocol)
                .ok_or_else(|| FileOpError::UnknownProtocol(parts.protocol.clone()))?;
            let prefix = parts.path.replace(lfn, "");
            Ok(Self {
                lfn: lfn.to_string(),
                pfn,
                protocol: parts.protocol,
                host: parts.host,
                path: parts.path,
                opaque: parts.opaque,
                prefix,
                backend,
            })
        } else {
            // not a logical name: plain local path, no catalog involved
            let backend =
                backend_for("local").ok_or_else(|| FileOpError::UnknownProtocol("local".into()))?;
            Ok(Self {
                lfn: lfn.to_string(),
                pfn: lfn.to_string(),
                protocol: "local".to_string(),
                host: "localhost".to_string(),
                path: lfn.to_string(),
                opaque: String::new(),
                prefix: String::new(),
                backend,
            })
        }
    }

    pub fn stat(&self) -> FileOpResult<String> {
        self.backend.stat(self)
    }

    pub fn size(&self) -> FileOpResult<u64> {
        self.backend.size(self)
    }

    pub fn is_dir(&self) -> FileOpResult<bool> {
        self.backend.is_dir(self)
    }

    pub fn is_file(&self) -> FileOpResult<bool> {
        self.backend.is_file(self)
    }

    pub fn remove(&self, recursive: bool) -> FileOpResult<()> {
        self.backend.remove(self, recursive)
    }

    pub fn make_dir(&self, parents: bool) -> FileOpResult<()> {
        self.backend.make_dir(self, parents)
    }

    pub fn remove_dir(&self, parents: bool) -> FileOpResult<()> {
        self.backend.remove_dir(self, parents)
    }

    pub fn list(&self, recursive: bool) -> FileOpResult<String> {
        self.backend.list(self, recursive)
    }

    /// Drops cached stat/existence probes on the backend.
    pub fn reset_cache(&self) {
        self.backend.reset_cache();
    }
}

/// Split PFN parts: `<protocol>://<host>/<path>?<opaque>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfnParts {
    pub protocol: String,
    pub host: String,
    pub path: String,
    pub opaque: String,
}

/// Splits a PFN into protocol, host, path, and opaque query info.
///
/// A PFN without a `://` marker is a plain filesystem path. Some storage
/// elements bury the real path in the opaque section as a `path=` parameter;
/// when present it replaces the path component and is removed from the
/// opaque string.
pub fn split_pfn(pfn: &str) -> PfnParts {
    let (protocol, rest) = match pfn.split_once("://") {
        Some(split) => split,
        None => {
            return PfnParts {
                protocol: "local".to_string(),
                host: "localhost".to_string(),
                path: pfn.to_string(),
                opaque: String::new(),
            }
        }
    };

    let (host, remainder) = match rest.split_once('/') {
        Some(split) => split,
        None => (rest, ""),
    };

    let (path, opaque) = match remainder.split_once('?') {
        Some((path, query)) => (path.to_string(), format!("?{}", query)),
        None => (remainder.to_string(), String::new()),
    };
    let (path, opaque) = extract_embedded_path(path, opaque);

    PfnParts {
        protocol: protocol.to_string(),
        host: host.to_string(),
        path,
        opaque,
    }
}

/// Pulls a `path=` parameter out of the opaque info, when present; it
/// replaces the path component and is dropped from the opaque string.
fn extract_embedded_path(path: String, opaque: String) -> (String, String) {
    if !opaque.starts_with("?path=") && !opaque.contains("&path=") {
        return (path, opaque);
    }

    let mut real_path = path;
    let mut kept: Vec<&str> = Vec::new();
    for element in opaque.trim_start_matches('?').split('&') {
        match element.strip_prefix("path=") {
            Some(embedded) => real_path = embedded.to_string(),
            None => kept.push(element),
        }
    }
    let rebuilt = if kept.is_empty() {
        String::new()
    } else {
        format!("?{}", kept.join("&"))
    };
    (real_path, rebuilt)
}
