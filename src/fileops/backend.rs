//! # File Backend Trait and Dispatch
//!
//! One capability interface per transport protocol. The backend for a file
//! handle is selected once at construction time from a lookup table keyed
//! by the protocol string the catalog resolved to.

use std::fmt;

use super::castor::CastorBackend;
use super::errors::FileOpResult;
use super::file::FederatedFile;
use super::local::LocalBackend;
use super::xrootd::XrootdBackend;

/// Capability interface implemented by every transport backend.
pub trait FileBackend: fmt::Debug {
    /// Raw stat line for the target
    fn stat(&self, file: &FederatedFile) -> FileOpResult<String>;

    /// Size of the target in bytes
    fn size(&self, file: &FederatedFile) -> FileOpResult<u64>;

    /// True when the target is a directory
    fn is_dir(&self, file: &FederatedFile) -> FileOpResult<bool>;

    /// True when the target is a regular file
    fn is_file(&self, file: &FederatedFile) -> FileOpResult<bool>;

    /// Removes a file, or a whole directory tree when `recursive`
    fn remove(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<()>;

    /// Creates a directory, with missing parents when `parents`
    fn make_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()>;

    /// Removes an empty directory, and empty ancestors when `parents`
    fn remove_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()>;

    /// Directory (or single-file) listing, descending when `recursive`
    fn list(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<String>;

    /// Drops any cached probe results for the target
    fn reset_cache(&self) {}
}

fn local_backend() -> Box<dyn FileBackend> {
    Box::new(LocalBackend)
}

fn xrootd_backend() -> Box<dyn FileBackend> {
    Box::new(XrootdBackend::new())
}

fn castor_backend() -> Box<dyn FileBackend> {
    Box::new(CastorBackend::new())
}

/// Protocol tag to backend constructor table.
///
/// `direct` rules produce plain filesystem paths, so they share the local
/// backend.
const BACKENDS: &[(&str, fn() -> Box<dyn FileBackend>)] = &[
    ("local", local_backend),
    ("direct", direct_backend),
    ("root", xrootd_backend),
    ("rfio", castor_backend),
];

fn direct_backend() -> Box<dyn FileBackend> {
    local_backend()
}

/// Looks up the backend for a protocol tag.
pub fn backend_for(protocol: &str) -> Option<Box<dyn FileBackend>> {
    BACKENDS
        .iter()
        .find(|(tag, _)| *tag == protocol)
        .map(|(_, ctor)| ctor())
}
