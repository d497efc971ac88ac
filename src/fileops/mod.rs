//! # Federated File Operations
//!
//! A uniform wrapper over per-protocol transport backends. A file handle is
//! built from a logical name, resolved to a physical name through the
//! catalog, and bound to the backend registered for the resolved protocol.

pub mod backend;
pub mod castor;
pub mod command;
pub mod errors;
pub mod file;
pub mod local;
pub mod xrootd;

pub use backend::{backend_for, FileBackend};
pub use castor::CastorBackend;
pub use command::{run_command, CommandOutput};
pub use errors::{FileOpError, FileOpResult};
pub use file::{is_lfn, split_pfn, FederatedFile, PfnParts};
pub use local::LocalBackend;
pub use xrootd::XrootdBackend;
