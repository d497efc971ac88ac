//! # CASTOR Backend
//!
//! Hierarchical storage manager access through the CASTOR nameserver
//! tools: `nsls`, `nsrm`, `nsmkdir`, `nsrmdir`, and `rfstat`.

use std::cell::RefCell;

use super::backend::FileBackend;
use super::command::run_command;
use super::errors::{FileOpError, FileOpResult};
use super::file::FederatedFile;

/// Backend for `rfio://` PFNs.
#[derive(Debug, Default)]
pub struct CastorBackend {
    stat_cache: RefCell<Option<String>>,
}

impl CastorBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn nsls(&self, file: &FederatedFile, flags: &[&str]) -> FileOpResult<String> {
        let mut args: Vec<&str> = flags.to_vec();
        args.push(&file.path);
        Ok(run_command("nsls", &args)?.stdout)
    }
}

impl FileBackend for CastorBackend {
    fn stat(&self, file: &FederatedFile) -> FileOpResult<String> {
        if let Some(cached) = self.stat_cache.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let out = run_command("rfstat", &[&file.path])?;
        *self.stat_cache.borrow_mut() = Some(out.stdout.clone());
        Ok(out.stdout)
    }

    fn size(&self, file: &FederatedFile) -> FileOpResult<u64> {
        // size is the fifth field of a long nameserver listing
        let listing = self.nsls(file, &["-l"])?;
        listing
            .split_whitespace()
            .nth(4)
            .and_then(|field| field.parse().ok())
            .ok_or(FileOpError::BadOutput {
                tool: "nsls".to_string(),
                output: listing,
            })
    }

    fn is_dir(&self, file: &FederatedFile) -> FileOpResult<bool> {
        Ok(self.nsls(file, &["-dl"])?.starts_with('d'))
    }

    fn is_file(&self, file: &FederatedFile) -> FileOpResult<bool> {
        if self.nsls(file, &[])?.is_empty() || self.is_dir(file)? {
            Ok(false)
        } else {
            Ok(true)
        }
    }

    fn remove(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<()> {
        let flags: &[&str] = if recursive { &["-r"] } else { &[] };
        let mut args: Vec<&str> = flags.to_vec();
        args.push(&file.path);
        run_command("nsrm", &args)?.require_success("nsrm")?;
        Ok(())
    }

    fn make_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()> {
        let flags: &[&str] = if parents { &["-p"] } else { &[] };
        let mut args: Vec<&str> = flags.to_vec();
        args.push(&file.path);
        run_command("nsmkdir", &args)?.require_success("nsmkdir")?;
        Ok(())
    }

    fn remove_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()> {
        if parents {
            return Err(FileOpError::Unsupported(
                "rmdir with parents is not supported by the CASTOR backend".to_string(),
            ));
        }
        run_command("nsrmdir", &[&file.path])?.require_success("nsrmdir")?;
        Ok(())
    }

    fn list(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<String> {
        let flags: &[&str] = if recursive { &["-R"] } else { &[] };
        self.nsls(file, flags)
    }

    fn reset_cache(&self) {
        *self.stat_cache.borrow_mut() = None;
    }
}
