//! # Xrootd Backend
//!
//! Wide-area access through the `xrd` client tool. Stat and existence
//! probes are cached per handle because a single user command (e.g. a
//! listing) may consult them several times.

use std::cell::{Cell, RefCell};
use std::path::Path;

use super::backend::FileBackend;
use super::command::run_command;
use super::errors::{FileOpError, FileOpResult};
use super::file::FederatedFile;

const TOOL: &str = "xrd";

/// Backend for `root://` PFNs.
#[derive(Debug, Default)]
pub struct XrootdBackend {
    stat_cache: RefCell<Option<String>>,
    is_dir_cache: Cell<Option<bool>>,
    is_file_cache: Cell<Option<bool>>,
}

impl XrootdBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path plus opaque info, as the xrd tool expects its target.
    fn target(file: &FederatedFile) -> String {
        format!("{}{}", file.path, file.opaque)
    }
}

impl FileBackend for XrootdBackend {
    fn stat(&self, file: &FederatedFile) -> FileOpResult<String> {
        if let Some(cached) = self.stat_cache.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let target = Self::target(file);
        let out = run_command(TOOL, &[&file.host, "stat", &target])?.require_success(TOOL)?;
        // only the first line carries the stat record
        let line = out.stdout.lines().next().unwrap_or("").to_string();
        *self.stat_cache.borrow_mut() = Some(line.clone());
        Ok(line)
    }

    fn size(&self, file: &FederatedFile) -> FileOpResult<u64> {
        let stat = self.stat(file)?;
        stat.split_whitespace()
            .nth(3)
            .and_then(|field| field.parse().ok())
            .ok_or_else(|| FileOpError::BadOutput {
                tool: TOOL.to_string(),
                output: stat,
            })
    }

    fn is_dir(&self, file: &FederatedFile) -> FileOpResult<bool> {
        if let Some(cached) = self.is_dir_cache.get() {
            return Ok(cached);
        }
        let target = Self::target(file);
        let out = run_command(TOOL, &[&file.host, "existdir", &target])?;
        let exists = out.success() && out.stdout.starts_with("The directory exists.");
        self.is_dir_cache.set(Some(exists));
        Ok(exists)
    }

    fn is_file(&self, file: &FederatedFile) -> FileOpResult<bool> {
        if let Some(cached) = self.is_file_cache.get() {
            return Ok(cached);
        }
        let target = Self::target(file);
        let out = run_command(TOOL, &[&file.host, "existfile", &target])?;
        let exists = out.success() && out.stdout.starts_with("The file exists.");
        self.is_file_cache.set(Some(exists));
        Ok(exists)
    }

    fn remove(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<()> {
        if recursive {
            return Err(FileOpError::Unsupported(
                "recursive remove is not supported by the xrootd backend".to_string(),
            ));
        }
        let target = Self::target(file);
        run_command(TOOL, &[&file.host, "rm", &target])?.require_success(TOOL)?;
        Ok(())
    }

    fn make_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()> {
        if parents {
            return Err(FileOpError::Unsupported(
                "mkdir with parents is not supported by the xrootd backend".to_string(),
            ));
        }
        let target = Self::target(file);
        run_command(TOOL, &[&file.host, "mkdir", &target])?.require_success(TOOL)?;
        Ok(())
    }

    fn remove_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()> {
        if parents {
            return Err(FileOpError::Unsupported(
                "rmdir with parents is not supported by the xrootd backend".to_string(),
            ));
        }
        let target = Self::target(file);
        run_command(TOOL, &[&file.host, "rmdir", &target])?.require_success(TOOL)?;
        Ok(())
    }

    fn list(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<String> {
        let subcommand = if recursive { "dirlistrec" } else { "dirlist" };

        let list_path = if self.is_dir(file)? {
            file.path.clone()
        } else if self.is_file(file)? {
            // list the parent and keep only this file's line
            Path::new(&file.path)
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| file.path.clone())
        } else {
            return Err(FileOpError::NotFound(file.lfn.clone()));
        };

        let out = run_command(TOOL, &[&file.host, subcommand, &list_path])?;

        let result = if self.is_file(file)? {
            let basename = Path::new(&file.path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let suffix = format!("/{}", basename);
            out.stdout
                .lines()
                .find(|line| line.ends_with(&suffix))
                .unwrap_or("")
                .to_string()
        } else {
            out.stdout
        };

        // rewrite physical paths back into logical terms
        Ok(result.replace(&file.prefix, ""))
    }

    fn reset_cache(&self) {
        *self.stat_cache.borrow_mut() = None;
        self.is_dir_cache.set(None);
        self.is_file_cache.set(None);
    }
}
