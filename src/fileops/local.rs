//! # Local Filesystem Backend

use std::fs;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

use super::backend::FileBackend;
use super::errors::{FileOpError, FileOpResult};
use super::file::FederatedFile;

/// Backend for plain filesystem paths.
#[derive(Debug)]
pub struct LocalBackend;

impl LocalBackend {
    fn metadata(&self, file: &FederatedFile) -> FileOpResult<fs::Metadata> {
        fs::metadata(&file.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FileOpError::NotFound(file.path.clone())
            } else {
                FileOpError::Io(e.to_string())
            }
        })
    }
}

impl FileBackend for LocalBackend {
    fn stat(&self, file: &FederatedFile) -> FileOpResult<String> {
        let meta = self.metadata(file)?;
        let kind = if meta.is_dir() { "dir" } else { "file" };
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Ok(format!("type={} size={} mtime={}", kind, meta.len(), mtime))
    }

    fn size(&self, file: &FederatedFile) -> FileOpResult<u64> {
        Ok(self.metadata(file)?.len())
    }

    fn is_dir(&self, file: &FederatedFile) -> FileOpResult<bool> {
        Ok(Path::new(&file.path).is_dir())
    }

    fn is_file(&self, file: &FederatedFile) -> FileOpResult<bool> {
        Ok(Path::new(&file.path).is_file())
    }

    fn remove(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<()> {
        let path = Path::new(&file.path);
        let result = if recursive && path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        result.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FileOpError::NotFound(file.path.clone())
            } else {
                FileOpError::Io(e.to_string())
            }
        })
    }

    fn make_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()> {
        let result = if parents {
            fs::create_dir_all(&file.path)
        } else {
            fs::create_dir(&file.path)
        };
        result.map_err(|e| FileOpError::Io(e.to_string()))
    }

    fn remove_dir(&self, file: &FederatedFile, parents: bool) -> FileOpResult<()> {
        let path = Path::new(&file.path);
        fs::remove_dir(path).map_err(|e| FileOpError::Io(e.to_string()))?;
        if parents {
            // keep removing now-empty ancestors until one refuses
            let mut current = path.parent();
            while let Some(dir) = current {
                if fs::remove_dir(dir).is_err() {
                    break;
                }
                current = dir.parent();
            }
        }
        Ok(())
    }

    fn list(&self, file: &FederatedFile, recursive: bool) -> FileOpResult<String> {
        let path = Path::new(&file.path);
        if path.is_file() {
            return Ok(file.lfn.clone());
        }
        if !path.is_dir() {
            return Err(FileOpError::NotFound(file.path.clone()));
        }
        let mut entries = Vec::new();
        collect_entries(path, Path::new(""), recursive, &mut entries)
            .map_err(|e| FileOpError::Io(e.to_string()))?;
        Ok(entries.join("\n"))
    }
}

fn collect_entries(
    dir: &Path,
    rel: &Path,
    recursive: bool,
    out: &mut Vec<String>,
) -> io::Result<()> {
    let mut names: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.file_name()))
        .collect();
    names.sort();

    for name in names {
        let child = dir.join(&name);
        let child_rel = rel.join(&name);
        out.push(child_rel.display().to_string());
        if recursive && child.is_dir() {
            collect_entries(&child, &child_rel, true, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TrivialFileCatalog;
    use tempfile::TempDir;

    fn handle(path: &Path) -> FederatedFile {
        let tfc = TrivialFileCatalog::new();
        FederatedFile::new(&path.display().to_string(), &tfc, None).unwrap()
    }

    #[test]
    fn test_stat_and_size() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("f.dat");
        fs::write(&path, b"12345").unwrap();

        let file = handle(&path);
        assert_eq!(file.size().unwrap(), 5);
        let stat = file.stat().unwrap();
        assert!(stat.contains("type=file"));
        assert!(stat.contains("size=5"));
    }

    #[test]
    fn test_is_dir_is_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("f.dat");
        fs::write(&path, b"x").unwrap();

        assert!(handle(&path).is_file().unwrap());
        assert!(!handle(&path).is_dir().unwrap());
        assert!(handle(temp.path()).is_dir().unwrap());
    }

    #[test]
    fn test_remove_recursive() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("f"), b"x").unwrap();

        handle(&temp.path().join("a")).remove(true).unwrap();
        assert!(!temp.path().join("a").exists());
    }

    #[test]
    fn test_mkdir_and_rmdir_with_parents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b/c");

        handle(&dir).make_dir(true).unwrap();
        assert!(dir.is_dir());

        handle(&dir).remove_dir(true).unwrap();
        assert!(!temp.path().join("a").exists());
    }

    #[test]
    fn test_mkdir_without_parents_fails_on_missing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b");
        assert!(handle(&dir).make_dir(false).is_err());
    }

    #[test]
    fn test_list_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b"), b"").unwrap();
        fs::write(temp.path().join("a"), b"").unwrap();

        let listing = handle(temp.path()).list(false).unwrap();
        assert_eq!(listing, "a\nb");
    }

    #[test]
    fn test_list_recursive() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("d")).unwrap();
        fs::write(temp.path().join("d/f"), b"").unwrap();

        let listing = handle(temp.path()).list(true).unwrap();
        assert_eq!(listing, "d\nd/f");
    }

    #[test]
    fn test_missing_target() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope");
        assert!(matches!(
            handle(&path).size(),
            Err(FileOpError::NotFound(_))
        ));
    }
}
