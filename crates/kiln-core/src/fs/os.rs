//! Real-disk filesystem backend

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;

use super::{EntryKind, FileSystem};
use crate::error::{Error, Result};

/// [`FileSystem`] backed by `std::fs`
///
/// `stat` follows symlinks, so linked files are content-copied and linked
/// directories are recreated.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn list(&self, dir: &Utf8Path) -> Result<Vec<String>> {
        let entries = fs::read_dir(dir).map_err(|e| Error::path_operation("read_dir", dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::path_operation("read_dir", dir, e))?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|raw| Error::non_utf8_path(raw.to_string_lossy()))?;
            names.push(name);
        }
        names.sort();

        Ok(names)
    }

    fn stat(&self, path: &Utf8Path) -> Result<Option<EntryKind>> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::File)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::path_operation("stat", path, e)),
        }
    }

    fn mkdir(&self, path: &Utf8Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::path_operation("create_dir", path, e))
    }

    fn copy(&self, from: &Utf8Path, to: &Utf8Path) -> Result<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| Error::path_operation("copy", from, e))
    }

    fn remove(&self, path: &Utf8Path) -> Result<()> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::path_operation("remove", path, e)),
        };

        let result = if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        result.map_err(|e| Error::path_operation("remove", path, e))
    }

    fn canonicalize(&self, path: &Utf8Path) -> Result<Utf8PathBuf> {
        path.canonicalize_utf8()
            .map_err(|e| Error::path_operation("canonicalize", path, e))
    }
}
