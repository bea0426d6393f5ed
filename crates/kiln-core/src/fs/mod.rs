//! Filesystem capability
//!
//! Everything kiln does to disk goes through the five operations of
//! [`FileSystem`], plus `canonicalize` for identity checks. [`OsFileSystem`]
//! talks to the real disk; [`MemoryFileSystem`] keeps a tree in memory so
//! directory logic can be exercised without touching it.

mod memory;
mod os;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::Result;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Minimal filesystem interface used by scaffolding and detection
pub trait FileSystem {
    /// Names of the entries directly inside `dir`, sorted
    fn list(&self, dir: &Utf8Path) -> Result<Vec<String>>;

    /// Kind of the entry at `path`, or `None` when nothing is there
    fn stat(&self, path: &Utf8Path) -> Result<Option<EntryKind>>;

    /// Create `path` and any missing parents
    fn mkdir(&self, path: &Utf8Path) -> Result<()>;

    /// Copy the contents of file `from` to `to`, replacing `to`
    fn copy(&self, from: &Utf8Path, to: &Utf8Path) -> Result<()>;

    /// Remove `path`, recursively for directories
    fn remove(&self, path: &Utf8Path) -> Result<()>;

    /// Absolute path of `path` with symlinks resolved
    ///
    /// Backends without symlinks return the path unchanged.
    fn canonicalize(&self, path: &Utf8Path) -> Result<Utf8PathBuf> {
        Ok(path.to_path_buf())
    }

    /// Whether anything exists at `path`
    fn exists(&self, path: &Utf8Path) -> bool {
        matches!(self.stat(path), Ok(Some(_)))
    }

    /// Whether a directory exists at `path`
    fn is_dir(&self, path: &Utf8Path) -> bool {
        matches!(self.stat(path), Ok(Some(EntryKind::Directory)))
    }

    /// Whether a regular file exists at `path`
    fn is_file(&self, path: &Utf8Path) -> bool {
        matches!(self.stat(path), Ok(Some(EntryKind::File)))
    }
}
