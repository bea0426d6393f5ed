//! In-memory filesystem backend

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::{EntryKind, FileSystem};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum Node {
    Directory,
    File(Vec<u8>),
}

/// [`FileSystem`] holding its whole tree in memory
///
/// The root `/` always exists. Every mutation bumps a counter so callers
/// can assert that an operation left the tree untouched.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: RefCell<BTreeMap<Utf8PathBuf, Node>>,
    writes: Cell<usize>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a file, creating its parent directories
    pub fn write_file(&self, path: impl AsRef<Utf8Path>, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.mkdir(parent)?;
        }
        if self.is_dir(path) {
            return Err(Error::path_operation(
                "write",
                path,
                std::io::Error::other("is a directory"),
            ));
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
        self.bump();
        Ok(())
    }

    /// Contents of the file at `path`
    pub fn read(&self, path: impl AsRef<Utf8Path>) -> Option<Vec<u8>> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(data)) => Some(data.clone()),
            _ => None,
        }
    }

    /// Contents of the file at `path` as UTF-8
    pub fn read_to_string(&self, path: impl AsRef<Utf8Path>) -> Option<String> {
        self.read(path).and_then(|data| String::from_utf8(data).ok())
    }

    /// Every path currently stored, sorted
    pub fn paths(&self) -> Vec<Utf8PathBuf> {
        self.nodes.borrow().keys().cloned().collect()
    }

    /// Number of mutating operations performed so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn bump(&self) {
        self.writes.set(self.writes.get() + 1);
    }

    fn is_root(path: &Utf8Path) -> bool {
        path.parent().is_none()
    }

    fn kind_of(&self, path: &Utf8Path) -> Option<EntryKind> {
        if Self::is_root(path) {
            return Some(EntryKind::Directory);
        }
        self.nodes.borrow().get(path).map(|node| match node {
            Node::Directory => EntryKind::Directory,
            Node::File(_) => EntryKind::File,
        })
    }
}

impl FileSystem for MemoryFileSystem {
    fn list(&self, dir: &Utf8Path) -> Result<Vec<String>> {
        match self.kind_of(dir) {
            Some(EntryKind::Directory) => {}
            Some(EntryKind::File) => return Err(Error::not_a_directory(dir)),
            None => return Err(Error::path_not_found(dir)),
        }

        let nodes = self.nodes.borrow();
        let names = nodes
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name().map(str::to_string))
            .collect();

        Ok(names)
    }

    fn stat(&self, path: &Utf8Path) -> Result<Option<EntryKind>> {
        Ok(self.kind_of(path))
    }

    fn mkdir(&self, path: &Utf8Path) -> Result<()> {
        let mut missing = Vec::new();
        for ancestor in path.ancestors() {
            match self.kind_of(ancestor) {
                Some(EntryKind::Directory) => break,
                Some(EntryKind::File) => return Err(Error::not_a_directory(ancestor)),
                None => missing.push(ancestor.to_path_buf()),
            }
        }

        if missing.is_empty() {
            return Ok(());
        }

        let mut nodes = self.nodes.borrow_mut();
        for dir in missing {
            nodes.insert(dir, Node::Directory);
        }
        drop(nodes);
        self.bump();

        Ok(())
    }

    fn copy(&self, from: &Utf8Path, to: &Utf8Path) -> Result<()> {
        let data = match self.nodes.borrow().get(from) {
            Some(Node::File(data)) => data.clone(),
            Some(Node::Directory) => {
                return Err(Error::path_operation(
                    "copy",
                    from,
                    std::io::Error::other("is a directory"),
                ))
            }
            None => return Err(Error::path_not_found(from)),
        };

        match to.parent().map(|parent| self.kind_of(parent)) {
            Some(Some(EntryKind::Directory)) | None => {}
            Some(Some(EntryKind::File)) => {
                return Err(Error::not_a_directory(to.parent().unwrap_or(to)))
            }
            Some(None) => return Err(Error::path_not_found(to.parent().unwrap_or(to))),
        }
        if self.is_dir(to) {
            return Err(Error::path_operation(
                "copy",
                to,
                std::io::Error::other("is a directory"),
            ));
        }

        self.nodes
            .borrow_mut()
            .insert(to.to_path_buf(), Node::File(data));
        self.bump();

        Ok(())
    }

    fn remove(&self, path: &Utf8Path) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let before = nodes.len();
        nodes.retain(|candidate, _| !candidate.starts_with(path));
        let removed = nodes.len() != before;
        drop(nodes);

        if removed {
            self.bump();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_parents() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/a/b/c.txt", "hi").unwrap();

        assert!(fs.is_dir(Utf8Path::new("/a")));
        assert!(fs.is_dir(Utf8Path::new("/a/b")));
        assert!(fs.is_file(Utf8Path::new("/a/b/c.txt")));
        assert_eq!(fs.read_to_string("/a/b/c.txt").as_deref(), Some("hi"));
    }

    #[test]
    fn test_list_only_direct_children() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/one.txt", "").unwrap();
        fs.write_file("/p/sub/two.txt", "").unwrap();

        let names = fs.list(Utf8Path::new("/p")).unwrap();
        assert_eq!(names, vec!["one.txt", "sub"]);
    }

    #[test]
    fn test_list_missing_dir_errors() {
        let fs = MemoryFileSystem::new();
        assert!(matches!(
            fs.list(Utf8Path::new("/missing")),
            Err(Error::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_is_recursive_and_prefix_safe() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/dir/file", "").unwrap();
        fs.write_file("/p/dir2/file", "").unwrap();

        fs.remove(Utf8Path::new("/p/dir")).unwrap();

        assert!(!fs.exists(Utf8Path::new("/p/dir")));
        assert!(!fs.exists(Utf8Path::new("/p/dir/file")));
        assert!(fs.exists(Utf8Path::new("/p/dir2/file")));
    }

    #[test]
    fn test_copy_requires_parent() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/src.txt", "x").unwrap();
        assert!(fs
            .copy(Utf8Path::new("/src.txt"), Utf8Path::new("/nope/dst.txt"))
            .is_err());

        fs.mkdir(Utf8Path::new("/out")).unwrap();
        fs.copy(Utf8Path::new("/src.txt"), Utf8Path::new("/out/dst.txt"))
            .unwrap();
        assert_eq!(fs.read_to_string("/out/dst.txt").as_deref(), Some("x"));
    }

    #[test]
    fn test_write_count_tracks_mutations_only() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/file", "").unwrap();
        let after_setup = fs.write_count();

        let _ = fs.list(Utf8Path::new("/p")).unwrap();
        let _ = fs.stat(Utf8Path::new("/p/file")).unwrap();
        fs.mkdir(Utf8Path::new("/p")).unwrap();
        fs.remove(Utf8Path::new("/p/missing")).unwrap();

        assert_eq!(fs.write_count(), after_setup);
    }
}
