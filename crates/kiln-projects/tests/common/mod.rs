//! Shared fakes for kiln-projects integration tests

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use kiln_core::{EntryKind, FileSystem, MemoryFileSystem};
use kiln_projects::{Error, Result, TemplateSource};
use std::cell::RefCell;

/// Template files laid down by [`seed_template`]
pub const TEMPLATE_FILES: &[(&str, &str)] = &[
    ("package.json", r#"{"name":"starter","scripts":{"dev":"vite"}}"#),
    ("pnpm-lock.yaml", "lockfileVersion: '9.0'\n"),
    ("src/main.ts", "console.log('hi')\n"),
    (".git/HEAD", "ref: refs/heads/main\n"),
    ("node_modules/vite/index.js", "module.exports = {}\n"),
    ("src/.cache/tmp", "junk\n"),
    (".env.local", "SECRET=1\n"),
];

/// Write a template tree, including transient artifacts, under `root`
pub fn seed_template(fs: &MemoryFileSystem, root: &str) {
    for (path, contents) in TEMPLATE_FILES {
        fs.write_file(Utf8Path::new(root).join(path), contents)
            .unwrap();
    }
}

/// A "clone" that copies a template tree verbatim, `.git` included
pub struct DirTemplate<'a> {
    fs: &'a dyn FileSystem,
    root: Utf8PathBuf,
    fetched_into: RefCell<Vec<Utf8PathBuf>>,
}

impl<'a> DirTemplate<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
            fetched_into: RefCell::new(Vec::new()),
        }
    }

    /// Every destination `fetch` was called with
    pub fn fetched_into(&self) -> Vec<Utf8PathBuf> {
        self.fetched_into.borrow().clone()
    }
}

impl TemplateSource for DirTemplate<'_> {
    fn location(&self) -> &str {
        self.root.as_str()
    }

    fn fetch(&self, destination: &Utf8Path) -> Result<()> {
        self.fetched_into.borrow_mut().push(destination.to_path_buf());
        copy_tree(self.fs, &self.root, destination)
    }
}

/// A fetch that always fails the way a refused `git clone` does
pub struct FailingTemplate {
    pub code: i32,
    fetched_into: RefCell<Vec<Utf8PathBuf>>,
}

impl FailingTemplate {
    pub fn new(code: i32) -> Self {
        Self {
            code,
            fetched_into: RefCell::new(Vec::new()),
        }
    }

    pub fn fetched_into(&self) -> Vec<Utf8PathBuf> {
        self.fetched_into.borrow().clone()
    }
}

impl TemplateSource for FailingTemplate {
    fn location(&self) -> &str {
        "https://example.invalid/starter.git"
    }

    fn fetch(&self, destination: &Utf8Path) -> Result<()> {
        self.fetched_into.borrow_mut().push(destination.to_path_buf());
        Err(Error::fetch_failed(self.location(), self.code))
    }
}

fn copy_tree(fs: &dyn FileSystem, from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    fs.mkdir(to)?;
    for name in fs.list(from)? {
        let src = from.join(&name);
        let dst = to.join(&name);
        match fs.stat(&src)? {
            Some(EntryKind::Directory) => copy_tree(fs, &src, &dst)?,
            Some(EntryKind::File) => fs.copy(&src, &dst)?,
            None => {}
        }
    }
    Ok(())
}
