//! Target directory resolution and classification

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use kiln_core::FileSystem;
use tracing::{debug, warn};

/// Version-control metadata directory
pub const VCS_DIR: &str = ".git";

/// Entries that do not make a directory count as non-empty
pub const IGNORABLE_ENTRIES: &[&str] = &[VCS_DIR, ".DS_Store"];

/// A classified `init` target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDirectory {
    /// Absolute, lexically normalized path
    pub path: Utf8PathBuf,
    /// The target as the user wrote it (`.` when omitted)
    pub display: String,
    pub exists: bool,
    /// True when missing or holding only ignorable entries
    pub is_empty: bool,
    /// Target is the directory kiln was started from
    pub is_invocation_dir: bool,
    /// Target is a strict ancestor of the directory kiln was started from
    pub encloses_invocation_dir: bool,
}

impl TargetDirectory {
    /// Clearing this directory would pull the ground from under the process
    pub fn is_protected(&self) -> bool {
        self.is_invocation_dir || self.encloses_invocation_dir
    }
}

/// Resolve `raw` against `cwd` and classify the result
///
/// Never fails: a missing path is a valid (empty) target, and a directory
/// that cannot be listed is treated as non-empty.
pub fn resolve(fs: &dyn FileSystem, raw: Option<&str>, cwd: &Utf8Path) -> TargetDirectory {
    let cwd = normalize(cwd);
    let display = raw.unwrap_or(".").to_string();
    let path = match raw {
        Some(raw) => absolutize(raw, &cwd),
        None => cwd.clone(),
    };

    let exists = fs.exists(&path);
    let is_empty = !exists || is_effectively_empty(fs, &path);

    // Compare resolved paths so a symlink cannot disguise the invocation dir
    let (real_path, real_cwd) = if exists {
        (canonical_or_lexical(fs, &path), canonical_or_lexical(fs, &cwd))
    } else {
        (path.clone(), cwd.clone())
    };
    let is_invocation_dir = path == cwd || real_path == real_cwd;
    let encloses_invocation_dir =
        !is_invocation_dir && (cwd.starts_with(&path) || real_cwd.starts_with(&real_path));

    let target = TargetDirectory {
        path,
        display,
        exists,
        is_empty,
        is_invocation_dir,
        encloses_invocation_dir,
    };
    debug!("Resolved init target: {:?}", target);
    target
}

fn canonical_or_lexical(fs: &dyn FileSystem, path: &Utf8Path) -> Utf8PathBuf {
    fs.canonicalize(path).unwrap_or_else(|e| {
        warn!("Could not resolve {}: {}; comparing it lexically", path, e);
        path.to_path_buf()
    })
}

/// True when `dir` holds nothing but ignorable entries
pub(crate) fn is_effectively_empty(fs: &dyn FileSystem, dir: &Utf8Path) -> bool {
    match fs.list(dir) {
        Ok(names) => names
            .iter()
            .all(|name| IGNORABLE_ENTRIES.contains(&name.as_str())),
        Err(e) => {
            warn!("Could not list {}: {}; treating it as not empty", dir, e);
            false
        }
    }
}

/// Join a relative `raw` onto `cwd` and normalize
pub fn absolutize(raw: &str, cwd: &Utf8Path) -> Utf8PathBuf {
    let raw = Utf8Path::new(raw);
    if raw.is_absolute() {
        normalize(raw)
    } else {
        normalize(&cwd.join(raw))
    }
}

/// Remove `.` and resolve `..` without touching the filesystem
fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }
    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}
