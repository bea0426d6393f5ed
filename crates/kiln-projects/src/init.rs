//! The `init` state machine
//!
//! Guards run in a fixed order and each may end the flow:
//!
//! 1. Resolve the target and create it when missing.
//! 2. Refuse a non-empty target unless `--force` was given.
//! 3. Refuse `--force` when the target is (or encloses) the invocation
//!    directory. No flag overrides this.
//! 4. With `--force`, clear everything except `.git`.
//! 5. Materialize the template unless `.git` is already present.

use camino::{Utf8Path, Utf8PathBuf};
use kiln_core::FileSystem;
use kiln_doctor::{detect_package_manager, PackageManagerKind};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::materializer::{Placement, TemplateMaterializer, TemplateSource};
use crate::resolver::{resolve, TargetDirectory, VCS_DIR};

/// Flags that shape a single `init` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Allow replacing the contents of a non-empty target
    pub force: bool,
}

/// What happened to the template during `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    /// Template cloned straight into the target
    Direct,
    /// Template cloned into staging and copied over
    Staged,
    /// `.git` was already present, nothing was copied
    Skipped,
}

/// Outcome of a successful `init`
#[derive(Debug, Clone)]
pub struct InitReport {
    pub target: TargetDirectory,
    /// Entries removed because of `--force`
    pub cleared_entries: usize,
    pub materialization: Materialization,
    pub package_manager: PackageManagerKind,
}

impl InitReport {
    /// Headline for the terminal
    pub fn summary(&self) -> String {
        match self.materialization {
            Materialization::Skipped => format!(
                "{} already contains a git repository; template was not copied",
                self.target.display
            ),
            Materialization::Direct | Materialization::Staged => {
                format!("Project created in {}", self.target.display)
            }
        }
    }

    /// Commands the user is likely to run next
    pub fn next_steps(&self) -> Vec<String> {
        let mut steps = Vec::new();
        if !self.target.is_invocation_dir {
            steps.push(format!("cd {}", self.target.display));
        }
        steps.push(format!("{} install", self.package_manager));
        steps.push(format!("{} run dev", self.package_manager));
        steps
    }
}

/// Drives one `init` invocation
pub struct Initializer<'a> {
    fs: &'a dyn FileSystem,
    source: &'a dyn TemplateSource,
    cwd: Utf8PathBuf,
    staging_root: Utf8PathBuf,
}

impl<'a> Initializer<'a> {
    /// Create an initializer staging templates under the system temp dir
    pub fn new(
        fs: &'a dyn FileSystem,
        source: &'a dyn TemplateSource,
        cwd: impl Into<Utf8PathBuf>,
    ) -> Result<Self> {
        let staging_root = Utf8PathBuf::from_path_buf(std::env::temp_dir())
            .map_err(|p| kiln_core::Error::non_utf8_path(p.to_string_lossy()))?;
        Ok(Self::with_staging_root(fs, source, cwd, staging_root))
    }

    /// Create an initializer with an explicit staging root
    pub fn with_staging_root(
        fs: &'a dyn FileSystem,
        source: &'a dyn TemplateSource,
        cwd: impl Into<Utf8PathBuf>,
        staging_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            fs,
            source,
            cwd: cwd.into(),
            staging_root: staging_root.into(),
        }
    }

    /// Run the state machine for `raw` (the `init` argument, if any)
    pub fn run(&self, raw: Option<&str>, options: &InitOptions) -> Result<InitReport> {
        let target = resolve(self.fs, raw, &self.cwd);
        info!("Initializing project in {}", target.path);

        if !target.exists {
            self.fs.mkdir(&target.path)?;
        }

        let mut cleared_entries = 0;
        if !target.is_empty {
            if !options.force {
                return Err(Error::target_not_empty(&target.display));
            }
            if target.is_protected() {
                return Err(Error::invocation_dir_refused(&target.display));
            }
            cleared_entries = clear_except(self.fs, &target.path, &[VCS_DIR])?;
            info!("Cleared {} entries from {}", cleared_entries, target.path);
        }

        let materialization = if self.fs.exists(&target.path.join(VCS_DIR)) {
            warn!(
                "{} already has {}; skipping template materialization",
                target.path, VCS_DIR
            );
            Materialization::Skipped
        } else {
            let placement = self.placement_for(&target);
            TemplateMaterializer::new(self.fs, self.source, self.staging_root.clone())
                .materialize(&target.path, placement)?;
            match placement {
                Placement::Direct => Materialization::Direct,
                Placement::Staged => Materialization::Staged,
            }
        };

        let package_manager = detect_package_manager(self.fs, &target.path);

        Ok(InitReport {
            target,
            cleared_entries,
            materialization,
            package_manager,
        })
    }

    /// Stage when cloning in place would be unsafe or refused by git
    ///
    /// The invocation directory is never cloned into directly, and git
    /// will not clone into a directory that still holds ignorable residue
    /// such as `.DS_Store`.
    fn placement_for(&self, target: &TargetDirectory) -> Placement {
        if target.is_invocation_dir {
            return Placement::Staged;
        }
        match self.fs.list(&target.path) {
            Ok(names) if names.is_empty() => Placement::Direct,
            _ => Placement::Staged,
        }
    }
}

/// Remove every entry of `dir` whose name is not in `keep`
fn clear_except(fs: &dyn FileSystem, dir: &Utf8Path, keep: &[&str]) -> Result<usize> {
    let mut removed = 0;
    for name in fs.list(dir)? {
        if keep.contains(&name.as_str()) {
            continue;
        }
        fs.remove(&dir.join(&name))?;
        removed += 1;
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::MemoryFileSystem;

    #[test]
    fn test_clear_except_keeps_vcs_dir() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/t/.git/HEAD", "ref").unwrap();
        fs.write_file("/t/src/main.ts", "").unwrap();
        fs.write_file("/t/README.md", "").unwrap();
        fs.write_file("/t/.DS_Store", "").unwrap();

        let removed = clear_except(&fs, Utf8Path::new("/t"), &[VCS_DIR]).unwrap();

        assert_eq!(removed, 3);
        assert_eq!(fs.list(Utf8Path::new("/t")).unwrap(), vec![".git"]);
        assert!(fs.is_file(Utf8Path::new("/t/.git/HEAD")));
    }

    #[test]
    fn test_next_steps_skip_cd_for_invocation_dir() {
        let report = InitReport {
            target: TargetDirectory {
                path: Utf8PathBuf::from("/w"),
                display: ".".to_string(),
                exists: true,
                is_empty: true,
                is_invocation_dir: true,
                encloses_invocation_dir: false,
            },
            cleared_entries: 0,
            materialization: Materialization::Staged,
            package_manager: PackageManagerKind::Pnpm,
        };

        assert_eq!(report.next_steps(), vec!["pnpm install", "pnpm run dev"]);
        assert_eq!(report.summary(), "Project created in .");
    }
}
