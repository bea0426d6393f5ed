//! Project layout detection

use camino::{Utf8Path, Utf8PathBuf};
use kiln_core::config::ProjectConfig;
use kiln_core::FileSystem;
use tracing::debug;

/// How (and whether) a directory hosts a provisioned project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectLayout {
    /// No manifest at the expected places
    NotFound,
    /// A single package rooted at `root`
    SinglePackage { root: Utf8PathBuf },
    /// A multi-package workspace whose application lives in `root/app_subdir`
    Workspace {
        root: Utf8PathBuf,
        app_subdir: Utf8PathBuf,
    },
}

impl ProjectLayout {
    /// Project root, if one was found
    pub fn root(&self) -> Option<&Utf8Path> {
        match self {
            Self::NotFound => None,
            Self::SinglePackage { root } | Self::Workspace { root, .. } => Some(root.as_path()),
        }
    }

    /// Directory whose manifest defines the runnable scripts
    pub fn app_dir(&self) -> Option<Utf8PathBuf> {
        match self {
            Self::NotFound => None,
            Self::SinglePackage { root } => Some(root.clone()),
            Self::Workspace { root, app_subdir } => Some(root.join(app_subdir)),
        }
    }
}

/// Looks for manifests at the single-package and workspace locations
pub struct ProjectDetector<'a> {
    fs: &'a dyn FileSystem,
    manifest: String,
    app_subdir: Utf8PathBuf,
}

impl<'a> ProjectDetector<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        manifest: impl Into<String>,
        app_subdir: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            fs,
            manifest: manifest.into(),
            app_subdir: app_subdir.into(),
        }
    }

    /// Create a detector from the `project` config section
    pub fn from_config(fs: &'a dyn FileSystem, config: &ProjectConfig) -> Self {
        Self::new(fs, config.manifest.clone(), config.app_subdir.clone())
    }

    /// Classify `cwd`; the nested application manifest wins over a root one
    pub fn detect(&self, cwd: &Utf8Path) -> ProjectLayout {
        let nested = cwd.join(&self.app_subdir).join(&self.manifest);
        if self.fs.is_file(&nested) {
            debug!("Found workspace application manifest at {}", nested);
            return ProjectLayout::Workspace {
                root: cwd.to_path_buf(),
                app_subdir: self.app_subdir.clone(),
            };
        }

        let root_manifest = cwd.join(&self.manifest);
        if self.fs.is_file(&root_manifest) {
            debug!("Found package manifest at {}", root_manifest);
            return ProjectLayout::SinglePackage {
                root: cwd.to_path_buf(),
            };
        }

        debug!("No project manifest under {}", cwd);
        ProjectLayout::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::MemoryFileSystem;

    fn detector(fs: &MemoryFileSystem) -> ProjectDetector<'_> {
        ProjectDetector::new(fs, "package.json", "apps/web")
    }

    #[test]
    fn test_workspace_takes_precedence() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/repo/package.json", "{}").unwrap();
        fs.write_file("/repo/apps/web/package.json", "{}").unwrap();

        let layout = detector(&fs).detect(Utf8Path::new("/repo"));
        assert_eq!(
            layout,
            ProjectLayout::Workspace {
                root: Utf8PathBuf::from("/repo"),
                app_subdir: Utf8PathBuf::from("apps/web"),
            }
        );
        assert_eq!(layout.app_dir().unwrap(), "/repo/apps/web");
    }

    #[test]
    fn test_single_package() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/repo/package.json", "{}").unwrap();

        let layout = detector(&fs).detect(Utf8Path::new("/repo"));
        assert_eq!(layout.root(), Some(Utf8Path::new("/repo")));
        assert_eq!(layout.app_dir().unwrap(), "/repo");
    }

    #[test]
    fn test_not_found() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/repo/README.md", "").unwrap();

        let layout = detector(&fs).detect(Utf8Path::new("/repo"));
        assert_eq!(layout, ProjectLayout::NotFound);
        assert!(layout.root().is_none());
    }

    #[test]
    fn test_nested_app_without_root_manifest_is_workspace() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/repo/apps/web/package.json", "{}").unwrap();

        let layout = detector(&fs).detect(Utf8Path::new("/repo"));
        assert!(matches!(layout, ProjectLayout::Workspace { .. }));
    }
}
