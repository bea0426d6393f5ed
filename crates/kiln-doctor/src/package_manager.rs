//! Package manager detection from lockfiles

use camino::Utf8Path;
use kiln_core::FileSystem;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Package managers kiln knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManagerKind {
    /// Lockfiles in precedence order
    const LOCKFILES: [(&'static str, PackageManagerKind); 2] = [
        ("pnpm-lock.yaml", PackageManagerKind::Pnpm),
        ("yarn.lock", PackageManagerKind::Yarn),
    ];

    /// Executable name
    pub fn command(&self) -> &'static str {
        match self {
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Arguments that run `script` with `extra` passed through to it
    ///
    /// npm needs a `--` separator before script arguments; pnpm and yarn
    /// forward trailing arguments on their own.
    pub fn run_args(&self, script: &str, extra: &[String]) -> Vec<String> {
        let mut args = vec!["run".to_string(), script.to_string()];
        if !extra.is_empty() {
            if *self == Self::Npm {
                args.push("--".to_string());
            }
            args.extend(extra.iter().cloned());
        }
        args
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Pick the package manager for `dir`: pnpm > yarn > npm
///
/// Always returns a value; npm is the fallback when no known lockfile is
/// present.
pub fn detect_package_manager(fs: &dyn FileSystem, dir: &Utf8Path) -> PackageManagerKind {
    for (lockfile, kind) in PackageManagerKind::LOCKFILES {
        if fs.is_file(&dir.join(lockfile)) {
            debug!("Found {} in {}, using {}", lockfile, dir, kind);
            return kind;
        }
    }

    debug!("No lockfile in {}, falling back to npm", dir);
    PackageManagerKind::Npm
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::MemoryFileSystem;

    #[test]
    fn test_detect_pnpm_wins_over_yarn() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/pnpm-lock.yaml", "").unwrap();
        fs.write_file("/p/yarn.lock", "").unwrap();
        fs.write_file("/p/package-lock.json", "").unwrap();

        assert_eq!(
            detect_package_manager(&fs, Utf8Path::new("/p")),
            PackageManagerKind::Pnpm
        );
    }

    #[test]
    fn test_detect_yarn_when_only_yarn_lock() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/yarn.lock", "").unwrap();
        fs.write_file("/p/package-lock.json", "").unwrap();

        assert_eq!(
            detect_package_manager(&fs, Utf8Path::new("/p")),
            PackageManagerKind::Yarn
        );
    }

    #[test]
    fn test_detect_falls_back_to_npm() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/package.json", "{}").unwrap();
        assert_eq!(
            detect_package_manager(&fs, Utf8Path::new("/p")),
            PackageManagerKind::Npm
        );

        // Missing directory is not an error either
        assert_eq!(
            detect_package_manager(&fs, Utf8Path::new("/missing")),
            PackageManagerKind::Npm
        );
    }

    #[test]
    fn test_lockfile_directory_is_ignored() {
        let fs = MemoryFileSystem::new();
        fs.mkdir(Utf8Path::new("/p/yarn.lock")).unwrap();
        assert_eq!(
            detect_package_manager(&fs, Utf8Path::new("/p")),
            PackageManagerKind::Npm
        );
    }

    #[test]
    fn test_run_args() {
        let extra = vec!["--watch".to_string()];
        assert_eq!(
            PackageManagerKind::Npm.run_args("test", &extra),
            vec!["run", "test", "--", "--watch"]
        );
        assert_eq!(
            PackageManagerKind::Pnpm.run_args("test", &extra),
            vec!["run", "test", "--watch"]
        );
        assert_eq!(
            PackageManagerKind::Yarn.run_args("dev", &[]),
            vec!["run", "dev"]
        );
    }
}
