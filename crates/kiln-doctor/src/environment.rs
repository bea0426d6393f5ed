//! Host environment access
//!
//! Doctor checks never call `which` or spawn processes directly; they go
//! through [`HostEnvironment`] so a test can describe any host it likes.

use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Pre-compiled regex for extracting version numbers from command output
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+(?:\.\d+)?)").expect("version regex is valid"));

/// What the doctor needs to know about the host
pub trait HostEnvironment {
    /// Location of `command` on PATH, if any
    fn locate(&self, command: &str) -> Option<PathBuf>;

    /// Version reported by `command <version_flag>`, if it can be read
    fn version(&self, command: &str, version_flag: &str) -> Option<String>;
}

/// [`HostEnvironment`] backed by the real PATH and real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl HostEnvironment for SystemEnvironment {
    fn locate(&self, command: &str) -> Option<PathBuf> {
        which::which(command).ok()
    }

    fn version(&self, command: &str, version_flag: &str) -> Option<String> {
        let output = Command::new(command)
            .args(version_flag.split_whitespace())
            .output()
            .ok()?;

        // Some tools print their version on stderr
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        let version = parse_version(&text);
        debug!("{} {} -> {:?}", command, version_flag, version);
        version
    }
}

/// Pull the first version-looking token out of a `--version` banner
///
/// Handles `v20.11.1`, `git version 2.39.3 (Apple Git-146)` and `10.2.4`.
pub(crate) fn parse_version(text: &str) -> Option<String> {
    VERSION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_banners() {
        assert_eq!(parse_version("v20.11.1\n").as_deref(), Some("20.11.1"));
        assert_eq!(
            parse_version("git version 2.39.3 (Apple Git-146)").as_deref(),
            Some("2.39.3")
        );
        assert_eq!(parse_version("10.2").as_deref(), Some("10.2"));
        assert_eq!(parse_version("no digits here"), None);
    }

    #[test]
    fn test_locate_missing_command() {
        assert!(SystemEnvironment
            .locate("kiln-definitely-not-a-real-binary")
            .is_none());
    }
}
