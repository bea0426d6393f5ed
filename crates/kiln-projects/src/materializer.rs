//! Template acquisition and filtered copying
//!
//! A template is fetched with `git clone` either straight into the target
//! or into a throwaway staging directory whose contents are then copied
//! over, leaving out [`COPY_EXCLUSIONS`].

use camino::{Utf8Path, Utf8PathBuf};
use kiln_core::config::TemplateConfig;
use kiln_core::{EntryKind, FileSystem, ProcessRunner};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Entry names never copied from a staged template, at any depth
pub const COPY_EXCLUSIONS: &[&str] = &[
    ".git",
    "node_modules",
    ".env.local",
    ".next",
    ".turbo",
    ".cache",
];

/// Something that can deposit a template tree at a path
pub trait TemplateSource {
    /// Where the template comes from, for messages
    fn location(&self) -> &str;

    /// Fetch the template into `destination`, an existing empty directory
    fn fetch(&self, destination: &Utf8Path) -> Result<()>;
}

/// Shallow `git clone` of a template repository
pub struct GitTemplateSource<'a> {
    url: String,
    branch: Option<String>,
    depth: u32,
    runner: &'a dyn ProcessRunner,
}

impl<'a> GitTemplateSource<'a> {
    pub fn new(url: impl Into<String>, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            url: url.into(),
            branch: None,
            depth: 1,
            runner,
        }
    }

    /// Create a source from the `template` config section
    pub fn from_config(config: &TemplateConfig, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            url: config.url.clone(),
            branch: config.branch.clone(),
            depth: config.depth,
            runner,
        }
    }

    /// Clone a specific branch instead of the remote default
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    fn clone_args(&self, destination: &Utf8Path) -> Vec<String> {
        let mut args = vec![
            "clone".to_string(),
            "--depth".to_string(),
            self.depth.max(1).to_string(),
        ];
        if let Some(branch) = &self.branch {
            args.push("--branch".to_string());
            args.push(branch.clone());
        }
        args.push(self.url.clone());
        args.push(destination.to_string());
        args
    }
}

impl TemplateSource for GitTemplateSource<'_> {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self, destination: &Utf8Path) -> Result<()> {
        if !is_valid_repo_url(&self.url) {
            return Err(Error::invalid_repo_url(&self.url));
        }

        info!("Cloning template: {} -> {}", self.url, destination);
        let cwd = destination.parent().unwrap_or(destination);
        let code = self.runner.run("git", &self.clone_args(destination), cwd)?;

        if code != 0 {
            return Err(Error::fetch_failed(&self.url, code));
        }
        Ok(())
    }
}

/// Validate if a string is something git can clone
fn is_valid_repo_url(url: &str) -> bool {
    ["https://", "http://", "git@", "ssh://", "file://"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
        || Utf8Path::new(url).is_absolute()
}

/// How the template reaches the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Cloned straight into the target; the clone's `.git` is kept
    Direct,
    /// Cloned into a staging directory, then copied with exclusions
    Staged,
}

/// Places a template into a target directory
pub struct TemplateMaterializer<'a> {
    fs: &'a dyn FileSystem,
    source: &'a dyn TemplateSource,
    staging_root: Utf8PathBuf,
}

impl<'a> TemplateMaterializer<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        source: &'a dyn TemplateSource,
        staging_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            fs,
            source,
            staging_root: staging_root.into(),
        }
    }

    /// Put the template into `destination`
    pub fn materialize(&self, destination: &Utf8Path, placement: Placement) -> Result<()> {
        match placement {
            Placement::Direct => self.source.fetch(destination),
            Placement::Staged => self.materialize_staged(destination),
        }
    }

    fn materialize_staged(&self, destination: &Utf8Path) -> Result<()> {
        let staging = self
            .staging_root
            .join(format!("kiln-staging-{}", Uuid::new_v4().simple()));
        debug!("Staging template in {}", staging);
        self.fs.mkdir(&staging)?;

        let result = self
            .source
            .fetch(&staging)
            .and_then(|()| copy_filtered(self.fs, &staging, destination));

        // The staging directory goes away whether or not the fetch worked
        if let Err(e) = self.fs.remove(&staging) {
            warn!("Failed to remove staging directory {}: {}", staging, e);
        }

        let copied = result?;
        info!("Copied {} file(s) from staged template", copied);
        Ok(())
    }
}

/// Recursively copy `from` into `to`, skipping [`COPY_EXCLUSIONS`]
///
/// Directories are recreated and files content-copied. Returns the number
/// of files copied.
pub fn copy_filtered(fs: &dyn FileSystem, from: &Utf8Path, to: &Utf8Path) -> Result<usize> {
    fs.mkdir(to)?;

    let mut copied = 0;
    for name in fs.list(from)? {
        if COPY_EXCLUSIONS.contains(&name.as_str()) {
            debug!("Skipping excluded entry {}/{}", from, name);
            continue;
        }

        let src = from.join(&name);
        let dst = to.join(&name);
        match fs.stat(&src)? {
            Some(EntryKind::Directory) => copied += copy_filtered(fs, &src, &dst)?,
            Some(EntryKind::File) => {
                fs.copy(&src, &dst)?;
                copied += 1;
            }
            None => debug!("{} vanished during copy", src),
        }
    }

    Ok(copied)
}
