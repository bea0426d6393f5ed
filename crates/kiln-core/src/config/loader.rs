//! Hierarchical configuration loader

use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use std::env;
use std::fs;
use tracing::debug;

use super::{ConfigOverlay, KilnConfig};
use crate::error::{Error, Result};

/// User config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Overrides `template.url`
pub const ENV_TEMPLATE_URL: &str = "KILN_TEMPLATE_URL";
/// Overrides `template.branch`
pub const ENV_TEMPLATE_BRANCH: &str = "KILN_TEMPLATE_BRANCH";
/// Overrides `project.app-subdir`
pub const ENV_APP_SUBDIR: &str = "KILN_APP_SUBDIR";
/// Overrides `toolchain.runtime.min-version`
pub const ENV_MIN_RUNTIME_VERSION: &str = "KILN_MIN_RUNTIME_VERSION";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Directory holding the user config, if a home directory is known
    config_dir: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader rooted at `~/.kiln`
    ///
    /// The directory is never created; a missing home directory simply
    /// means only defaults and environment apply.
    pub fn new() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
        }
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_dir: Some(config_dir.into()),
        }
    }

    /// Prefer `$HOME` so container setups that remap it are respected
    fn default_config_dir() -> Option<Utf8PathBuf> {
        let home = env::var("HOME")
            .ok()
            .filter(|h| !h.is_empty())
            .map(Utf8PathBuf::from)
            .or_else(|| dirs::home_dir().and_then(|p| Utf8PathBuf::from_path_buf(p).ok()))?;
        Some(home.join(".kiln"))
    }

    /// Path of the user config file, whether or not it exists
    pub fn user_config_path(&self) -> Option<Utf8PathBuf> {
        self.config_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration using the process environment
    pub fn load(&self) -> Result<KilnConfig> {
        self.load_with_env(|key| env::var(key).ok())
    }

    /// Load configuration with a custom environment lookup
    pub fn load_with_env<F>(&self, lookup: F) -> Result<KilnConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_embedded_defaults()?;

        if let Some(path) = self.user_config_path() {
            if path.exists() {
                debug!("Loading user config from {}", path);
                config.apply(Self::load_overlay(&path)?);
            }
        }

        Self::apply_env_overrides(&mut config, lookup);
        config.validate()?;

        Ok(config)
    }

    /// Load the defaults compiled into the binary
    fn load_embedded_defaults() -> Result<KilnConfig> {
        let filename = "defaults.yaml";
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    fn load_overlay(path: &Utf8Path) -> Result<ConfigOverlay> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ConfigOverlay::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    fn apply_env_overrides<F>(config: &mut KilnConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_TEMPLATE_URL) {
            config.template.url = url;
        }
        if let Some(branch) = lookup(ENV_TEMPLATE_BRANCH) {
            config.template.branch = Some(branch);
        }
        if let Some(subdir) = lookup(ENV_APP_SUBDIR) {
            config.project.app_subdir = subdir;
        }
        if let Some(min) = lookup(ENV_MIN_RUNTIME_VERSION) {
            config.toolchain.runtime.min_version = Some(min);
        }
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> Option<&Utf8Path> {
        self.config_dir.as_deref()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
