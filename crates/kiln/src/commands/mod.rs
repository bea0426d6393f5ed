//! CLI command implementations

pub mod doctor;
pub mod init;
pub mod run;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use kiln_core::{ConfigLoader, KilnConfig};

/// Load the layered configuration (defaults, `~/.kiln/config.yaml`, env)
pub(crate) fn load_config() -> Result<KilnConfig> {
    ConfigLoader::new()
        .load()
        .context("Failed to load kiln configuration")
}

/// The invocation directory as a UTF-8 path
pub(crate) fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}
