//! Configuration types and loading
//!
//! Configuration is layered, lowest precedence first:
//! 1. Embedded defaults (built into the binary)
//! 2. User config (`~/.kiln/config.yaml`)
//! 3. Environment variables (`KILN_*`)
//! 4. CLI flags (applied by the caller)

mod loader;

pub use loader::{
    ConfigLoader, CONFIG_FILE_NAME, ENV_APP_SUBDIR, ENV_MIN_RUNTIME_VERSION, ENV_TEMPLATE_BRANCH,
    ENV_TEMPLATE_URL,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::version;

/// Fully resolved kiln configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KilnConfig {
    /// Where project templates come from
    pub template: TemplateConfig,
    /// How provisioned projects are recognized
    pub project: ProjectConfig,
    /// Host tooling checked by `kiln doctor`
    pub toolchain: ToolchainConfig,
}

/// Template repository settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Repository URL passed to `git clone`
    pub url: String,
    /// Branch to clone (remote default branch when unset)
    #[serde(default)]
    pub branch: Option<String>,
    /// Shallow clone depth
    #[serde(default = "default_depth")]
    pub depth: u32,
}

/// Project layout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Manifest file marking a package root
    pub manifest: String,
    /// Relative path of the application inside a workspace
    pub app_subdir: String,
}

/// Host toolchain requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainConfig {
    /// The JavaScript runtime the template targets
    pub runtime: ToolRequirement,
    /// Binaries that must be on PATH
    #[serde(default)]
    pub required_tools: Vec<ToolRequirement>,
}

/// A single external tool and its minimum version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolRequirement {
    /// Human-readable name
    pub name: String,
    /// Executable looked up on PATH
    pub command: String,
    /// Flag printing the version
    #[serde(default = "default_version_flag")]
    pub version_flag: String,
    /// Minimum accepted version, if any
    #[serde(default)]
    pub min_version: Option<String>,
}

fn default_depth() -> u32 {
    1
}

fn default_version_flag() -> String {
    "--version".to_string()
}

impl KilnConfig {
    /// Check values that serde cannot validate on its own
    pub fn validate(&self) -> Result<()> {
        if self.template.url.trim().is_empty() {
            return Err(Error::invalid_config("template.url must not be empty"));
        }
        if self.template.depth == 0 {
            return Err(Error::invalid_config("template.depth must be at least 1"));
        }
        if self.project.manifest.trim().is_empty() {
            return Err(Error::invalid_config("project.manifest must not be empty"));
        }

        let tools = std::iter::once(&self.toolchain.runtime).chain(&self.toolchain.required_tools);
        for tool in tools {
            if let Some(min) = &tool.min_version {
                if version::parse_lenient(min).is_none() {
                    return Err(Error::invalid_version(format!("{} ({})", min, tool.command)));
                }
            }
        }

        Ok(())
    }

    /// Apply a partial document on top of this config
    pub(crate) fn apply(&mut self, overlay: ConfigOverlay) {
        if let Some(template) = overlay.template {
            if let Some(url) = template.url {
                self.template.url = url;
            }
            if template.branch.is_some() {
                self.template.branch = template.branch;
            }
            if let Some(depth) = template.depth {
                self.template.depth = depth;
            }
        }

        if let Some(project) = overlay.project {
            if let Some(manifest) = project.manifest {
                self.project.manifest = manifest;
            }
            if let Some(app_subdir) = project.app_subdir {
                self.project.app_subdir = app_subdir;
            }
        }

        if let Some(toolchain) = overlay.toolchain {
            if let Some(runtime) = toolchain.runtime {
                self.toolchain.runtime = runtime;
            }
            if let Some(tools) = toolchain.required_tools {
                self.toolchain.required_tools = tools;
            }
        }
    }
}

/// Partial configuration as found in the user config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct ConfigOverlay {
    #[serde(default)]
    pub template: Option<TemplateOverlay>,
    #[serde(default)]
    pub project: Option<ProjectOverlay>,
    #[serde(default)]
    pub toolchain: Option<ToolchainOverlay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct TemplateOverlay {
    pub url: Option<String>,
    pub branch: Option<String>,
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct ProjectOverlay {
    pub manifest: Option<String>,
    pub app_subdir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct ToolchainOverlay {
    pub runtime: Option<ToolRequirement>,
    pub required_tools: Option<Vec<ToolRequirement>>,
}
