//! Error types for kiln-projects

use thiserror::Error;

/// Result type alias using kiln-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project scaffolding and forwarding errors
#[derive(Error, Debug)]
pub enum Error {
    /// Target has content and `--force` was not given
    #[error("Target directory {path} is not empty. Re-run with --force to replace its contents")]
    TargetNotEmpty { path: String },

    /// `--force` aimed at the directory kiln runs from (or one enclosing it)
    #[error(
        "Refusing to clear {path}: kiln was started from inside it. \
         Run kiln from another directory or pick a different target"
    )]
    InvocationDirRefused { path: String },

    /// No manifest found for script forwarding
    #[error("No project found in {path}. Run `kiln init` to create one")]
    ProjectNotFound { path: String },

    /// Template URL is not something git can clone
    #[error("Invalid template repository URL: {url}")]
    InvalidRepoUrl { url: String },

    /// The template fetch exited non-zero
    #[error("Failed to fetch template from {url} (git exited with code {code})")]
    FetchFailed { url: String, code: i32 },

    /// Core library error
    #[error(transparent)]
    Core(#[from] kiln_core::Error),
}

impl Error {
    /// Create a target not empty error
    pub fn target_not_empty(path: impl Into<String>) -> Self {
        Self::TargetNotEmpty { path: path.into() }
    }

    /// Create an invocation directory refusal
    pub fn invocation_dir_refused(path: impl Into<String>) -> Self {
        Self::InvocationDirRefused { path: path.into() }
    }

    /// Create a project not found error
    pub fn project_not_found(path: impl Into<String>) -> Self {
        Self::ProjectNotFound { path: path.into() }
    }

    /// Create an invalid repo URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    /// Create a fetch failed error
    pub fn fetch_failed(url: impl Into<String>, code: i32) -> Self {
        Self::FetchFailed {
            url: url.into(),
            code,
        }
    }

    /// Exit code the CLI should terminate with
    ///
    /// A failed fetch hands back git's own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FetchFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}
