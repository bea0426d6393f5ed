//! Error types for kiln-core

use thiserror::Error;

/// Result type alias using kiln-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for kiln
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem operation failed on a specific path
    #[error("{operation} failed for {path}: {source}")]
    PathOperation {
        operation: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    /// Path exists but has the wrong kind (file vs directory)
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// Path is not valid UTF-8
    #[error("Path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    /// Invalid semver version
    #[error("Invalid version format: {version}")]
    InvalidVersion { version: String },

    /// A child process could not be started
    #[error("Failed to run '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Wrap an IO error with the operation and path it happened on
    pub fn path_operation(
        operation: &'static str,
        path: impl AsRef<str>,
        source: std::io::Error,
    ) -> Self {
        Self::PathOperation {
            operation,
            path: path.as_ref().to_string(),
            source,
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl AsRef<str>) -> Self {
        Self::PathNotFound {
            path: path.as_ref().to_string(),
        }
    }

    /// Create a not-a-directory error
    pub fn not_a_directory(path: impl AsRef<str>) -> Self {
        Self::NotADirectory {
            path: path.as_ref().to_string(),
        }
    }

    /// Create a non-UTF-8 path error
    pub fn non_utf8_path(path: impl Into<String>) -> Self {
        Self::NonUtf8Path { path: path.into() }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a command spawn error
    pub fn command_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            program: program.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::{Utf8Path, Utf8PathBuf};

    #[test]
    fn test_path_helpers_accept_utf8_paths() {
        let dir = Utf8Path::new("/srv/app");
        let owned = Utf8PathBuf::from("/srv/app/src");

        assert_eq!(
            Error::path_not_found(dir).to_string(),
            "Path not found: /srv/app"
        );
        assert_eq!(
            Error::not_a_directory(&owned).to_string(),
            "Not a directory: /srv/app/src"
        );
        assert_eq!(
            Error::path_not_found("/plain/str").to_string(),
            "Path not found: /plain/str"
        );
    }

    #[test]
    fn test_path_operation_keeps_source() {
        let err = Error::path_operation(
            "copy",
            Utf8Path::new("/a/b"),
            std::io::Error::other("disk full"),
        );

        assert_eq!(err.to_string(), "copy failed for /a/b: disk full");
        assert!(std::error::Error::source(&err).is_some());
    }
}
