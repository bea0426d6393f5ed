//! # kiln-core
//!
//! Shared building blocks for the kiln CLI:
//! - Layered configuration (embedded defaults, user file, environment)
//! - The `FileSystem` capability with OS and in-memory implementations
//! - The `ProcessRunner` capability with system and recording implementations
//! - The core error type

pub mod config;
pub mod error;
pub mod fs;
pub mod process;
pub mod version;

pub use config::{ConfigLoader, KilnConfig};
pub use error::{Error, Result};
pub use fs::{EntryKind, FileSystem, MemoryFileSystem, OsFileSystem};
pub use process::{Invocation, ProcessRunner, RecordingRunner, SystemRunner};
