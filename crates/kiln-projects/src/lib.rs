//! # kiln-projects
//!
//! Project management library for the kiln CLI:
//! - Target directory resolution and classification
//! - The `init` state machine (safety guards, force clearing, materialization)
//! - Template fetching and filtered copying
//! - Project layout detection and script forwarding
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use kiln_core::{OsFileSystem, SystemRunner};
//! use kiln_projects::{GitTemplateSource, InitOptions, Initializer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = OsFileSystem::new();
//! let runner = SystemRunner::new();
//! let source = GitTemplateSource::new("https://github.com/kiln-dev/starter.git", &runner);
//! let cwd = Utf8PathBuf::from("/home/me/code");
//!
//! let report = Initializer::new(&fs, &source, cwd)?
//!     .run(Some("./fresh"), &InitOptions { force: false })?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod detector;
pub mod error;
pub mod forward;
pub mod init;
pub mod materializer;
pub mod resolver;

pub use detector::{ProjectDetector, ProjectLayout};
pub use error::{Error, Result};
pub use forward::{ScriptCommand, ScriptForwarder};
pub use init::{InitOptions, InitReport, Initializer, Materialization};
pub use materializer::{
    copy_filtered, GitTemplateSource, Placement, TemplateMaterializer, TemplateSource,
    COPY_EXCLUSIONS,
};
pub use resolver::{resolve, TargetDirectory, IGNORABLE_ENTRIES, VCS_DIR};
