//! kiln doctor - toolchain probing
//!
//! This crate answers two questions about the host:
//!
//! - **Which package manager does a project use?** Decided purely from the
//!   lockfiles present in the project directory.
//! - **Is the environment healthy?** The configured runtime must be present
//!   and recent enough, and every required tool must be on `PATH`.
//!
//! # Example
//!
//! ```rust,no_run
//! use kiln_core::ConfigLoader;
//! use kiln_doctor::{check_environment, OutputFormat, SystemEnvironment};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     let report = check_environment(&SystemEnvironment::new(), &config.toolchain);
//!
//!     println!("{}", report.format(OutputFormat::Human));
//!     std::process::exit(report.exit_code());
//! }
//! ```

mod checker;
mod environment;
mod package_manager;
mod reporter;

pub use checker::{check_environment, DoctorReport, ToolRole, ToolState, ToolStatus};
pub use environment::{HostEnvironment, SystemEnvironment};
pub use package_manager::{detect_package_manager, PackageManagerKind};
pub use reporter::{DiagnosticReporter, OutputFormat};
