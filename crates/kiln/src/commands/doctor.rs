//! Doctor command - check the host for the tools kiln projects need

use anyhow::Result;
use kiln_doctor::{check_environment, OutputFormat, SystemEnvironment};

use crate::cli::DoctorArgs;

/// Run the doctor diagnostic command
///
/// Returns 1 when any issue was found so scripts can gate on it.
pub fn run(args: DoctorArgs) -> Result<i32> {
    let config = super::load_config()?;

    let format = match args.format.to_lowercase().as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Human,
    };

    let report = check_environment(&SystemEnvironment::new(), &config.toolchain);
    println!("{}", report.format(format));

    Ok(report.exit_code())
}
