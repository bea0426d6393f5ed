//! Script forwarding - `dev`, `build`, `preview`, `test`, `lint`

use anyhow::Result;
use kiln_core::{OsFileSystem, SystemRunner};
use kiln_projects::{ScriptCommand, ScriptForwarder};
use tracing::debug;

use crate::cli::ScriptArgs;

/// Run the project's `command` script; its exit code becomes ours
pub fn run(command: ScriptCommand, args: ScriptArgs) -> Result<i32> {
    let config = super::load_config()?;
    let cwd = super::current_dir()?;
    let fs = OsFileSystem::new();
    let runner = SystemRunner::new();

    let code = ScriptForwarder::from_config(&fs, &runner, &config.project)
        .forward(command, &args.args, &cwd)?;

    if code != 0 {
        debug!("`{}` script exited with {}", command, code);
    }
    Ok(code)
}
