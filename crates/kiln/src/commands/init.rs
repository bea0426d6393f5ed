//! Init command - create a project from the template

use anyhow::Result;
use kiln_core::{OsFileSystem, SystemRunner};
use kiln_projects::{GitTemplateSource, InitOptions, Initializer, Materialization, TemplateSource};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::cli::InitArgs;
use crate::output;

/// Run `kiln init [dir]`
pub fn run(args: InitArgs, force: bool) -> Result<i32> {
    let mut config = super::load_config()?;
    if let Some(url) = args.template {
        config.template.url = url;
    }
    if let Some(branch) = args.branch {
        config.template.branch = Some(branch);
    }

    let cwd = super::current_dir()?;
    let fs = OsFileSystem::new();
    let runner = SystemRunner::new();
    let source = GitTemplateSource::from_config(&config.template, &runner);
    debug!("Template source: {}", source.location());

    let options = InitOptions { force };
    let report = Initializer::new(&fs, &source, cwd)?.run(args.dir.as_deref(), &options)?;

    if report.materialization == Materialization::Skipped {
        output::warning(&report.summary());
        return Ok(0);
    }

    output::success(&report.summary());
    output::kv("Template", source.location());
    output::kv("Package manager", report.package_manager.command());
    if report.cleared_entries > 0 {
        output::info(&format!(
            "Removed {} existing entries from {}",
            report.cleared_entries,
            report.target.display.bold()
        ));
    }

    output::next_steps(&report.next_steps());

    Ok(0)
}
