//! kiln CLI - project scaffolding and task proxy
//!
//! This is the main entry point for the kiln command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use kiln_projects::ScriptCommand;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands, InitArgs};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_tracing(cli.verbose, cli.quiet);

    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            exit_code_for(&e)
        }
    };
    std::process::exit(code);
}

/// Route the parsed command line to exactly one command
fn dispatch(cli: Cli) -> Result<i32> {
    let force = cli.force;
    match cli.command {
        None => commands::init::run(InitArgs::default(), force),
        Some(Commands::Init(args)) => commands::init::run(args, force),
        Some(Commands::Dev(args)) => commands::run::run(ScriptCommand::Dev, args),
        Some(Commands::Build(args)) => commands::run::run(ScriptCommand::Build, args),
        Some(Commands::Preview(args)) => commands::run::run(ScriptCommand::Preview, args),
        Some(Commands::Test(args)) => commands::run::run(ScriptCommand::Test, args),
        Some(Commands::Lint(args)) => commands::run::run(ScriptCommand::Lint, args),
        Some(Commands::Doctor(args)) => commands::doctor::run(args),
        Some(Commands::External(args)) => Ok(cli::unknown_command(&args)),
    }
}

/// Exit code for a failed command: a failed fetch passes git's code through
fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<kiln_projects::Error>()
        .map(kiln_projects::Error::exit_code)
        .unwrap_or(1)
}

/// Initialize tracing with appropriate verbosity
///
/// `RUST_LOG` takes precedence over the command-line flags when set.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_keeps_git_exit_code() {
        let err = anyhow::Error::new(kiln_projects::Error::fetch_failed("u", 128));
        assert_eq!(exit_code_for(&err), 128);
    }

    #[test]
    fn test_other_errors_exit_one() {
        let err = anyhow::anyhow!("boom").context("while doing things");
        assert_eq!(exit_code_for(&err), 1);

        let refused = anyhow::Error::new(kiln_projects::Error::target_not_empty("app"))
            .context("init failed");
        assert_eq!(exit_code_for(&refused), 1);
    }
}
