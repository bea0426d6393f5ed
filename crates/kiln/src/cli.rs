//! CLI argument parsing with clap

use clap::{Args, CommandFactory, Parser, Subcommand};

/// kiln - scaffold projects from a template and run their scripts
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Replace the contents of a non-empty target directory
    #[arg(long, global = true)]
    pub force: bool,

    /// Runs `init` in the current directory when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project from the template
    Init(InitArgs),

    /// Run the project's `dev` script
    Dev(ScriptArgs),

    /// Run the project's `build` script
    Build(ScriptArgs),

    /// Run the project's `preview` script
    Preview(ScriptArgs),

    /// Run the project's `test` script
    Test(ScriptArgs),

    /// Run the project's `lint` script
    Lint(ScriptArgs),

    /// Check the host for required tools
    Doctor(DoctorArgs),

    #[command(external_subcommand)]
    External(Vec<String>),
}

// Init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Target directory (defaults to the current directory)
    pub dir: Option<String>,

    /// Template repository URL (overrides configuration)
    #[arg(long)]
    pub template: Option<String>,

    /// Template branch to clone
    #[arg(long)]
    pub branch: Option<String>,
}

// Script forwarding commands
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Extra arguments passed through to the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

// Doctor command
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output format
    #[arg(long, default_value = "human", value_parser = ["human", "json"])]
    pub format: String,
}

/// Report an unrecognized command with usage on stderr
pub fn unknown_command(args: &[String]) -> i32 {
    let name = args.first().map(String::as_str).unwrap_or_default();
    eprintln!("error: unrecognized command '{}'\n", name);
    eprintln!("{}", Cli::command().render_usage());
    eprintln!("\nFor more information, try '--help'.");
    1
}
