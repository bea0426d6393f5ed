//! Process execution capability
//!
//! External programs (the template fetch, forwarded package-manager
//! scripts) run through [`ProcessRunner`]. Standard streams are inherited,
//! so output goes straight to the terminal, and the call blocks until the
//! child exits.

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{Command, ExitStatus};
use tracing::debug;

use crate::error::{Error, Result};

/// Run a program to completion and report its exit code
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Utf8Path) -> Result<i32>;
}

/// [`ProcessRunner`] spawning real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Utf8Path) -> Result<i32> {
        debug!("Running: {} {} (in {})", program, args.join(" "), cwd);

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|e| Error::command_spawn(program, e))?;

        let code = exit_code(status);
        debug!("{} exited with {}", program, code);
        Ok(code)
    }
}

/// Exit code of a finished child, using the shell's `128 + signal`
/// convention when it was killed by a signal
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// A single recorded call to [`RecordingRunner::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Utf8PathBuf,
}

/// [`ProcessRunner`] that records calls instead of spawning anything
///
/// Exit codes are served from a queue; once it is empty every call
/// returns the default code (0 unless set with [`RecordingRunner::with_default`]).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: RefCell<Vec<Invocation>>,
    exit_codes: RefCell<VecDeque<i32>>,
    default_code: i32,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner whose calls all exit with `code`
    pub fn with_default(code: i32) -> Self {
        Self {
            default_code: code,
            ..Self::default()
        }
    }

    /// Queue the exit code for the next unanswered call
    pub fn push_exit_code(&self, code: i32) {
        self.exit_codes.borrow_mut().push_back(code);
    }

    /// All calls made so far
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Utf8Path) -> Result<i32> {
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });
        Ok(self
            .exit_codes
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.default_code))
    }
}
