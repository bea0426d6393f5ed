//! Forwarding of lifecycle subcommands to the project's own scripts

use camino::Utf8Path;
use kiln_core::config::ProjectConfig;
use kiln_core::{FileSystem, ProcessRunner};
use kiln_doctor::detect_package_manager;
use std::fmt;
use tracing::info;

use crate::detector::ProjectDetector;
use crate::error::{Error, Result};

/// Subcommands that map 1:1 onto a same-named package script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Dev,
    Build,
    Preview,
    Test,
    Lint,
}

impl ScriptCommand {
    pub const ALL: [ScriptCommand; 5] = [
        Self::Dev,
        Self::Build,
        Self::Preview,
        Self::Test,
        Self::Lint,
    ];

    pub fn script_name(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Build => "build",
            Self::Preview => "preview",
            Self::Test => "test",
            Self::Lint => "lint",
        }
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.script_name())
    }
}

/// Runs a project script through the detected package manager
pub struct ScriptForwarder<'a> {
    fs: &'a dyn FileSystem,
    runner: &'a dyn ProcessRunner,
    detector: ProjectDetector<'a>,
}

impl<'a> ScriptForwarder<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        runner: &'a dyn ProcessRunner,
        detector: ProjectDetector<'a>,
    ) -> Self {
        Self {
            fs,
            runner,
            detector,
        }
    }

    pub fn from_config(
        fs: &'a dyn FileSystem,
        runner: &'a dyn ProcessRunner,
        config: &ProjectConfig,
    ) -> Self {
        Self::new(fs, runner, ProjectDetector::from_config(fs, config))
    }

    /// Run `command` for the project at `cwd` and return the child's exit code
    ///
    /// Nothing is spawned when `cwd` does not hold a project. In a workspace
    /// the script runs in the application subdirectory while the package
    /// manager is picked from the workspace root's lockfile.
    pub fn forward(
        &self,
        command: ScriptCommand,
        extra: &[String],
        cwd: &Utf8Path,
    ) -> Result<i32> {
        let layout = self.detector.detect(cwd);
        let (Some(root), Some(script_dir)) = (layout.root(), layout.app_dir()) else {
            return Err(Error::project_not_found(cwd.as_str()));
        };

        let pm = detect_package_manager(self.fs, root);
        let args = pm.run_args(command.script_name(), extra);
        info!("Forwarding `{}` to {} in {}", command, pm, script_dir);

        Ok(self.runner.run(pm.command(), &args, &script_dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{MemoryFileSystem, RecordingRunner};

    fn forwarder<'a>(
        fs: &'a MemoryFileSystem,
        runner: &'a RecordingRunner,
    ) -> ScriptForwarder<'a> {
        let detector = ProjectDetector::new(fs, "package.json", "apps/web");
        ScriptForwarder::new(fs, runner, detector)
    }

    #[test]
    fn test_script_names_match_commands() {
        let names: Vec<_> = ScriptCommand::ALL.iter().map(|c| c.script_name()).collect();
        assert_eq!(names, ["dev", "build", "preview", "test", "lint"]);
    }

    #[test]
    fn test_forward_single_package_with_pnpm() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/package.json", "{}").unwrap();
        fs.write_file("/p/pnpm-lock.yaml", "").unwrap();
        let runner = RecordingRunner::new();

        let code = forwarder(&fs, &runner)
            .forward(ScriptCommand::Build, &[], Utf8Path::new("/p"))
            .unwrap();

        assert_eq!(code, 0);
        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "pnpm");
        assert_eq!(calls[0].args, vec!["run", "build"]);
        assert_eq!(calls[0].cwd, "/p");
    }

    #[test]
    fn test_forward_workspace_runs_in_app_dir() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/m/package.json", "{}").unwrap();
        fs.write_file("/m/yarn.lock", "").unwrap();
        fs.write_file("/m/apps/web/package.json", "{}").unwrap();
        let runner = RecordingRunner::new();

        forwarder(&fs, &runner)
            .forward(ScriptCommand::Dev, &[], Utf8Path::new("/m"))
            .unwrap();

        let calls = runner.invocations();
        assert_eq!(calls[0].program, "yarn");
        assert_eq!(calls[0].cwd, "/m/apps/web");
    }

    #[test]
    fn test_forward_npm_extra_args_after_separator() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/package.json", "{}").unwrap();
        let runner = RecordingRunner::new();
        let extra = vec!["--watch".to_string()];

        forwarder(&fs, &runner)
            .forward(ScriptCommand::Test, &extra, Utf8Path::new("/p"))
            .unwrap();

        assert_eq!(
            runner.invocations()[0].args,
            vec!["run", "test", "--", "--watch"]
        );
    }

    #[test]
    fn test_forward_propagates_exit_code() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/p/package.json", "{}").unwrap();
        let runner = RecordingRunner::with_default(3);

        let code = forwarder(&fs, &runner)
            .forward(ScriptCommand::Lint, &[], Utf8Path::new("/p"))
            .unwrap();

        assert_eq!(code, 3);
    }

    #[test]
    fn test_forward_without_project_spawns_nothing() {
        let fs = MemoryFileSystem::new();
        fs.mkdir(Utf8Path::new("/empty")).unwrap();
        let runner = RecordingRunner::new();

        let err = forwarder(&fs, &runner)
            .forward(ScriptCommand::Test, &[], Utf8Path::new("/empty"))
            .unwrap_err();

        assert!(matches!(err, Error::ProjectNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(runner.invocations().is_empty());
    }
}
