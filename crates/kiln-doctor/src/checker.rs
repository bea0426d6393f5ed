//! Environment checks
//!
//! Runs each configured tool through a [`HostEnvironment`] and records
//! whether it is present and recent enough.

use kiln_core::config::{ToolRequirement, ToolchainConfig};
use kiln_core::version;
use serde::Serialize;
use std::path::PathBuf;

use crate::environment::HostEnvironment;
use crate::reporter::{DiagnosticReporter, OutputFormat};

/// Why a tool is being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolRole {
    /// The runtime projects execute on
    Runtime,
    /// A binary kiln itself shells out to
    Required,
}

/// State of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ToolState {
    /// Tool is available and meets requirements
    Available,
    /// Tool is not on PATH
    Missing,
    /// Tool version is too old
    VersionTooOld {
        /// The version found
        found: String,
        /// The minimum required version
        required: String,
    },
}

/// Status of a tool after checking
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub name: String,
    pub command: String,
    pub role: ToolRole,
    pub state: ToolState,
    /// Detected version (if available)
    pub version: Option<String>,
    /// Resolved location on PATH
    pub path: Option<PathBuf>,
    /// Minimum version the check enforced
    pub min_version: Option<String>,
}

impl ToolStatus {
    /// One-line description of what is wrong, if anything
    pub fn issue(&self) -> Option<String> {
        match &self.state {
            ToolState::Available => None,
            ToolState::Missing => Some(match &self.min_version {
                Some(min) => format!(
                    "{} ({}) was not found on PATH; version {} or newer is required",
                    self.name, self.command, min
                ),
                None => format!("{} ({}) was not found on PATH", self.name, self.command),
            }),
            ToolState::VersionTooOld { found, required } => Some(format!(
                "{} {} is too old; version {} or newer is required",
                self.name, found, required
            )),
        }
    }
}

/// Result of checking the whole toolchain
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    /// Runtime first, then required tools in configured order
    pub tools: Vec<ToolStatus>,
}

impl DoctorReport {
    /// Issue lines; empty when the environment is healthy
    pub fn issues(&self) -> Vec<String> {
        self.tools.iter().filter_map(ToolStatus::issue).collect()
    }

    /// Whether every check passed
    pub fn is_healthy(&self) -> bool {
        self.tools
            .iter()
            .all(|status| status.state == ToolState::Available)
    }

    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        if self.is_healthy() {
            0
        } else {
            1
        }
    }

    /// Format the report for display
    pub fn format(&self, format: OutputFormat) -> String {
        DiagnosticReporter::new().format(self, format)
    }
}

/// Check the runtime and every required tool
pub fn check_environment(env: &dyn HostEnvironment, toolchain: &ToolchainConfig) -> DoctorReport {
    let mut tools = vec![check_tool(env, &toolchain.runtime, ToolRole::Runtime)];
    tools.extend(
        toolchain
            .required_tools
            .iter()
            .map(|tool| check_tool(env, tool, ToolRole::Required)),
    );

    DoctorReport { tools }
}

fn check_tool(env: &dyn HostEnvironment, tool: &ToolRequirement, role: ToolRole) -> ToolStatus {
    let mut status = ToolStatus {
        name: tool.name.clone(),
        command: tool.command.clone(),
        role,
        state: ToolState::Missing,
        version: None,
        path: None,
        min_version: tool.min_version.clone(),
    };

    let Some(path) = env.locate(&tool.command) else {
        return status;
    };
    status.path = Some(path);
    status.version = env.version(&tool.command, &tool.version_flag);

    status.state = match (&status.version, &tool.min_version) {
        (Some(found), Some(required)) if !version::satisfies(found, required) => {
            ToolState::VersionTooOld {
                found: found.clone(),
                required: required.clone(),
            }
        }
        _ => ToolState::Available,
    };

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Host described by a map of command -> reported version
    struct FakeHost(HashMap<&'static str, Option<&'static str>>);

    impl HostEnvironment for FakeHost {
        fn locate(&self, command: &str) -> Option<PathBuf> {
            self.0
                .contains_key(command)
                .then(|| PathBuf::from("/usr/bin").join(command))
        }

        fn version(&self, command: &str, _flag: &str) -> Option<String> {
            self.0.get(command).copied().flatten().map(str::to_string)
        }
    }

    fn toolchain() -> ToolchainConfig {
        ToolchainConfig {
            runtime: ToolRequirement {
                name: "Node.js".to_string(),
                command: "node".to_string(),
                version_flag: "--version".to_string(),
                min_version: Some("18.0.0".to_string()),
            },
            required_tools: vec![ToolRequirement {
                name: "Git".to_string(),
                command: "git".to_string(),
                version_flag: "--version".to_string(),
                min_version: None,
            }],
        }
    }

    #[test]
    fn test_healthy_host_has_no_issues() {
        let host = FakeHost(HashMap::from([
            ("node", Some("20.11.1")),
            ("git", Some("2.43.0")),
        ]));
        let report = check_environment(&host, &toolchain());

        assert!(report.is_healthy());
        assert!(report.issues().is_empty());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.tools[0].role, ToolRole::Runtime);
    }

    #[test]
    fn test_old_runtime_and_missing_git_give_two_issues() {
        let host = FakeHost(HashMap::from([("node", Some("16.20.2"))]));
        let report = check_environment(&host, &toolchain());

        let issues = report.issues();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("16.20.2"));
        assert!(issues[0].contains("18.0.0"));
        assert!(issues[1].contains("git"));
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_missing_runtime_mentions_minimum() {
        let host = FakeHost(HashMap::from([("git", Some("2.43.0"))]));
        let report = check_environment(&host, &toolchain());

        assert_eq!(report.tools[0].state, ToolState::Missing);
        let issues = report.issues();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("not found"));
        assert!(issues[0].contains("18.0.0"));
    }

    #[test]
    fn test_unreadable_version_is_not_an_issue() {
        let host = FakeHost(HashMap::from([("node", None), ("git", None)]));
        let report = check_environment(&host, &toolchain());
        assert!(report.is_healthy());
    }

    #[test]
    fn test_two_part_version_is_compared() {
        let host = FakeHost(HashMap::from([("node", Some("17.9")), ("git", Some("2.1"))]));
        let report = check_environment(&host, &toolchain());
        assert!(matches!(
            report.tools[0].state,
            ToolState::VersionTooOld { .. }
        ));
    }
}
