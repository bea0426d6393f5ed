//! Diagnostic reporter module
//!
//! Provides formatting for doctor reports: human-readable and JSON.

use owo_colors::OwoColorize;

use crate::checker::{DoctorReport, ToolState, ToolStatus};

/// Output format for diagnostic results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable colored output
    #[default]
    Human,
    /// JSON format for machine consumption
    Json,
}

/// Diagnostic result reporter
#[derive(Debug, Default)]
pub struct DiagnosticReporter;

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self
    }

    /// Format the report
    pub fn format(&self, report: &DoctorReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.format_human(report),
            OutputFormat::Json => self.format_json(report),
        }
    }

    fn format_human(&self, report: &DoctorReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "kiln doctor".bold()));
        for status in &report.tools {
            output.push_str(&self.format_tool_status(status));
        }
        output.push('\n');

        let issues = report.issues();
        if issues.is_empty() {
            output.push_str(&format!("{}\n", "Environment looks good.".green()));
        } else {
            output.push_str(&format!(
                "{}\n",
                format!("{} issue(s) found:", issues.len()).red().bold()
            ));
            for issue in issues {
                output.push_str(&format!("  - {}\n", issue));
            }
        }

        output
    }

    fn format_tool_status(&self, status: &ToolStatus) -> String {
        let version = status.version.as_deref().unwrap_or("-");
        match &status.state {
            ToolState::Available => format!(
                "  {} {:<10} {}\n",
                "✓".green(),
                status.name,
                version.dimmed()
            ),
            ToolState::Missing => format!(
                "  {} {:<10} {}\n",
                "✗".red(),
                status.name,
                "not installed".red()
            ),
            ToolState::VersionTooOld { found, required } => format!(
                "  {} {:<10} {}\n",
                "⚠".yellow(),
                status.name,
                format!("{} (requires >= {})", found, required).yellow()
            ),
        }
    }

    fn format_json(&self, report: &DoctorReport) -> String {
        let value = serde_json::json!({
            "healthy": report.is_healthy(),
            "tools": report.tools,
            "issues": report.issues(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
