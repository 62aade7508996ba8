//! Output formatting for introspection reports
//!
//! Human output is exactly the line protocol build tooling greps for
//! (`UpToDateCheckInput: Views/Home/Index.cshtml`). JSON and YAML wrap the same
//! lines in a report that also names the project and the target each line came
//! from.

use crate::introspection::{IntrospectionLine, Target};
use anyhow::{Context, Result};
use serde::Serialize;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `<Kind>: <value>` line per entry
    Human,
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub target: String,
    pub lines: Vec<IntrospectionLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntrospectionReport {
    pub project: String,
    pub targets: Vec<TargetReport>,
}

impl IntrospectionReport {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            targets: Vec::new(),
        }
    }

    pub fn push(&mut self, target: Target, lines: Vec<IntrospectionLine>) {
        self.targets.push(TargetReport {
            target: target.name().to_string(),
            lines,
        });
    }

    pub fn lines(&self) -> impl Iterator<Item = &IntrospectionLine> {
        self.targets.iter().flat_map(|t| t.lines.iter())
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &IntrospectionReport) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(self.format_human(report)),
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize introspection report to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(report)
                .context("Failed to serialize introspection report to YAML"),
        }
    }

    fn format_human(&self, report: &IntrospectionReport) -> String {
        let mut output = String::new();
        for line in report.lines() {
            output.push_str(&line.to_string());
            output.push('\n');
        }
        output
    }
}
