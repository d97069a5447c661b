use std::process::ExitCode;

use super::commands::{CommandResult, CommandSummary};
use crate::findings::Severity;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed, no failing findings
/// - `Failure` (1): Command completed but found failures (or warnings under `--strict`)
/// - `Error` (2): Command failed due to internal error (config error, unknown app, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, no failing findings.
    Success,
    /// Command completed but found failing findings.
    Failure,
    /// Command failed due to internal error (config error, unknown app, etc.).
    Error,
}

impl ExitStatus {
    pub fn from_result(result: &CommandResult) -> Self {
        match &result.summary {
            CommandSummary::Check(summary) => {
                let threshold = if result.strict {
                    Severity::Warn
                } else {
                    Severity::Fail
                };
                if summary.report.worst().is_some_and(|worst| worst >= threshold) {
                    ExitStatus::Failure
                } else {
                    ExitStatus::Success
                }
            }
            CommandSummary::Init(summary) if !summary.created => ExitStatus::Failure,
            CommandSummary::Init(_) | CommandSummary::Rules => ExitStatus::Success,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
