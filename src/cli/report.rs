//! Report formatting and printing utilities.
//!
//! This module renders command results in cargo-style format. It is kept
//! separate from the engine so convcheck can be used as a library.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use super::{
    args::OutputFormat,
    commands::{CheckSummary, CommandResult, CommandSummary, InitSummary},
};
use crate::{
    config::CONFIG_FILE_NAME,
    engine::RunReport,
    findings::{Category, Finding, Severity},
    utils::plural,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout (stderr for init errors).
pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check(summary) => {
            print_check_to(summary, verbose, result.strict, &mut io::stdout().lock())
        }
        CommandSummary::Init(summary) => print_init(summary),
        CommandSummary::Rules => print_rules_to(&mut io::stdout().lock()),
    }
}

/// Print a check result to a custom writer.
pub fn print_check_to<W: Write>(
    summary: &CheckSummary,
    verbose: bool,
    strict: bool,
    writer: &mut W,
) {
    match summary.format {
        OutputFormat::Text => report_to(&summary.report, verbose, strict, writer),
        OutputFormat::Json => match serde_json::to_string_pretty(&summary.report) {
            Ok(json) => {
                let _ = writeln!(writer, "{}", json);
            }
            Err(err) => eprintln!("{} Failed to serialize report: {}", "error:".bold().red(), err),
        },
    }
}

/// Render the text report: one section per scope, then a summary line.
///
/// Pass findings are only shown with `verbose`.
pub fn report_to<W: Write>(report: &RunReport, verbose: bool, strict: bool, writer: &mut W) {
    if !report.global.is_empty() {
        let _ = writeln!(writer, "{}", "Workspace".bold());
        print_findings(&report.global, None, verbose, writer);
        let _ = writeln!(writer);
    }

    for app in &report.apps {
        let _ = writeln!(
            writer,
            "{} {}",
            app.app.bold(),
            format!("({})", plural(app.files_checked, "file")).dimmed()
        );
        print_findings(&app.findings, Some(&app.path), verbose, writer);
        let _ = writeln!(writer);
    }

    print_summary(report, strict, writer);
}

pub fn print_rules_to<W: Write>(writer: &mut W) {
    for category in Category::ALL {
        let scope = if category.is_global() { "workspace" } else { "app" };
        let _ = writeln!(writer, "{:<22} {}", category.as_str(), scope.dimmed());
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Fail => "fail".bold().red(),
        Severity::Warn => "warn".bold().yellow(),
        Severity::Info => "info".bold().cyan(),
        Severity::Pass => "pass".bold().green(),
    }
}

fn print_findings<W: Write>(
    findings: &[Finding],
    root: Option<&str>,
    verbose: bool,
    writer: &mut W,
) {
    let mut shown = 0;
    for finding in findings {
        if finding.severity == Severity::Pass && !verbose {
            continue;
        }
        shown += 1;

        // Cargo-style: severity: message  category
        let _ = writeln!(
            writer,
            "{}: {}  {}",
            severity_label(finding.severity),
            finding.message,
            finding.category.as_str().dimmed().cyan()
        );

        // Clickable location relative to the workspace root: --> path:line
        if let Some(location) = &finding.location {
            let location = match root {
                Some(root) => format!("{}/{}", root, location),
                None => location.to_string(),
            };
            let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
        }
    }

    if shown == 0 {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), "No issues".green());
    }
}

fn print_summary<W: Write>(report: &RunReport, strict: bool, writer: &mut W) {
    let failures = report.count(Severity::Fail);
    let warnings = report.count(Severity::Warn);
    let notes = report.count(Severity::Info);
    let ok = failures == 0 && !(strict && warnings > 0);

    let text = format!(
        "{} checked: {}, {}, {}",
        plural(report.apps.len(), "app"),
        plural(failures, "failure"),
        plural(warnings, "warning"),
        plural(notes, "note")
    );
    if ok {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), text.green());
    } else {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), text.bold().red());
    }
}
