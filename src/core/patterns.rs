//! Two-stage line matching: a static pattern table and a matcher over files.
//!
//! Rule modules declare what to look for as a table of [`LinePattern`]s and
//! hand it to [`scan`]. Matching is purely line-oriented; nothing here parses
//! the scanned language.

use regex::Regex;

use super::{source::SourceFile, suppression::active_lines};
use crate::findings::{Category, Findings, Location, Severity};

/// One row of a pattern table.
#[derive(Debug)]
pub struct LinePattern {
    pub regex: Regex,
    pub severity: Severity,
    pub message: &'static str,
}

impl LinePattern {
    /// Build a table row. Patterns are compile-time constants, so an invalid
    /// one is a programming error.
    pub fn new(pattern: &str, severity: Severity, message: &'static str) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            severity,
            message,
        }
    }
}

/// A pattern hit on one line of one file.
#[derive(Debug)]
pub struct LineMatch<'a> {
    pub file: &'a SourceFile,
    /// Zero-based line index.
    pub index: usize,
    pub pattern: &'a LinePattern,
}

impl LineMatch<'_> {
    pub fn location(&self) -> Location {
        Location::new(&self.file.relative_path, self.index + 1)
    }

    pub fn line(&self) -> &str {
        &self.file.lines[self.index]
    }
}

/// Match every non-suppressed line of `files` against `table`.
///
/// Results are ordered by file, then line, then table row.
pub fn scan<'a>(
    files: impl IntoIterator<Item = &'a SourceFile>,
    table: &'a [LinePattern],
    category: Category,
) -> Vec<LineMatch<'a>> {
    let mut matches = Vec::new();
    for file in files {
        for (index, line) in active_lines(file, category) {
            for pattern in table {
                if pattern.regex.is_match(line) {
                    matches.push(LineMatch {
                        file,
                        index,
                        pattern,
                    });
                }
            }
        }
    }
    matches
}

/// Emit one finding per match, at the pattern's severity (immediate-report policy).
pub fn report_each(sink: &mut Findings, matches: &[LineMatch<'_>]) {
    for m in matches {
        sink.at(m.pattern.severity, m.location(), m.pattern.message);
    }
}

/// Up to `n` lines following `index`.
pub fn window_after(lines: &[String], index: usize, n: usize) -> &[String] {
    let start = (index + 1).min(lines.len());
    let end = (index + 1 + n).min(lines.len());
    &lines[start..end]
}

/// Up to `n` lines preceding `index`.
pub fn window_before(lines: &[String], index: usize, n: usize) -> &[String] {
    let end = index.min(lines.len());
    &lines[end.saturating_sub(n)..end]
}

/// Whether any line in `window` matches `regex`.
pub fn window_matches(window: &[String], regex: &Regex) -> bool {
    window.iter().any(|line| regex.is_match(line))
}

/// Count-then-summarize with a display cap.
///
/// Emits at most `cap` of `items` as concrete findings at `severity`, then a
/// single rollup finding built by `rollup(remaining)` when items were cut.
pub fn report_capped(
    sink: &mut Findings,
    severity: Severity,
    items: Vec<(Option<Location>, String)>,
    cap: usize,
    rollup: impl FnOnce(usize) -> String,
) {
    let total = items.len();
    for (location, message) in items.into_iter().take(cap) {
        sink.push(severity, message, location);
    }
    if total > cap {
        sink.push(severity, rollup(total - cap), None);
    }
}
