//! Persistence footguns.
//!
//! Sibling apps share a device and often a user profile, so every storage
//! name must carry the app name. Settings written in place are lost when the
//! process dies mid-write, and settings read without a guard crash the app
//! on startup once they are corrupt.

use std::sync::LazyLock;

use regex::Regex;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        patterns::{LinePattern, scan, window_after, window_before, window_matches},
        suppression::active_lines,
    },
    findings::{Category, Finding, Findings, Location, Severity},
    utils::fold_name,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Persistence;

/// Lines on each side of a write searched for a temp-file swap.
const SWAP_WINDOW: usize = 3;
/// Lines before a deserialization searched for a `try`.
const TRY_WINDOW: usize = 6;

/// Literal storage names: the first path segment under a special folder,
/// and shared-preferences file names.
static STORAGE_NAMES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r#"SpecialFolder\.\w+\s*\)\s*,\s*"([^"]+)""#).unwrap(),
        Regex::new(r#"GetSharedPreferences\s*\(\s*"([^"]+)""#).unwrap(),
        Regex::new(r#"\bsharedName\s*:\s*"([^"]+)""#).unwrap(),
    ]
});

static WRITE_PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![LinePattern::new(
        r"\bFile\.WriteAllText(?:Async)?\s*\(",
        Severity::Warn,
        "File written in place; write to a .tmp file and swap it in",
    )]
});

static READ_PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![LinePattern::new(
        r"\bJsonSerializer\.Deserialize(?:Async)?\b",
        Severity::Warn,
        "Deserialization outside a try block; corrupt data will crash the app",
    )]
});

static SWAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\.tmp\b|\bFile\.Replace\s*\(|\bFile\.Move\s*\("#).unwrap());

static TRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\btry\b").unwrap());

impl Checker for Persistence {
    fn category(&self) -> Category {
        Category::Persistence
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let app = fold_name(&ctx.app.name);

        for file in ctx.code_files() {
            for (index, line) in active_lines(file, self.category()) {
                for name in STORAGE_NAMES
                    .iter()
                    .flat_map(|regex| regex.captures_iter(line))
                    .map(|caps| caps[1].to_string())
                {
                    if !fold_name(&name).contains(&app) {
                        sink.at(
                            Severity::Fail,
                            Location::new(&file.relative_path, index + 1),
                            format!(
                                "Storage name \"{}\" does not include the app name '{}'",
                                name, ctx.app.name
                            ),
                        );
                    }
                }
            }
        }

        for m in scan(ctx.code_files(), &WRITE_PATTERNS, self.category()) {
            let lines = &m.file.lines;
            let swapped = SWAP.is_match(m.line())
                || window_matches(window_before(lines, m.index, SWAP_WINDOW), &SWAP)
                || window_matches(window_after(lines, m.index, SWAP_WINDOW), &SWAP);
            if !swapped {
                sink.at(m.pattern.severity, m.location(), m.pattern.message);
            }
        }

        for m in scan(ctx.code_files(), &READ_PATTERNS, self.category()) {
            let guarded = TRY.is_match(m.line())
                || window_matches(window_before(&m.file.lines, m.index, TRY_WINDOW), &TRY);
            if !guarded {
                sink.at(m.pattern.severity, m.location(), m.pattern.message);
            }
        }

        if sink.is_empty() {
            sink.pass("Storage is app-scoped and written safely");
        }
        sink.into_vec()
    }
}
