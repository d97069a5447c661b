//! `async void` methods without exception handling.
//!
//! An exception escaping an `async void` method cannot be observed by a
//! caller and terminates the process.

use std::sync::LazyLock;

use regex::Regex;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        patterns::{LinePattern, scan, window_after, window_matches},
    },
    findings::{Category, Finding, Findings, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct AsyncVoid;

/// Lines after the signature searched for a `try`.
const TRY_WINDOW: usize = 5;

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![LinePattern::new(
        r"\basync\s+void\s+\w+\s*\(",
        Severity::Warn,
        "async void method has no try block; an exception here crashes the app",
    )]
});

static TRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\btry\b").unwrap());

impl Checker for AsyncVoid {
    fn category(&self) -> Category {
        Category::AsyncVoid
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        for m in scan(ctx.code_files(), &PATTERNS, self.category()) {
            let window = window_after(&m.file.lines, m.index, TRY_WINDOW);
            if !TRY.is_match(m.line()) && !window_matches(window, &TRY) {
                sink.at(m.pattern.severity, m.location(), m.pattern.message);
            }
        }

        if sink.is_empty() {
            sink.pass("Every async void method handles its exceptions");
        }
        sink.into_vec()
    }
}
