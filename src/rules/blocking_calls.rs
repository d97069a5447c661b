//! Sync-over-async calls in shared code.
//!
//! Blocking on a task from the UI thread deadlocks or freezes the app.
//! Platform entry points sometimes have to block and are not scanned.

use std::sync::LazyLock;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        patterns::{LinePattern, report_each, scan},
    },
    findings::{Category, Finding, Findings, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingCalls;

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![
        LinePattern::new(
            r"\.Result\b",
            Severity::Warn,
            "Blocking on a task with .Result",
        ),
        LinePattern::new(
            r"\.Wait\s*\(\s*\)",
            Severity::Warn,
            "Blocking on a task with .Wait()",
        ),
        LinePattern::new(
            r"\.GetAwaiter\s*\(\s*\)\s*\.GetResult\s*\(",
            Severity::Warn,
            "Blocking on a task with .GetAwaiter().GetResult()",
        ),
        LinePattern::new(
            r"\bThread\.Sleep\s*\(",
            Severity::Warn,
            "Thread.Sleep blocks the calling thread; use await Task.Delay",
        ),
    ]
});

impl Checker for BlockingCalls {
    fn category(&self) -> Category {
        Category::BlockingCalls
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        report_each(&mut sink, &scan(&ctx.shared_files, &PATTERNS, self.category()));
        if sink.is_empty() {
            sink.pass("No blocking calls in shared code");
        }
        sink.into_vec()
    }
}
