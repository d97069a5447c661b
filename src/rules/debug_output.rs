//! Debug output left in shared code.

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
pub struct DebugOutput;

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![LinePattern::new(
        r"\b(?:System\.)?(?:Console|Diagnostics\.Debug|Debug|Trace)\.Write(?:Line)?\s*\(",
        Severity::Warn,
        "Debug output left in shared code",
    )]
});

impl Checker for DebugOutput {
    fn category(&self) -> Category {
        Category::DebugOutput
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        report_each(&mut sink, &scan(&ctx.shared_files, &PATTERNS, self.category()));
        if sink.is_empty() {
            sink.pass("No debug output in shared code");
        }
        sink.into_vec()
    }
}
