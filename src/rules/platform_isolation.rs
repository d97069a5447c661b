//! Platform APIs in shared source.
//!
//! Shared code compiles for every head, so a platform namespace or a
//! platform `#if` there is an error. The same lines are legitimate in
//! platform-specific files, which this rule never scans.

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
pub struct PlatformIsolation;

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![
        LinePattern::new(
            r"^\s*(?:global\s+)?using\s+(?:global::)?(?:Android|AndroidX|UIKit|Foundation|AppKit|CoreGraphics)(?:\.|\s*;)",
            Severity::Fail,
            "Platform namespace imported in shared code",
        ),
        LinePattern::new(
            r"\bJava\.(?:Lang|Util|IO|Net)\.",
            Severity::Fail,
            "Java interop type used in shared code",
        ),
        LinePattern::new(
            r"^\s*#\s*(?:if|elif)\b.*\b(?:ANDROID|IOS|MACCATALYST|__ANDROID__|__IOS__)\b",
            Severity::Fail,
            "Platform conditional compilation in shared code",
        ),
    ]
});

impl Checker for PlatformIsolation {
    fn category(&self) -> Category {
        Category::PlatformIsolation
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let matches = scan(&ctx.shared_files, &PATTERNS, self.category());
        report_each(&mut sink, &matches);

        if sink.is_empty() {
            sink.pass("Shared code is free of platform APIs");
        }
        sink.into_vec()
    }
}
