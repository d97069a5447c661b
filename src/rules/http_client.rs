//! Per-call `HttpClient` construction.

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
pub struct HttpClient;

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![LinePattern::new(
        r"\bnew\s+(?:System\.Net\.Http\.)?HttpClient\s*\(",
        Severity::Warn,
        "HttpClient constructed directly; inject a shared instance or IHttpClientFactory",
    )]
});

impl Checker for HttpClient {
    fn category(&self) -> Category {
        Category::HttpClient
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        report_each(&mut sink, &scan(ctx.code_files(), &PATTERNS, self.category()));
        if sink.is_empty() {
            sink.pass("No directly constructed HttpClient");
        }
        sink.into_vec()
    }
}
