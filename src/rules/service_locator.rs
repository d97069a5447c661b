//! Runtime service lookups outside the composition root.

use std::sync::LazyLock;

use super::Checker;
use crate::{
    core::{
        CheckContext, SourceFile,
        extract::di::defines_function,
        patterns::{LinePattern, report_each, scan},
    },
    findings::{Category, Finding, Findings, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceLocator;

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![
        LinePattern::new(
            r"\.Get(?:Required)?Service\s*<",
            Severity::Warn,
            "Service resolved at runtime; inject it through the constructor",
        ),
        LinePattern::new(
            r"\bIoc\.Default\b",
            Severity::Warn,
            "Ioc.Default used as a service locator; inject the dependency instead",
        ),
    ]
});

impl Checker for ServiceLocator {
    fn category(&self) -> Category {
        Category::ServiceLocator
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let function = &ctx.app.service_configuration;

        // The file that builds the container is allowed to resolve from it.
        let files: Vec<&SourceFile> = ctx
            .code_files()
            .filter(|f| !defines_function(f, function))
            .collect();
        report_each(&mut sink, &scan(files, &PATTERNS, self.category()));

        if sink.is_empty() {
            sink.pass("Dependencies are injected, not located");
        }
        sink.into_vec()
    }
}
