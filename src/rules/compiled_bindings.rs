//! Compiled bindings in views.
//!
//! A `{Binding}` without `x:DataType` falls back to reflection, which is
//! slower and breaks under trimming.

use std::sync::LazyLock;

use regex::Regex;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        patterns::{LinePattern, report_capped, report_each, scan},
        suppression::active_lines,
    },
    findings::{Category, Finding, Findings, Location, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledBindings;

const MAX_REPORTED_VIEWS: usize = 3;

static BINDING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{Binding\b").unwrap());

static DATA_TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bx:DataType\s*=").unwrap());

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![LinePattern::new(
        r#"(?i)\bx:CompileBindings\s*=\s*"false""#,
        Severity::Warn,
        "Compiled bindings switched off for this scope",
    )]
});

impl Checker for CompiledBindings {
    fn category(&self) -> Category {
        Category::CompiledBindings
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let mut offenders = Vec::new();
        for file in &ctx.view_files {
            let first_binding = active_lines(file, self.category())
                .find(|(_, line)| BINDING.is_match(line))
                .map(|(index, _)| index);
            let has_data_type = file.lines.iter().any(|line| DATA_TYPE.is_match(line));
            if let Some(index) = first_binding
                && !has_data_type
            {
                offenders.push((
                    Some(Location::new(&file.relative_path, index + 1)),
                    format!("{} uses {{Binding}} without x:DataType", file.file_name()),
                ));
            }
        }

        let clean = offenders.is_empty();
        report_capped(&mut sink, Severity::Warn, offenders, MAX_REPORTED_VIEWS, |n| {
            format!("... and {} more views without x:DataType", n)
        });
        report_each(&mut sink, &scan(&ctx.view_files, &PATTERNS, self.category()));

        if clean && sink.is_empty() {
            sink.pass(format!("{} views use compiled bindings", ctx.view_files.len()));
        }
        sink.into_vec()
    }
}
