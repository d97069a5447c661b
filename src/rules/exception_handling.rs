//! Empty catch blocks.

use std::sync::LazyLock;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        patterns::{LinePattern, scan, window_after},
    },
    findings::{Category, Finding, Findings, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExceptionHandling;

/// Lines after `catch` that may hold its braces.
const BODY_WINDOW: usize = 2;

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![LinePattern::new(
        r"\bcatch\b",
        Severity::Warn,
        "Empty catch block swallows the exception",
    )]
});

/// Strip a leading parenthesized group, returning the rest.
fn skip_parens(text: &str) -> Option<&str> {
    let text = text.strip_prefix('(')?;
    let mut depth = 1;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[i + 1..]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Whether the whitespace-free text following `catch` opens an empty block.
fn is_empty_body(after_catch: &str) -> bool {
    let mut rest = after_catch;
    if rest.starts_with('(') {
        match skip_parens(rest) {
            Some(r) => rest = r,
            None => return false,
        }
    }
    if let Some(filter) = rest.strip_prefix("when") {
        match skip_parens(filter) {
            Some(r) => rest = r,
            None => return false,
        }
    }
    rest.starts_with("{}")
}

impl Checker for ExceptionHandling {
    fn category(&self) -> Category {
        Category::ExceptionHandling
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        for m in scan(ctx.code_files(), &PATTERNS, self.category()) {
            let line = m.line();
            let following: String = window_after(&m.file.lines, m.index, BODY_WINDOW).concat();
            let empty = m.pattern.regex.find_iter(line).any(|keyword| {
                let text = format!("{}{}", &line[keyword.end()..], following);
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                is_empty_body(&compact)
            });
            if empty {
                sink.at(m.pattern.severity, m.location(), m.pattern.message);
            }
        }

        if sink.is_empty() {
            sink.pass("No empty catch blocks");
        }
        sink.into_vec()
    }
}
