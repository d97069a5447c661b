//! Literal user-facing text in views.
//!
//! Text that reaches the user should come from a resource table. Attribute
//! values starting with `{` are markup extensions (bindings, `x:Static`) and
//! are never literal.

use std::sync::LazyLock;

use regex::Regex;

use super::Checker;
use crate::{
    core::{CheckContext, patterns::report_capped, suppression::active_lines},
    findings::{Category, Finding, Findings, Location, Severity},
    utils::contains_alphabetic,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct HardcodedText;

const MAX_REPORTED: usize = 3;

static TEXT_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(Text|Content|Header|Title|Watermark|PlaceholderText|ToolTip\.Tip)\s*=\s*"([^"]*)""#,
    )
    .unwrap()
});

static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(TextBlock|Label|Button|Run)(?:\s[^>]*)?>([^<{]+)</(?:TextBlock|Label|Button|Run)>")
        .unwrap()
});

/// `(property, text)` of every literal text on `line`.
pub fn literal_texts(line: &str) -> Vec<(String, String)> {
    let attributes = TEXT_ATTRIBUTE
        .captures_iter(line)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()));
    let elements = TEXT_ELEMENT
        .captures_iter(line)
        .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()));
    attributes
        .chain(elements)
        .filter(|(_, text)| !text.starts_with('{') && contains_alphabetic(text))
        .collect()
}

impl Checker for HardcodedText {
    fn category(&self) -> Category {
        Category::HardcodedText
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let mut offenders = Vec::new();
        for file in &ctx.view_files {
            for (index, line) in active_lines(file, self.category()) {
                for (property, text) in literal_texts(line) {
                    offenders.push((
                        Some(Location::new(&file.relative_path, index + 1)),
                        format!("Hardcoded {} \"{}\"; move it to a resource table", property, text),
                    ));
                }
            }
        }

        let clean = offenders.is_empty();
        report_capped(&mut sink, Severity::Warn, offenders, MAX_REPORTED, |n| {
            format!("... and {} more hardcoded texts", n)
        });
        if clean {
            sink.pass(format!("No hardcoded text in {} views", ctx.view_files.len()));
        }
        sink.into_vec()
    }
}
