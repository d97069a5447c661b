//! TODO/FIXME/HACK count.
//!
//! Markers live in comments, so this module reads every line and does not
//! go through the suppression scanner.

use std::sync::LazyLock;

use regex::Regex;

use super::Checker;
use crate::{
    core::CheckContext,
    findings::{Category, Finding, Findings},
    utils::plural,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TodoMarkers;

static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:TODO|FIXME|HACK)\b").unwrap());

impl Checker for TodoMarkers {
    fn category(&self) -> Category {
        Category::TodoMarkers
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let mut files = 0;
        let mut count = 0;
        for file in ctx.code_files().chain(ctx.view_files.iter()) {
            let in_file: usize = file
                .lines
                .iter()
                .map(|line| MARKER.find_iter(line).count())
                .sum();
            if in_file > 0 {
                files += 1;
                count += in_file;
            }
        }

        if count == 0 {
            sink.pass("No TODO/FIXME/HACK markers");
        } else {
            sink.info(format!(
                "{} in {}",
                plural(count, "TODO/FIXME/HACK marker"),
                plural(files, "file")
            ));
        }
        sink.into_vec()
    }
}
