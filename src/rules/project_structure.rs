//! Structural check of the application tree.
//!
//! A missing tree or shared project is reported here instead of aborting the
//! run, so every other rule still runs on whatever could be loaded.

use super::Checker;
use crate::{
    core::CheckContext,
    findings::{Category, Finding, Findings, Location, Severity},
    utils::plural,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectStructure;

impl Checker for ProjectStructure {
    fn category(&self) -> Category {
        Category::ProjectStructure
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let layout = &ctx.layout;

        if !layout.app_root_exists {
            sink.fail(format!("Application directory '{}' not found", ctx.app.path()));
            return sink.into_vec();
        }

        if layout.shared_root.is_none() {
            sink.fail(format!(
                "No shared project directory (expected 'Shared' or '{}.Shared')",
                ctx.app.name
            ));
        }

        for file in &ctx.unreadable {
            sink.at(
                Severity::Warn,
                Location::new(&file.relative_path, 0),
                format!("File excluded from checks: {}", file.error),
            );
        }

        if layout.platforms.is_empty() {
            sink.info("No platform heads found");
        } else {
            sink.info(format!("Platform heads: {}", layout.platforms.join(", ")));
        }

        if sink.count_at_least(Severity::Warn) == 0 {
            sink.pass(format!("Layout OK, {} loaded", plural(ctx.file_count(), "file")));
        }

        sink.into_vec()
    }
}
