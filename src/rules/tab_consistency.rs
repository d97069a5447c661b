//! Active-tab flags vs. navigation triggers.
//!
//! Only a sanity signal: extra navigation buttons (sub-pages, dialogs) are a
//! legitimate design, so a mismatch is informational.

use std::collections::BTreeSet;

use super::Checker;
use crate::{
    core::{
        CheckContext, SourceFile,
        extract::{
            code::declares_class,
            views::{active_tab_flags, navigation_triggers, paired_view_name, view_component_name},
        },
    },
    findings::{Category, Finding, Findings},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TabConsistency;

impl Checker for TabConsistency {
    fn category(&self) -> Category {
        Category::TabConsistency
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let root = &ctx.app.root_component;

        let root_files: Vec<&SourceFile> =
            ctx.shared_files.iter().filter(|f| declares_class(f, root)).collect();
        if root_files.is_empty() {
            sink.info(format!("Root component {} not found; tabs not checked", root));
            return sink.into_vec();
        }
        let Some(view_name) = paired_view_name(root) else {
            sink.info(format!("{} has no view by naming convention; tabs not checked", root));
            return sink.into_vec();
        };
        let Some(view) = ctx
            .view_files
            .iter()
            .find(|f| view_component_name(f) == Some(view_name.as_str()))
        else {
            sink.info(format!("View {} not found; tabs not checked", view_name));
            return sink.into_vec();
        };

        // Flags may be spread over partial class files.
        let flags = root_files
            .iter()
            .flat_map(|file| active_tab_flags(file))
            .collect::<BTreeSet<_>>()
            .len();
        let triggers = navigation_triggers(view).len();
        if flags == triggers {
            sink.pass(format!(
                "{} active-tab flags match {} navigation triggers in {}",
                flags, triggers, view_name
            ));
        } else {
            sink.info(format!(
                "{} declares {} active-tab flags but {} has {} navigation triggers",
                root, flags, view_name, triggers
            ));
        }
        sink.into_vec()
    }
}
