//! Views vs. logic components.
//!
//! Every `FooView` needs a `FooViewModel`. The inverse direction is only
//! informational, since some logic components have no view on purpose.

use std::collections::BTreeSet;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        extract::views::{
            declared_logic_components, paired_logic_name, paired_view_name, view_component_name,
        },
        patterns::report_capped,
    },
    findings::{Category, Finding, Findings, Location, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewPairing;

const MAX_UNPAIRED_VIEWS: usize = 5;

impl Checker for ViewPairing {
    fn category(&self) -> Category {
        Category::ViewPairing
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let logic: BTreeSet<String> = ctx
            .code_files()
            .flat_map(declared_logic_components)
            .collect();

        let mut paired_views = 0;
        let mut view_names = BTreeSet::new();
        let mut unpaired = Vec::new();
        for file in &ctx.view_files {
            let Some(view) = view_component_name(file) else {
                continue;
            };
            view_names.insert(view.to_string());
            let Some(expected) = paired_logic_name(view) else {
                continue;
            };
            if logic.contains(&expected) {
                paired_views += 1;
            } else {
                unpaired.push((
                    Some(Location::new(&file.relative_path, 0)),
                    format!("{} has no matching {}", view, expected),
                ));
            }
        }

        let all_paired = unpaired.is_empty();
        report_capped(&mut sink, Severity::Warn, unpaired, MAX_UNPAIRED_VIEWS, |n| {
            format!("... and {} more views without a logic component", n)
        });
        if all_paired {
            sink.pass(format!("All {} views have a logic component", paired_views));
        }

        let viewless: Vec<&str> = logic
            .iter()
            .filter(|name| paired_view_name(name).is_some_and(|view| !view_names.contains(&view)))
            .map(String::as_str)
            .collect();
        if !viewless.is_empty() {
            sink.info(format!("Logic components without a view: {}", viewless.join(", ")));
        }

        sink.into_vec()
    }
}
