//! Namespaces must live under the app's root namespace.

use super::Checker;
use crate::{
    core::{
        CheckContext, extract::code::declared_namespaces, patterns::report_capped,
        suppression::is_suppressed,
    },
    findings::{Category, Finding, Findings, Location, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Namespaces;

const MAX_REPORTED: usize = 3;

/// Whether `namespace` is `root` itself or nested below it.
pub fn is_under_root(namespace: &str, root: &str) -> bool {
    namespace == root
        || namespace
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('.'))
}

impl Checker for Namespaces {
    fn category(&self) -> Category {
        Category::Namespaces
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let root = ctx.app.root_namespace();

        let mut declared = 0;
        let mut offenders = Vec::new();
        for file in ctx.code_files() {
            for (index, namespace) in declared_namespaces(file) {
                if is_suppressed(file, index, self.category()) {
                    continue;
                }
                declared += 1;
                if !is_under_root(&namespace, root) {
                    offenders.push((
                        Some(Location::new(&file.relative_path, index + 1)),
                        format!("Namespace {} is outside the root namespace {}", namespace, root),
                    ));
                }
            }
        }

        let clean = offenders.is_empty();
        report_capped(&mut sink, Severity::Warn, offenders, MAX_REPORTED, |n| {
            format!("... and {} more namespaces outside {}", n, root)
        });
        if clean {
            sink.pass(format!("{} namespace declarations under {}", declared, root));
        }
        sink.into_vec()
    }
}
