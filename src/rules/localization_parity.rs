//! Resource key parity between the baseline table and each language.
//!
//! Every language is compared with the baseline on its own: a key missing
//! in two languages yields two findings.

use std::collections::BTreeSet;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        extract::resources::{group_tables, resource_keys},
        patterns::report_capped,
    },
    findings::{Category, Finding, Findings, Location, Severity},
    utils::plural,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalizationParity;

/// Missing keys reported per language before the rollup.
const MAX_MISSING_PER_LANGUAGE: usize = 10;

/// Keys of `baseline` absent from `keys`, and keys of `keys` absent from
/// `baseline`. Both in first-seen order, without duplicates.
pub fn key_difference(baseline: &[String], keys: &[String]) -> (Vec<String>, Vec<String>) {
    let baseline_set: BTreeSet<&String> = baseline.iter().collect();
    let key_set: BTreeSet<&String> = keys.iter().collect();

    let mut seen = BTreeSet::new();
    let missing = baseline
        .iter()
        .filter(|k| !key_set.contains(k) && seen.insert(*k))
        .cloned()
        .collect();
    let mut seen = BTreeSet::new();
    let extra = keys
        .iter()
        .filter(|k| !baseline_set.contains(k) && seen.insert(*k))
        .cloned()
        .collect();
    (missing, extra)
}

impl Checker for LocalizationParity {
    fn category(&self) -> Category {
        Category::LocalizationParity
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let tables = group_tables(&ctx.resource_files);
        if tables.is_empty() {
            sink.info("No resource tables found");
            return sink.into_vec();
        }

        for (path, table) in &tables {
            let Some(baseline) = table.baseline else {
                sink.warn(format!("Resource table {} has no baseline file", path));
                continue;
            };
            let baseline_keys = resource_keys(baseline);
            sink.info(format!(
                "{}: {} in baseline, {}",
                table.table,
                plural(baseline_keys.len(), "key"),
                plural(table.languages.len(), "language")
            ));

            let mut total_missing = 0;
            for (language, file) in &table.languages {
                let (missing, extra) = key_difference(&baseline_keys, &resource_keys(file));
                total_missing += missing.len();

                let items = missing
                    .iter()
                    .map(|key| {
                        (
                            Some(Location::new(&file.relative_path, 0)),
                            format!("{} [{}]: missing key '{}'", table.table, language, key),
                        )
                    })
                    .collect();
                report_capped(&mut sink, Severity::Warn, items, MAX_MISSING_PER_LANGUAGE, |n| {
                    format!("{} [{}]: ... and {} more missing keys", table.table, language, n)
                });

                if !extra.is_empty() {
                    sink.info(format!(
                        "{} [{}]: {} not in baseline: {}",
                        table.table,
                        language,
                        plural(extra.len(), "extra key"),
                        extra.join(", ")
                    ));
                }
            }

            if total_missing == 0 {
                sink.pass(format!("{}: all languages complete", table.table));
            }
        }

        sink.into_vec()
    }
}
