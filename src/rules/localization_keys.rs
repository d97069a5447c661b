//! Resource keys referenced from code and views must exist in the baseline.
//!
//! Code references look like `Strings.SaveButton`, views use
//! `{x:Static p:Strings.SaveButton}`. Generated `*.Designer.cs` accessors are
//! skipped, since they mirror the table itself.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use super::Checker;
use crate::{
    core::{
        CheckContext, SourceFile,
        extract::resources::{group_tables, resource_keys},
        patterns::report_capped,
        suppression::active_lines,
    },
    findings::{Category, Finding, Findings, Location, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalizationKeys;

const MAX_UNKNOWN_KEYS: usize = 10;

/// Members of the generated accessor class that are not resource keys.
const ACCESSOR_MEMBERS: &[&str] = &["ResourceManager", "Culture"];

/// Reference matchers for one resource table.
struct TableMatcher {
    table: String,
    keys: BTreeSet<String>,
    code: Regex,
    view: Regex,
}

impl TableMatcher {
    fn new(table: &str, keys: Vec<String>) -> Option<Self> {
        let name = regex::escape(table);
        Some(Self {
            table: table.to_string(),
            keys: keys.into_iter().collect(),
            code: Regex::new(&format!(r"\b{}\.([A-Z]\w*)\b", name)).ok()?,
            view: Regex::new(&format!(r"x:Static\s+\w+:{}\.(\w+)", name)).ok()?,
        })
    }

    fn regex_for(&self, file: &SourceFile) -> &Regex {
        match file.extension() {
            Some("cs") => &self.code,
            _ => &self.view,
        }
    }
}

impl Checker for LocalizationKeys {
    fn category(&self) -> Category {
        Category::LocalizationKeys
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let matchers: Vec<TableMatcher> = group_tables(&ctx.resource_files)
            .into_values()
            .filter_map(|table| {
                let baseline = table.baseline?;
                TableMatcher::new(&table.table, resource_keys(baseline))
            })
            .collect();
        if matchers.is_empty() {
            sink.info("No baseline resource tables; key references not checked");
            return sink.into_vec();
        }

        let mut referenced = 0;
        let mut unknown = Vec::new();
        let mut reported: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        let files = ctx
            .code_files()
            .filter(|f| !f.file_name().ends_with(".Designer.cs"))
            .chain(ctx.view_files.iter());
        for file in files {
            for (index, line) in active_lines(file, self.category()) {
                for matcher in &matchers {
                    for caps in matcher.regex_for(file).captures_iter(line) {
                        let key = &caps[1];
                        if ACCESSOR_MEMBERS.contains(&key) {
                            continue;
                        }
                        referenced += 1;
                        if matcher.keys.contains(key) {
                            continue;
                        }
                        if reported.entry(&matcher.table).or_default().insert(key.to_string()) {
                            unknown.push((
                                Some(Location::new(&file.relative_path, index + 1)),
                                format!(
                                    "{}.{} is not defined in the baseline table",
                                    matcher.table, key
                                ),
                            ));
                        }
                    }
                }
            }
        }

        let all_resolved = unknown.is_empty();
        report_capped(&mut sink, Severity::Warn, unknown, MAX_UNKNOWN_KEYS, |n| {
            format!("... and {} more unknown resource keys", n)
        });
        if all_resolved {
            sink.pass(format!("All {} resource key references resolve", referenced));
        }
        sink.into_vec()
    }
}
