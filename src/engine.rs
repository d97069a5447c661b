//! Result aggregation: run the registered rules and collect their findings.
//!
//! Global rules run once per invocation, then every selected app gets its
//! own [`CheckContext`] and the full per-app registry. Rules of one phase run
//! in parallel; their outputs are collected by registry index, so the
//! concatenated result is the same on every run. Nothing is deduplicated or
//! re-sorted.

use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    config::{AppDescriptor, Config},
    core::{CheckContext, WorkspaceContext},
    findings::{Category, Finding, Severity},
    rules::{Checker, GlobalChecker, app_rules, global_rules},
};

/// Findings for one application.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppReport {
    pub app: String,
    /// App root relative to the workspace root; finding paths are relative to it.
    pub path: String,
    pub files_checked: usize,
    pub findings: Vec<Finding>,
}

/// Everything one invocation produced: global findings first, then one
/// report per app in config order.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub global: Vec<Finding>,
    pub apps: Vec<AppReport>,
}

impl RunReport {
    /// Global findings followed by every app's findings.
    pub fn all_findings(&self) -> impl Iterator<Item = &Finding> {
        self.global
            .iter()
            .chain(self.apps.iter().flat_map(|app| app.findings.iter()))
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.all_findings().filter(|f| f.severity == severity).count()
    }

    /// Highest severity reported, `None` when nothing ran.
    pub fn worst(&self) -> Option<Severity> {
        self.all_findings().map(|f| f.severity).max()
    }
}

/// Selection applied on top of the config.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Only these categories. Empty means all enabled ones.
    pub rules: Vec<Category>,
    /// Only these apps, by name. Empty means all declared apps.
    pub apps: Vec<String>,
    pub verbose: bool,
}

impl RunOptions {
    fn selects(&self, config: &Config, category: Category) -> bool {
        config.is_enabled(category) && (self.rules.is_empty() || self.rules.contains(&category))
    }
}

/// Run every selected rule over the workspace rooted at `workspace_root`.
///
/// Fails only for caller errors (an `--app` that is not declared). Problems
/// in the scanned tree are reported as findings.
pub fn run(workspace_root: &Path, config: &Config, options: &RunOptions) -> Result<RunReport> {
    let apps = select_apps(config, &options.apps)?;

    let global_enabled: Vec<Category> = global_rules()
        .iter()
        .map(GlobalChecker::category)
        .filter(|c| options.selects(config, *c))
        .collect();
    let global = if global_enabled.is_empty() {
        Vec::new()
    } else {
        let workspace = WorkspaceContext::load(workspace_root, &config.ignores, options.verbose);
        run_global_checks(&workspace, &global_enabled)
    };

    let app_enabled: Vec<Category> = app_rules()
        .iter()
        .map(Checker::category)
        .filter(|c| options.selects(config, *c))
        .collect();

    let mut reports = Vec::with_capacity(apps.len());
    for app in apps {
        if options.verbose {
            eprintln!(
                "{} Checking {} at {}",
                "note:".bold().cyan(),
                app.name,
                workspace_root.join(app.path()).display()
            );
        }
        let ctx = CheckContext::load(workspace_root, app.clone(), &config.ignores, options.verbose);
        reports.push(AppReport {
            app: app.name.clone(),
            path: app.path().to_string(),
            files_checked: ctx.file_count(),
            findings: run_app_checks(&ctx, &app_enabled),
        });
    }

    Ok(RunReport {
        global,
        apps: reports,
    })
}

fn select_apps<'a>(config: &'a Config, names: &[String]) -> Result<Vec<&'a AppDescriptor>> {
    if names.is_empty() {
        return Ok(config.apps.iter().collect());
    }
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let Some(app) = config.apps.iter().find(|a| &a.name == name) else {
            let declared: Vec<&str> = config.apps.iter().map(|a| a.name.as_str()).collect();
            bail!("Unknown app '{}' (declared: {})", name, declared.join(", "));
        };
        selected.push(app);
    }
    Ok(selected)
}

/// Run the per-app rules in `enabled` against `ctx`, in registry order.
pub fn run_app_checks(ctx: &CheckContext, enabled: &[Category]) -> Vec<Finding> {
    let rules: Vec<_> = app_rules()
        .into_iter()
        .filter(|rule| enabled.contains(&rule.category()))
        .collect();
    rules
        .par_iter()
        .map(|rule| rule.check(ctx))
        .collect::<Vec<_>>()
        .concat()
}

/// Run the global rules in `enabled`, in registry order.
pub fn run_global_checks(workspace: &WorkspaceContext, enabled: &[Category]) -> Vec<Finding> {
    let rules: Vec<_> = global_rules()
        .into_iter()
        .filter(|rule| enabled.contains(&rule.category()))
        .collect();
    rules
        .par_iter()
        .map(|rule| rule.check(workspace))
        .collect::<Vec<_>>()
        .concat()
}
