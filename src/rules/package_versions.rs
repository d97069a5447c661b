//! Package version drift across the workspace.
//!
//! Under central package management (`ManagePackageVersionsCentrally`),
//! versions belong in `Directory.Packages.props` only. Without it, every
//! project pins its own versions, and they have to agree.

use std::collections::BTreeMap;

use super::GlobalChecker;
use crate::{
    core::{
        SourceFile, WorkspaceContext,
        context::PACKAGES_PROPS,
        extract::project::{PackageItem, PackageItemKind, package_items, property_is_true},
        suppression::is_suppressed,
    },
    findings::{Category, Finding, Findings, Location, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct PackageVersions;

const CENTRAL_MANAGEMENT: &str = "ManagePackageVersionsCentrally";

impl PackageVersions {
    fn items<'a>(
        &self,
        file: &'a SourceFile,
        kind: PackageItemKind,
    ) -> impl Iterator<Item = PackageItem> + 'a {
        let category = self.category();
        package_items(file)
            .into_iter()
            .filter(move |item| item.kind == kind && !is_suppressed(file, item.line, category))
    }

    fn check_central(&self, workspace: &WorkspaceContext, sink: &mut Findings) {
        if let Some(props) = &workspace.packages_props {
            let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();
            for item in self.items(props, PackageItemKind::Version) {
                match first_seen.get(&item.name).copied() {
                    Some(first) => sink.at(
                        Severity::Fail,
                        Location::new(&props.relative_path, item.line + 1),
                        format!(
                            "{} is declared twice in {} (first at line {})",
                            item.name,
                            PACKAGES_PROPS,
                            first + 1
                        ),
                    ),
                    None => {
                        first_seen.insert(item.name, item.line);
                    }
                }
            }
        }

        for project in &workspace.projects {
            for item in self.items(project, PackageItemKind::Reference) {
                if let Some(version) = item.version {
                    sink.at(
                        Severity::Warn,
                        Location::new(&project.relative_path, item.line + 1),
                        format!(
                            "{} pins Version=\"{}\" under central package management",
                            item.name, version
                        ),
                    );
                }
            }
        }
    }

    fn check_per_project(&self, workspace: &WorkspaceContext, sink: &mut Findings) {
        // package -> version -> projects pinning it
        let mut pins: BTreeMap<String, BTreeMap<String, Vec<&str>>> = BTreeMap::new();
        for project in &workspace.projects {
            for item in self.items(project, PackageItemKind::Reference) {
                if let Some(version) = item.version {
                    pins.entry(item.name)
                        .or_default()
                        .entry(version)
                        .or_default()
                        .push(&project.relative_path);
                }
            }
        }

        for (package, versions) in &pins {
            if versions.len() < 2 {
                continue;
            }
            let detail: Vec<String> = versions
                .iter()
                .map(|(version, projects)| format!("{} ({})", version, projects.join(", ")))
                .collect();
            sink.warn(format!("{} has differing versions: {}", package, detail.join("; ")));
        }
    }
}

impl GlobalChecker for PackageVersions {
    fn category(&self) -> Category {
        Category::PackageVersions
    }

    fn check(&self, workspace: &WorkspaceContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let central = workspace
            .packages_props
            .iter()
            .chain(workspace.build_props.iter())
            .any(|file| property_is_true(file, CENTRAL_MANAGEMENT));

        if central {
            self.check_central(workspace, &mut sink);
        } else {
            self.check_per_project(workspace, &mut sink);
        }

        if sink.is_empty() {
            if central {
                sink.pass("Package versions are centrally managed");
            } else {
                sink.pass(format!(
                    "Package versions agree across {} projects",
                    workspace.projects.len()
                ));
            }
        }
        sink.into_vec()
    }
}
