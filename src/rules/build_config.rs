//! Build flags that conflict or ship a worse artifact.
//!
//! `Directory.Build.props` and every project file are checked on their own
//! declarations. A conflict is reported where the second flag is set.

use super::GlobalChecker;
use crate::{
    core::{
        SourceFile, WorkspaceContext,
        context::BUILD_PROPS,
        extract::project::{is_true, xml_property},
        suppression::is_suppressed,
    },
    findings::{Category, Finding, Findings, Location, Severity},
    utils::plural,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildConfig;

/// Pairs of properties that must not both be true.
const EXCLUSIVE_FLAGS: &[(&str, &str)] = &[
    ("PublishAot", "UseInterpreter"),
    ("RunAOTCompilation", "UseInterpreter"),
];

impl BuildConfig {
    /// `(line index, value)` of `name` in `file`, unless the line is suppressed.
    fn property(&self, file: &SourceFile, name: &str) -> Option<(usize, String)> {
        xml_property(file, name)
            .filter(|(index, _)| !is_suppressed(file, *index, self.category()))
    }

    fn flag(&self, file: &SourceFile, name: &str) -> Option<usize> {
        self.property(file, name)
            .and_then(|(index, value)| is_true(&value).then_some(index))
    }

    fn check_file(&self, file: &SourceFile, sink: &mut Findings) {
        for (first, second) in EXCLUSIVE_FLAGS {
            if self.flag(file, first).is_some()
                && let Some(index) = self.flag(file, second)
            {
                sink.at(
                    Severity::Fail,
                    Location::new(&file.relative_path, index + 1),
                    format!("{} and {} are both enabled", first, second),
                );
            }
        }

        if let Some((index, value)) = self.property(file, "AndroidPackageFormat")
            && value.trim().eq_ignore_ascii_case("apk")
        {
            sink.at(
                Severity::Warn,
                Location::new(&file.relative_path, index + 1),
                "AndroidPackageFormat is apk; store uploads need aab",
            );
        }

        if self.flag(file, "PublishAot").is_some()
            && let Some((index, value)) = self.property(file, "PublishTrimmed")
            && value.trim().eq_ignore_ascii_case("false")
        {
            sink.at(
                Severity::Warn,
                Location::new(&file.relative_path, index + 1),
                "PublishTrimmed is false while PublishAot is enabled",
            );
        }
    }
}

impl GlobalChecker for BuildConfig {
    fn category(&self) -> Category {
        Category::BuildConfig
    }

    fn check(&self, workspace: &WorkspaceContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        for file in &workspace.unreadable {
            sink.at(
                Severity::Warn,
                Location::new(&file.relative_path, 0),
                format!("File excluded from checks: {}", file.error),
            );
        }

        let props_unreadable = workspace
            .unreadable
            .iter()
            .any(|file| file.relative_path == BUILD_PROPS);
        match &workspace.build_props {
            Some(props) => self.check_file(props, &mut sink),
            None if props_unreadable => {}
            None => sink.warn(format!("No {} at the workspace root", BUILD_PROPS)),
        }
        for project in &workspace.projects {
            self.check_file(project, &mut sink);
        }

        if sink.is_empty() {
            let checked = workspace.projects.len() + usize::from(workspace.build_props.is_some());
            sink.pass(format!("Build flags consistent in {}", plural(checked, "file")));
        }
        sink.into_vec()
    }
}
