//! Application metadata declared in `.csproj` files.

use super::Checker;
use crate::{
    core::{
        CheckContext, SourceFile,
        extract::project::xml_property,
        suppression::is_suppressed,
    },
    findings::{Category, Finding, Findings, Location, Severity},
    utils::plural,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFile;

const APPLICATION_ID: &str = "ApplicationId";
const DISPLAY_VERSION: &str = "ApplicationDisplayVersion";
const VERSION: &str = "ApplicationVersion";

/// `xml_property`, unless the line is suppressed for this rule.
fn property(file: &SourceFile, name: &str) -> Option<(usize, String)> {
    xml_property(file, name)
        .filter(|(index, _)| !is_suppressed(file, *index, Category::ProjectFile))
}

impl Checker for ProjectFile {
    fn category(&self) -> Category {
        Category::ProjectFile
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let expected = &ctx.app.expected_identifier;

        let projects: Vec<&SourceFile> = ctx
            .project_files
            .iter()
            .filter(|f| f.extension() == Some("csproj"))
            .collect();
        if projects.is_empty() {
            sink.warn("No .csproj project files found");
            return sink.into_vec();
        }

        let mut id_count = 0;
        for file in &projects {
            let at = |index: usize| Location::new(&file.relative_path, index + 1);

            if let Some((index, id)) = property(file, APPLICATION_ID) {
                id_count += 1;
                // MSBuild properties such as `$(AppId)` are resolved at build time.
                if !id.contains("$(") && id != *expected {
                    sink.at(
                        Severity::Fail,
                        at(index),
                        format!("ApplicationId '{}' does not match expected '{}'", id, expected),
                    );
                }

                for name in [DISPLAY_VERSION, VERSION] {
                    if property(file, name).is_none() {
                        sink.at(
                            Severity::Warn,
                            at(index),
                            format!("ApplicationId is declared without <{}>", name),
                        );
                    }
                }
                if let Some((index, version)) = property(file, VERSION)
                    && !version.contains("$(")
                    && version.parse::<u32>().is_err()
                {
                    sink.at(
                        Severity::Fail,
                        at(index),
                        format!("ApplicationVersion '{}' must be a positive integer", version),
                    );
                }
            }

            if property(file, "TargetFramework").is_none()
                && property(file, "TargetFrameworks").is_none()
            {
                sink.at(
                    Severity::Warn,
                    Location::new(&file.relative_path, 0),
                    "No <TargetFramework> or <TargetFrameworks> declared",
                );
            }
        }

        if id_count == 0 {
            sink.warn(format!("No <ApplicationId> declared; expected '{}'", expected));
        }

        if sink.count_at_least(Severity::Warn) == 0 {
            sink.pass(format!(
                "Project metadata consistent across {}",
                plural(projects.len(), "project file")
            ));
        }

        sink.into_vec()
    }
}
