//! MVVM Toolkit source-generator prerequisites.
//!
//! `[ObservableProperty]` and `[RelayCommand]` generate code into the same
//! class, which therefore has to be `partial`. The generated property is
//! the PascalCase form of the field name, so the field itself must not be
//! PascalCase.

use std::sync::LazyLock;

use regex::Regex;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        patterns::{report_capped, window_after},
        suppression::active_lines,
    },
    findings::{Category, Finding, Findings, Location, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MvvmToolkit;

const MAX_REPORTED_FILES: usize = 3;
/// Lines after `[ObservableProperty]` searched for the field.
const FIELD_WINDOW: usize = 2;

static GENERATOR_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*(?:ObservableProperty|RelayCommand)\b").unwrap());

static OBSERVABLE_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*ObservableProperty\b").unwrap());

static PARTIAL_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpartial\s+(?:class|record)\b").unwrap());

static ATTRIBUTE_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:private|protected|internal|public|static|readonly|volatile)\s+)*[A-Za-z_][\w.]*(?:<[^>]*>)?\??(?:\[\])?\s+([A-Za-z_]\w*)\s*(?:=|;)",
    )
    .unwrap()
});

/// Name of the field declared on `line`, ignoring attribute lists.
///
/// Partial properties (`public partial string Name { get; set; }`) are not
/// fields.
fn field_name(line: &str) -> Option<String> {
    let line = ATTRIBUTE_LIST.replace_all(line, "");
    if line.contains('{') || line.contains("partial ") {
        return None;
    }
    FIELD.captures(&line).map(|caps| caps[1].to_string())
}

impl Checker for MvvmToolkit {
    fn category(&self) -> Category {
        Category::MvvmToolkit
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        let mut non_partial = Vec::new();
        for file in &ctx.shared_files {
            let first_attribute = active_lines(file, self.category())
                .find(|(_, line)| GENERATOR_ATTRIBUTE.is_match(line))
                .map(|(index, _)| index);
            if let Some(index) = first_attribute
                && !file.lines.iter().any(|line| PARTIAL_TYPE.is_match(line))
            {
                non_partial.push((
                    Some(Location::new(&file.relative_path, index + 1)),
                    format!(
                        "{} uses MVVM Toolkit generators but declares no partial class",
                        file.file_name()
                    ),
                ));
            }
        }
        report_capped(&mut sink, Severity::Fail, non_partial, MAX_REPORTED_FILES, |n| {
            format!("... and {} more files without a partial class", n)
        });

        for file in &ctx.shared_files {
            for (index, line) in active_lines(file, self.category()) {
                if !OBSERVABLE_PROPERTY.is_match(line) {
                    continue;
                }
                let mut candidates = std::iter::once((index, line)).chain(
                    window_after(&file.lines, index, FIELD_WINDOW)
                        .iter()
                        .enumerate()
                        .map(|(offset, l)| (index + 1 + offset, l.as_str())),
                );
                let field = candidates.find_map(|(i, l)| field_name(l).map(|name| (i, name)));
                if let Some((field_index, name)) = field
                    && name.starts_with(|c: char| c.is_ascii_uppercase())
                {
                    sink.at(
                        Severity::Warn,
                        Location::new(&file.relative_path, field_index + 1),
                        format!(
                            "[ObservableProperty] field '{}' is PascalCase and clashes with the generated property",
                            name
                        ),
                    );
                }
            }
        }

        if sink.is_empty() {
            sink.pass("MVVM Toolkit generators are used correctly");
        }
        sink.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rules::test_support::{context, locations, severities};

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("private string _name = \"\";"), Some("_name".to_string()));
        assert_eq!(
            field_name("[ObservableProperty] private bool isBusy;"),
            Some("isBusy".to_string())
        );
        assert_eq!(
            field_name("private ObservableCollection<LoanRow>? Rows;"),
            Some("Rows".to_string())
        );
        assert_eq!(field_name("public partial string Name { get; set; }"), None);
        assert_eq!(field_name("[NotifyPropertyChangedFor(nameof(Total))]"), None);
    }

    #[test]
    fn test_partial_class_passes() {
        let ctx = context(&[(
            "LoanCalc.Shared/ViewModels/MainViewModel.cs",
            r#"public partial class MainViewModel : ViewModelBase
{
    [ObservableProperty]
    [NotifyPropertyChangedFor(nameof(Total))]
    private decimal _amount;

    [RelayCommand]
    private void Reset() { }
}"#,
        )]);
        assert_eq!(severities(&MvvmToolkit.check(&ctx)), vec![Severity::Pass]);
    }

    #[test]
    fn test_pascal_case_field_warns() {
        let ctx = context(&[(
            "LoanCalc.Shared/ViewModels/MainViewModel.cs",
            "public partial class MainViewModel\n{\n    [ObservableProperty]\n    private decimal Amount;\n}",
        )]);
        let findings = MvvmToolkit.check(&ctx);
        assert_eq!(severities(&findings), vec![Severity::Warn]);
        assert_eq!(locations(&findings), vec!["LoanCalc.Shared/ViewModels/MainViewModel.cs:4"]);
    }

    #[test]
    fn test_non_partial_files_fail_with_cap() {
        let names: Vec<String> = (0..4)
            .map(|i| format!("LoanCalc.Shared/ViewModels/Page{}ViewModel.cs", i))
            .collect();
        let entries: Vec<(&str, &str)> = names
            .iter()
            .map(|n| {
                (
                    n.as_str(),
                    "public class PageViewModel\n{\n    [RelayCommand] private void Go() { }\n}",
                )
            })
            .collect();
        let findings = MvvmToolkit.check(&context(&entries));
        assert_eq!(severities(&findings), vec![Severity::Fail; 4]);
        assert_eq!(findings[3].message, "... and 1 more files without a partial class");
        assert_eq!(
            findings[0].location,
            Some(Location::new("LoanCalc.Shared/ViewModels/Page0ViewModel.cs", 3))
        );
    }
}
