//! Root component dependencies vs. service registrations.
//!
//! Every type the root component asks for in its constructor must be
//! registered in the service-configuration function, or resolving the root
//! fails at startup. Registrations nobody consumes are fine.

use std::collections::BTreeSet;

use super::Checker;
use crate::{
    core::{
        CheckContext, SourceFile,
        extract::{
            code::declares_class,
            di::{constructor_dependencies, defines_function, registrations},
        },
    },
    findings::{Category, Finding, Findings},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DiRegistration;

/// Constructor dependencies of `root` minus the types registered by
/// `function`, in name order.
///
/// `root_files` are all files declaring `root`; partial classes may keep the
/// constructor in any of them, and the widest constructor wins.
pub fn unregistered_dependencies(
    root_files: &[&SourceFile],
    root: &str,
    config_files: &[&SourceFile],
    function: &str,
) -> (BTreeSet<String>, Vec<String>) {
    let dependencies = root_files
        .iter()
        .map(|file| constructor_dependencies(file, root))
        .max_by_key(BTreeSet::len)
        .unwrap_or_default();
    let registered: BTreeSet<String> = config_files
        .iter()
        .flat_map(|file| registrations(file, function))
        .collect();
    let missing = dependencies.difference(&registered).cloned().collect();
    (dependencies, missing)
}

impl Checker for DiRegistration {
    fn category(&self) -> Category {
        Category::DiRegistration
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());
        let root = &ctx.app.root_component;
        let function = &ctx.app.service_configuration;

        let root_files: Vec<&SourceFile> = ctx
            .code_files()
            .filter(|f| declares_class(f, root))
            .collect();
        if root_files.is_empty() {
            sink.info(format!("Root component {} not found; registrations not checked", root));
            return sink.into_vec();
        }

        let config_files: Vec<&SourceFile> = ctx
            .code_files()
            .filter(|f| defines_function(f, function))
            .collect();
        if config_files.is_empty() {
            sink.info(format!(
                "Service configuration {}() not found; registrations not checked",
                function
            ));
            return sink.into_vec();
        }

        let (dependencies, missing) =
            unregistered_dependencies(&root_files, root, &config_files, function);
        for name in &missing {
            sink.warn(format!(
                "{} depends on {}, which is not registered in {}()",
                root, name, function
            ));
        }

        if missing.is_empty() {
            sink.pass(format!(
                "All {} constructor dependencies of {} are registered",
                dependencies.len(),
                root
            ));
        }
        sink.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        findings::Severity,
        rules::test_support::{context, messages, severities},
    };

    const ROOT: &str = r#"namespace LoanCalc.ViewModels;

public partial class MainViewModel : ViewModelBase
{
    public MainViewModel(IRateService rates, ISettingsStore settings, IClock clock)
    {
    }
}"#;

    fn app_with(registrations: &[&str]) -> String {
        let lines: Vec<String> = registrations
            .iter()
            .map(|r| format!("        services.AddSingleton<{}, {}Impl>();", r, r))
            .collect();
        format!(
            "public partial class App\n{{\n    private static void ConfigureServices(IServiceCollection services)\n    {{\n{}\n        services.AddTransient<MainViewModel>();\n    }}\n}}",
            lines.join("\n")
        )
    }

    #[test]
    fn test_one_warning_per_unregistered_dependency() {
        let app = app_with(&["IRateService", "ISettingsStore"]);
        let ctx = context(&[
            ("LoanCalc.Shared/ViewModels/MainViewModel.cs", ROOT),
            ("LoanCalc.Shared/App.axaml.cs", &app),
        ]);
        let findings = DiRegistration.check(&ctx);
        assert_eq!(severities(&findings), vec![Severity::Warn]);
        assert_eq!(
            messages(&findings),
            vec!["MainViewModel depends on IClock, which is not registered in ConfigureServices()"]
        );
    }

    #[test]
    fn test_registering_the_missing_dependency_passes() {
        let app = app_with(&["IRateService", "ISettingsStore", "IClock", "IUnused"]);
        let ctx = context(&[
            ("LoanCalc.Shared/ViewModels/MainViewModel.cs", ROOT),
            ("LoanCalc.Shared/App.axaml.cs", &app),
        ]);
        let findings = DiRegistration.check(&ctx);
        assert_eq!(severities(&findings), vec![Severity::Pass]);
        assert_eq!(
            messages(&findings),
            vec!["All 3 constructor dependencies of MainViewModel are registered"]
        );
    }

    #[test]
    fn test_constructor_in_a_later_partial_file() {
        let commands = "public partial class MainViewModel\n{\n    [RelayCommand]\n    private void Refresh() { }\n}";
        let app = app_with(&["IRateService", "ISettingsStore"]);
        let ctx = context(&[
            ("LoanCalc.Shared/ViewModels/MainViewModel.Commands.cs", commands),
            ("LoanCalc.Shared/ViewModels/MainViewModel.cs", ROOT),
            ("LoanCalc.Shared/App.axaml.cs", &app),
        ]);
        let findings = DiRegistration.check(&ctx);
        assert_eq!(
            messages(&findings),
            vec!["MainViewModel depends on IClock, which is not registered in ConfigureServices()"]
        );
    }

    #[test]
    fn test_missing_root_or_configuration_is_info() {
        let app = app_with(&["IClock"]);
        let ctx = context(&[("LoanCalc.Shared/App.axaml.cs", &app)]);
        assert_eq!(severities(&DiRegistration.check(&ctx)), vec![Severity::Info]);

        let ctx = context(&[("LoanCalc.Shared/ViewModels/MainViewModel.cs", ROOT)]);
        let findings = DiRegistration.check(&ctx);
        assert_eq!(severities(&findings), vec![Severity::Info]);
        assert!(findings[0].message.contains("ConfigureServices()"));
    }

    #[test]
    fn test_parameterless_root_has_nothing_to_register() {
        let ctx = context(&[
            (
                "LoanCalc.Shared/ViewModels/MainViewModel.cs",
                "public class MainViewModel { }",
            ),
            ("LoanCalc.Shared/App.axaml.cs", &app_with(&[])),
        ]);
        assert_eq!(severities(&DiRegistration.check(&ctx)), vec![Severity::Pass]);
    }
}
