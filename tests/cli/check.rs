use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const CONFIG: &str = r#"{
  "apps": [
    { "name": "LoanCalc", "expectedIdentifier": "com.example.loancalc" }
  ]
}"#;

const APP: &str = r#"namespace LoanCalc;

public partial class App : Application
{
}"#;

const VIBRATE: &str = "using Android.OS;\n\nnamespace LoanCalc.Services;";

fn workspace(extra: &[(&str, &str)]) -> Result<CliTest> {
    let test = CliTest::with_files(&[
        ("convcheck.json", CONFIG),
        ("Directory.Build.props", "<Project>\n</Project>"),
        ("LoanCalc/LoanCalc.Shared/App.axaml.cs", APP),
    ])?;
    for (path, content) in extra {
        test.write_file(path, content)?;
    }
    Ok(test)
}

#[test]
fn test_warnings_do_not_fail_the_run() -> Result<()> {
    let test = workspace(&[(
        "LoanCalc/LoanCalc.Shared/Services/Clock.cs",
        "namespace LoanCalc.Services;\n\nclass Clock { void Tick() { Console.WriteLine(1); } }",
    )])?;

    assert_cmd_snapshot!(test.check_command().arg("debug-output"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    LoanCalc (2 files)
    warn: Debug output left in shared code  debug-output
      --> LoanCalc/LoanCalc.Shared/Services/Clock.cs:3

    ✓ 1 app checked: 0 failures, 1 warning, 0 notes

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_failure_exits_with_one() -> Result<()> {
    let test = workspace(&[("LoanCalc/LoanCalc.Shared/Services/Vibrate.cs", VIBRATE)])?;

    assert_cmd_snapshot!(test.check_command().arg("platform-isolation"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    LoanCalc (2 files)
    fail: Platform namespace imported in shared code  platform-isolation
      --> LoanCalc/LoanCalc.Shared/Services/Vibrate.cs:1

    ✘ 1 app checked: 1 failure, 0 warnings, 0 notes

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_marker_suppresses_the_failure() -> Result<()> {
    let test = workspace(&[(
        "LoanCalc/LoanCalc.Shared/Services/Vibrate.cs",
        "// convcheck-ignore platform-isolation\nusing Android.OS;\n\nnamespace LoanCalc.Services;",
    )])?;

    assert_cmd_snapshot!(test.check_command().arg("platform-isolation"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    LoanCalc (2 files)
    ✓ No issues

    ✓ 1 app checked: 0 failures, 0 warnings, 0 notes

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_trailing_marker_leaves_the_next_line_checked() -> Result<()> {
    let test = workspace(&[(
        "LoanCalc/LoanCalc.Shared/Services/Vibrate.cs",
        "using System; // convcheck-ignore platform-isolation\nusing Android.OS;",
    )])?;

    assert_cmd_snapshot!(test.check_command().arg("platform-isolation"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    LoanCalc (2 files)
    fail: Platform namespace imported in shared code  platform-isolation
      --> LoanCalc/LoanCalc.Shared/Services/Vibrate.cs:2

    ✘ 1 app checked: 1 failure, 0 warnings, 0 notes

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_strict_fails_on_warnings() -> Result<()> {
    let test = workspace(&[])?;

    // No .csproj in the app is a warning.
    assert_cmd_snapshot!(test.check_command().args(["project-file", "--strict"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    LoanCalc (1 file)
    warn: No .csproj project files found  project-file

    ✘ 1 app checked: 0 failures, 1 warning, 0 notes

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_rule_filter_verbose() -> Result<()> {
    let test = workspace(&[])?;
    let root = test.root_filter();

    insta::with_settings!({filters => vec![(root.as_str(), "[TEMP]")]}, {
        assert_cmd_snapshot!(test.check_command().args(["todo-markers", "-v"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        LoanCalc (1 file)
        pass: No TODO/FIXME/HACK markers  todo-markers

        ✓ 1 app checked: 0 failures, 0 warnings, 0 notes

        ----- stderr -----
        note: Checking LoanCalc at [TEMP]/LoanCalc
        ");
    });

    Ok(())
}

#[test]
fn test_disabled_rules_from_config() -> Result<()> {
    let test = workspace(&[])?;
    test.write_file(
        "convcheck.json",
        r#"{
  "apps": [{ "name": "LoanCalc", "expectedIdentifier": "com.example.loancalc" }],
  "disabledRules": ["project-file"]
}"#,
    )?;

    assert_cmd_snapshot!(
        test.check_command().args(["project-file", "platform-isolation", "--strict"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    LoanCalc (1 file)
    ✓ No issues

    ✓ 1 app checked: 0 failures, 0 warnings, 0 notes

    ----- stderr -----
    "
    );

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = workspace(&[("LoanCalc/LoanCalc.Shared/Services/Vibrate.cs", VIBRATE)])?;

    assert_cmd_snapshot!(
        test.check_command().args(["platform-isolation", "--format", "json"]),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    {
      "global": [],
      "apps": [
        {
          "app": "LoanCalc",
          "path": "LoanCalc",
          "filesChecked": 2,
          "findings": [
            {
              "severity": "fail",
              "category": "platform-isolation",
              "message": "Platform namespace imported in shared code",
              "location": {
                "path": "LoanCalc.Shared/Services/Vibrate.cs",
                "line": 1
              }
            }
          ]
        }
      ]
    }

    ----- stderr -----
    "#
    );

    Ok(())
}

#[test]
fn test_config_found_from_nested_root() -> Result<()> {
    let test = workspace(&[])?;

    assert_cmd_snapshot!(
        test.check_command()
            .args(["platform-isolation", "--root", "LoanCalc/LoanCalc.Shared"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    LoanCalc (1 file)
    ✓ No issues

    ✓ 1 app checked: 0 failures, 0 warnings, 0 notes

    ----- stderr -----
    "
    );

    Ok(())
}

#[test]
fn test_missing_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    let root = test.root_filter();

    insta::with_settings!({filters => vec![(root.as_str(), "[TEMP]")]}, {
        assert_cmd_snapshot!(test.check_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: No convcheck.json found in [TEMP] or its parents (run `convcheck init` to create one)
        ");
    });

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_files(&[("convcheck.json", r#"{ "ignores": ["[unclosed"] }"#)])?;

    insta::with_settings!({filters => vec![(r#"("\[unclosed"): .*"#, "$1: [GLOB ERROR]")]}, {
        assert_cmd_snapshot!(test.check_command(), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Invalid glob pattern in 'ignores': "[unclosed": [GLOB ERROR]
        "#);
    });

    Ok(())
}

#[test]
fn test_unknown_app_is_an_error() -> Result<()> {
    let test = workspace(&[])?;

    assert_cmd_snapshot!(test.check_command().args(["--app", "Timer"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Unknown app 'Timer' (declared: LoanCalc)
    ");

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("--help"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    A fast CLI tool for checking house conventions across a family of Avalonia/.NET apps

    Usage: convcheck [COMMAND]

    Commands:
      check  Check apps against the house conventions (layout, async, DI, views, localization, ...)
      init   Initialize a new convcheck.json configuration file
      rules  List rule categories in execution order
      help   Print this message or the help of the given subcommand(s)

    Options:
      -h, --help     Print help
      -V, --version  Print version

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_rules_command() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("rules"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    build-config           workspace
    package-versions       workspace
    project-structure      app
    project-file           app
    android-manifest       app
    platform-isolation     app
    debug-output           app
    async-void             app
    blocking-calls         app
    exception-handling     app
    persistence            app
    http-client            app
    di-registration        app
    service-locator        app
    view-pairing           app
    tab-consistency        app
    compiled-bindings      app
    mvvm-toolkit           app
    localization-parity    app
    localization-keys      app
    hardcoded-text         app
    ads                    app
    namespaces             app
    todo-markers           app

    ----- stderr -----
    ");

    Ok(())
}
