use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    // 1. Parse as JSON
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    // 2. Verify expected fields exist
    let apps = parsed
        .get("apps")
        .and_then(Value::as_array)
        .context("Config should have an 'apps' array")?;
    assert_eq!(apps.len(), 1);
    assert!(
        apps[0].get("expectedIdentifier").is_some(),
        "App should have 'expectedIdentifier' field"
    );
    assert!(
        parsed.get("ignores").is_some(),
        "Config should have 'ignores' field"
    );
    assert!(
        parsed.get("disabledRules").is_some(),
        "Config should have 'disabledRules' field"
    );

    // 3. Verify formatting (2-space indentation)
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created convcheck.json

    ----- stderr -----
    ");

    // Verify file exists
    assert!(test.root().join("convcheck.json").exists());

    // Verify content is valid and has expected structure
    let content = test.read_file("convcheck.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("convcheck.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: convcheck.json already exists
    ");
    assert_eq!(test.read_file("convcheck.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    // Initialize config
    test.command().arg("init").output()?;

    // Create minimal app structure for the default app
    test.write_file(
        "MyApp/MyApp.Shared/App.axaml.cs",
        "namespace MyApp;\n\npublic partial class App { }",
    )?;

    // Verify check command works with initialized config
    assert_cmd_snapshot!(test.check_command().arg("platform-isolation"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    MyApp (1 file)
    ✓ No issues

    ✓ 1 app checked: 0 failures, 0 warnings, 0 notes

    ----- stderr -----
    ");

    Ok(())
}
