use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["packagesRoot"], "src/packages");
    assert_eq!(parsed["distDir"], "dist");
    assert_eq!(parsed["packages"]["impmal"]["repo"], "moo-man/ImpMal-FoundryVTT");
    assert_eq!(parsed["packages"]["impmal"]["patch"][0], "scripts");
    assert!(
        parsed["packages"]["impmal"]["overlay"]["reorder"].is_array(),
        "Default package should ship its table orders"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_snapshot!(stdout(&output).trim_end(), @"✓ Created .patchsetrc.json");
    assert!(test.root().join(".patchsetrc.json").exists());

    let content = test.read_file(".patchsetrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".patchsetrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_snapshot!(stderr(&output).trim_end(), @"Error: .patchsetrc.json already exists");
    assert_eq!(test.read_file(".patchsetrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/packages/impmal/temp/patches/en/scripts/ram.js",
        "return 'Ram';",
    )?;

    let output = test.subcommand("tidy-up").output()?;
    assert!(
        output.status.success(),
        "tidy-up should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("impmal: analyzed 1 file, deleted 0 files without strings"));

    Ok(())
}
