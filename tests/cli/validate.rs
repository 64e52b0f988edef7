use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_validate_clean_scripts() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("pl/scripts/ram.js", "args.actor.notify(`${name} taranuje`);")?;
    test.write_patch("pl/scripts/vehicle/wheel.js", "return 'Przejęcie sterowania';")?;

    let output = test.subcommand("validate").arg("impmal").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ impmal: checked 2 files - no syntax errors"));

    Ok(())
}

#[test]
fn test_validate_reports_errors_and_fails() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("pl/scripts/good.js", "let a = 'Atak';")?;
    test.write_patch("pl/scripts/ram.js", "let title = 'Taranowanie';\nlet x = ;\n")?;

    let output = test.subcommand("validate").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: "));
    assert!(out.contains("syntax-error"));
    assert!(out.contains("--> ./src/packages/impmal/temp/patches/pl/scripts/ram.js:2:"));
    assert!(out.contains("2 | let x = ;"));
    assert!(out.contains("✘ impmal: found 1 syntax error in 1 of 2 files"));

    Ok(())
}

#[test]
fn test_validate_keeps_scanning_after_failure() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("pl/scripts/a.js", "let x = ;")?;
    test.write_patch("pl/scripts/b.js", "const b = {;")?;
    test.write_patch("pl/scripts/c.js", "let c = 'ok';")?;

    let output = test.subcommand("validate").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("patches/pl/scripts/a.js:1:"));
    assert!(out.contains("patches/pl/scripts/b.js:1:"));
    assert!(out.contains("in 2 of 3 files"));

    Ok(())
}

#[test]
fn test_validate_missing_dir_is_not_an_error() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("en/scripts/ram.js", "let a = 'Ram';")?;

    let output = test.subcommand("validate").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains(
        "warning: ./src/packages/impmal/temp/patches/pl/scripts does not exist, nothing to validate"
    ));

    Ok(())
}
