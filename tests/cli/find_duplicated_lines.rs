use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_find_duplicated_lines() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch(
        "en/scripts/a.js",
        "let roll = 5;\nthis.script.notification(\"Done\");\n  return 'Ram';\n",
    )?;
    test.write_patch(
        "en/scripts/b.js",
        "// this.script.notification(\"Done\");\nthis.script.notification(\"Done\");\nlet roll = 5;\n",
    )?;
    test.write_patch("en/scripts/vehicle/c.js", "return 'Ram';\n")?;

    let output = test
        .subcommand("find-duplicated-lines")
        .arg("impmal")
        .output()?;

    assert!(output.status.success());
    let out = stdout(&output);

    assert!(out.contains("return 'Ram';  (2x)"));
    assert!(out.contains("--> ./src/packages/impmal/temp/patches/en/scripts/a.js:3"));
    assert!(out.contains("--> ./src/packages/impmal/temp/patches/en/scripts/vehicle/c.js:1"));
    assert!(out.contains("this.script.notification(\"Done\");  (2x)"));
    assert!(out.contains("--> ./src/packages/impmal/temp/patches/en/scripts/a.js:2"));
    assert!(out.contains("--> ./src/packages/impmal/temp/patches/en/scripts/b.js:2"));
    assert!(!out.contains("let roll = 5;"));
    assert!(!out.contains("b.js:1"));
    assert!(out.contains("Found impmal: 2 duplicated lines (4 occurrences) in 3 files"));

    Ok(())
}

#[test]
fn test_duplicate_groups_ordered_by_count() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("en/scripts/a.js", "label = 'A';\nlabel = 'B';\n")?;
    test.write_patch("en/scripts/b.js", "label = 'B';\nlabel = 'A';\n")?;
    test.write_patch("en/scripts/c.js", "label = 'B';\n")?;

    let output = test.subcommand("find-duplicated-lines").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    let b = out.find("label = 'B';  (3x)").expect("group B should be listed");
    let a = out.find("label = 'A';  (2x)").expect("group A should be listed");
    assert!(b < a, "larger groups come first:\n{}", out);

    Ok(())
}

#[test]
fn test_no_duplicates() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("en/scripts/a.js", "let a = 'Aim';\n")?;
    test.write_patch("en/scripts/b.js", "let b = 'Run';\n")?;

    let output = test.subcommand("find-duplicated-lines").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ impmal: no duplicated lines in 2 files"));

    Ok(())
}

#[test]
fn test_missing_scripts_dir() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.subcommand("find-duplicated-lines").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains(
        "warning: ./src/packages/impmal/temp/patches/en/scripts does not exist, nothing to scan"
    ));

    Ok(())
}
