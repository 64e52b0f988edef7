use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_tidy_up_deletes_string_free_scripts() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("en/scripts/ram.js", "args.actor.notify(`${name} rams`);")?;
    test.write_patch("en/scripts/aim.js", "args.modifier += 10;")?;
    test.write_patch("pl/scripts/ram.js", "args.actor.notify(`${name} taranuje`);")?;
    test.write_patch("pl/scripts/aim.js", "args.modifier += 10;")?;
    test.write_patch("pl/scripts/vehicle/comment.js", "// 'not a string'\nlet x = 1;")?;

    let output = test.subcommand("tidy-up").arg("impmal").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("impmal: analyzed 5 files, deleted 3 files without strings"));
    assert!(test.patch_exists("en/scripts/ram.js"));
    assert!(test.patch_exists("pl/scripts/ram.js"));
    assert!(!test.patch_exists("en/scripts/aim.js"));
    assert!(!test.patch_exists("pl/scripts/aim.js"));
    assert!(!test.patch_exists("pl/scripts/vehicle/comment.js"));

    Ok(())
}

#[test]
fn test_tidy_up_verbose_lists_deleted_files() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("en/scripts/aim.js", "args.modifier += 10;")?;

    let output = test.subcommand("tidy-up").arg("-v").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("deleted en/scripts/aim.js"));

    Ok(())
}

#[test]
fn test_tidy_up_missing_patches_dir() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.subcommand("tidy-up").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains(
        "warning: ./src/packages/impmal/temp/patches does not exist, nothing to tidy up"
    ));

    Ok(())
}

#[test]
fn test_tidy_up_keeps_unparseable_files() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_patch("en/scripts/broken.js", "let x = ;")?;

    let output = test.subcommand("tidy-up").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("parse-error"));
    assert!(out.contains("--> ./src/packages/impmal/temp/patches/en/scripts/broken.js"));
    assert!(test.patch_exists("en/scripts/broken.js"));

    Ok(())
}

#[test]
fn test_tidy_up_respects_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".patchsetrc.json",
        r#"{
  "ignores": ["**/generated/**"],
  "packages": { "impmal": { "repo": "moo-man/ImpMal-FoundryVTT", "patch": ["scripts"] } }
}"#,
    )?;
    test.write_patch("en/scripts/generated/aim.js", "args.modifier += 10;")?;

    let output = test.subcommand("tidy-up").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("analyzed 0 files"));
    assert!(test.patch_exists("en/scripts/generated/aim.js"));

    Ok(())
}
