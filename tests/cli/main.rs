use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod build;
mod find_duplicated_lines;
mod init;
mod sync_translations;
mod tidy_up;
mod validate;

const BIN_NAME: &str = "patchset";

/// Config with a single `impmal` package and no overlay.
pub const MINIMAL_CONFIG: &str = r#"{
  "packagesRoot": "src/packages",
  "packages": {
    "impmal": { "repo": "moo-man/ImpMal-FoundryVTT", "patch": ["scripts"] }
  }
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Project with `MINIMAL_CONFIG` written to `.patchsetrc.json`.
    pub fn with_config() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".patchsetrc.json", MINIMAL_CONFIG)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write a file inside the `impmal` patch set, e.g. `en/scripts/ram.js`.
    pub fn write_patch(&self, path: &str, content: &str) -> Result<()> {
        self.write_file(&format!("src/packages/impmal/temp/patches/{}", path), content)
    }

    pub fn patch_exists(&self, path: &str) -> bool {
        self.project_dir
            .join("src/packages/impmal/temp/patches")
            .join(path)
            .exists()
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn subcommand(&self, name: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg(name);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    for command in [
        "download",
        "tidy-up",
        "validate",
        "find-duplicated-lines",
        "sync-translations",
        "build",
        "init",
    ] {
        assert!(out.contains(command), "help should list {}", command);
    }

    Ok(())
}

#[test]
fn test_unknown_package_is_an_error() -> Result<()> {
    let test = CliTest::with_config()?;
    let output = test.subcommand("tidy-up").arg("wfrp4e").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown package 'wfrp4e' (configured: impmal)"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".patchsetrc.json",
        r#"{ "packages": { "impmal": { "repo": "impmal", "patch": ["scripts"] } } }"#,
    )?;

    let output = test.subcommand("validate").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("must set 'repo' as \"owner/name\""));

    Ok(())
}

#[test]
fn test_sync_without_translation_source_is_an_error() -> Result<()> {
    let test = CliTest::with_config()?;
    let output = test.subcommand("sync-translations").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No local translation file"));

    Ok(())
}

#[test]
fn test_download_without_patch_dirs() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".patchsetrc.json",
        r#"{ "packages": { "impmal": { "repo": "moo-man/ImpMal-FoundryVTT", "patch": [] } } }"#,
    )?;

    let output = test.subcommand("download").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("warning: impmal: no files to download"));
    assert!(!test.root().join("src/packages/impmal/temp").exists());

    Ok(())
}
