//! Fetch a package's upstream sources into its patch trees.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Working directories of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePaths {
    /// `<packagesRoot>/<name>/temp/patches`
    pub patches: PathBuf,
    /// English copies, kept as the reference for translators.
    pub en: PathBuf,
    /// Polish copies, edited by translators.
    pub pl: PathBuf,
    /// Scratch clone, removed after a successful download.
    pub download: PathBuf,
}

impl PackagePaths {
    pub fn new(packages_root: &Path, name: &str) -> Self {
        let temp = packages_root.join(name).join("temp");
        let patches = temp.join("patches");
        Self {
            en: patches.join("en"),
            pl: patches.join("pl"),
            download: temp.join("download"),
            patches,
        }
    }
}

/// Remove a directory tree; a missing directory is fine.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

/// Clear and recreate the `en`, `pl` and scratch directories.
pub fn prepare_dirs(paths: &PackagePaths) -> Result<()> {
    for dir in [&paths.en, &paths.pl, &paths.download] {
        remove_dir_if_exists(dir)?;
    }
    for dir in [&paths.en, &paths.pl, &paths.download] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Full clone of `url` into `dest`, which must be empty or missing.
pub fn clone_repository(url: &str, dest: &Path) -> Result<()> {
    git2::Repository::clone(url, dest)
        .with_context(|| format!("Failed to clone repository {}", url))?;
    Ok(())
}

/// Recursively copy `src` into `dest`, returning the number of files copied.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("Cannot access path under {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Outcome of copying one configured directory from the clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { files: usize },
    NotFound,
}

/// Copy `<clone>/<type_dir>` into both `en/<type_dir>` and `pl/<type_dir>`.
pub fn copy_patch_type(paths: &PackagePaths, type_dir: &str) -> Result<CopyOutcome> {
    let src = paths.download.join(type_dir);
    if !src.is_dir() {
        return Ok(CopyOutcome::NotFound);
    }

    let files = copy_tree(&src, &paths.en.join(type_dir))?;
    copy_tree(&src, &paths.pl.join(type_dir))?;
    Ok(CopyOutcome::Copied { files })
}
