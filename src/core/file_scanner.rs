use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Result of scanning a patch tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Script files relative to the scan root, sorted.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Recursively collect `.js` files under `root`.
///
/// `ignore_patterns` are glob patterns matched against the path relative to
/// `root` (e.g. `**/*.min.js`). A missing root yields an empty result.
pub fn scan_script_files(root: &Path, ignore_patterns: &[String], verbose: bool) -> ScanResult {
    let mut result = ScanResult::default();

    if !root.is_dir() {
        return result;
    }

    let mut patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        }
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_script_file(entry.path()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        let relative_str = relative.to_string_lossy();
        if patterns.iter().any(|p| p.matches(&relative_str)) {
            continue;
        }

        result.files.push(relative.to_path_buf());
    }

    result.files.sort();
    result
}

fn is_script_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("js")
}

/// Display form of a relative path, always with forward slashes.
pub fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
