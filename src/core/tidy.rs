//! Prune patch candidates that hold no translatable text.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{
    classify::has_string_literal_in_content,
    file_scanner::{display_path, scan_script_files},
};
use crate::issues::ParseErrorIssue;

#[derive(Debug, Default)]
pub struct TidyReport {
    /// The patches directory did not exist; nothing was done.
    pub dir_missing: bool,
    pub analyzed: usize,
    /// Paths the walk could not access.
    pub skipped: usize,
    /// Deleted files, relative to the tidied directory.
    pub deleted: Vec<PathBuf>,
    /// Files that could not be read, parsed or deleted. They are kept.
    pub issues: Vec<ParseErrorIssue>,
}

enum Verdict {
    Keep,
    Delete,
}

fn classify_file(path: &Path) -> anyhow::Result<Verdict> {
    let content = fs::read_to_string(path)?;
    let file_name = path.to_string_lossy();
    if has_string_literal_in_content(&content, &file_name)? {
        Ok(Verdict::Keep)
    } else {
        Ok(Verdict::Delete)
    }
}

/// Delete every script under `dir` that contains no string or template literal.
pub fn tidy_up(dir: &Path, ignore_patterns: &[String], verbose: bool) -> TidyReport {
    let mut report = TidyReport::default();

    if !dir.is_dir() {
        report.dir_missing = true;
        return report;
    }

    let scan = scan_script_files(dir, ignore_patterns, verbose);
    report.analyzed = scan.files.len();
    report.skipped = scan.skipped_count;

    for relative in scan.files {
        let path = dir.join(&relative);
        let outcome = classify_file(&path).and_then(|verdict| match verdict {
            Verdict::Keep => Ok(false),
            Verdict::Delete => fs::remove_file(&path).map(|_| true).map_err(Into::into),
        });

        match outcome {
            Ok(true) => report.deleted.push(relative),
            Ok(false) => {}
            Err(e) => report.issues.push(ParseErrorIssue {
                file_path: display_path(&relative),
                error: e.to_string(),
            }),
        }
    }

    report
}
