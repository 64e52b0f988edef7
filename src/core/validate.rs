//! Syntax check for translated scripts.

use std::{fs, path::Path};

use crate::core::{
    file_scanner::{display_path, scan_script_files},
    parsers::script::{SyntaxDiagnostic, parse_script_source},
};
use crate::issues::{ParseErrorIssue, SyntaxErrorIssue};

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub dir_missing: bool,
    pub files_checked: usize,
    pub skipped: usize,
    /// All diagnostics, grouped by file in scan order.
    pub errors: Vec<SyntaxErrorIssue>,
    /// Files that could not be read, so were never checked.
    pub unreadable: Vec<ParseErrorIssue>,
}

impl ValidationReport {
    pub fn files_with_errors(&self) -> usize {
        let mut files: Vec<&str> = self.errors.iter().map(|e| e.file_path.as_str()).collect();
        files.dedup();
        files.len()
    }
}

/// Collect every syntax diagnostic of a single script.
pub fn validate_source(content: &str, file_path: &str) -> Vec<SyntaxErrorIssue> {
    let diagnostics: Vec<SyntaxDiagnostic> =
        match parse_script_source(content.to_string(), file_path) {
            Ok(parsed) => parsed.recovered,
            Err(err) => vec![err.diagnostic],
        };

    let lines: Vec<&str> = content.lines().collect();
    let mut issues: Vec<SyntaxErrorIssue> = diagnostics
        .into_iter()
        .map(|d| SyntaxErrorIssue {
            file_path: file_path.to_string(),
            source_line: lines.get(d.line.wrapping_sub(1)).map(|l| l.to_string()),
            line: d.line,
            col: d.col,
            message: d.message,
        })
        .collect();
    issues.sort();
    issues.dedup();
    issues
}

/// Validate every script under `dir`. Scanning never stops at a failing file.
///
/// Reported paths are `display_prefix` joined with the path relative to `dir`.
pub fn validate_dir(
    dir: &Path,
    display_prefix: &str,
    ignore_patterns: &[String],
    verbose: bool,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !dir.is_dir() {
        report.dir_missing = true;
        return report;
    }

    let scan = scan_script_files(dir, ignore_patterns, verbose);
    report.files_checked = scan.files.len();
    report.skipped = scan.skipped_count;

    for relative in &scan.files {
        let file_path = join_display(display_prefix, &display_path(relative));
        match fs::read_to_string(dir.join(relative)) {
            Ok(content) => report.errors.extend(validate_source(&content, &file_path)),
            Err(e) => report.unreadable.push(ParseErrorIssue {
                file_path,
                error: format!("Failed to read file: {}", e),
            }),
        }
    }

    report
}

fn join_display(prefix: &str, relative: &str) -> String {
    if prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), relative)
    }
}
