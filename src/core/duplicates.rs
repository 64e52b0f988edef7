//! Find string-bearing source lines repeated across a patch tree.
//!
//! Translators use this to spot text that is copied between scripts and can
//! be translated once.

use std::{collections::HashMap, fs, path::Path};

use crate::core::{
    classify::{contains_quote_char, has_string_literal_in_content},
    file_scanner::{display_path, scan_script_files},
};
use crate::issues::ParseErrorIssue;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineLocation {
    /// Path relative to the scanned directory, with forward slashes.
    pub file: String,
    /// 1-based.
    pub line_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatedLine {
    /// Trimmed line content.
    pub line_content: String,
    pub locations: Vec<LineLocation>,
}

impl DuplicatedLine {
    pub fn count(&self) -> usize {
        self.locations.len()
    }
}

#[derive(Debug, Default)]
pub struct DuplicatesReport {
    pub dir_missing: bool,
    pub files_scanned: usize,
    pub skipped: usize,
    pub duplicates: Vec<DuplicatedLine>,
    pub issues: Vec<ParseErrorIssue>,
}

impl DuplicatesReport {
    pub fn total_occurrences(&self) -> usize {
        self.duplicates.iter().map(DuplicatedLine::count).sum()
    }
}

/// Whether a single trimmed line holds a string.
///
/// A line on its own is often not valid syntax (an open brace, half a call),
/// so a failed parse falls back to looking for quote characters.
pub fn line_contains_string(line: &str) -> bool {
    has_string_literal_in_content(line, "line.js").unwrap_or_else(|_| contains_quote_char(line))
}

/// Trimmed, string-bearing lines of `content`, with 1-based line numbers.
pub fn extract_string_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("//") && !line.starts_with("/*"))
        .filter(|(_, line)| line_contains_string(line))
        .collect()
}

/// Group identical string-bearing lines across all scripts under `dir`.
///
/// Groups with fewer than two occurrences are dropped. Locations are sorted
/// by file then line; groups by count (descending), then content.
pub fn find_duplicated_lines(dir: &Path, ignore_patterns: &[String], verbose: bool) -> DuplicatesReport {
    let mut report = DuplicatesReport::default();

    if !dir.is_dir() {
        report.dir_missing = true;
        return report;
    }

    let scan = scan_script_files(dir, ignore_patterns, verbose);
    report.files_scanned = scan.files.len();
    report.skipped = scan.skipped_count;

    let mut line_map: HashMap<String, Vec<LineLocation>> = HashMap::new();

    for relative in &scan.files {
        let file = display_path(relative);
        let content = match fs::read_to_string(dir.join(relative)) {
            Ok(content) => content,
            Err(e) => {
                report.issues.push(ParseErrorIssue {
                    file_path: file,
                    error: e.to_string(),
                });
                continue;
            }
        };

        for (line_number, line) in extract_string_lines(&content) {
            line_map
                .entry(line.to_string())
                .or_default()
                .push(LineLocation {
                    file: file.clone(),
                    line_number,
                });
        }
    }

    let mut duplicates: Vec<DuplicatedLine> = line_map
        .into_iter()
        .filter(|(_, locations)| locations.len() >= 2)
        .map(|(line_content, mut locations)| {
            locations.sort();
            DuplicatedLine {
                line_content,
                locations,
            }
        })
        .collect();

    duplicates.sort_by(|a, b| {
        b.count()
            .cmp(&a.count())
            .then_with(|| a.line_content.cmp(&b.line_content))
    });

    report.duplicates = duplicates;
    report
}
