//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format; every command then prints
//! its own summary. Kept apart from `core` so the engine stays usable as a
//! library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    BuildSummary, CommandResult, CommandSummary, DownloadSummary, DuplicatesSummary, InitSummary,
    SyncSummary, TidySummary, ValidateSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::download::CopyOutcome;
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::utils::{count_noun, pluralize};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    report_to(&result.issues, writer);

    match &result.summary {
        CommandSummary::Download(summaries) => {
            for summary in summaries {
                print_download(summary, verbose, writer);
            }
        }
        CommandSummary::TidyUp(summaries) => {
            for summary in summaries {
                print_tidy(summary, verbose, writer);
            }
        }
        CommandSummary::Validate(summaries) => {
            for summary in summaries {
                print_validate(summary, writer);
            }
        }
        CommandSummary::FindDuplicatedLines(summaries) => {
            for summary in summaries {
                print_duplicates(summary, writer);
            }
        }
        CommandSummary::SyncTranslations(summary) => print_sync(summary, writer),
        CommandSummary::Build(summary) => print_build(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source {
            path,
            line,
            col,
            source_line,
        } => {
            let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), path, line, col);
            if let Some(source_line) = source_line {
                print_source_context(source_line, line, col, severity, writer, max_line_width);
            }
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Target { path } => {
            let _ = writeln!(
                writer,
                "{:>width$} {} {} {}",
                "",
                "=".blue(),
                "target:".bold(),
                path,
                width = max_line_width
            );
        }
    }

    let _ = writeln!(writer);
}

fn print_source_context<W: Write>(
    source_line: &str,
    line: usize,
    col: usize,
    severity: Severity,
    writer: &mut W,
    max_line_width: usize,
) {
    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // col is 1-based
    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} ({} {}, {} {})\n",
        FAILURE_MARK.red(),
        count_noun(issues.len(), "problem", "problems"),
        total_errors,
        pluralize(total_errors, "error", "errors").red(),
        total_warnings,
        pluralize(total_warnings, "warning", "warnings").yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source { line, .. } => Some(line),
            _ => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn print_notice<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), message.yellow());
}

fn print_success<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

fn print_failure<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
}

fn print_skipped<W: Write>(package: &str, skipped: usize, writer: &mut W) {
    if skipped > 0 {
        print_notice(
            &format!(
                "{}: skipped {} that could not be accessed (use --verbose for details)",
                package,
                count_noun(skipped, "path", "paths")
            ),
            writer,
        );
    }
}

// ============================================================
// Command summaries
// ============================================================

fn print_download<W: Write>(summary: &DownloadSummary, verbose: bool, writer: &mut W) {
    if summary.nothing_to_download {
        print_notice(&format!("{}: no files to download", summary.package), writer);
        return;
    }

    let _ = write!(
        writer,
        "{} {} from {}",
        "Downloading".bold(),
        summary.package,
        summary.repo
    );
    match &summary.supported_version {
        Some(version) => {
            let _ = writeln!(writer, " {}", format!("(supported version {})", version).dimmed());
        }
        None => {
            let _ = writeln!(writer);
        }
    }

    for copy in &summary.types {
        match copy.outcome {
            CopyOutcome::Copied { files } => {
                let _ = writeln!(
                    writer,
                    "  copied {} ({})",
                    copy.name,
                    count_noun(files, "file", "files")
                );
            }
            CopyOutcome::NotFound => {
                print_notice(
                    &format!("{} not found in {}, skipped", copy.name, summary.repo),
                    writer,
                );
            }
        }
    }

    if let Some(error) = &summary.error {
        print_failure(
            &format!("{}: download failed: {}", summary.package, error),
            writer,
        );
        return;
    }

    if let Some(tidy) = &summary.tidy {
        print_tidy(tidy, verbose, writer);
    }

    print_success(
        &format!(
            "{}: downloaded {}/{} {}",
            summary.package,
            summary.copied_count(),
            summary.types.len(),
            pluralize(summary.types.len(), "directory", "directories")
        ),
        writer,
    );
}

fn print_tidy<W: Write>(summary: &TidySummary, verbose: bool, writer: &mut W) {
    if summary.dir_missing {
        print_notice(
            &format!("{} does not exist, nothing to tidy up", summary.dir),
            writer,
        );
        return;
    }

    print_skipped(&summary.package, summary.skipped, writer);

    if verbose {
        for file in &summary.deleted {
            let _ = writeln!(writer, "  {} {}", "deleted".dimmed(), file.dimmed());
        }
    }

    print_success(
        &format!(
            "{}: analyzed {}, deleted {} without strings",
            summary.package,
            count_noun(summary.analyzed, "file", "files"),
            count_noun(summary.deleted.len(), "file", "files")
        ),
        writer,
    );
}

fn print_validate<W: Write>(summary: &ValidateSummary, writer: &mut W) {
    if summary.dir_missing {
        print_notice(
            &format!("{} does not exist, nothing to validate", summary.dir),
            writer,
        );
        return;
    }

    print_skipped(&summary.package, summary.skipped, writer);

    if summary.error_count == 0 {
        print_success(
            &format!(
                "{}: checked {} - no syntax errors",
                summary.package,
                count_noun(summary.files_checked, "file", "files")
            ),
            writer,
        );
    } else {
        print_failure(
            &format!(
                "{}: found {} in {} of {}",
                summary.package,
                count_noun(summary.error_count, "syntax error", "syntax errors"),
                summary.files_with_errors,
                count_noun(summary.files_checked, "file", "files")
            ),
            writer,
        );
    }
}

fn print_duplicates<W: Write>(summary: &DuplicatesSummary, writer: &mut W) {
    if summary.dir_missing {
        print_notice(
            &format!("{} does not exist, nothing to scan", summary.dir),
            writer,
        );
        return;
    }

    print_skipped(&summary.package, summary.skipped, writer);

    if summary.duplicates.is_empty() {
        print_success(
            &format!(
                "{}: no duplicated lines in {}",
                summary.package,
                count_noun(summary.files_scanned, "file", "files")
            ),
            writer,
        );
        return;
    }

    for duplicate in &summary.duplicates {
        let _ = writeln!(
            writer,
            "{}  {}",
            duplicate.line_content,
            format!("({}x)", duplicate.count()).dimmed()
        );
        for location in &duplicate.locations {
            let _ = writeln!(
                writer,
                "  {} {}/{}:{}",
                "-->".blue(),
                summary.dir,
                location.file,
                location.line_number
            );
        }
        let _ = writeln!(writer);
    }

    let _ = writeln!(
        writer,
        "{} {}: {} ({}) in {}",
        "Found".yellow().bold(),
        summary.package,
        count_noun(
            summary.duplicates.len(),
            "duplicated line",
            "duplicated lines"
        ),
        count_noun(summary.total_occurrences, "occurrence", "occurrences"),
        count_noun(summary.files_scanned, "file", "files")
    );
}

fn print_sync<W: Write>(summary: &SyncSummary, writer: &mut W) {
    for change in &summary.changes {
        let _ = writeln!(writer, "{}", change.path.bold());
        let _ = writeln!(writer, "  {} {}", "Old:".red(), change.old);
        let _ = writeln!(writer, "  {} {}", "New:".green(), change.new);
    }

    if summary.changes.is_empty() {
        print_success(
            &format!(
                "{} is up to date with {}",
                summary.local_file, summary.remote_url
            ),
            writer,
        );
    } else if summary.is_dry_run {
        let _ = writeln!(
            writer,
            "{} {} in {}",
            "Would update".yellow().bold(),
            count_noun(summary.changes.len(), "translation", "translations"),
            summary.local_file
        );
        let _ = writeln!(writer, "Run without {} to write them.", "--dry-run".cyan());
    } else {
        print_success(
            &format!(
                "Updated {} in {}",
                count_noun(summary.changes.len(), "translation", "translations"),
                summary.local_file
            ),
            writer,
        );
    }
}

fn print_build<W: Write>(summary: &BuildSummary, writer: &mut W) {
    if !summary.manifest_copied {
        print_notice("module manifest not found, skipped module.json", writer);
    }

    for package in &summary.packages {
        let mut parts = vec!["overlay.json".to_string()];
        if let Some(written) = package.templates_written {
            parts.push(count_noun(written, "template", "templates"));
        }
        if let Some(applied) = package.applied {
            let mut changes = Vec::new();
            if applied.tables_replaced > 0 {
                changes.push(format!(
                    "{} replaced",
                    count_noun(applied.tables_replaced, "table", "tables")
                ));
            }
            changes.push(format!(
                "{} reordered",
                count_noun(applied.tables_reordered, "table", "tables")
            ));
            changes.push(format!(
                "{} set",
                count_noun(applied.labels_set, "label", "labels")
            ));
            parts.push(format!("config.json ({})", changes.join(", ")));
        }
        let _ = writeln!(writer, "  {}: {}", package.package, parts.join(", "));
    }

    print_success(
        &format!(
            "Built {} into {}",
            count_noun(summary.packages.len(), "package", "packages"),
            summary.dist_dir
        ),
        writer,
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        print_success(&format!("Created {}", CONFIG_FILE_NAME), writer);
    }
    if let Some(error) = &summary.error {
        eprintln!("Error: {}", error);
    }
}

// ============================================================
// Tests
// ============================================================
