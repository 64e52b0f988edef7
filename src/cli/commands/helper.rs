use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, ParseErrorIssue, Severity};

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>, exit_on_errors: bool) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    match &summary {
        CommandSummary::Init(summary) if summary.error.is_some() => error_count += 1,
        CommandSummary::Download(packages) => {
            error_count += packages.iter().filter(|p| p.error.is_some()).count();
        }
        _ => {}
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
    }
}

/// Re-root issue paths reported relative to a scanned directory.
pub fn parse_issues_under(dir: &str, issues: Vec<ParseErrorIssue>) -> impl Iterator<Item = Issue> {
    let dir = dir.trim_end_matches('/').to_string();
    issues.into_iter().map(move |mut issue| {
        issue.file_path = format!("{}/{}", dir, issue.file_path);
        Issue::ParseError(issue)
    })
}
