use anyhow::Result;

use super::{CommandResult, CommandSummary, DuplicatesSummary, context::CommandContext, helper};
use crate::cli::args::PackageArgs;
use crate::core::duplicates::find_duplicated_lines as find_in_dir;

pub fn find_duplicated_lines(args: PackageArgs) -> Result<CommandResult> {
    let ctx = CommandContext::new(&args.common)?;
    let mut summaries = Vec::new();
    let mut issues = Vec::new();

    for package in ctx.packages(&args.packages)? {
        let paths = ctx.package_paths(&package);
        let dir = ctx.display_patch_dir(&package, &["en", "scripts"]);
        let report = find_in_dir(&paths.en.join("scripts"), &ctx.config.ignores, ctx.verbose);

        let total_occurrences = report.total_occurrences();
        issues.extend(helper::parse_issues_under(&dir, report.issues));
        summaries.push(DuplicatesSummary {
            package,
            dir,
            dir_missing: report.dir_missing,
            files_scanned: report.files_scanned,
            skipped: report.skipped,
            duplicates: report.duplicates,
            total_occurrences,
        });
    }

    Ok(helper::finish(
        CommandSummary::FindDuplicatedLines(summaries),
        issues,
        false,
    ))
}
