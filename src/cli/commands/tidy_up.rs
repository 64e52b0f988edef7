use anyhow::Result;

use super::{CommandResult, CommandSummary, TidySummary, context::CommandContext, helper};
use crate::cli::args::PackageArgs;
use crate::core::{file_scanner::display_path, tidy::tidy_up as tidy_dir};
use crate::issues::Issue;

pub fn tidy_up(args: PackageArgs) -> Result<CommandResult> {
    let ctx = CommandContext::new(&args.common)?;
    let mut summaries = Vec::new();
    let mut issues = Vec::new();

    for package in ctx.packages(&args.packages)? {
        let (summary, package_issues) = tidy_package(&ctx, &package);
        summaries.push(summary);
        issues.extend(package_issues);
    }

    Ok(helper::finish(CommandSummary::TidyUp(summaries), issues, false))
}

/// Delete the string-free scripts of one package's patch set.
pub fn tidy_package(ctx: &CommandContext, package: &str) -> (TidySummary, Vec<Issue>) {
    let paths = ctx.package_paths(package);
    let dir = ctx.display_patch_dir(package, &[]);
    let report = tidy_dir(&paths.patches, &ctx.config.ignores, ctx.verbose);

    let issues = helper::parse_issues_under(&dir, report.issues).collect();
    let summary = TidySummary {
        package: package.to_string(),
        dir,
        dir_missing: report.dir_missing,
        analyzed: report.analyzed,
        skipped: report.skipped,
        deleted: report.deleted.iter().map(|p| display_path(p)).collect(),
    };

    (summary, issues)
}
