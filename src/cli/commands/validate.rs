use anyhow::Result;

use super::{CommandResult, CommandSummary, ValidateSummary, context::CommandContext, helper};
use crate::cli::args::PackageArgs;
use crate::core::validate::validate_dir;
use crate::issues::Issue;

pub fn validate(args: PackageArgs) -> Result<CommandResult> {
    let ctx = CommandContext::new(&args.common)?;
    let mut summaries = Vec::new();
    let mut issues = Vec::new();

    for package in ctx.packages(&args.packages)? {
        let paths = ctx.package_paths(&package);
        let dir = ctx.display_patch_dir(&package, &["pl", "scripts"]);
        let report = validate_dir(
            &paths.pl.join("scripts"),
            &dir,
            &ctx.config.ignores,
            ctx.verbose,
        );

        summaries.push(ValidateSummary {
            package,
            dir,
            dir_missing: report.dir_missing,
            files_checked: report.files_checked,
            skipped: report.skipped,
            files_with_errors: report.files_with_errors(),
            error_count: report.errors.len(),
        });
        issues.extend(report.errors.into_iter().map(Issue::SyntaxError));
        issues.extend(report.unreadable.into_iter().map(Issue::ParseError));
    }

    Ok(helper::finish(CommandSummary::Validate(summaries), issues, true))
}
