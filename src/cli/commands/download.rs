use anyhow::Result;

use super::{
    CommandResult, CommandSummary, DownloadSummary, TypeCopy, context::CommandContext, helper,
    tidy_up::tidy_package,
};
use crate::cli::args::PackageArgs;
use crate::core::download::{clone_repository, copy_patch_type, prepare_dirs, remove_dir_if_exists};
use crate::issues::Issue;

pub fn download(args: PackageArgs) -> Result<CommandResult> {
    let ctx = CommandContext::new(&args.common)?;
    let mut summaries = Vec::new();
    let mut issues = Vec::new();

    for package in ctx.packages(&args.packages)? {
        let config = ctx.package(&package)?;
        let mut summary = DownloadSummary {
            package: package.clone(),
            repo: config.repo.clone(),
            supported_version: config.supported_version.clone(),
            nothing_to_download: config.patch.is_empty(),
            types: Vec::new(),
            tidy: None,
            error: None,
        };

        if !summary.nothing_to_download
            && let Err(e) = download_package(&ctx, &mut summary, &mut issues)
        {
            summary.error = Some(format!("{:#}", e));
        }

        let failed = summary.error.is_some();
        summaries.push(summary);
        if failed {
            break;
        }
    }

    Ok(helper::finish(CommandSummary::Download(summaries), issues, true))
}

/// Clone, copy the configured directories into both patch trees, tidy up and
/// drop the clone. The clone is left behind when a step fails.
fn download_package(
    ctx: &CommandContext,
    summary: &mut DownloadSummary,
    issues: &mut Vec<Issue>,
) -> Result<()> {
    let config = ctx.package(&summary.package)?;
    let paths = ctx.package_paths(&summary.package);

    prepare_dirs(&paths)?;
    if ctx.verbose {
        eprintln!("Cloning {} into {}", config.clone_url(), paths.download.display());
    }
    clone_repository(&config.clone_url(), &paths.download)?;

    for name in &config.patch {
        let outcome = copy_patch_type(&paths, name)?;
        summary.types.push(TypeCopy {
            name: name.clone(),
            outcome,
        });
    }

    let (tidy, tidy_issues) = tidy_package(ctx, &summary.package);
    summary.tidy = Some(tidy);
    issues.extend(tidy_issues);

    remove_dir_if_exists(&paths.download)
}
