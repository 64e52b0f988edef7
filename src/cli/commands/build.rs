use std::fs;

use anyhow::{Context, Result};

use super::{
    BuildSummary, CommandResult, CommandSummary, HostApplySummary, PackageBuildSummary,
    context::CommandContext, helper,
};
use crate::cli::args::BuildArgs;
use crate::core::{
    build::{apply_to_host_config, copy_manifest, write_overlay, write_templates},
    overlay::{DirTemplateSource, PatchedTemplates},
};
use crate::issues::Issue;

pub fn build(args: BuildArgs) -> Result<CommandResult> {
    let ctx = CommandContext::new(&args.packages.common)?;
    let dist_dir = ctx.resolve(&ctx.config.dist_dir);

    fs::create_dir_all(&dist_dir)
        .with_context(|| format!("Failed to create directory: {}", dist_dir.display()))?;
    let manifest_copied = copy_manifest(&ctx.resolve(&ctx.config.module_manifest), &dist_dir)?;

    let mut packages = Vec::new();
    let mut issues = Vec::new();

    for package in ctx.packages(&args.packages.packages)? {
        let config = ctx.package(&package)?;
        let package_dist = dist_dir.join(&package);
        write_overlay(&config.overlay, &package_dist)?;

        let templates_written = match &args.templates_dir {
            Some(dir) => {
                let system = config.system.as_deref().unwrap_or(&package);
                let templates =
                    PatchedTemplates::new(DirTemplateSource::new(dir), system, &config.overlay);
                Some(write_templates(&templates, &package_dist)?)
            }
            None => None,
        };

        let applied = match &args.host_config {
            Some(host_config) => {
                let report = apply_to_host_config(&config.overlay, host_config, &package_dist)?;
                issues.extend(report.issues.into_iter().map(Issue::Overlay));
                Some(HostApplySummary {
                    tables_replaced: report.tables_replaced,
                    tables_reordered: report.tables_reordered,
                    labels_set: report.labels_set,
                })
            }
            None => None,
        };

        packages.push(PackageBuildSummary {
            package,
            templates_written,
            applied,
        });
    }

    let summary = BuildSummary {
        dist_dir: ctx.config.dist_dir.clone(),
        manifest_copied,
        packages,
    };

    Ok(helper::finish(CommandSummary::Build(summary), issues, false))
}
