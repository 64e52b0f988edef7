use std::path::Path;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, SyncSummary, context::CommandContext, helper};
use crate::cli::args::SyncArgs;
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    parsers::json::{parse_json_file, write_json_file},
    sync::{fetch_remote_json, merge_translations},
};

pub fn sync_translations(args: SyncArgs) -> Result<CommandResult> {
    let ctx = CommandContext::new(&args.common)?;
    let configured = ctx.config.translations.as_ref();

    let local_file = match (&args.local_file, configured) {
        (Some(path), _) => path.clone(),
        (None, Some(sync)) => ctx.resolve(&sync.local_file),
        (None, None) => anyhow::bail!(
            "No local translation file: pass --local-file or set 'translations.localFile' in {}",
            CONFIG_FILE_NAME
        ),
    };
    let remote_url = match (&args.remote_url, configured) {
        (Some(url), _) => url.clone(),
        (None, Some(sync)) => sync.remote_url.clone(),
        (None, None) => anyhow::bail!(
            "No remote translation URL: pass --remote-url or set 'translations.remoteUrl' in {}",
            CONFIG_FILE_NAME
        ),
    };

    let mut local = parse_json_file(&local_file)?;
    let remote = fetch_remote_json(&remote_url)?;
    let changes = merge_translations(&mut local, &remote);

    if !args.dry_run && !changes.is_empty() {
        write_json_file(&local_file, &local)
            .with_context(|| format!("Failed to update {}", local_file.display()))?;
    }

    let summary = SyncSummary {
        local_file: display(&local_file),
        remote_url,
        changes,
        is_dry_run: args.dry_run,
    };

    Ok(helper::finish(
        CommandSummary::SyncTranslations(summary),
        Vec::new(),
        false,
    ))
}

fn display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
