/// Main entry point for the patchset CLI.
///
/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with error/warning counts and exit behavior
/// - `Err` if the command fails (e.g., config invalid, network error)
use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{
        build::build, download::download, find_duplicated_lines::find_duplicated_lines,
        init::init, sync_translations::sync_translations, tidy_up::tidy_up, validate::validate,
    },
};
use anyhow::Result;

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Download(cmd)) => download(cmd),
        Some(Command::TidyUp(cmd)) => tidy_up(cmd),
        Some(Command::Validate(cmd)) => validate(cmd),
        Some(Command::FindDuplicatedLines(cmd)) => find_duplicated_lines(cmd),
        Some(Command::SyncTranslations(cmd)) => sync_translations(cmd),
        Some(Command::Build(cmd)) => build(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
