//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `download`: Clone a package's upstream repository into its patch trees
//! - `tidy-up`: Delete patch scripts that contain no strings
//! - `validate`: Syntax-check the translated scripts
//! - `find-duplicated-lines`: Report string-bearing lines repeated across scripts
//! - `sync-translations`: Merge upstream translations into the local file
//! - `build`: Assemble the distributable overlay
//! - `init`: Initialize patchset configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Download(cmd))
            | Some(Command::TidyUp(cmd))
            | Some(Command::Validate(cmd))
            | Some(Command::FindDuplicatedLines(cmd)) => cmd.common.verbose,
            Some(Command::SyncTranslations(cmd)) => cmd.common.verbose,
            Some(Command::Build(cmd)) => cmd.packages.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root used to find .patchsetrc.json (defaults to the current directory)
    #[arg(long, env = "PATCHSET_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments of commands that operate per package.
#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
    /// Packages to process (default: all configured packages)
    pub packages: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Print the changes without writing the local file
    #[arg(long)]
    pub dry_run: bool,

    /// Remote JSON document (overrides config file)
    #[arg(long)]
    pub remote_url: Option<String>,

    /// Local JSON document (overrides config file)
    #[arg(long)]
    pub local_file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub packages: PackageArgs,

    /// Local checkout of the system serving `systems/<system>/templates/...`
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// JSON dump of the host configuration to apply the overlay to
    #[arg(long)]
    pub host_config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clone the upstream system and copy its patchable files into temp/patches
    Download(PackageArgs),
    /// Delete patch scripts that contain no string or template literals
    TidyUp(PackageArgs),
    /// Check the translated scripts in temp/patches/pl/scripts for syntax errors
    Validate(PackageArgs),
    /// List string-bearing lines that repeat across temp/patches/en/scripts
    FindDuplicatedLines(PackageArgs),
    /// Merge the upstream translation file into the local one
    SyncTranslations(SyncArgs),
    /// Assemble the distributable overlay in the dist directory
    Build(BuildArgs),
    /// Initialize a new .patchsetrc.json configuration file
    Init,
}
