use crate::core::{download::CopyOutcome, duplicates::DuplicatedLine, sync::TranslationChange};
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Download(Vec<DownloadSummary>),
    TidyUp(Vec<TidySummary>),
    Validate(Vec<ValidateSummary>),
    FindDuplicatedLines(Vec<DuplicatesSummary>),
    SyncTranslations(SyncSummary),
    Build(BuildSummary),
    Init(InitSummary),
}

/// One configured upstream directory and what happened to it.
#[derive(Debug)]
pub struct TypeCopy {
    pub name: String,
    pub outcome: CopyOutcome,
}

#[derive(Debug)]
pub struct DownloadSummary {
    pub package: String,
    pub repo: String,
    /// Upstream release the patches were written against.
    pub supported_version: Option<String>,
    /// The package configures no directories to copy.
    pub nothing_to_download: bool,
    pub types: Vec<TypeCopy>,
    /// Tidy-up pass run after copying; `None` if the download stopped early.
    pub tidy: Option<TidySummary>,
    /// Set when a step failed and the command stopped.
    pub error: Option<String>,
}

impl DownloadSummary {
    pub fn copied_count(&self) -> usize {
        self.types
            .iter()
            .filter(|t| matches!(t.outcome, CopyOutcome::Copied { .. }))
            .count()
    }
}

#[derive(Debug)]
pub struct TidySummary {
    pub package: String,
    /// Display form of the tidied directory.
    pub dir: String,
    pub dir_missing: bool,
    pub analyzed: usize,
    /// Paths the scan could not access.
    pub skipped: usize,
    /// Deleted files, relative to `dir`.
    pub deleted: Vec<String>,
}

#[derive(Debug)]
pub struct ValidateSummary {
    pub package: String,
    pub dir: String,
    pub dir_missing: bool,
    pub files_checked: usize,
    pub skipped: usize,
    pub files_with_errors: usize,
    pub error_count: usize,
}

#[derive(Debug)]
pub struct DuplicatesSummary {
    pub package: String,
    pub dir: String,
    pub dir_missing: bool,
    pub files_scanned: usize,
    pub skipped: usize,
    pub duplicates: Vec<DuplicatedLine>,
    pub total_occurrences: usize,
}

#[derive(Debug)]
pub struct SyncSummary {
    pub local_file: String,
    pub remote_url: String,
    pub changes: Vec<TranslationChange>,
    pub is_dry_run: bool,
}

#[derive(Debug)]
pub struct PackageBuildSummary {
    pub package: String,
    pub templates_written: Option<usize>,
    /// Set when a host config was applied.
    pub applied: Option<HostApplySummary>,
}

#[derive(Debug, Clone, Copy)]
pub struct HostApplySummary {
    pub tables_replaced: usize,
    pub tables_reordered: usize,
    pub labels_set: usize,
}

#[derive(Debug)]
pub struct BuildSummary {
    pub dist_dir: String,
    pub manifest_copied: bool,
    pub packages: Vec<PackageBuildSummary>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running patchset commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (informational commands).
    pub exit_on_errors: bool,
    /// Issues collected while running, printed cargo-style.
    pub issues: Vec<Issue>,
}
