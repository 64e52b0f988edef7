use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use crate::cli::args::CommonArgs;
use crate::config::{CONFIG_FILE_NAME, Config, PackageConfig, load_config};
use crate::core::PackagePaths;

/// Configuration and resolved roots shared by every command.
pub struct CommandContext {
    pub config: Config,
    /// Directory holding the configuration file (or the start directory).
    pub root_dir: PathBuf,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let start_dir = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let config_result = load_config(&start_dir)?;

        if args.verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        Ok(Self {
            config: config_result.config,
            root_dir: config_result.root_dir,
            verbose: args.verbose,
        })
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let p = Path::new(configured);
        if p.is_absolute() {
            return p.to_path_buf();
        }
        let is_cur_dir = self
            .root_dir
            .components()
            .all(|c| matches!(c, Component::CurDir));
        if is_cur_dir {
            p.to_path_buf()
        } else {
            let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
            self.root_dir.join(rel)
        }
    }

    pub fn package_paths(&self, package: &str) -> PackagePaths {
        PackagePaths::new(&self.resolve(&self.config.packages_root), package)
    }

    pub fn package(&self, name: &str) -> Result<&PackageConfig> {
        self.config.package(name)
    }

    /// Requested packages, or every configured one when none are named.
    pub fn packages(&self, requested: &[String]) -> Result<Vec<String>> {
        self.config.select_packages(requested)
    }

    /// Display form of a directory inside a package's patch set, e.g.
    /// `./src/packages/impmal/temp/patches/en/scripts`.
    pub fn display_patch_dir(&self, package: &str, rest: &[&str]) -> String {
        let root = self
            .config
            .packages_root
            .trim_start_matches("./")
            .trim_end_matches('/');
        let mut display = format!("./{}/{}/temp/patches", root, package);
        for part in rest {
            display.push('/');
            display.push_str(part);
        }
        display
    }
}
