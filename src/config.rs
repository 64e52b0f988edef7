use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::overlay::{Overlay, RestPolicy, TableOrder, TemplatePatch, TextPatch};

pub const CONFIG_FILE_NAME: &str = ".patchsetrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_packages_root")]
    pub packages_root: String,
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
    #[serde(default = "default_module_manifest")]
    pub module_manifest: String,
    /// Glob patterns (relative to a patch tree) skipped by every scan.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub translations: Option<TranslationSync>,
    #[serde(default = "default_packages")]
    pub packages: BTreeMap<String, PackageConfig>,
}

/// Remote translation document merged into a local one.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationSync {
    pub local_file: String,
    pub remote_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    /// GitHub `owner/name` of the upstream system.
    pub repo: String,
    /// Upstream release the patches target, shown when downloading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_version: Option<String>,
    /// Upstream directories copied into the patch trees (e.g. `scripts`).
    #[serde(default)]
    pub patch: Vec<String>,
    /// System id used in template paths (`systems/<system>/templates/...`).
    /// Defaults to the package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default)]
    pub overlay: Overlay,
}

impl PackageConfig {
    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}", self.repo)
    }
}

fn default_packages_root() -> String {
    "src/packages".to_string()
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

fn default_module_manifest() -> String {
    "src/module.json".to_string()
}

fn default_packages() -> BTreeMap<String, PackageConfig> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let vehicle_category: serde_json::Map<String, serde_json::Value> = [
        ("wheeled", "Kołowy"),
        ("tracked", "Gąsienicowy"),
        ("flyer", "Latający"),
        ("walker", "Kroczący"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.into()))
    .collect();

    let overlay = Overlay {
        tables: [("vehicleCategory".to_string(), vehicle_category)]
            .into_iter()
            .collect(),
        reorder: vec![
            TableOrder {
                table: "skills".to_string(),
                order: strings(&[
                    "athletics",
                    "presence",
                    "dexterity",
                    "fortitude",
                    "intuition",
                    "linguistics",
                    "tech",
                    "stealth",
                    "logic",
                    "medicae",
                    "psychic",
                    "navigation",
                    "discipline",
                    "rapport",
                    "piloting",
                    "reflexes",
                    "awareness",
                    "melee",
                    "ranged",
                    "lore",
                ]),
                rest: RestPolicy::Append,
            },
            TableOrder {
                table: "actions".to_string(),
                order: strings(&[
                    "run",
                    "aim",
                    "flee",
                    "cover",
                    "shove",
                    "disengage",
                    "grapple",
                    "help",
                    "defend",
                    "seize",
                    "search",
                    "charge",
                    "hide",
                    "dodge",
                ]),
                rest: RestPolicy::Drop,
            },
        ],
        labels: [
            ("meleeTypes.power", "IMPMAL.PowerWeapon"),
            ("scriptTriggers.computeCharacteristics", "Oblicz Cechy"),
            ("scriptTriggers.computeEncumbrance", "Oblicz Obciążenie"),
            ("scriptTriggers.computeCombat", "Oblicz Walkę"),
            ("scriptTriggers.computeWarpState", "Oblicz stan Osnowy"),
            ("scriptTriggers.prepareOwnedItems", "Przygotuj posiadane Przedmioty"),
            ("scriptTriggers.prepareOwnedData", "Przygotuj posiadane Dane"),
            ("vehicleActions.crush.name", "Rozwałka"),
            ("vehicleActions.emergencyLanding.name", "Lądowanie awaryjne"),
            ("vehicleActions.evasiveManeuvers.name", "Manewry unikowe"),
            ("vehicleActions.evasiveManeuvers.effect.name", "Manewry unikowe"),
            ("vehicleActions.evasiveManeuvers.effect.label", "Manewry unikowe"),
            (
                "vehicleActions.evasiveManeuvers.effect.system.scriptData.0.label",
                "Test Pilota",
            ),
            (
                "vehicleActions.evasiveManeuvers.effect.system.scriptData.1.label",
                "Kara za manewry unikowe",
            ),
            ("vehicleActions.getInClose.name", "Jazda na zderzaku"),
            ("vehicleActions.makeTheJump.name", "Skok"),
            ("vehicleActions.ram.name", "Taranowanie"),
            ("vehicleActions.takeTheWheel.name", "Przejęcie sterowania"),
            ("vehicleActions.threadTheNeedle.name", "Ciasny manewr"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
        display: [
            (
                "vehicleActions.ram.execute".to_string(),
                vec![
                    TextPatch::new(" - Ram", " - Taranowanie"),
                    TextPatch::new("Ram Damage", "Obrażenia od taranowania"),
                ],
            ),
            (
                "vehicleActions.takeTheWheel.execute".to_string(),
                vec![TextPatch::new(" - Take the Wheel", " - Przejęcie sterowania")],
            ),
        ]
        .into_iter()
        .collect(),
        templates: Vec::<TemplatePatch>::new(),
    };

    let impmal = PackageConfig {
        repo: "moo-man/ImpMal-FoundryVTT".to_string(),
        supported_version: None,
        patch: strings(&["scripts"]),
        system: None,
        overlay,
    };

    [("impmal".to_string(), impmal)].into_iter().collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packages_root: default_packages_root(),
            dist_dir: default_dist_dir(),
            module_manifest: default_module_manifest(),
            ignores: Vec::new(),
            translations: None,
            packages: default_packages(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for (name, package) in &self.packages {
            if package.repo.trim().is_empty() || !package.repo.contains('/') {
                bail!(
                    "Package '{}' must set 'repo' as \"owner/name\", got \"{}\"",
                    name,
                    package.repo
                );
            }

            for dir in &package.patch {
                if !is_relative_subpath(dir) {
                    bail!(
                        "Package '{}' has an invalid 'patch' directory: \"{}\" (must be a relative path inside the repository)",
                        name,
                        dir
                    );
                }
            }

            for table in &package.overlay.reorder {
                let mut seen = HashSet::new();
                if let Some(dup) = table.order.iter().find(|key| !seen.insert(key.as_str())) {
                    bail!(
                        "Package '{}' lists key \"{}\" twice in the order of table '{}'",
                        name,
                        dup,
                        table.table
                    );
                }
            }
        }

        Ok(())
    }

    pub fn package(&self, name: &str) -> Result<&PackageConfig> {
        self.packages.get(name).with_context(|| {
            let known: Vec<&str> = self.packages.keys().map(String::as_str).collect();
            format!(
                "Unknown package '{}' (configured: {})",
                name,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            )
        })
    }

    /// Resolve requested package names; an empty request means all packages.
    pub fn select_packages(&self, requested: &[String]) -> Result<Vec<String>> {
        if requested.is_empty() {
            return Ok(self.packages.keys().cloned().collect());
        }
        for name in requested {
            self.package(name)?;
        }
        Ok(requested.to_vec())
    }
}

fn is_relative_subpath(dir: &str) -> bool {
    let path = Path::new(dir);
    !dir.trim().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory the configuration is relative to.
    pub root_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                root_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            root_dir: start_dir.to_path_buf(),
        }),
    }
}
