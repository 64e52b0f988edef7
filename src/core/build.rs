//! Assemble the distributable overlay directory.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::overlay::{ApplyReport, Overlay, PatchedTemplates, TemplateSource};
use crate::core::parsers::json::write_json_file;

/// Copy the module manifest into `dist_dir` as `module.json`.
///
/// Returns false when the manifest does not exist.
pub fn copy_manifest(manifest: &Path, dist_dir: &Path) -> Result<bool> {
    if !manifest.is_file() {
        return Ok(false);
    }

    fs::create_dir_all(dist_dir)
        .with_context(|| format!("Failed to create directory: {}", dist_dir.display()))?;
    fs::copy(manifest, dist_dir.join("module.json"))
        .with_context(|| format!("Failed to copy {}", manifest.display()))?;
    Ok(true)
}

pub fn write_overlay(overlay: &Overlay, package_dist: &Path) -> Result<()> {
    let value = serde_json::to_value(overlay).context("Failed to serialize overlay")?;
    write_json_file(&package_dist.join("overlay.json"), &value)
}

/// Render every patched template into `<package_dist>/templates/<path>.hbs`.
///
/// Returns the number of templates written.
pub fn write_templates<S: TemplateSource>(
    templates: &PatchedTemplates<S>,
    package_dist: &Path,
) -> Result<usize> {
    let mut written = 0;

    for path in templates.paths() {
        let html = templates.render(path)?;
        let target = package_dist.join("templates").join(format!("{}.hbs", path));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target, html)
            .with_context(|| format!("Failed to write template: {}", target.display()))?;
        written += 1;
    }

    Ok(written)
}

/// Load a JSON dump of the host configuration, apply the overlay and write
/// the result to `<package_dist>/config.json`.
pub fn apply_to_host_config(
    overlay: &Overlay,
    host_config: &Path,
    package_dist: &Path,
) -> Result<ApplyReport> {
    let content = fs::read_to_string(host_config)
        .with_context(|| format!("Failed to read host config: {}", host_config.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse host config: {}", host_config.display()))?;

    let Value::Object(mut config) = value else {
        bail!(
            "Host config '{}' must contain a JSON object at the root.",
            host_config.display()
        );
    };

    let report = overlay.apply(&mut config);
    write_json_file(&package_dist.join("config.json"), &Value::Object(config))?;
    Ok(report)
}
