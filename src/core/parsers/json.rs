use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Read a translation document. The root must be a JSON object.
pub fn parse_json_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    if !json.is_object() {
        bail!("'{}' must contain a JSON object at the root.", path.display());
    }

    Ok(json)
}

/// Write a document back as 2-space indented JSON, keeping key order.
pub fn write_json_file(path: &Path, value: &Value) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize JSON for {:?}", path))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write JSON file: {:?}", path))
}
