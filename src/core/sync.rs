//! Pull upstream translations into a local translation document.

use anyhow::{Context, Result};
use serde_json::Value;

/// A leaf string that the remote document changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationChange {
    /// Dotted key path, e.g. `WFRP4E.Skill.Athletics`.
    pub path: String,
    pub old: String,
    pub new: String,
}

/// Merge `remote` into `local`, returning what changed.
///
/// Only keys already present in `local` are visited, so no key is ever
/// added. A local string is replaced by a differing, non-empty remote
/// string; local objects recurse into remote objects. Arrays and other
/// values are left alone, so no value changes type. The remote side wins
/// every conflict.
pub fn merge_translations(local: &mut Value, remote: &Value) -> Vec<TranslationChange> {
    let mut changes = Vec::new();
    merge_into(local, remote, "", &mut changes);
    changes
}

fn merge_into(local: &mut Value, remote: &Value, prefix: &str, changes: &mut Vec<TranslationChange>) {
    let (Value::Object(local_map), Value::Object(remote_map)) = (local, remote) else {
        return;
    };

    for (key, local_value) in local_map.iter_mut() {
        let Some(remote_value) = remote_map.get(key) else {
            continue;
        };

        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match remote_value {
            Value::Object(_) if local_value.is_object() => {
                merge_into(local_value, remote_value, &path, changes);
            }
            Value::String(new) => {
                if let Value::String(old) = local_value
                    && !new.is_empty()
                    && *old != *new
                {
                    changes.push(TranslationChange {
                        path,
                        old: std::mem::replace(old, new.clone()),
                        new: new.clone(),
                    });
                }
            }
            _ => {}
        }
    }
}

/// Fetch the remote translation document. One request, no retry.
pub fn fetch_remote_json(url: &str) -> Result<Value> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Remote returned an error for {}", url))?;

    response
        .json::<Value>()
        .with_context(|| format!("Failed to parse JSON from {}", url))
}
