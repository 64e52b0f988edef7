//! Overlay applied to the host system's configuration at plugin init.
//!
//! The host owns a tree of configuration tables. Here it is modelled as an
//! explicit JSON object (`HostConfig`) handed to `Overlay::apply` by mutable
//! reference, so every change is a plain, testable data operation:
//!
//! - tables are assigned whole, replacing what the host had
//! - reordering a table rebuilds it from a fixed key sequence
//! - labels overwrite strings at dotted paths
//! - display patches post-process the text a host callback produces,
//!   by wrapping the callback instead of rewriting its code
//! - template patches rewrite template text served by a `TemplateSource`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::issues::OverlayIssue;

/// Host configuration tables, keyed by name, in insertion order.
pub type HostConfig = Map<String, Value>;

/// What happens to table keys missing from an explicit order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RestPolicy {
    /// Unlisted keys follow the listed ones, in their original order.
    #[default]
    Append,
    /// Unlisted keys are removed.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOrder {
    /// Dotted path of the table inside the host configuration.
    pub table: String,
    pub order: Vec<String>,
    #[serde(default)]
    pub rest: RestPolicy,
}

/// Literal replace-all pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TextPatch {
    pub from: String,
    pub to: String,
}

impl TextPatch {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplatePatch {
    /// Template path without extension, relative to the system's templates dir.
    pub path: String,
    pub patches: Vec<TextPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Dotted path -> table assigned in place of the host's one.
    #[serde(default)]
    pub tables: BTreeMap<String, Map<String, Value>>,
    #[serde(default)]
    pub reorder: Vec<TableOrder>,
    /// Dotted path -> replacement string. A numeric segment indexes an array.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Dotted path of a host callback -> patches for the text it displays.
    #[serde(default)]
    pub display: BTreeMap<String, Vec<TextPatch>>,
    #[serde(default)]
    pub templates: Vec<TemplatePatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    #[error("path is empty")]
    EmptyPath,
    #[error("'{0}' does not exist")]
    Missing(String),
    #[error("'{0}' is not an object")]
    NotAnObject(String),
}

/// Outcome of `Overlay::apply`.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub tables_replaced: usize,
    pub tables_reordered: usize,
    pub labels_set: usize,
    pub issues: Vec<OverlayIssue>,
}

/// Rebuild `table` following `order`.
///
/// Keys in `order` that the table lacks are skipped. Keys the order does not
/// mention are appended in their original order, or dropped, per `rest`.
pub fn reorder_table(table: &Map<String, Value>, order: &[String], rest: RestPolicy) -> Map<String, Value> {
    let mut reordered = Map::new();

    for key in order {
        if let Some(value) = table.get(key) {
            reordered.insert(key.clone(), value.clone());
        }
    }

    if rest == RestPolicy::Append {
        for (key, value) in table {
            if !reordered.contains_key(key) {
                reordered.insert(key.clone(), value.clone());
            }
        }
    }

    reordered
}

fn split_path(path: &str) -> Result<Vec<&str>, OverlayError> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(OverlayError::EmptyPath);
    }
    Ok(parts)
}

fn step<'a>(value: &'a Value, part: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(part),
        Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// The value at `parts`, walking objects by key and arrays by index.
fn entry_mut<'a>(
    config: &'a mut HostConfig,
    parts: &[&str],
) -> Result<&'a mut Value, OverlayError> {
    let (first, rest) = parts.split_first().ok_or(OverlayError::EmptyPath)?;
    let mut walked = (*first).to_string();
    let mut current = config
        .get_mut(*first)
        .ok_or_else(|| OverlayError::Missing(walked.clone()))?;

    for part in rest {
        let next = match current {
            Value::Object(map) => map.get_mut(*part),
            Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => return Err(OverlayError::NotAnObject(walked)),
        };
        walked.push('.');
        walked.push_str(part);
        current = next.ok_or_else(|| OverlayError::Missing(walked.clone()))?;
    }

    Ok(current)
}

fn object_at_mut<'a>(
    config: &'a mut HostConfig,
    parts: &[&str],
) -> Result<&'a mut Map<String, Value>, OverlayError> {
    if parts.is_empty() {
        return Ok(config);
    }
    match entry_mut(config, parts)? {
        Value::Object(map) => Ok(map),
        _ => Err(OverlayError::NotAnObject(parts.join("."))),
    }
}

/// Look up a value by dotted path.
pub fn value_at<'a>(config: &'a HostConfig, path: &str) -> Result<&'a Value, OverlayError> {
    let parts = split_path(path)?;
    let (first, rest) = parts.split_first().ok_or(OverlayError::EmptyPath)?;

    let mut walked = (*first).to_string();
    let mut current = config
        .get(*first)
        .ok_or_else(|| OverlayError::Missing(walked.clone()))?;
    for part in rest {
        if !is_container(current) {
            return Err(OverlayError::NotAnObject(walked));
        }
        walked.push('.');
        walked.push_str(part);
        current = step(current, part).ok_or_else(|| OverlayError::Missing(walked.clone()))?;
    }

    Ok(current)
}

/// Store `value` at `path`. The parent must already exist. An object parent
/// gains the final key if missing; an array parent must hold the index.
fn assign(config: &mut HostConfig, path: &str, value: Value) -> Result<(), OverlayError> {
    let parts = split_path(path)?;
    let (last, parents) = parts.split_last().ok_or(OverlayError::EmptyPath)?;
    if parents.is_empty() {
        config.insert((*last).to_string(), value);
        return Ok(());
    }

    match entry_mut(config, parents)? {
        Value::Object(map) => {
            map.insert((*last).to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let slot = last
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| OverlayError::Missing(path.to_string()))?;
            *slot = value;
            Ok(())
        }
        _ => Err(OverlayError::NotAnObject(parents.join("."))),
    }
}

/// Overwrite the string at `path`. The parent must already exist; an
/// object parent gains the final key if missing.
pub fn set_label(config: &mut HostConfig, path: &str, value: &str) -> Result<(), OverlayError> {
    assign(config, path, Value::String(value.to_string()))
}

/// Assign `table` at `path`, replacing whatever the host had there.
pub fn set_table(
    config: &mut HostConfig,
    path: &str,
    table: &Map<String, Value>,
) -> Result<(), OverlayError> {
    assign(config, path, Value::Object(table.clone()))
}

/// Reorder the table at `path` in place.
pub fn reorder_at(config: &mut HostConfig, order: &TableOrder) -> Result<(), OverlayError> {
    let parts = split_path(&order.table)?;
    let table = object_at_mut(config, &parts)?;
    *table = reorder_table(table, &order.order, order.rest);
    Ok(())
}

impl Overlay {
    /// Apply tables, then reorders, then labels. Failures are collected and
    /// the remaining entries still apply.
    pub fn apply(&self, config: &mut HostConfig) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (path, table) in &self.tables {
            match set_table(config, path, table) {
                Ok(()) => report.tables_replaced += 1,
                Err(e) => report.issues.push(OverlayIssue {
                    target: path.clone(),
                    error: e.to_string(),
                }),
            }
        }

        for order in &self.reorder {
            match reorder_at(config, order) {
                Ok(()) => report.tables_reordered += 1,
                Err(e) => report.issues.push(OverlayIssue {
                    target: order.table.clone(),
                    error: e.to_string(),
                }),
            }
        }

        for (path, value) in &self.labels {
            match set_label(config, path, value) {
                Ok(()) => report.labels_set += 1,
                Err(e) => report.issues.push(OverlayIssue {
                    target: path.clone(),
                    error: e.to_string(),
                }),
            }
        }

        // Callbacks do not survive a JSON dump; only their owner can be checked.
        for path in self.display.keys() {
            let owner = path.rsplit_once('.').map_or(path.as_str(), |(owner, _)| owner);
            if let Err(e) = value_at(config, owner) {
                report.issues.push(OverlayIssue {
                    target: path.clone(),
                    error: e.to_string(),
                });
            }
        }

        report
    }

    pub fn display_rewriter(&self, path: &str) -> Option<TextRewriter> {
        self.display
            .get(path)
            .map(|patches| TextRewriter::new(patches.clone()))
    }

    pub fn template_rewriters(&self) -> BTreeMap<String, TextRewriter> {
        self.templates
            .iter()
            .map(|t| (t.path.clone(), TextRewriter::new(t.patches.clone())))
            .collect()
    }
}

/// Ordered literal replacements applied to display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRewriter {
    patches: Vec<TextPatch>,
}

impl TextRewriter {
    pub fn new(patches: Vec<TextPatch>) -> Self {
        Self { patches }
    }

    pub fn rewrite(&self, text: &str) -> String {
        self.patches
            .iter()
            .filter(|p| !p.from.is_empty())
            .fold(text.to_string(), |acc, p| acc.replace(&p.from, &p.to))
    }

    /// Wrap a host callback so its textual output is rewritten.
    pub fn wrap<A, F>(self, callback: F) -> impl Fn(A) -> String
    where
        F: Fn(A) -> String,
    {
        move |arg| self.rewrite(&callback(arg))
    }
}

/// Request/response template service keyed by template path.
pub trait TemplateSource {
    fn fetch(&self, path: &str) -> anyhow::Result<String>;
}

/// Serves templates from a local checkout of the system.
pub struct DirTemplateSource {
    root: std::path::PathBuf,
}

impl DirTemplateSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirTemplateSource {
    fn fetch(&self, path: &str) -> anyhow::Result<String> {
        use anyhow::Context;

        let file = self.root.join(path);
        std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read template: {}", file.display()))
    }
}

/// Template source whose responses pass through per-template rewriters.
pub struct PatchedTemplates<S> {
    inner: S,
    system: String,
    rewriters: BTreeMap<String, TextRewriter>,
}

impl<S: TemplateSource> PatchedTemplates<S> {
    pub fn new(inner: S, system: impl Into<String>, overlay: &Overlay) -> Self {
        Self {
            inner,
            system: system.into(),
            rewriters: overlay.template_rewriters(),
        }
    }

    /// Host-side path, e.g. `systems/impmal/templates/actor/sheet.hbs`.
    pub fn host_path(&self, path: &str) -> String {
        format!("systems/{}/templates/{}.hbs", self.system, path)
    }

    /// Patched template paths, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.rewriters.keys().map(String::as_str)
    }

    /// Fetch the original template for `path` and apply its patches.
    pub fn render(&self, path: &str) -> anyhow::Result<String> {
        let html = self.inner.fetch(&self.host_path(path))?;
        Ok(match self.rewriters.get(path) {
            Some(rewriter) => rewriter.rewrite(&html),
            None => html,
        })
    }
}
