//! Core [`RuleLoader`] struct: filesystem-backed rule loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::builtin;
use crate::schema::{RuleDocument, RuleEnvelope, ThresholdRule};
use crate::scoring_config::CompiledScoringConfig;

use super::error::{LoadResult, Result, RuleError};
use super::extends::resolve_one;

/// Filesystem-backed rule loader.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` files, deserializes
/// them into [`RuleDocument`] instances via two-pass deserialization, and
/// keeps them keyed by rule ID in load order. Files are visited in sorted
/// path order so evaluation order is stable across runs.
pub struct RuleLoader {
    /// Root directory containing rule YAML files.
    rules_dir: PathBuf,
    /// All rule documents keyed by `metadata.id`.
    documents: IndexMap<String, RuleDocument>,
}

/// Where a batch of sources comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Batch {
    Directory,
    Builtin,
}

/// A YAML source waiting for extends resolution.
struct PendingSource {
    path: PathBuf,
    id: String,
    value: serde_yaml::Value,
}

impl RuleLoader {
    pub fn new(rules_dir: PathBuf) -> Self {
        Self {
            rules_dir,
            documents: IndexMap::new(),
        }
    }

    /// Load every YAML file below the rules directory.
    ///
    /// Dotfiles and non-YAML files are reported as skipped. A file that fails
    /// to parse, resolve or type-check is reported as failed and does not stop
    /// the others.
    pub fn load_all(&mut self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        let mut sources = Vec::new();
        let rules_dir = self.rules_dir.clone();
        scan_dir_recursive(&rules_dir, &mut sources, &mut results)?;
        self.ingest(sources, Batch::Directory, &mut results);
        Ok(results)
    }

    /// Load the embedded default rule table.
    ///
    /// Ids already loaded (from the rules directory) are kept and the
    /// built-in copy is reported as skipped.
    pub fn load_builtin(&mut self) -> Vec<LoadResult> {
        let mut results = Vec::new();
        let sources = builtin::DEFAULT_RULES
            .iter()
            .map(|(name, yaml)| (PathBuf::from(format!("builtin:{name}")), yaml.to_string()))
            .collect();
        self.ingest(sources, Batch::Builtin, &mut results);
        results
    }

    /// [`load_all`](Self::load_all), then the built-in table when the
    /// directory produced no threshold rule documents at all. Disabled
    /// documents count: a directory of disabled rules is left disabled.
    pub fn load_with_fallback(&mut self) -> Result<Vec<LoadResult>> {
        let mut results = self.load_all()?;
        let has_threshold_documents = self
            .documents
            .values()
            .any(|doc| doc.as_threshold().is_some());
        if !has_threshold_documents {
            info!(rules_dir = %self.rules_dir.display(), "no threshold rules found, using built-in defaults");
            results.extend(self.load_builtin());
        }
        Ok(results)
    }

    /// Parse every source, resolve `extends` across the batch and store the
    /// resulting documents. One result is pushed per source.
    fn ingest(&mut self, sources: Vec<(PathBuf, String)>, batch: Batch, results: &mut Vec<LoadResult>) {
        let mut pending = Vec::new();
        let mut raw_values: HashMap<String, serde_yaml::Value> = self
            .documents
            .iter()
            .filter_map(|(id, doc)| {
                let yaml = doc.to_yaml().ok()?;
                Some((id.clone(), serde_yaml::from_str(&yaml).ok()?))
            })
            .collect();

        for (path, contents) in sources {
            let (id, value) = match first_pass(&contents) {
                Ok(parsed) => parsed,
                Err(e) => {
                    results.push(LoadResult::failed(path, e));
                    continue;
                }
            };
            if batch == Batch::Builtin && self.documents.contains_key(&id) {
                results.push(LoadResult::skipped(path, "defined in the rules directory"));
                continue;
            }
            if let Some(existing) = pending.iter().find(|p: &&PendingSource| p.id == id) {
                let error = format!(
                    "duplicate rule id '{id}' (already defined in {})",
                    existing.path.display()
                );
                results.push(LoadResult::failed(path, error));
                continue;
            }
            raw_values.insert(id.clone(), value.clone());
            pending.push(PendingSource { path, id, value });
        }

        let mut resolved = HashMap::new();
        for source in pending {
            let outcome = resolve_one(&source.id, &raw_values, &mut resolved)
                .map_err(RuleError::from)
                .and_then(second_pass);
            match outcome {
                Ok(doc) => {
                    info!(rule_id = %source.id, kind = %doc.kind(), path = %source.path.display(), "loaded rule");
                    self.documents.insert(source.id.clone(), doc);
                    results.push(LoadResult::loaded(source.path, source.id));
                }
                Err(e) => {
                    debug!(raw = ?source.value, "rejected rule source");
                    results.push(LoadResult::failed(source.path, e));
                }
            }
        }
    }

    /// Parse one file without registering it. `extends` is not resolved.
    pub fn load_file(&self, path: &Path) -> Result<RuleDocument> {
        let contents = fs::read_to_string(path)?;
        let (_, value) = first_pass(&contents)?;
        second_pass(value)
    }

    pub fn rules_dir(&self) -> &Path {
        &self.rules_dir
    }

    /// All loaded documents in load order.
    pub fn documents(&self) -> &IndexMap<String, RuleDocument> {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&RuleDocument> {
        self.documents.get(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Enabled threshold rules in load order.
    pub fn threshold_rules(&self) -> impl Iterator<Item = &ThresholdRule> {
        self.documents
            .values()
            .filter_map(RuleDocument::as_threshold)
            .filter(|r| r.metadata.enabled)
    }

    /// The first enabled ScoringConfig, or the default boundaries.
    pub fn scoring_config(&self) -> CompiledScoringConfig {
        self.documents
            .values()
            .filter_map(RuleDocument::as_scoring_config)
            .find(|r| r.metadata.enabled)
            .map(|r| r.compile())
            .unwrap_or_default()
    }
}

/// Envelope read: the rule id plus the untouched YAML value.
fn first_pass(contents: &str) -> Result<(String, serde_yaml::Value)> {
    let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
    let envelope: RuleEnvelope = serde_yaml::from_value(value.clone())?;

    if envelope.metadata.id.is_empty() {
        return Err(RuleError::Validation(
            "rule metadata.id must not be empty".to_string(),
        ));
    }
    envelope.rule_kind().map_err(RuleError::Validation)?;

    Ok((envelope.metadata.id, value))
}

/// Typed parse of a (possibly merged) YAML value.
fn second_pass(value: serde_yaml::Value) -> Result<RuleDocument> {
    let envelope: RuleEnvelope = serde_yaml::from_value(value)?;
    let id = envelope.metadata.id.clone();
    envelope
        .parse_full()
        .map_err(|e| RuleError::Validation(format!("rule '{id}': {e}")))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml" | "yaml")
    )
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Collect YAML sources below `dir`, depth first in sorted path order.
/// A missing or unreadable directory contributes nothing.
fn scan_dir_recursive(
    dir: &Path,
    sources: &mut Vec<(PathBuf, String)>,
    results: &mut Vec<LoadResult>,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "failed to read directory");
            return Ok(());
        }
    };

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            if !is_hidden(&path) {
                scan_dir_recursive(&path, sources, results)?;
            }
        } else if is_hidden(&path) {
            results.push(LoadResult::skipped(path, "dotfile"));
        } else if !is_yaml(&path) {
            results.push(LoadResult::skipped(path, "not a YAML file"));
        } else {
            match fs::read_to_string(&path) {
                Ok(contents) => sources.push((path, contents)),
                Err(e) => results.push(LoadResult::failed(path, e)),
            }
        }
    }

    Ok(())
}
