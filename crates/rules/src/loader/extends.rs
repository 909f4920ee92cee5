//! `extends` inheritance: a child document is deep-merged over its parent
//! before the typed second pass.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};

/// Longest parent chain followed before giving up.
const MAX_EXTENDS_DEPTH: usize = 5;

/// Broken inheritance chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtendsError {
    #[error("circular extends chain detected for rule '{0}'")]
    Cycle(String),

    #[error("extends chain exceeds maximum depth ({MAX_EXTENDS_DEPTH}) for rule '{0}'")]
    TooDeep(String),

    #[error("rule '{0}' not found for extends resolution")]
    Missing(String),
}

/// Merge `child` over `parent`. Mappings merge key by key; any other child
/// value (scalar, sequence, null) replaces the parent's outright.
pub fn deep_merge(parent: &Value, child: &Value) -> Value {
    let (Value::Mapping(base), Value::Mapping(overlay)) = (parent, child) else {
        return child.clone();
    };

    let mut merged: Mapping = base.clone();
    for (key, value) in overlay {
        let next = match base.get(key) {
            Some(inherited) => deep_merge(inherited, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Mapping(merged)
}

fn parent_of(doc: &Value) -> Option<&str> {
    doc.get("metadata")?.get("extends")?.as_str()
}

/// Keys of `spec.signal` that pick where a signal comes from; exactly one
/// may survive a merge.
const SIGNAL_SOURCES: [&str; 4] = ["column", "mean_of", "ratio", "lean"];

/// [`deep_merge`] for whole rule documents. When the child's signal names a
/// source of its own, the parent's source keys are dropped first.
fn merge_documents(parent: &Value, child: &Value) -> Value {
    let child_sets_source = child
        .get("spec")
        .and_then(|spec| spec.get("signal"))
        .and_then(Value::as_mapping)
        .is_some_and(|signal| SIGNAL_SOURCES.iter().any(|key| signal.contains_key(*key)));
    if !child_sets_source {
        return deep_merge(parent, child);
    }

    let mut base = parent.clone();
    if let Some(signal) = base
        .get_mut("spec")
        .and_then(|spec| spec.get_mut("signal"))
        .and_then(Value::as_mapping_mut)
    {
        for key in SIGNAL_SOURCES {
            signal.remove(key);
        }
    }
    deep_merge(&base, child)
}

/// Resolve a single document's `extends` chain. Every merged ancestor is
/// cached in `resolved`.
pub(super) fn resolve_one(
    id: &str,
    raw: &HashMap<String, Value>,
    resolved: &mut HashMap<String, Value>,
) -> Result<Value, ExtendsError> {
    // Walk towards the root until a cached or parentless document; the
    // chain holds the unresolved links, youngest first.
    let mut chain: Vec<(&str, &Value)> = Vec::new();
    let mut cursor = id;
    let mut merged = loop {
        if let Some(done) = resolved.get(cursor) {
            break done.clone();
        }
        if chain.iter().any(|(link, _)| *link == cursor) {
            return Err(ExtendsError::Cycle(cursor.to_string()));
        }
        if chain.len() > MAX_EXTENDS_DEPTH {
            return Err(ExtendsError::TooDeep(cursor.to_string()));
        }
        let doc = raw
            .get(cursor)
            .ok_or_else(|| ExtendsError::Missing(cursor.to_string()))?;
        chain.push((cursor, doc));
        match parent_of(doc) {
            Some(parent) => cursor = parent,
            None => break Value::Null,
        }
    };

    // Merging over Null yields the document itself, so roots need no special case.
    for (link, doc) in chain.into_iter().rev() {
        merged = merge_documents(&merged, doc);
        resolved.insert(link.to_string(), merged.clone());
    }
    Ok(merged)
}
