//! Loader errors and per-file load outcomes.

use std::path::PathBuf;

use tracing::warn;

use super::extends::ExtendsError;

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Extends(#[from] ExtendsError),

    /// Structurally readable document that cannot be accepted: empty id,
    /// duplicate id, unknown kind, missing spec fields.
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;

/// What happened to one rule source during a load pass.
#[derive(Debug)]
pub struct LoadResult {
    /// File path, or `builtin:<name>` for embedded rules.
    pub path: PathBuf,
    pub status: LoadStatus,
}

#[derive(Debug)]
pub enum LoadStatus {
    Loaded { rule_id: String },
    /// Dotfiles and non-YAML files.
    Skipped { reason: String },
    Failed { error: String },
}

impl LoadResult {
    pub(super) fn loaded(path: PathBuf, rule_id: String) -> Self {
        Self {
            path,
            status: LoadStatus::Loaded { rule_id },
        }
    }

    pub(super) fn skipped(path: PathBuf, reason: &str) -> Self {
        Self {
            path,
            status: LoadStatus::Skipped {
                reason: reason.to_string(),
            },
        }
    }

    pub(super) fn failed(path: PathBuf, error: impl ToString) -> Self {
        warn!(path = %path.display(), error = %error.to_string(), "failed to load rule file");
        Self {
            path,
            status: LoadStatus::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, LoadStatus::Failed { .. })
    }

    /// Id of the document this source produced, when it loaded.
    pub fn rule_id(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Loaded { rule_id } => Some(rule_id),
            _ => None,
        }
    }
}
