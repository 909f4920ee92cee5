use serde::{Deserialize, Serialize};

/// `metadata:` block shared by every rule kind.
///
/// `extends` names a parent rule id; the parent's document is deep-merged
/// under this one before parsing. The left-side default rules are written as
/// children of their right-side counterparts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommonMetadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}
