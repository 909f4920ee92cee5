//! First-pass view of a rule document.

use serde::{Deserialize, Serialize};

use super::{CommonMetadata, RuleDocument, RuleKind};

/// Header of a rule document with everything else kept as raw YAML.
///
/// The loader reads this first so it can see `kind` and `metadata.extends`
/// before committing to a concrete type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEnvelope {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(flatten)]
    pub rest: serde_yaml::Value,
}

impl RuleEnvelope {
    pub fn rule_kind(&self) -> Result<RuleKind, String> {
        self.kind.parse()
    }

    /// Second pass: re-read the whole document as the type named by `kind`.
    pub fn parse_full(&self) -> Result<RuleDocument, String> {
        let kind = self.rule_kind()?;
        let value = serde_yaml::to_value(self).map_err(|e| e.to_string())?;
        let doc = match kind {
            RuleKind::ThresholdRule => serde_yaml::from_value(value).map(RuleDocument::Threshold),
            RuleKind::ScoringConfig => {
                serde_yaml::from_value(value).map(RuleDocument::ScoringConfig)
            }
        };
        doc.map_err(|e| format!("invalid {kind}: {e}"))
    }
}
