use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Value of a document's `kind:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    ThresholdRule,
    ScoringConfig,
}

impl RuleKind {
    pub const ALL: [RuleKind; 2] = [RuleKind::ThresholdRule, RuleKind::ScoringConfig];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::ThresholdRule => "ThresholdRule",
            RuleKind::ScoringConfig => "ScoringConfig",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown rule kind: '{s}' (expected {} or {})",
                    RuleKind::ThresholdRule,
                    RuleKind::ScoringConfig
                )
            })
    }
}
