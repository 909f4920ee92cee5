use serde::Serialize;

use super::{CommonMetadata, RuleKind, ThresholdRule};
use crate::scoring_config::ScoringConfigRule;

/// A parsed rule document of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleDocument {
    Threshold(ThresholdRule),
    ScoringConfig(ScoringConfigRule),
}

impl RuleDocument {
    pub fn metadata(&self) -> &CommonMetadata {
        match self {
            RuleDocument::Threshold(rule) => &rule.metadata,
            RuleDocument::ScoringConfig(rule) => &rule.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut CommonMetadata {
        match self {
            RuleDocument::Threshold(rule) => &mut rule.metadata,
            RuleDocument::ScoringConfig(rule) => &mut rule.metadata,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            RuleDocument::Threshold(_) => RuleKind::ThresholdRule,
            RuleDocument::ScoringConfig(_) => RuleKind::ScoringConfig,
        }
    }

    pub fn as_threshold(&self) -> Option<&ThresholdRule> {
        match self {
            RuleDocument::Threshold(rule) => Some(rule),
            RuleDocument::ScoringConfig(_) => None,
        }
    }

    pub fn as_scoring_config(&self) -> Option<&ScoringConfigRule> {
        match self {
            RuleDocument::ScoringConfig(rule) => Some(rule),
            RuleDocument::Threshold(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
