//! `kind: ScoringConfig` documents: the count and duration boundaries that
//! turn a list of findings into an overall risk level.

use serde::{Deserialize, Serialize};

use crate::schema::CommonMetadata;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfigRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(default)]
    pub spec: ScoringConfigSpec,
}

/// A level applies when either its finding count or its summed duration is
/// strictly exceeded; `high` is checked first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfigSpec {
    #[serde(default = "LevelThresholds::high")]
    pub high: LevelThresholds,
    #[serde(default = "LevelThresholds::moderate")]
    pub moderate: LevelThresholds,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LevelThresholds {
    /// Findings.
    pub count: usize,
    /// Seconds, summed over findings.
    pub duration: f64,
}

impl LevelThresholds {
    pub const HIGH: Self = Self {
        count: 5,
        duration: 2.0,
    };
    pub const MODERATE: Self = Self {
        count: 2,
        duration: 1.0,
    };

    fn high() -> Self {
        Self::HIGH
    }

    fn moderate() -> Self {
        Self::MODERATE
    }

    pub fn exceeded_by(&self, count: usize, duration: f64) -> bool {
        count > self.count || duration > self.duration
    }
}

impl Default for ScoringConfigSpec {
    fn default() -> Self {
        Self {
            high: LevelThresholds::HIGH,
            moderate: LevelThresholds::MODERATE,
        }
    }
}

/// Boundaries the scorer works with, taken from the first enabled document.
pub type CompiledScoringConfig = ScoringConfigSpec;

impl ScoringConfigRule {
    pub fn compile(&self) -> CompiledScoringConfig {
        self.spec
    }
}
