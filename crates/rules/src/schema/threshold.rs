//! ThresholdRule kind: one derived signal compared against one threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

use motionrisk_core::GRAVITY;

use super::CommonMetadata;
use crate::intervals::PeakPolicy;

// ── Top-level document ──────────────────────────────────────────────

/// Top-level ThresholdRule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: ThresholdSpec,
}

impl ThresholdRule {
    /// Threshold after applying the subject scale (e.g. N per kg of body mass).
    pub fn effective_threshold(&self, body_weight_kg: f64) -> f64 {
        self.spec.condition.threshold * self.spec.condition.scale.factor(body_weight_kg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdSpec {
    pub category: RiskCategory,
    /// Label findings are grouped under in the summary (e.g. "Knee Valgus").
    pub risk_type: String,
    pub signal: Signal,
    pub condition: Condition,
    /// Restrict evaluation to a fraction of the motion.
    #[serde(default)]
    pub window: Option<AnalysisWindow>,
    pub rationale: String,
    #[serde(default)]
    pub recommendation: Option<String>,
    /// Free-form annotation carried into findings. Not evaluated.
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub companion: Option<Companion>,
    #[serde(default)]
    pub direction_labels: Option<DirectionLabels>,
}

// ── Category ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    JointAngle,
    JointLoad,
    Kinematic,
    MuscleLoad,
    PostureAlignment,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::JointAngle => write!(f, "Joint Angle"),
            RiskCategory::JointLoad => write!(f, "Joint Load"),
            RiskCategory::Kinematic => write!(f, "Kinematic"),
            RiskCategory::MuscleLoad => write!(f, "Muscle Load"),
            RiskCategory::PostureAlignment => write!(f, "Posture Alignment"),
        }
    }
}

// ── Signal ──────────────────────────────────────────────────────────

/// Engine output table a signal is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    Ik,
    InverseDynamics,
    SoActivation,
    SoForce,
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Ik => write!(f, "ik"),
            TableSource::InverseDynamics => write!(f, "inverse_dynamics"),
            TableSource::SoActivation => write!(f, "so_activation"),
            TableSource::SoForce => write!(f, "so_force"),
        }
    }
}

/// How a series is derived from a table's columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// A single column by exact label.
    Column(String),
    /// Row mean of every column whose label contains any fragment.
    MeanOf(Vec<String>),
    /// Group mean of `numerator` divided by group mean of `denominator`.
    Ratio {
        numerator: Vec<String>,
        denominator: Vec<String>,
    },
    /// Frontal-plane angle of the segment from `<left>_x/_y` to `<right>_x/_y`.
    Lean { left: String, right: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivative {
    #[default]
    None,
    Velocity,
    Acceleration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signal {
    pub table: TableSource,
    #[serde(flatten)]
    pub source: SignalSource,
    /// Convert radians to degrees unless the table is already in degrees.
    #[serde(default)]
    pub to_degrees: bool,
    #[serde(default)]
    pub derivative: Derivative,
}

impl Signal {
    /// Every column label or label fragment the signal refers to.
    pub fn referenced_names(&self) -> Vec<String> {
        match &self.source {
            SignalSource::Column(c) => vec![c.clone()],
            SignalSource::MeanOf(fragments) => fragments.clone(),
            SignalSource::Ratio {
                numerator,
                denominator,
            } => numerator.iter().chain(denominator).cloned().collect(),
            SignalSource::Lean { left, right } => vec![
                format!("{left}_x"),
                format!("{left}_y"),
                format!("{right}_x"),
                format!("{right}_y"),
            ],
        }
    }
}

// ── Condition ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Gt,
    Lt,
    AbsGt,
}

impl ComparisonOperator {
    /// NaN never matches.
    pub fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            ComparisonOperator::Gt => value > threshold,
            ComparisonOperator::Lt => value < threshold,
            ComparisonOperator::AbsGt => value.abs() > threshold,
        }
    }

    /// Peak selection matching the comparison's polarity.
    pub fn peak_policy(self) -> PeakPolicy {
        match self {
            ComparisonOperator::Gt => PeakPolicy::Max,
            ComparisonOperator::Lt => PeakPolicy::Min,
            ComparisonOperator::AbsGt => PeakPolicy::MaxAbs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::AbsGt => "|x| >",
        }
    }
}

/// What the threshold is multiplied by before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdScale {
    #[default]
    None,
    /// Subject body mass in kg.
    BodyMass,
    /// Subject body weight in N.
    BodyWeight,
}

impl ThresholdScale {
    pub fn factor(self, body_weight_kg: f64) -> f64 {
        match self {
            ThresholdScale::None => 1.0,
            ThresholdScale::BodyMass => body_weight_kg,
            ThresholdScale::BodyWeight => body_weight_kg * GRAVITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub operator: ComparisonOperator,
    pub threshold: f64,
    pub unit: String,
    #[serde(default)]
    pub scale: ThresholdScale,
}

// ── Optional refinements ────────────────────────────────────────────

/// Fraction range `[start, end)` of the samples to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisWindow {
    pub start: f64,
    pub end: f64,
    /// Phase name shown in findings (e.g. "stance").
    #[serde(default)]
    pub label: Option<String>,
}

/// A second series whose peak is reported alongside each finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Companion {
    pub table: TableSource,
    /// Defaults to the signal's own column.
    #[serde(default)]
    pub column: Option<String>,
    pub label: String,
    pub unit: String,
}

/// Labels picked by the sign of an interval's mean value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DirectionLabels {
    pub positive: String,
    pub negative: String,
}

impl DirectionLabels {
    /// Zero counts as negative.
    pub fn label_for(&self, mean: f64) -> &str {
        if mean > 0.0 {
            &self.positive
        } else {
            &self.negative
        }
    }
}
