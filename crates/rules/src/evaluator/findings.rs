//! Turning extracted intervals into reportable findings.

use serde::{Deserialize, Serialize};

use motionrisk_core::TimeSeries;

use crate::intervals::RiskInterval;
use crate::schema::{Companion, RiskCategory, Signal, SignalSource, ThresholdRule, ThresholdScale};

const DIRECTION_PLACEHOLDER: &str = "{direction}";

/// Peak of a companion series over a finding's interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionPeak {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

/// One risk interval detected by one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub rule_id: String,
    pub rule_name: String,
    pub category: RiskCategory,
    pub risk_type: String,
    #[serde(flatten)]
    pub interval: RiskInterval,
    /// Effective threshold after subject scaling.
    pub threshold: f64,
    /// Human-readable threshold, e.g. `> 10 deg`.
    pub threshold_text: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<CompanionPeak>,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The signal's own column, when it reads exactly one.
pub(super) fn signal_column(signal: &Signal) -> Option<&str> {
    match &signal.source {
        SignalSource::Column(column) => Some(column),
        _ => None,
    }
}

/// `interval` indices refer to the full `series`.
pub(super) fn build(
    rule: &ThresholdRule,
    series: &TimeSeries,
    interval: RiskInterval,
    threshold: f64,
    companion: Option<&(&Companion, TimeSeries)>,
) -> RiskFinding {
    let spec = &rule.spec;
    let run = series.slice(interval.start_index..interval.end_index + 1);

    let direction = spec
        .direction_labels
        .as_ref()
        .map(|labels| labels.label_for(run.mean().unwrap_or(0.0)).to_string());
    let fill = |text: &str| match &direction {
        Some(d) => text.replace(DIRECTION_PLACEHOLDER, d),
        None => text.to_string(),
    };

    let companion = companion.and_then(|(c, other)| {
        let value = run
            .time()
            .iter()
            .filter_map(|&t| other.value_near(t))
            .filter(|v| !v.is_nan())
            .reduce(f64::max)?;
        Some(CompanionPeak {
            label: c.label.clone(),
            value,
            unit: c.unit.clone(),
        })
    });

    let risk_type = fill(&spec.risk_type);
    let rationale = fill(&spec.rationale);
    let recommendation = spec.recommendation.as_deref().map(&fill);

    RiskFinding {
        rule_id: rule.metadata.id.clone(),
        rule_name: rule.metadata.name.clone(),
        category: spec.category,
        risk_type,
        interval,
        threshold,
        threshold_text: threshold_text(rule),
        unit: spec.condition.unit.clone(),
        window: spec.window.as_ref().and_then(|w| w.label.clone()),
        direction,
        companion,
        rationale,
        recommendation,
        note: spec.note.clone(),
    }
}

fn threshold_text(rule: &ThresholdRule) -> String {
    let c = &rule.spec.condition;
    let base = format!("{} {} {}", c.operator.symbol(), c.threshold, c.unit);
    match c.scale {
        ThresholdScale::None => base,
        ThresholdScale::BodyMass => format!("{base}/kg (x body mass)"),
        ThresholdScale::BodyWeight => format!("{base} (x body weight)"),
    }
}
