//! Overall risk level and summary text for a set of findings.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::evaluator::RiskFinding;
use crate::scoring_config::CompiledScoringConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub overall_risk_level: RiskLevel,
    pub risk_count: usize,
    /// Sum of finding durations in seconds. Overlapping findings from
    /// different rules are counted separately.
    pub total_duration: f64,
    /// Findings per risk type, in order of first appearance.
    pub counts_by_type: IndexMap<String, usize>,
    pub text: String,
}

pub fn risk_level(config: &CompiledScoringConfig, count: usize, duration: f64) -> RiskLevel {
    if config.high.exceeded_by(count, duration) {
        RiskLevel::High
    } else if config.moderate.exceeded_by(count, duration) {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn summarize(findings: &[RiskFinding], config: &CompiledScoringConfig) -> Summary {
    let risk_count = findings.len();
    let total_duration: f64 = findings.iter().map(|f| f.interval.duration).sum();

    let mut counts_by_type: IndexMap<String, usize> = IndexMap::new();
    for finding in findings {
        *counts_by_type.entry(finding.risk_type.clone()).or_default() += 1;
    }

    let text = if findings.is_empty() {
        "No significant musculoskeletal injury risks detected in this motion.".to_string()
    } else {
        let mut text = format!(
            "Detected {risk_count} instances of potential injury risks covering {total_duration:.2}s of motion."
        );
        for (risk_type, count) in &counts_by_type {
            text.push_str(&format!("\n- {risk_type}: {count} instances detected"));
        }
        text
    };

    Summary {
        overall_risk_level: risk_level(config, risk_count, total_duration),
        risk_count,
        total_duration,
        counts_by_type,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::RiskInterval;
    use crate::schema::RiskCategory;
    use crate::scoring_config::{LevelThresholds, ScoringConfigSpec};

    fn finding(risk_type: &str, duration: f64) -> RiskFinding {
        RiskFinding {
            rule_id: "r".to_string(),
            rule_name: "R".to_string(),
            category: RiskCategory::JointAngle,
            risk_type: risk_type.to_string(),
            interval: RiskInterval {
                start_index: 0,
                end_index: 1,
                start_time: 0.0,
                end_time: duration,
                duration,
                peak_value: 1.0,
                peak_time: 0.0,
            },
            threshold: 0.0,
            threshold_text: "> 0".to_string(),
            unit: "deg".to_string(),
            window: None,
            direction: None,
            companion: None,
            rationale: String::new(),
            recommendation: None,
            note: None,
        }
    }

    #[test]
    fn empty_findings_are_low() {
        let summary = summarize(&[], &ScoringConfigSpec::default());
        assert_eq!(summary.overall_risk_level, RiskLevel::Low);
        assert_eq!(summary.risk_count, 0);
        assert_eq!(
            summary.text,
            "No significant musculoskeletal injury risks detected in this motion."
        );
    }

    #[test]
    fn boundaries_are_strict() {
        let config = ScoringConfigSpec::default();
        assert_eq!(risk_level(&config, 2, 1.0), RiskLevel::Low);
        assert_eq!(risk_level(&config, 3, 0.0), RiskLevel::Moderate);
        assert_eq!(risk_level(&config, 0, 1.01), RiskLevel::Moderate);
        assert_eq!(risk_level(&config, 5, 2.0), RiskLevel::Moderate);
        assert_eq!(risk_level(&config, 6, 0.0), RiskLevel::High);
        assert_eq!(risk_level(&config, 1, 2.5), RiskLevel::High);
    }

    #[test]
    fn custom_boundaries() {
        let config = ScoringConfigSpec {
            high: LevelThresholds {
                count: 1,
                duration: 0.5,
            },
            moderate: LevelThresholds {
                count: 0,
                duration: 0.1,
            },
        };
        assert_eq!(risk_level(&config, 1, 0.0), RiskLevel::Moderate);
        assert_eq!(risk_level(&config, 2, 0.0), RiskLevel::High);
    }

    #[test]
    fn summary_text_groups_by_first_seen_type() {
        let findings = vec![
            finding("Knee Valgus", 0.5),
            finding("Pelvic Tilt", 0.25),
            finding("Knee Valgus", 0.5),
        ];
        let summary = summarize(&findings, &ScoringConfigSpec::default());
        assert_eq!(summary.risk_count, 3);
        assert_eq!(summary.overall_risk_level, RiskLevel::Moderate);
        assert_eq!(
            summary.text,
            "Detected 3 instances of potential injury risks covering 1.25s of motion.\n\
             - Knee Valgus: 2 instances detected\n\
             - Pelvic Tilt: 1 instances detected"
        );
        assert_eq!(summary.counts_by_type["Knee Valgus"], 2);
    }
}
