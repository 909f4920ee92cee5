//! Assessment reports: JSON for machines, plain text for people.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use motionrisk_core::ReportFormat;

use crate::evaluator::{Assessment, RiskFinding, SignalMetrics, SkippedRule};
use crate::scoring::{RiskLevel, Summary};

pub const JSON_FILE: &str = "risk_assessment.json";
pub const TEXT_FILE: &str = "risk_assessment.txt";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub analysis_timestamp: DateTime<Utc>,
    pub body_weight_kg: f64,
    pub motion_duration_s: f64,
    pub overall_risk_assessment: RiskLevel,
    pub risk_summary: Summary,
    pub detailed_risks: Vec<RiskFinding>,
    pub metrics: Vec<SignalMetrics>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rules: Vec<SkippedRule>,
}

impl RiskReport {
    pub fn new(assessment: Assessment, body_weight_kg: f64, motion_duration_s: f64) -> Self {
        Self::at(Utc::now(), assessment, body_weight_kg, motion_duration_s)
    }

    /// Build a report with a fixed timestamp.
    pub fn at(
        analysis_timestamp: DateTime<Utc>,
        assessment: Assessment,
        body_weight_kg: f64,
        motion_duration_s: f64,
    ) -> Self {
        Self {
            analysis_timestamp,
            body_weight_kg,
            motion_duration_s,
            overall_risk_assessment: assessment.summary.overall_risk_level,
            risk_summary: assessment.summary,
            detailed_risks: assessment.findings,
            metrics: assessment.metrics,
            skipped_rules: assessment.skipped,
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Recommendations of all findings, deduplicated in first-seen order.
    pub fn recommendations(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for rec in self.detailed_risks.iter().filter_map(|f| f.recommendation.as_deref()) {
            if !seen.contains(&rec) {
                seen.push(rec);
            }
        }
        seen
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "MOTION INJURY RISK REPORT")?;
        writeln!(out, "=========================")?;
        writeln!(out)?;
        writeln!(
            out,
            "Analysis Date: {}",
            self.analysis_timestamp.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "Motion Duration: {:.2}s", self.motion_duration_s)?;
        writeln!(out, "Subject Body Weight: {:.1} kg", self.body_weight_kg)?;
        writeln!(out)?;
        writeln!(out, "OVERALL RISK ASSESSMENT: {}", self.overall_risk_assessment)?;
        writeln!(out)?;
        writeln!(out, "{}", self.risk_summary.text)?;
        writeln!(out)?;

        if !self.detailed_risks.is_empty() {
            writeln!(out, "DETAILED RISK ANALYSIS:")?;
            writeln!(out, "======================")?;
            writeln!(out)?;
            for (i, risk) in self.detailed_risks.iter().enumerate() {
                write_finding(out, i + 1, risk)?;
            }
        }

        if !self.skipped_rules.is_empty() {
            writeln!(out, "SKIPPED RULES:")?;
            writeln!(out, "==============")?;
            writeln!(out)?;
            for skipped in &self.skipped_rules {
                writeln!(out, "- {} ({}): {}", skipped.rule_id, skipped.category, skipped.reason)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "RECOMMENDATIONS:")?;
        writeln!(out, "===============")?;
        writeln!(out)?;
        let recommendations = self.recommendations();
        if recommendations.is_empty() {
            writeln!(out, "No specific recommendations.")?;
        }
        for rec in recommendations {
            writeln!(out, "• {rec}")?;
        }
        Ok(())
    }

    /// Write the requested report files into `output_dir`, creating it.
    pub fn write(&self, output_dir: &Path, format: ReportFormat) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(output_dir)?;
        let mut written = Vec::new();

        if format.wants_json() {
            let path = output_dir.join(JSON_FILE);
            fs::write(&path, self.to_json()?)?;
            written.push(path);
        }
        if format.wants_text() {
            let path = output_dir.join(TEXT_FILE);
            fs::write(&path, self.render_text())?;
            written.push(path);
        }

        for path in &written {
            info!(path = %path.display(), "wrote report");
        }
        Ok(written)
    }
}

fn write_finding(out: &mut String, number: usize, risk: &RiskFinding) -> std::fmt::Result {
    let interval = &risk.interval;
    writeln!(out, "Risk #{number}: {}", risk.risk_type)?;
    writeln!(out, "  Rule: {} ({})", risk.rule_name, risk.category)?;
    writeln!(
        out,
        "  Time Period: {:.2}s - {:.2}s",
        interval.start_time, interval.end_time
    )?;
    if let Some(window) = &risk.window {
        writeln!(out, "  Phase: {window}")?;
    }
    writeln!(out, "  Duration: {:.2}s", interval.duration)?;
    writeln!(
        out,
        "  Measured Value: {:.2} {} at {:.2}s",
        interval.peak_value, risk.unit, interval.peak_time
    )?;
    if let Some(companion) = &risk.companion {
        writeln!(
            out,
            "  {}: {:.2} {}",
            companion.label, companion.value, companion.unit
        )?;
    }
    writeln!(out, "  Safety Threshold: {}", risk.threshold_text)?;
    writeln!(out, "  Rationale: {}", risk.rationale)?;
    if let Some(note) = &risk.note {
        writeln!(out, "  Note: {note}")?;
    }
    writeln!(out)
}
