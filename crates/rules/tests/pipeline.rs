//! End-to-end: storage files on disk, built-in rules, report files out.

use std::fs;
use std::path::PathBuf;

use motionrisk_core::ReportFormat;
use motionrisk_rules::evaluator::{Assessment, RiskFinding, RuleEvaluator, Subject};
use motionrisk_rules::loader::RuleLoader;
use motionrisk_rules::report::{RiskReport, JSON_FILE, TEXT_FILE};
use motionrisk_rules::scoring::RiskLevel;
use motionrisk_rules::signals::MotionData;

const IK: &str = "\
Coordinates
version=1
nRows=10
nColumns=3
inDegrees=yes
endheader
time\tknee_angle_r\tpelvis_tilt
0.0\t20\t0
0.1\t20\t0
0.2\t25\t0
0.3\t5\t0
0.4\t5\t0
0.5\t20\t0
0.6\t20\t20
0.7\t20\t20
0.8\t20\t0
0.9\t20\t0
";

const ID: &str = "\
Inverse Dynamics Generalized Forces
version=1
nRows=10
nColumns=3
inDegrees=no
endheader
time\tpelvis_tz_force\thip_rotation_r_moment
0.0\t0\t10
0.1\t0\t10
0.2\t0\t10
0.3\t150\t10
0.4\t0\t10
0.5\t0\t10
0.6\t0\t10
0.7\t0\t10
0.8\t0\t10
0.9\t0\t10
";

fn run(dir: &tempfile::TempDir) -> (MotionData, Assessment) {
    let ik = dir.path().join("run_ik.mot");
    let id = dir.path().join("run_id.sto");
    fs::write(&ik, IK).unwrap();
    fs::write(&id, ID).unwrap();

    let data = MotionData::load(Some(&ik), Some(&id), None, None).unwrap();
    let mut loader = RuleLoader::new(PathBuf::from("unused"));
    loader.load_builtin();

    let assessment = RuleEvaluator::evaluate_all(
        loader.threshold_rules(),
        &data,
        &Subject {
            body_weight_kg: 70.0,
        },
        &loader.scoring_config(),
    )
    .unwrap();
    (data, assessment)
}

fn spans(findings: &[RiskFinding], rule_id: &str) -> Vec<(usize, usize)> {
    findings
        .iter()
        .filter(|f| f.rule_id == rule_id)
        .map(|f| (f.interval.start_index, f.interval.end_index))
        .collect()
}

#[test]
fn builtin_rules_over_synthetic_motion() {
    let dir = tempfile::tempdir().unwrap();
    let (data, assessment) = run(&dir);
    let findings = &assessment.findings;

    assert_eq!(spans(findings, "knee-valgus-r"), vec![(0, 2), (5, 9)]);
    assert_eq!(spans(findings, "knee-flexion-r"), vec![(0, 9)]);
    assert!(spans(findings, "knee-hyperextension-r").is_empty());
    assert!(spans(findings, "knee-angular-velocity-r").is_empty());
    assert_eq!(spans(findings, "knee-anterior-shear"), vec![(3, 3)]);
    assert!(spans(findings, "hip-rotation-torque-r").is_empty());

    let tilt: Vec<_> = findings.iter().filter(|f| f.rule_id == "pelvic-tilt").collect();
    assert_eq!(tilt.len(), 1);
    assert_eq!(tilt[0].direction.as_deref(), Some("anterior"));
    assert_eq!(tilt[0].risk_type, "Excessive anterior Pelvic Tilt");

    assert_eq!(findings.len(), 5);
    assert_eq!(assessment.summary.risk_count, 5);
    assert_eq!(assessment.summary.overall_risk_level, RiskLevel::Moderate);

    // Rules needing static optimization output or absent columns are skipped.
    let skipped: Vec<_> = assessment.skipped.iter().map(|s| s.rule_id.as_str()).collect();
    assert!(skipped.contains(&"gastrocnemius-overload"));
    assert!(skipped.contains(&"hamstring-quadriceps-ratio"));
    assert!(skipped.contains(&"knee-valgus-l"));
    assert!(skipped.contains(&"trunk-lean"));
    assert_eq!(
        assessment.metrics.len() + assessment.skipped.len(),
        43,
        "every threshold rule is either evaluated or skipped"
    );

    assert!((data.duration() - 0.9).abs() < 1e-12);
}

#[test]
fn report_files_round_out_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let (data, assessment) = run(&dir);
    let report = RiskReport::new(assessment, 70.0, data.duration());

    let out = dir.path().join("report");
    let written = report.write(&out, ReportFormat::Both).unwrap();
    assert_eq!(written, vec![out.join(JSON_FILE), out.join(TEXT_FILE)]);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join(JSON_FILE)).unwrap()).unwrap();
    assert_eq!(json["overall_risk_assessment"], "moderate");
    assert_eq!(json["detailed_risks"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["motion_duration_s"].as_f64().map(|d| (d * 10.0).round()), Some(9.0));

    let text = fs::read_to_string(out.join(TEXT_FILE)).unwrap();
    assert!(text.contains("OVERALL RISK ASSESSMENT: Moderate"));
    assert!(text.contains("Detected 5 instances of potential injury risks"));
    assert!(text.contains("Risk #5:"));
    assert!(text.contains("RECOMMENDATIONS:"));
}
