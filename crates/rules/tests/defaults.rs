//! Integration tests that load every rule file under `data/rules/` through
//! the filesystem loader and check it against the validator.

use std::path::PathBuf;

use motionrisk_rules::loader::{LoadStatus, RuleLoader};
use motionrisk_rules::schema::{RiskCategory, RuleDocument, ThresholdScale};
use motionrisk_rules::validation::validate_document;

/// Integration tests run from the crate directory, so go up two levels.
fn rules_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/rules")
}

fn load() -> RuleLoader {
    let mut loader = RuleLoader::new(rules_dir());
    let results = loader.load_all().expect("scan data/rules");
    for result in &results {
        if let LoadStatus::Failed { error } = &result.status {
            panic!("{} failed to load: {}", result.path.display(), error);
        }
    }
    loader
}

#[test]
fn every_rule_file_loads_and_validates() {
    let loader = load();
    assert_eq!(loader.len(), 44);

    for (id, doc) in loader.documents() {
        let result = validate_document(doc);
        assert!(result.valid, "{id}: {:?}", result.errors);
        assert!(result.warnings.is_empty(), "{id}: {:?}", result.warnings);
    }
}

#[test]
fn directory_matches_builtin_table() {
    let from_dir = load();
    let mut builtin = RuleLoader::new(rules_dir());
    builtin.load_builtin();

    assert_eq!(from_dir.len(), builtin.len());
    for (id, doc) in builtin.documents() {
        assert_eq!(from_dir.get(id), Some(doc), "{id} differs");
    }
}

#[test]
fn every_category_is_covered() {
    let loader = load();
    for category in [
        RiskCategory::JointAngle,
        RiskCategory::JointLoad,
        RiskCategory::Kinematic,
        RiskCategory::MuscleLoad,
        RiskCategory::PostureAlignment,
    ] {
        let count = loader
            .threshold_rules()
            .filter(|r| r.spec.category == category)
            .count();
        assert!(count > 0, "no rules for {category}");
    }
}

#[test]
fn load_rules_scale_with_the_subject() {
    let loader = load();
    let shear = loader
        .get("knee-anterior-shear")
        .and_then(RuleDocument::as_threshold)
        .unwrap();
    assert_eq!(shear.spec.condition.scale, ThresholdScale::BodyWeight);
    assert!((shear.effective_threshold(70.0) - 137.34).abs() < 1e-9);

    let torque = loader
        .get("hip-rotation-torque-l")
        .and_then(RuleDocument::as_threshold)
        .unwrap();
    assert_eq!(torque.spec.condition.scale, ThresholdScale::BodyMass);
    assert_eq!(torque.effective_threshold(80.0), 120.0);
}

#[test]
fn default_scoring_boundaries() {
    let scoring = load().scoring_config();
    assert_eq!((scoring.high.count, scoring.high.duration), (5, 2.0));
    assert_eq!((scoring.moderate.count, scoring.moderate.duration), (2, 1.0));
}
