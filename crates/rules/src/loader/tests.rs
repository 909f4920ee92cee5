//! Tests for the rule loader module.

use std::collections::HashMap;
use std::fs;

use tempfile::TempDir;

use super::extends::resolve_one;
use super::*;
use crate::schema::{RuleDocument, RuleKind, SignalSource};

const KNEE_R_YAML: &str = r#"
apiVersion: v1
kind: ThresholdRule
metadata:
  id: knee-valgus-r
  name: Knee Valgus (Right)
  tags: [right]
spec:
  category: joint_angle
  risk_type: ACL Injury Risk
  signal:
    table: ik
    column: knee_angle_r
    to_degrees: true
  condition:
    operator: gt
    threshold: 10
    unit: deg
  rationale: Excessive valgus increases ACL strain.
"#;

const KNEE_L_YAML: &str = r#"
apiVersion: v1
kind: ThresholdRule
metadata:
  id: knee-valgus-l
  name: Knee Valgus (Left)
  tags: [left]
  extends: knee-valgus-r
spec:
  signal:
    column: knee_angle_l
"#;

const SCORING_YAML: &str = r#"
apiVersion: v1
kind: ScoringConfig
metadata:
  id: scoring-strict
  name: Strict Scoring
spec:
  high:
    count: 1
    duration: 0.5
"#;

fn temp_loader() -> (TempDir, RuleLoader) {
    let dir = TempDir::new().expect("create tempdir");
    let loader = RuleLoader::new(dir.path().to_path_buf());
    (dir, loader)
}

fn loaded_ids(results: &[LoadResult]) -> Vec<&str> {
    results.iter().filter_map(LoadResult::rule_id).collect()
}

fn yaml_key<'a>(value: &'a serde_yaml::Value, key: &str) -> &'a serde_yaml::Value {
    value
        .as_mapping()
        .and_then(|m| m.get(&serde_yaml::Value::String(key.to_string())))
        .unwrap_or_else(|| panic!("missing key '{key}'"))
}

#[test]
fn load_rule_from_file() {
    let (dir, loader) = temp_loader();
    let rule_path = dir.path().join("knee-valgus-r.yml");
    fs::write(&rule_path, KNEE_R_YAML).unwrap();

    let doc = loader.load_file(&rule_path).unwrap();
    assert_eq!(doc.metadata().id, "knee-valgus-r");
    assert_eq!(doc.kind(), RuleKind::ThresholdRule);
    assert!(doc.as_threshold().is_some());
}

#[test]
fn load_all_skips_dotfiles_and_non_yaml() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("knee.yml"), KNEE_R_YAML).unwrap();
    fs::write(dir.path().join(".hidden.yml"), KNEE_R_YAML).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a rule").unwrap();

    let results = loader.load_all().unwrap();

    assert_eq!(loaded_ids(&results), vec!["knee-valgus-r"]);
    let skipped = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Skipped { .. }))
        .count();
    assert_eq!(skipped, 2);
    assert_eq!(loader.len(), 1);
}

#[test]
fn load_all_recurses_in_sorted_order() {
    let (dir, mut loader) = temp_loader();
    let scoring = dir.path().join("scoring");
    let angles = dir.path().join("joint_angle");
    fs::create_dir_all(&scoring).unwrap();
    fs::create_dir_all(&angles).unwrap();
    fs::write(scoring.join("strict.yml"), SCORING_YAML).unwrap();
    fs::write(angles.join("b-knee-l.yaml"), KNEE_L_YAML).unwrap();
    fs::write(angles.join("a-knee-r.yml"), KNEE_R_YAML).unwrap();

    let results = loader.load_all().unwrap();

    assert_eq!(
        loaded_ids(&results),
        vec!["knee-valgus-r", "knee-valgus-l", "scoring-strict"]
    );
    let order: Vec<_> = loader.documents().keys().map(String::as_str).collect();
    assert_eq!(order, vec!["knee-valgus-r", "knee-valgus-l", "scoring-strict"]);
}

#[test]
fn extends_resolves_across_files() {
    let (dir, mut loader) = temp_loader();
    // Child sorts before its parent; resolution must not depend on file order.
    fs::write(dir.path().join("a-left.yml"), KNEE_L_YAML).unwrap();
    fs::write(dir.path().join("b-right.yml"), KNEE_R_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert!(results.iter().all(|r| !r.is_failed()), "{results:?}");

    let left = loader.get("knee-valgus-l").and_then(RuleDocument::as_threshold).unwrap();
    assert_eq!(left.metadata.name, "Knee Valgus (Left)");
    assert_eq!(left.metadata.tags, vec!["left"]);
    assert_eq!(left.spec.signal.source, SignalSource::Column("knee_angle_l".to_string()));
    assert!(left.spec.signal.to_degrees);
    assert_eq!(left.spec.condition.threshold, 10.0);
    assert_eq!(left.spec.risk_type, "ACL Injury Risk");
}

#[test]
fn child_signal_source_replaces_parent_source() {
    let (dir, mut loader) = temp_loader();
    let child = r#"
apiVersion: v1
kind: ThresholdRule
metadata:
  id: knee-mean
  name: Knee Angle (Mean)
  extends: knee-valgus-r
spec:
  signal:
    mean_of: [knee_angle]
"#;
    fs::write(dir.path().join("a-knee-r.yml"), KNEE_R_YAML).unwrap();
    fs::write(dir.path().join("b-knee-mean.yml"), child).unwrap();

    let results = loader.load_all().unwrap();
    assert!(results.iter().all(|r| !r.is_failed()), "{results:?}");

    let rule = loader.get("knee-mean").and_then(RuleDocument::as_threshold).unwrap();
    assert_eq!(
        rule.spec.signal.source,
        SignalSource::MeanOf(vec!["knee_angle".to_string()])
    );
    // Non-source signal fields are still inherited.
    assert!(rule.spec.signal.to_degrees);

    let parent = loader.get("knee-valgus-r").and_then(RuleDocument::as_threshold).unwrap();
    assert_eq!(parent.spec.signal.source, SignalSource::Column("knee_angle_r".to_string()));
}

#[test]
fn missing_parent_fails_only_the_child() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("left.yml"), KNEE_L_YAML).unwrap();
    fs::write(
        dir.path().join("other.yml"),
        KNEE_R_YAML.replace("id: knee-valgus-r", "id: unrelated"),
    )
    .unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_ids(&results), vec!["unrelated"]);
    let failed = results.iter().find(|r| r.is_failed()).unwrap();
    match &failed.status {
        LoadStatus::Failed { error } => assert!(error.contains("not found"), "{error}"),
        other => panic!("unexpected status {other:?}"),
    }
}

#[test]
fn duplicate_ids_fail_second_file() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("a.yml"), KNEE_R_YAML).unwrap();
    fs::write(dir.path().join("b.yml"), KNEE_R_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_ids(&results), vec!["knee-valgus-r"]);
    let failed: Vec<_> = results.iter().filter(|r| r.is_failed()).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].path.ends_with("b.yml"));
}

#[test]
fn invalid_yaml_produces_error_not_panic() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("broken.yml"), "apiVersion: v1\nkind: [unclosed").unwrap();
    fs::write(dir.path().join("knee.yml"), KNEE_R_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(results.iter().filter(|r| r.is_failed()).count(), 1);
    assert_eq!(loader.len(), 1);
}

#[test]
fn empty_id_fails_validation() {
    let (dir, mut loader) = temp_loader();
    fs::write(
        dir.path().join("noid.yml"),
        KNEE_R_YAML.replace("id: knee-valgus-r", "id: \"\""),
    )
    .unwrap();

    let results = loader.load_all().unwrap();
    assert!(results[0].is_failed());
    assert!(loader.is_empty());
}

#[test]
fn missing_directory_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let mut loader = RuleLoader::new(dir.path().join("absent"));
    let results = loader.load_all().unwrap();
    assert!(results.is_empty());
    assert!(!loader.rules_dir().exists());
}

#[test]
fn threshold_rules_skip_disabled_and_scoring() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("a.yml"), KNEE_R_YAML).unwrap();
    fs::write(
        dir.path().join("b.yml"),
        KNEE_L_YAML.replace("  extends:", "  enabled: false\n  extends:"),
    )
    .unwrap();
    fs::write(dir.path().join("c.yml"), SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    let ids: Vec<_> = loader.threshold_rules().map(|r| r.metadata.id.as_str()).collect();
    assert_eq!(ids, vec!["knee-valgus-r"]);

    let scoring = loader.scoring_config();
    assert_eq!(scoring.high.count, 1);
    // Omitted level keeps its default.
    assert_eq!(scoring.moderate.count, 2);
}

#[test]
fn scoring_config_defaults_without_document() {
    let (_dir, loader) = temp_loader();
    assert_eq!(loader.scoring_config(), crate::scoring_config::ScoringConfigSpec::default());
}

#[test]
fn builtin_rules_load() {
    let (_dir, mut loader) = temp_loader();
    let results = loader.load_builtin();
    assert!(results.iter().all(|r| !r.is_failed()), "{results:?}");
    assert!(results[0].path.to_string_lossy().starts_with("builtin:"));
    assert!(loader.threshold_rules().count() > 30);
    assert!(loader.get("knee-valgus-l").is_some());
}

#[test]
fn fallback_loads_builtin_for_empty_directory() {
    let (_dir, mut loader) = temp_loader();
    let results = loader.load_with_fallback().unwrap();
    assert!(results.iter().all(|r| !r.is_failed()), "{results:?}");
    assert_eq!(loader.threshold_rules().count(), 43);
}

#[test]
fn fallback_skipped_when_directory_rules_are_all_disabled() {
    let (dir, mut loader) = temp_loader();
    fs::write(
        dir.path().join("knee.yml"),
        KNEE_R_YAML.replace("  tags: [right]", "  tags: [right]\n  enabled: false"),
    )
    .unwrap();

    loader.load_with_fallback().unwrap();
    assert_eq!(loader.len(), 1);
    assert_eq!(loader.threshold_rules().count(), 0);
    let knee = loader.get("knee-valgus-r").map(|d| d.metadata().enabled);
    assert_eq!(knee, Some(false));
}

#[test]
fn builtin_does_not_replace_directory_documents() {
    let (dir, mut loader) = temp_loader();
    let scoring = SCORING_YAML.replace("id: scoring-strict", "id: scoring-default");
    fs::write(dir.path().join("scoring.yml"), scoring).unwrap();

    let results = loader.load_with_fallback().unwrap();
    assert!(results.iter().any(|r| matches!(
        &r.status,
        LoadStatus::Skipped { reason } if reason.contains("rules directory")
    )));
    assert_eq!(loader.scoring_config().high.count, 1);
    assert_eq!(loader.threshold_rules().count(), 43);
}

#[test]
fn later_batch_can_extend_builtin_rule() {
    let (dir, mut loader) = temp_loader();
    loader.load_builtin();
    let custom = r#"
apiVersion: v1
kind: ThresholdRule
metadata:
  id: knee-valgus-strict
  name: Knee Valgus (Strict)
  extends: knee-valgus-r
spec:
  condition:
    threshold: 6
"#;
    fs::write(dir.path().join("strict.yml"), custom).unwrap();
    let results = loader.load_all().unwrap();
    assert_eq!(loaded_ids(&results), vec!["knee-valgus-strict"]);

    let strict = loader
        .get("knee-valgus-strict")
        .and_then(RuleDocument::as_threshold)
        .unwrap();
    assert_eq!(strict.spec.condition.threshold, 6.0);
    assert_eq!(strict.spec.condition.unit, "deg");
}

// ── Inheritance ─────────────────────────────────────────────────

#[test]
fn deep_merge_overrides_scalars_and_keeps_siblings() {
    let parent: serde_yaml::Value =
        serde_yaml::from_str("condition:\n  operator: gt\n  threshold: 10\n  unit: deg").unwrap();
    let child: serde_yaml::Value = serde_yaml::from_str("condition:\n  threshold: 6").unwrap();
    let merged = deep_merge(&parent, &child);
    let condition = yaml_key(&merged, "condition");
    assert_eq!(yaml_key(condition, "threshold").as_i64(), Some(6));
    assert_eq!(yaml_key(condition, "unit").as_str(), Some("deg"));
}

#[test]
fn deep_merge_replaces_sequences() {
    let parent: serde_yaml::Value = serde_yaml::from_str("mean_of: [gaslat_r, gasmed_r]").unwrap();
    let child: serde_yaml::Value = serde_yaml::from_str("mean_of: [gaslat_l]").unwrap();
    let merged = deep_merge(&parent, &child);
    let fragments = yaml_key(&merged, "mean_of").as_sequence().unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].as_str(), Some("gaslat_l"));
}

#[test]
fn extends_multi_level_chain() {
    let raw: HashMap<String, serde_yaml::Value> = [
        ("base", "metadata:\n  id: base\nspec:\n  a: 1\n  b: 1\n  c: 1"),
        ("mid", "metadata:\n  id: mid\n  extends: base\nspec:\n  b: 2"),
        ("leaf", "metadata:\n  id: leaf\n  extends: mid\nspec:\n  c: 3"),
    ]
    .into_iter()
    .map(|(id, y)| (id.to_string(), serde_yaml::from_str(y).unwrap()))
    .collect();

    let mut resolved = HashMap::new();
    let leaf = resolve_one("leaf", &raw, &mut resolved).unwrap();
    let spec = yaml_key(&leaf, "spec");
    assert_eq!(yaml_key(spec, "a").as_i64(), Some(1));
    assert_eq!(yaml_key(spec, "b").as_i64(), Some(2));
    assert_eq!(yaml_key(spec, "c").as_i64(), Some(3));
    // Ancestors are cached on the way.
    assert_eq!(resolved["base"], raw["base"]);
    assert!(resolved.contains_key("mid"));
}

#[test]
fn extends_rejects_cycles_and_missing_parents() {
    let cycle: HashMap<String, serde_yaml::Value> = [
        ("a", "metadata:\n  id: a\n  extends: b"),
        ("b", "metadata:\n  id: b\n  extends: a"),
    ]
    .into_iter()
    .map(|(id, y)| (id.to_string(), serde_yaml::from_str(y).unwrap()))
    .collect();
    assert_eq!(
        resolve_one("a", &cycle, &mut HashMap::new()).unwrap_err(),
        ExtendsError::Cycle("a".to_string())
    );

    let orphan: HashMap<String, serde_yaml::Value> = [(
        "child".to_string(),
        serde_yaml::from_str("metadata:\n  id: child\n  extends: nowhere").unwrap(),
    )]
    .into_iter()
    .collect();
    assert_eq!(
        resolve_one("child", &orphan, &mut HashMap::new()).unwrap_err(),
        ExtendsError::Missing("nowhere".to_string())
    );
}

#[test]
fn extends_depth_limit() {
    let raw: HashMap<String, serde_yaml::Value> = (0..8)
        .map(|i| {
            let yaml = if i == 0 {
                "metadata:\n  id: r0".to_string()
            } else {
                format!("metadata:\n  id: r{i}\n  extends: r{}", i - 1)
            };
            (format!("r{i}"), serde_yaml::from_str(&yaml).unwrap())
        })
        .collect();
    let err = resolve_one("r7", &raw, &mut HashMap::new()).unwrap_err();
    assert_eq!(err, ExtendsError::TooDeep("r1".to_string()));
    assert!(err.to_string().contains("maximum depth"));
}
