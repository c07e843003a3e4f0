//! Configuration loading and engine construction tests

mod common;

use biorisk::cli::Config;
use biorisk::ranges::{Bound, Boundary, ReferenceRange, Tier};
use biorisk::{Biomarker, RiskEngine, RiskError};
use common::*;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_engine_from_config_with_sample_model() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &format!(
            "[model]\nartifact_path = {:?}\n\n[fusion]\nsevere_floor = 65\n",
            sample_model_path().display().to_string()
        ),
    );

    let config = Config::load(Some(path)).unwrap();
    assert_eq!(config.fusion.severe_floor, 65);
    assert_eq!(config.rules.clustering_bonus, 20);

    let engine = RiskEngine::from_config(&config).unwrap();
    assert_eq!(engine.model_name(), "sample-diabetes-logistic");

    let panel = healthy_panel().with_value(Biomarker::Cr, 150.0);
    let report = engine.evaluate(&panel).unwrap();
    assert!(report.risk_value >= 65);
}

#[test]
fn test_missing_model_fails_engine_startup() {
    let mut config = Config::default();
    config.model.artifact_path = "/nonexistent/model.json".to_string();
    assert!(matches!(
        RiskEngine::from_config(&config),
        Err(RiskError::ModelUnavailable(_))
    ));
}

#[test]
fn test_incomplete_ranges_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[[ranges]]
biomarker = "BMI"

[[ranges.boundaries]]
tier = "borderline"
weight = 10
message = "Elevated BMI"
bound = { at_or_above = 25.0 }

[[ranges.boundaries]]
tier = "high-risk"
weight = 20
message = "High BMI"
bound = { at_or_above = 30.0 }
"#,
    );

    let err = Config::load(Some(path)).unwrap_err();
    assert!(matches!(err, RiskError::Configuration(_)));
    assert!(err.to_string().contains("BUN"));
}

#[test]
fn test_custom_ranges_change_classification() {
    let mut config = Config::default();
    config.model.artifact_path = sample_model_path().display().to_string();

    let mut ranges = biorisk::ranges::ReferenceRangeTable::default().ranges().to_vec();
    let bmi = ranges
        .iter_mut()
        .find(|r| r.biomarker == Biomarker::Bmi)
        .unwrap();
    *bmi = ReferenceRange::new(
        Biomarker::Bmi,
        vec![
            Boundary::new(Bound::AtOrAbove(23.0), Tier::Borderline, 10, "Above Asian BMI cut-off"),
            Boundary::new(Bound::AtOrAbove(27.5), Tier::HighRisk, 20, "High BMI for Asian cut-off"),
        ],
    );
    config.ranges = Some(ranges);

    let engine = RiskEngine::from_config(&config).unwrap();
    let report = engine.evaluate(&healthy_panel().with_value(Biomarker::Bmi, 24.0)).unwrap();
    assert_eq!(report.findings[0].tier, Tier::Borderline);
    assert_eq!(report.rule_score, 10);
}

#[test]
fn test_invalid_policy_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[batch]\nmax_parallel = 0\n");
    assert!(matches!(
        Config::load(Some(path)),
        Err(RiskError::Configuration(_))
    ));
}

#[test]
fn test_unreachable_severe_weight_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[fusion]\nsevere_weight = 30\n");
    assert!(matches!(
        Config::load(Some(path)),
        Err(RiskError::Configuration(_))
    ));

    let mut config = Config::default();
    config.model.artifact_path = sample_model_path().display().to_string();
    config.fusion.severe_weight = 30;
    assert!(matches!(
        RiskEngine::from_config(&config),
        Err(RiskError::Configuration(_))
    ));
}

#[test]
fn test_floor_outside_elevated_band_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[fusion]\nsevere_floor = 0\n");
    assert!(matches!(
        Config::load(Some(path)),
        Err(RiskError::Configuration(_))
    ));
}

#[test]
fn test_custom_ranges_must_reach_severe_weight() {
    let mut config = Config::default();
    let capped: Vec<ReferenceRange> = biorisk::ranges::ReferenceRangeTable::default()
        .ranges()
        .iter()
        .map(|range| {
            let boundaries = range
                .boundaries
                .iter()
                .map(|b| {
                    let weight = if b.tier == Tier::HighRisk { 12 } else { 6 };
                    Boundary::new(b.bound, b.tier, weight, b.message.clone())
                })
                .collect();
            ReferenceRange::new(range.biomarker, boundaries)
        })
        .collect();
    config.ranges = Some(capped);

    assert!(matches!(config.validate(), Err(RiskError::Configuration(_))));
    config.fusion.severe_weight = 12;
    assert!(config.validate().is_ok());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.logging.level = "debug".to_string();
    config.save(&path).unwrap();

    let reloaded = Config::load(Some(path)).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_save_into_unwritable_location_is_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "plain file").unwrap();

    let err = Config::default().save(&blocker.join("config.toml")).unwrap_err();
    assert!(matches!(err, RiskError::Io(_)));
    assert_eq!(err.kind(), "io");
}
