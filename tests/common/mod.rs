//! Shared fixtures for integration tests

#![allow(dead_code)]

use biorisk::model::{FixedProbability, ProbabilityModel};
use biorisk::panel::FeatureVector;
use biorisk::{BiomarkerPanel, RiskEngine, RiskError};
use std::path::PathBuf;
use std::sync::Arc;

/// All seven biomarkers inside their healthy bands
pub fn healthy_panel() -> BiomarkerPanel {
    BiomarkerPanel::new(22.5, 3.8, 1.1, 1.6, 1.8, 75.0, 5.0).unwrap()
}

/// Every biomarker abnormal
pub fn severe_panel() -> BiomarkerPanel {
    BiomarkerPanel::new(34.0, 6.8, 2.6, 0.8, 4.2, 130.0, 9.0).unwrap()
}

/// Engine backed by a constant probability
pub fn engine_with(probability: f64) -> RiskEngine {
    RiskEngine::new(Arc::new(FixedProbability::new(probability).unwrap()))
}

/// Sample artifact shipped in the repository
pub fn sample_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("models")
        .join("sample_logistic.json")
}

/// Adapter whose backing model cannot be reached
pub struct UnavailableModel;

impl ProbabilityModel for UnavailableModel {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn predict_probability(&self, _features: &FeatureVector) -> biorisk::Result<f64> {
        Err(RiskError::ModelUnavailable("backing artifact not loaded".to_string()))
    }
}

/// Adapter returning an out-of-contract value
pub struct BrokenModel(pub f64);

impl ProbabilityModel for BrokenModel {
    fn name(&self) -> &str {
        "broken"
    }

    fn predict_probability(&self, _features: &FeatureVector) -> biorisk::Result<f64> {
        Ok(self.0)
    }
}
