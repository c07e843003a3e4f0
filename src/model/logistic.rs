//! Logistic classifier with standard scaling
//!
//! Loaded from a JSON artifact exported by the training pipeline:
//!
//! ```json
//! {
//!   "name": "diabetes-logistic-v1",
//!   "features": ["BMI", "Chol", "TG", "HDL", "LDL", "Cr", "BUN"],
//!   "scaler": { "mean": [...], "scale": [...] },
//!   "classifier": { "coefficients": [...], "intercept": -0.4 }
//! }
//! ```

use crate::errors::{Result, RiskError};
use crate::model::adapter::ProbabilityModel;
use crate::panel::{Biomarker, FeatureVector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Standard scaler parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Logistic regression parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Serialized model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifact {
    pub name: String,
    pub features: Vec<Biomarker>,
    pub scaler: ScalerParams,
    pub classifier: ClassifierParams,
}

/// Scaled logistic classifier
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    name: String,
    mean: [f64; Biomarker::COUNT],
    scale: [f64; Biomarker::COUNT],
    coefficients: [f64; Biomarker::COUNT],
    intercept: f64,
}

impl LogisticModel {
    /// Load a model artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RiskError::ModelUnavailable(format!(
                "cannot read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        let artifact: ModelArtifact = serde_json::from_str(&contents).map_err(|e| {
            RiskError::ModelUnavailable(format!(
                "malformed model artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        let model = Self::from_artifact(artifact)?;
        info!(model = %model.name, path = %path.display(), "model artifact loaded");
        Ok(model)
    }

    /// Build a model from decoded parameters
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        if artifact.features != Biomarker::ALL {
            let got: Vec<&str> = artifact.features.iter().map(|b| b.key()).collect();
            return Err(RiskError::ModelUnavailable(format!(
                "artifact feature order [{}] does not match [BMI, Chol, TG, HDL, LDL, Cr, BUN]",
                got.join(", ")
            )));
        }

        let mean = fixed_width("scaler.mean", &artifact.scaler.mean)?;
        let scale = fixed_width("scaler.scale", &artifact.scaler.scale)?;
        let coefficients = fixed_width("classifier.coefficients", &artifact.classifier.coefficients)?;

        if let Some(i) = scale.iter().position(|s| *s == 0.0) {
            return Err(RiskError::ModelUnavailable(format!(
                "scaler.scale for {} is zero",
                Biomarker::ALL[i]
            )));
        }
        if !artifact.classifier.intercept.is_finite() {
            return Err(RiskError::ModelUnavailable(
                "classifier.intercept is not finite".to_string(),
            ));
        }

        Ok(Self {
            name: artifact.name,
            mean,
            scale,
            coefficients,
            intercept: artifact.classifier.intercept,
        })
    }

    /// Linear score before the sigmoid
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        features
            .as_slice()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (z, coef)| acc + z * coef)
    }
}

impl ProbabilityModel for LogisticModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<f64> {
        let z = self.decision_function(features);
        if !z.is_finite() {
            return Err(RiskError::ModelUnavailable(format!(
                "model {} produced a non-finite score",
                self.name
            )));
        }
        Ok(sigmoid(z))
    }
}

/// Logistic function, stable for large |z|
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn fixed_width(field: &str, values: &[f64]) -> Result<[f64; Biomarker::COUNT]> {
    let array: [f64; Biomarker::COUNT] = values.try_into().map_err(|_| {
        RiskError::ModelUnavailable(format!(
            "{} has {} values, expected {}",
            field,
            values.len(),
            Biomarker::COUNT
        ))
    })?;
    if array.iter().any(|v| !v.is_finite()) {
        return Err(RiskError::ModelUnavailable(format!(
            "{} contains non-finite values",
            field
        )));
    }
    Ok(array)
}
