//! Model adapter contract

use crate::errors::{Result, RiskError};
use crate::panel::FeatureVector;

/// Source of disease probabilities
///
/// Implementations must be safe for concurrent read-only use. A failure to
/// produce a probability is reported as `RiskError::ModelUnavailable`.
pub trait ProbabilityModel: Send + Sync {
    /// Identifier for logs
    fn name(&self) -> &str;

    /// Probability of disease for features in canonical order
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64>;
}

/// Adapter that always returns the same probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProbability {
    probability: f64,
}

impl FixedProbability {
    /// Create a fixed adapter; the probability must lie in `[0, 1]`
    pub fn new(probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(RiskError::ModelUnavailable(format!(
                "fixed probability {} is outside [0, 1]",
                probability
            )));
        }
        Ok(Self { probability })
    }
}

impl ProbabilityModel for FixedProbability {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict_probability(&self, _features: &FeatureVector) -> Result<f64> {
        Ok(self.probability)
    }
}
