//! Fusion engine
//!
//! Policy:
//! - `model_risk = round(p × 100)`
//! - `fused = max(model_risk, rule_score)`; the rule score is a floor
//! - any finding weight ≥ `severe_weight` lifts `fused` to at least `severe_floor`
//! - clamp to [0, 100], then band into a `RiskLevel`

use crate::errors::{Result, RiskError};
use crate::fusion::types::{FusionPolicy, FusionResult, RiskLevel};
use crate::rules::RuleEvaluation;
use tracing::debug;

/// Fusion engine with a fixed policy
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    policy: FusionPolicy,
}

impl FusionEngine {
    /// Create engine with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create engine with a custom policy
    pub fn with_policy(policy: FusionPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Fuse a rule evaluation with a model probability
    pub fn fuse_evaluation(&self, evaluation: &RuleEvaluation, model_probability: f64) -> Result<FusionResult> {
        self.fuse(evaluation.rule_score, evaluation.max_weight(), model_probability)
    }

    /// Fuse raw scores
    ///
    /// `max_weight` is the largest single finding weight. A probability
    /// outside `[0, 1]` means the adapter is broken and is rejected.
    pub fn fuse(&self, rule_score: u8, max_weight: u8, model_probability: f64) -> Result<FusionResult> {
        if !(0.0..=1.0).contains(&model_probability) {
            return Err(RiskError::ModelUnavailable(format!(
                "model returned probability {} outside [0, 1]",
                model_probability
            )));
        }

        let model_risk = (model_probability * 100.0).round() as u8;
        let mut fused = model_risk.max(rule_score);

        let severe_floor_applied = max_weight >= self.policy.severe_weight && fused < self.policy.severe_floor;
        if severe_floor_applied {
            fused = self.policy.severe_floor;
        }

        let fused_risk_value = fused.min(100);
        let risk_level = RiskLevel::from_value(fused_risk_value);

        debug!(
            rule_score,
            model_risk,
            fused_risk_value,
            severe_floor_applied,
            level = %risk_level,
            "fused risk"
        );

        Ok(FusionResult {
            rule_score,
            model_probability,
            model_risk,
            fused_risk_value,
            risk_level,
            severe_floor_applied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_dominates_when_higher() {
        let result = FusionEngine::new().fuse(10, 10, 0.42).unwrap();
        assert_eq!(result.model_risk, 42);
        assert_eq!(result.fused_risk_value, 42);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert!(!result.severe_floor_applied);
    }

    #[test]
    fn test_rule_score_is_floor() {
        let result = FusionEngine::new().fuse(50, 10, 0.05).unwrap();
        assert_eq!(result.fused_risk_value, 50);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_severe_floor() {
        let result = FusionEngine::new().fuse(25, 25, 0.1).unwrap();
        assert_eq!(result.fused_risk_value, 60);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result.severe_floor_applied);
    }

    #[test]
    fn test_severe_floor_not_applied_when_already_higher() {
        let result = FusionEngine::new().fuse(25, 25, 0.9).unwrap();
        assert_eq!(result.fused_risk_value, 90);
        assert!(!result.severe_floor_applied);
    }

    #[test]
    fn test_severe_weight_threshold_inclusive() {
        let engine = FusionEngine::new();
        assert_eq!(engine.fuse(20, 20, 0.0).unwrap().fused_risk_value, 60);
        assert_eq!(engine.fuse(19, 19, 0.0).unwrap().fused_risk_value, 19);
    }

    #[test]
    fn test_rounding() {
        let engine = FusionEngine::new();
        assert_eq!(engine.fuse(0, 0, 0.146).unwrap().model_risk, 15);
        assert_eq!(engine.fuse(0, 0, 0.144).unwrap().model_risk, 14);
        assert_eq!(engine.fuse(0, 0, 1.0).unwrap().fused_risk_value, 100);
    }

    #[test]
    fn test_probability_out_of_range_is_model_failure() {
        let engine = FusionEngine::new();
        assert!(matches!(engine.fuse(0, 0, 1.2), Err(RiskError::ModelUnavailable(_))));
        assert!(matches!(engine.fuse(0, 0, f64::NAN), Err(RiskError::ModelUnavailable(_))));
    }

    #[test]
    fn test_custom_policy() {
        let policy = FusionPolicy {
            severe_weight: 25,
            severe_floor: 70,
        };
        let engine = FusionEngine::with_policy(policy).unwrap();
        assert_eq!(engine.fuse(20, 20, 0.1).unwrap().fused_risk_value, 20);
        assert_eq!(engine.fuse(25, 25, 0.1).unwrap().fused_risk_value, 70);
    }
}
