//! Risk evaluation pipeline
//!
//! Panel → rule evaluation + model probability → fusion → narrative → report.
//! The engine holds only read-only state built at startup, so one instance
//! can be shared across threads behind an `Arc`.

use crate::cli::Config;
use crate::errors::Result;
use crate::fusion::FusionEngine;
use crate::model::{LogisticModel, ProbabilityModel};
use crate::narrative::NarrativeGenerator;
use crate::panel::BiomarkerPanel;
use crate::ranges::ReferenceRangeTable;
use crate::report::{assemble, RiskReport};
use crate::rules::RuleEvaluator;
use std::sync::Arc;
use tracing::{info, warn};

/// Complete risk engine
#[derive(Clone)]
pub struct RiskEngine {
    evaluator: RuleEvaluator,
    fusion: FusionEngine,
    narrative: NarrativeGenerator,
    model: Arc<dyn ProbabilityModel>,
}

impl RiskEngine {
    /// Create engine with default ranges and policies around a model
    pub fn new(model: Arc<dyn ProbabilityModel>) -> Self {
        Self::with_components(model, RuleEvaluator::new(), FusionEngine::new())
    }

    /// Create engine from explicit components
    pub fn with_components(model: Arc<dyn ProbabilityModel>, evaluator: RuleEvaluator, fusion: FusionEngine) -> Self {
        Self {
            evaluator,
            fusion,
            narrative: NarrativeGenerator::new(),
            model,
        }
    }

    /// Build the engine described by a configuration, loading the model artifact
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let table = match &config.ranges {
            Some(ranges) => ReferenceRangeTable::from_ranges(ranges.clone())?,
            None => ReferenceRangeTable::default(),
        };
        let evaluator = RuleEvaluator::with_config(table, config.rules)?;
        let fusion = FusionEngine::with_policy(config.fusion)?;
        let model = LogisticModel::load(config.model_path())?;

        Ok(Self::with_components(Arc::new(model), evaluator, fusion))
    }

    /// Name of the model adapter
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Evaluate one panel
    ///
    /// Either a complete report or an error; a model failure is never
    /// replaced by a rule-only result.
    pub fn evaluate(&self, panel: &BiomarkerPanel) -> Result<RiskReport> {
        panel.validate()?;

        let evaluation = self.evaluator.evaluate(panel);
        let probability = self
            .model
            .predict_probability(&panel.features())
            .map_err(|e| {
                warn!(model = self.model.name(), error = %e, "model inference failed");
                e
            })?;

        let fusion = self.fusion.fuse_evaluation(&evaluation, probability)?;
        let narrative = self.narrative.narrate(fusion.risk_level, &evaluation.findings);
        let report = assemble(evaluation, fusion, narrative);

        info!(
            level = %report.risk_level,
            value = report.risk_value,
            rule_score = report.rule_score,
            issues = report.biomarker_issues.len(),
            "risk report ready"
        );
        Ok(report)
    }

    /// Parse request JSON and evaluate it
    pub fn evaluate_json(&self, input: &str) -> Result<RiskReport> {
        let panel = BiomarkerPanel::from_json(input)?;
        self.evaluate(&panel)
    }
}

impl std::fmt::Debug for RiskEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskEngine")
            .field("evaluator", &self.evaluator)
            .field("fusion", &self.fusion)
            .field("model", &self.model.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RiskError;
    use crate::fusion::RiskLevel;
    use crate::model::FixedProbability;

    fn engine(probability: f64) -> RiskEngine {
        RiskEngine::new(Arc::new(FixedProbability::new(probability).unwrap()))
    }

    #[test]
    fn test_healthy_panel_minimal() {
        let report = engine(0.05)
            .evaluate_json(r#"{"BMI": 22.5, "Chol": 3.8, "TG": 1.1, "HDL": 1.6, "LDL": 1.8, "Cr": 75, "BUN": 5.0}"#)
            .unwrap();
        assert_eq!(report.risk_level, RiskLevel::Minimal);
        assert_eq!(report.risk_value, 5);
    }

    #[test]
    fn test_invalid_panel_rejected_before_scoring() {
        let mut panel = BiomarkerPanel::new(22.5, 3.8, 1.1, 1.6, 1.8, 75.0, 5.0).unwrap();
        panel.tg = f64::NAN;
        assert!(matches!(engine(0.05).evaluate(&panel), Err(RiskError::Validation(_))));
    }

    #[test]
    fn test_from_config_missing_model_fails() {
        let mut config = Config::default();
        config.model.artifact_path = "/nonexistent/model.json".to_string();
        let err = RiskEngine::from_config(&config).unwrap_err();
        assert!(matches!(err, RiskError::ModelUnavailable(_)));
    }
}
