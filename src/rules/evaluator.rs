//! Rule evaluator
//! Scores a panel against the reference range table

use crate::errors::Result;
use crate::panel::{Biomarker, BiomarkerPanel};
use crate::ranges::{ReferenceRangeTable, Tier};
use crate::rules::types::{BiomarkerFinding, RuleEvaluation, RulePolicy};
use tracing::debug;

/// Rule evaluator over a fixed reference range table
#[derive(Debug, Clone)]
pub struct RuleEvaluator {
    /// Reference ranges
    table: ReferenceRangeTable,

    /// Score constants
    policy: RulePolicy,
}

impl RuleEvaluator {
    /// Create evaluator with the clinical default ranges and policy
    pub fn new() -> Self {
        Self {
            table: ReferenceRangeTable::default(),
            policy: RulePolicy::default(),
        }
    }

    /// Create evaluator with custom ranges and policy
    pub fn with_config(table: ReferenceRangeTable, policy: RulePolicy) -> Result<Self> {
        table.validate()?;
        policy.validate()?;
        Ok(Self { table, policy })
    }

    /// Evaluate a panel
    ///
    /// Score: `min(cap, Σ weight_i + bonus)`, where `bonus` applies once
    /// `clustering_threshold` or more biomarkers are abnormal. Each weight
    /// is non-decreasing in its biomarker's distance from the healthy band,
    /// so the score is monotone per biomarker.
    pub fn evaluate(&self, panel: &BiomarkerPanel) -> RuleEvaluation {
        let findings: Vec<BiomarkerFinding> = Biomarker::ALL
            .iter()
            .map(|&biomarker| self.assess(biomarker, panel.value(biomarker)))
            .collect();

        let weight_sum: u32 = findings.iter().map(|f| u32::from(f.weight)).sum();
        let abnormal = findings.iter().filter(|f| f.is_abnormal()).count();
        let clustering_bonus = if abnormal >= self.policy.clustering_threshold {
            self.policy.clustering_bonus
        } else {
            0
        };

        let uncapped = weight_sum + u32::from(clustering_bonus);
        let rule_score = uncapped.min(u32::from(self.policy.score_cap)) as u8;

        debug!(
            weight_sum,
            abnormal,
            clustering_bonus,
            rule_score,
            "rule evaluation complete"
        );

        RuleEvaluation {
            findings,
            weight_sum,
            clustering_bonus,
            rule_score,
        }
    }

    /// Classify one reading
    fn assess(&self, biomarker: Biomarker, value: f64) -> BiomarkerFinding {
        let classification = self.table.range_for(biomarker).classify(value);
        let headline = match classification.boundary {
            Some(boundary) => boundary.message.clone(),
            None => format!("{} within normal range", biomarker.display_name()),
        };
        let message = format!("{} ({} {})", headline, value, biomarker.unit());

        if classification.tier != Tier::Healthy {
            debug!(%biomarker, value, tier = %classification.tier, weight = classification.weight, "abnormal reading");
        }

        BiomarkerFinding {
            biomarker,
            value,
            unit: biomarker.unit().to_string(),
            tier: classification.tier,
            weight: classification.weight,
            message,
        }
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
