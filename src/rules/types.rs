//! Rule evaluation type definitions

use crate::errors::{Result, RiskError};
use crate::panel::Biomarker;
use crate::ranges::Tier;
use serde::{Deserialize, Serialize};

/// Constants of the rule score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulePolicy {
    /// Abnormal biomarkers needed before the clustering bonus applies (default: 3)
    pub clustering_threshold: usize,

    /// Points added for clustered abnormalities (default: 20)
    pub clustering_bonus: u8,

    /// Upper limit of the rule score (default: 100)
    pub score_cap: u8,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            clustering_threshold: 3,
            clustering_bonus: 20,
            score_cap: 100,
        }
    }
}

impl RulePolicy {
    /// Validate policy constants
    pub fn validate(&self) -> Result<()> {
        if self.clustering_threshold == 0 || self.clustering_threshold > Biomarker::COUNT {
            return Err(RiskError::Configuration(format!(
                "clustering_threshold must be between 1 and {}",
                Biomarker::COUNT
            )));
        }

        if self.score_cap == 0 || self.score_cap > 100 {
            return Err(RiskError::Configuration(
                "score_cap must be between 1 and 100".to_string(),
            ));
        }

        if self.clustering_bonus > self.score_cap {
            return Err(RiskError::Configuration(
                "clustering_bonus must not exceed score_cap".to_string(),
            ));
        }

        Ok(())
    }
}

/// Evaluation of one biomarker reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerFinding {
    pub biomarker: Biomarker,
    pub value: f64,
    pub unit: String,
    pub tier: Tier,
    pub weight: u8,
    pub message: String,
}

impl BiomarkerFinding {
    /// Whether the reading is outside the healthy band
    pub fn is_abnormal(&self) -> bool {
        self.tier.is_abnormal()
    }
}

/// Rule evaluator output for one panel
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEvaluation {
    /// One finding per biomarker, in canonical order
    pub findings: Vec<BiomarkerFinding>,

    /// Sum of tier weights before bonus and cap
    pub weight_sum: u32,

    /// Clustering bonus actually added (0 when fewer abnormalities)
    pub clustering_bonus: u8,

    /// Final rule score (0 to score cap)
    pub rule_score: u8,
}

impl RuleEvaluation {
    /// Number of biomarkers outside the healthy band
    pub fn abnormal_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_abnormal()).count()
    }

    /// Largest single weight across findings
    pub fn max_weight(&self) -> u8 {
        self.findings.iter().map(|f| f.weight).max().unwrap_or(0)
    }

    /// Finding for a biomarker
    pub fn finding(&self, biomarker: Biomarker) -> Option<&BiomarkerFinding> {
        self.findings.iter().find(|f| f.biomarker == biomarker)
    }

    /// Messages of abnormal findings, in canonical order
    pub fn issues(&self) -> Vec<String> {
        self.findings
            .iter()
            .filter(|f| f.is_abnormal())
            .map(|f| f.message.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_valid() {
        assert!(RulePolicy::default().validate().is_ok());
    }

    #[test]
    fn test_policy_rejects_zero_threshold() {
        let policy = RulePolicy {
            clustering_threshold: 0,
            ..RulePolicy::default()
        };
        assert!(matches!(policy.validate(), Err(RiskError::Configuration(_))));
    }

    #[test]
    fn test_policy_rejects_cap_over_100() {
        let policy = RulePolicy {
            score_cap: 120,
            ..RulePolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_partial_toml() {
        let policy: RulePolicy = toml::from_str("clustering_bonus = 15").unwrap();
        assert_eq!(policy.clustering_bonus, 15);
        assert_eq!(policy.clustering_threshold, 3);
    }
}
