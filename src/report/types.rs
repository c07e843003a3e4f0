//! Report type definitions

use crate::fusion::RiskLevel;
use crate::narrative::DiseaseTag;
use crate::ranges::Tier;
use crate::rules::BiomarkerFinding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Display polarity of a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorKind {
    Positive,
    Warning,
    Negative,
}

impl From<Tier> for FactorKind {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Healthy => Self::Positive,
            Tier::Borderline => Self::Warning,
            Tier::HighRisk => Self::Negative,
        }
    }
}

/// One line of the report narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    #[serde(rename = "type")]
    pub kind: FactorKind,
    pub text: String,
}

/// Complete risk summary for one panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub risk_level: RiskLevel,

    /// Fused risk value (0 to 100)
    pub risk_value: u8,

    pub rule_score: u8,
    pub model_probability: f64,

    /// One factor per biomarker, canonical order
    pub factors: Vec<Factor>,

    /// One finding per biomarker, canonical order
    pub findings: Vec<BiomarkerFinding>,

    /// Messages of abnormal findings only
    pub biomarker_issues: Vec<String>,

    pub recommendation: String,
    pub potential_diseases: BTreeSet<DiseaseTag>,
}
