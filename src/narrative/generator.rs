//! Narrative generator
//!
//! Recommendations depend only on the risk level. Disease tags depend only on
//! the observed values, except for the generic metabolic tag which keeps an
//! elevated report from carrying an empty disease list.

use crate::fusion::RiskLevel;
use crate::narrative::types::{DiseaseTag, Narrative};
use crate::panel::Biomarker;
use crate::rules::BiomarkerFinding;
use std::collections::BTreeSet;

/// Stateless narrative generator
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeGenerator;

impl NarrativeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Recommendation text and candidate conditions for a report
    pub fn narrate(&self, level: RiskLevel, findings: &[BiomarkerFinding]) -> Narrative {
        let mut potential_diseases = Self::diseases_from_values(findings);
        if potential_diseases.is_empty() && level.is_elevated() {
            potential_diseases.insert(DiseaseTag::MetabolicSyndrome);
        }

        Narrative {
            recommendation: Self::recommendation(level).to_string(),
            potential_diseases,
        }
    }

    /// Fixed recommendation per level
    pub fn recommendation(level: RiskLevel) -> &'static str {
        match level {
            RiskLevel::Minimal => "Continue maintaining your healthy lifestyle with regular check-ups.",
            RiskLevel::Low => "Maintain current lifestyle and schedule regular health check-ups.",
            RiskLevel::Moderate => {
                "Consider lifestyle modifications and consult healthcare provider for preventive measures."
            }
            RiskLevel::High => {
                "Schedule an immediate consultation with your healthcare provider for comprehensive evaluation."
            }
            RiskLevel::VeryHigh => {
                "Urgent medical attention required. Please consult your healthcare provider immediately."
            }
        }
    }

    fn diseases_from_values(findings: &[BiomarkerFinding]) -> BTreeSet<DiseaseTag> {
        let value = |biomarker: Biomarker| {
            findings
                .iter()
                .find(|f| f.biomarker == biomarker)
                .map(|f| f.value)
        };
        let above = |biomarker: Biomarker, limit: f64| value(biomarker).is_some_and(|v| v > limit);

        let mut tags = BTreeSet::new();
        if value(Biomarker::Bmi).is_some_and(|v| v >= 30.0) {
            tags.insert(DiseaseTag::Obesity);
        }
        if above(Biomarker::Chol, 5.2) || above(Biomarker::Ldl, 3.4) {
            tags.insert(DiseaseTag::Hypercholesterolemia);
        }
        if above(Biomarker::Tg, 1.7) {
            tags.insert(DiseaseTag::Hypertriglyceridemia);
        }
        if above(Biomarker::Cr, 106.0) || above(Biomarker::Bun, 7.1) {
            tags.insert(DiseaseTag::KidneyFunctionImpairment);
        }
        if value(Biomarker::Hdl).is_some_and(|v| v < 1.0) {
            tags.insert(DiseaseTag::LowHdlSyndrome);
        }
        tags
    }
}
