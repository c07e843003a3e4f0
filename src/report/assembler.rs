//! Report assembly: pure aggregation, no decisions

use crate::fusion::FusionResult;
use crate::narrative::Narrative;
use crate::report::types::{Factor, RiskReport};
use crate::rules::RuleEvaluation;

/// Package evaluator, fusion and narrative output into a report
///
/// Finding order is preserved from the rule evaluation.
pub fn assemble(evaluation: RuleEvaluation, fusion: FusionResult, narrative: Narrative) -> RiskReport {
    let biomarker_issues = evaluation.issues();
    let factors = evaluation
        .findings
        .iter()
        .map(|finding| Factor {
            kind: finding.tier.into(),
            text: finding.message.clone(),
        })
        .collect();

    RiskReport {
        risk_level: fusion.risk_level,
        risk_value: fusion.fused_risk_value,
        rule_score: fusion.rule_score,
        model_probability: fusion.model_probability,
        factors,
        findings: evaluation.findings,
        biomarker_issues,
        recommendation: narrative.recommendation,
        potential_diseases: narrative.potential_diseases,
    }
}
