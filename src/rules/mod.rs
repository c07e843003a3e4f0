//! Rule-based scoring against clinical reference ranges
//! Produces one finding per biomarker and a capped, non-linear rule score

pub mod evaluator;
pub mod types;

pub use evaluator::RuleEvaluator;
pub use types::{BiomarkerFinding, RuleEvaluation, RulePolicy};
