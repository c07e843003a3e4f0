//! Concurrent batch evaluation
//!
//! Evaluates many panels against one shared engine:
//! - parallelism bounded by a semaphore
//! - evaluation runs on the blocking pool (pure CPU work)
//! - outcomes are returned in input order, one per panel

use crate::engine::RiskEngine;
use crate::errors::{Result, RiskError};
use crate::panel::BiomarkerPanel;
use crate::report::RiskReport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::info;

/// Failure of one batch entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub kind: String,
    pub message: String,
}

/// Outcome of one batch entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOutcome {
    Ok(Box<RiskReport>),
    Error(BatchFailure),
}

impl BatchOutcome {
    fn internal(message: impl std::fmt::Display) -> Self {
        Self::from(Err::<RiskReport, _>(RiskError::Internal(message.to_string())))
    }

    /// Whether the entry produced a report
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl From<Result<RiskReport>> for BatchOutcome {
    fn from(result: Result<RiskReport>) -> Self {
        match result {
            Ok(report) => Self::Ok(Box::new(report)),
            Err(e) => Self::Error(BatchFailure {
                kind: e.kind().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Batch evaluator over a shared engine
pub struct BatchEvaluator {
    engine: Arc<RiskEngine>,
    semaphore: Arc<Semaphore>,
}

impl BatchEvaluator {
    /// Create evaluator allowing `max_parallel` concurrent evaluations
    pub fn new(engine: Arc<RiskEngine>, max_parallel: usize) -> Self {
        Self {
            engine,
            semaphore: Arc::new(Semaphore::new(max_parallel.max(1))),
        }
    }

    /// Evaluate decoded request objects; each entry succeeds or fails alone
    pub async fn evaluate_all(&self, inputs: Vec<serde_json::Value>) -> Vec<BatchOutcome> {
        let total = inputs.len();
        let mut handles = Vec::with_capacity(total);

        for value in inputs {
            let engine = Arc::clone(&self.engine);
            let semaphore = Arc::clone(&self.semaphore);
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return BatchOutcome::internal(e),
                };
                let evaluated = tokio::task::spawn_blocking(move || {
                    BatchOutcome::from(BiomarkerPanel::from_value(value).and_then(|panel| engine.evaluate(&panel)))
                })
                .await;
                evaluated.unwrap_or_else(BatchOutcome::internal)
            }));
        }

        let mut outcomes = Vec::with_capacity(total);
        for handle in handles {
            outcomes.push(
                handle
                    .await
                    .unwrap_or_else(BatchOutcome::internal),
            );
        }

        let failed = failure_count(&outcomes);
        info!(total, succeeded = total - failed, failed, "batch evaluation complete");
        outcomes
    }
}

/// Number of entries that produced no report
pub fn failure_count(outcomes: &[BatchOutcome]) -> usize {
    outcomes.iter().filter(|o| !o.is_ok()).count()
}

/// Split batch input into request objects
///
/// Accepts a JSON array or JSON Lines (blank lines ignored).
pub fn parse_batch_input(input: &str) -> Result<Vec<serde_json::Value>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| RiskError::Validation(format!("batch input is not a JSON array: {}", e)));
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| RiskError::Validation(format!("line {}: {}", i + 1, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let values = parse_batch_input(r#"[{"a": 1}, {"b": 2}]"#).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_parse_json_lines() {
        let values = parse_batch_input("{\"a\": 1}\n\n{\"b\": 2}\n").unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_parse_reports_bad_line() {
        let err = parse_batch_input("{\"a\": 1}\n{oops\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = BatchOutcome::from(Err(RiskError::Validation("missing field `BMI`".to_string())));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"]["kind"], "validation");
        assert!(!outcome.is_ok());
    }

    #[test]
    fn test_internal_failure_uses_error_kind() {
        let outcome = BatchOutcome::internal("worker task cancelled");
        match outcome {
            BatchOutcome::Error(failure) => {
                assert_eq!(failure.kind, RiskError::Internal(String::new()).kind());
                assert!(failure.message.contains("worker task cancelled"));
            }
            BatchOutcome::Ok(_) => panic!("internal failure produced a report"),
        }
    }
}
