//! Error types for biorisk
//!
//! Every failure is surfaced to the caller with a reason. The pipeline never
//! substitutes a default risk value for a failed step.

use thiserror::Error;

/// Main error type for risk evaluation
#[derive(Error, Debug)]
pub enum RiskError {
    /// Malformed or incomplete biomarker panel, rejected before scoring
    #[error("Invalid biomarker panel: {0}")]
    Validation(String),

    /// Model adapter could not be loaded or invoked
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Reference ranges or policy constants are unusable (fatal at startup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Worker task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RiskError {
    /// Short machine-readable kind, used in batch output and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::Configuration(_) => "configuration",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for risk evaluation
pub type Result<T> = std::result::Result<T, RiskError>;
