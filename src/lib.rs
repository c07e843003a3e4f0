//! biorisk - Blood biomarker disease-risk estimation
//!
//! Combines a clinical rule engine with a trained classifier's probability
//! and fuses both into one risk level, narrative factors and a recommendation.
//!
//! # Pipeline
//!
//! - **panel**: validated seven-biomarker record
//! - **ranges**: clinical reference ranges with severity tiers
//! - **rules**: per-biomarker findings and the rule score
//! - **model**: probability adapter (trained classifier, loaded once)
//! - **fusion**: rule score + model probability → risk value and level
//! - **narrative**: recommendation and candidate conditions
//! - **report**: assembled response

pub mod errors;
pub mod panel;
pub mod ranges;
pub mod rules;
pub mod model;
pub mod fusion;
pub mod narrative;
pub mod report;

// Re-export commonly used types
pub use errors::{Result, RiskError};
pub use panel::{Biomarker, BiomarkerPanel};
pub use report::RiskReport;

// Composition and process plumbing
pub mod engine;
pub use engine::RiskEngine;
pub mod batch;
pub mod cli;
pub mod logging;

// Terminal rendering
pub mod display_mode;
pub use display_mode::DisplayMode;
