//! Risk fusion
//! Combines the rule score with the model probability into one risk level

pub mod engine;
pub mod types;

pub use engine::FusionEngine;
pub use types::{FusionPolicy, FusionResult, RiskLevel};
