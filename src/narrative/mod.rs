//! Narrative output
//! Recommendation text per risk level and candidate associated conditions

pub mod generator;
pub mod types;

pub use generator::NarrativeGenerator;
pub use types::{DiseaseTag, Narrative};
