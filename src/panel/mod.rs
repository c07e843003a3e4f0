//! Biomarker panel data model
//! Fixed-shape, validated record of the seven blood biomarkers

pub mod types;

pub use types::{Biomarker, BiomarkerPanel, FeatureVector};
