//! Model adapter
//!
//! The trained classifier is an external collaborator: the engine only needs a
//! probability in `[0, 1]` for a feature vector. Adapters are loaded once at
//! startup and shared read-only across requests.

pub mod adapter;
pub mod logistic;

pub use adapter::{FixedProbability, ProbabilityModel};
pub use logistic::{ClassifierParams, LogisticModel, ModelArtifact, ScalerParams};
