//! Narrative type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Conditions the report may list as potentially associated
///
/// Declaration order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiseaseTag {
    #[serde(rename = "Obesity")]
    Obesity,

    #[serde(rename = "Hypercholesterolemia")]
    Hypercholesterolemia,

    #[serde(rename = "Hypertriglyceridemia")]
    Hypertriglyceridemia,

    #[serde(rename = "Kidney Function Impairment")]
    KidneyFunctionImpairment,

    #[serde(rename = "Low HDL Syndrome")]
    LowHdlSyndrome,

    /// Generic tag for elevated risk with no specific rule firing
    #[serde(rename = "Metabolic Syndrome")]
    MetabolicSyndrome,
}

impl DiseaseTag {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Obesity => "Obesity",
            Self::Hypercholesterolemia => "Hypercholesterolemia",
            Self::Hypertriglyceridemia => "Hypertriglyceridemia",
            Self::KidneyFunctionImpairment => "Kidney Function Impairment",
            Self::LowHdlSyndrome => "Low HDL Syndrome",
            Self::MetabolicSyndrome => "Metabolic Syndrome",
        }
    }
}

impl fmt::Display for DiseaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Narrative generator output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub recommendation: String,
    pub potential_diseases: BTreeSet<DiseaseTag>,
}
