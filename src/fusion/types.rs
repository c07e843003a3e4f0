//! Fusion type definitions

use crate::errors::{Result, RiskError};
use crate::ranges::MAX_WEIGHT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value banded as `Moderate`
const ELEVATED_MIN: u8 = 35;

/// Discrete risk tier of a fused risk value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// 0 to 14
    Minimal,

    /// 15 to 34
    Low,

    /// 35 to 54
    Moderate,

    /// 55 to 74
    High,

    /// 75 to 100
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// All levels, least to most severe
    pub const ALL: [RiskLevel; 5] = [
        Self::Minimal,
        Self::Low,
        Self::Moderate,
        Self::High,
        Self::VeryHigh,
    ];

    /// Band for a risk value; lower bounds inclusive, upper exclusive
    pub fn from_value(value: u8) -> Self {
        match value {
            0..=14 => Self::Minimal,
            15..=34 => Self::Low,
            35..=54 => Self::Moderate,
            55..=74 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Whether the level calls for follow-up beyond routine check-ups
    pub fn is_elevated(&self) -> bool {
        *self >= Self::Moderate
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Constants of the fusion policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionPolicy {
    /// Finding weight at which the severe floor applies (default: 20)
    pub severe_weight: u8,

    /// Minimum risk value once any finding is severe (default: 60)
    pub severe_floor: u8,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            severe_weight: 20,
            severe_floor: 60,
        }
    }
}

impl FusionPolicy {
    /// Validate policy constants
    ///
    /// The floor must be reachable by some finding weight and must lift the
    /// value into an elevated band.
    pub fn validate(&self) -> Result<()> {
        if self.severe_weight == 0 || self.severe_weight > MAX_WEIGHT {
            return Err(RiskError::Configuration(format!(
                "severe_weight must be between 1 and {}",
                MAX_WEIGHT
            )));
        }
        if self.severe_floor > 100 || !RiskLevel::from_value(self.severe_floor).is_elevated() {
            return Err(RiskError::Configuration(format!(
                "severe_floor must be between {} and 100",
                ELEVATED_MIN
            )));
        }
        Ok(())
    }
}

/// Outcome of fusing rule and model scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionResult {
    /// Rule score (0 to 100)
    pub rule_score: u8,

    /// Model probability (0.0 to 1.0)
    pub model_probability: f64,

    /// Model probability as a percentage
    pub model_risk: u8,

    /// Fused risk value (0 to 100)
    pub fused_risk_value: u8,

    /// Band of the fused value
    pub risk_level: RiskLevel,

    /// Whether the severe floor raised the value
    pub severe_floor_applied: bool,
}
