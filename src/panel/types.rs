//! Biomarker panel type definitions

use crate::errors::{Result, RiskError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biomarkers accepted by the risk engine, in canonical order
///
/// The declaration order is the fixed output order for findings and the
/// column order of the model feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biomarker {
    /// Body mass index (kg/m²)
    #[serde(rename = "BMI")]
    Bmi,

    /// Total cholesterol (mmol/L)
    #[serde(rename = "Chol")]
    Chol,

    /// Triglycerides (mmol/L)
    #[serde(rename = "TG")]
    Tg,

    /// High-density lipoprotein cholesterol (mmol/L)
    #[serde(rename = "HDL")]
    Hdl,

    /// Low-density lipoprotein cholesterol (mmol/L)
    #[serde(rename = "LDL")]
    Ldl,

    /// Serum creatinine (µmol/L)
    #[serde(rename = "Cr")]
    Cr,

    /// Blood urea nitrogen (mmol/L)
    #[serde(rename = "BUN")]
    Bun,
}

impl Biomarker {
    /// Number of biomarkers in a panel
    pub const COUNT: usize = 7;

    /// All biomarkers in canonical order
    pub const ALL: [Biomarker; Self::COUNT] = [
        Self::Bmi,
        Self::Chol,
        Self::Tg,
        Self::Hdl,
        Self::Ldl,
        Self::Cr,
        Self::Bun,
    ];

    /// Wire key used in request JSON and model artifacts
    pub fn key(&self) -> &'static str {
        match self {
            Self::Bmi => "BMI",
            Self::Chol => "Chol",
            Self::Tg => "TG",
            Self::Hdl => "HDL",
            Self::Ldl => "LDL",
            Self::Cr => "Cr",
            Self::Bun => "BUN",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bmi => "BMI",
            Self::Chol => "Total cholesterol",
            Self::Tg => "Triglycerides",
            Self::Hdl => "HDL cholesterol",
            Self::Ldl => "LDL cholesterol",
            Self::Cr => "Creatinine",
            Self::Bun => "Blood urea nitrogen",
        }
    }

    /// Unit the reference thresholds assume
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Bmi => "kg/m²",
            Self::Chol | Self::Tg | Self::Hdl | Self::Ldl | Self::Bun => "mmol/L",
            Self::Cr => "µmol/L",
        }
    }

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Biomarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Biomarker {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.key() == s)
            .ok_or_else(|| RiskError::Validation(format!("unknown biomarker `{}`", s)))
    }
}

/// Validated set of biomarker values for one request
///
/// Field names are fixed at compile time; deserialization rejects missing,
/// unknown and non-numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BiomarkerPanel {
    #[serde(rename = "BMI")]
    pub bmi: f64,

    #[serde(rename = "Chol")]
    pub chol: f64,

    #[serde(rename = "TG")]
    pub tg: f64,

    #[serde(rename = "HDL")]
    pub hdl: f64,

    #[serde(rename = "LDL")]
    pub ldl: f64,

    #[serde(rename = "Cr")]
    pub cr: f64,

    #[serde(rename = "BUN")]
    pub bun: f64,
}

impl BiomarkerPanel {
    /// Create a validated panel
    pub fn new(bmi: f64, chol: f64, tg: f64, hdl: f64, ldl: f64, cr: f64, bun: f64) -> Result<Self> {
        let panel = Self { bmi, chol, tg, hdl, ldl, cr, bun };
        panel.validate()?;
        Ok(panel)
    }

    /// Parse and validate a panel from request JSON
    pub fn from_json(input: &str) -> Result<Self> {
        let panel: Self = serde_json::from_str(input)
            .map_err(|e| RiskError::Validation(e.to_string()))?;
        panel.validate()?;
        Ok(panel)
    }

    /// Parse and validate a panel from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let panel: Self = serde_json::from_value(value)
            .map_err(|e| RiskError::Validation(e.to_string()))?;
        panel.validate()?;
        Ok(panel)
    }

    /// Check every value is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for biomarker in Biomarker::ALL {
            let value = self.value(biomarker);
            if !value.is_finite() {
                return Err(RiskError::Validation(format!(
                    "{} must be a finite number, got {}",
                    biomarker, value
                )));
            }
            if value < 0.0 {
                return Err(RiskError::Validation(format!(
                    "{} must not be negative, got {}",
                    biomarker, value
                )));
            }
        }
        Ok(())
    }

    /// Observed value for a biomarker
    pub fn value(&self, biomarker: Biomarker) -> f64 {
        match biomarker {
            Biomarker::Bmi => self.bmi,
            Biomarker::Chol => self.chol,
            Biomarker::Tg => self.tg,
            Biomarker::Hdl => self.hdl,
            Biomarker::Ldl => self.ldl,
            Biomarker::Cr => self.cr,
            Biomarker::Bun => self.bun,
        }
    }

    /// Copy of this panel with one value replaced (not re-validated)
    pub fn with_value(mut self, biomarker: Biomarker, value: f64) -> Self {
        match biomarker {
            Biomarker::Bmi => self.bmi = value,
            Biomarker::Chol => self.chol = value,
            Biomarker::Tg => self.tg = value,
            Biomarker::Hdl => self.hdl = value,
            Biomarker::Ldl => self.ldl = value,
            Biomarker::Cr => self.cr = value,
            Biomarker::Bun => self.bun = value,
        }
        self
    }

    /// Model input in canonical column order
    pub fn features(&self) -> FeatureVector {
        FeatureVector(Biomarker::ALL.map(|b| self.value(b)))
    }
}

/// Ordered model input `[BMI, Chol, TG, HDL, LDL, Cr, BUN]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; Biomarker::COUNT]);

impl FeatureVector {
    /// Value at a biomarker's column
    pub fn get(&self, biomarker: Biomarker) -> f64 {
        self.0[biomarker.index()]
    }

    /// Raw column values
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_json() -> &'static str {
        r#"{"BMI": 22.5, "Chol": 3.8, "TG": 1.1, "HDL": 1.6, "LDL": 1.8, "Cr": 75, "BUN": 5.0}"#
    }

    #[test]
    fn test_parse_valid_panel() {
        let panel = BiomarkerPanel::from_json(healthy_json()).unwrap();
        assert_eq!(panel.bmi, 22.5);
        assert_eq!(panel.cr, 75.0);
        assert_eq!(panel.value(Biomarker::Bun), 5.0);
    }

    #[test]
    fn test_missing_field_rejected() {
        let input = r#"{"BMI": 22.5, "Chol": 3.8, "TG": 1.1, "HDL": 1.6, "LDL": 1.8, "Cr": 75}"#;
        let err = BiomarkerPanel::from_json(input).unwrap_err();
        assert!(matches!(err, RiskError::Validation(_)));
        assert!(err.to_string().contains("BUN"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let input = r#"{"BMI": 22.5, "Chol": 3.8, "TG": 1.1, "HDL": 1.6, "LDL": 1.8, "Cr": 75, "BUN": 5.0, "Glucose": 5.4}"#;
        let err = BiomarkerPanel::from_json(input).unwrap_err();
        assert!(matches!(err, RiskError::Validation(_)));
        assert!(err.to_string().contains("Glucose"));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let input = r#"{"BMI": "22.5", "Chol": 3.8, "TG": 1.1, "HDL": 1.6, "LDL": 1.8, "Cr": 75, "BUN": 5.0}"#;
        assert!(matches!(
            BiomarkerPanel::from_json(input),
            Err(RiskError::Validation(_))
        ));
    }

    #[test]
    fn test_null_rejected() {
        let input = r#"{"BMI": null, "Chol": 3.8, "TG": 1.1, "HDL": 1.6, "LDL": 1.8, "Cr": 75, "BUN": 5.0}"#;
        assert!(BiomarkerPanel::from_json(input).is_err());
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(BiomarkerPanel::new(-1.0, 3.8, 1.1, 1.6, 1.8, 75.0, 5.0).is_err());
        assert!(BiomarkerPanel::new(22.5, f64::NAN, 1.1, 1.6, 1.8, 75.0, 5.0).is_err());
        assert!(BiomarkerPanel::new(22.5, 3.8, f64::INFINITY, 1.6, 1.8, 75.0, 5.0).is_err());
    }

    #[test]
    fn test_feature_order() {
        let panel = BiomarkerPanel::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0).unwrap();
        assert_eq!(panel.features().as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(panel.features().get(Biomarker::Hdl), 4.0);
    }

    #[test]
    fn test_biomarker_keys_round_trip() {
        for biomarker in Biomarker::ALL {
            assert_eq!(biomarker.key().parse::<Biomarker>().unwrap(), biomarker);
        }
        assert!("Glucose".parse::<Biomarker>().is_err());
    }

    #[test]
    fn test_with_value() {
        let panel = BiomarkerPanel::from_json(healthy_json()).unwrap();
        let changed = panel.with_value(Biomarker::Cr, 150.0);
        assert_eq!(changed.cr, 150.0);
        assert_eq!(changed.bmi, panel.bmi);
    }
}
