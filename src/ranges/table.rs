//! Process-wide reference range table
//!
//! Built once at startup, either from the clinical defaults or from a
//! configuration override, and read concurrently afterwards.

use crate::errors::{Result, RiskError};
use crate::panel::Biomarker;
use crate::ranges::types::{Bound, Boundary, ReferenceRange, Tier};

/// Reference ranges for every biomarker, indexed in canonical order
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRangeTable {
    ranges: Vec<ReferenceRange>,
}

impl ReferenceRangeTable {
    /// Build a table from explicit ranges
    ///
    /// Every biomarker must appear exactly once and every range must validate.
    pub fn from_ranges(ranges: Vec<ReferenceRange>) -> Result<Self> {
        let mut slots: Vec<Option<ReferenceRange>> = vec![None; Biomarker::COUNT];

        for range in ranges {
            range.validate()?;
            let slot = &mut slots[range.biomarker.index()];
            if slot.is_some() {
                return Err(RiskError::Configuration(format!(
                    "duplicate reference range for {}",
                    range.biomarker
                )));
            }
            *slot = Some(range);
        }

        let missing: Vec<&str> = Biomarker::ALL
            .iter()
            .filter(|b| slots[b.index()].is_none())
            .map(|b| b.key())
            .collect();
        if !missing.is_empty() {
            return Err(RiskError::Configuration(format!(
                "missing reference range for {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            ranges: slots.into_iter().flatten().collect(),
        })
    }

    /// Range for a biomarker
    pub fn range_for(&self, biomarker: Biomarker) -> &ReferenceRange {
        &self.ranges[biomarker.index()]
    }

    /// All ranges in canonical order
    pub fn ranges(&self) -> &[ReferenceRange] {
        &self.ranges
    }

    /// Largest weight any boundary can contribute
    pub fn max_weight(&self) -> u8 {
        self.ranges
            .iter()
            .flat_map(|r| r.boundaries.iter().map(|b| b.weight))
            .max()
            .unwrap_or(0)
    }

    /// Validate every range in the table
    pub fn validate(&self) -> Result<()> {
        self.ranges.iter().try_for_each(ReferenceRange::validate)
    }
}

impl Default for ReferenceRangeTable {
    /// Clinical defaults, SI units
    fn default() -> Self {
        use Bound::{AtOrAbove, Below};
        use Tier::{Borderline, HighRisk};

        let b = Boundary::new;
        let ranges = vec![
            ReferenceRange::new(
                Biomarker::Bmi,
                vec![
                    b(AtOrAbove(25.0), Borderline, 10, "Elevated BMI suggests overweight condition"),
                    b(AtOrAbove(30.0), HighRisk, 20, "High BMI indicates obesity risk"),
                ],
            ),
            ReferenceRange::new(
                Biomarker::Chol,
                vec![
                    b(AtOrAbove(5.2), Borderline, 10, "Elevated total cholesterol"),
                    b(AtOrAbove(6.2), HighRisk, 20, "High total cholesterol"),
                ],
            ),
            ReferenceRange::new(
                Biomarker::Tg,
                vec![
                    b(AtOrAbove(1.7), Borderline, 10, "Elevated triglycerides level"),
                    b(AtOrAbove(2.3), HighRisk, 20, "High triglycerides level"),
                ],
            ),
            ReferenceRange::new(
                Biomarker::Hdl,
                vec![
                    b(Below(1.3), Borderline, 10, "Borderline low HDL cholesterol"),
                    b(Below(1.0), HighRisk, 20, "Low HDL cholesterol"),
                ],
            ),
            ReferenceRange::new(
                Biomarker::Ldl,
                vec![
                    b(AtOrAbove(3.4), Borderline, 10, "Borderline high LDL cholesterol"),
                    b(AtOrAbove(4.1), HighRisk, 20, "High LDL cholesterol"),
                ],
            ),
            ReferenceRange::new(
                Biomarker::Cr,
                vec![
                    b(AtOrAbove(106.0), Borderline, 15, "Elevated creatinine level"),
                    b(AtOrAbove(133.0), HighRisk, 25, "Markedly elevated creatinine level"),
                    b(Below(45.0), Borderline, 15, "Low creatinine level"),
                    b(Below(30.0), HighRisk, 25, "Very low creatinine level"),
                ],
            ),
            ReferenceRange::new(
                Biomarker::Bun,
                vec![
                    b(AtOrAbove(7.1), Borderline, 15, "High blood urea nitrogen"),
                    b(AtOrAbove(10.7), HighRisk, 25, "Markedly high blood urea nitrogen"),
                    b(Below(2.5), Borderline, 15, "Low blood urea nitrogen"),
                    b(Below(1.5), HighRisk, 25, "Very low blood urea nitrogen"),
                ],
            ),
        ];

        Self { ranges }
    }
}
