//! Reference range type definitions

use crate::errors::{Result, RiskError};
use crate::panel::Biomarker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest point weight a single boundary may carry
pub const MAX_WEIGHT: u8 = 25;

/// Severity tier of a biomarker reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Inside the healthy band
    Healthy,

    /// Moderate deviation
    Borderline,

    /// Severe deviation
    HighRisk,
}

impl Tier {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Borderline => "borderline",
            Self::HighRisk => "high-risk",
        }
    }

    /// Whether this tier counts as abnormal
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Self::Healthy)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold with explicit inclusivity
///
/// Upper bounds are inclusive (`value >= t`), lower bounds exclusive
/// (`value < t`). The healthy band is therefore `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// Matches values at or above the threshold
    AtOrAbove(f64),

    /// Matches values strictly below the threshold
    Below(f64),
}

impl Bound {
    /// Whether a value falls beyond this bound
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Self::AtOrAbove(threshold) => value >= threshold,
            Self::Below(threshold) => value < threshold,
        }
    }

    /// Threshold value
    pub fn threshold(&self) -> f64 {
        match *self {
            Self::AtOrAbove(t) | Self::Below(t) => t,
        }
    }

    fn is_upper(&self) -> bool {
        matches!(self, Self::AtOrAbove(_))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtOrAbove(t) => write!(f, ">= {}", t),
            Self::Below(t) => write!(f, "< {}", t),
        }
    }
}

/// One threshold of a reference range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Tier assigned past this bound
    pub tier: Tier,

    /// Rule points contributed (0 to 25)
    pub weight: u8,

    /// Finding text for readings past this bound
    pub message: String,

    /// Where the band starts
    pub bound: Bound,
}

impl Boundary {
    /// Create a boundary
    pub fn new(bound: Bound, tier: Tier, weight: u8, message: impl Into<String>) -> Self {
        Self {
            bound,
            tier,
            weight,
            message: message.into(),
        }
    }
}

/// Outcome of classifying one value against a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<'a> {
    /// Assigned tier
    pub tier: Tier,

    /// Points for the rule score
    pub weight: u8,

    /// Boundary that decided the tier, `None` when healthy
    pub boundary: Option<&'a Boundary>,
}

/// Reference range for a single biomarker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    /// Biomarker this range applies to
    pub biomarker: Biomarker,

    /// Boundaries; order is not significant
    pub boundaries: Vec<Boundary>,
}

impl ReferenceRange {
    /// Create a range from its boundaries
    pub fn new(biomarker: Biomarker, boundaries: Vec<Boundary>) -> Self {
        Self { biomarker, boundaries }
    }

    /// Classify a value; the matching boundary with the largest weight wins
    pub fn classify(&self, value: f64) -> Classification<'_> {
        let decisive = self
            .boundaries
            .iter()
            .filter(|b| b.bound.matches(value))
            .fold(None::<&Boundary>, |best, b| match best {
                Some(current) if current.weight >= b.weight => Some(current),
                _ => Some(b),
            });

        match decisive {
            Some(boundary) => Classification {
                tier: boundary.tier,
                weight: boundary.weight,
                boundary: Some(boundary),
            },
            None => Classification {
                tier: Tier::Healthy,
                weight: 0,
                boundary: None,
            },
        }
    }

    /// Boundaries sorted from most severe to least, upper side first
    pub fn ordered(&self) -> Vec<&Boundary> {
        let mut upper: Vec<&Boundary> = self.boundaries.iter().filter(|b| b.bound.is_upper()).collect();
        let mut lower: Vec<&Boundary> = self.boundaries.iter().filter(|b| !b.bound.is_upper()).collect();
        upper.sort_by(|a, b| b.bound.threshold().total_cmp(&a.bound.threshold()));
        lower.sort_by(|a, b| a.bound.threshold().total_cmp(&b.bound.threshold()));
        upper.into_iter().chain(lower).collect()
    }

    /// Check the range describes healthy, borderline and high-risk bands
    /// with weights that grow away from the healthy band
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(RiskError::Configuration(format!("{} range: {}", self.biomarker, reason)));

        for boundary in &self.boundaries {
            if !boundary.bound.threshold().is_finite() {
                return fail(format!("threshold {} is not finite", boundary.bound));
            }
            if boundary.tier == Tier::Healthy {
                return fail(format!("boundary {} cannot be tagged healthy", boundary.bound));
            }
            if boundary.weight == 0 || boundary.weight > MAX_WEIGHT {
                return fail(format!(
                    "weight {} at {} must be between 1 and {}",
                    boundary.weight, boundary.bound, MAX_WEIGHT
                ));
            }
        }

        let max_borderline = self.max_weight(Tier::Borderline);
        let min_high_risk = self
            .boundaries
            .iter()
            .filter(|b| b.tier == Tier::HighRisk)
            .map(|b| b.weight)
            .min();
        match (max_borderline, min_high_risk) {
            (Some(borderline), Some(high_risk)) if borderline < high_risk => {}
            (Some(_), Some(_)) => return fail("high-risk weights must exceed borderline weights".to_string()),
            _ => return fail("needs at least one borderline and one high-risk boundary".to_string()),
        }

        // Walking outward from the healthy band, weights must strictly grow.
        let ordered = self.ordered();
        let (upper, lower): (Vec<&Boundary>, Vec<&Boundary>) =
            ordered.into_iter().partition(|b| b.bound.is_upper());
        for side in [upper, lower] {
            for pair in side.windows(2) {
                if pair[0].weight <= pair[1].weight {
                    return fail(format!(
                        "weight at {} must exceed weight at {}",
                        pair[0].bound, pair[1].bound
                    ));
                }
            }
        }

        let lowest_upper = self
            .boundaries
            .iter()
            .filter(|b| b.bound.is_upper())
            .map(|b| b.bound.threshold())
            .fold(f64::INFINITY, f64::min);
        let highest_lower = self
            .boundaries
            .iter()
            .filter(|b| !b.bound.is_upper())
            .map(|b| b.bound.threshold())
            .fold(f64::NEG_INFINITY, f64::max);
        if highest_lower >= lowest_upper {
            return fail(format!(
                "healthy band [{}, {}) is empty",
                highest_lower, lowest_upper
            ));
        }

        Ok(())
    }

    fn max_weight(&self, tier: Tier) -> Option<u8> {
        self.boundaries
            .iter()
            .filter(|b| b.tier == tier)
            .map(|b| b.weight)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cholesterol() -> ReferenceRange {
        ReferenceRange::new(
            Biomarker::Chol,
            vec![
                Boundary::new(Bound::AtOrAbove(5.2), Tier::Borderline, 10, "Elevated total cholesterol"),
                Boundary::new(Bound::AtOrAbove(6.2), Tier::HighRisk, 20, "High total cholesterol"),
            ],
        )
    }

    #[test]
    fn test_bound_inclusivity() {
        assert!(Bound::AtOrAbove(5.2).matches(5.2));
        assert!(!Bound::AtOrAbove(5.2).matches(5.19));
        assert!(Bound::Below(1.0).matches(0.99));
        assert!(!Bound::Below(1.0).matches(1.0));
    }

    #[test]
    fn test_classify_bands() {
        let range = cholesterol();
        assert_eq!(range.classify(4.0).tier, Tier::Healthy);
        assert_eq!(range.classify(4.0).weight, 0);
        assert!(range.classify(4.0).boundary.is_none());
        assert_eq!(range.classify(5.2).tier, Tier::Borderline);
        assert_eq!(range.classify(6.2).tier, Tier::HighRisk);
        assert_eq!(range.classify(9.0).weight, 20);
    }

    #[test]
    fn test_classify_ignores_boundary_order() {
        let mut range = cholesterol();
        range.boundaries.reverse();
        assert_eq!(range.classify(6.5).tier, Tier::HighRisk);
        assert_eq!(range.classify(5.5).tier, Tier::Borderline);
    }

    #[test]
    fn test_valid_range() {
        assert!(cholesterol().validate().is_ok());
    }

    #[test]
    fn test_missing_high_risk_band() {
        let range = ReferenceRange::new(
            Biomarker::Chol,
            vec![Boundary::new(Bound::AtOrAbove(5.2), Tier::Borderline, 10, "x")],
        );
        assert!(matches!(range.validate(), Err(RiskError::Configuration(_))));
    }

    #[test]
    fn test_weight_over_limit() {
        let mut range = cholesterol();
        range.boundaries[1].weight = 30;
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds() {
        let mut range = cholesterol();
        range.boundaries[0].bound = Bound::AtOrAbove(7.0);
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_empty_healthy_band() {
        let range = ReferenceRange::new(
            Biomarker::Cr,
            vec![
                Boundary::new(Bound::AtOrAbove(50.0), Tier::Borderline, 15, "x"),
                Boundary::new(Bound::AtOrAbove(133.0), Tier::HighRisk, 25, "x"),
                Boundary::new(Bound::Below(60.0), Tier::Borderline, 15, "x"),
                Boundary::new(Bound::Below(30.0), Tier::HighRisk, 25, "x"),
            ],
        );
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(serde_json::to_string(&Tier::HighRisk).unwrap(), "\"high-risk\"");
        assert_eq!(Tier::Borderline.to_string(), "borderline");
        assert!(!Tier::Healthy.is_abnormal());
    }
}
