//! Risk classification from the standardized total.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use cars_core::models::risk::{RiskClassification, RiskLevel};
use cars_core::models::score::ScoreMap;
use cars_core::models::subscale::SubscaleKey;

use crate::error::ScoringError;

pub const NORMAL_INTERPRETATION: &str = "Learners continue to receive Tier I support.";

pub const AT_RISK_INTERPRETATION: &str =
    "In addition to Tier I support, learner is recommended for Tier II support.";

pub const HIGH_RISK_INTERPRETATION: &str =
    "In addition to Tier I support, learner is recommended for Tier III support.";

pub const SELF_HARM_INTERPRETATION: &str = "Immediate high-risk classification due to thoughts \
    of self-harm. In addition to Tier I support, learner is recommended for Tier III support. \
    Please consider speaking with a trusted adult, counselor, or mental health professional.";

/// Upper bounds (inclusive) of the two lower risk tiers, on the T-score scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskThresholds {
    pub normal_max: i32,
    pub at_risk_max: i32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            normal_max: 60,
            at_risk_max: 70,
        }
    }
}

impl RiskThresholds {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.normal_max > self.at_risk_max {
            return Err(ScoringError::InvalidThresholds {
                normal_max: self.normal_max,
                at_risk_max: self.at_risk_max,
            });
        }
        Ok(())
    }

    /// Tier for a standardized total, before any override.
    pub fn level_for(&self, total: i32) -> RiskLevel {
        match total {
            t if t <= self.normal_max => RiskLevel::Normal,
            t if t <= self.at_risk_max => RiskLevel::AtRisk,
            _ => RiskLevel::HighRisk,
        }
    }
}

fn interpretation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Normal => NORMAL_INTERPRETATION,
        RiskLevel::AtRisk => AT_RISK_INTERPRETATION,
        RiskLevel::HighRisk => HIGH_RISK_INTERPRETATION,
    }
}

/// Classify a respondent.
///
/// Only the standardized `total` is consulted; individual subscale scores
/// never affect the tier. When `self_harm` is set the result is forced to
/// [`RiskLevel::HighRisk`] and marked as an override.
pub fn determine_risk(
    standard: &ScoreMap,
    self_harm: bool,
    thresholds: &RiskThresholds,
) -> Result<RiskClassification, ScoringError> {
    let total = standard
        .get(SubscaleKey::Total)
        .ok_or(ScoringError::MissingScore(SubscaleKey::Total))?;

    if self_harm {
        return Ok(RiskClassification {
            risk_level: RiskLevel::HighRisk,
            interpretation: SELF_HARM_INTERPRETATION.to_string(),
            self_harm_override_applied: true,
        });
    }

    let level = thresholds.level_for(total);
    Ok(RiskClassification {
        risk_level: level,
        interpretation: interpretation(level).to_string(),
        self_harm_override_applied: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_thresholds_fail_validation() {
        let t = RiskThresholds {
            normal_max: 71,
            at_risk_max: 70,
        };
        assert!(matches!(t.validate(), Err(ScoringError::InvalidThresholds { .. })));
        assert!(RiskThresholds::default().validate().is_ok());
    }

    #[test]
    fn equal_thresholds_skip_the_middle_tier() {
        let t = RiskThresholds {
            normal_max: 65,
            at_risk_max: 65,
        };
        assert_eq!(t.level_for(65), RiskLevel::Normal);
        assert_eq!(t.level_for(66), RiskLevel::HighRisk);
    }
}
