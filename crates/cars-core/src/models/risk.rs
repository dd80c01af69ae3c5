use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordinal risk tier derived from the standardized total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    #[serde(rename = "Normal/No Risk")]
    Normal,
    #[serde(rename = "At-risk")]
    AtRisk,
    #[serde(rename = "High risk")]
    HighRisk,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Normal, RiskLevel::AtRisk, RiskLevel::HighRisk];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "Normal/No Risk",
            RiskLevel::AtRisk => "At-risk",
            RiskLevel::HighRisk => "High risk",
        }
    }

    /// Support tiers recommended for this level.
    pub fn tier(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "Tier I",
            RiskLevel::AtRisk => "Tier I + Tier II",
            RiskLevel::HighRisk => "Tier I + Tier III",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of risk classification.
///
/// A self-harm override and a high standardized total both yield
/// [`RiskLevel::HighRisk`]; `self_harm_override_applied` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskClassification {
    pub risk_level: RiskLevel,
    pub interpretation: String,
    pub self_harm_override_applied: bool,
}
