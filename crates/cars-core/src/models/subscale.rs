use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies one of the questionnaire's subscales.
///
/// `Total` aggregates the four other subscales; the self-harm item
/// belongs to none of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubscaleKey {
    Externalizing,
    Internalizing,
    Social,
    Academic,
    Total,
}

impl SubscaleKey {
    pub const ALL: [SubscaleKey; 5] = [
        SubscaleKey::Externalizing,
        SubscaleKey::Internalizing,
        SubscaleKey::Social,
        SubscaleKey::Academic,
        SubscaleKey::Total,
    ];

    /// The four disjoint subscales that `Total` is made of.
    pub const PARTS: [SubscaleKey; 4] = [
        SubscaleKey::Externalizing,
        SubscaleKey::Internalizing,
        SubscaleKey::Social,
        SubscaleKey::Academic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscaleKey::Externalizing => "externalizing",
            SubscaleKey::Internalizing => "internalizing",
            SubscaleKey::Social => "social",
            SubscaleKey::Academic => "academic",
            SubscaleKey::Total => "total",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SubscaleKey::Externalizing => "Externalizing",
            SubscaleKey::Internalizing => "Internalizing",
            SubscaleKey::Social => "Social",
            SubscaleKey::Academic => "Academic/Learning",
            SubscaleKey::Total => "Total",
        }
    }
}

impl fmt::Display for SubscaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
