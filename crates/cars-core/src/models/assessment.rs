use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::risk::{RiskClassification, RiskLevel};
use super::score::ScoreMap;

/// Version of the persisted result shape. Bump when fields change.
pub const DATA_SCHEMA_VERSION: u32 = 1;

/// The complete output of one screening submission.
///
/// Built once by the scoring pipeline and never mutated afterwards; the
/// fields are only reachable through getters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    taken_at: jiff::Timestamp,
    answers: Vec<i32>,
    raw_scores: ScoreMap,
    standard_scores: ScoreMap,
    classification: RiskClassification,
}

fn default_schema_version() -> u32 {
    DATA_SCHEMA_VERSION
}

impl AssessmentResult {
    pub fn new(
        taken_at: jiff::Timestamp,
        answers: Vec<i32>,
        raw_scores: ScoreMap,
        standard_scores: ScoreMap,
        classification: RiskClassification,
    ) -> Self {
        Self {
            schema_version: DATA_SCHEMA_VERSION,
            taken_at,
            answers,
            raw_scores,
            standard_scores,
            classification,
        }
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn taken_at(&self) -> jiff::Timestamp {
        self.taken_at
    }

    pub fn answers(&self) -> &[i32] {
        &self.answers
    }

    pub fn raw_scores(&self) -> &ScoreMap {
        &self.raw_scores
    }

    pub fn standard_scores(&self) -> &ScoreMap {
        &self.standard_scores
    }

    pub fn classification(&self) -> &RiskClassification {
        &self.classification
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.classification.risk_level
    }

    pub fn self_harm_flagged(&self) -> bool {
        self.classification.self_harm_override_applied
    }
}
