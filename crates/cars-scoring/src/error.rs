use thiserror::Error;

use cars_core::models::subscale::SubscaleKey;

use crate::validate::AnswerIssue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A subscale references an item beyond the supplied answers.
    #[error("subscale '{subscale}' references item {item_id} but only {len} answers were supplied")]
    OutOfRange {
        subscale: SubscaleKey,
        item_id: u32,
        len: usize,
    },

    #[error("no standardized score for subscale '{0}'")]
    MissingScore(SubscaleKey),

    #[error("no norm table for subscale '{0}'")]
    MissingNormTable(SubscaleKey),

    #[error("norm table has no entries")]
    EmptyNormTable,

    #[error("invalid risk thresholds: normal_max {normal_max} exceeds at_risk_max {at_risk_max}")]
    InvalidThresholds { normal_max: i32, at_risk_max: i32 },

    #[error("answer rejected: {0}")]
    InvalidAnswer(#[from] AnswerIssue),
}
