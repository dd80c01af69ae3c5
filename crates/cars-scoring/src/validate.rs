//! Optional answer range checks for calling layers.
//!
//! The scoring pipeline sums whatever integers it is given. Front ends that
//! want to reject out-of-scale answers before scoring can use these helpers.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::catalog;
use crate::error::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct AnswerIssue {
    pub question_id: u32,
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub message: String,
}

/// Report every answer that falls outside its question's allowed values.
pub fn validate_answers(answers: &[i32]) -> Vec<AnswerIssue> {
    catalog::questions()
        .iter()
        .zip(answers)
        .filter_map(|(question, value)| {
            let (min, max) = question.allowed_range();
            if (min..=max).contains(value) {
                return None;
            }
            Some(AnswerIssue {
                question_id: question.id,
                value: *value,
                min,
                max,
                message: format!(
                    "question {}: answer {} is outside range [{}, {}]",
                    question.id, value, min, max
                ),
            })
        })
        .collect()
}

/// Fail on the first out-of-range answer.
pub fn check_answers(answers: &[i32]) -> Result<(), ScoringError> {
    match validate_answers(answers).into_iter().next() {
        Some(issue) => Err(issue.into()),
        None => Ok(()),
    }
}
