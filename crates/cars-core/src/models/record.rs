use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::assessment::AssessmentResult;

/// A stored screening result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    /// Opaque identifier assigned by the calling layer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_id: Option<String>,
    pub result: AssessmentResult,
}

impl AssessmentRecord {
    pub fn new(result: AssessmentResult, respondent_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            respondent_id,
            result,
        }
    }
}
