use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cars_core::models::record::AssessmentRecord;
use cars_core::models::risk::RiskLevel;

use crate::error::StorageError;

/// Where finished screening results are kept.
///
/// Implementations must treat records as immutable values: `save` stores a
/// record under its id (replacing an earlier copy with the same id) and
/// nothing ever edits a stored result in place.
pub trait AssessmentRepository: Send + Sync {
    fn save(&self, record: &AssessmentRecord) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Fetch one record. Fails with [`StorageError::NotFound`] if absent.
    fn get(&self, id: Uuid) -> impl Future<Output = Result<AssessmentRecord, StorageError>> + Send;

    /// Records matching `filter`, newest first.
    fn list(
        &self,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<Vec<AssessmentRecord>, StorageError>> + Send;

    /// Remove every record. Returns how many were removed.
    fn delete_all(&self) -> impl Future<Output = Result<usize, StorageError>> + Send;

    /// Make `records` the entire contents of the store, dropping anything
    /// not in the batch. Returns how many were written.
    fn replace_all(
        &self,
        records: &[AssessmentRecord],
    ) -> impl Future<Output = Result<usize, StorageError>> + Send;
}

/// Query over stored records. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub risk_level: Option<RiskLevel>,
    pub respondent_id: Option<String>,
    #[serde(default)]
    pub self_harm_only: bool,
    pub limit: Option<usize>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// The most recent record for one respondent.
    pub fn latest_for(respondent_id: impl Into<String>) -> Self {
        Self {
            respondent_id: Some(respondent_id.into()),
            limit: Some(1),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &AssessmentRecord) -> bool {
        if let Some(level) = self.risk_level
            && record.result.risk_level() != level
        {
            return false;
        }
        if let Some(respondent) = &self.respondent_id
            && record.respondent_id.as_deref() != Some(respondent.as_str())
        {
            return false;
        }
        !self.self_harm_only || record.result.self_harm_flagged()
    }

    /// Filter, order newest first, then truncate to `limit`.
    pub fn apply(&self, records: Vec<AssessmentRecord>) -> Vec<AssessmentRecord> {
        let mut matched: Vec<_> = records.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by_key(|r| std::cmp::Reverse(r.result.taken_at()));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Merge a batch of records into the store, keeping existing ones.
/// Returns how many were saved.
pub async fn save_all<R: AssessmentRepository>(
    repo: &R,
    records: &[AssessmentRecord],
) -> Result<usize, StorageError> {
    for record in records {
        repo.save(record).await?;
    }
    tracing::info!(count = records.len(), "saved assessment records");
    Ok(records.len())
}
