//! Aggregates over stored records.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use cars_core::models::assessment::DATA_SCHEMA_VERSION;
use cars_core::models::record::AssessmentRecord;
use cars_core::models::risk::RiskLevel;

use crate::error::StorageError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    pub count: usize,
    pub unique_respondents: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub by_risk_level: BTreeMap<RiskLevel, LevelStats>,
}

/// Record counts per risk level. Records without a respondent id count
/// toward `count` but not `unique_respondents`.
pub fn statistics(records: &[AssessmentRecord]) -> Statistics {
    let mut respondents: BTreeMap<RiskLevel, BTreeSet<&str>> = BTreeMap::new();
    let mut stats = Statistics::default();

    for record in records {
        let level = record.result.risk_level();
        stats.by_risk_level.entry(level).or_default().count += 1;
        if let Some(id) = record.respondent_id.as_deref() {
            respondents.entry(level).or_default().insert(id);
        }
        stats.total += 1;
    }

    for (level, ids) in respondents {
        stats.by_risk_level.entry(level).or_default().unique_respondents = ids.len();
    }
    stats
}

pub fn count_self_harm(records: &[AssessmentRecord]) -> usize {
    records.iter().filter(|r| r.result.self_harm_flagged()).count()
}

/// Overview of a store's contents.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSummary {
    pub stored: usize,
    pub latest: Option<AssessmentRecord>,
    pub schema_version: u32,
    /// Size of the records serialized as compact JSON.
    pub approx_size_bytes: usize,
}

pub fn summarize(records: &[AssessmentRecord]) -> Result<StoreSummary, StorageError> {
    Ok(StoreSummary {
        stored: records.len(),
        latest: records.iter().max_by_key(|r| r.result.taken_at()).cloned(),
        schema_version: DATA_SCHEMA_VERSION,
        approx_size_bytes: serde_json::to_vec(records)?.len(),
    })
}
