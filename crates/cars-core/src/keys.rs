//! Object key conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the canonical
//! layout of assessment records in an object store bucket.

use uuid::Uuid;

use crate::error::CoreError;

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub fn assessment(id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{id}.json")
}

/// Recover the record id from a key produced by [`assessment`].
pub fn assessment_id(key: &str) -> Result<Uuid, CoreError> {
    let stem = key
        .strip_prefix(ASSESSMENTS_PREFIX)
        .and_then(|rest| rest.strip_suffix(".json"))
        .ok_or_else(|| CoreError::MissingField(format!("assessment id in key '{key}'")))?;
    Ok(Uuid::parse_str(stem)?)
}
