//! Raw scoring and standard-score conversion.

use cars_core::models::score::ScoreMap;
use cars_core::models::subscale::SubscaleKey;

use crate::catalog::Subscale;
use crate::error::ScoringError;
use crate::norms::NormTables;

/// Sum the answers belonging to each subscale.
///
/// `answers[id - 1]` holds the answer to question `id`. An item id past the
/// end of `answers` is a caller contract violation and fails with
/// [`ScoringError::OutOfRange`]; answer values themselves are summed as-is.
pub fn compute_raw_scores(answers: &[i32], subscales: &[Subscale]) -> Result<ScoreMap, ScoringError> {
    subscales
        .iter()
        .map(|subscale| -> Result<(SubscaleKey, i32), ScoringError> {
            let sum = subscale.items.iter().try_fold(0i32, |sum, item_id| {
                let value = (*item_id as usize)
                    .checked_sub(1)
                    .and_then(|index| answers.get(index))
                    .ok_or(ScoringError::OutOfRange {
                        subscale: subscale.key,
                        item_id: *item_id,
                        len: answers.len(),
                    })?;
                Ok::<i32, ScoringError>(sum.saturating_add(*value))
            })?;
            Ok((subscale.key, sum))
        })
        .collect()
}

/// Convert one subscale's raw total to its standardized score.
pub fn convert_raw_to_standard(
    key: SubscaleKey,
    raw: i32,
    tables: &NormTables,
) -> Result<i32, ScoringError> {
    let table = tables.get(key).ok_or(ScoringError::MissingNormTable(key))?;
    Ok(table.lookup(raw))
}

/// Convert every entry of a raw score map.
pub fn convert_all_to_standard(raw: &ScoreMap, tables: &NormTables) -> Result<ScoreMap, ScoringError> {
    raw.iter()
        .map(|(key, value)| convert_raw_to_standard(key, value, tables).map(|score| (key, score)))
        .collect()
}
