//! Raw-to-T-score norm tables.
//!
//! Each subscale owns a table mapping raw totals to standardized scores.
//! Lookups behave as a left-continuous step function: values below the
//! first key clamp to the first score, values above the last key clamp to
//! the last score, and a raw value that falls between two sparse keys takes
//! the score of the greatest key not above it. Scores are never averaged
//! between neighbouring entries.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use cars_core::models::subscale::SubscaleKey;

use crate::error::ScoringError;

const EXTERNALIZING: [i32; 23] = [
    31, 34, 37, 40, 42, 45, 48, 51, 54, 56, 59, 62, 65, 68, 71, 73, 76, 79, 82, 85, 87, 90, 93,
];

const INTERNALIZING: [i32; 23] = [
    30, 32, 34, 36, 38, 40, 42, 44, 46, 47, 49, 51, 53, 55, 57, 59, 61, 63, 64, 66, 68, 70, 72,
];

const SOCIAL: [i32; 23] = [
    36, 39, 42, 45, 48, 51, 54, 57, 60, 63, 66, 69, 72, 75, 78, 81, 84, 87, 90, 93, 96, 99, 102,
];

const ACADEMIC: [i32; 23] = [
    35, 38, 40, 43, 46, 48, 51, 54, 56, 59, 62, 64, 67, 70, 72, 75, 78, 80, 83, 86, 88, 91, 94,
];

const TOTAL: [i32; 97] = [
    29, 29, 30, 31, 32, 32, 33, 34, 34, 35, // 0-9
    36, 37, 37, 38, 39, 40, 40, 41, 42, 43, // 10-19
    44, 44, 45, 46, 47, 48, 49, 50, 51, 51, // 20-29
    52, 53, 54, 55, 55, 56, 57, 58, 59, 59, // 30-39
    60, 61, 62, 62, 63, 64, 65, 65, 66, 67, // 40-49
    68, 69, 69, 70, 71, 72, 72, 73, 74, 75, // 50-59
    76, 76, 77, 78, 79, 80, 80, 81, 81, 82, // 60-69
    83, 84, 85, 86, 87, 88, 88, 89, 90, 90, // 70-79
    91, 92, 93, 94, 94, 95, 96, 97, 98, 98, // 80-89
    99, 100, 101, 101, 102, 103, 104, // 90-96
];

/// A single subscale's raw → T-score table. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormTable {
    entries: BTreeMap<i32, i32>,
    floor: (i32, i32),
}

impl NormTable {
    /// Build a table from `(raw, score)` pairs. Keys may be sparse.
    pub fn new(entries: impl IntoIterator<Item = (i32, i32)>) -> Result<Self, ScoringError> {
        let entries: BTreeMap<i32, i32> = entries.into_iter().collect();
        let floor = entries
            .first_key_value()
            .map(|(k, v)| (*k, *v))
            .ok_or(ScoringError::EmptyNormTable)?;
        Ok(Self { entries, floor })
    }

    /// Build a dense table whose keys run `0..scores.len()`.
    pub fn dense(scores: &[i32]) -> Result<Self, ScoringError> {
        Self::new((0..).zip(scores.iter().copied()))
    }

    pub fn min_key(&self) -> i32 {
        self.floor.0
    }

    pub fn max_key(&self) -> i32 {
        self.entries
            .last_key_value()
            .map(|(k, _)| *k)
            .unwrap_or(self.floor.0)
    }

    /// Standardized score for a raw total.
    pub fn lookup(&self, raw: i32) -> i32 {
        if let Some(score) = self.entries.get(&raw) {
            return *score;
        }
        // Greatest key <= raw covers both the sparse gap and the ceiling
        // clamp; nothing at or below raw means we are under the floor.
        match self.entries.range(..=raw).next_back() {
            Some((_, score)) => *score,
            None => self.floor.1,
        }
    }

    /// Whether scores never decrease as raw values increase.
    pub fn is_monotonic(&self) -> bool {
        let scores: Vec<i32> = self.entries.values().copied().collect();
        scores.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Norm tables for a full set of subscales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormTables(BTreeMap<SubscaleKey, NormTable>);

impl NormTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, key: SubscaleKey, table: NormTable) -> Self {
        self.0.insert(key, table);
        self
    }

    pub fn get(&self, key: SubscaleKey) -> Option<&NormTable> {
        self.0.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubscaleKey, &NormTable)> + '_ {
        self.0.iter().map(|(k, t)| (*k, t))
    }

    /// The shipped CARS norm tables.
    pub fn standard() -> &'static NormTables {
        static STANDARD: LazyLock<NormTables> = LazyLock::new(|| {
            let shipped: [(SubscaleKey, &[i32]); 5] = [
                (SubscaleKey::Externalizing, &EXTERNALIZING),
                (SubscaleKey::Internalizing, &INTERNALIZING),
                (SubscaleKey::Social, &SOCIAL),
                (SubscaleKey::Academic, &ACADEMIC),
                (SubscaleKey::Total, &TOTAL),
            ];
            shipped
                .into_iter()
                .filter_map(|(key, scores)| NormTable::dense(scores).ok().map(|t| (key, t)))
                .fold(NormTables::new(), |tables, (key, table)| {
                    tables.with_table(key, table)
                })
        });
        &STANDARD
    }
}
