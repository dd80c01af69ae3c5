use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::subscale::SubscaleKey;

/// Integer scores keyed by subscale. Used for both raw totals and
/// standardized (T) scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreMap(BTreeMap<SubscaleKey, i32>);

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SubscaleKey) -> Option<i32> {
        self.0.get(&key).copied()
    }

    pub fn insert(&mut self, key: SubscaleKey, score: i32) -> Option<i32> {
        self.0.insert(key, score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubscaleKey, i32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SubscaleKey, i32)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (SubscaleKey, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
