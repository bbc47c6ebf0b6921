use std::collections::BTreeMap;

use serde::Serialize;

use crate::cartera::stats::model::{ColumnMap, Row};

/// Number of policies per cancellation reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MotiveTally {
    counts: BTreeMap<String, u64>,
}

impl MotiveTally {
    /// Counts every row carrying a non-blank cancellation reason. Rows without
    /// one are skipped rather than grouped under an empty key.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>, columns: &ColumnMap) -> Self {
        let mut tally = Self::default();
        for row in rows {
            if let Some(reason) = columns.view(row).cancellation_reason() {
                tally.record(reason);
            }
        }
        tally
    }

    pub fn record(&mut self, reason: impl Into<String>) {
        *self.counts.entry(reason.into()).or_insert(0) += 1;
    }

    pub fn get(&self, reason: &str) -> Option<u64> {
        self.counts.get(reason).copied()
    }

    /// Iterates over `(reason, count)` pairs in reason order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts
            .iter()
            .map(|(reason, count)| (reason.as_str(), *count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct reasons.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
