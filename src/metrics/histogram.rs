use std::collections::HashMap;

use super::OutcomeKey;

/// Occurrence count per outcome key.
///
/// Only the aggregator increments a histogram; everything outside the crate
/// sees finished snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultHistogram {
    counts: HashMap<OutcomeKey, u64>,
}

impl ResultHistogram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn increment(&mut self, key: OutcomeKey) {
        let count = self.counts.entry(key).or_insert(0);
        *count = count.saturating_add(1);
    }

    #[must_use]
    pub fn count(&self, key: OutcomeKey) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |sum, count| sum.saturating_add(*count))
    }

    /// Entries ordered by the text form of their key ("200" < "404" < "Error").
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(OutcomeKey, u64)> {
        let mut entries: Vec<(OutcomeKey, u64)> = self
            .counts
            .iter()
            .map(|(key, count)| (*key, *count))
            .collect();
        entries.sort_by_cached_key(|(key, _)| key.to_string());
        entries
    }
}
