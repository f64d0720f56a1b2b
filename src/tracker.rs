//! Category remapping statistics.

use std::collections::BTreeMap;

/// Destination label and number of rows remapped for one source category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapEntry {
    pub mapped_to: String,
    pub count: usize,
}

/// Per-category remapping counts, keyed by the original category name.
///
/// Only categories whose name actually changed are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapStats {
    entries: BTreeMap<String, RemapEntry>,
}

impl RemapStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one `original → resolved` translation.
    ///
    /// No-op when the name is unchanged. The first resolved label seen for a
    /// category is kept; later calls only bump the count.
    pub fn record(&mut self, original: &str, resolved: &str) {
        if original == resolved {
            return;
        }

        self.entries
            .entry(original.to_string())
            .or_insert_with(|| RemapEntry {
                mapped_to: resolved.to_string(),
                count: 0,
            })
            .count += 1;
    }

    /// Adds another run's counts into this one.
    pub fn merge(&mut self, other: &RemapStats) {
        for (original, entry) in &other.entries {
            self.entries
                .entry(original.clone())
                .or_insert_with(|| RemapEntry {
                    mapped_to: entry.mapped_to.clone(),
                    count: 0,
                })
                .count += entry.count;
        }
    }

    pub fn get(&self, original: &str) -> Option<&RemapEntry> {
        self.entries.get(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of remapped rows.
    pub fn total(&self) -> usize {
        self.entries.values().map(|e| e.count).sum()
    }

    /// Entries ordered by original category name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RemapEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries ordered by count, most frequent first; ties by name.
    pub fn by_count(&self) -> Vec<(&str, &RemapEntry)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        sorted
    }
}
