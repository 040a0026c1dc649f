use std::collections::HashMap;

use serde::Serialize;

/// A mapping from a discrete key to a count, remembering first-seen key order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
    keys: Vec<String>,
    counts: HashMap<String, usize>,
    total: usize,
}

/// One presentation row of a frequency table
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Entry {
    /// The key of the row
    pub key: String,

    /// The number of occurrences of the key
    pub count: usize,

    /// The share of the partition total, in percent
    pub percentage: f64,
}

impl FrequencyTable {
    /// Count occurrences of each key, preserving first-seen key order
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for key in keys {
            table.add(key.as_ref());
        }

        table
    }

    /// Record one occurrence of the given key
    pub fn add(&mut self, key: &str) {
        if !self.counts.contains_key(key) {
            self.keys.push(key.to_string());
        }

        *self.counts.entry(key.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    /// The sum of all counts in the table
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of distinct keys in the table
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true when the table holds no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The count for the given key, or zero when it was never seen
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Rows sorted by count descending; ties keep first-seen key order
    pub fn ranked(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .keys
            .iter()
            .map(|key| {
                let count = self.counts[key];
                let percentage = if self.total == 0 {
                    0.0
                } else {
                    count as f64 / self.total as f64 * 100.0
                };

                Entry {
                    key: key.clone(),
                    count,
                    percentage,
                }
            })
            .collect();

        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        entries
    }

    /// The n most frequent rows
    pub fn top(&self, n: usize) -> Vec<Entry> {
        let mut entries = self.ranked();
        entries.truncate(n);

        entries
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn counts_sum_to_partition_size() {
        let keys = vec!["needs", "wants", "needs", "needs", "wants"];
        let table = FrequencyTable::from_keys(keys.clone());

        assert_eq!(table.total(), keys.len());
        assert_eq!(table.get("needs") + table.get("wants"), keys.len());
    }

    #[test]
    fn ranked_sorts_by_count_descending() {
        let table = FrequencyTable::from_keys(["needs", "needs", "wants"]);
        let ranked = table.ranked();

        assert_eq!(ranked[0].key, "needs");
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[1].key, "wants");
        assert_eq!(ranked[1].count, 1);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let table = FrequencyTable::from_keys(["zebra", "apple", "zebra", "apple", "mango"]);
        let ranked = table.ranked();

        assert_eq!(ranked[0].key, "zebra");
        assert_eq!(ranked[1].key, "apple");
        assert_eq!(ranked[2].key, "mango");
    }

    #[test]
    fn percentages_cover_the_total() {
        let table = FrequencyTable::from_keys(["a", "a", "b", "c"]);
        let sum: f64 = table.ranked().iter().map(|e| e.percentage).sum();

        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn top_truncates() {
        let table = FrequencyTable::from_keys(["a", "a", "a", "b", "b", "c"]);
        let top = table.top(2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].key, "a");
        assert_eq!(top[1].key, "b");
    }

    #[test]
    fn empty_table() {
        let table = FrequencyTable::default();

        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.ranked(), vec![]);
    }
}
