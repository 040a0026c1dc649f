use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::datasets::Record;

use super::{counts::FrequencyTable, words};

/// Labels below this share of the mean per-label count are reported as
/// under-represented
const IMBALANCE_FACTOR: f64 = 0.1;

/// Duplicate rates above this threshold are flagged in the run log
pub const DUPLICATE_RATE_THRESHOLD: f64 = 0.1;

/// Scalar statistics over a numeric series
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeriesStats {
    /// The arithmetic mean
    pub mean: f64,

    /// The lower-middle value of the sorted series
    pub median: f64,

    /// The smallest value
    pub min: f64,

    /// The largest value
    pub max: f64,
}

impl SeriesStats {
    /// Compute the statistics; an empty series yields all zeros
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                median: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            median: sorted[sorted.len() / 2],
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        }
    }
}

/// The dataset_summary document
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SummaryStats {
    /// The number of records
    pub total: usize,

    /// The number of distinct descriptions
    pub unique: usize,

    /// The number of records whose description was already seen
    pub duplicates: usize,

    /// 1 − unique/total, always in [0, 1]
    pub duplicate_rate: f64,

    /// The number of distinct labels
    pub label_count: usize,

    /// The number of distinct words across all descriptions
    pub vocab_size: usize,

    /// Statistics over per-description word counts
    pub word_count: SeriesStats,
}

impl SummaryStats {
    /// Derive the summary from the current record set alone
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        let total = records.len();

        let unique = records
            .iter()
            .map(Record::text)
            .collect::<HashSet<_>>()
            .len();

        let duplicate_rate = if total == 0 {
            0.0
        } else {
            1.0 - unique as f64 / total as f64
        };

        let labels = FrequencyTable::from_keys(records.iter().map(Record::label));
        let vocab = words::count(records.iter().map(Record::text));

        let word_counts: Vec<f64> = records
            .iter()
            .map(|r| r.text().split_whitespace().count() as f64)
            .collect();

        Self {
            total,
            unique,
            duplicates: total - unique,
            duplicate_rate,
            label_count: labels.len(),
            vocab_size: vocab.len(),
            word_count: SeriesStats::from_values(&word_counts),
        }
    }
}

/// Labels with fewer than 10% of the mean per-label count, for run-log
/// balance notices
pub fn imbalanced_labels(table: &FrequencyTable) -> Vec<(String, usize)> {
    if table.is_empty() {
        return Vec::new();
    }

    let mean = table.total() as f64 / table.len() as f64;

    table
        .ranked()
        .into_iter()
        .filter(|entry| (entry.count as f64) < mean * IMBALANCE_FACTOR)
        .map(|entry| (entry.key, entry.count))
        .collect()
}

#[cfg(test)]
mod tests {
    use derive_new::new;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(new)]
    struct TestRecord {
        text: String,
        label: String,
    }

    impl Record for TestRecord {
        fn text(&self) -> &str {
            &self.text
        }

        fn label(&self) -> &str {
            &self.label
        }
    }

    fn record(text: &str, label: &str) -> TestRecord {
        TestRecord::new(text.into(), label.into())
    }

    #[test]
    fn duplicate_rate_matches_the_worked_example() {
        // "buy milk" appears twice identically, so unique=2 and total=3
        let records = vec![
            record("buy milk", "needs"),
            record("buy milk", "needs"),
            record("go to cinema", "wants"),
        ];

        let summary = SummaryStats::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.unique, 2);
        assert_eq!(summary.duplicates, 1);
        assert!((summary.duplicate_rate - (1.0 - 2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn duplicate_rate_is_zero_when_all_distinct() {
        let records = vec![record("a", "x"), record("b", "x")];

        let summary = SummaryStats::from_records(&records);

        assert_eq!(summary.duplicate_rate, 0.0);
    }

    #[test]
    fn duplicate_rate_stays_in_bounds() {
        let records = vec![
            record("same", "x"),
            record("same", "x"),
            record("same", "x"),
        ];

        let summary = SummaryStats::from_records(&records);

        assert!(summary.duplicate_rate >= 0.0);
        assert!(summary.duplicate_rate <= 1.0);
    }

    #[test]
    fn word_count_stats() {
        let records = vec![
            record("one", "x"),
            record("one two", "x"),
            record("one two three", "x"),
        ];

        let summary = SummaryStats::from_records(&records);

        assert_eq!(summary.word_count.min, 1.0);
        assert_eq!(summary.word_count.max, 3.0);
        assert_eq!(summary.word_count.median, 2.0);
        assert!((summary.word_count.mean - 2.0).abs() < 1e-9);
        assert_eq!(summary.vocab_size, 3);
    }

    #[test]
    fn empty_record_set_yields_zeros() {
        let summary = SummaryStats::from_records::<TestRecord>(&[]);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.duplicate_rate, 0.0);
        assert_eq!(summary.word_count, SeriesStats::from_values(&[]));
    }

    #[test]
    fn imbalanced_labels_are_reported() {
        let mut keys = vec!["common"; 100];
        keys.push("rare");

        let table = FrequencyTable::from_keys(keys);
        let notices = imbalanced_labels(&table);

        assert_eq!(notices, vec![("rare".to_string(), 1)]);
    }
}
