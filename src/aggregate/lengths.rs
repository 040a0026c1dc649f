use std::collections::BTreeMap;

use serde::Serialize;

/// A fixed-width histogram over per-description word counts
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LengthHistogram {
    /// The bucket width, in words
    pub bin_width: usize,

    /// Bucket start → count, sorted ascending by bucket start
    pub buckets: BTreeMap<usize, usize>,
}

impl LengthHistogram {
    /// Bucket the given word counts; every bucket start is a multiple of the
    /// configured width. A width of zero is treated as one.
    pub fn from_word_counts<I>(word_counts: I, bin_width: usize) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let width = bin_width.max(1);

        let mut buckets = BTreeMap::new();
        for count in word_counts {
            let start = (count / width) * width;
            *buckets.entry(start).or_insert(0) += 1;
        }

        Self {
            bin_width: width,
            buckets,
        }
    }

    /// The sum of all bucket counts
    pub fn total(&self) -> usize {
        self.buckets.values().sum()
    }
}
