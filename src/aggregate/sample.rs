use std::collections::BTreeMap;

use derive_new::new;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::datasets::Record;

/// Draws bounded uniform samples per category, without replacement
#[derive(Clone, Debug, new)]
pub struct Sampler {
    /// The maximum number of rows returned per category
    cap: usize,

    /// A fixed seed for reproducible draws; None draws from entropy
    seed: Option<u64>,
}

impl Sampler {
    /// Sample up to the cap from the given rows; smaller inputs are returned
    /// whole
    pub fn draw<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut rng = self.rng();

        items.choose_multiple(&mut rng, self.cap).collect()
    }

    /// Group records by label in first-seen label order, then sample each
    /// group independently
    pub fn per_label<R: Record + Clone>(&self, records: &[R]) -> BTreeMap<String, Vec<R>> {
        let mut groups: BTreeMap<String, Vec<R>> = BTreeMap::new();
        for record in records {
            groups
                .entry(record.label().to_string())
                .or_default()
                .push(record.clone());
        }

        groups
            .into_iter()
            .map(|(label, members)| {
                let sampled = self.draw(&members).into_iter().cloned().collect();

                (label, sampled)
            })
            .collect()
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
