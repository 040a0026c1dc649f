use derive_new::new;
use serde::Serialize;

use super::counts::FrequencyTable;

/// One word-cloud entry
#[derive(Clone, Debug, Serialize, PartialEq, new)]
pub struct WordEntry {
    /// The word
    pub text: String,

    /// The number of occurrences across all descriptions
    pub value: usize,
}

/// Count every whitespace-delimited word across the given texts, lowercased.
/// No stemming or stopword removal is applied.
pub fn count<'a, I>(texts: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a str>,
{
    FrequencyTable::from_keys(
        texts
            .into_iter()
            .flat_map(|text| text.split_whitespace().map(|word| word.to_lowercase())),
    )
}

/// The n most frequent words; ties keep first-seen order, which is
/// deterministic for a fixed input order
pub fn top<'a, I>(texts: I, n: usize) -> Vec<WordEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    count(texts)
        .top(n)
        .into_iter()
        .map(|entry| WordEntry::new(entry.key, entry.count))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn counts_are_lowercased_and_whitespace_split() {
        let table = count(vec!["Buy milk", "buy  bread"]);

        assert_eq!(table.get("buy"), 2);
        assert_eq!(table.get("milk"), 1);
        assert_eq!(table.get("bread"), 1);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn top_returns_the_most_frequent_words() {
        let entries = top(vec!["pay rent", "pay bills", "pay rent"], 2);

        assert_eq!(
            entries,
            vec![WordEntry::new("pay".into(), 3), WordEntry::new("rent".into(), 2)]
        );
    }

    #[test]
    fn ties_are_deterministic_for_a_fixed_input_order() {
        let first = top(vec!["alpha beta gamma"], 3);
        let second = top(vec!["alpha beta gamma"], 3);

        assert_eq!(first, second);
        assert_eq!(first[0].text, "alpha");
    }
}
