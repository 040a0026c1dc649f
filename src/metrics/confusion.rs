use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs::File,
    io::BufReader,
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::MetricsError;

/// A true-label × predicted-label count matrix
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfusionMatrix {
    /// The axis labels, shared by rows (true) and columns (predicted)
    pub labels: Vec<String>,

    /// matrix[i][j] counts records with true label i predicted as j
    pub matrix: Vec<Vec<usize>>,
}

/// The two shapes a confusion-matrix document may arrive in: the dense
/// `{ labels, matrix }` form, or the nested true → pred → count map the
/// intent pipeline produces
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Dense {
        labels: Vec<String>,
        matrix: Vec<Vec<usize>>,
    },
    Nested(BTreeMap<String, BTreeMap<String, usize>>),
}

impl ConfusionMatrix {
    /// Build the matrix over the union of observed labels, sorted for a
    /// canonical axis order
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();

        let labels: Vec<String> = pairs
            .iter()
            .flat_map(|(truth, pred)| [*truth, *pred])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let index: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();

        let mut matrix = vec![vec![0; labels.len()]; labels.len()];
        for (truth, pred) in &pairs {
            matrix[index[truth]][index[pred]] += 1;
        }

        Self { labels, matrix }
    }

    /// Load a confusion-matrix document in either supported shape
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MetricsError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(MetricsError::NotFound(display));
        }

        let file = File::open(path).map_err(|source| MetricsError::Read {
            path: display.clone(),
            source,
        })?;

        let document: Document =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                MetricsError::Parse {
                    path: display,
                    source,
                }
            })?;

        Ok(match document {
            Document::Dense { labels, matrix } => Self { labels, matrix },
            Document::Nested(nested) => Self::from_nested(&nested),
        })
    }

    /// The sum of all cells
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// The number of true instances of label i
    pub fn row_sum(&self, i: usize) -> usize {
        self.matrix[i].iter().sum()
    }

    /// The number of predicted instances of label j
    pub fn col_sum(&self, j: usize) -> usize {
        self.matrix.iter().map(|row| row[j]).sum()
    }

    /// Correct predictions over the total; zero for an empty matrix
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        let correct: usize = (0..self.labels.len()).map(|i| self.matrix[i][i]).sum();

        correct as f64 / total as f64
    }

    /// Reduce to the k most frequent true labels for display, ordered by
    /// frequency descending with stable ties
    pub fn top_k(&self, k: usize) -> Self {
        let mut order: Vec<usize> = (0..self.labels.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.row_sum(i)));
        order.truncate(k);

        let labels = order.iter().map(|&i| self.labels[i].clone()).collect();
        let matrix = order
            .iter()
            .map(|&i| order.iter().map(|&j| self.matrix[i][j]).collect())
            .collect();

        Self { labels, matrix }
    }

    /// The nested true → pred → count form, omitting empty cells
    pub fn to_nested(&self) -> BTreeMap<String, BTreeMap<String, usize>> {
        let mut nested = BTreeMap::new();
        for (i, truth) in self.labels.iter().enumerate() {
            let row: BTreeMap<String, usize> = self
                .labels
                .iter()
                .enumerate()
                .filter(|&(j, _)| self.matrix[i][j] > 0)
                .map(|(j, pred)| (pred.clone(), self.matrix[i][j]))
                .collect();

            if !row.is_empty() {
                nested.insert(truth.clone(), row);
            }
        }

        nested
    }

    /// Build the dense form from the nested map form
    pub fn from_nested(nested: &BTreeMap<String, BTreeMap<String, usize>>) -> Self {
        let pairs: Vec<(&str, &str)> = nested
            .iter()
            .flat_map(|(truth, row)| {
                row.iter()
                    .flat_map(move |(pred, &count)| {
                        std::iter::repeat((truth.as_str(), pred.as_str())).take(count)
                    })
            })
            .collect();

        Self::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> ConfusionMatrix {
        ConfusionMatrix::from_pairs(vec![("a", "a"), ("a", "b"), ("b", "b")])
    }

    #[test]
    fn cells_match_the_worked_example() {
        let cm = sample();

        assert_eq!(cm.labels, vec!["a", "b"]);
        assert_eq!(cm.matrix, vec![vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn row_sums_count_true_instances() {
        let cm = sample();

        assert_eq!(cm.row_sum(0), 2);
        assert_eq!(cm.row_sum(1), 1);
    }

    #[test]
    fn col_sums_count_predicted_instances() {
        let cm = sample();

        assert_eq!(cm.col_sum(0), 1);
        assert_eq!(cm.col_sum(1), 2);
    }

    #[test]
    fn accuracy_is_trace_over_total() {
        let cm = sample();

        assert!((cm.accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn labels_cover_the_union_of_observed_labels() {
        // "c" only ever appears as a prediction
        let cm = ConfusionMatrix::from_pairs(vec![("a", "c"), ("b", "b")]);

        assert_eq!(cm.labels, vec!["a", "b", "c"]);
        assert_eq!(cm.row_sum(2), 0);
        assert_eq!(cm.col_sum(2), 1);
    }

    #[test]
    fn top_k_keeps_the_most_frequent_true_labels() {
        let cm = ConfusionMatrix::from_pairs(vec![
            ("big", "big"),
            ("big", "big"),
            ("big", "small"),
            ("small", "small"),
        ]);

        let reduced = cm.top_k(1);

        assert_eq!(reduced.labels, vec!["big"]);
        assert_eq!(reduced.matrix, vec![vec![2]]);
    }

    #[test]
    fn nested_form_round_trips() {
        let cm = sample();

        assert_eq!(ConfusionMatrix::from_nested(&cm.to_nested()), cm);
    }

    #[test]
    fn load_accepts_the_nested_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"a": {{"a": 1, "b": 1}}, "b": {{"b": 1}}}}"#).unwrap();

        let cm = ConfusionMatrix::load(file.path()).unwrap();

        assert_eq!(cm, sample());
    }

    #[test]
    fn load_accepts_the_dense_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"labels": ["a", "b"], "matrix": [[1, 1], [0, 1]]}}"#
        )
        .unwrap();

        let cm = ConfusionMatrix::load(file.path()).unwrap();

        assert_eq!(cm, sample());
    }

    #[test]
    fn load_rejects_a_missing_file() {
        let result = ConfusionMatrix::load("no/such/confusion_matrix.json");

        assert!(matches!(result, Err(MetricsError::NotFound(_))));
    }
}
