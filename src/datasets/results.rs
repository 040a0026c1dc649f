use std::{ffi::OsStr, fs::File, io::BufReader, path::Path};

use derive_new::new;
use serde::{Deserialize, Serialize};

use super::{check_columns, DatasetError};

/// Columns every results row must carry
static REQUIRED_COLUMNS: &[&str] = &["true_category", "pred_category", "confidence"];

/// One evaluated test example
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct Row {
    /// The input text, when the producer recorded it
    #[serde(default)]
    pub text: String,

    /// The true category label
    pub true_category: String,

    /// The predicted category label
    pub pred_category: String,

    /// The true subcategory label, when the producer recorded it
    #[serde(default)]
    pub true_subcategory: Option<String>,

    /// The predicted subcategory label, when the producer recorded it
    #[serde(default)]
    pub pred_subcategory: Option<String>,

    /// The model confidence for the prediction, in [0, 1]
    pub confidence: f64,
}

/// The test-results table, fully loaded in memory
pub struct Results {
    /// All rows, in file order
    pub rows: Vec<Row>,
}

impl Results {
    /// Load the table from a JSON array of rows or a CSV file, by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(DatasetError::NotFound(display));
        }

        let rows = if path.extension() == Some(OsStr::new("json")) {
            Self::load_json(path, &display)?
        } else {
            Self::load_csv(path, &display)?
        };

        if rows.is_empty() {
            return Err(DatasetError::Empty(display));
        }

        Ok(Self { rows })
    }

    fn load_json(path: &Path, display: &str) -> Result<Vec<Row>, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: display.to_string(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Json {
            path: display.to_string(),
            source,
        })
    }

    fn load_csv(path: &Path, display: &str) -> Result<Vec<Row>, DatasetError> {
        let mut reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Csv {
            path: display.to_string(),
            source,
        })?;

        let headers = reader
            .headers()
            .map_err(|source| DatasetError::Csv {
                path: display.to_string(),
                source,
            })?
            .clone();

        check_columns(&headers, REQUIRED_COLUMNS, display)?;

        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let row: Row = row.map_err(|source| DatasetError::Csv {
                path: display.to_string(),
                source,
            })?;

            rows.push(row);
        }

        Ok(rows)
    }

    /// Returns the number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True and predicted category labels, in row order
    pub fn category_pairs(&self) -> Vec<(&str, &str)> {
        self.rows
            .iter()
            .map(|r| (r.true_category.as_str(), r.pred_category.as_str()))
            .collect()
    }

    /// True and predicted subcategory labels, when every row carries both.
    /// A table with mixed presence is treated as carrying none.
    pub fn subcategory_pairs(&self) -> Option<Vec<(&str, &str)>> {
        self.rows
            .iter()
            .map(|r| {
                Some((
                    r.true_subcategory.as_deref()?,
                    r.pred_subcategory.as_deref()?,
                ))
            })
            .collect()
    }

    /// Confidence scores, in row order
    pub fn confidences(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.confidence).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_json_rows() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[
                {{"text": "buy milk", "true_category": "needs", "pred_category": "needs",
                  "true_subcategory": "groceries", "pred_subcategory": "groceries",
                  "confidence": 0.97}},
                {{"text": "cinema", "true_category": "wants", "pred_category": "needs",
                  "true_subcategory": "entertainment", "pred_subcategory": "groceries",
                  "confidence": 0.51}}
            ]"#
        )
        .unwrap();

        let results = Results::load(file.path()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(
            results.category_pairs(),
            vec![("needs", "needs"), ("wants", "needs")]
        );
        assert_eq!(
            results.subcategory_pairs(),
            Some(vec![
                ("groceries", "groceries"),
                ("entertainment", "groceries")
            ])
        );
    }

    #[test]
    fn load_csv_rows_without_subcategories() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "text,true_category,pred_category,confidence\n\
             hello,GREETING,GREETING,0.99\n"
        )
        .unwrap();

        let results = Results::load(file.path()).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results.subcategory_pairs(), None);
        assert_eq!(results.confidences(), vec![0.99]);
    }

    #[test]
    fn load_json_rejects_missing_field() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"true_category": "needs"}}]"#).unwrap();

        let result = Results::load(file.path());

        assert!(matches!(result, Err(DatasetError::Json { .. })));
    }
}
