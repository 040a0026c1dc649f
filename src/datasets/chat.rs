use std::path::Path;

use derive_new::new;
use serde::{Deserialize, Serialize};

use super::{check_columns, DatasetError, Record};

/// The name of the chat-intent dataset
pub static DATASET: &str = "chat";

/// Columns every chat row must carry
static REQUIRED_COLUMNS: &[&str] = &["text", "intent"];

/// One labeled chat message
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct Item {
    /// The user message
    pub text: String,

    /// The intent class name of the message
    pub intent: String,
}

impl Record for Item {
    fn text(&self) -> &str {
        &self.text
    }

    fn label(&self) -> &str {
        &self.intent
    }
}

/// The chat-intent dataset, fully loaded in memory
pub struct Dataset {
    /// All rows, in file order
    pub items: Vec<Item>,
}

impl Dataset {
    /// Load every row from a CSV file; the first malformed row aborts the load
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(DatasetError::NotFound(display));
        }

        let mut reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Csv {
            path: display.clone(),
            source,
        })?;

        let headers = reader
            .headers()
            .map_err(|source| DatasetError::Csv {
                path: display.clone(),
                source,
            })?
            .clone();

        check_columns(&headers, REQUIRED_COLUMNS, &display)?;

        let mut items = Vec::new();
        for row in reader.deserialize() {
            let item: Item = row.map_err(|source| DatasetError::Csv {
                path: display.clone(),
                source,
            })?;

            items.push(item);
        }

        if items.is_empty() {
            return Err(DatasetError::Empty(display));
        }

        Ok(Self { items })
    }

    /// Returns the number of rows in the dataset
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the dataset holds no rows
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
