/// The labeled transaction dataset
pub mod transactions;

/// The chat-intent dataset
pub mod chat;

/// The test-results table
pub mod results;

/// A labeled text example
pub trait Record {
    /// The free text of the example
    fn text(&self) -> &str;

    /// The primary class label of the example
    fn label(&self) -> &str;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The source file does not exist
    #[error("dataset file not found: {0}")]
    NotFound(String),

    /// A required column is absent from the header row
    #[error("missing required column '{column}' in {path}")]
    MissingColumn {
        /// The path that was loaded
        path: String,

        /// The column that was expected
        column: String,
    },

    /// A row could not be read or deserialized
    #[error("unable to read {path}: {source}")]
    Csv {
        /// The path that was loaded
        path: String,

        /// The underlying CSV error
        source: csv::Error,
    },

    /// A JSON document could not be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// The path that was loaded
        path: String,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A JSON document could not be parsed
    #[error("malformed results file {path}: {source}")]
    Json {
        /// The path that was loaded
        path: String,

        /// The underlying parse error
        source: serde_json::Error,
    },

    /// The source file parsed but contained no rows
    #[error("dataset {0} contains no rows")]
    Empty(String),
}

/// Verify that every required column is present before deserializing rows
pub(crate) fn check_columns(
    headers: &csv::StringRecord,
    required: &[&str],
    path: &str,
) -> Result<(), DatasetError> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DatasetError::MissingColumn {
                path: path.to_string(),
                column: (*column).to_string(),
            });
        }
    }

    Ok(())
}
