/// Confusion matrices
pub mod confusion;

/// Per-class classification reports
pub mod report;

/// Training histories and final run metrics
pub mod history;

pub use confusion::ConfusionMatrix;
pub use history::{FinalMetrics, TrainingHistory};
pub use report::ClassificationReport;

/// Metrics Error
#[derive(thiserror::Error, Debug)]
pub enum MetricsError {
    /// The source document does not exist
    #[error("metrics file not found: {0}")]
    NotFound(String),

    /// The source document could not be read
    #[error("unable to read {path}: {source}")]
    Read {
        /// The path that was requested
        path: String,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The source document could not be parsed
    #[error("malformed metrics file {path}: {source}")]
    Parse {
        /// The path that was requested
        path: String,

        /// The underlying parse error
        source: serde_json::Error,
    },

    /// A training-history series does not cover every epoch
    #[error("training-history series '{series}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// The name of the offending series
        series: String,

        /// The epoch count implied by the loss series
        expected: usize,

        /// The length actually found
        actual: usize,
    },
}
