/// Count-by-key frequency tables
pub mod counts;

/// Text-length histograms
pub mod lengths;

/// Word-frequency tables
pub mod words;

/// Scalar summary statistics
pub mod stats;

/// Per-category sampling
pub mod sample;

pub use counts::FrequencyTable;
pub use lengths::LengthHistogram;
pub use sample::Sampler;
pub use stats::{SeriesStats, SummaryStats};
