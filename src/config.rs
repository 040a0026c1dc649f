use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

/// Report generation settings, passed explicitly into aggregators and writers
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Length-histogram bucket width, in words
    pub bin_width: usize,

    /// Number of words kept for the word-cloud table
    pub top_words: usize,

    /// Number of words kept for the bar-chart table
    pub chart_words: usize,

    /// Maximum samples drawn per category
    pub sample_cap: usize,

    /// Display cap for confusion-matrix labels
    pub top_k_labels: usize,

    /// An optional sampler seed for reproducible draws
    pub seed: Option<u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            bin_width: 8,
            top_words: 100,
            chart_words: 20,
            sample_cap: 50,
            top_k_labels: 15,
            seed: None,
        }
    }
}

impl ReportConfig {
    /// Load settings from a YAML file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }
}

/// Config Error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("unable to read config file {path}: {source}")]
    Read {
        /// The path that was requested
        path: String,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The config file could not be parsed
    #[error("malformed config file {path}: {source}")]
    Parse {
        /// The path that was requested
        path: String,

        /// The underlying parse error
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = ReportConfig::default();

        assert_eq!(config.bin_width, 8);
        assert_eq!(config.top_words, 100);
        assert_eq!(config.chart_words, 20);
        assert_eq!(config.sample_cap, 50);
        assert_eq!(config.top_k_labels, 15);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bin_width: 4\nseed: 42").unwrap();

        let config = ReportConfig::load(file.path()).unwrap();

        assert_eq!(config.bin_width, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.top_words, 100);
    }

    #[test]
    fn load_missing_file_fails() {
        let result = ReportConfig::load("no/such/report.yaml");

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
