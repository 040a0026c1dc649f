use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::aggregate::SeriesStats;

use super::MetricsError;

/// Per-epoch training series. Field aliases accept the spellings of both
/// upstream producers (camelCase for the intent trainer, `category_acc`
/// for the transaction trainer).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingHistory {
    /// Training loss per epoch
    pub loss: Vec<f64>,

    /// Validation loss per epoch
    #[serde(alias = "valLoss")]
    pub val_loss: Vec<f64>,

    /// Training accuracy per epoch
    #[serde(alias = "trainAcc", alias = "category_acc")]
    pub accuracy: Vec<f64>,

    /// Validation accuracy per epoch
    #[serde(alias = "valAcc", alias = "val_category_acc")]
    pub val_accuracy: Vec<f64>,
}

impl TrainingHistory {
    /// Load and validate a training-history document
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

        let history: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                MetricsError::Parse {
                    path: display,
                    source,
                }
            })?;

        history.validate()?;

        Ok(history)
    }

    /// Every series must cover the same number of epochs
    pub fn validate(&self) -> Result<(), MetricsError> {
        let expected = self.loss.len();

        let series = [
            ("val_loss", self.val_loss.len()),
            ("accuracy", self.accuracy.len()),
            ("val_accuracy", self.val_accuracy.len()),
        ];

        for (name, actual) in series {
            if actual != expected {
                return Err(MetricsError::LengthMismatch {
                    series: name.to_string(),
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }

    /// The number of training epochs
    pub fn epochs(&self) -> usize {
        self.loss.len()
    }

    /// The best validation accuracy across epochs, when any epoch ran
    pub fn best_val_accuracy(&self) -> Option<f64> {
        self.val_accuracy
            .iter()
            .copied()
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// The final_metrics document
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FinalMetrics {
    /// Test-set accuracy
    pub accuracy: f64,

    /// Macro-averaged F1 across classes
    pub macro_f1: f64,

    /// The number of evaluated test examples
    pub test_samples: usize,

    /// The number of training epochs
    pub epochs: usize,

    /// The best validation accuracy seen during training
    pub best_val_accuracy: f64,

    /// Statistics over per-example prediction confidence
    pub confidence: SeriesStats,
}
