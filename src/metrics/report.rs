use derive_new::new;
use serde::{Deserialize, Serialize};

use super::ConfusionMatrix;

/// Per-class precision, recall, and F1 derived from a confusion matrix
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, new)]
pub struct LabelMetrics {
    /// The class label
    pub label: String,

    /// TP / (TP + FP); zero when the class was never predicted
    pub precision: f64,

    /// TP / (TP + FN); zero when the class has no true instances
    pub recall: f64,

    /// The harmonic mean of precision and recall
    pub f1: f64,

    /// The number of true instances of the class
    pub support: usize,
}

/// Unweighted means across all classes
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, new)]
pub struct MacroMetrics {
    /// The mean per-class precision
    pub precision: f64,

    /// The mean per-class recall
    pub recall: f64,

    /// The mean per-class F1
    pub f1: f64,
}

/// The classification_report document. The macro block is kept apart from
/// the per-class list so recomputed averages never fold in an average row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassificationReport {
    /// One row per class, in matrix label order
    pub classes: Vec<LabelMetrics>,

    /// The macro average across classes
    pub macro_avg: MacroMetrics,
}

impl ClassificationReport {
    /// Derive the report from a confusion matrix
    pub fn from_matrix(cm: &ConfusionMatrix) -> Self {
        let classes: Vec<LabelMetrics> = cm
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let tp = cm.matrix[i][i];
                let precision = safe_div(tp as f64, cm.col_sum(i) as f64);
                let recall = safe_div(tp as f64, cm.row_sum(i) as f64);

                LabelMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1: harmonic_mean(precision, recall),
                    support: cm.row_sum(i),
                }
            })
            .collect();

        let n = classes.len() as f64;
        let macro_avg = MacroMetrics {
            precision: safe_div(classes.iter().map(|c| c.precision).sum(), n),
            recall: safe_div(classes.iter().map(|c| c.recall).sum(), n),
            f1: safe_div(classes.iter().map(|c| c.f1).sum(), n),
        };

        Self { classes, macro_avg }
    }

    /// Flat rows for the CSV companion export, with the macro average last
    pub fn csv_rows(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = self
            .classes
            .iter()
            .map(|c| {
                vec![
                    c.label.clone(),
                    format!("{:.4}", c.precision),
                    format!("{:.4}", c.recall),
                    format!("{:.4}", c.f1),
                    c.support.to_string(),
                ]
            })
            .collect();

        rows.push(vec![
            "macro_avg".to_string(),
            format!("{:.4}", self.macro_avg.precision),
            format!("{:.4}", self.macro_avg.recall),
            format!("{:.4}", self.macro_avg.f1),
            self.classes.iter().map(|c| c.support).sum::<usize>().to_string(),
        ]);

        rows
    }
}

/// The column headers matching [`ClassificationReport::csv_rows`]
pub static CSV_HEADERS: &[&str] = &["label", "precision", "recall", "f1", "support"];

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> ClassificationReport {
        let cm = ConfusionMatrix::from_pairs(vec![("a", "a"), ("a", "b"), ("b", "b")]);

        ClassificationReport::from_matrix(&cm)
    }

    #[test]
    fn metrics_match_the_worked_example() {
        let report = sample();
        let b = &report.classes[1];

        assert_eq!(b.label, "b");
        assert!((b.precision - 0.5).abs() < 1e-9);
        assert!((b.recall - 1.0).abs() < 1e-9);
        assert!((b.f1 - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(b.support, 1);
    }

    #[test]
    fn f1_matches_a_direct_harmonic_mean() {
        let report = sample();

        for class in &report.classes {
            let direct = harmonic_mean(class.precision, class.recall);
            assert!((class.f1 - direct).abs() < 1e-9);
        }
    }

    #[test]
    fn macro_f1_is_the_unweighted_mean() {
        let report = sample();
        let mean: f64 =
            report.classes.iter().map(|c| c.f1).sum::<f64>() / report.classes.len() as f64;

        assert!((report.macro_avg.f1 - mean).abs() < 1e-9);
    }

    #[test]
    fn absent_classes_yield_zero_not_a_failure() {
        // "c" is never predicted and never true
        let cm = ConfusionMatrix::from_pairs(vec![("a", "c"), ("a", "a")]);
        let report = ClassificationReport::from_matrix(&cm);

        let c = report.classes.iter().find(|m| m.label == "c").unwrap();
        assert_eq!(c.recall, 0.0);
        assert_eq!(c.f1, 0.0);
        assert_eq!(c.support, 0);
    }

    #[test]
    fn csv_rows_end_with_the_macro_average() {
        let report = sample();
        let rows = report.csv_rows();

        assert_eq!(rows.len(), report.classes.len() + 1);
        assert_eq!(rows.last().unwrap()[0], "macro_avg");
        assert_eq!(rows[0].len(), CSV_HEADERS.len());
    }
}
