//! Command line tool to extract training-result documents

use std::path::PathBuf;

use dataset_reports::{
    aggregate::{FrequencyTable, SeriesStats},
    config::ReportConfig,
    datasets::results::Results,
    export::DocumentWriter,
    metrics::{report, ClassificationReport, ConfusionMatrix, FinalMetrics, TrainingHistory},
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Usage: evaluate [OPTIONS]

Options:
  -h, --help           Print help
  -r, --results        The path to the test-results table, JSON or CSV
                       (defaults to '<model-dir>/test_results.json')
  -t, --history        The path to the training-history document
                       (defaults to '<model-dir>/training_history.json')
  -m, --model-dir      The path to the model artifact directory (defaults to 'model')
  -o, --out-dir        The directory to write summary documents to (defaults to 'visualizations/data')
  -c, --config         The path to a YAML report config file
  -k, --top-k          Confusion-matrix display cap for subcategory labels
";

#[derive(Debug)]
struct Args {
    results: Option<PathBuf>,
    history: Option<PathBuf>,
    model_dir: Option<String>,
    out_dir: Option<PathBuf>,
    config: Option<String>,
    top_k: Option<usize>,
}

impl Args {
    fn parse() -> Result<Option<Self>, pico_args::Error> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            results: pargs.opt_value_from_str(["-r", "--results"])?,
            history: pargs.opt_value_from_str(["-t", "--history"])?,
            model_dir: pargs.opt_value_from_str(["-m", "--model-dir"])?,
            out_dir: pargs.opt_value_from_str(["-o", "--out-dir"])?,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            top_k: pargs.opt_value_from_str(["-k", "--top-k"])?,
        };

        Ok(Some(args))
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let output = Args::parse()?;

    if output.is_none() {
        print!("{}", HELP);

        return Ok(());
    }
    let args = output.unwrap();

    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    if let Some(top_k) = args.top_k {
        config.top_k_labels = top_k;
    }

    let model_dir = args.model_dir.unwrap_or_else(|| "model".to_string());
    let history_path = args
        .history
        .unwrap_or_else(|| PathBuf::from(format!("{}/training_history.json", model_dir)));
    let results_path = args
        .results
        .unwrap_or_else(|| PathBuf::from(format!("{}/test_results.json", model_dir)));

    let history = TrainingHistory::load(&history_path)?;
    info!(
        "loaded training history covering {} epochs from {}",
        history.epochs(),
        history_path.display()
    );

    let results = Results::load(&results_path)?;
    info!(
        "loaded {} test results from {}",
        results.len(),
        results_path.display()
    );

    let out_dir = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from("visualizations/data"));
    let writer = DocumentWriter::create(out_dir)?;

    // Re-export the validated history alongside the derived documents
    writer.write_json("training_history.json", &history)?;

    let matrix = ConfusionMatrix::from_pairs(results.category_pairs());
    writer.write_json("confusion_matrix.json", &matrix)?;

    match results.subcategory_pairs() {
        Some(pairs) => {
            let subcategory_matrix = ConfusionMatrix::from_pairs(pairs);
            writer.write_json(
                "subcategory_confusion_matrix.json",
                &subcategory_matrix.top_k(config.top_k_labels),
            )?;
        }
        None => {
            info!("test results carry no subcategory labels, skipping subcategory confusion matrix");
        }
    }

    let classification = ClassificationReport::from_matrix(&matrix);
    writer.write_json("classification_report.json", &classification)?;
    writer.write_csv(
        "classification_report.csv",
        report::CSV_HEADERS,
        &classification.csv_rows(),
    )?;

    write_misclassifications(&results, &writer)?;

    let metrics = FinalMetrics {
        accuracy: matrix.accuracy(),
        macro_f1: classification.macro_avg.f1,
        test_samples: results.len(),
        epochs: history.epochs(),
        best_val_accuracy: history.best_val_accuracy().unwrap_or(0.0),
        confidence: SeriesStats::from_values(&results.confidences()),
    };
    writer.write_json("final_metrics.json", &metrics)?;

    write_predictions(&results, &writer)?;

    info!("report data exported to {}", writer.dir().display());

    Ok(())
}

/// The frequency of each (true, predicted) error pair; a clean run produces
/// no document, only a notice
fn write_misclassifications(results: &Results, writer: &DocumentWriter) -> anyhow::Result<()> {
    let errors = FrequencyTable::from_keys(
        results
            .rows
            .iter()
            .filter(|r| r.true_category != r.pred_category)
            .map(|r| format!("{} -> {}", r.true_category, r.pred_category)),
    );

    if errors.is_empty() {
        info!("no misclassifications found, skipping breakdown");

        return Ok(());
    }

    writer.write_json("misclassification_breakdown.json", &errors.ranked())?;

    Ok(())
}

/// The flat predictions export, one row per evaluated example
fn write_predictions(results: &Results, writer: &DocumentWriter) -> anyhow::Result<()> {
    let rows: Vec<Vec<String>> = results
        .rows
        .iter()
        .map(|r| {
            vec![
                r.text.clone(),
                r.true_category.clone(),
                r.pred_category.clone(),
                r.true_subcategory.clone().unwrap_or_default(),
                r.pred_subcategory.clone().unwrap_or_default(),
                format!("{:.4}", r.confidence),
            ]
        })
        .collect();

    writer.write_csv(
        "predictions.csv",
        &[
            "text",
            "true_category",
            "pred_category",
            "true_subcategory",
            "pred_subcategory",
            "confidence",
        ],
        &rows,
    )?;

    Ok(())
}
