//! Command line tool to extract dataset summary documents

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use dataset_reports::{
    aggregate::{
        counts::Entry, stats, words, FrequencyTable, LengthHistogram, Sampler, SummaryStats,
    },
    cli::datasets::Dataset,
    config::ReportConfig,
    datasets::{chat, transactions, Record},
    export::DocumentWriter,
};
use log::{info, warn};
use pico_args::Arguments;
use serde::Serialize;

const HELP: &str = "\
Usage: summarize DATASET [OPTIONS]

Arguments:
  DATASET              The dataset to summarize (e.g., 'transactions' or 'chat')

Options:
  -h, --help           Print help
  -i, --input          The path to the dataset CSV (defaults to '<data-dir>/<dataset>.csv')
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -o, --out-dir        The directory to write summary documents to (defaults to 'visualizations/data')
  -c, --config         The path to a YAML report config file
  --seed               Fix the sampler seed for reproducible samples
";

#[derive(Debug)]
struct Args {
    dataset: String,
    input: Option<PathBuf>,
    data_dir: Option<String>,
    out_dir: Option<PathBuf>,
    config: Option<String>,
    seed: Option<u64>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            input: pargs.opt_value_from_str(["-i", "--input"])?,
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            out_dir: pargs.opt_value_from_str(["-o", "--out-dir"])?,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            seed: pargs.opt_value_from_str("--seed")?,
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
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

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let dataset = Dataset::try_from(args.dataset.as_str())?;

    let data_dir = args.data_dir.unwrap_or_else(|| "data".to_string());
    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from(format!("{}/{}.csv", data_dir, dataset)));

    let out_dir = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from("visualizations/data"));
    let writer = DocumentWriter::create(out_dir)?;

    match dataset {
        Dataset::Transactions => summarize_transactions(&input, &config, &writer)?,
        Dataset::Chat => summarize_chat(&input, &config, &writer)?,
    }

    info!("report data exported to {}", writer.dir().display());

    Ok(())
}

fn summarize_transactions(
    input: &Path,
    config: &ReportConfig,
    writer: &DocumentWriter,
) -> anyhow::Result<()> {
    let dataset = transactions::Dataset::load(input)?;
    info!("loaded {} rows from {}", dataset.len(), input.display());

    let categories = FrequencyTable::from_keys(dataset.items.iter().map(|i| i.category.as_str()));
    writer.write_json("category_distribution.json", &categories.ranked())?;
    writer.write_csv(
        "category_distribution.csv",
        &["category", "count", "percentage"],
        &distribution_rows(&categories.ranked()),
    )?;

    let subcategories =
        FrequencyTable::from_keys(dataset.items.iter().map(|i| i.subcategory.as_str()));
    writer.write_json("subcategory_distribution.json", &subcategories.ranked())?;
    writer.write_csv(
        "subcategory_distribution.csv",
        &["subcategory", "count", "percentage"],
        &distribution_rows(&subcategories.ranked()),
    )?;

    report_imbalance(&subcategories);

    // One word-frequency table per category, plus the overall table
    let mut clouds = BTreeMap::new();
    clouds.insert(
        "all".to_string(),
        words::top(dataset.items.iter().map(Record::text), config.top_words),
    );
    for entry in categories.ranked() {
        let cloud = words::top(
            dataset
                .items
                .iter()
                .filter(|i| i.category == entry.key)
                .map(Record::text),
            config.top_words,
        );

        clouds.insert(entry.key, cloud);
    }
    writer.write_json("word_cloud_data.json", &clouds)?;

    write_word_chart(dataset.items.iter().map(Record::text), config, writer)?;
    write_common(&dataset.items, config, writer)?;

    Ok(())
}

fn summarize_chat(
    input: &Path,
    config: &ReportConfig,
    writer: &DocumentWriter,
) -> anyhow::Result<()> {
    let dataset = chat::Dataset::load(input)?;
    info!("loaded {} rows from {}", dataset.len(), input.display());

    let intents = FrequencyTable::from_keys(dataset.items.iter().map(|i| i.intent.as_str()));
    writer.write_json("intent_distribution.json", &intents.ranked())?;
    writer.write_csv(
        "intent_distribution.csv",
        &["intent", "count", "percentage"],
        &distribution_rows(&intents.ranked()),
    )?;

    report_imbalance(&intents);

    let cloud = words::top(dataset.items.iter().map(Record::text), config.top_words);
    writer.write_json("word_cloud_data.json", &cloud)?;

    write_word_chart(dataset.items.iter().map(Record::text), config, writer)?;
    write_common(&dataset.items, config, writer)?;

    Ok(())
}

/// The documents every dataset produces: scalar summary, length histogram,
/// and per-category samples
fn write_common<R>(
    items: &[R],
    config: &ReportConfig,
    writer: &DocumentWriter,
) -> anyhow::Result<()>
where
    R: Record + Clone + Serialize,
{
    let summary = SummaryStats::from_records(items);
    writer.write_json("dataset_summary.json", &summary)?;

    if summary.duplicate_rate > stats::DUPLICATE_RATE_THRESHOLD {
        warn!(
            "high duplicate rate: {:.1}% of {} rows",
            summary.duplicate_rate * 100.0,
            summary.total
        );
    }

    let histogram = LengthHistogram::from_word_counts(
        items.iter().map(|r| r.text().split_whitespace().count()),
        config.bin_width,
    );
    writer.write_json("text_length_histogram.json", &histogram)?;

    let samples = Sampler::new(config.sample_cap, config.seed).per_label(items);
    writer.write_json("samples.json", &samples)?;

    Ok(())
}

/// The bar-chart word table, one row per word
fn write_word_chart<'a, I>(
    texts: I,
    config: &ReportConfig,
    writer: &DocumentWriter,
) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let rows: Vec<Vec<String>> = words::top(texts, config.chart_words)
        .into_iter()
        .map(|entry| vec![entry.text, entry.value.to_string()])
        .collect();

    writer.write_csv("word_frequencies.csv", &["word", "count"], &rows)?;

    Ok(())
}

fn distribution_rows(entries: &[Entry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|entry| {
            vec![
                entry.key.clone(),
                entry.count.to_string(),
                format!("{:.2}", entry.percentage),
            ]
        })
        .collect()
}

fn report_imbalance(table: &FrequencyTable) {
    for (label, count) in stats::imbalanced_labels(table) {
        warn!(
            "label '{}' is under-represented with {} of {} rows",
            label,
            count,
            table.total()
        );
    }
}
