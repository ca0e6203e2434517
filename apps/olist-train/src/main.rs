//! Olist Train - Training table builder
//!
//! Loads the Olist CSV directory, assembles the per-order training table
//! and writes it out as CSV.
//!
//! Usage: `olist-train [config.toml]`. The config path may also come from
//! `OLIST_CONFIG`; `OLIST_DATA_DIR` overrides `data.dir`.

use std::path::PathBuf;

use olist_features::{OlistConfig, OrderFeatures};
use olist_io::{load_dir_with_delimiter, write_csv, Table};
use olist_stats::SummaryStats;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config()?;
    tracing::info!(
        data_dir = %config.data.dir.display(),
        output = %config.output.path.display(),
        "Building training data"
    );

    let dataset = load_dir_with_delimiter(&config.data.dir, config.data.delimiter_byte()?)?;
    let training = OrderFeatures::new(dataset).training_data_with(&config.features)?;

    describe(&training);

    if let Some(parent) = config.output.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_csv(&training, &config.output.path)?;
    tracing::info!(
        rows = training.num_rows(),
        path = %config.output.path.display(),
        "Wrote training data"
    );

    Ok(())
}

fn load_config() -> Result<OlistConfig, Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("OLIST_CONFIG").ok())
        .map(PathBuf::from);

    let mut config = match path {
        Some(path) => OlistConfig::load(&path)?,
        None => OlistConfig::default(),
    };

    if let Ok(dir) = std::env::var("OLIST_DATA_DIR") {
        config.data.dir = PathBuf::from(dir);
    }

    config.validate()?;
    Ok(config)
}

/// Log summary statistics of every numeric column
fn describe(table: &Table) {
    for (name, column) in table.iter() {
        if !column.dtype().is_numeric() {
            continue;
        }
        let stats = SummaryStats::from_values(&column.to_f64());
        tracing::info!(
            column = name,
            count = stats.count,
            mean = stats.mean,
            std_dev = stats.std_dev,
            min = stats.min,
            median = stats.median,
            max = stats.max,
            "Column summary"
        );
    }
}
