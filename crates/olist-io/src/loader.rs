//! Olist dataset loader
//!
//! Reads every CSV or TSV file of a directory into a [`Dataset`], naming
//! tables after their file: `olist_order_items_dataset.csv` becomes
//! `order_items`.

use crate::csv_reader::CsvReader;
use crate::reader::{open_file, supported_extensions, BoxedReader, DataReader, IoError, IoResult};
use crate::table::Dataset;
use std::path::Path;

/// Logical table name for a source file name
pub fn table_name(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(".csv")
        .or_else(|| file_name.strip_suffix(".tsv"))
        .unwrap_or(file_name);
    let stem = stem.strip_prefix("olist_").unwrap_or(stem);
    let stem = stem.strip_suffix("_dataset").unwrap_or(stem);
    stem.to_string()
}

/// Load every table file in `dir` with the default CSV delimiter
pub fn load_dir(dir: impl AsRef<Path>) -> IoResult<Dataset> {
    load_dir_with_delimiter(dir, b',')
}

/// Load every `*.csv` and `*.tsv` file in `dir`
///
/// `delimiter` applies to `.csv` files; `.tsv` files are tab separated.
/// Other files are skipped. Files load in name order so logs are stable.
pub fn load_dir_with_delimiter(dir: impl AsRef<Path>, delimiter: u8) -> IoResult<Dataset> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(IoError::FileNotFound(dir.display().to_string()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if supported_extensions().contains(&extension.as_str()) {
            paths.push((path, extension));
        } else {
            tracing::debug!("Skipping unsupported file {}", path.display());
        }
    }
    paths.sort();

    let mut dataset = Dataset::new();
    for (path, extension) in paths {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!("Skipping file with non UTF-8 name: {}", path.display());
            continue;
        };

        let path_str = path.to_string_lossy();
        let reader: BoxedReader = if extension == "csv" {
            Box::new(CsvReader::open_with_options(&path_str, delimiter, true)?)
        } else {
            open_file(&path_str)?
        };
        let table = reader.read_table()?;
        let name = table_name(file_name);

        tracing::info!(
            table = %name,
            path = reader.path().unwrap_or_default(),
            format = reader.format_name(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "Loaded table"
        );
        dataset.insert(name, table);
    }

    Ok(dataset)
}
