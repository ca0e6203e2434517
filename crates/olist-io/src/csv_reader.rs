//! CSV file reader with type inference

use crate::reader::{DataReader, IoError, IoResult};
use crate::schema::{ColumnDescriptor, ColumnType, DataColumn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV file reader
///
/// The whole file is read on open; columns are typed by inspecting every
/// non-empty value.
pub struct CsvReader {
    path: Option<String>,
    delimiter: u8,
    schema: Vec<ColumnDescriptor>,
    raw: Vec<Vec<String>>,
    num_records: usize,
}

impl CsvReader {
    /// Open a CSV file
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_options(path, b',', true)
    }

    /// Open a CSV file with options
    pub fn open_with_options(path: &str, delimiter: u8, has_header: bool) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let mut reader = Self::from_reader(BufReader::new(file), delimiter, has_header)?;
        reader.path = Some(path.to_string());
        Ok(reader)
    }

    /// Read CSV from any byte source
    pub fn from_reader<R: Read>(source: R, delimiter: u8, has_header: bool) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_header)
            .flexible(true)
            .from_reader(source);

        let mut headers: Vec<String> = if has_header {
            reader
                .headers()
                .map_err(|e| IoError::InvalidFormat(e.to_string()))?
                .iter()
                .map(|s| s.trim().to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        let mut num_records = 0;

        for result in reader.records() {
            let record = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;

            // Short rows are padded with empty fields, long rows are malformed
            if has_header && record.len() > headers.len() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(IoError::InvalidFormat(format!(
                    "line {}: {} fields, header has {}",
                    line,
                    record.len(),
                    headers.len()
                )));
            }

            // Without a header the widest record decides the column count
            while !has_header && raw.len() < record.len() {
                headers.push(format!("col_{}", raw.len()));
                raw.push(vec![String::new(); num_records]);
            }

            for (i, column) in raw.iter_mut().enumerate() {
                column.push(record.get(i).unwrap_or("").to_string());
            }
            num_records += 1;
        }

        let schema = headers
            .into_iter()
            .zip(raw.iter())
            .map(|(name, values)| ColumnDescriptor::new(name, infer_type(values)))
            .collect();

        Ok(Self {
            path: None,
            delimiter,
            schema,
            raw,
            num_records,
        })
    }
}

impl DataReader for CsvReader {
    fn schema(&self) -> Vec<ColumnDescriptor> {
        self.schema.clone()
    }

    fn num_records(&self) -> usize {
        self.num_records
    }

    fn read_column(&self, name: &str) -> IoResult<DataColumn> {
        let col_index = self
            .schema
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))?;

        Ok(parse_column(
            &self.raw[col_index],
            self.schema[col_index].dtype,
        ))
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn format_name(&self) -> &'static str {
        if self.delimiter == b'\t' {
            "TSV"
        } else {
            "CSV"
        }
    }
}

/// Infer column type from its values
///
/// Empty values are ignored; a column with no non-empty value is a string
/// column.
fn infer_type(values: &[String]) -> ColumnType {
    let non_empty: Vec<&str> = values
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if non_empty.is_empty() {
        return ColumnType::String;
    }

    if non_empty.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnType::Int64;
    }

    if non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }

    if non_empty.iter().all(|s| {
        matches!(
            s.to_lowercase().as_str(),
            "true" | "false" | "yes" | "no"
        )
    }) {
        return ColumnType::Bool;
    }

    ColumnType::String
}

/// Parse column values into a DataColumn; empty fields become `None`
fn parse_column(values: &[String], dtype: ColumnType) -> DataColumn {
    let cell = |s: &String| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match dtype {
        ColumnType::Int64 => DataColumn::Int64(
            values
                .iter()
                .map(|s| cell(s).and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnType::Float64 => DataColumn::Float64(
            values
                .iter()
                .map(|s| cell(s).and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnType::Bool => DataColumn::Bool(
            values
                .iter()
                .map(|s| cell(s).map(|s| matches!(s.to_lowercase().as_str(), "true" | "yes")))
                .collect(),
        ),
        ColumnType::String => DataColumn::String(values.iter().map(cell).collect()),
    }
}
