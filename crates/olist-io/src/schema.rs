//! Schema and column types for tabular data
//!
//! Every cell is an `Option`: `None` marks a missing value (an empty CSV
//! field, an unparsable number, a join with no partner row).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Descriptor for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type
    pub dtype: ColumnType,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    String,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float64 | ColumnType::Int64)
    }
}

/// A column of nullable cells
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    String(Vec<Option<String>>),
}

impl DataColumn {
    /// An empty column of the given type
    pub fn empty(dtype: ColumnType) -> Self {
        match dtype {
            ColumnType::Int64 => DataColumn::Int64(Vec::new()),
            ColumnType::Float64 => DataColumn::Float64(Vec::new()),
            ColumnType::Bool => DataColumn::Bool(Vec::new()),
            ColumnType::String => DataColumn::String(Vec::new()),
        }
    }

    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    /// Get the number of cells
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Int64(v) => v.len(),
            DataColumn::Float64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the cell at `index` is missing
    ///
    /// NaN floats count as missing.
    pub fn is_null(&self, index: usize) -> bool {
        match self {
            DataColumn::Int64(v) => v[index].is_none(),
            DataColumn::Float64(v) => v[index].map_or(true, f64::is_nan),
            DataColumn::Bool(v) => v[index].is_none(),
            DataColumn::String(v) => v[index].is_none(),
        }
    }

    /// Number of missing cells
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }

    /// Build a new column from the cells at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Self {
        match self {
            DataColumn::Int64(v) => DataColumn::Int64(indices.iter().map(|&i| v[i]).collect()),
            DataColumn::Float64(v) => DataColumn::Float64(indices.iter().map(|&i| v[i]).collect()),
            DataColumn::Bool(v) => DataColumn::Bool(indices.iter().map(|&i| v[i]).collect()),
            DataColumn::String(v) => {
                DataColumn::String(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }

    /// Like `take`, but a `None` index produces a missing cell
    pub fn take_optional(&self, indices: &[Option<usize>]) -> Self {
        match self {
            DataColumn::Int64(v) => {
                DataColumn::Int64(indices.iter().map(|i| i.and_then(|i| v[i])).collect())
            }
            DataColumn::Float64(v) => {
                DataColumn::Float64(indices.iter().map(|i| i.and_then(|i| v[i])).collect())
            }
            DataColumn::Bool(v) => {
                DataColumn::Bool(indices.iter().map(|i| i.and_then(|i| v[i])).collect())
            }
            DataColumn::String(v) => DataColumn::String(
                indices
                    .iter()
                    .map(|i| i.and_then(|i| v[i].clone()))
                    .collect(),
            ),
        }
    }

    /// Convert to f64 cells
    ///
    /// Strings are parsed, booleans map to 0/1; anything unparsable is `None`.
    pub fn to_f64(&self) -> Vec<Option<f64>> {
        match self {
            DataColumn::Int64(v) => v.iter().map(|x| x.map(|x| x as f64)).collect(),
            DataColumn::Float64(v) => v
                .iter()
                .map(|x| x.filter(|x| !x.is_nan()))
                .collect(),
            DataColumn::Bool(v) => v
                .iter()
                .map(|x| x.map(|b| if b { 1.0 } else { 0.0 }))
                .collect(),
            DataColumn::String(v) => v
                .iter()
                .map(|x| x.as_deref().and_then(|s| s.trim().parse().ok()))
                .collect(),
        }
    }

    /// Convert to i64 cells
    ///
    /// Floats are accepted only when integral.
    pub fn to_i64(&self) -> Vec<Option<i64>> {
        match self {
            DataColumn::Int64(v) => v.clone(),
            DataColumn::Float64(v) => v
                .iter()
                .map(|x| x.filter(|x| x.fract() == 0.0).map(|x| x as i64))
                .collect(),
            DataColumn::Bool(v) => v.iter().map(|x| x.map(i64::from)).collect(),
            DataColumn::String(v) => v
                .iter()
                .map(|x| x.as_deref().and_then(|s| s.trim().parse().ok()))
                .collect(),
        }
    }

    /// Render every cell as a string key, for grouping and joins
    pub fn to_keys(&self) -> Vec<Option<String>> {
        match self {
            DataColumn::Int64(v) => v.iter().map(|x| x.map(|x| x.to_string())).collect(),
            DataColumn::Float64(v) => v
                .iter()
                .map(|x| x.filter(|x| !x.is_nan()).map(|x| x.to_string()))
                .collect(),
            DataColumn::Bool(v) => v.iter().map(|x| x.map(|b| b.to_string())).collect(),
            DataColumn::String(v) => v.clone(),
        }
    }

    /// Parse every cell as a timestamp; see [`parse_timestamp`]
    pub fn to_datetime(&self) -> Vec<Option<NaiveDateTime>> {
        match self {
            DataColumn::String(v) => v
                .iter()
                .map(|x| x.as_deref().and_then(parse_timestamp))
                .collect(),
            other => vec![None; other.len()],
        }
    }

    /// Render the cell at `index` for text output; missing cells are empty
    pub fn display_at(&self, index: usize) -> String {
        match self {
            DataColumn::Int64(v) => v[index].map(|x| x.to_string()).unwrap_or_default(),
            DataColumn::Float64(v) => v[index]
                .filter(|x| !x.is_nan())
                .map(|x| x.to_string())
                .unwrap_or_default(),
            DataColumn::Bool(v) => v[index].map(|b| b.to_string()).unwrap_or_default(),
            DataColumn::String(v) => v[index].clone().unwrap_or_default(),
        }
    }
}

impl From<Vec<Option<i64>>> for DataColumn {
    fn from(values: Vec<Option<i64>>) -> Self {
        DataColumn::Int64(values)
    }
}

impl From<Vec<Option<f64>>> for DataColumn {
    fn from(values: Vec<Option<f64>>) -> Self {
        DataColumn::Float64(values)
    }
}

impl From<Vec<Option<bool>>> for DataColumn {
    fn from(values: Vec<Option<bool>>) -> Self {
        DataColumn::Bool(values)
    }
}

impl From<Vec<Option<String>>> for DataColumn {
    fn from(values: Vec<Option<String>>) -> Self {
        DataColumn::String(values)
    }
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%#z", "%Y-%m-%d %H:%M:%S%.f%#z"];

/// Parse a timestamp cell
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (optionally with fractional seconds or a
/// `T` separator) and bare dates, which resolve to midnight. A trailing UTC
/// offset (`Z`, `+00:00`, `-0300`) is applied and the result is in UTC.
/// Returns `None` for empty or unparsable input.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .or_else(|| {
                    OFFSET_TIMESTAMP_FORMATS
                        .iter()
                        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
                })
                .map(|dt| dt.naive_utc())
        })
}
