//! In-memory columnar tables and named datasets

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::reader::{IoError, IoResult};
use crate::schema::DataColumn;

/// An ordered set of named columns sharing one row count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, DataColumn)>,
    num_rows: usize,
}

impl Table {
    /// Create an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style
    ///
    /// The first column fixes the row count; later columns must match it.
    /// A column with an existing name replaces the old one in place.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: impl Into<DataColumn>,
    ) -> IoResult<Self> {
        self.add_column(name, data)?;
        Ok(self)
    }

    /// Append a column
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        data: impl Into<DataColumn>,
    ) -> IoResult<()> {
        let name = name.into();
        let data = data.into();

        if self.columns.is_empty() {
            self.num_rows = data.len();
        } else if data.len() != self.num_rows {
            return Err(IoError::LengthMismatch {
                column: name,
                expected: self.num_rows,
                actual: data.len(),
            });
        }

        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = data,
            None => self.columns.push((name, data)),
        }
        Ok(())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> IoResult<&DataColumn> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Iterate over `(name, column)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataColumn)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// String keys of a column, for grouping and joins
    pub fn keys(&self, name: &str) -> IoResult<Vec<Option<String>>> {
        Ok(self.column(name)?.to_keys())
    }

    /// Project onto the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> IoResult<Table> {
        let mut out = Table::new();
        for &name in names {
            out.add_column(name, self.column(name)?.clone())?;
        }
        out.num_rows = self.num_rows;
        Ok(out)
    }

    /// Rows at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|(n, c)| (n.clone(), c.take(indices)))
                .collect(),
            num_rows: indices.len(),
        }
    }

    /// Rows where `mask` is true
    pub fn filter(&self, mask: &[bool]) -> Table {
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|&(_, &keep)| keep)
            .map(|(i, _)| i)
            .collect();
        self.take(&indices)
    }

    /// Whether any cell of row `index` is missing
    pub fn row_has_null(&self, index: usize) -> bool {
        self.columns.iter().any(|(_, c)| c.is_null(index))
    }

    /// Rows with no missing cell in any column
    pub fn drop_nulls(&self) -> Table {
        let mask: Vec<bool> = (0..self.num_rows).map(|i| !self.row_has_null(i)).collect();
        self.filter(&mask)
    }

    /// Total number of missing cells
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(|(_, c)| c.null_count()).sum()
    }
}

/// A read-only mapping from logical table name to table
///
/// Cloning is cheap: tables are shared behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    tables: BTreeMap<String, Arc<Table>>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(name, table)` pairs
    pub fn from_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = (S, Table)>,
        S: Into<String>,
    {
        Self {
            tables: tables
                .into_iter()
                .map(|(name, table)| (name.into(), Arc::new(table)))
                .collect(),
        }
    }

    /// Add or replace a table
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), Arc::new(table));
    }

    /// Get a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name).map(|t| t.as_ref())
    }

    /// Table names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tables.keys().map(|s| s.as_str()).collect()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the dataset holds no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
