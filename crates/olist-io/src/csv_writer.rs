//! CSV export for tables

use crate::reader::{IoError, IoResult};
use crate::table::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a table to a CSV file, header first
///
/// Missing cells are written as empty fields.
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to(table, BufWriter::new(file))
}

/// Write a table as CSV to any sink
pub fn write_csv_to<W: Write>(table: &Table, sink: W) -> IoResult<()> {
    let mut writer = csv::Writer::from_writer(sink);

    writer
        .write_record(table.column_names())
        .map_err(|e| IoError::InvalidFormat(e.to_string()))?;

    let columns: Vec<_> = table.iter().map(|(_, c)| c).collect();
    for row in 0..table.num_rows() {
        writer
            .write_record(columns.iter().map(|c| c.display_at(row)))
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
