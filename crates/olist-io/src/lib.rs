//! olist-io - Tabular data I/O for the Olist e-commerce dataset
//!
//! This crate provides:
//!
//! - **Tables**: columnar, nullable, named columns sharing a row count
//! - **CSV**: a reader with type inference and a writer for export
//! - **Loader**: a directory of Olist CSV files as a named [`Dataset`]
//!
//! # Design
//!
//! Data is small and fully materialized. Readers implement the
//! `DataReader` trait for uniform access; every cell is an `Option` so
//! missing values stay explicit through every transformation.

pub mod csv_reader;
pub mod csv_writer;
pub mod loader;
pub mod reader;
pub mod schema;
pub mod table;

pub use csv_reader::CsvReader;
pub use csv_writer::{write_csv, write_csv_to};
pub use loader::{load_dir, load_dir_with_delimiter, table_name};
pub use reader::*;
pub use schema::*;
pub use table::*;
