//! olist-stats - Aggregation and geometry primitives for order features
//!
//! This crate provides:
//!
//! - **GroupIndex**: key → row-list grouping with count, distinct count,
//!   sum, mean and first folds
//! - **Haversine**: great-circle distance between latitude/longitude pairs
//! - **SummaryStats**: per-column descriptive statistics
//!
//! Everything works over plain slices of nullable cells; no table type is
//! assumed.

pub mod geo;
pub mod group;
pub mod summary;

pub use geo::*;
pub use group::*;
pub use summary::*;
