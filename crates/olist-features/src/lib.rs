//! olist-features - Per-order training features for the Olist dataset
//!
//! Derives delivery timing, review sentiment, order composition, price and
//! seller-customer distance features from the raw Olist tables, and joins
//! them into a single training table keyed by `order_id`.
//!
//! # Example
//!
//! ```no_run
//! use olist_features::OrderFeatures;
//!
//! let dataset = olist_io::load_dir("data/csv")?;
//! let training = OrderFeatures::new(dataset).training_data(true, false)?;
//! olist_io::write_csv(&training, "training_data.csv")?;
//! # Ok::<(), olist_features::FeatureError>(())
//! ```

pub mod columns;
pub mod config;
pub mod error;
pub mod join;
pub mod order;

pub use config::{DataConfig, FeatureConfig, OlistConfig, OutputConfig};
pub use error::{FeatureError, FeatureResult};
pub use join::{join_on, JoinKind};
pub use order::OrderFeatures;
