//! Per-order feature tables
//!
//! [`OrderFeatures`] owns a read-only snapshot of the loaded dataset and
//! derives one table per feature group, each keyed by `order_id`.
//! [`OrderFeatures::training_data`] joins them into the training table.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use olist_io::{DataColumn, Dataset, Table};
use olist_stats::{haversine_distance, GeoPoint, GroupIndex};
use tracing::{debug, info};

use crate::columns::*;
use crate::config::FeatureConfig;
use crate::error::{FeatureError, FeatureResult};
use crate::join::{join_on, JoinKind};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Feature computation over one dataset snapshot
#[derive(Debug, Clone)]
pub struct OrderFeatures {
    data: Arc<Dataset>,
}

impl OrderFeatures {
    pub fn new(data: impl Into<Arc<Dataset>>) -> Self {
        Self { data: data.into() }
    }

    /// The underlying dataset
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    fn table(&self, name: &str) -> FeatureResult<&Table> {
        self.data
            .table(name)
            .ok_or_else(|| FeatureError::MissingTable(name.to_string()))
    }

    /// Delivery timing per order
    ///
    /// Columns: `order_id, wait_time, expected_wait_time, delay_vs_expected,
    /// order_status`. Durations are fractional days. `delay_vs_expected` is
    /// clipped at zero. With `only_delivered` only orders whose status is
    /// "delivered" are kept.
    pub fn wait_time(&self, only_delivered: bool) -> FeatureResult<Table> {
        let orders = self.table(ORDERS)?;

        let mask: Vec<bool> = if only_delivered {
            orders
                .keys(ORDER_STATUS)?
                .iter()
                .map(|s| s.as_deref() == Some(STATUS_DELIVERED))
                .collect()
        } else {
            vec![true; orders.num_rows()]
        };
        let orders = orders.filter(&mask);

        let purchased = orders.column(PURCHASE_TIMESTAMP)?.to_datetime();
        let delivered = orders.column(DELIVERED_DATE)?.to_datetime();
        let estimated = orders.column(ESTIMATED_DATE)?.to_datetime();

        let wait_time: Vec<Option<f64>> = purchased
            .iter()
            .zip(&delivered)
            .map(|(&from, &to)| days_between(from, to))
            .collect();
        let expected_wait_time: Vec<Option<f64>> = purchased
            .iter()
            .zip(&estimated)
            .map(|(&from, &to)| days_between(from, to))
            .collect();
        let delay_vs_expected: Vec<Option<f64>> = estimated
            .iter()
            .zip(&delivered)
            .map(|(&from, &to)| days_between(from, to).map(|d| d.max(0.0)))
            .collect();

        let table = Table::new()
            .with_column(ORDER_ID, orders.column(ORDER_ID)?.clone())?
            .with_column(WAIT_TIME, wait_time)?
            .with_column(EXPECTED_WAIT_TIME, expected_wait_time)?
            .with_column(DELAY_VS_EXPECTED, delay_vs_expected)?
            .with_column(ORDER_STATUS, orders.column(ORDER_STATUS)?.clone())?;

        debug!(rows = table.num_rows(), only_delivered, "Computed wait time features");
        Ok(table)
    }

    /// Review sentiment per review
    ///
    /// Columns: `order_id, dim_is_five_star, dim_is_one_star, review_score`.
    /// Scores that do not parse as integers are missing.
    pub fn review_score(&self) -> FeatureResult<Table> {
        let reviews = self.table(ORDER_REVIEWS)?;
        let scores = reviews.column(REVIEW_SCORE)?.to_i64();

        let flag = |target: i64| -> Vec<Option<i64>> {
            scores
                .iter()
                .map(|s| Some(i64::from(*s == Some(target))))
                .collect()
        };

        let table = Table::new()
            .with_column(ORDER_ID, reviews.column(ORDER_ID)?.clone())?
            .with_column(DIM_IS_FIVE_STAR, flag(5))?
            .with_column(DIM_IS_ONE_STAR, flag(1))?
            .with_column(REVIEW_SCORE, DataColumn::Int64(scores.clone()))?;

        debug!(rows = table.num_rows(), "Computed review score features");
        Ok(table)
    }

    /// Line items per order
    ///
    /// Columns: `order_id, number_of_items`.
    pub fn number_items(&self) -> FeatureResult<Table> {
        let items = self.table(ORDER_ITEMS)?;
        let groups = GroupIndex::from_keys(&items.keys(ORDER_ID)?);
        let counts = groups.count(&items.keys(PRODUCT_ID)?);

        let table = keyed_table(&groups)?.with_column(NUMBER_OF_ITEMS, some_all(counts))?;
        debug!(rows = table.num_rows(), "Computed item count features");
        Ok(table)
    }

    /// Distinct sellers per order
    ///
    /// Columns: `order_id, number_of_sellers`.
    pub fn number_sellers(&self) -> FeatureResult<Table> {
        let items = self.table(ORDER_ITEMS)?;
        let groups = GroupIndex::from_keys(&items.keys(ORDER_ID)?);
        let counts = groups.count_distinct(&items.keys(SELLER_ID)?);

        let table = keyed_table(&groups)?.with_column(NUMBER_OF_SELLERS, some_all(counts))?;
        debug!(rows = table.num_rows(), "Computed seller count features");
        Ok(table)
    }

    /// Total price and freight per order
    ///
    /// Columns: `order_id, price, freight_value`.
    pub fn price_and_freight(&self) -> FeatureResult<Table> {
        let items = self.table(ORDER_ITEMS)?;
        let groups = GroupIndex::from_keys(&items.keys(ORDER_ID)?);
        let price = groups.sum(&items.column(PRICE)?.to_f64());
        let freight = groups.sum(&items.column(FREIGHT_VALUE)?.to_f64());

        let table = keyed_table(&groups)?
            .with_column(PRICE, price)?
            .with_column(FREIGHT_VALUE, freight)?;
        debug!(rows = table.num_rows(), "Computed price and freight features");
        Ok(table)
    }

    /// Mean seller to customer distance per order, in kilometres
    ///
    /// Columns: `order_id, distance_seller_customer`. Each zip prefix
    /// resolves to its first geolocation row. Line items whose seller or
    /// customer cannot be located are left out of the mean; an order with no
    /// located item gets a missing distance.
    pub fn distance_seller_customer(&self) -> FeatureResult<Table> {
        let items = self.table(ORDER_ITEMS)?;
        let geo = locations_by_zip(self.table(GEOLOCATION)?)?;
        let seller_zip = first_by_key(self.table(SELLERS)?, SELLER_ID, SELLER_ZIP)?;
        let customer_zip = first_by_key(self.table(CUSTOMERS)?, CUSTOMER_ID, CUSTOMER_ZIP)?;
        let order_customer = first_by_key(self.table(ORDERS)?, ORDER_ID, CUSTOMER_ID)?;

        let locate = |zips: &HashMap<String, String>, id: &str| -> Option<GeoPoint> {
            zips.get(id).and_then(|zip| geo.get(zip)).copied()
        };

        let order_ids = items.keys(ORDER_ID)?;
        let distances: Vec<Option<f64>> = order_ids
            .iter()
            .zip(items.keys(SELLER_ID)?)
            .map(|(order_id, seller_id)| {
                let customer_id = order_customer.get(order_id.as_deref()?)?;
                let customer = locate(&customer_zip, customer_id.as_str())?;
                let seller = locate(&seller_zip, seller_id.as_deref()?)?;
                Some(haversine_distance(seller, customer))
            })
            .collect();

        let groups = GroupIndex::from_keys(&order_ids);
        let table = keyed_table(&groups)?
            .with_column(DISTANCE_SELLER_CUSTOMER, groups.mean(&distances))?;

        debug!(
            rows = table.num_rows(),
            located_items = distances.iter().flatten().count(),
            "Computed seller-customer distance features"
        );
        Ok(table)
    }

    /// The training table
    ///
    /// Inner-joins every feature table on `order_id` and drops rows with a
    /// missing cell. Columns follow [`TRAINING_COLUMNS`], plus
    /// `distance_seller_customer` when requested.
    pub fn training_data(
        &self,
        only_delivered: bool,
        with_distance_seller_customer: bool,
    ) -> FeatureResult<Table> {
        let mut features = vec![
            self.review_score()?,
            self.number_items()?,
            self.number_sellers()?,
            self.price_and_freight()?,
        ];
        if with_distance_seller_customer {
            features.push(self.distance_seller_customer()?);
        }

        let mut training = self.wait_time(only_delivered)?;
        for feature in &features {
            training = join_on(&training, feature, ORDER_ID, JoinKind::Inner)?;
        }

        let joined_rows = training.num_rows();
        let training = training.drop_nulls();
        if training.num_rows() < joined_rows {
            debug!(
                dropped = joined_rows - training.num_rows(),
                "Dropped rows with missing values"
            );
        }

        let mut columns = TRAINING_COLUMNS.to_vec();
        if with_distance_seller_customer {
            columns.push(DISTANCE_SELLER_CUSTOMER);
        }
        let training = training.select(&columns)?;

        info!(
            rows = training.num_rows(),
            columns = training.num_columns(),
            only_delivered,
            with_distance_seller_customer,
            "Assembled training data"
        );
        Ok(training)
    }

    /// The training table, with options taken from configuration
    pub fn training_data_with(&self, config: &FeatureConfig) -> FeatureResult<Table> {
        self.training_data(config.only_delivered, config.with_distance_seller_customer)
    }
}

fn days_between(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Option<f64> {
    Some((to? - from?).num_milliseconds() as f64 / MILLIS_PER_DAY)
}

fn some_all(values: Vec<i64>) -> Vec<Option<i64>> {
    values.into_iter().map(Some).collect()
}

/// A table holding just the group keys as `order_id`
fn keyed_table(groups: &GroupIndex) -> FeatureResult<Table> {
    Ok(Table::new().with_column(ORDER_ID, DataColumn::String(groups.keys()))?)
}

/// First `value` per `key`, both rendered as strings
fn first_by_key(table: &Table, key: &str, value: &str) -> FeatureResult<HashMap<String, String>> {
    let mut map = HashMap::with_capacity(table.num_rows());
    for (k, v) in table.keys(key)?.into_iter().zip(table.keys(value)?) {
        if let (Some(k), Some(v)) = (k, v) {
            map.entry(k).or_insert(v);
        }
    }
    Ok(map)
}

/// First located geolocation row per zip prefix
fn locations_by_zip(geolocation: &Table) -> FeatureResult<HashMap<String, GeoPoint>> {
    let zips = geolocation.keys(GEO_ZIP)?;
    let lats = geolocation.column(GEO_LAT)?.to_f64();
    let lngs = geolocation.column(GEO_LNG)?.to_f64();

    let mut map = HashMap::new();
    for ((zip, lat), lng) in zips.into_iter().zip(lats).zip(lngs) {
        if let (Some(zip), Some(lat), Some(lng)) = (zip, lat, lng) {
            map.entry(zip).or_insert(GeoPoint::new(lat, lng));
        }
    }
    Ok(map)
}
