//! Feature table tests, one group at a time

mod common;

use common::{assert_close, dataset, table, SP_RIO_KM};
use olist_features::columns::*;
use olist_features::{FeatureError, OrderFeatures};
use olist_io::{Dataset, Table};

fn features() -> OrderFeatures {
    OrderFeatures::new(dataset())
}

fn ids(table: &Table) -> Vec<String> {
    table
        .keys(ORDER_ID)
        .unwrap()
        .into_iter()
        .map(|k| k.unwrap())
        .collect()
}

fn floats(table: &Table, column: &str) -> Vec<Option<f64>> {
    table.column(column).unwrap().to_f64()
}

fn ints(table: &Table, column: &str) -> Vec<Option<i64>> {
    table.column(column).unwrap().to_i64()
}

// === Wait time ===

#[test]
fn test_wait_time_example_order() {
    let wait = features().wait_time(true).unwrap();

    assert_eq!(
        wait.column_names(),
        vec![ORDER_ID, WAIT_TIME, EXPECTED_WAIT_TIME, DELAY_VS_EXPECTED, ORDER_STATUS]
    );
    assert_eq!(ids(&wait), vec!["A1", "A2", "A4", "A5"]);

    assert_close(floats(&wait, WAIT_TIME)[0], 4.0);
    assert_close(floats(&wait, EXPECTED_WAIT_TIME)[0], 2.0);
    assert_close(floats(&wait, DELAY_VS_EXPECTED)[0], 2.0);
}

#[test]
fn test_wait_time_fractional_days_and_early_delivery() {
    let wait = features().wait_time(true).unwrap();

    // A2: purchased 10:00, delivered two days later, estimate 8 days 14 hours out
    assert_close(floats(&wait, WAIT_TIME)[1], 2.0);
    assert_close(floats(&wait, EXPECTED_WAIT_TIME)[1], 8.0 + 14.0 / 24.0);
    assert_close(floats(&wait, DELAY_VS_EXPECTED)[1], 0.0);
}

#[test]
fn test_wait_time_unparsable_timestamp_is_missing() {
    let wait = features().wait_time(true).unwrap();

    // A4 has a garbage purchase timestamp but a valid delay
    assert_eq!(floats(&wait, WAIT_TIME)[2], None);
    assert_eq!(floats(&wait, EXPECTED_WAIT_TIME)[2], None);
    assert_close(floats(&wait, DELAY_VS_EXPECTED)[2], 0.0);
}

#[test]
fn test_wait_time_all_statuses() {
    let wait = features().wait_time(false).unwrap();

    assert_eq!(ids(&wait), vec!["A1", "A2", "A3", "A4", "A5", "A6"]);
    // A3 was never delivered
    assert_eq!(floats(&wait, WAIT_TIME)[2], None);
    assert_eq!(floats(&wait, DELAY_VS_EXPECTED)[2], None);
    assert_close(floats(&wait, EXPECTED_WAIT_TIME)[2], 9.0);
    assert_eq!(
        wait.column(ORDER_STATUS).unwrap().display_at(5),
        "canceled"
    );
}

#[test]
fn test_wait_time_empty_orders() {
    let empty = table(
        "order_id,customer_id,order_status,order_purchase_timestamp,order_delivered_customer_date,order_estimated_delivery_date\n",
    );
    let features = OrderFeatures::new(Dataset::from_tables([(ORDERS, empty)]));

    let wait = features.wait_time(true).unwrap();
    assert_eq!(wait.num_rows(), 0);
    assert_eq!(wait.num_columns(), 5);
}

// === Review score ===

#[test]
fn test_review_flags() {
    let reviews = features().review_score().unwrap();

    assert_eq!(
        reviews.column_names(),
        vec![ORDER_ID, DIM_IS_FIVE_STAR, DIM_IS_ONE_STAR, REVIEW_SCORE]
    );
    assert_eq!(ids(&reviews), vec!["A1", "A2", "A3", "A4", "A6"]);
    assert_eq!(
        ints(&reviews, DIM_IS_FIVE_STAR),
        vec![Some(0), Some(1), Some(0), Some(0), Some(0)]
    );
    assert_eq!(
        ints(&reviews, DIM_IS_ONE_STAR),
        vec![Some(1), Some(0), Some(0), Some(0), Some(0)]
    );
    assert_eq!(
        ints(&reviews, REVIEW_SCORE),
        vec![Some(1), Some(5), Some(4), Some(3), Some(2)]
    );
}

#[test]
fn test_review_missing_score_has_zero_flags() {
    let reviews = table("order_id,review_score\nA1,\nA2,5\n");
    let features = OrderFeatures::new(Dataset::from_tables([(ORDER_REVIEWS, reviews)]));

    let scored = features.review_score().unwrap();
    assert_eq!(ints(&scored, DIM_IS_FIVE_STAR), vec![Some(0), Some(1)]);
    assert_eq!(ints(&scored, DIM_IS_ONE_STAR), vec![Some(0), Some(0)]);
    assert_eq!(ints(&scored, REVIEW_SCORE), vec![None, Some(5)]);
}

// === Items and sellers ===

#[test]
fn test_item_and_seller_counts() {
    let features = features();
    let items = features.number_items().unwrap();
    let sellers = features.number_sellers().unwrap();

    assert_eq!(ids(&items), vec!["A1", "A2", "A3", "A4", "A5", "A6"]);
    assert_eq!(ids(&sellers), ids(&items));

    // A1: two items from S1; A2: two items from S2 and S3
    assert_eq!(&ints(&items, NUMBER_OF_ITEMS)[..2], &[Some(2), Some(2)]);
    assert_eq!(&ints(&sellers, NUMBER_OF_SELLERS)[..2], &[Some(1), Some(2)]);
}

#[test]
fn test_duplicate_products_are_counted() {
    let items = table("order_id,product_id,seller_id\nA1,P1,S1\nA1,P1,S1\nA1,P1,S2\n");
    let features = OrderFeatures::new(Dataset::from_tables([(ORDER_ITEMS, items)]));

    assert_eq!(ints(&features.number_items().unwrap(), NUMBER_OF_ITEMS), vec![Some(3)]);
    assert_eq!(
        ints(&features.number_sellers().unwrap(), NUMBER_OF_SELLERS),
        vec![Some(2)]
    );
}

// === Price and freight ===

#[test]
fn test_price_and_freight_summed_per_order() {
    let totals = features().price_and_freight().unwrap();

    assert_eq!(totals.column_names(), vec![ORDER_ID, PRICE, FREIGHT_VALUE]);
    assert_eq!(totals.num_rows(), 6);
    assert_close(floats(&totals, PRICE)[0], 30.0);
    assert_close(floats(&totals, FREIGHT_VALUE)[0], 5.0);
    assert_close(floats(&totals, PRICE)[1], 150.0);
    assert_close(floats(&totals, FREIGHT_VALUE)[1], 20.0);
}

#[test]
fn test_price_with_no_values_is_missing() {
    let items = table("order_id,product_id,seller_id,price,freight_value\nA1,P1,S1,,\nA2,P2,S1,3.5,1\n");
    let features = OrderFeatures::new(Dataset::from_tables([(ORDER_ITEMS, items)]));

    let totals = features.price_and_freight().unwrap();
    assert_eq!(floats(&totals, PRICE), vec![None, Some(3.5)]);
    assert_eq!(floats(&totals, FREIGHT_VALUE), vec![None, Some(1.0)]);
}

// === Distance ===

#[test]
fn test_distance_mean_over_located_items() {
    let distance = features().distance_seller_customer().unwrap();
    assert_eq!(distance.column_names(), vec![ORDER_ID, DISTANCE_SELLER_CUSTOMER]);

    let km = floats(&distance, DISTANCE_SELLER_CUSTOMER);
    // A1: Sao Paulo seller, Rio customer (first geolocation row for 1001 wins)
    assert!((km[0].unwrap() - SP_RIO_KM).abs() < 1e-6);
    // A2: the S3 item cannot be located, the S2 item can
    assert!((km[1].unwrap() - SP_RIO_KM).abs() < 1e-6);
    // A4: seller and customer share a zip prefix
    assert_eq!(km[3], Some(0.0));
}

#[test]
fn test_distance_unlocatable_order_is_missing() {
    let dataset = Dataset::from_tables([
        (ORDERS, table("order_id,customer_id\nA1,C1\n")),
        (ORDER_ITEMS, table("order_id,product_id,seller_id\nA1,P1,S9\n")),
        (SELLERS, table("seller_id,seller_zip_code_prefix\nS9,5555\n")),
        (CUSTOMERS, table("customer_id,customer_zip_code_prefix\nC1,1001\n")),
        (
            GEOLOCATION,
            table("geolocation_zip_code_prefix,geolocation_lat,geolocation_lng\n1001,-23.5,-46.6\n"),
        ),
    ]);

    let distance = OrderFeatures::new(dataset).distance_seller_customer().unwrap();
    assert_eq!(floats(&distance, DISTANCE_SELLER_CUSTOMER), vec![None]);
}

// === Errors ===

#[test]
fn test_missing_table_reported() {
    let features = OrderFeatures::new(Dataset::from_tables([(ORDERS, table("order_id\nA1\n"))]));
    let err = features.number_items().unwrap_err();
    assert!(matches!(err, FeatureError::MissingTable(name) if name == ORDER_ITEMS));
}

#[test]
fn test_missing_column_reported() {
    let features = OrderFeatures::new(Dataset::from_tables([(
        ORDER_REVIEWS,
        table("order_id,score\nA1,5\n"),
    )]));
    let err = features.review_score().unwrap_err();
    assert!(matches!(err, FeatureError::Io(_)));
}

#[test]
fn test_methods_are_idempotent() {
    let features = features();
    assert_eq!(features.wait_time(false).unwrap(), features.wait_time(false).unwrap());
    assert_eq!(
        features.distance_seller_customer().unwrap(),
        features.distance_seller_customer().unwrap()
    );
}
