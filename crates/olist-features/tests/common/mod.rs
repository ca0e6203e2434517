//! Shared fixture: a miniature Olist dataset
//!
//! | order | status    | outcome in the training table                |
//! |-------|-----------|----------------------------------------------|
//! | A1    | delivered | kept: late by two days, one-star review      |
//! | A2    | delivered | kept: early, five-star, two sellers          |
//! | A3    | shipped   | never delivered                              |
//! | A4    | delivered | dropped: unparsable purchase timestamp       |
//! | A5    | delivered | dropped: no review                           |
//! | A6    | canceled  | kept only when undelivered orders are kept   |

#![allow(dead_code)]

use std::path::Path;

use olist_io::{CsvReader, DataReader, Dataset, Table};

pub const ORDERS_CSV: &str = "\
order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date
A1,C1,delivered,2024-01-01 00:00:00,2024-01-01 01:00:00,2024-01-02 00:00:00,2024-01-05 00:00:00,2024-01-03 00:00:00
A2,C2,delivered,2024-02-01 10:00:00,2024-02-01 11:00:00,2024-02-02 00:00:00,2024-02-03 10:00:00,2024-02-10 00:00:00
A3,C1,shipped,2024-03-01 00:00:00,2024-03-01 01:00:00,2024-03-02 00:00:00,,2024-03-10 00:00:00
A4,C3,delivered,not-a-date,,,2024-04-05 00:00:00,2024-04-06 00:00:00
A5,C2,delivered,2024-05-01 00:00:00,,,2024-05-02 00:00:00,2024-05-03 00:00:00
A6,C3,canceled,2024-06-01 00:00:00,,,2024-06-04 00:00:00,2024-06-10 00:00:00
";

pub const REVIEWS_CSV: &str = "\
review_id,order_id,review_score,review_comment_message
R1,A1,1,late
R2,A2,5,
R3,A3,4,
R4,A4,3,
R6,A6,2,
";

pub const ITEMS_CSV: &str = "\
order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value
A1,1,P1,S1,2024-01-02 00:00:00,10.0,2.0
A1,2,P2,S1,2024-01-02 00:00:00,20.0,3.0
A2,1,P3,S2,2024-02-02 00:00:00,100.0,15.5
A2,2,P3,S3,2024-02-02 00:00:00,50.0,4.5
A3,1,P1,S1,2024-03-02 00:00:00,10.0,2.0
A4,1,P4,S2,2024-04-02 00:00:00,35.0,7.0
A5,1,P1,S1,2024-05-02 00:00:00,10.0,2.0
A6,1,P1,S1,2024-06-02 00:00:00,5.0,1.0
";

pub const SELLERS_CSV: &str = "\
seller_id,seller_zip_code_prefix,seller_city,seller_state
S1,1001,sao paulo,SP
S2,2002,rio de janeiro,RJ
S3,9999,nowhere,XX
";

pub const CUSTOMERS_CSV: &str = "\
customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state
C1,U1,3003,rio de janeiro,RJ
C2,U2,1001,sao paulo,SP
C3,U3,2002,rio de janeiro,RJ
";

pub const GEOLOCATION_CSV: &str = "\
geolocation_zip_code_prefix,geolocation_lat,geolocation_lng,geolocation_city,geolocation_state
1001,-23.5505,-46.6333,sao paulo,SP
1001,0.0,0.0,sao paulo,SP
2002,-22.9068,-43.1729,rio de janeiro,RJ
3003,-22.9068,-43.1729,rio de janeiro,RJ
";

/// Source files as they are named in the Olist distribution
pub const FILES: &[(&str, &str)] = &[
    ("olist_orders_dataset.csv", ORDERS_CSV),
    ("olist_order_reviews_dataset.csv", REVIEWS_CSV),
    ("olist_order_items_dataset.csv", ITEMS_CSV),
    ("olist_sellers_dataset.csv", SELLERS_CSV),
    ("olist_customers_dataset.csv", CUSTOMERS_CSV),
    ("olist_geolocation_dataset.csv", GEOLOCATION_CSV),
];

/// Distance between the Sao Paulo and Rio fixture coordinates, in km
pub const SP_RIO_KM: f64 = 360.748_824_909_9;

/// Parse CSV text into a table
pub fn table(csv: &str) -> Table {
    CsvReader::from_reader(csv.as_bytes(), b',', true)
        .and_then(|reader| reader.read_table())
        .unwrap_or_else(|e| panic!("Failed to parse fixture: {}", e))
}

/// The whole fixture dataset, built in memory
pub fn dataset() -> Dataset {
    Dataset::from_tables(
        FILES
            .iter()
            .map(|(file, csv)| (olist_io::table_name(file), table(csv))),
    )
}

/// Write the fixture files into `dir`
pub fn write_files(dir: &Path) {
    for (file, csv) in FILES {
        std::fs::write(dir.join(file), csv)
            .unwrap_or_else(|_| panic!("Failed to write fixture: {}", file));
    }
}

/// Assert two floats agree to within 1e-9
pub fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.unwrap_or_else(|| panic!("expected {}, got a missing value", expected));
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
