//! Table and column names of the source data and feature outputs

pub const ORDERS: &str = "orders";
pub const ORDER_REVIEWS: &str = "order_reviews";
pub const ORDER_ITEMS: &str = "order_items";
pub const SELLERS: &str = "sellers";
pub const CUSTOMERS: &str = "customers";
pub const GEOLOCATION: &str = "geolocation";

pub const ORDER_ID: &str = "order_id";
pub const ORDER_STATUS: &str = "order_status";
pub const CUSTOMER_ID: &str = "customer_id";
pub const PRODUCT_ID: &str = "product_id";
pub const SELLER_ID: &str = "seller_id";

pub const PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const DELIVERED_DATE: &str = "order_delivered_customer_date";
pub const ESTIMATED_DATE: &str = "order_estimated_delivery_date";

pub const SELLER_ZIP: &str = "seller_zip_code_prefix";
pub const CUSTOMER_ZIP: &str = "customer_zip_code_prefix";
pub const GEO_ZIP: &str = "geolocation_zip_code_prefix";
pub const GEO_LAT: &str = "geolocation_lat";
pub const GEO_LNG: &str = "geolocation_lng";

pub const STATUS_DELIVERED: &str = "delivered";

pub const WAIT_TIME: &str = "wait_time";
pub const EXPECTED_WAIT_TIME: &str = "expected_wait_time";
pub const DELAY_VS_EXPECTED: &str = "delay_vs_expected";
pub const DIM_IS_FIVE_STAR: &str = "dim_is_five_star";
pub const DIM_IS_ONE_STAR: &str = "dim_is_one_star";
pub const REVIEW_SCORE: &str = "review_score";
pub const NUMBER_OF_ITEMS: &str = "number_of_items";
pub const NUMBER_OF_SELLERS: &str = "number_of_sellers";
pub const PRICE: &str = "price";
pub const FREIGHT_VALUE: &str = "freight_value";
pub const DISTANCE_SELLER_CUSTOMER: &str = "distance_seller_customer";

/// Training table columns, in order, without the optional distance
pub const TRAINING_COLUMNS: &[&str] = &[
    ORDER_ID,
    WAIT_TIME,
    EXPECTED_WAIT_TIME,
    DELAY_VS_EXPECTED,
    ORDER_STATUS,
    DIM_IS_FIVE_STAR,
    DIM_IS_ONE_STAR,
    REVIEW_SCORE,
    NUMBER_OF_ITEMS,
    NUMBER_OF_SELLERS,
    PRICE,
    FREIGHT_VALUE,
];
