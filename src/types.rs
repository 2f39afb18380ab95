use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tabled::Tabled;

/// Column names the loader requires in the CSV header.
pub const EXPECTED_COLUMNS: [&str; 8] = [
    "order_datetime",
    "city",
    "order_value",
    "delivery_time_min",
    "delivery_fee",
    "payment_method",
    "promo_code_used",
    "restaurant_category",
];

#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub order_datetime: Option<String>,
    pub city: Option<String>,
    pub order_value: Option<String>,
    pub delivery_time_min: Option<String>,
    pub delivery_fee: Option<String>,
    pub payment_method: Option<String>,
    pub promo_code_used: Option<String>,
    pub restaurant_category: Option<String>,
}

/// One delivery order. Every cell may be empty; a blank timestamp leaves
/// both `order_datetime` and `order_date` as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_datetime: Option<NaiveDateTime>,
    pub order_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub order_value: Option<f64>,
    pub delivery_time_min: Option<f64>,
    pub delivery_fee: Option<f64>,
    pub payment_method: Option<String>,
    pub promo_code_used: Option<String>,
    pub restaurant_category: Option<String>,
}

impl OrderRecord {
    /// Builds a record with an optional timestamp, deriving `order_date` from it.
    pub fn new(order_datetime: Option<NaiveDateTime>) -> Self {
        Self {
            order_datetime,
            order_date: order_datetime.map(|ts| ts.date()),
            city: None,
            order_value: None,
            delivery_time_min: None,
            delivery_fee: None,
            payment_method: None,
            promo_code_used: None,
            restaurant_category: None,
        }
    }

    pub fn at(order_datetime: NaiveDateTime) -> Self {
        Self::new(Some(order_datetime))
    }
}

/// A header column outside [`EXPECTED_COLUMNS`], kept as raw cells for the schema report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraColumn {
    pub name: String,
    /// One entry per loaded row; blank cells are `None`.
    pub cells: Vec<Option<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
    /// Trailing mean over the configured window; `None` until the window is full.
    pub rolling_avg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDailyCount {
    pub date: NaiveDate,
    pub city: String,
    pub count: usize,
}

/// One category of a frequency distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Tabled, Clone)]
pub struct ColumnInfoRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Column")]
    pub column: String,
    #[tabled(rename = "Non-Null Count")]
    pub non_null: usize,
    #[tabled(rename = "Dtype")]
    pub dtype: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct DescribeRow {
    #[tabled(rename = "Column")]
    pub column: String,
    #[tabled(rename = "count")]
    pub count: usize,
    #[tabled(rename = "mean")]
    pub mean: String,
    #[tabled(rename = "std")]
    pub std: String,
    #[tabled(rename = "min")]
    pub min: String,
    #[tabled(rename = "25%")]
    pub q25: String,
    #[tabled(rename = "50%")]
    pub q50: String,
    #[tabled(rename = "75%")]
    pub q75: String,
    #[tabled(rename = "max")]
    pub max: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct NullCountRow {
    #[tabled(rename = "Column")]
    pub column: String,
    #[tabled(rename = "Missing")]
    pub missing: usize,
}

#[derive(Debug, Tabled, Clone)]
pub struct BusyDayRow {
    #[tabled(rename = "order_date")]
    pub date: String,
    #[tabled(rename = "order_count")]
    pub count: usize,
}

#[derive(Debug, Tabled, Clone)]
pub struct CityCountRow {
    #[tabled(rename = "City")]
    pub city: String,
    #[tabled(rename = "Orders")]
    pub orders: String,
}
