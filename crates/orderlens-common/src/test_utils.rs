//! Test utilities and shared fixtures for OrderLens.
//!
//! Available to other crates through the `testing` feature.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::{
    path::{Path, PathBuf},
    sync::Once,
};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{dataset::ENGLISH_CATEGORY_COLUMN, Dataset, OrderRecord, REQUIRED_COLUMNS};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Parse `YYYY-MM-DD` into midnight of that day.
pub fn midnight(value: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .expect("test dates use YYYY-MM-DD")
        .and_time(NaiveTime::MIN)
}

/// Assert that two floating point numbers are approximately equal.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Builder for order rows with sensible defaults.
#[derive(Debug, Clone)]
pub struct OrderRecordBuilder {
    record: OrderRecord,
}

impl OrderRecordBuilder {
    pub fn new(customer: &str, order: &str, purchased: &str) -> Self {
        Self {
            record: OrderRecord {
                customer_id: customer.into(),
                order_id: order.into(),
                order_purchase_timestamp: midnight(purchased),
                order_delivered_carrier_date: None,
                payment_type: Some("credit_card".to_string()),
                payment_value: Some(0.0),
                product_category_name: None,
                product_category_name_english: None,
            },
        }
    }

    pub fn at(mut self, hour: u32, minute: u32) -> Self {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time");
        self.record.order_purchase_timestamp = self.record.order_purchase_timestamp.date().and_time(time);
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.record.payment_value = Some(value);
        self
    }

    pub fn no_value(mut self) -> Self {
        self.record.payment_value = None;
        self
    }

    pub fn payment_type(mut self, payment_type: &str) -> Self {
        self.record.payment_type = Some(payment_type.to_string());
        self
    }

    pub fn no_payment_type(mut self) -> Self {
        self.record.payment_type = None;
        self
    }

    /// Set the category, using the same name for both columns.
    pub fn category(mut self, category: &str) -> Self {
        self.record.product_category_name = Some(category.to_string());
        self.record.product_category_name_english = Some(category.to_string());
        self
    }

    pub fn categories(mut self, original: &str, english: &str) -> Self {
        self.record.product_category_name = Some(original.to_string());
        self.record.product_category_name_english = Some(english.to_string());
        self
    }

    pub fn carrier(mut self, delivered: &str) -> Self {
        self.record.order_delivered_carrier_date = Some(midnight(delivered));
        self
    }

    pub fn build(self) -> OrderRecord {
        self.record
    }
}

/// The three-row dataset used throughout the documentation:
/// A/1/2023-01-05/10/toys, A/2/2023-02-10/5/toys, B/3/2023-02-15/20/books.
pub fn scenario_records() -> Vec<OrderRecord> {
    vec![
        OrderRecordBuilder::new("A", "1", "2023-01-05")
            .value(10.0)
            .category("toys")
            .build(),
        OrderRecordBuilder::new("A", "2", "2023-02-10")
            .value(5.0)
            .category("toys")
            .payment_type("boleto")
            .build(),
        OrderRecordBuilder::new("B", "3", "2023-02-15")
            .value(20.0)
            .category("books")
            .build(),
    ]
}

/// The scenario rows as a loaded dataset.
pub fn scenario_dataset() -> Dataset {
    Dataset::from_records(scenario_records()).expect("scenario dataset is non-empty")
}

/// Write records as a dataset CSV into `dir`, returning the file path.
pub fn write_csv_fixture(dir: &Path, records: &[OrderRecord]) -> PathBuf {
    let path = dir.join("orders.csv");
    let mut writer = csv::Writer::from_path(&path).expect("create CSV fixture");

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    header.push(ENGLISH_CATEGORY_COLUMN);
    writer.write_record(&header).expect("write CSV header");

    let timestamp = |value: &NaiveDateTime| value.format("%Y-%m-%d %H:%M:%S").to_string();
    for record in records {
        writer
            .write_record([
                record.customer_id.0.clone(),
                record.order_id.0.clone(),
                timestamp(&record.order_purchase_timestamp),
                record
                    .order_delivered_carrier_date
                    .as_ref()
                    .map(timestamp)
                    .unwrap_or_default(),
                record.payment_type.clone().unwrap_or_default(),
                record
                    .payment_value
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
                record.product_category_name.clone().unwrap_or_default(),
                record.product_category_name_english.clone().unwrap_or_default(),
            ])
            .expect("write CSV row");
    }

    writer.flush().expect("flush CSV fixture");
    path
}

/// Write records into a fresh temporary directory.
///
/// Keep the returned directory alive for as long as the file is needed.
#[cfg(feature = "tempfile")]
pub fn temp_csv_fixture(records: &[OrderRecord]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let path = write_csv_fixture(dir.path(), records);
    (dir, path)
}
