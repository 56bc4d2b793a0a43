//! Domain types shared by the loader, the aggregators and the dashboard.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::{OrderLensError, Result};

/// A customer identifier as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An order identifier. Several rows may share one order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One order line of the pre-joined dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    pub order_purchase_timestamp: NaiveDateTime,
    pub order_delivered_carrier_date: Option<NaiveDateTime>,
    pub payment_type: Option<String>,
    pub payment_value: Option<f64>,
    pub product_category_name: Option<String>,
    pub product_category_name_english: Option<String>,
}

impl OrderRecord {
    /// Calendar date of the purchase, time of day dropped.
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }

    /// Payment value, with a missing value counting as nothing.
    pub fn payment_or_zero(&self) -> f64 {
        self.payment_value.unwrap_or(0.0)
    }

    /// Category name for the requested label, if the row has one.
    pub fn category(&self, label: CategoryLabel) -> Option<&str> {
        match label {
            CategoryLabel::English => self
                .product_category_name_english
                .as_deref()
                .or(self.product_category_name.as_deref()),
            CategoryLabel::Original => self.product_category_name.as_deref(),
        }
    }
}

/// Which category column the category aggregator groups by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLabel {
    /// English translation, falling back to the original name
    #[default]
    English,
    /// Category name as recorded in the source data
    Original,
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLabel::English => f.write_str("english"),
            CategoryLabel::Original => f.write_str("original"),
        }
    }
}

/// Inclusive range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting a start after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(OrderLensError::validation_field(
                format!("range start {start} is after end {end}"),
                "start",
            ));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Earliest and latest purchase dates of a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// The range spanning the whole dataset.
    pub fn full_range(&self) -> DateRange {
        DateRange {
            start: self.min,
            end: self.max,
        }
    }

    /// Turn arbitrary user input into a valid range inside the bounds.
    ///
    /// Missing ends default to the matching bound. Each end is clamped into
    /// `[min, max]`, and a reversed pair is swapped.
    pub fn clamp(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        let requested_start = start.unwrap_or(self.min);
        let requested_end = end.unwrap_or(self.max);

        let mut lo = requested_start.clamp(self.min, self.max);
        let mut hi = requested_end.clamp(self.min, self.max);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }

        if lo != requested_start || hi != requested_end {
            warn!(
                requested_start = %requested_start,
                requested_end = %requested_end,
                start = %lo,
                end = %hi,
                "Adjusted requested date range to dataset bounds"
            );
        }

        DateRange { start: lo, end: hi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bounds() -> DateBounds {
        DateBounds {
            min: date(2023, 1, 5),
            max: date(2023, 2, 15),
        }
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        assert!(DateRange::new(date(2023, 2, 1), date(2023, 1, 1)).is_err());

        let range = DateRange::new(date(2023, 1, 1), date(2023, 1, 31)).unwrap();
        assert_eq!(range.days(), 31);
        assert!(range.contains(date(2023, 1, 31)));
        assert!(!range.contains(date(2023, 2, 1)));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::single_day(date(2023, 1, 5));
        assert_eq!(range.start(), range.end());
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn test_clamp_defaults_to_full_bounds() {
        let range = bounds().clamp(None, None);
        assert_eq!(range, bounds().full_range());
    }

    #[test]
    fn test_clamp_out_of_bounds() {
        let range = bounds().clamp(Some(date(2020, 1, 1)), Some(date(2030, 1, 1)));
        assert_eq!(range.start(), date(2023, 1, 5));
        assert_eq!(range.end(), date(2023, 2, 15));
    }

    #[test]
    fn test_clamp_swaps_reversed_pair() {
        let range = bounds().clamp(Some(date(2023, 2, 10)), Some(date(2023, 1, 10)));
        assert_eq!(range.start(), date(2023, 1, 10));
        assert_eq!(range.end(), date(2023, 2, 10));
    }

    #[test]
    fn test_category_label_fallback() {
        let mut record = OrderRecord {
            customer_id: "A".into(),
            order_id: "1".into(),
            order_purchase_timestamp: date(2023, 1, 5).and_hms_opt(10, 0, 0).unwrap(),
            order_delivered_carrier_date: None,
            payment_type: None,
            payment_value: None,
            product_category_name: Some("brinquedos".to_string()),
            product_category_name_english: None,
        };

        assert_eq!(record.category(CategoryLabel::English), Some("brinquedos"));
        record.product_category_name_english = Some("toys".to_string());
        assert_eq!(record.category(CategoryLabel::English), Some("toys"));
        assert_eq!(record.category(CategoryLabel::Original), Some("brinquedos"));
        assert_eq!(record.payment_or_zero(), 0.0);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = CustomerId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert_eq!(id.to_string(), "abc");
    }
}
