//! Loading the pre-joined order CSV into an immutable, date-sorted table.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, instrument};

use crate::{
    error::LoadError, CustomerId, DateBounds, OrderId, OrderLensError, OrderRecord, Result,
};

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "customer_id",
    "order_id",
    "order_purchase_timestamp",
    "order_delivered_carrier_date",
    "payment_type",
    "payment_value",
    "product_category_name",
];

/// Column holding the English category names, used when present.
pub const ENGLISH_CATEGORY_COLUMN: &str = "product_category_name_english";

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// The loaded order table.
///
/// Rows are sorted ascending by purchase timestamp, ties keeping file order,
/// and the table is never empty.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<OrderRecord>,
    bounds: DateBounds,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let dataset = Self::from_reader(file)?;
        info!(
            rows = dataset.len(),
            min_date = %dataset.bounds.min,
            max_date = %dataset.bounds.max,
            "Loaded order dataset"
        );
        Ok(dataset)
    }

    /// Parse a dataset from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = ColumnIndex::resolve(reader.headers()?)?;

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = result?;
            let line = row
                .position()
                .map(|position| position.line())
                .unwrap_or(index as u64 + 2);
            records.push(columns.parse_row(&row, line)?);
        }

        debug!(rows = records.len(), "Parsed CSV rows");
        Self::from_records(records)
    }

    /// Build a dataset from already parsed records.
    pub fn from_records(mut records: Vec<OrderRecord>) -> Result<Self> {
        // sort_by_key is stable, so same-timestamp rows keep file order
        records.sort_by_key(|record| record.order_purchase_timestamp);

        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(LoadError::Empty.into());
        };
        let bounds = DateBounds {
            min: first.purchase_date(),
            max: last.purchase_date(),
        };

        Ok(Self { records, bounds })
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a successfully loaded dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    /// Most recent purchase date across the whole table.
    ///
    /// This is the reference point for RFM recency regardless of any range
    /// the caller filters to.
    pub fn max_purchase_date(&self) -> NaiveDate {
        self.bounds.max
    }
}

/// Positions of the known columns within the header row.
#[derive(Debug)]
struct ColumnIndex {
    customer_id: usize,
    order_id: usize,
    purchase_timestamp: usize,
    carrier_date: usize,
    payment_type: usize,
    payment_value: usize,
    category: usize,
    category_english: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}') == name)
        };

        let positions = REQUIRED_COLUMNS.map(find);
        let [
            Some(customer_id),
            Some(order_id),
            Some(purchase_timestamp),
            Some(carrier_date),
            Some(payment_type),
            Some(payment_value),
            Some(category),
        ] = positions
        else {
            let columns = REQUIRED_COLUMNS
                .iter()
                .zip(positions)
                .filter(|(_, position)| position.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(LoadError::MissingColumns { columns }.into());
        };

        Ok(Self {
            customer_id,
            order_id,
            purchase_timestamp,
            carrier_date,
            payment_type,
            payment_value,
            category,
            category_english: find(ENGLISH_CATEGORY_COLUMN),
        })
    }

    fn parse_row(&self, row: &StringRecord, line: u64) -> Result<OrderRecord> {
        let text = |index: usize| row.get(index).filter(|value| !value.is_empty());
        let owned = |index: usize| text(index).map(str::to_string);
        let required = |index: usize, column: &'static str| {
            owned(index).ok_or_else(|| invalid_field(line, column, ""))
        };

        let customer_id = CustomerId(required(self.customer_id, "customer_id")?);
        let order_id = OrderId(required(self.order_id, "order_id")?);

        let purchase_raw = text(self.purchase_timestamp).unwrap_or_default();
        let order_purchase_timestamp = parse_timestamp(purchase_raw).ok_or_else(|| {
            invalid_field(line, "order_purchase_timestamp", purchase_raw)
        })?;

        let order_delivered_carrier_date = match text(self.carrier_date) {
            Some(raw) => Some(
                parse_timestamp(raw)
                    .ok_or_else(|| invalid_field(line, "order_delivered_carrier_date", raw))?,
            ),
            None => None,
        };

        let payment_value = match text(self.payment_value) {
            Some(raw) => Some(
                parse_payment(raw).ok_or_else(|| invalid_field(line, "payment_value", raw))?,
            ),
            None => None,
        };

        Ok(OrderRecord {
            customer_id,
            order_id,
            order_purchase_timestamp,
            order_delivered_carrier_date,
            payment_type: owned(self.payment_type),
            payment_value,
            product_category_name: owned(self.category),
            product_category_name_english: self.category_english.and_then(owned),
        })
    }
}

fn invalid_field(line: u64, column: &'static str, value: &str) -> OrderLensError {
    LoadError::InvalidField {
        line,
        column,
        value: value.to_string(),
    }
    .into()
}

/// Parse a timestamp cell; a bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn parse_payment(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = ",customer_id,order_id,order_purchase_timestamp,order_delivered_carrier_date,payment_type,payment_value,product_category_name,product_category_name_english";

    fn csv_with(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    fn load_str(text: &str) -> Result<Dataset> {
        Dataset::from_reader(text.as_bytes())
    }

    fn load_error(text: &str) -> LoadError {
        match load_str(text).unwrap_err() {
            OrderLensError::Load(error) => error,
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_sorts_and_sets_bounds() {
        let dataset = load_str(&csv_with(&[
            "0,B,3,2023-02-15 09:00:00,2023-02-16 10:00:00,voucher,20.0,livros,books",
            "1,A,1,2023-01-05 08:30:00,,credit_card,10.0,brinquedos,toys",
            "2,A,2,2023-02-10 12:00:00,2023-02-11 09:00:00,boleto,5,brinquedos,toys",
        ]))
        .unwrap();

        assert_eq!(dataset.len(), 3);
        let orders: Vec<&str> = dataset
            .records()
            .iter()
            .map(|record| record.order_id.0.as_str())
            .collect();
        assert_eq!(orders, ["1", "2", "3"]);

        let bounds = dataset.bounds();
        assert_eq!(bounds.min, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2023, 2, 15).unwrap());
        assert_eq!(dataset.max_purchase_date(), bounds.max);

        let first = &dataset.records()[0];
        assert!(first.order_delivered_carrier_date.is_none());
        assert_eq!(first.product_category_name_english.as_deref(), Some("toys"));
    }

    #[test]
    fn test_stable_sort_keeps_file_order_for_equal_timestamps() {
        let dataset = load_str(&csv_with(&[
            "0,A,9,2023-01-05 08:30:00,,credit_card,1,x,x",
            "1,B,8,2023-01-05 08:30:00,,credit_card,2,y,y",
            "2,C,7,2023-01-01 00:00:00,,credit_card,3,z,z",
        ]))
        .unwrap();

        let orders: Vec<&str> = dataset
            .records()
            .iter()
            .map(|record| record.order_id.0.as_str())
            .collect();
        assert_eq!(orders, ["7", "9", "8"]);
    }

    #[test]
    fn test_missing_cells_become_none() {
        let dataset = load_str(&csv_with(&["0,A,1,2023-01-05 08:30:00,,,,,"])).unwrap();
        let record = &dataset.records()[0];

        assert!(record.payment_type.is_none());
        assert!(record.payment_value.is_none());
        assert!(record.product_category_name.is_none());
        assert!(record.product_category_name_english.is_none());
    }

    #[test]
    fn test_english_column_is_optional() {
        let text = "customer_id,order_id,order_purchase_timestamp,order_delivered_carrier_date,payment_type,payment_value,product_category_name\nA,1,2023-01-05,,boleto,3.5,toys";
        let dataset = load_str(text).unwrap();
        let record = &dataset.records()[0];

        assert_eq!(record.product_category_name.as_deref(), Some("toys"));
        assert!(record.product_category_name_english.is_none());
        assert_eq!(record.order_purchase_timestamp.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_missing_columns_are_named() {
        let text = "customer_id,order_id,order_purchase_timestamp\nA,1,2023-01-05";
        match load_error(text) {
            LoadError::MissingColumns { columns } => {
                assert_eq!(
                    columns,
                    [
                        "order_delivered_carrier_date",
                        "payment_type",
                        "payment_value",
                        "product_category_name"
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_purchase_timestamp_reports_line() {
        let error = load_error(&csv_with(&[
            "0,A,1,2023-01-05 08:30:00,,boleto,1,x,x",
            "1,A,2,not a date,,boleto,1,x,x",
        ]));
        match error {
            LoadError::InvalidField { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "order_purchase_timestamp");
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_purchase_timestamp_is_fatal() {
        let error = load_error(&csv_with(&["0,A,1,,,boleto,1,x,x"]));
        assert!(matches!(
            error,
            LoadError::InvalidField {
                column: "order_purchase_timestamp",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_identifiers_are_fatal() {
        let error = load_error(&csv_with(&[
            "0,A,1,2023-01-05,,boleto,1,x,x",
            "1,,2,2023-01-06,,boleto,1,x,x",
        ]));
        match error {
            LoadError::InvalidField { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "customer_id");
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let error = load_error(&csv_with(&["0,A, ,2023-01-05,,boleto,1,x,x"]));
        assert!(matches!(
            error,
            LoadError::InvalidField {
                column: "order_id",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_carrier_date_is_fatal() {
        let error = load_error(&csv_with(&["0,A,1,2023-01-05,yesterday,boleto,1,x,x"]));
        assert!(matches!(
            error,
            LoadError::InvalidField {
                column: "order_delivered_carrier_date",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_or_non_numeric_payment_is_fatal() {
        for value in ["-1.0", "ten", "NaN"] {
            let row = format!("0,A,1,2023-01-05,,boleto,{value},x,x");
            let error = load_error(&csv_with(&[row.as_str()]));
            assert!(
                matches!(error, LoadError::InvalidField { column: "payment_value", .. }),
                "value {value} should be rejected"
            );
        }
    }

    #[test]
    fn test_header_only_file_is_empty_error() {
        assert!(matches!(load_error(HEADER), LoadError::Empty));
    }

    #[test]
    fn test_ragged_rows_are_csv_errors() {
        let error = load_error(&csv_with(&["0,A,1,2023-01-05"]));
        assert!(matches!(error, LoadError::Csv(_)));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let error = Dataset::load(temp_dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(
            error,
            OrderLensError::Load(LoadError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2017, 10, 2)
            .unwrap()
            .and_hms_opt(10, 56, 33)
            .unwrap();

        assert_eq!(parse_timestamp("2017-10-02 10:56:33"), Some(expected));
        assert_eq!(parse_timestamp("2017-10-02T10:56:33"), Some(expected));
        assert_eq!(
            parse_timestamp("2017-10-02 10:56:33.250").map(|ts| ts.date()),
            Some(expected.date())
        );
        assert_eq!(
            parse_timestamp("2017-10-02"),
            Some(expected.date().and_time(NaiveTime::MIN))
        );
        assert_eq!(parse_timestamp("02/10/2017"), None);
    }
}
