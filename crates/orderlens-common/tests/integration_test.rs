//! Integration tests for orderlens-common crate.

use orderlens_common::{
    test_utils::{date, scenario_records, temp_csv_fixture, OrderRecordBuilder},
    CategoryLabel, Dataset, LoadError, OrderLensError,
};
use std::io::Write;

#[test]
fn test_load_fixture_from_disk() {
    let (_dir, path) = temp_csv_fixture(&scenario_records());
    let dataset = Dataset::load(&path).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.bounds().min, date(2023, 1, 5));
    assert_eq!(dataset.bounds().max, date(2023, 2, 15));
}

#[test]
fn test_load_ignores_leading_index_and_extra_columns() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        ",customer_id,order_id,order_item_id,order_purchase_timestamp,order_delivered_carrier_date,payment_type,payment_value,product_category_name,product_category_name_english,review_score"
    )
    .unwrap();
    writeln!(
        file,
        "0,c1,o1,1,2017-10-02 10:56:33,2017-10-04 19:55:00,credit_card,18.12,utilidades_domesticas,housewares,4"
    )
    .unwrap();
    writeln!(
        file,
        "1,c1,o1,1,2017-10-02 10:56:33,2017-10-04 19:55:00,voucher,2.00,utilidades_domesticas,housewares,4"
    )
    .unwrap();
    file.flush().unwrap();

    let dataset = Dataset::load(file.path()).unwrap();
    let first = &dataset.records()[0];

    assert_eq!(dataset.len(), 2);
    assert_eq!(first.payment_value, Some(18.12));
    assert_eq!(first.category(CategoryLabel::English), Some("housewares"));
    assert_eq!(
        first.category(CategoryLabel::Original),
        Some("utilidades_domesticas")
    );
}

#[test]
fn test_load_error_is_reported_as_load_variant() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "customer_id,order_id").unwrap();
    writeln!(file, "A,1").unwrap();
    file.flush().unwrap();

    let error = Dataset::load(file.path()).unwrap_err();
    assert!(error.to_string().contains("missing required columns"));
    assert!(matches!(
        error,
        OrderLensError::Load(LoadError::MissingColumns { .. })
    ));
}

#[test]
fn test_from_records_rejects_empty() {
    let error = Dataset::from_records(Vec::new()).unwrap_err();
    assert!(matches!(error, OrderLensError::Load(LoadError::Empty)));
}

#[test]
fn test_bounds_ignore_time_of_day() {
    let dataset = Dataset::from_records(vec![
        OrderRecordBuilder::new("A", "1", "2023-03-01").at(23, 59).build(),
        OrderRecordBuilder::new("B", "2", "2023-03-03").at(0, 1).build(),
    ])
    .unwrap();

    let bounds = dataset.bounds();
    assert_eq!(bounds.min, date(2023, 3, 1));
    assert_eq!(bounds.max, date(2023, 3, 3));
    assert_eq!(bounds.full_range().days(), 3);
}
