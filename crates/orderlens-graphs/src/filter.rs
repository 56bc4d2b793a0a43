//! Date range selection over the loaded dataset

use orderlens_common::{Dataset, DateRange, OrderRecord};
use tracing::debug;

/// Rows whose purchase date lies inside `range`, both ends included.
///
/// The dataset is sorted by purchase timestamp, so the matching rows form
/// one contiguous slice located by binary search. The range is used as
/// given; clamping to the dataset bounds happens before this call.
pub fn filter_by_range<'a>(dataset: &'a Dataset, range: &DateRange) -> &'a [OrderRecord] {
    let rows = slice_by_range(dataset.records(), range);
    debug!(range = %range, rows = rows.len(), "Filtered dataset");
    rows
}

/// Same as [`filter_by_range`] for any slice sorted by purchase timestamp.
pub fn slice_by_range<'a>(records: &'a [OrderRecord], range: &DateRange) -> &'a [OrderRecord] {
    let start = records.partition_point(|record| record.purchase_date() < range.start());
    let end = records.partition_point(|record| record.purchase_date() <= range.end());
    &records[start..end.max(start)]
}
