//! Aggregations over a filtered slice of order rows
//!
//! Every function here is total: empty input gives an empty or zero result.
//! Rows missing the grouped field (payment type, category) are left out of
//! that grouping; a missing payment value counts as zero.

use chrono::{Datelike, NaiveDate};
use orderlens_common::{CategoryLabel, CustomerId, OrderId, OrderRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Orders and revenue for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyOrders {
    pub year: i32,
    pub month: u32,
    /// Distinct orders placed in the month
    pub order_count: usize,
    /// Sum of payment values
    pub revenue: f64,
}

impl MonthlyOrders {
    /// An empty month
    pub fn zero(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            order_count: 0,
            revenue: 0.0,
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    fn next_month(year: i32, month: u32) -> (i32, u32) {
        if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        }
    }
}

/// Group rows by purchase month, oldest first.
///
/// Months without orders do not appear; see [`zero_fill_months`].
pub fn monthly_orders(rows: &[OrderRecord]) -> Vec<MonthlyOrders> {
    let mut months: BTreeMap<(i32, u32), (HashSet<&OrderId>, f64)> = BTreeMap::new();

    for row in rows {
        let timestamp = row.order_purchase_timestamp;
        let (orders, revenue) = months
            .entry((timestamp.year(), timestamp.month()))
            .or_default();
        orders.insert(&row.order_id);
        *revenue += row.payment_or_zero();
    }

    let result: Vec<MonthlyOrders> = months
        .into_iter()
        .map(|((year, month), (orders, revenue))| MonthlyOrders {
            year,
            month,
            order_count: orders.len(),
            revenue,
        })
        .collect();

    debug!(months = result.len(), "Computed monthly rollup");
    result
}

/// Insert zero rows for the months missing between the first and last entry.
pub fn zero_fill_months(months: &[MonthlyOrders]) -> Vec<MonthlyOrders> {
    let (Some(first), Some(last)) = (months.first(), months.last()) else {
        return Vec::new();
    };

    let present: HashMap<(i32, u32), &MonthlyOrders> = months
        .iter()
        .map(|entry| ((entry.year, entry.month), entry))
        .collect();

    let mut filled = Vec::with_capacity(months.len());
    let mut cursor = (first.year, first.month);
    let end = (last.year, last.month);
    while cursor <= end {
        let entry = present
            .get(&cursor)
            .map(|entry| (*entry).clone())
            .unwrap_or_else(|| MonthlyOrders::zero(cursor.0, cursor.1));
        filled.push(entry);
        cursor = MonthlyOrders::next_month(cursor.0, cursor.1);
    }

    filled
}

/// Number of distinct orders among `rows`
pub fn distinct_order_count(rows: &[OrderRecord]) -> usize {
    rows.iter()
        .map(|row| &row.order_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Rows counted for one product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Category counts, most frequent first.
///
/// Ties are ordered by category name so the ranking is reproducible;
/// [`CategoryCounts::ascending`] is the exact reverse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts {
    descending: Vec<CategoryCount>,
}

impl CategoryCounts {
    pub fn descending(&self) -> &[CategoryCount] {
        &self.descending
    }

    pub fn ascending(&self) -> Vec<CategoryCount> {
        self.descending.iter().rev().cloned().collect()
    }

    /// The `n` most frequent categories
    pub fn top(&self, n: usize) -> Vec<CategoryCount> {
        self.descending.iter().take(n).cloned().collect()
    }

    /// The `n` least frequent categories, least frequent first
    pub fn bottom(&self, n: usize) -> Vec<CategoryCount> {
        self.descending.iter().rev().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.descending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descending.is_empty()
    }
}

/// Count rows per product category, using the column chosen by `label`.
pub fn category_counts(rows: &[OrderRecord], label: CategoryLabel) -> CategoryCounts {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for category in rows.iter().filter_map(|row| row.category(label)) {
        *counts.entry(category).or_insert(0) += 1;
    }

    let mut descending: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    descending.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
    });

    debug!(categories = descending.len(), label = %label, "Computed category counts");
    CategoryCounts { descending }
}

/// Rows counted for one payment type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentTypeCount {
    pub payment_type: String,
    pub count: usize,
}

/// Count rows per payment type, most frequent first, ties by name.
pub fn payment_type_counts(rows: &[OrderRecord]) -> Vec<PaymentTypeCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for payment_type in rows.iter().filter_map(|row| row.payment_type.as_deref()) {
        *counts.entry(payment_type).or_insert(0) += 1;
    }

    let mut result: Vec<PaymentTypeCount> = counts
        .into_iter()
        .map(|(payment_type, count)| PaymentTypeCount {
            payment_type: payment_type.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.payment_type.cmp(&b.payment_type))
    });

    debug!(payment_types = result.len(), "Computed payment type counts");
    result
}

/// Sum of payment values
pub fn total_revenue(rows: &[OrderRecord]) -> f64 {
    rows.iter().map(OrderRecord::payment_or_zero).sum()
}

/// Recency, frequency and monetary value of one customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmEntry {
    pub customer_id: CustomerId,
    /// Whole days between the last purchase and the reference date
    pub recency_days: i64,
    /// Distinct orders
    pub frequency: usize,
    /// Sum of payment values
    pub monetary: f64,
}

/// Per-customer RFM metrics ordered by customer id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmTable {
    reference_date: NaiveDate,
    entries: Vec<RfmEntry>,
}

impl RfmTable {
    /// The date recency is measured against
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn entries(&self) -> &[RfmEntry] {
        &self.entries
    }

    pub fn get(&self, customer_id: &CustomerId) -> Option<&RfmEntry> {
        self.entries
            .binary_search_by(|entry| entry.customer_id.cmp(customer_id))
            .ok()
            .map(|index| &self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most recent customers, smallest recency first
    pub fn by_recency(&self, n: usize) -> Vec<RfmEntry> {
        self.ranked(n, |a, b| a.recency_days.cmp(&b.recency_days))
    }

    /// The `n` customers with the most orders
    pub fn by_frequency(&self, n: usize) -> Vec<RfmEntry> {
        self.ranked(n, |a, b| b.frequency.cmp(&a.frequency))
    }

    /// The `n` customers who spent the most
    pub fn by_monetary(&self, n: usize) -> Vec<RfmEntry> {
        self.ranked(n, |a, b| b.monetary.total_cmp(&a.monetary))
    }

    fn ranked<F>(&self, n: usize, order: F) -> Vec<RfmEntry>
    where
        F: Fn(&RfmEntry, &RfmEntry) -> std::cmp::Ordering,
    {
        let mut ranked: Vec<&RfmEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| order(a, b).then_with(|| a.customer_id.cmp(&b.customer_id)));
        ranked.into_iter().take(n).cloned().collect()
    }
}

/// Compute RFM metrics per customer.
///
/// `reference_date` is the latest purchase date of the whole dataset, not
/// of `rows`, so recency does not move when the range changes. Recency
/// saturates at zero.
pub fn rfm(rows: &[OrderRecord], reference_date: NaiveDate) -> RfmTable {
    struct Accumulator<'a> {
        orders: HashSet<&'a OrderId>,
        monetary: f64,
        last_purchase: NaiveDate,
    }

    let mut customers: BTreeMap<&CustomerId, Accumulator<'_>> = BTreeMap::new();
    for row in rows {
        let purchased = row.purchase_date();
        let accumulator = customers
            .entry(&row.customer_id)
            .or_insert_with(|| Accumulator {
                orders: HashSet::new(),
                monetary: 0.0,
                last_purchase: purchased,
            });
        accumulator.orders.insert(&row.order_id);
        accumulator.monetary += row.payment_or_zero();
        accumulator.last_purchase = accumulator.last_purchase.max(purchased);
    }

    let entries: Vec<RfmEntry> = customers
        .into_iter()
        .map(|(customer_id, accumulator)| RfmEntry {
            customer_id: customer_id.clone(),
            recency_days: (reference_date - accumulator.last_purchase).num_days().max(0),
            frequency: accumulator.orders.len(),
            monetary: accumulator.monetary,
        })
        .collect();

    debug!(customers = entries.len(), reference_date = %reference_date, "Computed RFM table");
    RfmTable {
        reference_date,
        entries,
    }
}
