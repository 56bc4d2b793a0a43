//! Recomputation of every dashboard aggregate for one date range

use crate::aggregator::{
    category_counts, distinct_order_count, monthly_orders, payment_type_counts, rfm,
    total_revenue, zero_fill_months, CategoryCount, CategoryCounts, MonthlyOrders,
    PaymentTypeCount, RfmEntry, RfmTable,
};
use crate::filter::filter_by_range;
use chrono::NaiveDate;
use orderlens_common::{CategoryLabel, Dataset, DateBounds, DateRange};
use serde::Serialize;
use tracing::{info, instrument};

/// Knobs that change what the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOptions {
    /// Entries in the category and customer rankings
    pub top_n: usize,
    pub category_label: CategoryLabel,
    /// Insert empty months into the monthly rollup
    pub zero_fill_months: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            category_label: CategoryLabel::English,
            zero_fill_months: false,
        }
    }
}

/// Every aggregate the dashboard displays for one range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub range: DateRange,
    pub bounds: DateBounds,
    /// Rows inside the range
    pub row_count: usize,
    /// Distinct orders inside the range
    pub order_count: usize,
    /// Date RFM recency is measured against
    pub reference_date: NaiveDate,
    pub monthly_orders: Vec<MonthlyOrders>,
    pub top_categories: Vec<CategoryCount>,
    pub bottom_categories: Vec<CategoryCount>,
    pub payment_types: Vec<PaymentTypeCount>,
    pub total_revenue: f64,
    pub customer_count: usize,
    pub rfm_recency: Vec<RfmEntry>,
    pub rfm_frequency: Vec<RfmEntry>,
    pub rfm_monetary: Vec<RfmEntry>,
    #[serde(skip)]
    pub categories: CategoryCounts,
    #[serde(skip)]
    pub rfm: RfmTable,
}

impl DashboardData {
    /// Filter the dataset to `range` and run every aggregator over the result.
    ///
    /// RFM recency is measured against the latest purchase of the whole
    /// dataset, never the latest purchase inside `range`.
    #[instrument(skip_all, fields(range = %range))]
    pub fn compute(dataset: &Dataset, range: DateRange, options: &DashboardOptions) -> Self {
        let rows = filter_by_range(dataset, &range);
        let reference_date = dataset.max_purchase_date();

        let mut months = monthly_orders(rows);
        if options.zero_fill_months {
            months = zero_fill_months(&months);
        }

        let categories = category_counts(rows, options.category_label);
        let rfm = rfm(rows, reference_date);

        let data = Self {
            range,
            bounds: dataset.bounds(),
            row_count: rows.len(),
            order_count: distinct_order_count(rows),
            reference_date,
            monthly_orders: months,
            top_categories: categories.top(options.top_n),
            bottom_categories: categories.bottom(options.top_n),
            payment_types: payment_type_counts(rows),
            total_revenue: total_revenue(rows),
            customer_count: rfm.len(),
            rfm_recency: rfm.by_recency(options.top_n),
            rfm_frequency: rfm.by_frequency(options.top_n),
            rfm_monetary: rfm.by_monetary(options.top_n),
            categories,
            rfm,
        };

        info!(
            rows = data.row_count,
            orders = data.order_count,
            customers = data.customer_count,
            "Computed dashboard aggregates"
        );
        data
    }

    /// True when no row falls inside the range
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}
