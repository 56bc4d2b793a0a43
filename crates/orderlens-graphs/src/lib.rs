//! Range filtering, aggregation and chart rendering for OrderLens
//!
//! The flow for one request is `filter_by_range` → the aggregators →
//! [`DashboardData`] → [`DashboardRenderer`]. Everything is synchronous and
//! free of shared state, so the same dataset can serve concurrent requests.

#![warn(clippy::all)]

pub mod aggregator;
pub mod category_bars;
pub mod customer_bars;
pub mod filter;
pub mod monthly_orders;
pub mod payment_types;
pub mod pipeline;
pub mod renderer;
pub mod types;
pub mod views;

pub use aggregator::{
    category_counts, distinct_order_count, monthly_orders, payment_type_counts, rfm,
    total_revenue, zero_fill_months, CategoryCount, CategoryCounts, MonthlyOrders,
    PaymentTypeCount, RfmEntry, RfmTable,
};
pub use category_bars::{CategoryBarsGraph, Ranking};
pub use customer_bars::{CustomerBarsGraph, RfmMetric};
pub use filter::{filter_by_range, slice_by_range};
pub use monthly_orders::MonthlyOrdersGraph;
pub use payment_types::PaymentTypesGraph;
pub use pipeline::{DashboardData, DashboardOptions};
pub use renderer::{parse_color, GraphRenderer, ImageFormat};
pub use types::*;
pub use views::{ChartKind, DashboardChart, DashboardRenderer, RenderedViews};
