//! Turning computed aggregates into the dashboard's localized charts

use crate::category_bars::{CategoryBarsGraph, Ranking};
use crate::customer_bars::{CustomerBarsGraph, RfmMetric};
use crate::monthly_orders::MonthlyOrdersGraph;
use crate::payment_types::PaymentTypesGraph;
use crate::pipeline::DashboardData;
use crate::renderer::GraphRenderer;
use crate::{GraphConfig, StyleConfig};
use orderlens_common::{OrderLensError, Result};
use orderlens_i18n::I18nManager;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Every chart the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    MonthlyOrders,
    TopCategories,
    BottomCategories,
    PaymentTypes,
    RfmRecency,
    RfmFrequency,
    RfmMonetary,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::MonthlyOrders,
        ChartKind::TopCategories,
        ChartKind::BottomCategories,
        ChartKind::PaymentTypes,
        ChartKind::RfmRecency,
        ChartKind::RfmFrequency,
        ChartKind::RfmMonetary,
    ];

    /// URL and file name stem, e.g. `top-categories`
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::MonthlyOrders => "monthly-orders",
            ChartKind::TopCategories => "top-categories",
            ChartKind::BottomCategories => "bottom-categories",
            ChartKind::PaymentTypes => "payment-types",
            ChartKind::RfmRecency => "rfm-recency",
            ChartKind::RfmFrequency => "rfm-frequency",
            ChartKind::RfmMonetary => "rfm-monetary",
        }
    }

    fn title_key(&self) -> &'static str {
        match self {
            ChartKind::MonthlyOrders => "chart-monthly-orders-title",
            ChartKind::TopCategories => "chart-top-categories-title",
            ChartKind::BottomCategories => "chart-bottom-categories-title",
            ChartKind::PaymentTypes => "chart-payment-types-title",
            ChartKind::RfmRecency => "chart-rfm-recency-title",
            ChartKind::RfmFrequency => "chart-rfm-frequency-title",
            ChartKind::RfmMonetary => "chart-rfm-monetary-title",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartKind {
    type Err = OrderLensError;

    fn from_str(s: &str) -> Result<Self> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| {
                OrderLensError::validation_field(format!("unknown chart '{s}'"), "chart")
            })
    }
}

/// One of the dashboard's concrete charts
#[derive(Debug, Clone)]
pub enum DashboardChart {
    Monthly(MonthlyOrdersGraph),
    Categories(CategoryBarsGraph),
    Payments(PaymentTypesGraph),
    Customers(CustomerBarsGraph),
}

impl GraphRenderer for DashboardChart {
    fn name(&self) -> &'static str {
        match self {
            DashboardChart::Monthly(graph) => graph.name(),
            DashboardChart::Categories(graph) => graph.name(),
            DashboardChart::Payments(graph) => graph.name(),
            DashboardChart::Customers(graph) => graph.name(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            DashboardChart::Monthly(graph) => graph.is_empty(),
            DashboardChart::Categories(graph) => graph.is_empty(),
            DashboardChart::Payments(graph) => graph.is_empty(),
            DashboardChart::Customers(graph) => graph.is_empty(),
        }
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        match self {
            DashboardChart::Monthly(graph) => graph.draw(root, config),
            DashboardChart::Categories(graph) => graph.draw(root, config),
            DashboardChart::Payments(graph) => graph.draw(root, config),
            DashboardChart::Customers(graph) => graph.draw(root, config),
        }
    }
}

/// The rendered dashboard for one range
#[derive(Debug, Clone)]
pub struct RenderedViews {
    /// SVG documents in [`ChartKind::ALL`] order
    pub charts: Vec<(ChartKind, String)>,
    /// Localized "Total Revenue: ..." headline
    pub total_revenue: String,
}

impl RenderedViews {
    pub fn chart(&self, kind: ChartKind) -> Option<&str> {
        self.charts
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, svg)| svg.as_str())
    }
}

/// Builds localized charts from [`DashboardData`]
#[derive(Debug)]
pub struct DashboardRenderer<'a> {
    i18n: &'a I18nManager,
    currency: String,
    width: u32,
    height: u32,
    style: StyleConfig,
}

impl<'a> DashboardRenderer<'a> {
    pub fn new(i18n: &'a I18nManager, currency: impl Into<String>) -> Self {
        let defaults = GraphConfig::default();
        Self {
            i18n,
            currency: currency.into(),
            width: defaults.width,
            height: defaults.height,
            style: defaults.style,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Localized title, axis descriptions and styling for `kind`
    pub fn chart_config(&self, kind: ChartKind) -> GraphConfig {
        let message = |key: &str| self.i18n.message(key, None);
        let (x_label, y_label) = match kind {
            ChartKind::MonthlyOrders => (message("axis-time"), message("axis-orders")),
            ChartKind::TopCategories | ChartKind::BottomCategories => {
                (message("axis-sales"), String::new())
            }
            ChartKind::PaymentTypes => (message("axis-payment-type"), message("axis-order-count")),
            ChartKind::RfmRecency => (message("axis-customer-id"), message("axis-recency")),
            ChartKind::RfmFrequency => (message("axis-customer-id"), message("axis-frequency")),
            ChartKind::RfmMonetary => (
                message("axis-customer-id"),
                self.i18n.monetary_axis(&self.currency),
            ),
        };

        GraphConfig {
            title: message(kind.title_key()),
            width: self.width,
            height: self.height,
            x_label: Some(x_label).filter(|label| !label.is_empty()),
            y_label: Some(y_label).filter(|label| !label.is_empty()),
            no_data_label: message("no-data"),
            style: self.style.clone(),
        }
    }

    /// The chart object for `kind`, fed from `data`
    pub fn chart(&self, kind: ChartKind, data: &DashboardData) -> DashboardChart {
        match kind {
            ChartKind::MonthlyOrders => {
                DashboardChart::Monthly(MonthlyOrdersGraph::with_labels(&data.monthly_orders, |entry| {
                    format!("{} {}", self.i18n.month_name(entry.month), entry.year)
                }))
            }
            ChartKind::TopCategories => DashboardChart::Categories(CategoryBarsGraph::from_entries(
                Ranking::Top,
                data.top_categories.clone(),
            )),
            ChartKind::BottomCategories => {
                DashboardChart::Categories(CategoryBarsGraph::from_entries(
                    Ranking::Bottom,
                    data.bottom_categories.clone(),
                ))
            }
            ChartKind::PaymentTypes => {
                DashboardChart::Payments(PaymentTypesGraph::new(data.payment_types.clone()))
            }
            ChartKind::RfmRecency => DashboardChart::Customers(CustomerBarsGraph::new(
                RfmMetric::Recency,
                data.rfm_recency.clone(),
            )),
            ChartKind::RfmFrequency => DashboardChart::Customers(CustomerBarsGraph::new(
                RfmMetric::Frequency,
                data.rfm_frequency.clone(),
            )),
            ChartKind::RfmMonetary => DashboardChart::Customers(CustomerBarsGraph::new(
                RfmMetric::Monetary,
                data.rfm_monetary.clone(),
            )),
        }
    }

    /// Render one chart as SVG
    pub fn render_chart(&self, kind: ChartKind, data: &DashboardData) -> Result<String> {
        let svg = self.chart(kind, data).render_svg(&self.chart_config(kind))?;
        debug!(chart = %kind, bytes = svg.len(), "Rendered chart");
        Ok(svg)
    }

    /// Render one chart to a `.svg` or `.png` file
    pub fn render_chart_to_file(
        &self,
        kind: ChartKind,
        data: &DashboardData,
        path: &Path,
    ) -> Result<()> {
        self.chart(kind, data)
            .render_to_file(&self.chart_config(kind), path)
    }

    /// The localized total revenue headline
    pub fn total_revenue(&self, data: &DashboardData) -> String {
        self.i18n.total_revenue(data.total_revenue, &self.currency)
    }

    /// Render every chart plus the revenue headline
    #[instrument(skip_all, fields(range = %data.range))]
    pub fn render(&self, data: &DashboardData) -> Result<RenderedViews> {
        let charts = ChartKind::ALL
            .into_iter()
            .map(|kind| Ok((kind, self.render_chart(kind, data)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(RenderedViews {
            charts,
            total_revenue: self.total_revenue(data),
        })
    }
}
