//! Shared application state and request range handling

use crate::error::ApiError;
use chrono::NaiveDate;
use orderlens_common::{Dataset, DateRange, Result};
use orderlens_config::Config;
use orderlens_graphs::{DashboardData, DashboardOptions, DashboardRenderer, StyleConfig};
use orderlens_i18n::I18nManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything a request needs, loaded once at startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub config: Arc<Config>,
    pub i18n: Arc<I18nManager>,
}

/// The JSON summary served by `/api/summary` and printed by `summary`
#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub data: DashboardData,
    /// Locale-formatted total revenue
    pub total_revenue_display: String,
    pub currency: String,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Config, i18n: I18nManager) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
            i18n: Arc::new(i18n),
        }
    }

    pub fn options(&self) -> DashboardOptions {
        let dashboard = &self.config.dashboard;
        DashboardOptions {
            top_n: dashboard.top_n,
            category_label: dashboard.category_label,
            zero_fill_months: dashboard.zero_fill_months,
        }
    }

    pub fn style(&self) -> StyleConfig {
        let graph = &self.config.graph;
        StyleConfig::with_palette(
            &graph.background_color,
            &graph.primary_color,
            &graph.muted_color,
            &graph.font_family,
            graph.font_size,
        )
    }

    pub fn renderer(&self) -> DashboardRenderer<'_> {
        DashboardRenderer::new(&self.i18n, self.config.dashboard.currency.as_str())
            .with_size(self.config.graph.width, self.config.graph.height)
            .with_style(self.style())
    }

    /// Clamp optional user input to the dataset bounds
    pub fn resolve_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        self.dataset.bounds().clamp(start, end)
    }

    pub fn compute(&self, range: DateRange) -> DashboardData {
        DashboardData::compute(&self.dataset, range, &self.options())
    }

    pub fn summary(&self, range: DateRange) -> Summary {
        let data = self.compute(range);
        let currency = self.config.dashboard.currency.clone();
        Summary {
            total_revenue_display: self.i18n.total_revenue(data.total_revenue, &currency),
            data,
            currency,
        }
    }

    /// Summary as pretty-printed JSON
    pub fn summary_json(&self, range: DateRange) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.summary(range))?)
    }
}

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`, both optional.
///
/// Empty values, as sent by a cleared date input, count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeQuery {
    /// Parse both ends, rejecting anything that is not an ISO date
    pub fn parse(&self) -> std::result::Result<(Option<NaiveDate>, Option<NaiveDate>), ApiError> {
        Ok((
            parse_date_param("start", self.start.as_deref())?,
            parse_date_param("end", self.end.as_deref())?,
        ))
    }

    /// Parse and clamp into a range inside the dataset
    pub fn resolve(&self, state: &AppState) -> std::result::Result<DateRange, ApiError> {
        let (start, end) = self.parse()?;
        Ok(state.resolve_range(start, end))
    }
}

fn parse_date_param(
    name: &str,
    value: Option<&str>,
) -> std::result::Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::BadRequest(format!(
                    "invalid {name} date '{raw}', expected YYYY-MM-DD"
                ))
            }),
    }
}
