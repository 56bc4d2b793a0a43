//! Customer ranking bar charts for one RFM metric

use crate::aggregator::RfmEntry;
use crate::renderer::{draw_vertical_bars, GraphRenderer};
use crate::GraphConfig;
use orderlens_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Customer ids are long hashes; only a prefix fits under a bar
const MAX_ID_CHARS: usize = 10;

/// The RFM metric a chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfmMetric {
    /// Days since the last purchase
    Recency,
    /// Distinct orders
    Frequency,
    /// Amount spent
    Monetary,
}

impl RfmMetric {
    pub fn value(&self, entry: &RfmEntry) -> f64 {
        match self {
            Self::Recency => entry.recency_days as f64,
            Self::Frequency => entry.frequency as f64,
            Self::Monetary => entry.monetary,
        }
    }
}

/// Vertical bars, one per customer, in ranking order
#[derive(Debug, Clone)]
pub struct CustomerBarsGraph {
    metric: RfmMetric,
    entries: Vec<RfmEntry>,
}

impl CustomerBarsGraph {
    /// Entries already ranked for `metric`
    pub fn new(metric: RfmMetric, entries: Vec<RfmEntry>) -> Self {
        Self { metric, entries }
    }

    pub fn metric(&self) -> RfmMetric {
        self.metric
    }

    pub fn entries(&self) -> &[RfmEntry] {
        &self.entries
    }
}

impl GraphRenderer for CustomerBarsGraph {
    fn name(&self) -> &'static str {
        match self.metric {
            RfmMetric::Recency => "rfm_recency",
            RfmMetric::Frequency => "rfm_frequency",
            RfmMetric::Monetary => "rfm_monetary",
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let labels: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.customer_id.to_string())
            .collect();
        let values: Vec<f64> = self
            .entries
            .iter()
            .map(|entry| self.metric.value(entry))
            .collect();

        draw_vertical_bars(root, config, &labels, &values, MAX_ID_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::rfm;
    use orderlens_common::test_utils::{date, scenario_records};

    fn entries() -> Vec<RfmEntry> {
        rfm(&scenario_records(), date(2023, 2, 15)).entries().to_vec()
    }

    #[test]
    fn test_metric_values() {
        let entries = entries();
        let a = &entries[0];

        assert_eq!(RfmMetric::Recency.value(a), 5.0);
        assert_eq!(RfmMetric::Frequency.value(a), 2.0);
        assert_eq!(RfmMetric::Monetary.value(a), 15.0);
    }

    #[test]
    fn test_render_each_metric() {
        for metric in [RfmMetric::Recency, RfmMetric::Frequency, RfmMetric::Monetary] {
            let graph = CustomerBarsGraph::new(metric, entries());
            let config = GraphConfig::titled(format!("By {metric:?}")).with_axes("customer_id", "");

            let svg = graph.render_svg(&config).unwrap();
            assert!(svg.contains(&format!("By {metric:?}")));
            assert_eq!(graph.metric(), metric);
        }
    }

    #[test]
    fn test_long_ids_are_shortened() {
        let mut entries = entries();
        entries[0].customer_id = "0a8556ac6be836b46b3e89920d59291c".into();
        let graph = CustomerBarsGraph::new(RfmMetric::Monetary, entries);

        let svg = graph.render_svg(&GraphConfig::default()).unwrap();
        assert!(svg.contains("0a8556a..."));
        assert!(!svg.contains("0a8556ac6be836b46b3e89920d59291c"));
    }

    #[test]
    fn test_names() {
        assert_eq!(CustomerBarsGraph::new(RfmMetric::Recency, vec![]).name(), "rfm_recency");
        assert_eq!(CustomerBarsGraph::new(RfmMetric::Monetary, vec![]).name(), "rfm_monetary");
    }
}
