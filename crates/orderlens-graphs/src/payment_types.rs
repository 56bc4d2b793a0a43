//! Payment type distribution bar chart

use crate::aggregator::PaymentTypeCount;
use crate::renderer::{draw_vertical_bars, GraphRenderer};
use crate::GraphConfig;
use orderlens_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Vertical bars of orders per payment type, most used first
#[derive(Debug, Clone, Default)]
pub struct PaymentTypesGraph {
    counts: Vec<PaymentTypeCount>,
}

impl PaymentTypesGraph {
    pub fn new(counts: Vec<PaymentTypeCount>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[PaymentTypeCount] {
        &self.counts
    }

    /// "credit_card" reads as "credit card" on the axis
    fn display_name(payment_type: &str) -> String {
        payment_type.replace('_', " ")
    }
}

impl GraphRenderer for PaymentTypesGraph {
    fn name(&self) -> &'static str {
        "payment_types"
    }

    fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let labels: Vec<String> = self
            .counts
            .iter()
            .map(|entry| Self::display_name(&entry.payment_type))
            .collect();
        let values: Vec<f64> = self.counts.iter().map(|entry| entry.count as f64).collect();

        draw_vertical_bars(root, config, &labels, &values, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::payment_type_counts;
    use orderlens_common::test_utils::scenario_records;

    #[test]
    fn test_display_name() {
        assert_eq!(PaymentTypesGraph::display_name("credit_card"), "credit card");
        assert_eq!(PaymentTypesGraph::display_name("boleto"), "boleto");
    }

    #[test]
    fn test_render_svg() {
        let graph = PaymentTypesGraph::new(payment_type_counts(&scenario_records()));
        assert_eq!(graph.counts()[0].payment_type, "credit_card");

        let config = GraphConfig::titled("Distribution of Payment Types")
            .with_axes("Payment Type", "Number of Orders");
        let svg = graph.render_svg(&config).unwrap();

        assert!(svg.contains("Distribution of Payment Types"));
        assert!(svg.contains("credit card"));
        assert!(svg.contains("boleto"));
    }

    #[test]
    fn test_empty_counts() {
        let graph = PaymentTypesGraph::default();
        let config = GraphConfig::default();

        let svg = graph.render_svg(&config).unwrap();
        assert!(svg.contains(&config.no_data_label));
    }
}
