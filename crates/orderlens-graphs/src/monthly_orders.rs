//! Monthly orders line chart

use crate::aggregator::MonthlyOrders;
use crate::renderer::{axis_max, parse_color, GraphRenderer};
use crate::GraphConfig;
use orderlens_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// One plotted month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthPoint {
    pub label: String,
    pub order_count: usize,
}

/// Line chart of distinct orders per month, with a marker on every month
#[derive(Debug, Clone, Default)]
pub struct MonthlyOrdersGraph {
    points: Vec<MonthPoint>,
}

impl MonthlyOrdersGraph {
    /// Chart with English month labels such as "Jan 2023"
    pub fn new(months: &[MonthlyOrders]) -> Self {
        Self::with_labels(months, |entry| {
            entry
                .first_day()
                .map(|day| day.format("%b %Y").to_string())
                .unwrap_or_default()
        })
    }

    /// Chart with caller-provided tick labels, e.g. localized month names
    pub fn with_labels<F>(months: &[MonthlyOrders], label: F) -> Self
    where
        F: Fn(&MonthlyOrders) -> String,
    {
        let points = months
            .iter()
            .map(|entry| MonthPoint {
                label: label(entry),
                order_count: entry.order_count,
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[MonthPoint] {
        &self.points
    }

    fn tick_label(&self, x: f64) -> String {
        let nearest = x.round();
        if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        self.points
            .get(nearest as usize)
            .map(|point| point.label.clone())
            .unwrap_or_default()
    }
}

impl GraphRenderer for MonthlyOrdersGraph {
    fn name(&self) -> &'static str {
        "monthly_orders"
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let style = &config.style;
        let count = self.points.len();
        let y_max = axis_max(
            self.points
                .iter()
                .map(|point| point.order_count as f64)
                .fold(0.0, f64::max),
        );

        let title_font = (style.title_font.family.as_str(), style.title_font.size);
        let mut chart = ChartBuilder::on(root)
            .caption(&config.title, title_font)
            .margin_top(style.margins.top)
            .margin_right(style.margins.right)
            .margin_left(10)
            .margin_bottom(10)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(-0.5..(count as f64 - 0.5), 0.0..y_max)?;

        let label_font = (style.label_font.family.as_str(), style.label_font.size);
        let x_formatter = |x: &f64| self.tick_label(*x);
        let y_formatter = |y: &f64| format!("{y:.0}");

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(count.min(24))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(label_font)
            .axis_desc_style(label_font);
        if let Some(x_label) = &config.x_label {
            mesh.x_desc(x_label.as_str());
        }
        if let Some(y_label) = &config.y_label {
            mesh.y_desc(y_label.as_str());
        }
        mesh.draw()?;

        let color = parse_color(&style.primary_color);
        let series: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| (index as f64, point.order_count as f64))
            .collect();

        chart.draw_series(LineSeries::new(series.clone(), color.stroke_width(2)))?;
        chart.draw_series(
            series
                .iter()
                .map(|&point| Circle::new(point, 5, color.filled())),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> Vec<MonthlyOrders> {
        vec![
            MonthlyOrders {
                year: 2023,
                month: 1,
                order_count: 4,
                revenue: 100.0,
            },
            MonthlyOrders {
                year: 2023,
                month: 2,
                order_count: 7,
                revenue: 180.0,
            },
        ]
    }

    #[test]
    fn test_default_labels() {
        let graph = MonthlyOrdersGraph::new(&months());
        let labels: Vec<&str> = graph.points().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Jan 2023", "Feb 2023"]);
        assert_eq!(graph.points()[1].order_count, 7);
    }

    #[test]
    fn test_custom_labels() {
        let graph = MonthlyOrdersGraph::with_labels(&months(), |m| format!("M{}", m.month));
        assert_eq!(graph.tick_label(0.0), "M1");
        assert_eq!(graph.tick_label(1.0), "M2");
        assert_eq!(graph.tick_label(0.5), "");
        assert_eq!(graph.tick_label(-0.4), "");
        assert_eq!(graph.tick_label(5.0), "");
    }

    #[test]
    fn test_render_svg_contains_labels() {
        let graph = MonthlyOrdersGraph::new(&months());
        let config = GraphConfig::titled("Number of Orders per Month").with_axes("Time", "Orders");

        let svg = graph.render_svg(&config).unwrap();
        assert!(svg.contains("Number of Orders per Month"));
        assert!(svg.contains("Jan 2023"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_single_month() {
        let graph = MonthlyOrdersGraph::new(&months()[..1]);
        let svg = graph.render_svg(&GraphConfig::default()).unwrap();
        assert!(svg.contains("Jan 2023"));
    }

    #[test]
    fn test_empty_months_render_placeholder() {
        let graph = MonthlyOrdersGraph::new(&[]);
        assert!(graph.is_empty());

        let config = GraphConfig::default();
        let svg = graph.render_svg(&config).unwrap();
        assert!(svg.contains(&config.no_data_label));
    }
}
