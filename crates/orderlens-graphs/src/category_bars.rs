//! Horizontal bar chart of the best and worst selling categories

use crate::aggregator::{CategoryCount, CategoryCounts};
use crate::renderer::{axis_max, bar_color, truncate_label, GraphRenderer};
use crate::GraphConfig;
use orderlens_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

const MAX_LABEL_CHARS: usize = 24;

/// Which end of the category ranking a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Most frequent first
    Top,
    /// Least frequent first
    Bottom,
}

/// Horizontal bars, one per category, the first entry drawn on top
#[derive(Debug, Clone)]
pub struct CategoryBarsGraph {
    ranking: Ranking,
    entries: Vec<CategoryCount>,
}

impl CategoryBarsGraph {
    /// The `n` most frequent categories
    pub fn top(counts: &CategoryCounts, n: usize) -> Self {
        Self::from_entries(Ranking::Top, counts.top(n))
    }

    /// The `n` least frequent categories
    pub fn bottom(counts: &CategoryCounts, n: usize) -> Self {
        Self::from_entries(Ranking::Bottom, counts.bottom(n))
    }

    /// Entries already in display order
    pub fn from_entries(ranking: Ranking, entries: Vec<CategoryCount>) -> Self {
        Self { ranking, entries }
    }

    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    /// Bars are stacked bottom-up, so entry `i` sits on segment `n - 1 - i`
    fn entry_at_segment(&self, segment: usize) -> Option<&CategoryCount> {
        let count = self.entries.len();
        segment
            .checked_add(1)
            .and_then(|position| count.checked_sub(position))
            .and_then(|index| self.entries.get(index))
    }
}

impl GraphRenderer for CategoryBarsGraph {
    fn name(&self) -> &'static str {
        match self.ranking {
            Ranking::Top => "top_categories",
            Ranking::Bottom => "bottom_categories",
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
        let style = &config.style;
        let count = self.entries.len();
        let x_max = axis_max(
            self.entries
                .iter()
                .map(|entry| entry.count as f64)
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
            .y_label_area_size(style.margins.left.max(160))
            .build_cartesian_2d(0.0..x_max, (0..count).into_segmented())?;

        let label_font = (style.label_font.family.as_str(), style.label_font.size);
        let x_formatter = |x: &f64| format!("{x:.0}");
        let y_formatter = |segment: &SegmentValue<usize>| match segment {
            SegmentValue::CenterOf(index) => self
                .entry_at_segment(*index)
                .map(|entry| truncate_label(&entry.category, MAX_LABEL_CHARS))
                .unwrap_or_default(),
            _ => String::new(),
        };

        let mut mesh = chart.configure_mesh();
        mesh.disable_y_mesh()
            .y_labels(count + 1)
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

        chart.draw_series(self.entries.iter().enumerate().map(|(index, entry)| {
            let segment = count - 1 - index;
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(segment)),
                    (entry.count as f64, SegmentValue::Exact(segment + 1)),
                ],
                bar_color(config, index).filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))?;

        Ok(())
    }
}
