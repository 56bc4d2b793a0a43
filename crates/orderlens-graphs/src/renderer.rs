//! Chart rendering abstractions

use crate::GraphConfig;
use orderlens_common::{OrderLensError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::{debug, info};

/// Output format of a rendered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// Format implied by a file extension, case-insensitive
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = OrderLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(OrderLensError::validation_field(
                format!("unsupported image format '{other}', expected svg or png"),
                "format",
            )),
        }
    }
}

/// A chart that can draw itself onto any plotters backend
pub trait GraphRenderer {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// True when there is nothing to plot
    fn is_empty(&self) -> bool;

    /// Draw the chart body. The area is already filled with the background.
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static;

    /// Fill the background, then draw the chart or the no-data panel
    fn render_on<DB>(&self, root: &DrawingArea<DB, Shift>, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        root.fill(&get_background_color(config))?;
        if self.is_empty() {
            debug!(chart = self.name(), "Rendering no-data panel");
            draw_no_data(root, config)?;
        } else {
            self.draw(root, config)?;
        }
        root.present()?;
        Ok(())
    }

    /// Render the chart as an SVG document
    fn render_svg(&self, config: &GraphConfig) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (config.width, config.height))
                .into_drawing_area();
            self.render_on(&root, config)?;
        }
        Ok(buffer)
    }

    /// Render the chart to `path`, choosing SVG or PNG by extension
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path).ok_or_else(|| {
            OrderLensError::graph(format!(
                "cannot infer image format from '{}', expected .svg or .png",
                path.display()
            ))
        })?;

        match format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
                self.render_on(&root, config)?;
            }
            ImageFormat::Png => {
                let root =
                    BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
                self.render_on(&root, config)?;
            }
        }

        info!(chart = self.name(), path = %path.display(), "Rendered chart");
        Ok(())
    }
}

/// Parse a `#RRGGBB` color, falling back to black
pub fn parse_color(hex: &str) -> RGBColor {
    let digits = hex.trim_start_matches('#');
    if digits.len() == 6 && digits.is_ascii() {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&digits[0..2], 16),
            u8::from_str_radix(&digits[2..4], 16),
            u8::from_str_radix(&digits[4..6], 16),
        ) {
            return RGBColor(r, g, b);
        }
    }
    BLACK
}

pub fn get_background_color(config: &GraphConfig) -> RGBColor {
    parse_color(&config.style.background_color)
}

/// Color for the bar at `index`: the first bar stands out
pub fn bar_color(config: &GraphConfig, index: usize) -> RGBColor {
    if index == 0 {
        parse_color(&config.style.primary_color)
    } else {
        parse_color(&config.style.muted_color)
    }
}

/// Shorten a label to `max_chars` characters, marking the cut with "..."
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let kept: String = label.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Upper bound of a value axis with headroom above the largest value
pub fn axis_max(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * 1.1
    } else {
        1.0
    }
}

/// Title and centered message for an empty chart
pub fn draw_no_data<DB>(root: &DrawingArea<DB, Shift>, config: &GraphConfig) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let title_font = &config.style.title_font;
    let label_font = &config.style.label_font;
    let (width, height) = root.dim_in_pixel();

    let title_style = TextStyle::from((title_font.family.as_str(), title_font.size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(
        config.title.clone(),
        ((width / 2) as i32, config.style.margins.top as i32),
        title_style,
    ))?;

    let message_style = TextStyle::from((label_font.family.as_str(), label_font.size).into_font())
        .color(&RGBColor(0x75, 0x75, 0x75))
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        config.no_data_label.clone(),
        ((width / 2) as i32, (height / 2) as i32),
        message_style,
    ))?;

    Ok(())
}

/// Vertical bars, one per label, the first highlighted
pub(crate) fn draw_vertical_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    config: &GraphConfig,
    labels: &[String],
    values: &[f64],
    max_label_chars: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let style = &config.style;
    let count = labels.len().min(values.len());
    let y_max = axis_max(values.iter().copied().fold(0.0, f64::max));

    let title_font = (style.title_font.family.as_str(), style.title_font.size);
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, title_font)
        .margin_top(style.margins.top)
        .margin_right(style.margins.right)
        .margin_left(10)
        .margin_bottom(10)
        .x_label_area_size(style.margins.bottom)
        .y_label_area_size(style.margins.left)
        .build_cartesian_2d((0..count).into_segmented(), 0.0..y_max)?;

    let label_font = (style.label_font.family.as_str(), style.label_font.size);
    let x_formatter = |segment: &SegmentValue<usize>| match segment {
        SegmentValue::CenterOf(index) => labels
            .get(*index)
            .map(|label| truncate_label(label, max_label_chars))
            .unwrap_or_default(),
        _ => String::new(),
    };
    let y_formatter = |y: &f64| {
        if y.fract() == 0.0 {
            format!("{y:.0}")
        } else {
            format!("{y:.1}")
        }
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(count + 1)
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

    chart.draw_series(values.iter().take(count).enumerate().map(|(index, value)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(index), 0.0),
                (SegmentValue::Exact(index + 1), *value),
            ],
            bar_color(config, index).filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;

    Ok(())
}
