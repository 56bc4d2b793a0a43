//! Chart configuration types

use serde::{Deserialize, Serialize};

/// Settings for one rendered chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Text shown instead of the plot when there is nothing to draw
    pub no_data_label: String,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            width: 1000,
            height: 500,
            x_label: None,
            y_label: None,
            no_data_label: "No data for the selected range".to_string(),
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Default-styled config with a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set both axis descriptions
    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
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
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 30,
            bottom: 60,
            left: 80,
        }
    }
}

/// Colors, fonts and margins shared by every chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub background_color: String,
    /// Color of the highlighted first bar and of the monthly line
    pub primary_color: String,
    /// Color of every other bar
    pub muted_color: String,
    pub title_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#F9F9F9".to_string(),
            primary_color: "#90CAF9".to_string(),
            muted_color: "#D3D3D3".to_string(),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 24,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

impl StyleConfig {
    /// Style with the given palette and base font; titles scale with the font
    pub fn with_palette(
        background_color: &str,
        primary_color: &str,
        muted_color: &str,
        font_family: &str,
        font_size: u32,
    ) -> Self {
        Self {
            background_color: background_color.to_string(),
            primary_color: primary_color.to_string(),
            muted_color: muted_color.to_string(),
            title_font: FontConfig {
                family: font_family.to_string(),
                size: font_size + font_size / 2 + 3,
            },
            label_font: FontConfig {
                family: font_family.to_string(),
                size: font_size,
            },
            margins: MarginConfig::default(),
        }
    }
}
