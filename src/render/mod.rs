//! Render sink: the seam between the bar specs and an external chart library.
//!
//! A [`ChartRenderer`] receives the complete [`ChartSpec`] of one update. Renderers report
//! failures as [`RenderError`]; the visual turns those into an error placeholder instead of
//! propagating them to the host.
//!
//! [`plotly::PlotlyRenderer`] builds a Plotly stacked-bar figure.

pub mod plotly;

use thiserror::Error;

use crate::processing::BarSpec;

pub use plotly::{plotly_figure, PlotlyRenderer};

/// Error returned by a [`ChartRenderer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A bar coordinate is NaN or infinite and cannot be drawn.
    #[error("bar '{label}' has a non-finite {field}")]
    NonFinite { label: String, field: &'static str },

    /// The chart backend rejected the figure.
    #[error("chart backend error: {message}")]
    Backend { message: String },
}

/// Axis and margin layout shared by every waterfall chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Chart title.
    pub title: String,
    /// X-axis title.
    pub x_axis_title: String,
    /// X tick label rotation in degrees.
    pub x_tick_angle: i32,
    /// Y-axis title.
    pub y_axis_title: String,
    /// Whether the renderer draws a legend.
    pub show_legend: bool,
    /// Space around the plot area.
    pub margin: Margin,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            title: "Waterfall Chart with Category Subtotals".to_string(),
            x_axis_title: "Categories & Breakdowns".to_string(),
            x_tick_angle: -45,
            y_axis_title: "Values".to_string(),
            show_legend: false,
            margin: Margin {
                top: 50,
                left: 50,
                right: 50,
                bottom: 150,
            },
        }
    }
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    /// Top margin.
    pub top: u32,
    /// Left margin.
    pub left: u32,
    /// Right margin.
    pub right: u32,
    /// Bottom margin; leaves room for rotated x labels.
    pub bottom: u32,
}

/// Everything a renderer needs for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Bars in x-axis order; each is its own stacked single-category trace.
    pub bars: Vec<BarSpec>,
    /// Axes, title and margins.
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// Chart with the default waterfall layout.
    pub fn new(bars: Vec<BarSpec>) -> Self {
        Self {
            bars,
            layout: ChartLayout::default(),
        }
    }
}

/// External chart library seam.
pub trait ChartRenderer {
    /// Draw `chart`, replacing whatever was drawn before.
    fn render(&mut self, chart: &ChartSpec) -> Result<(), RenderError>;
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for Box<R> {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), RenderError> {
        (**self).render(chart)
    }
}
