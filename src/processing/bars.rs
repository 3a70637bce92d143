//! Mapping from waterfall points to stacked single-category bars.
//!
//! Each point becomes its own bar with one x-category, so a stacked-bar renderer can place and
//! color every bar independently: the invisible `base` lifts the visible `height` segment.

use std::fmt;

use crate::settings::ColorSettings;

use super::waterfall::{PointKind, WaterfallDataPoint};

/// Opacity of Subtotal bars; every other bar is fully opaque.
pub const SUBTOTAL_OPACITY: f64 = 0.7;

/// Where the bar's text annotation is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPosition {
    /// Above the bar end.
    Outside,
}

/// Renderable bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    /// X-axis category of this bar.
    pub label: String,
    /// Offset of the bar's bottom from zero.
    pub base: f64,
    /// Visible bar length, stacked on `base`.
    pub height: f64,
    /// Fill color from [`ColorSettings`].
    pub color: String,
    /// `1.0`, or [`SUBTOTAL_OPACITY`] for Subtotal bars.
    pub opacity: f64,
    /// Annotation drawn next to the bar.
    pub text: String,
    /// Placement of `text`.
    pub text_position: TextPosition,
    /// Tooltip shown on hover.
    pub hover: HoverText,
}

/// Tooltip content of a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverText {
    /// Same as the bar label.
    pub label: String,
    /// The point's own value.
    pub value: f64,
    /// Running total after the point.
    pub cumulative_value: f64,
    /// Omitted from the tooltip when `None`.
    pub breakdown: Option<String>,
}

impl HoverText {
    /// Tooltip lines: label, value and cumulative (2 decimals), then breakdown if any.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.label.clone(),
            format!("Value: {}", fixed(self.value, 2)),
            format!("Cumulative: {}", fixed(self.cumulative_value, 2)),
        ];
        if let Some(breakdown) = &self.breakdown {
            lines.push(format!("Breakdown: {breakdown}"));
        }
        lines
    }
}

impl fmt::Display for HoverText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Map every point to a bar, keeping order.
///
/// - Start/Total: from zero to `value`, total color.
/// - Subtotal: from zero to `cumulative_value`, total color at [`SUBTOTAL_OPACITY`].
/// - Regular, `value >= 0`: from the previous running total up by `value`, positive color.
/// - Regular, `value < 0`: from the new running total up by `-value`, negative color.
pub fn map_to_bars(points: &[WaterfallDataPoint], colors: &ColorSettings) -> Vec<BarSpec> {
    points.iter().map(|p| bar_for_point(p, colors)).collect()
}

fn bar_for_point(point: &WaterfallDataPoint, colors: &ColorSettings) -> BarSpec {
    let (base, height, color, opacity) = match point.kind {
        PointKind::Start | PointKind::Total => (0.0, point.value, &colors.total_color, 1.0),
        PointKind::Subtotal => (
            0.0,
            point.cumulative_value,
            &colors.total_color,
            SUBTOTAL_OPACITY,
        ),
        PointKind::Regular if point.value >= 0.0 => (
            point.cumulative_value - point.value,
            point.value,
            &colors.positive_color,
            1.0,
        ),
        PointKind::Regular => (
            point.cumulative_value,
            -point.value,
            &colors.negative_color,
            1.0,
        ),
    };

    let text = match point.kind {
        PointKind::Regular if point.value >= 0.0 => format!("+{}", fixed(point.value, 1)),
        PointKind::Regular => format!("-{}", fixed(-point.value, 1)),
        _ => fixed(point.cumulative_value, 1),
    };

    BarSpec {
        label: point.display_label.clone(),
        base,
        height,
        color: color.clone(),
        opacity,
        text,
        text_position: TextPosition::Outside,
        hover: HoverText {
            label: point.display_label.clone(),
            value: point.value,
            cumulative_value: point.cumulative_value,
            breakdown: (!point.breakdown.is_empty()).then(|| point.breakdown.clone()),
        },
    }
}

/// Fixed-point formatting. A true `-0.0` prints as `0.0`; small negatives keep their sign.
pub(crate) fn fixed(v: f64, decimals: usize) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.decimals$}")
}
