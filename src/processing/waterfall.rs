//! Running-total transform from category/breakdown/value columns to waterfall data points.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::types::Value;

use super::roles::RoleColumns;

/// Rendering role of a [`WaterfallDataPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Synthetic first bar carrying the start value.
    Start,
    /// One source row.
    Regular,
    /// Sum of a category with several breakdown rows.
    Subtotal,
    /// Synthetic last bar carrying the final running total.
    Total,
}

/// One bar of the waterfall before it is mapped to chart primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallDataPoint {
    /// Category label, or `Start` / `Total` for synthetic points.
    pub category: String,
    /// Breakdown label; empty when unused.
    pub breakdown: String,
    /// Signed delta contributed by this point.
    pub value: f64,
    /// Running total including this point.
    pub cumulative_value: f64,
    /// How the point is drawn.
    pub kind: PointKind,
    /// X-axis label.
    pub display_label: String,
}

impl WaterfallDataPoint {
    /// Whether this is the synthetic Start point.
    pub fn is_start(&self) -> bool {
        self.kind == PointKind::Start
    }

    /// Whether this is the synthetic Total point.
    pub fn is_total(&self) -> bool {
        self.kind == PointKind::Total
    }

    /// Whether this point closes a multi-row category.
    pub fn is_subtotal(&self) -> bool {
        self.kind == PointKind::Subtotal
    }

    fn synthetic(label: &str, kind: PointKind, value: f64, cumulative_value: f64) -> Self {
        Self {
            category: label.to_string(),
            breakdown: String::new(),
            value,
            cumulative_value,
            kind,
            display_label: label.to_string(),
        }
    }
}

#[derive(Debug)]
struct GroupedRow {
    breakdown: String,
    value: f64,
}

/// Build the waterfall from the role columns of one update.
///
/// Returns an empty sequence when the category or value column is missing, or when the value
/// column has no rows. A missing start-value column counts as a start value of `0`.
pub fn transform_columns(columns: &RoleColumns<'_>, show_total: bool) -> Vec<WaterfallDataPoint> {
    let Some(values) = columns.values() else {
        warn!("no column tagged 'value'; nothing to chart");
        return Vec::new();
    };
    let Some(categories) = columns.categories() else {
        warn!("no column tagged 'category'; nothing to chart");
        return Vec::new();
    };
    if values.is_empty() {
        debug!("value column has no rows");
        return Vec::new();
    }

    let start_value = match columns.start_value() {
        Some(v) => {
            debug!("start value from data: {v}");
            v
        }
        None => 0.0,
    };

    transform(categories, columns.breakdowns(), values, start_value, show_total)
}

/// Turn aligned category/breakdown/value cells into an ordered sequence of waterfall points.
///
/// The sequence is: `Start`, then for each category in first-seen order its rows in source
/// order followed by a `"{category} Subtotal"` when the category has more than one row and a
/// breakdown column is present, then `Total` when `show_total` is set.
///
/// Rows are driven by the category column. Empty, null or non-numeric value cells count as `0`;
/// a blank category at row `i` is labelled `"Category {i + 1}"`.
///
/// ```rust
/// use waterfall_visual::processing::transform;
/// use waterfall_visual::types::Value;
///
/// let categories = [Value::Utf8("A".into()), Value::Utf8("B".into())];
/// let values = [Value::Int64(10), Value::Int64(-4)];
/// let points = transform(&categories, None, &values, 0.0, true);
///
/// let labels: Vec<&str> = points.iter().map(|p| p.display_label.as_str()).collect();
/// assert_eq!(labels, ["Start", "A", "B", "Total"]);
/// assert_eq!(points.last().unwrap().cumulative_value, 6.0);
/// ```
pub fn transform(
    categories: &[Value],
    breakdowns: Option<&[Value]>,
    values: &[Value],
    start_value: f64,
    show_total: bool,
) -> Vec<WaterfallDataPoint> {
    if values.is_empty() {
        return Vec::new();
    }

    let groups = group_by_category(categories, breakdowns, values);
    debug!("grouped {} rows into {} categories", categories.len(), groups.len());

    let mut points = Vec::with_capacity(categories.len() + groups.len() + 2);
    let mut running_total = start_value;
    points.push(WaterfallDataPoint::synthetic(
        "Start",
        PointKind::Start,
        start_value,
        start_value,
    ));

    for (category, rows) in &groups {
        let mut category_total = 0.0;

        for row in rows {
            running_total += row.value;
            category_total += row.value;

            let display_label = if breakdowns.is_some() && !row.breakdown.is_empty() {
                format!("{category} - {}", row.breakdown)
            } else {
                category.clone()
            };

            points.push(WaterfallDataPoint {
                category: category.clone(),
                breakdown: row.breakdown.clone(),
                value: row.value,
                cumulative_value: running_total,
                kind: PointKind::Regular,
                display_label,
            });
        }

        if rows.len() > 1 && breakdowns.is_some() {
            points.push(WaterfallDataPoint {
                category: category.clone(),
                breakdown: String::new(),
                value: category_total,
                cumulative_value: running_total,
                kind: PointKind::Subtotal,
                display_label: format!("{category} Subtotal"),
            });
        }
    }

    if show_total {
        points.push(WaterfallDataPoint::synthetic(
            "Total",
            PointKind::Total,
            running_total,
            running_total,
        ));
    }

    debug!("built {} waterfall points, final total {running_total}", points.len());
    points
}

fn group_by_category(
    categories: &[Value],
    breakdowns: Option<&[Value]>,
    values: &[Value],
) -> IndexMap<String, Vec<GroupedRow>> {
    let mut groups: IndexMap<String, Vec<GroupedRow>> = IndexMap::new();

    for (i, cell) in categories.iter().enumerate() {
        let category = cell.as_label().unwrap_or_else(|| format!("Category {}", i + 1));
        let breakdown = breakdowns
            .and_then(|b| b.get(i))
            .and_then(Value::as_label)
            .unwrap_or_default();
        let value = values.get(i).and_then(Value::as_number).unwrap_or(0.0);

        groups
            .entry(category)
            .or_default()
            .push(GroupedRow { breakdown, value });
    }

    groups
}
