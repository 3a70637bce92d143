//! `waterfall-visual` renders a waterfall chart with optional category subtotals from a
//! role-tagged table handed over by a host analytics application.
//!
//! The pipeline is synchronous and recomputed from scratch on every host update:
//!
//! 1. [`processing::RoleColumns`] locates the `category`, `breakdown`, `value` and `startValue`
//!    columns of a [`dataview::CategoricalView`].
//! 2. [`processing::transform()`] groups rows by category (first-seen order) and computes running
//!    totals, per-category subtotals, a Start point and an optional Total point.
//! 3. [`processing::map_to_bars()`] turns each point into a stacked single-category bar (base,
//!    height, color, opacity, text label, hover text).
//! 4. A [`render::ChartRenderer`] draws the bars; [`render::PlotlyRenderer`] produces a Plotly
//!    figure.
//!
//! [`visual::WaterfallVisual`] wires the steps to the host lifecycle: it re-populates
//! [`settings::FormattingSettings`] on each update, shows a [`visual::Placeholder`] when there is
//! nothing to chart, and contains renderer failures.
//!
//! ## Quick example
//!
//! ```rust
//! use waterfall_visual::dataview::{DataView, UpdateOptions};
//! use waterfall_visual::render::PlotlyRenderer;
//! use waterfall_visual::types::{DataRole, DataSet, DataType, Field, Schema, Value};
//! use waterfall_visual::visual::{UpdateOutcome, WaterfallVisual};
//!
//! let schema = Schema::new(vec![
//!     Field::new("region", DataType::Utf8).with_role(DataRole::Category),
//!     Field::new("product", DataType::Utf8).with_role(DataRole::Breakdown),
//!     Field::new("delta", DataType::Float64).with_role(DataRole::Value),
//! ]);
//! let table = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("A".into()), Value::Utf8("x".into()), Value::Float64(10.0)],
//!         vec![Value::Utf8("A".into()), Value::Utf8("y".into()), Value::Float64(-3.0)],
//!         vec![Value::Utf8("B".into()), Value::Null, Value::Float64(5.0)],
//!     ],
//! );
//!
//! let mut visual = WaterfallVisual::new(PlotlyRenderer::new());
//! let outcome = visual.update(&UpdateOptions::new(DataView::from_dataset(&table)));
//!
//! let UpdateOutcome::Rendered { bars } = outcome else {
//!     panic!("expected a chart");
//! };
//! let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
//! assert_eq!(labels, ["Start", "A - x", "A - y", "A Subtotal", "B", "Total"]);
//! assert_eq!(bars.last().unwrap().text, "12.0");
//! assert!(visual.renderer().figure().is_some());
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema, role tags and in-memory table types
//! - [`table`]: loading role-tagged CSV table exports
//! - [`dataview`]: host payload (categorical data view, update options)
//! - [`settings`]: formatting settings and the settings-pane descriptor
//! - [`processing`]: role lookup, waterfall transform, bar mapping
//! - [`render`]: renderer seam and the Plotly renderer
//! - [`visual`]: lifecycle, placeholders and observers
//! - [`error`]: error types

pub mod dataview;
pub mod error;
pub mod processing;
pub mod render;
pub mod settings;
pub mod table;
pub mod types;
pub mod visual;

pub use error::{VisualError, VisualResult};
