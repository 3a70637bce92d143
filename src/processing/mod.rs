//! The waterfall pipeline.
//!
//! The processing layer turns one host update into chart-ready bars in three synchronous steps:
//!
//! - [`RoleColumns`]: role-tagged column lookup over a [`crate::dataview::CategoricalView`]
//! - [`transform()`]: grouping by category with running totals, subtotals, Start and Total
//! - [`map_to_bars()`]: one stacked single-category bar per point
//!
//! Nothing is cached between calls; every update recomputes from scratch.
//!
//! ## Example: columns → points → bars
//!
//! ```rust
//! use waterfall_visual::processing::{map_to_bars, transform};
//! use waterfall_visual::settings::ColorSettings;
//! use waterfall_visual::types::Value;
//!
//! let categories = vec![
//!     Value::Utf8("A".to_string()),
//!     Value::Utf8("A".to_string()),
//!     Value::Utf8("B".to_string()),
//! ];
//! let breakdowns = vec![
//!     Value::Utf8("x".to_string()),
//!     Value::Utf8("y".to_string()),
//!     Value::Null,
//! ];
//! let values = vec![Value::Int64(10), Value::Int64(-3), Value::Int64(5)];
//!
//! let points = transform(&categories, Some(&breakdowns), &values, 0.0, true);
//! let labels: Vec<&str> = points.iter().map(|p| p.display_label.as_str()).collect();
//! assert_eq!(labels, ["Start", "A - x", "A - y", "A Subtotal", "B", "Total"]);
//!
//! let bars = map_to_bars(&points, &ColorSettings::default());
//! // The decrease hangs from the previous total (10) down to the new one (7).
//! assert_eq!((bars[2].base, bars[2].height), (7.0, 3.0));
//! assert_eq!(bars[2].text, "-3.0");
//! ```

pub mod bars;
pub mod roles;
pub mod waterfall;

pub use bars::{map_to_bars, BarSpec, HoverText, TextPosition, SUBTOTAL_OPACITY};
pub use roles::RoleColumns;
pub use waterfall::{transform, transform_columns, PointKind, WaterfallDataPoint};
