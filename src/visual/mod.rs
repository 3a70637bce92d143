//! The visual: lifecycle glue between host updates, the processing pipeline and a renderer.
//!
//! A [`WaterfallVisual`] starts in [`LifecycleState::Created`]. Each call to
//! [`WaterfallVisual::update`] re-populates the formatting settings from the host objects,
//! recomputes the waterfall from scratch and either hands the bars to the renderer or shows a
//! [`Placeholder`]. Renderer failures never escape `update`; they become
//! [`Placeholder::RenderError`] and the next update can recover.
//!
//! ```rust
//! use waterfall_visual::dataview::{DataView, UpdateOptions};
//! use waterfall_visual::render::PlotlyRenderer;
//! use waterfall_visual::visual::{Placeholder, UpdateOutcome, WaterfallVisual};
//!
//! let mut visual = WaterfallVisual::new(PlotlyRenderer::new());
//!
//! // No fields bound yet.
//! let outcome = visual.update(&UpdateOptions::new(DataView::default()));
//! assert_eq!(outcome, UpdateOutcome::NoData(Placeholder::MissingFields));
//! assert_eq!(
//!     Placeholder::MissingFields.message(),
//!     "Please add Category and Value fields (Breakdown is optional)"
//! );
//! ```

mod observability;

use std::fmt;
use std::sync::Arc;

use log::{debug, error};

use crate::dataview::{DataView, UpdateOptions};
use crate::processing::{map_to_bars, transform_columns, BarSpec, RoleColumns};
use crate::render::{ChartRenderer, ChartSpec, RenderError};
use crate::settings::{FormattingModel, FormattingSettings};

pub use observability::{
    ChartSummary, CompositeObserver, LogObserver, OutcomeHistory, RecordedOutcome, UpdateContext,
    UpdateRecord, VisualObserver,
};

/// Text shown instead of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// No data view, no categorical payload, or no category/value columns bound.
    MissingFields,
    /// Fields are bound but the waterfall has no points.
    Empty,
    /// The renderer failed.
    RenderError,
}

impl Placeholder {
    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Placeholder::MissingFields => {
                "Please add Category and Value fields (Breakdown is optional)"
            }
            Placeholder::Empty => "No data to display",
            Placeholder::RenderError => "Error creating chart. Check console for details.",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Lifecycle state of a [`WaterfallVisual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, no update received yet.
    Created,
    /// At least one update has run.
    Updated,
}

/// What the visual currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Nothing drawn yet.
    Blank,
    /// A placeholder message.
    Placeholder(Placeholder),
    /// The renderer's chart.
    Chart,
}

/// Result of one [`WaterfallVisual::update`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// A placeholder is shown instead of a chart.
    NoData(Placeholder),
    /// The chart was drawn from these bars.
    Rendered { bars: Vec<BarSpec> },
    /// The renderer failed; [`Placeholder::RenderError`] is shown.
    Failed(RenderError),
}

/// Waterfall chart visual bound to a renderer.
pub struct WaterfallVisual<R> {
    renderer: R,
    settings: FormattingSettings,
    state: LifecycleState,
    surface: Surface,
    update_count: u64,
    observer: Option<Arc<dyn VisualObserver>>,
}

impl<R> fmt::Debug for WaterfallVisual<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaterfallVisual")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("surface", &self.surface)
            .field("update_count", &self.update_count)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl<R: ChartRenderer> WaterfallVisual<R> {
    /// Create a visual drawing into `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            settings: FormattingSettings::default(),
            state: LifecycleState::Created,
            surface: Surface::Blank,
            update_count: 0,
            observer: None,
        }
    }

    /// Attach an observer for update outcomes.
    pub fn with_observer(mut self, observer: Arc<dyn VisualObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run one update cycle.
    ///
    /// Only the first data view is read. Settings are replaced (never merged) with the ones
    /// populated from that view's objects before anything else happens.
    pub fn update(&mut self, options: &UpdateOptions) -> UpdateOutcome {
        let view = options.data_views.first();
        self.settings = FormattingSettings::populate(view.and_then(DataView::objects));
        self.update_count += 1;
        self.state = LifecycleState::Updated;

        let ctx = UpdateContext {
            update: self.update_count,
        };
        debug!("update {} with {} data view(s)", ctx.update, options.data_views.len());

        let Some(categorical) = view.and_then(|v| v.categorical.as_ref()) else {
            return self.show_placeholder(&ctx, Placeholder::MissingFields);
        };
        if !categorical.has_required_collections() {
            return self.show_placeholder(&ctx, Placeholder::MissingFields);
        }

        let columns = RoleColumns::from_view(categorical);
        let points = transform_columns(&columns, self.settings.display_settings.show_total);
        if points.is_empty() {
            return self.show_placeholder(&ctx, Placeholder::Empty);
        }

        let summary = ChartSummary::from_points(&points);
        let chart = ChartSpec::new(map_to_bars(&points, &self.settings.color_settings));

        match self.renderer.render(&chart) {
            Ok(()) => {
                self.surface = Surface::Chart;
                if let Some(obs) = self.observer.as_ref() {
                    obs.on_rendered(&ctx, &summary);
                }
                UpdateOutcome::Rendered { bars: chart.bars }
            }
            Err(err) => {
                error!("error creating chart: {err}");
                self.surface = Surface::Placeholder(Placeholder::RenderError);
                if let Some(obs) = self.observer.as_ref() {
                    obs.on_render_error(&ctx, &err);
                }
                UpdateOutcome::Failed(err)
            }
        }
    }

    fn show_placeholder(&mut self, ctx: &UpdateContext, placeholder: Placeholder) -> UpdateOutcome {
        self.surface = Surface::Placeholder(placeholder);
        if let Some(obs) = self.observer.as_ref() {
            obs.on_placeholder(ctx, placeholder);
        }
        UpdateOutcome::NoData(placeholder)
    }

    /// Settings pane descriptor built from the last populated settings.
    pub fn formatting_model(&self) -> FormattingModel {
        self.settings.formatting_model()
    }

    /// Settings populated by the last update (defaults before the first one).
    pub fn settings(&self) -> &FormattingSettings {
        &self.settings
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Number of updates run so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
