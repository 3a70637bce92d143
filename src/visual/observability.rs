use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::{error, info, warn};

use crate::processing::{PointKind, WaterfallDataPoint};
use crate::render::RenderError;

use super::Placeholder;

/// Context about one update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateContext {
    /// 1-based sequence number of the update on this visual.
    pub update: u64,
}

/// Shape of a drawn waterfall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSummary {
    /// Source rows that became regular bars.
    pub rows: usize,
    /// Distinct categories among those rows.
    pub categories: usize,
    /// Categories closed by a subtotal bar.
    pub subtotals: usize,
    /// Value of the Start bar.
    pub start: f64,
    /// Running total after the last row.
    pub closing: f64,
    /// Whether a Total bar was drawn.
    pub has_total: bool,
    /// Bars handed to the renderer.
    pub bars: usize,
}

impl ChartSummary {
    /// Summarize transformer output.
    pub fn from_points(points: &[WaterfallDataPoint]) -> Self {
        let mut categories = HashSet::new();
        let mut summary = Self {
            rows: 0,
            categories: 0,
            subtotals: 0,
            start: 0.0,
            closing: 0.0,
            has_total: false,
            bars: points.len(),
        };
        for p in points {
            match p.kind {
                PointKind::Start => summary.start = p.value,
                PointKind::Regular => {
                    summary.rows += 1;
                    categories.insert(p.category.as_str());
                }
                PointKind::Subtotal => summary.subtotals += 1,
                PointKind::Total => summary.has_total = true,
            }
            summary.closing = p.cumulative_value;
        }
        summary.categories = categories.len();
        summary
    }
}

/// Observer interface for update outcomes.
///
/// Every method defaults to a no-op. Exactly one method is called per update.
pub trait VisualObserver: Send + Sync {
    /// The chart was drawn.
    fn on_rendered(&self, _ctx: &UpdateContext, _summary: &ChartSummary) {}

    /// A placeholder message is shown instead of a chart.
    fn on_placeholder(&self, _ctx: &UpdateContext, _placeholder: Placeholder) {}

    /// The renderer failed. The error placeholder is shown, without an
    /// [`Self::on_placeholder`] call.
    fn on_render_error(&self, _ctx: &UpdateContext, _error: &RenderError) {}
}

/// Forwards every callback to each inner observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn VisualObserver>>,
}

impl CompositeObserver {
    /// Fan out to `observers`.
    pub fn new(observers: Vec<Arc<dyn VisualObserver>>) -> Self {
        Self { observers }
    }

    /// Add another observer at the end.
    pub fn with(mut self, observer: Arc<dyn VisualObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    fn each(&self, f: impl Fn(&dyn VisualObserver)) {
        self.observers.iter().for_each(|o| f(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.observers.len())
    }
}

impl VisualObserver for CompositeObserver {
    fn on_rendered(&self, ctx: &UpdateContext, summary: &ChartSummary) {
        self.each(|o| o.on_rendered(ctx, summary));
    }

    fn on_placeholder(&self, ctx: &UpdateContext, placeholder: Placeholder) {
        self.each(|o| o.on_placeholder(ctx, placeholder));
    }

    fn on_render_error(&self, ctx: &UpdateContext, error: &RenderError) {
        self.each(|o| o.on_render_error(ctx, error));
    }
}

/// Forwards update outcomes to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl VisualObserver for LogObserver {
    fn on_rendered(&self, ctx: &UpdateContext, s: &ChartSummary) {
        info!(
            "[waterfall] update={} rows={} categories={} subtotals={} start={} closing={} total={}",
            ctx.update, s.rows, s.categories, s.subtotals, s.start, s.closing, s.has_total
        );
    }

    fn on_placeholder(&self, ctx: &UpdateContext, placeholder: Placeholder) {
        warn!("[waterfall] update={} placeholder: {}", ctx.update, placeholder);
    }

    fn on_render_error(&self, ctx: &UpdateContext, err: &RenderError) {
        error!("[waterfall] update={} render failed: {}", ctx.update, err);
    }
}

/// What one update ended in.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOutcome {
    /// Chart drawn.
    Chart(ChartSummary),
    /// Placeholder shown.
    Placeholder(Placeholder),
    /// Renderer failed.
    Failed(RenderError),
}

/// One entry of an [`OutcomeHistory`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecord {
    /// Update sequence number.
    pub update: u64,
    /// How the update ended.
    pub outcome: RecordedOutcome,
}

/// Keeps the most recent update outcomes in memory, oldest first.
///
/// Lets a host show why the visual is blank (or what it last drew) without scraping logs.
#[derive(Debug)]
pub struct OutcomeHistory {
    capacity: usize,
    records: Mutex<VecDeque<UpdateRecord>>,
}

impl OutcomeHistory {
    /// Keep at most `capacity` records (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Snapshot of the retained records.
    pub fn records(&self) -> Vec<UpdateRecord> {
        self.lock().iter().cloned().collect()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<UpdateRecord> {
        self.lock().back().cloned()
    }

    fn push(&self, ctx: &UpdateContext, outcome: RecordedOutcome) {
        let mut records = self.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(UpdateRecord {
            update: ctx.update,
            outcome,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<UpdateRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VisualObserver for OutcomeHistory {
    fn on_rendered(&self, ctx: &UpdateContext, summary: &ChartSummary) {
        self.push(ctx, RecordedOutcome::Chart(*summary));
    }

    fn on_placeholder(&self, ctx: &UpdateContext, placeholder: Placeholder) {
        self.push(ctx, RecordedOutcome::Placeholder(placeholder));
    }

    fn on_render_error(&self, ctx: &UpdateContext, error: &RenderError) {
        self.push(ctx, RecordedOutcome::Failed(error.clone()));
    }
}
