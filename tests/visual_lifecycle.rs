use std::sync::{Arc, Mutex};

use waterfall_visual::dataview::{DataView, UpdateOptions};
use waterfall_visual::render::{ChartRenderer, ChartSpec, PlotlyRenderer, RenderError};
use waterfall_visual::settings::SliceControl;
use waterfall_visual::visual::{
    ChartSummary, CompositeObserver, LifecycleState, LogObserver, OutcomeHistory, Placeholder,
    RecordedOutcome, Surface, UpdateContext, UpdateOutcome, VisualObserver, WaterfallVisual,
};

#[derive(Default)]
struct RecordingObserver {
    rendered: Mutex<Vec<(u64, ChartSummary)>>,
    placeholders: Mutex<Vec<(u64, Placeholder)>>,
    errors: Mutex<Vec<u64>>,
}

impl VisualObserver for RecordingObserver {
    fn on_rendered(&self, ctx: &UpdateContext, summary: &ChartSummary) {
        self.rendered.lock().unwrap().push((ctx.update, *summary));
    }

    fn on_placeholder(&self, ctx: &UpdateContext, placeholder: Placeholder) {
        self.placeholders.lock().unwrap().push((ctx.update, placeholder));
    }

    fn on_render_error(&self, ctx: &UpdateContext, _error: &RenderError) {
        self.errors.lock().unwrap().push(ctx.update);
    }
}

struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&mut self, _chart: &ChartSpec) -> Result<(), RenderError> {
        Err(RenderError::Backend {
            message: "no canvas".to_string(),
        })
    }
}

fn fixture_options() -> UpdateOptions {
    let text = std::fs::read_to_string("tests/fixtures/dataview.json").unwrap();
    UpdateOptions::from_json_str(&text).unwrap()
}

#[test]
fn host_payload_renders_plotly_figure() {
    let mut visual = WaterfallVisual::new(PlotlyRenderer::new());
    let outcome = visual.update(&fixture_options());

    let UpdateOutcome::Rendered { bars } = outcome else {
        panic!("expected a rendered chart");
    };
    assert_eq!(bars.len(), 6);
    assert_eq!(visual.state(), LifecycleState::Updated);
    assert_eq!(visual.surface(), Surface::Chart);

    let figure = visual.renderer().figure().unwrap();
    let data = figure["data"].as_array().unwrap();
    assert_eq!(data.len(), 6);
    // Persisted total color is applied to Start, Subtotal and Total.
    assert_eq!(data[0]["marker"]["color"], "#333333");
    assert_eq!(data[3]["marker"]["color"], "#333333");
    assert_eq!(data[3]["name"], "A Subtotal");
    assert_eq!(data[5]["text"][0], "12.0");
    assert_eq!(figure["layout"]["title"], "Waterfall Chart with Category Subtotals");
}

#[test]
fn placeholders_are_distinct_for_missing_fields_and_empty_data() {
    let obs = Arc::new(RecordingObserver::default());
    let mut visual = WaterfallVisual::new(PlotlyRenderer::new()).with_observer(obs.clone());

    // No categorical payload at all.
    let outcome = visual.update(&UpdateOptions::new(DataView::default()));
    assert_eq!(outcome, UpdateOutcome::NoData(Placeholder::MissingFields));

    // Fields bound but no rows.
    let empty = DataView::from_json_str(
        r#"{"categorical": {
            "categories": [{"source": {"roles": {"category": true}}, "values": []}],
            "values": [{"source": {"roles": {"value": true}}, "values": []}]
        }}"#,
    )
    .unwrap();
    let outcome = visual.update(&UpdateOptions::new(empty));
    assert_eq!(outcome, UpdateOutcome::NoData(Placeholder::Empty));

    assert_eq!(
        obs.placeholders.lock().unwrap().clone(),
        vec![(1, Placeholder::MissingFields), (2, Placeholder::Empty)]
    );
    assert_ne!(Placeholder::MissingFields.message(), Placeholder::Empty.message());
    assert_eq!(Placeholder::Empty.to_string(), "No data to display");
    assert!(obs.rendered.lock().unwrap().is_empty());
}

#[test]
fn render_errors_become_placeholder_and_reach_observers() {
    let obs = Arc::new(RecordingObserver::default());
    let composite = Arc::new(CompositeObserver::new(vec![obs.clone()]));
    let mut visual = WaterfallVisual::new(FailingRenderer).with_observer(composite);

    let outcome = visual.update(&fixture_options());
    assert!(matches!(outcome, UpdateOutcome::Failed(RenderError::Backend { .. })));
    assert_eq!(visual.surface(), Surface::Placeholder(Placeholder::RenderError));
    assert_eq!(obs.errors.lock().unwrap().clone(), vec![1]);
    assert!(obs.placeholders.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_chart_summary() {
    let obs = Arc::new(RecordingObserver::default());
    let mut visual = WaterfallVisual::new(PlotlyRenderer::new()).with_observer(obs.clone());

    visual.update(&fixture_options());
    assert_eq!(
        obs.rendered.lock().unwrap().clone(),
        vec![(
            1,
            ChartSummary {
                rows: 3,
                categories: 2,
                subtotals: 1,
                start: 0.0,
                closing: 12.0,
                has_total: true,
                bars: 6,
            }
        )]
    );
}

#[test]
fn formatting_model_tracks_last_update() {
    let mut visual = WaterfallVisual::new(PlotlyRenderer::new());
    let defaults = visual.formatting_model();
    assert_eq!(
        defaults.card("colorSettings").unwrap().slices[2].control,
        SliceControl::ColorPicker {
            value: "#4682B4".to_string()
        }
    );

    visual.update(&fixture_options());
    let model = visual.formatting_model();
    assert_eq!(
        model.card("colorSettings").unwrap().slices[2].control,
        SliceControl::ColorPicker {
            value: "#333333".to_string()
        }
    );
    assert_eq!(
        model.card("displaySettings").unwrap().slices[0].control,
        SliceControl::ToggleSwitch { value: true }
    );
}

#[test]
fn show_total_toggle_from_host_objects() {
    let mut options = fixture_options();
    options.data_views[0] = options.data_views[0]
        .clone()
        .with_objects(serde_json::json!({"displaySettings": {"showTotal": false}}));

    let mut visual = WaterfallVisual::new(PlotlyRenderer::new());
    let UpdateOutcome::Rendered { bars } = visual.update(&options) else {
        panic!("expected a rendered chart");
    };
    assert_eq!(bars.len(), 5);
    assert_eq!(bars.last().unwrap().label, "B");
    // Colors fall back to defaults once the objects no longer carry them.
    assert_eq!(bars[0].color, "#4682B4");
}

#[test]
fn outcome_history_explains_each_update() {
    let history = Arc::new(OutcomeHistory::new(8));
    let composite = CompositeObserver::default()
        .with(history.clone())
        .with(Arc::new(LogObserver));
    let mut visual = WaterfallVisual::new(PlotlyRenderer::new()).with_observer(Arc::new(composite));

    visual.update(&fixture_options());
    visual.update(&UpdateOptions::default());

    let records = history.records();
    assert_eq!(records.len(), 2);
    assert!(matches!(
        records[0].outcome,
        RecordedOutcome::Chart(ChartSummary { subtotals: 1, closing, .. }) if closing == 12.0
    ));
    assert_eq!(records[1].update, 2);
    assert_eq!(
        records[1].outcome,
        RecordedOutcome::Placeholder(Placeholder::MissingFields)
    );
}
