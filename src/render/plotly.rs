//! Plotly figure renderer.
//!
//! Produces the `{"data", "layout", "config"}` figure a Plotly front end passes to
//! `Plotly.newPlot`. Every bar is its own trace with a single x-category and `barmode: "stack"`,
//! so the trace's `base` positions it and its `marker` colors it independently.

use serde_json::{json, Value as JsonValue};

use crate::processing::{BarSpec, HoverText, TextPosition};

use super::{ChartRenderer, ChartSpec, RenderError};

/// Renders charts into Plotly figure JSON and keeps the last figure.
#[derive(Debug, Default)]
pub struct PlotlyRenderer {
    figure: Option<JsonValue>,
}

impl PlotlyRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Figure produced by the last successful render.
    pub fn figure(&self) -> Option<&JsonValue> {
        self.figure.as_ref()
    }
}

impl ChartRenderer for PlotlyRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), RenderError> {
        // Keep the previous figure until the new one is complete.
        let figure = plotly_figure(chart)?;
        self.figure = Some(figure);
        Ok(())
    }
}

/// Build the Plotly figure for `chart`.
///
/// Fails with [`RenderError::NonFinite`] when a bar's base or height cannot be encoded.
pub fn plotly_figure(chart: &ChartSpec) -> Result<JsonValue, RenderError> {
    let traces = chart
        .bars
        .iter()
        .map(bar_trace)
        .collect::<Result<Vec<_>, _>>()?;

    let layout = &chart.layout;
    Ok(json!({
        "data": traces,
        "layout": {
            "title": layout.title,
            "xaxis": {
                "title": layout.x_axis_title,
                "tickangle": layout.x_tick_angle,
            },
            "yaxis": { "title": layout.y_axis_title },
            "showlegend": layout.show_legend,
            "barmode": "stack",
            "margin": {
                "t": layout.margin.top,
                "l": layout.margin.left,
                "r": layout.margin.right,
                "b": layout.margin.bottom,
            },
        },
        "config": {
            "displayModeBar": false,
            "responsive": true,
        },
    }))
}

fn bar_trace(bar: &BarSpec) -> Result<JsonValue, RenderError> {
    for (field, v) in [("base", bar.base), ("height", bar.height)] {
        if !v.is_finite() {
            return Err(RenderError::NonFinite {
                label: bar.label.clone(),
                field,
            });
        }
    }

    let text_position = match bar.text_position {
        TextPosition::Outside => "outside",
    };

    Ok(json!({
        "x": [bar.label],
        "y": [bar.height],
        "base": [bar.base],
        "type": "bar",
        "marker": {
            "color": bar.color,
            "opacity": bar.opacity,
        },
        "name": bar.label,
        "text": [bar.text],
        "textposition": text_position,
        "hovertemplate": hover_template(&bar.hover),
    }))
}

fn hover_template(hover: &HoverText) -> String {
    let mut out = String::new();
    for (i, line) in hover.lines().iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("<b>{line}</b>"));
        } else {
            out.push_str(line);
        }
        out.push_str("<br>");
    }
    // Suppresses Plotly's secondary trace-name box.
    out.push_str("<extra></extra>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{map_to_bars, transform};
    use crate::settings::ColorSettings;
    use crate::types::Value;

    fn chart() -> ChartSpec {
        let categories = vec![Value::Utf8("A".into()), Value::Utf8("A".into())];
        let breakdowns = vec![Value::Utf8("x".into()), Value::Utf8("y".into())];
        let values = vec![Value::Float64(4.0), Value::Float64(-1.5)];
        let points = transform(&categories, Some(&breakdowns), &values, 0.0, true);
        ChartSpec::new(map_to_bars(&points, &ColorSettings::default()))
    }

    #[test]
    fn one_trace_per_bar_in_stack_mode() {
        let fig = plotly_figure(&chart()).unwrap();
        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(fig["layout"]["barmode"], "stack");
        assert_eq!(fig["layout"]["showlegend"], false);
        assert_eq!(fig["layout"]["xaxis"]["tickangle"], -45);
        assert_eq!(fig["layout"]["margin"]["b"], 150);
        assert_eq!(fig["config"]["displayModeBar"], false);

        let negative = &data[2];
        assert_eq!(negative["x"], json!(["A - y"]));
        assert_eq!(negative["base"], json!([2.5]));
        assert_eq!(negative["y"], json!([1.5]));
        assert_eq!(negative["marker"]["color"], "#DC143C");
        assert_eq!(negative["text"], json!(["-1.5"]));
        assert_eq!(negative["textposition"], "outside");

        let subtotal = &data[3];
        assert_eq!(subtotal["marker"]["opacity"], 0.7);
    }

    #[test]
    fn hover_template_bolds_label_and_lists_breakdown() {
        let fig = plotly_figure(&chart()).unwrap();
        assert_eq!(
            fig["data"][1]["hovertemplate"],
            "<b>A - x</b><br>Value: 4.00<br>Cumulative: 4.00<br>Breakdown: x<br><extra></extra>"
        );
        assert_eq!(
            fig["data"][4]["hovertemplate"],
            "<b>Total</b><br>Value: 2.50<br>Cumulative: 2.50<br><extra></extra>"
        );
    }

    #[test]
    fn non_finite_bars_fail_and_keep_previous_figure() {
        let mut renderer = PlotlyRenderer::new();
        renderer.render(&chart()).unwrap();
        let before = renderer.figure().cloned();

        let mut broken = chart();
        broken.bars[1].height = f64::INFINITY;
        let err = renderer.render(&broken).unwrap_err();
        assert_eq!(
            err,
            RenderError::NonFinite {
                label: "A - x".to_string(),
                field: "height",
            }
        );
        assert_eq!(renderer.figure().cloned(), before);
    }
}
