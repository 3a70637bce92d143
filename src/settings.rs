//! User-editable formatting settings and the descriptor the host builds its settings pane from.
//!
//! Settings are grouped in two cards:
//!
//! - `colorSettings` ("Colors"): `positiveColor`, `negativeColor`, `totalColor`
//! - `displaySettings` ("Display Options"): `showTotal`
//!
//! [`FormattingSettings::populate`] reads the host's persisted objects and falls back to the
//! defaults for anything missing or blank.

use serde::{Deserialize, Serialize};

/// Default color for increases.
pub const DEFAULT_POSITIVE_COLOR: &str = "#2E8B57";
/// Default color for decreases.
pub const DEFAULT_NEGATIVE_COLOR: &str = "#DC143C";
/// Default color for Start, Total and Subtotal bars.
pub const DEFAULT_TOTAL_COLOR: &str = "#4682B4";

const COLOR_CARD: &str = "colorSettings";
const DISPLAY_CARD: &str = "displaySettings";

/// Bar colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSettings {
    /// Color of regular bars with a non-negative value.
    pub positive_color: String,
    /// Color of regular bars with a negative value.
    pub negative_color: String,
    /// Color of Start, Total and Subtotal bars.
    pub total_color: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            positive_color: DEFAULT_POSITIVE_COLOR.to_string(),
            negative_color: DEFAULT_NEGATIVE_COLOR.to_string(),
            total_color: DEFAULT_TOTAL_COLOR.to_string(),
        }
    }
}

/// Display toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Append a Total bar after the last category.
    pub show_total: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { show_total: true }
    }
}

/// All formatting settings of the visual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingSettings {
    /// The "Colors" card.
    pub color_settings: ColorSettings,
    /// The "Display Options" card.
    pub display_settings: DisplaySettings,
}

impl FormattingSettings {
    /// Build settings from the host's persisted objects.
    ///
    /// `objects` is keyed by card name, then by slice name. Colors may be given as a fill
    /// (`{"solid": {"color": "#RRGGBB"}}`) or a bare string. Missing, malformed or blank
    /// entries keep their defaults. The result never merges with earlier settings.
    pub fn populate(objects: Option<&serde_json::Value>) -> Self {
        let mut settings = Self::default();
        let Some(objects) = objects else {
            return settings;
        };

        if let Some(card) = objects.get(COLOR_CARD) {
            let colors = &mut settings.color_settings;
            for (slice, target) in [
                ("positiveColor", &mut colors.positive_color),
                ("negativeColor", &mut colors.negative_color),
                ("totalColor", &mut colors.total_color),
            ] {
                if let Some(color) = card.get(slice).and_then(read_color) {
                    *target = color;
                }
            }
        }

        if let Some(show_total) = objects
            .get(DISPLAY_CARD)
            .and_then(|card| card.get("showTotal"))
            .and_then(serde_json::Value::as_bool)
        {
            settings.display_settings.show_total = show_total;
        }

        settings
    }

    /// Descriptor the host uses to build its settings pane.
    pub fn formatting_model(&self) -> FormattingModel {
        let colors = &self.color_settings;
        FormattingModel {
            cards: vec![
                FormattingCard {
                    name: COLOR_CARD.to_string(),
                    display_name: "Colors".to_string(),
                    slices: vec![
                        FormattingSlice::color(
                            "positiveColor",
                            "Positive Color",
                            &colors.positive_color,
                        ),
                        FormattingSlice::color(
                            "negativeColor",
                            "Negative Color",
                            &colors.negative_color,
                        ),
                        FormattingSlice::color("totalColor", "Total Color", &colors.total_color),
                    ],
                },
                FormattingCard {
                    name: DISPLAY_CARD.to_string(),
                    display_name: "Display Options".to_string(),
                    slices: vec![FormattingSlice {
                        name: "showTotal".to_string(),
                        display_name: "Show Total".to_string(),
                        control: SliceControl::ToggleSwitch {
                            value: self.display_settings.show_total,
                        },
                    }],
                },
            ],
        }
    }
}

fn read_color(v: &serde_json::Value) -> Option<String> {
    let raw = match v {
        serde_json::Value::String(s) => s.as_str(),
        other => other.get("solid")?.get("color")?.as_str()?,
    };
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Settings pane descriptor returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingModel {
    /// Cards in display order.
    pub cards: Vec<FormattingCard>,
}

impl FormattingModel {
    /// Look up a card by name.
    pub fn card(&self, name: &str) -> Option<&FormattingCard> {
        self.cards.iter().find(|c| c.name == name)
    }
}

/// One group of settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingCard {
    /// Object name the host persists the card under (`colorSettings`, `displaySettings`).
    pub name: String,
    /// Card title in the settings pane.
    pub display_name: String,
    /// Settings in display order.
    pub slices: Vec<FormattingSlice>,
}

/// One editable setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingSlice {
    /// Property name inside the card's object.
    pub name: String,
    /// Label shown next to the control.
    pub display_name: String,
    /// Editor widget and its current value.
    pub control: SliceControl,
}

impl FormattingSlice {
    fn color(name: &str, display_name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            control: SliceControl::ColorPicker {
                value: value.to_string(),
            },
        }
    }
}

/// Editor control for a slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SliceControl {
    ColorPicker { value: String },
    ToggleSwitch { value: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_documented_values() {
        let s = FormattingSettings::populate(None);
        assert_eq!(s.color_settings.positive_color, "#2E8B57");
        assert_eq!(s.color_settings.negative_color, "#DC143C");
        assert_eq!(s.color_settings.total_color, "#4682B4");
        assert!(s.display_settings.show_total);
    }

    #[test]
    fn populate_reads_fill_and_bare_colors() {
        let objects = json!({
            "colorSettings": {
                "positiveColor": {"solid": {"color": "#00FF00"}},
                "totalColor": "#111111"
            },
            "displaySettings": {"showTotal": false}
        });
        let s = FormattingSettings::populate(Some(&objects));
        assert_eq!(s.color_settings.positive_color, "#00FF00");
        assert_eq!(s.color_settings.negative_color, DEFAULT_NEGATIVE_COLOR);
        assert_eq!(s.color_settings.total_color, "#111111");
        assert!(!s.display_settings.show_total);
    }

    #[test]
    fn blank_or_malformed_entries_keep_defaults() {
        let objects = json!({
            "colorSettings": {
                "positiveColor": {"solid": {"color": ""}},
                "negativeColor": 42
            },
            "displaySettings": {"showTotal": "no"}
        });
        let s = FormattingSettings::populate(Some(&objects));
        assert_eq!(s, FormattingSettings::default());
    }

    #[test]
    fn formatting_model_reflects_current_values() {
        let mut s = FormattingSettings::default();
        s.display_settings.show_total = false;
        let model = s.formatting_model();

        let colors = model.card("colorSettings").unwrap();
        assert_eq!(colors.display_name, "Colors");
        assert_eq!(colors.slices.len(), 3);

        let display = model.card("displaySettings").unwrap();
        assert_eq!(
            display.slices[0].control,
            SliceControl::ToggleSwitch { value: false }
        );

        let encoded = serde_json::to_value(&model).unwrap();
        assert_eq!(encoded["cards"][0]["slices"][0]["control"]["type"], "colorPicker");
        assert_eq!(encoded["cards"][0]["slices"][0]["displayName"], "Positive Color");
    }
}
