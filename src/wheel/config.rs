//! Wheel options and validate-or-default handling
//!
//! Options arrive either as a typed [`WheelConfig`] or as loose JSON from a
//! host page. Either way every field is checked, and anything unusable is
//! swapped for its documented default and recorded in a [`ValidationReport`].

use glam::DVec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::item::{ItemConfig, sanitize_items};
use crate::consts::*;

/// Horizontal label alignment relative to the label anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    Left,
    Center,
    #[default]
    Right,
}

impl LabelAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelAlign::Left => "left",
            LabelAlign::Center => "center",
            LabelAlign::Right => "right",
        }
    }
}

/// All recognised wheel options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WheelConfig {
    pub items: Vec<ItemConfig>,

    // === Motion ===
    /// Initial rotation (degrees)
    pub rotation: f64,
    /// Initial rotation speed (degrees/second)
    pub rotation_speed: f64,
    pub rotation_speed_max: f64,
    /// Deceleration (degrees/second², zero or negative)
    pub rotation_resistance: f64,
    /// Fixed canvas angle that selects the current item
    pub pointer_angle: f64,
    /// ±fraction of jitter applied by `spin`
    pub spin_jitter: f64,
    /// Seed for jitter and random landing angles (random when absent)
    pub seed: Option<u64>,
    pub is_interactive: bool,

    // === Geometry ===
    /// Fraction of half the canvas size
    pub radius: f64,
    /// Offset from the canvas center, in percent of the wheel diameter
    pub offset: DVec2,
    /// Device pixel ratio override (0 = use the host's)
    pub pixel_ratio: f64,

    // === Labels ===
    pub item_label_radius: f64,
    pub item_label_radius_max: f64,
    pub item_label_rotation: f64,
    pub item_label_align: LabelAlign,
    pub item_label_baseline_offset: f64,
    pub item_label_font: String,
    pub item_label_font_size_max: f64,
    pub item_label_colors: Vec<String>,
    pub item_label_stroke_color: String,
    pub item_label_stroke_width: f64,

    // === Wedges & decoration ===
    pub item_background_colors: Vec<String>,
    pub line_color: String,
    pub line_width: f64,
    pub border_color: String,
    pub border_width: f64,
    /// Image key drawn over the wedges, rotating with the wheel
    pub image: Option<String>,
    /// Image key drawn over everything, fixed to the canvas
    pub overlay_image: Option<String>,

    pub debug: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),

            rotation: 0.0,
            rotation_speed: 0.0,
            rotation_speed_max: DEFAULT_ROTATION_SPEED_MAX,
            rotation_resistance: DEFAULT_ROTATION_RESISTANCE,
            pointer_angle: DEFAULT_POINTER_ANGLE,
            spin_jitter: DEFAULT_SPIN_JITTER,
            seed: None,
            is_interactive: true,

            radius: DEFAULT_RADIUS,
            offset: DVec2::ZERO,
            pixel_ratio: 0.0,

            item_label_radius: DEFAULT_ITEM_LABEL_RADIUS,
            item_label_radius_max: DEFAULT_ITEM_LABEL_RADIUS_MAX,
            item_label_rotation: DEFAULT_ITEM_LABEL_ROTATION,
            item_label_align: LabelAlign::Right,
            item_label_baseline_offset: DEFAULT_ITEM_LABEL_BASELINE_OFFSET,
            item_label_font: DEFAULT_ITEM_LABEL_FONT.to_string(),
            item_label_font_size_max: DEFAULT_ITEM_LABEL_FONT_SIZE_MAX,
            item_label_colors: vec![FALLBACK_LABEL_COLOR.to_string()],
            item_label_stroke_color: DEFAULT_ITEM_LABEL_STROKE_COLOR.to_string(),
            item_label_stroke_width: DEFAULT_ITEM_LABEL_STROKE_WIDTH,

            item_background_colors: vec![FALLBACK_BACKGROUND_COLOR.to_string()],
            line_color: DEFAULT_LINE_COLOR.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            border_width: DEFAULT_BORDER_WIDTH,
            image: None,
            overlay_image: None,

            debug: false,
        }
    }
}

/// One option that was replaced by its default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub reason: String,
}

/// Every substitution made while applying options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        let issue = ValidationIssue {
            field: field.into(),
            reason: reason.into(),
        };
        log::warn!("Wheel option `{}` reset to default: {}", issue.field, issue.reason);
        self.issues.push(issue);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

/// Replace `value` with `default` unless it is finite and passes `valid`
pub(crate) fn check_number(
    report: &mut ValidationReport,
    field: &str,
    value: &mut f64,
    default: f64,
    valid: impl Fn(f64) -> bool,
    expected: &str,
) {
    if !value.is_finite() || !valid(*value) {
        report.push(field, format!("{value} is not {expected}"));
        *value = default;
    }
}

/// Overlay `input` key by key onto `T::default()`, reverting any key that
/// stops the whole object from deserializing
fn merge_loose<T>(input: Map<String, Value>, prefix: &str, report: &mut ValidationReport) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut accepted = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for (key, field) in input {
        let previous = accepted.insert(key.clone(), field);
        if let Err(err) = serde_json::from_value::<T>(Value::Object(accepted.clone())) {
            report.push(format!("{prefix}{key}"), err.to_string());
            match previous {
                Some(prev) => accepted.insert(key, prev),
                None => accepted.remove(&key),
            };
        }
    }

    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

impl WheelConfig {
    /// Parse options from loose JSON.
    ///
    /// Keys whose values have the wrong shape fall back to their defaults and
    /// are listed in the report; unknown keys are ignored. Only a non-object
    /// input is rejected outright. Each entry of `items` is merged the same
    /// way, so one bad item field (`items[1].weight`) keeps the rest.
    pub fn from_json_value(value: Value) -> (Self, ValidationReport) {
        let mut report = ValidationReport::default();
        let Value::Object(mut input) = value else {
            report.push("options", "expected a JSON object");
            return (Self::default(), report);
        };
        let items = input.remove("items");

        let mut config: Self = merge_loose(input, "", &mut report);
        match items {
            None => {}
            Some(Value::Array(list)) => {
                config.items = list
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| match entry {
                        Value::Object(map) => merge_loose(map, &format!("items[{i}]."), &mut report),
                        other => {
                            report.push(format!("items[{i}]"), format!("expected an item object, got {other}"));
                            ItemConfig::default()
                        }
                    })
                    .collect();
            }
            Some(other) => report.push("items", format!("expected an array, got {other}")),
        }
        report.merge(config.sanitize());
        (config, report)
    }

    /// Range-check every field in place, resetting bad ones to defaults
    pub fn sanitize(&mut self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let d = Self::default();

        check_number(&mut report, "rotation", &mut self.rotation, d.rotation, |_| true, "a finite number");
        check_number(
            &mut report,
            "rotationSpeedMax",
            &mut self.rotation_speed_max,
            d.rotation_speed_max,
            |v| v > 0.0,
            "a positive number",
        );
        check_number(
            &mut report,
            "rotationSpeed",
            &mut self.rotation_speed,
            d.rotation_speed,
            |_| true,
            "a finite number",
        );
        check_number(
            &mut report,
            "rotationResistance",
            &mut self.rotation_resistance,
            d.rotation_resistance,
            |v| v <= 0.0,
            "zero or negative",
        );
        check_number(
            &mut report,
            "pointerAngle",
            &mut self.pointer_angle,
            d.pointer_angle,
            |_| true,
            "a finite number",
        );
        self.pointer_angle = crate::geometry::add_angle(self.pointer_angle, 0.0);
        check_number(
            &mut report,
            "spinJitter",
            &mut self.spin_jitter,
            d.spin_jitter,
            |v| (0.0..1.0).contains(&v),
            "in [0, 1)",
        );
        check_number(&mut report, "radius", &mut self.radius, d.radius, |v| v > 0.0 && v <= 1.0, "in (0, 1]");
        check_number(
            &mut report,
            "pixelRatio",
            &mut self.pixel_ratio,
            d.pixel_ratio,
            |v| v >= 0.0,
            "zero or positive",
        );
        if !self.offset.is_finite() {
            report.push("offset", "offset must be finite");
            self.offset = d.offset;
        }
        for (field, value, default) in [
            ("itemLabelRadius", &mut self.item_label_radius, d.item_label_radius),
            ("itemLabelRadiusMax", &mut self.item_label_radius_max, d.item_label_radius_max),
        ] {
            check_number(&mut report, field, value, default, |v| (0.0..=1.0).contains(&v), "in [0, 1]");
        }
        check_number(
            &mut report,
            "itemLabelRotation",
            &mut self.item_label_rotation,
            d.item_label_rotation,
            |_| true,
            "a finite number",
        );
        check_number(
            &mut report,
            "itemLabelBaselineOffset",
            &mut self.item_label_baseline_offset,
            d.item_label_baseline_offset,
            |_| true,
            "a finite number",
        );
        check_number(
            &mut report,
            "itemLabelFontSizeMax",
            &mut self.item_label_font_size_max,
            d.item_label_font_size_max,
            |v| v > 0.0,
            "a positive number",
        );
        for (field, value, default) in [
            ("itemLabelStrokeWidth", &mut self.item_label_stroke_width, d.item_label_stroke_width),
            ("lineWidth", &mut self.line_width, d.line_width),
            ("borderWidth", &mut self.border_width, d.border_width),
        ] {
            check_number(&mut report, field, value, default, |v| v >= 0.0, "zero or positive");
        }
        if self.item_label_font.trim().is_empty() {
            report.push("itemLabelFont", "font family is empty");
            self.item_label_font = d.item_label_font;
        }

        report.merge(sanitize_items(&mut self.items));

        report
    }
}
