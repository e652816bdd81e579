//! Wheel items (wedges)
//!
//! Items are owned by the wheel in insertion order. Each one gets an
//! [`ItemId`] when the item list is set; layout questions about an item
//! (its span, center angle, current index) are answered by the wheel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::{ValidationReport, check_number};
use crate::consts::*;

/// Stable handle for an item, unique within one wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Raw item options as supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemConfig {
    pub label: String,
    /// Explicit wedge color (palette fallback when absent)
    pub background_color: Option<String>,
    /// Explicit label color (palette fallback when absent)
    pub label_color: Option<String>,
    /// Relative wedge size (1 when absent)
    pub weight: Option<f64>,
    /// Image key drawn inside the wedge
    pub image: Option<String>,
    /// Image distance from center as a fraction of the radius
    pub image_radius: f64,
    /// Extra image rotation (degrees)
    pub image_rotation: f64,
    pub image_scale: f64,
    pub image_opacity: f64,
    /// Opaque caller payload
    pub value: Value,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            background_color: None,
            label_color: None,
            weight: None,
            image: None,
            image_radius: DEFAULT_ITEM_IMAGE_RADIUS,
            image_rotation: DEFAULT_ITEM_IMAGE_ROTATION,
            image_scale: DEFAULT_ITEM_IMAGE_SCALE,
            image_opacity: DEFAULT_ITEM_IMAGE_OPACITY,
            value: Value::Null,
        }
    }
}

impl ItemConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Reset unusable numeric fields to defaults
    pub(crate) fn sanitize(&mut self, index: usize) -> ValidationReport {
        let mut report = ValidationReport::default();
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight < 0.0 {
                report.push(format!("items[{index}].weight"), format!("{weight} is not a non-negative number"));
                self.weight = None;
            }
        }
        check_number(
            &mut report,
            &format!("items[{index}].imageRadius"),
            &mut self.image_radius,
            DEFAULT_ITEM_IMAGE_RADIUS,
            |v| v >= 0.0,
            "zero or positive",
        );
        check_number(
            &mut report,
            &format!("items[{index}].imageRotation"),
            &mut self.image_rotation,
            DEFAULT_ITEM_IMAGE_ROTATION,
            |_| true,
            "a finite number",
        );
        check_number(
            &mut report,
            &format!("items[{index}].imageScale"),
            &mut self.image_scale,
            DEFAULT_ITEM_IMAGE_SCALE,
            |v| v >= 0.0,
            "zero or positive",
        );
        check_number(
            &mut report,
            &format!("items[{index}].imageOpacity"),
            &mut self.image_opacity,
            DEFAULT_ITEM_IMAGE_OPACITY,
            |v| (0.0..=1.0).contains(&v),
            "in [0, 1]",
        );
        report
    }
}

/// An item with its render attributes resolved against the wheel palettes
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub config: ItemConfig,
    pub background_color: String,
    pub label_color: String,
    pub weight: f64,
}

/// Sanitize every item, then make sure the weights share out 360° finitely.
///
/// Weights that are individually fine can still sum past `f64::MAX`; in that
/// case every weight falls back to the default.
pub(crate) fn sanitize_items(items: &mut [ItemConfig]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (i, item) in items.iter_mut().enumerate() {
        report.merge(item.sanitize(i));
    }
    let total: f64 = items.iter().map(|i| i.weight.unwrap_or(DEFAULT_ITEM_WEIGHT)).sum();
    if !total.is_finite() {
        report.push("items", format!("total weight {total} is not finite"));
        for item in items.iter_mut() {
            item.weight = None;
        }
    }
    report
}

impl Item {
    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn value(&self) -> &Value {
        &self.config.value
    }

    /// Whether the item has a label worth drawing
    pub fn has_label(&self) -> bool {
        !self.config.label.trim().is_empty()
    }
}
