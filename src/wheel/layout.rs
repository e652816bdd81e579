//! Item layout: palette resolution and the weighted 360° partition
//!
//! Spans are stored unrotated, starting at 0° for the first item and ending at
//! exactly 360° for the last. The wheel's rotation is added when a span is
//! consumed (hit-testing, rendering, current-item lookup).

use serde::Serialize;

use super::item::ItemConfig;
use crate::consts::{DEFAULT_ITEM_WEIGHT, FALLBACK_BACKGROUND_COLOR, FALLBACK_LABEL_COLOR};
use crate::geometry::{add_angle, is_angle_between};

/// Angular extent of one item, in wheel degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemSpan {
    pub start: f64,
    pub end: f64,
}

impl ItemSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Width of the span (degrees)
    #[inline]
    pub fn angular_span(&self) -> f64 {
        self.end - self.start
    }

    /// Mid-angle of the span
    #[inline]
    pub fn center(&self) -> f64 {
        self.start + self.angular_span() / 2.0
    }

    /// The same span offset by `rotation`
    pub fn rotated(&self, rotation: f64) -> Self {
        Self::new(self.start + rotation, self.end + rotation)
    }

    /// Check if an angle falls in `[start, end)` after wrapping both ends mod 360.
    ///
    /// Zero-width spans contain nothing; a full 360° span contains everything.
    pub fn contains_angle(&self, angle: f64) -> bool {
        let span = self.angular_span();
        if span <= 0.0 {
            return false;
        }
        if span >= 360.0 {
            return true;
        }
        let angle = add_angle(angle, 0.0);
        let start = add_angle(self.start, 0.0);
        let end = add_angle(self.end, 0.0);
        is_angle_between(angle, start, end)
    }
}

/// Render attributes for one item after palette fallback
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub background_color: String,
    pub label_color: String,
    pub weight: f64,
}

/// Pick the explicit color, else the repeating palette entry, else the fallback
fn resolve_color(explicit: Option<&str>, palette: &[String], index: usize, fallback: &str) -> String {
    if let Some(color) = explicit {
        return color.to_string();
    }
    if palette.is_empty() {
        return fallback.to_string();
    }
    palette[index % palette.len()].clone()
}

/// Resolve colors and weights for every item
pub fn resolve_items(
    items: &[ItemConfig],
    background_colors: &[String],
    label_colors: &[String],
) -> Vec<ResolvedItem> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| ResolvedItem {
            background_color: resolve_color(
                item.background_color.as_deref(),
                background_colors,
                i,
                FALLBACK_BACKGROUND_COLOR,
            ),
            label_color: resolve_color(item.label_color.as_deref(), label_colors, i, FALLBACK_LABEL_COLOR),
            weight: item.weight.unwrap_or(DEFAULT_ITEM_WEIGHT),
        })
        .collect()
}

/// Degrees per unit of weight (0 when there is nothing to share out)
pub fn weighted_item_angle(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() { 360.0 / total } else { 0.0 }
}

/// Partition 360° by weight.
///
/// Boundaries come from the running weight total so adjacent spans share the
/// exact same boundary value, and the last span is pinned to 360°.
pub fn item_spans(weights: &[f64]) -> Vec<ItemSpan> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return vec![ItemSpan::new(0.0, 0.0); weights.len()];
    }

    let mut spans = Vec::with_capacity(weights.len());
    let mut cumulative = 0.0;
    let mut start = 0.0;
    for weight in weights {
        cumulative += weight;
        let end = 360.0 * (cumulative / total);
        spans.push(ItemSpan::new(start, end));
        start = end;
    }
    if let Some(last) = spans.last_mut() {
        last.end = 360.0;
    }
    spans
}
