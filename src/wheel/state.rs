//! The wheel aggregate: rotation state, items and derived canvas layout
//!
//! `(rotation, rotation_speed, drag)` is mutated only by the frame tick, the
//! pointer handlers and the spin APIs. Everything else here is configuration
//! or caches derived from it.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::config::{ValidationReport, WheelConfig, check_number};
use super::drag::DragState;
use super::events::WheelEvent;
use super::item::{Item, ItemConfig, ItemId, sanitize_items};
use super::layout::{ItemSpan, item_spans, resolve_items, weighted_item_angle};
use super::spin::Tween;
use crate::consts::*;
use crate::error::{Result, WheelError};
use crate::geometry::{add_angle, is_point_in_circle, rotation_direction, translate_to_canvas};
use crate::renderer::TextMeasure;

/// Canvas-dependent values recomputed on resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Canvas size in device pixels
    pub canvas_size: DVec2,
    /// Canvas top-left in viewport (CSS) pixels
    pub canvas_origin: DVec2,
    pub pixel_ratio: f64,
    /// Shorter canvas side
    pub size: f64,
    pub center: DVec2,
    pub actual_radius: f64,
    /// Shared label font size (pixels)
    pub font_size: f64,
    pub label_max_width: f64,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            canvas_size: DVec2::ZERO,
            canvas_origin: DVec2::ZERO,
            pixel_ratio: 1.0,
            size: 0.0,
            center: DVec2::ZERO,
            actual_radius: 0.0,
            font_size: 0.0,
            label_max_width: 0.0,
        }
    }
}

impl CanvasLayout {
    /// Scale a style size authored against the base canvas
    #[inline]
    pub fn scaled(&self, value: f64) -> f64 {
        value * self.size / BASE_CANVAS_SIZE
    }
}

/// A spinning wheel
#[derive(Debug, Clone)]
pub struct Wheel {
    /// Active options; `config.items` is always empty (see [`Wheel::items`])
    pub(crate) config: WheelConfig,
    pub(crate) items: Vec<Item>,
    /// Unrotated spans, parallel to `items`
    pub(crate) spans: Vec<ItemSpan>,
    next_item_id: u32,

    pub(crate) rotation: f64,
    pub(crate) rotation_speed: f64,
    pub(crate) rotation_direction: i8,
    pub(crate) current_index: Option<usize>,

    pub(crate) drag: DragState,
    pub(crate) tween: Option<Tween>,
    pub(crate) last_frame_ms: Option<f64>,

    pub(crate) layout: CanvasLayout,
    host_pixel_ratio: f64,
    labels_dirty: bool,
    pub(crate) is_cursor_over_wheel: bool,

    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<WheelEvent>,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(WheelConfig::default())
    }
}

impl Wheel {
    /// Create a wheel, logging (and defaulting) any invalid options
    pub fn new(config: WheelConfig) -> Self {
        let mut wheel = Self {
            config: WheelConfig::default(),
            items: Vec::new(),
            spans: Vec::new(),
            next_item_id: 1,
            rotation: 0.0,
            rotation_speed: 0.0,
            rotation_direction: 0,
            current_index: None,
            drag: DragState::default(),
            tween: None,
            last_frame_ms: None,
            layout: CanvasLayout::default(),
            host_pixel_ratio: 1.0,
            labels_dirty: true,
            is_cursor_over_wheel: false,
            rng: Pcg32::from_rng(&mut rand::rng()),
            events: Vec::new(),
        };
        wheel.configure(config);
        wheel
    }

    /// Create a wheel from JSON options.
    ///
    /// Malformed JSON is a construction error; well-formed JSON with bad
    /// values falls back to defaults field by field.
    pub fn from_json(json: &str) -> Result<(Self, ValidationReport)> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let (config, report) = WheelConfig::from_json_value(value);
        let wheel = Self::new(config);
        Ok((wheel, report))
    }

    /// Replace every option (including items, rotation and speed)
    pub fn configure(&mut self, mut config: WheelConfig) -> ValidationReport {
        let report = config.sanitize();
        if let Some(seed) = config.seed {
            self.rng = Pcg32::seed_from_u64(seed);
        }
        let items = std::mem::take(&mut config.items);
        let rotation = config.rotation;
        let rotation_speed = config.rotation_speed;
        self.config = config;

        self.cancel_motion();
        self.rotation = rotation;
        self.set_rotation_speed(rotation_speed);
        self.rebuild_items(items);
        self.refresh_current_index(false);
        self.relayout();
        report
    }

    /// Apply loose JSON options; see [`WheelConfig::from_json_value`]
    pub fn configure_json(&mut self, value: serde_json::Value) -> ValidationReport {
        let (config, report) = WheelConfig::from_json_value(value);
        self.configure(config);
        report
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    // === Items ===

    /// Replace the item list. Previously issued [`ItemId`]s become dangling.
    pub fn set_items(&mut self, mut items: Vec<ItemConfig>) -> ValidationReport {
        let report = sanitize_items(&mut items);
        self.rebuild_items(items);
        self.refresh_current_index(false);
        self.labels_dirty = true;
        report
    }

    fn rebuild_items(&mut self, configs: Vec<ItemConfig>) {
        let resolved = resolve_items(
            &configs,
            &self.config.item_background_colors,
            &self.config.item_label_colors,
        );
        let mut items = Vec::with_capacity(configs.len());
        for (config, r) in configs.into_iter().zip(resolved) {
            let id = ItemId(self.next_item_id);
            self.next_item_id += 1;
            items.push(Item {
                id,
                config,
                background_color: r.background_color,
                label_color: r.label_color,
                weight: r.weight,
            });
        }
        self.items = items;
        self.refresh_spans();
        self.labels_dirty = true;
    }

    /// Re-resolve palette colors without reissuing ids
    fn refresh_item_styles(&mut self) {
        let configs: Vec<ItemConfig> = self.items.iter().map(|i| i.config.clone()).collect();
        let resolved = resolve_items(
            &configs,
            &self.config.item_background_colors,
            &self.config.item_label_colors,
        );
        for (item, r) in self.items.iter_mut().zip(resolved) {
            item.background_color = r.background_color;
            item.label_color = r.label_color;
            item.weight = r.weight;
        }
        self.refresh_spans();
    }

    fn refresh_spans(&mut self) {
        let weights: Vec<f64> = self.items.iter().map(|i| i.weight).collect();
        self.spans = item_spans(&weights);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Position of an item in the list; a dangling id is a programmer error
    pub fn item_index(&self, id: ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or(WheelError::ItemNotFound(id))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(WheelError::ItemIndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Degrees per unit of item weight
    pub fn weighted_item_angle(&self) -> f64 {
        let weights: Vec<f64> = self.items.iter().map(|i| i.weight).collect();
        weighted_item_angle(&weights)
    }

    /// Item spans before rotation (first starts at 0°, last ends at 360°)
    pub fn base_spans(&self) -> &[ItemSpan] {
        &self.spans
    }

    /// Item spans at the current rotation
    pub fn item_spans(&self) -> Vec<ItemSpan> {
        self.spans.iter().map(|s| s.rotated(self.rotation)).collect()
    }

    /// Span of one item at the current rotation
    pub fn item_span(&self, index: usize) -> Result<ItemSpan> {
        self.check_index(index)?;
        Ok(self.spans[index].rotated(self.rotation))
    }

    /// Unrotated mid-angle of an item
    pub fn item_center_angle(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.spans[index].center())
    }

    /// Uniformly random unrotated angle inside an item
    pub fn item_random_angle(&mut self, index: usize) -> Result<f64> {
        use rand::Rng;

        self.check_index(index)?;
        let span = self.spans[index];
        if !span.start.is_finite() || !span.end.is_finite() {
            return Err(WheelError::InvalidConfig(format!("item {index} has a non-finite span")));
        }
        if span.end <= span.start {
            return Ok(span.start);
        }
        Ok(self.rng.random_range(span.start..span.end))
    }

    // === Rotation state ===

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set rotation directly (degrees, unwrapped)
    pub fn set_rotation(&mut self, rotation: f64) {
        let mut rotation = rotation;
        check_number(&mut ValidationReport::default(), "rotation", &mut rotation, 0.0, |_| true, "a finite number");
        self.rotation = rotation;
        self.refresh_current_index(true);
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// Set rotation speed, clamped to ±`rotation_speed_max`
    pub fn set_rotation_speed(&mut self, speed: f64) {
        let speed = if speed.is_finite() { speed } else { 0.0 };
        let max = self.config.rotation_speed_max;
        self.rotation_speed = speed.clamp(-max, max);
        self.rotation_direction = rotation_direction(self.rotation_speed);
    }

    /// -1, 0 or 1
    pub fn rotation_direction(&self) -> i8 {
        self.rotation_direction
    }

    pub fn rotation_speed_max(&self) -> f64 {
        self.config.rotation_speed_max
    }

    pub fn set_rotation_speed_max(&mut self, max: f64) {
        let mut max = max;
        check_number(
            &mut ValidationReport::default(),
            "rotationSpeedMax",
            &mut max,
            DEFAULT_ROTATION_SPEED_MAX,
            |v| v > 0.0,
            "a positive number",
        );
        self.config.rotation_speed_max = max;
        self.set_rotation_speed(self.rotation_speed);
    }

    pub fn rotation_resistance(&self) -> f64 {
        self.config.rotation_resistance
    }

    pub fn set_rotation_resistance(&mut self, resistance: f64) {
        let mut resistance = resistance;
        check_number(
            &mut ValidationReport::default(),
            "rotationResistance",
            &mut resistance,
            DEFAULT_ROTATION_RESISTANCE,
            |v| v <= 0.0,
            "zero or negative",
        );
        self.config.rotation_resistance = resistance;
    }

    pub fn pointer_angle(&self) -> f64 {
        self.config.pointer_angle
    }

    pub fn set_pointer_angle(&mut self, angle: f64) {
        let mut angle = angle;
        check_number(
            &mut ValidationReport::default(),
            "pointerAngle",
            &mut angle,
            DEFAULT_POINTER_ANGLE,
            |_| true,
            "a finite number",
        );
        self.config.pointer_angle = add_angle(angle, 0.0);
        self.refresh_current_index(true);
    }

    /// Index of the item under the pointer
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current_index.and_then(|i| self.items.get(i))
    }

    pub(crate) fn refresh_current_index(&mut self, notify: bool) {
        let pointer = self.config.pointer_angle;
        let rotation = self.rotation;
        let index = self
            .spans
            .iter()
            .position(|s| s.rotated(rotation).contains_angle(pointer));
        if index == self.current_index {
            return;
        }
        self.current_index = index;
        if notify {
            log::trace!("Current index -> {:?}", index);
            self.emit(WheelEvent::CurrentIndexChange { current_index: index });
        }
    }

    /// Whether a scripted tween is in flight
    pub fn is_tweening(&self) -> bool {
        self.tween.is_some()
    }

    pub(crate) fn cancel_motion(&mut self) {
        self.tween = None;
    }

    // === Style ===

    pub fn is_interactive(&self) -> bool {
        self.config.is_interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.config.is_interactive = interactive;
        if !interactive && self.drag.is_dragging {
            self.drag.cancel();
        }
    }

    pub fn set_radius(&mut self, radius: f64) {
        let mut radius = radius;
        check_number(
            &mut ValidationReport::default(),
            "radius",
            &mut radius,
            DEFAULT_RADIUS,
            |v| v > 0.0 && v <= 1.0,
            "in (0, 1]",
        );
        self.config.radius = radius;
        self.relayout();
    }

    pub fn set_offset(&mut self, offset: DVec2) {
        self.config.offset = if offset.is_finite() { offset } else { DVec2::ZERO };
        self.relayout();
    }

    pub fn set_item_background_colors(&mut self, colors: Vec<String>) {
        self.config.item_background_colors = colors;
        self.refresh_item_styles();
    }

    pub fn set_item_label_colors(&mut self, colors: Vec<String>) {
        self.config.item_label_colors = colors;
        self.refresh_item_styles();
    }

    // === Canvas layout ===

    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    /// Recompute geometry for a canvas of `width × height` device pixels
    pub fn resize(&mut self, width: f64, height: f64, host_pixel_ratio: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.layout.canvas_size = DVec2::new(width, height);
        self.host_pixel_ratio = if host_pixel_ratio.is_finite() && host_pixel_ratio > 0.0 {
            host_pixel_ratio
        } else {
            1.0
        };
        self.relayout();
    }

    fn relayout(&mut self) {
        let pixel_ratio = if self.config.pixel_ratio > 0.0 {
            self.config.pixel_ratio
        } else {
            self.host_pixel_ratio
        };
        let canvas = self.layout.canvas_size;
        let size = canvas.x.min(canvas.y);
        let actual_radius = size / 2.0 * self.config.radius;
        let offset = self.config.offset * (actual_radius * 2.0 / 100.0);

        self.layout.pixel_ratio = pixel_ratio;
        self.layout.size = size;
        self.layout.actual_radius = actual_radius;
        self.layout.center = canvas / 2.0 + offset;
        self.layout.label_max_width =
            actual_radius * (self.config.item_label_radius - self.config.item_label_radius_max).max(0.0);
        self.labels_dirty = true;
    }

    /// Resize and refit labels in one step
    pub fn refresh_layout(&mut self, width: f64, height: f64, host_pixel_ratio: f64, measure: &mut impl TextMeasure) {
        self.resize(width, height, host_pixel_ratio);
        self.fit_labels(measure);
    }

    /// Record where the canvas sits in the viewport (CSS pixels)
    pub fn set_canvas_origin(&mut self, origin: DVec2) {
        self.layout.canvas_origin = origin;
    }

    pub fn needs_label_fit(&self) -> bool {
        self.labels_dirty
    }

    /// Pick the shared label font size: the scaled maximum, shrunk so every
    /// label fits between the label radius and the inner label limit
    pub fn fit_labels(&mut self, measure: &mut impl TextMeasure) {
        let mut font_size = self.layout.scaled(self.config.item_label_font_size_max);
        let max_width = self.layout.label_max_width;
        for item in self.items.iter().filter(|i| i.has_label()) {
            let unit_width = measure.measure_text(item.label(), 1.0, &self.config.item_label_font);
            if unit_width > 0.0 {
                font_size = font_size.min(max_width / unit_width);
            }
        }
        self.layout.font_size = font_size.max(0.0);
        self.labels_dirty = false;
    }

    /// Convert a viewport point to canvas device pixels
    pub fn to_canvas_point(&self, point: DVec2) -> DVec2 {
        translate_to_canvas(point, self.layout.canvas_origin, self.layout.pixel_ratio)
    }

    /// Check if a viewport point lands on the wheel
    pub fn wheel_hit_test(&self, point: DVec2) -> bool {
        let p = self.to_canvas_point(point);
        is_point_in_circle(p, self.layout.center, self.layout.actual_radius)
    }

    // === Events ===

    pub(crate) fn emit(&mut self, event: WheelEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[WheelEvent] {
        &self.events
    }
}
