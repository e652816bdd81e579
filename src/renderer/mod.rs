//! Wheel rendering
//!
//! Drawing goes through the [`Surface`] trait so the same frame can target a
//! browser canvas or a headless recorder. Rendering only reads wheel state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

use glam::DVec2;

use crate::geometry::{ARC_ADJUST, deg_to_rad, point_on_circle};
use crate::wheel::{LabelAlign, Wheel};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawOp, RecordingSurface};

/// Text width measurement, needed for label font fitting
pub trait TextMeasure {
    /// Width in pixels of `text` drawn at `font_size` px in `family`
    fn measure_text(&mut self, text: &str, font_size: f64, family: &str) -> f64;
}

/// Font and fill for one piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font_size: f64,
    pub family: &'a str,
    pub color: &'a str,
    pub align: LabelAlign,
}

/// A 2D drawing target in canvas device pixels.
///
/// Angles passed to the arc methods are canvas radians (0 = east, clockwise).
/// Transforms stack between `save` and `restore`.
pub trait Surface: TextMeasure {
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: DVec2);
    fn rotate(&mut self, radians: f64);
    fn set_global_alpha(&mut self, alpha: f64);

    fn fill_wedge(&mut self, center: DVec2, radius: f64, start: f64, end: f64, color: &str);
    /// Restrict drawing to a wedge until the next `restore`
    fn clip_wedge(&mut self, center: DVec2, radius: f64, start: f64, end: f64);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: &str);
    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: &str);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str);

    /// Text vertically centered on `position`, aligned per `style.align`
    fn fill_text(&mut self, text: &str, position: DVec2, style: &TextStyle<'_>);
    fn stroke_text(&mut self, text: &str, position: DVec2, style: &TextStyle<'_>, width: f64, color: &str);

    /// Natural size of a loaded image, `None` while it is missing
    fn image_size(&self, key: &str) -> Option<DVec2>;
    /// Draw a loaded image; returns false (drawing nothing) when it is missing
    fn draw_image(&mut self, key: &str, position: DVec2, size: DVec2) -> bool;
}

/// Draw one frame of `wheel`.
///
/// Order: wedges, item images, labels, dividers, border, wheel image,
/// overlay image, then debug guides.
pub fn render(wheel: &Wheel, surface: &mut impl Surface) {
    surface.clear();
    let layout = *wheel.layout();
    if layout.actual_radius <= 0.0 {
        return;
    }
    let config = wheel.config();
    let center = layout.center;
    let radius = layout.actual_radius;
    let spans = wheel.item_spans();

    for (item, span) in wheel.items().iter().zip(&spans) {
        if span.angular_span() <= 0.0 {
            continue;
        }
        surface.fill_wedge(
            center,
            radius,
            deg_to_rad(span.start + ARC_ADJUST),
            deg_to_rad(span.end + ARC_ADJUST),
            &item.background_color,
        );
    }

    for (item, span) in wheel.items().iter().zip(&spans) {
        let Some(key) = item.config.image.as_deref() else {
            continue;
        };
        let Some(natural) = surface.image_size(key) else {
            continue;
        };
        let angle = span.center();
        let size = natural * layout.scaled(item.config.image_scale);
        let position = point_on_circle(center, radius * item.config.image_radius, angle);

        surface.save();
        surface.translate(position);
        surface.rotate(deg_to_rad(angle + item.config.image_rotation));
        surface.set_global_alpha(item.config.image_opacity);
        surface.draw_image(key, -size / 2.0, size);
        surface.restore();
    }

    if layout.font_size > 0.0 {
        draw_labels(wheel, surface, &spans);
    }

    if config.line_width > 0.0 && spans.len() > 1 {
        let width = layout.scaled(config.line_width);
        for span in &spans {
            surface.stroke_line(center, point_on_circle(center, radius, span.start), width, &config.line_color);
        }
    }

    if config.border_width > 0.0 {
        let width = layout.scaled(config.border_width);
        surface.stroke_circle(center, radius - width / 2.0, width, &config.border_color);
    }

    if let Some(key) = config.image.as_deref() {
        let size = DVec2::splat(layout.size * config.radius);
        surface.save();
        surface.translate(center);
        surface.rotate(deg_to_rad(wheel.rotation()));
        surface.draw_image(key, -size / 2.0, size);
        surface.restore();
    }

    if let Some(key) = config.overlay_image.as_deref() {
        let size = DVec2::splat(layout.size);
        surface.draw_image(key, layout.canvas_size / 2.0 - size / 2.0, size);
    }

    if config.debug {
        draw_debug(wheel, surface);
    }
}

fn draw_labels(wheel: &Wheel, surface: &mut impl Surface, spans: &[crate::wheel::ItemSpan]) {
    let layout = wheel.layout();
    let config = wheel.config();
    let center = layout.center;
    let radius = layout.actual_radius;
    let stroke_width = layout.scaled(config.item_label_stroke_width);
    // Anchor sits on the label radius, nudged off the wedge's center line
    let anchor = DVec2::new(
        radius * config.item_label_radius,
        config.item_label_baseline_offset * layout.font_size,
    );

    for (item, span) in wheel.items().iter().zip(spans) {
        if !item.has_label() || span.angular_span() <= 0.0 {
            continue;
        }
        let style = TextStyle {
            font_size: layout.font_size,
            family: &config.item_label_font,
            color: &item.label_color,
            align: config.item_label_align,
        };

        surface.save();
        surface.clip_wedge(
            center,
            radius,
            deg_to_rad(span.start + ARC_ADJUST),
            deg_to_rad(span.end + ARC_ADJUST),
        );
        surface.translate(center);
        surface.rotate(deg_to_rad(span.center() + ARC_ADJUST + config.item_label_rotation));
        if stroke_width > 0.0 {
            surface.stroke_text(item.label(), anchor, &style, stroke_width, &config.item_label_stroke_color);
        }
        surface.fill_text(item.label(), anchor, &style);
        surface.restore();
    }
}

fn draw_debug(wheel: &Wheel, surface: &mut impl Surface) {
    let layout = wheel.layout();
    let config = wheel.config();
    let center = layout.center;
    let radius = layout.actual_radius;

    surface.fill_circle(center, layout.scaled(3.0), "#000");
    surface.stroke_circle(center, radius * config.item_label_radius, 1.0, "#0f0");
    surface.stroke_circle(center, radius * config.item_label_radius_max, 1.0, "#f00");
    surface.stroke_line(
        center,
        point_on_circle(center, radius, config.pointer_angle),
        layout.scaled(2.0),
        "#f0f",
    );
}
