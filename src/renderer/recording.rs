//! Headless surface that records draw calls
//!
//! Used for native runs and tests. Text is measured as a fixed-width font
//! (each glyph half the font size wide).

use std::collections::HashMap;

use glam::DVec2;

use super::{Surface, TextMeasure, TextStyle};
use crate::wheel::LabelAlign;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    Translate(DVec2),
    Rotate(f64),
    GlobalAlpha(f64),
    FillWedge {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
        color: String,
    },
    ClipWedge {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
    },
    StrokeLine {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: String,
    },
    StrokeCircle {
        center: DVec2,
        radius: f64,
        width: f64,
        color: String,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: String,
    },
    FillText {
        text: String,
        position: DVec2,
        font_size: f64,
        color: String,
        align: LabelAlign,
    },
    StrokeText {
        text: String,
        position: DVec2,
        width: f64,
        color: String,
    },
    Image {
        key: String,
        position: DVec2,
        size: DVec2,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: DVec2,
    images: HashMap<String, DVec2>,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            ..Default::default()
        }
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    /// Register a "loaded" image of the given natural size
    pub fn add_image(&mut self, key: impl Into<String>, size: DVec2) {
        self.images.insert(key.into(), size);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Take the recorded ops, leaving the surface empty
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&mut self, text: &str, font_size: f64, _family: &str) -> f64 {
        text.chars().count() as f64 * font_size * 0.5
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, offset: DVec2) {
        self.ops.push(DrawOp::Translate(offset));
    }

    fn rotate(&mut self, radians: f64) {
        self.ops.push(DrawOp::Rotate(radians));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::GlobalAlpha(alpha));
    }

    fn fill_wedge(&mut self, center: DVec2, radius: f64, start: f64, end: f64, color: &str) {
        self.ops.push(DrawOp::FillWedge {
            center,
            radius,
            start,
            end,
            color: color.to_string(),
        });
    }

    fn clip_wedge(&mut self, center: DVec2, radius: f64, start: f64, end: f64) {
        self.ops.push(DrawOp::ClipWedge {
            center,
            radius,
            start,
            end,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: &str) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            width,
            color: color.to_string(),
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: &str) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            width,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, position: DVec2, style: &TextStyle<'_>) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            position,
            font_size: style.font_size,
            color: style.color.to_string(),
            align: style.align,
        });
    }

    fn stroke_text(&mut self, text: &str, position: DVec2, _style: &TextStyle<'_>, width: f64, color: &str) {
        self.ops.push(DrawOp::StrokeText {
            text: text.to_string(),
            position,
            width,
            color: color.to_string(),
        });
    }

    fn image_size(&self, key: &str) -> Option<DVec2> {
        self.images.get(key).copied()
    }

    fn draw_image(&mut self, key: &str, position: DVec2, size: DVec2) -> bool {
        if !self.images.contains_key(key) {
            return false;
        }
        self.ops.push(DrawOp::Image {
            key: key.to_string(),
            position,
            size,
        });
        true
    }
}
