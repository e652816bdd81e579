//! `CanvasRenderingContext2d` surface

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Surface, TextMeasure, TextStyle};
use crate::error::{Result, WheelError};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| WheelError::Surface(format!("get_context failed: {e:?}")))?
            .ok_or_else(|| WheelError::Surface("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WheelError::Surface("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Start loading `src` under `key`. Until it decodes, drawing it is a no-op.
    pub fn load_image(&mut self, key: &str, src: &str) -> Result<()> {
        let image = HtmlImageElement::new().map_err(|e| WheelError::Surface(format!("{e:?}")))?;
        let failed_key = key.to_string();
        let failed_src = src.to_string();
        let on_error = Closure::once_into_js(move || {
            log::warn!("Image `{failed_key}` failed to load from {failed_src}");
        });
        image.set_onerror(Some(on_error.unchecked_ref()));
        image.set_src(src);
        self.images.insert(key.to_string(), image);
        Ok(())
    }

    fn loaded(&self, key: &str) -> Option<&HtmlImageElement> {
        self.images
            .get(key)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    fn set_font(&self, style: &TextStyle<'_>) {
        self.ctx.set_font(&format!("{}px {}", style.font_size, style.family));
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_text_baseline("middle");
    }
}

impl TextMeasure for CanvasSurface {
    fn measure_text(&mut self, text: &str, font_size: f64, family: &str) -> f64 {
        self.ctx.set_font(&format!("{font_size}px {family}"));
        self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.set_global_alpha(1.0);
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.canvas.width()), f64::from(self.canvas.height()));
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: DVec2) {
        let _ = self.ctx.translate(offset.x, offset.y);
    }

    fn rotate(&mut self, radians: f64) {
        let _ = self.ctx.rotate(radians);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn fill_wedge(&mut self, center: DVec2, radius: f64, start: f64, end: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.move_to(center.x, center.y);
        let _ = self.ctx.arc(center.x, center.y, radius, start, end);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn clip_wedge(&mut self, center: DVec2, radius: f64, start: f64, end: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(center.x, center.y);
        let _ = self.ctx.arc(center.x, center.y, radius, start, end);
        self.ctx.close_path();
        self.ctx.clip();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, position: DVec2, style: &TextStyle<'_>) {
        self.set_font(style);
        self.ctx.set_fill_style_str(style.color);
        let _ = self.ctx.fill_text(text, position.x, position.y);
    }

    fn stroke_text(&mut self, text: &str, position: DVec2, style: &TextStyle<'_>, width: f64, color: &str) {
        self.set_font(style);
        self.ctx.set_line_join("round");
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(color);
        let _ = self.ctx.stroke_text(text, position.x, position.y);
    }

    fn image_size(&self, key: &str) -> Option<DVec2> {
        self.loaded(key)
            .map(|img| DVec2::new(f64::from(img.natural_width()), f64::from(img.natural_height())))
    }

    fn draw_image(&mut self, key: &str, position: DVec2, size: DVec2) -> bool {
        let Some(image) = self.loaded(key) else {
            return false;
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, position.x, position.y, size.x, size.y)
            .is_ok()
    }
}
