//! Spin Wheel - a physically simulated prize wheel
//!
//! Core modules:
//! - `wheel`: Rotation physics, drag gestures, spin control and item layout
//! - `geometry`: Angle/point math (north = 0°, clockwise positive)
//! - `easing`: Tween curves for `spin_to` / `spin_to_item`
//! - `renderer`: Frame drawing against an abstract 2D surface
//! - `platform`: Host collaborators (frame loop, browser mounting)

pub mod easing;
pub mod error;
pub mod geometry;
pub mod platform;
pub mod renderer;
pub mod wheel;

pub use easing::Easing;
pub use error::{Result, WheelError};
pub use wheel::{
    Cursor, Item, ItemConfig, ItemId, ItemSpan, LabelAlign, PointerInput, SpinEvent,
    SpinMethod, ValidationReport, Wheel, WheelConfig, WheelEvent, tick,
};

/// Wheel configuration defaults and fixed tuning constants
pub mod consts {
    /// Wheel radius as a fraction of half the canvas size
    pub const DEFAULT_RADIUS: f64 = 0.95;
    /// Maximum absolute rotation speed (degrees/second)
    pub const DEFAULT_ROTATION_SPEED_MAX: f64 = 500.0;
    /// Deceleration while spinning freely (degrees/second²)
    pub const DEFAULT_ROTATION_RESISTANCE: f64 = -35.0;
    pub const DEFAULT_POINTER_ANGLE: f64 = 0.0;

    /// Label anchor distance as a fraction of the wheel radius
    pub const DEFAULT_ITEM_LABEL_RADIUS: f64 = 0.85;
    /// Innermost extent labels may reach, as a fraction of the wheel radius
    pub const DEFAULT_ITEM_LABEL_RADIUS_MAX: f64 = 0.2;
    pub const DEFAULT_ITEM_LABEL_ROTATION: f64 = 0.0;
    /// Vertical label nudge as a fraction of the font size
    pub const DEFAULT_ITEM_LABEL_BASELINE_OFFSET: f64 = 0.0;
    pub const DEFAULT_ITEM_LABEL_FONT: &str = "sans-serif";
    /// Largest label font size (pixels at the base canvas size)
    pub const DEFAULT_ITEM_LABEL_FONT_SIZE_MAX: f64 = 500.0;
    pub const DEFAULT_ITEM_LABEL_STROKE_COLOR: &str = "#fff";
    pub const DEFAULT_ITEM_LABEL_STROKE_WIDTH: f64 = 0.0;
    pub const DEFAULT_LINE_COLOR: &str = "#000";
    pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
    pub const DEFAULT_BORDER_COLOR: &str = "#000";
    pub const DEFAULT_BORDER_WIDTH: f64 = 0.0;

    /// Spin velocity jitter (±fraction of the requested speed)
    pub const DEFAULT_SPIN_JITTER: f64 = 0.15;

    /// Item defaults
    pub const DEFAULT_ITEM_WEIGHT: f64 = 1.0;
    pub const DEFAULT_ITEM_IMAGE_RADIUS: f64 = 0.5;
    pub const DEFAULT_ITEM_IMAGE_ROTATION: f64 = 0.0;
    pub const DEFAULT_ITEM_IMAGE_SCALE: f64 = 1.0;
    pub const DEFAULT_ITEM_IMAGE_OPACITY: f64 = 1.0;
    pub const FALLBACK_BACKGROUND_COLOR: &str = "#fff";
    pub const FALLBACK_LABEL_COLOR: &str = "#000";

    /// Trailing window of drag samples used for release velocity (ms)
    pub const DRAG_CAPTURE_PERIOD_MS: f64 = 250.0;
    /// Maximum drag samples retained while dragging
    pub const DRAG_BUFFER_CAPACITY: usize = 40;
    /// Release velocity = summed recent drag distance × this
    pub const DRAG_RELEASE_MULTIPLIER: f64 = 1.5;

    /// Longest simulated step a single frame may take (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Canvas size that style sizes (fonts, line widths) are authored against
    pub const BASE_CANVAS_SIZE: f64 = 500.0;
}
