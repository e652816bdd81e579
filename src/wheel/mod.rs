//! Wheel simulation module
//!
//! Owns the wheel state and everything that mutates it: options, items and
//! their layout, the per-frame tick, pointer gestures and spin control.

pub mod config;
pub mod drag;
pub mod events;
pub mod item;
pub mod layout;
pub mod spin;
pub mod state;
pub mod tick;

pub use config::{LabelAlign, ValidationIssue, ValidationReport, WheelConfig};
pub use drag::{Cursor, DragSample, PointerInput, cursor_for};
pub use events::{SpinEvent, SpinMethod, WheelEvent};
pub use item::{Item, ItemConfig, ItemId};
pub use layout::ItemSpan;
pub use state::{CanvasLayout, Wheel};
pub use tick::{advance, tick};
