//! Notifications emitted to the host

use serde::Serialize;

/// How a spin was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpinMethod {
    /// `spin(speed)`
    Spin,
    /// Released after a drag gesture
    Drag,
    /// `spin_to(rotation, ..)`
    SpinTo,
    /// `spin_to_item(index, ..)`
    SpinToItem,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinEvent {
    pub method: SpinMethod,
    pub rotation_speed: f64,
    pub direction: i8,
    /// Tween destination (scripted spins only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_item_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WheelEvent {
    Spin(SpinEvent),
    /// The wheel came to a stop (fires once per stop)
    #[serde(rename_all = "camelCase")]
    Rest {
        current_index: Option<usize>,
        rotation: f64,
    },
    /// The item under the pointer changed
    #[serde(rename_all = "camelCase")]
    CurrentIndexChange { current_index: Option<usize> },
}

impl WheelEvent {
    pub fn is_rest(&self) -> bool {
        matches!(self, WheelEvent::Rest { .. })
    }

    pub fn is_spin(&self) -> bool {
        matches!(self, WheelEvent::Spin(_))
    }
}
