//! Programmatic spin control
//!
//! `spin` injects velocity into the free-spin physics; `spin_to` and
//! `spin_to_item` start a scripted tween that the frame tick advances.
//! Every entry point supersedes whatever motion was in flight.

use rand::Rng;

use super::events::{SpinEvent, SpinMethod, WheelEvent};
use super::state::Wheel;
use crate::easing::Easing;
use crate::error::Result;
use crate::geometry::{correct_float, rotation_direction, rotation_for_target_angle};

/// In-flight scripted rotation
#[derive(Debug, Clone)]
pub(crate) struct Tween {
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: f64,
    /// Accumulated tick time since the tween started
    pub elapsed_ms: f64,
    pub easing: Easing,
}

impl Wheel {
    /// Add a jittered impulse of `speed` degrees/second.
    ///
    /// The applied delta lies within `±spin_jitter` of `speed` and keeps its
    /// sign; the result is clamped to `rotation_speed_max`.
    pub fn spin(&mut self, speed: f64) {
        if !speed.is_finite() {
            log::warn!("Ignoring spin with non-finite speed {speed}");
            return;
        }
        self.drag.cancel();
        self.cancel_motion();

        let jitter = self.config.spin_jitter;
        let factor = if jitter > 0.0 {
            self.rng.random_range((1.0 - jitter)..=(1.0 + jitter))
        } else {
            1.0
        };
        self.set_rotation_speed(self.rotation_speed + speed * factor);
        log::debug!("Spin: speed={:.2} direction={}", self.rotation_speed, self.rotation_direction);
        self.emit(WheelEvent::Spin(SpinEvent {
            method: SpinMethod::Spin,
            rotation_speed: self.rotation_speed,
            direction: self.rotation_direction,
            target_rotation: None,
            target_item_index: None,
            duration_ms: None,
        }));
    }

    /// Tween to an absolute `rotation` over `duration_ms`.
    ///
    /// The target is used as given (no mod-360 wrapping). A zero or negative
    /// duration lands immediately.
    pub fn spin_to(&mut self, rotation: f64, duration_ms: f64, easing: Easing) {
        if !rotation.is_finite() || !duration_ms.is_finite() {
            log::warn!("Ignoring spin_to({rotation}, {duration_ms}) with non-finite arguments");
            return;
        }
        self.begin_tween(rotation, duration_ms, easing, SpinMethod::SpinTo, None);
    }

    /// Tween so the item at `index` ends up under the pointer.
    ///
    /// Lands on the item's center when `spin_to_center` is set, otherwise on a
    /// random angle inside it. `direction` picks the way round (negative for
    /// anticlockwise) and `revolutions` adds full turns on top of the shortest
    /// path. Returns the target rotation.
    pub fn spin_to_item(
        &mut self,
        index: usize,
        duration_ms: f64,
        spin_to_center: bool,
        revolutions: u32,
        direction: i8,
        easing: Easing,
    ) -> Result<f64> {
        self.check_index(index)?;
        let direction: i8 = if direction < 0 { -1 } else { 1 };
        let item_angle = if spin_to_center {
            self.item_center_angle(index)?
        } else {
            self.item_random_angle(index)?
        };

        let aligned = rotation_for_target_angle(self.rotation, item_angle - self.config.pointer_angle, direction);
        let target = correct_float(aligned + f64::from(revolutions) * 360.0 * f64::from(direction));

        let duration_ms = if duration_ms.is_finite() { duration_ms } else { 0.0 };
        self.begin_tween(target, duration_ms, easing, SpinMethod::SpinToItem, Some(index));
        Ok(target)
    }

    /// Halt immediately, dropping any tween. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.cancel_motion();
        self.rotation_speed = 0.0;
        self.rotation_direction = 0;
    }

    fn begin_tween(
        &mut self,
        target: f64,
        duration_ms: f64,
        easing: Easing,
        method: SpinMethod,
        target_item_index: Option<usize>,
    ) {
        self.drag.cancel();
        self.stop();
        let duration_ms = duration_ms.max(0.0);
        log::debug!(
            "Tween {:?}: {:.3} -> {:.3} over {}ms",
            method,
            self.rotation,
            target,
            duration_ms
        );
        self.emit(WheelEvent::Spin(SpinEvent {
            method,
            rotation_speed: 0.0,
            direction: rotation_direction(target - self.rotation),
            target_rotation: Some(target),
            target_item_index,
            duration_ms: Some(duration_ms),
        }));

        if duration_ms <= 0.0 {
            self.rotation = target;
            self.refresh_current_index(true);
            self.come_to_rest();
            return;
        }
        self.tween = Some(Tween {
            start_rotation: self.rotation,
            target_rotation: target,
            duration_ms,
            elapsed_ms: 0.0,
            easing,
        });
    }
}
