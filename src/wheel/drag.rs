//! Drag-to-spin gesture
//!
//! `Idle -> Dragging -> Idle`. While dragging the pointer owns rotation and
//! the tick leaves it alone. Each move records the angular distance covered;
//! on release the distances inside the capture window become the new speed.

use std::collections::VecDeque;

use glam::DVec2;

use super::events::{SpinEvent, SpinMethod, WheelEvent};
use super::state::Wheel;
use crate::consts::{DRAG_BUFFER_CAPACITY, DRAG_CAPTURE_PERIOD_MS, DRAG_RELEASE_MULTIPLIER};
use crate::geometry::{add_angle, angle_from_center, diff_angle};

/// Angular distance covered by one pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Signed degrees, positive clockwise
    pub distance: f64,
    pub at_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DragState {
    pub is_dragging: bool,
    /// `rotation - pointer angle` at drag start
    pub drag_delta: f64,
    pub last_angle: f64,
    /// Newest first
    pub samples: VecDeque<DragSample>,
}

impl DragState {
    fn begin(&mut self, angle: f64, drag_delta: f64) {
        self.is_dragging = true;
        self.drag_delta = drag_delta;
        self.last_angle = angle;
        self.samples.clear();
    }

    /// Drop the gesture without producing momentum
    pub fn cancel(&mut self) {
        self.is_dragging = false;
        self.samples.clear();
    }

    fn record(&mut self, sample: DragSample) {
        self.samples.push_front(sample);
        self.samples.truncate(DRAG_BUFFER_CAPACITY);
        while self
            .samples
            .back()
            .is_some_and(|s| sample.at_ms - s.at_ms > DRAG_CAPTURE_PERIOD_MS)
        {
            self.samples.pop_back();
        }
    }

    /// Total distance covered within the capture window ending at `now_ms`
    fn release_distance(&self, now_ms: f64) -> f64 {
        self.samples
            .iter()
            .filter(|s| now_ms - s.at_ms <= DRAG_CAPTURE_PERIOD_MS)
            .map(|s| s.distance)
            .sum()
    }
}

/// Raw pointer input in viewport (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(DVec2),
    Move(DVec2),
    Up(DVec2),
    /// The platform aborted the gesture
    Cancel,
    /// The pointer left the canvas
    Leave,
}

/// Cursor affordance for the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value (empty string restores the inherited cursor)
    pub fn as_css(&self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

pub fn cursor_for(is_dragging: bool, is_interactive: bool, is_over_wheel: bool) -> Cursor {
    if is_dragging {
        Cursor::Grabbing
    } else if is_interactive && is_over_wheel {
        Cursor::Grab
    } else {
        Cursor::Default
    }
}

impl Wheel {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    /// Buffered move samples, newest first
    pub fn drag_samples(&self) -> impl Iterator<Item = &DragSample> {
        self.drag.samples.iter()
    }

    /// Feed one pointer event through the gesture and return the cursor to show
    pub fn handle_pointer(&mut self, input: PointerInput, now_ms: f64) -> Cursor {
        match input {
            PointerInput::Down(point) => {
                self.is_cursor_over_wheel = self.wheel_hit_test(point);
                self.drag_start(point, now_ms);
            }
            PointerInput::Move(point) => {
                if self.drag.is_dragging {
                    self.drag_move(point, now_ms);
                } else {
                    self.is_cursor_over_wheel = self.wheel_hit_test(point);
                }
            }
            PointerInput::Up(point) => {
                if self.drag.is_dragging {
                    self.drag_end(now_ms);
                }
                self.is_cursor_over_wheel = self.wheel_hit_test(point);
            }
            PointerInput::Cancel => {
                if self.drag.is_dragging {
                    log::debug!("Drag cancelled");
                }
                self.drag.cancel();
            }
            PointerInput::Leave => self.is_cursor_over_wheel = false,
        }
        self.cursor()
    }

    /// Start a drag if `point` lands on an interactive wheel
    pub fn drag_start(&mut self, point: DVec2, _now_ms: f64) -> bool {
        if !self.config.is_interactive || !self.wheel_hit_test(point) {
            return false;
        }
        self.stop();
        let angle = angle_from_center(self.to_canvas_point(point), self.layout.center);
        self.drag.begin(angle, self.rotation - angle);
        log::debug!("Drag start at {angle:.2}°");
        true
    }

    pub fn drag_move(&mut self, point: DVec2, now_ms: f64) {
        if !self.drag.is_dragging {
            return;
        }
        let angle = angle_from_center(self.to_canvas_point(point), self.layout.center);
        let distance = diff_angle(angle, self.drag.last_angle);
        self.drag.last_angle = angle;
        self.drag.record(DragSample { distance, at_ms: now_ms });

        self.rotation = add_angle(angle, self.drag.drag_delta);
        self.refresh_current_index(true);
    }

    /// Release the drag, converting recent movement into momentum
    pub fn drag_end(&mut self, now_ms: f64) {
        if !self.drag.is_dragging {
            return;
        }
        let speed = self.drag.release_distance(now_ms) * DRAG_RELEASE_MULTIPLIER;
        self.drag.cancel();
        if speed == 0.0 {
            log::debug!("Drag released without momentum");
            return;
        }

        self.set_rotation_speed(speed);
        log::debug!("Drag released: speed={:.2}", self.rotation_speed);
        self.emit(WheelEvent::Spin(SpinEvent {
            method: SpinMethod::Drag,
            rotation_speed: self.rotation_speed,
            direction: self.rotation_direction,
            target_rotation: None,
            target_item_index: None,
            duration_ms: None,
        }));
    }

    pub fn cursor(&self) -> Cursor {
        cursor_for(self.drag.is_dragging, self.config.is_interactive, self.is_cursor_over_wheel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::wheel::state::tests::wheel_with;
    use crate::wheel::tick::advance;

    const CENTER: DVec2 = DVec2::new(250.0, 250.0);

    /// Viewport point 150px from the center at a wheel angle
    fn at(angle: f64) -> DVec2 {
        crate::geometry::point_on_circle(CENTER, 150.0, angle)
    }

    #[test]
    fn test_cursor_for() {
        assert_eq!(cursor_for(true, true, true), Cursor::Grabbing);
        assert_eq!(cursor_for(true, false, false), Cursor::Grabbing);
        assert_eq!(cursor_for(false, true, true), Cursor::Grab);
        assert_eq!(cursor_for(false, false, true), Cursor::Default);
        assert_eq!(cursor_for(false, true, false), Cursor::Default);
        assert_eq!(Cursor::Grab.as_css(), "grab");
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut wheel = wheel_with(&["a", "b", "c", "d"]);
        wheel.set_rotation(10.0);
        assert_eq!(wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0), Cursor::Grabbing);
        wheel.handle_pointer(PointerInput::Move(at(30.0)), 16.0);
        assert!((wheel.rotation() - 40.0).abs() < 1e-9);
        wheel.handle_pointer(PointerInput::Move(at(-60.0)), 32.0);
        // 10 + (-60) wraps into [0, 360)
        assert!((wheel.rotation() - 310.0).abs() < 1e-9);
    }

    #[test]
    fn test_release_speed_from_window() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        wheel.handle_pointer(PointerInput::Move(at(30.0)), 80.0);
        wheel.handle_pointer(PointerInput::Move(at(60.0)), 160.0);
        wheel.handle_pointer(PointerInput::Move(at(90.0)), 200.0);
        wheel.drain_events();
        let cursor = wheel.handle_pointer(PointerInput::Up(at(90.0)), 240.0);

        assert_eq!(cursor, Cursor::Grab);
        assert!(!wheel.is_dragging());
        assert!((wheel.rotation_speed() - 135.0).abs() < 1e-9);
        let events = wheel.drain_events();
        assert!(matches!(
            &events[..],
            [WheelEvent::Spin(SpinEvent { method: SpinMethod::Drag, direction: 1, .. })]
        ));
    }

    #[test]
    fn test_release_after_stale_samples_does_not_spin() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        wheel.handle_pointer(PointerInput::Move(at(45.0)), 10.0);
        wheel.handle_pointer(PointerInput::Move(at(90.0)), 20.0);
        wheel.handle_pointer(PointerInput::Up(at(90.0)), 1000.0);
        assert_eq!(wheel.rotation_speed(), 0.0);
        assert!(!wheel.drain_events().iter().any(WheelEvent::is_spin));
    }

    #[test]
    fn test_holding_still_catches_the_wheel() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        wheel.handle_pointer(PointerInput::Move(at(90.0)), 50.0);
        wheel.handle_pointer(PointerInput::Move(at(90.0)), 350.0);
        wheel.handle_pointer(PointerInput::Up(at(90.0)), 360.0);
        assert_eq!(wheel.rotation_speed(), 0.0);
    }

    #[test]
    fn test_drag_across_north_takes_short_arc() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(350.0)), 0.0);
        wheel.handle_pointer(PointerInput::Move(at(10.0)), 20.0);
        let newest = *wheel.drag_samples().next().unwrap();
        assert!((newest.distance - 20.0).abs() < 1e-9);

        wheel.handle_pointer(PointerInput::Move(at(350.0)), 40.0);
        let newest = *wheel.drag_samples().next().unwrap();
        assert!((newest.distance + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_counter_clockwise_release() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(90.0)), 0.0);
        wheel.handle_pointer(PointerInput::Move(at(60.0)), 50.0);
        wheel.handle_pointer(PointerInput::Up(at(60.0)), 100.0);
        assert!((wheel.rotation_speed() + 45.0).abs() < 1e-9);
        assert_eq!(wheel.rotation_direction(), -1);
    }

    #[test]
    fn test_release_clamped_to_max() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.set_rotation_speed_max(50.0);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        wheel.handle_pointer(PointerInput::Move(at(90.0)), 50.0);
        wheel.handle_pointer(PointerInput::Up(at(90.0)), 100.0);
        assert_eq!(wheel.rotation_speed(), 50.0);
    }

    #[test]
    fn test_sample_buffer_capacity() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        for i in 1..=100 {
            wheel.handle_pointer(PointerInput::Move(at(f64::from(i))), f64::from(i));
        }
        assert_eq!(wheel.drag_samples().count(), DRAG_BUFFER_CAPACITY);
        assert_eq!(wheel.drag_samples().next().unwrap().at_ms, 100.0);
    }

    #[test]
    fn test_down_outside_wheel_ignored() {
        let mut wheel = wheel_with(&["a", "b"]);
        let cursor = wheel.handle_pointer(PointerInput::Down(DVec2::new(2.0, 2.0)), 0.0);
        assert!(!wheel.is_dragging());
        assert_eq!(cursor, Cursor::Default);
    }

    #[test]
    fn test_not_interactive_ignores_drag() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.set_interactive(false);
        assert!(!wheel.drag_start(at(0.0), 0.0));
        assert_eq!(wheel.handle_pointer(PointerInput::Move(at(0.0)), 0.0), Cursor::Default);
    }

    #[test]
    fn test_hover_and_leave() {
        let mut wheel = wheel_with(&["a"]);
        assert_eq!(wheel.handle_pointer(PointerInput::Move(at(0.0)), 0.0), Cursor::Grab);
        assert_eq!(wheel.handle_pointer(PointerInput::Leave, 0.0), Cursor::Default);
    }

    #[test]
    fn test_tick_suspended_while_dragging() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.spin(100.0);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        assert_eq!(wheel.rotation_speed(), 0.0);
        let rotation = wheel.rotation();
        advance(&mut wheel, 1.0);
        assert_eq!(wheel.rotation(), rotation);
    }

    #[test]
    fn test_drag_cancels_tween() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.spin_to(720.0, 1000.0, Easing::Linear);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        assert!(!wheel.is_tweening());
        wheel.handle_pointer(PointerInput::Up(at(0.0)), 10.0);
        advance(&mut wheel, 2.0);
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn test_pointer_cancel_drops_momentum() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        wheel.handle_pointer(PointerInput::Move(at(90.0)), 50.0);
        wheel.handle_pointer(PointerInput::Cancel, 60.0);
        assert!(!wheel.is_dragging());
        assert_eq!(wheel.rotation_speed(), 0.0);
    }

    #[test]
    fn test_spin_during_drag_ends_gesture() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.handle_pointer(PointerInput::Down(at(0.0)), 0.0);
        wheel.spin(60.0);
        assert!(!wheel.is_dragging());
        assert_eq!(wheel.rotation_speed(), 60.0);
    }
}
