//! Per-frame simulation tick
//!
//! Called once per display refresh with the frame timestamp. Within a tick,
//! rotation is integrated first, then the item under the pointer is
//! re-resolved, then rest/index events are queued. Rendering reads the
//! result afterwards.

use super::events::WheelEvent;
use super::state::Wheel;
use crate::consts::MAX_FRAME_DT;

/// Advance the wheel to the frame at `now_ms` and return the events produced
/// by this frame (they also stay queued for [`Wheel::drain_events`]).
///
/// The first tick only records the timestamp; a timestamp that goes
/// backwards advances nothing. Gaps longer than [`MAX_FRAME_DT`] (a tab
/// coming back from the background) advance by [`MAX_FRAME_DT`] only.
pub fn tick(wheel: &mut Wheel, now_ms: f64) -> Vec<WheelEvent> {
    if !now_ms.is_finite() {
        return Vec::new();
    }
    let dt = match wheel.last_frame_ms {
        Some(last) if now_ms > last => ((now_ms - last) / 1000.0).min(MAX_FRAME_DT),
        _ => 0.0,
    };
    wheel.last_frame_ms = Some(now_ms);

    let queued = wheel.events.len();
    advance(wheel, dt);
    wheel.events[queued..].to_vec()
}

/// Advance the wheel by `dt` seconds
pub fn advance(wheel: &mut Wheel, dt: f64) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    // Gesture owns rotation while dragging
    if wheel.drag.is_dragging {
        return;
    }
    if wheel.tween.is_some() {
        advance_tween(wheel, dt);
        return;
    }
    if wheel.rotation_speed == 0.0 {
        return;
    }

    wheel.rotation += wheel.rotation_speed * dt;
    wheel.refresh_current_index(true);

    // Resistance is negative, so multiplying by direction always pulls toward 0
    let direction = f64::from(wheel.rotation_direction);
    let next = wheel.rotation_speed + wheel.config.rotation_resistance * direction * dt;
    let stopped = (direction > 0.0 && next <= 0.0) || (direction < 0.0 && next >= 0.0);
    if stopped {
        wheel.come_to_rest();
    } else {
        wheel.rotation_speed = next;
    }
}

fn advance_tween(wheel: &mut Wheel, dt: f64) {
    let Some(mut tween) = wheel.tween.take() else {
        return;
    };
    tween.elapsed_ms += dt * 1000.0;
    let fraction = tween.elapsed_ms / tween.duration_ms;
    if fraction >= 1.0 {
        wheel.rotation = tween.target_rotation;
        wheel.refresh_current_index(true);
        wheel.come_to_rest();
        return;
    }

    let distance = tween.target_rotation - tween.start_rotation;
    wheel.rotation = tween.start_rotation + distance * tween.easing.apply(fraction);
    wheel.refresh_current_index(true);
    wheel.tween = Some(tween);
}

impl Wheel {
    /// Zero the speed and announce the stop
    pub(crate) fn come_to_rest(&mut self) {
        self.rotation_speed = 0.0;
        self.rotation_direction = 0;
        log::debug!(
            "Wheel at rest: rotation={:.3} current={:?}",
            self.rotation,
            self.current_index
        );
        self.emit(WheelEvent::Rest {
            current_index: self.current_index,
            rotation: self.rotation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::wheel::state::tests::wheel_with;

    fn rest_count(events: &[WheelEvent]) -> usize {
        events.iter().filter(|e| e.is_rest()).count()
    }

    #[test]
    fn test_first_tick_does_not_move() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.set_rotation_speed(100.0);
        tick(&mut wheel, 5000.0);
        assert_eq!(wheel.rotation(), 0.0);
        assert_eq!(wheel.rotation_speed(), 100.0);
        tick(&mut wheel, 5100.0);
        assert!((wheel.rotation() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_timestamp_advances_nothing() {
        let mut wheel = wheel_with(&["a"]);
        wheel.set_rotation_speed(100.0);
        tick(&mut wheel, 1000.0);
        tick(&mut wheel, 900.0);
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn test_deceleration_to_rest() {
        let mut wheel = wheel_with(&["a", "b", "c", "d"]);
        wheel.set_rotation_resistance(-10.0);
        wheel.spin(10.0);
        wheel.drain_events();

        for frame in 0..=5 {
            tick(&mut wheel, f64::from(frame) * 100.0);
        }
        assert!((wheel.rotation_speed() - 5.0).abs() < 1e-9);
        assert!((wheel.rotation() - 4.0).abs() < 1e-9);

        for frame in 6..=10 {
            tick(&mut wheel, f64::from(frame) * 100.0);
        }
        // Item 3 (270°..360° → 275.5°..5.5°) now holds the pointer
        assert_eq!(wheel.rotation_speed(), 0.0);
        assert_eq!(wheel.rotation_direction(), 0);
        assert!((wheel.rotation() - 5.5).abs() < 1e-9);

        assert!(tick(&mut wheel, 1100.0).is_empty());
        assert!(tick(&mut wheel, 1200.0).is_empty());
        let events = wheel.drain_events();
        assert_eq!(rest_count(&events), 1);
        let Some(&WheelEvent::Rest { current_index, rotation }) = events.last() else {
            panic!("expected a trailing rest event: {events:?}");
        };
        assert_eq!(current_index, Some(3));
        assert!((rotation - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_long_frame_gap_is_bounded() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.set_rotation_resistance(0.0);
        wheel.set_rotation_speed(100.0);
        tick(&mut wheel, 0.0);
        // Five seconds in the background moves the wheel one capped step
        tick(&mut wheel, 5000.0);
        assert!((wheel.rotation() - 100.0 * MAX_FRAME_DT).abs() < 1e-9);
        tick(&mut wheel, 5050.0);
        assert!((wheel.rotation() - 100.0 * (MAX_FRAME_DT + 0.05)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_spin_decelerates_toward_zero() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.set_rotation_resistance(-20.0);
        wheel.set_rotation_speed(-40.0);
        advance(&mut wheel, 1.0);
        assert!((wheel.rotation_speed() + 20.0).abs() < 1e-9);
        assert!((wheel.rotation() + 40.0).abs() < 1e-9);
        advance(&mut wheel, 1.0);
        assert_eq!(wheel.rotation_speed(), 0.0);
        assert_eq!(rest_count(&wheel.drain_events()), 1);
    }

    #[test]
    fn test_no_resistance_never_rests() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.set_rotation_resistance(0.0);
        wheel.set_rotation_speed(30.0);
        for _ in 0..100 {
            advance(&mut wheel, 0.1);
        }
        assert_eq!(wheel.rotation_speed(), 30.0);
        assert!((wheel.rotation() - 300.0).abs() < 1e-6);
        assert_eq!(rest_count(&wheel.drain_events()), 0);
    }

    #[test]
    fn test_index_change_events_while_spinning() {
        let mut wheel = wheel_with(&["a", "b", "c", "d"]);
        wheel.set_rotation_resistance(0.0);
        wheel.set_rotation_speed(-90.0);
        advance(&mut wheel, 0.5);
        // Rotation -45°: item 0 still covers 315°..45°
        assert!(wheel.drain_events().is_empty());
        advance(&mut wheel, 1.0);
        // Rotation -135°: item 1 (90°..180° → -45°..45°) now holds the pointer
        assert_eq!(wheel.current_index(), Some(1));
        assert_eq!(
            wheel.drain_events(),
            vec![WheelEvent::CurrentIndexChange { current_index: Some(1) }]
        );
    }

    #[test]
    fn test_tween_follows_easing() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.spin_to(100.0, 1000.0, Easing::Linear);
        advance(&mut wheel, 0.25);
        assert!((wheel.rotation() - 25.0).abs() < 1e-9);
        assert_eq!(wheel.rotation_speed(), 0.0);
        advance(&mut wheel, 0.25);
        assert!((wheel.rotation() - 50.0).abs() < 1e-9);
        advance(&mut wheel, 0.6);
        assert_eq!(wheel.rotation(), 100.0);
        assert!(!wheel.is_tweening());
        assert_eq!(rest_count(&wheel.drain_events()), 1);
    }

    #[test]
    fn test_default_easing_is_sine_out() {
        let mut wheel = wheel_with(&["a"]);
        wheel.spin_to(90.0, 1000.0, Easing::default());
        advance(&mut wheel, 0.5);
        let expected = 90.0 * std::f64::consts::FRAC_PI_4.sin();
        assert!((wheel.rotation() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_new_tween_replaces_running_one() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.spin_to(100.0, 1000.0, Easing::Linear);
        advance(&mut wheel, 0.5);
        wheel.spin_to(0.0, 1000.0, Easing::Linear);
        advance(&mut wheel, 0.5);
        assert!((wheel.rotation() - 25.0).abs() < 1e-9);
        advance(&mut wheel, 0.5);
        assert_eq!(wheel.rotation(), 0.0);
        assert!(!wheel.is_tweening());
    }

    #[test]
    fn test_stop_freezes_rotation() {
        let mut wheel = wheel_with(&["a", "b"]);
        wheel.spin(200.0);
        advance(&mut wheel, 0.1);
        let frozen = wheel.rotation();
        wheel.stop();
        wheel.stop();
        for _ in 0..10 {
            advance(&mut wheel, 0.1);
        }
        assert_eq!(wheel.rotation(), frozen);
        assert_eq!(wheel.rotation_speed(), 0.0);
    }
}
