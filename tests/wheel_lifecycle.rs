//! End-to-end wheel runs against the recording surface

use glam::DVec2;
use spin_wheel::geometry::point_on_circle;
use spin_wheel::renderer::{DrawOp, RecordingSurface, render};
use spin_wheel::{Easing, ItemConfig, PointerInput, SpinMethod, Wheel, WheelConfig, WheelEvent, tick};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn mounted_wheel(labels: &[&str]) -> (Wheel, RecordingSurface) {
    let mut wheel = Wheel::new(WheelConfig {
        items: labels.iter().map(|l| ItemConfig::new(*l)).collect(),
        seed: Some(11),
        ..Default::default()
    });
    let mut surface = RecordingSurface::new(600.0, 400.0);
    wheel.refresh_layout(600.0, 400.0, 1.0, &mut surface);
    (wheel, surface)
}

/// Tick and render at 60 fps until rest, returning every event
fn run_until_rest(wheel: &mut Wheel, surface: &mut RecordingSurface, start_ms: f64) -> Vec<WheelEvent> {
    let mut events = Vec::new();
    let mut now = start_ms;
    while now < start_ms + 120_000.0 {
        let frame = tick(wheel, now);
        render(wheel, surface);
        let rested = frame.iter().any(WheelEvent::is_rest);
        events.extend(frame);
        if rested {
            break;
        }
        now += FRAME_MS;
    }
    wheel.drain_events();
    events
}

#[test]
fn test_spin_decelerates_to_single_rest() {
    let (mut wheel, mut surface) = mounted_wheel(&["a", "b", "c", "d", "e", "f"]);
    wheel.spin(300.0);
    let spin_speed = wheel.rotation_speed();
    assert!((255.0..=345.0).contains(&spin_speed));

    let events = run_until_rest(&mut wheel, &mut surface, 0.0);
    assert_eq!(events.iter().filter(|e| e.is_rest()).count(), 1);
    assert_eq!(wheel.rotation_speed(), 0.0);

    let Some(WheelEvent::Rest { current_index, rotation }) = events.last() else {
        panic!("last event should be rest: {events:?}");
    };
    assert_eq!(*current_index, wheel.current_index());
    assert_eq!(*rotation, wheel.rotation());
    // v² / 2a with the default 35°/s² resistance, within one frame of error
    let expected = spin_speed * spin_speed / 70.0;
    assert!((wheel.rotation() - expected).abs() < spin_speed * FRAME_MS / 1000.0 + 1.0);

    // Further frames stay quiet
    for i in 1..30 {
        assert!(tick(&mut wheel, 200_000.0 + f64::from(i) * FRAME_MS).is_empty());
    }
}

#[test]
fn test_index_changes_match_final_item() {
    let (mut wheel, mut surface) = mounted_wheel(&["a", "b", "c"]);
    wheel.spin(200.0);
    let events = run_until_rest(&mut wheel, &mut surface, 0.0);
    let last_change = events.iter().rev().find_map(|e| match e {
        WheelEvent::CurrentIndexChange { current_index } => Some(*current_index),
        _ => None,
    });
    if let Some(last_change) = last_change {
        assert_eq!(last_change, wheel.current_index());
    }
}

#[test]
fn test_drag_release_then_coast() {
    let (mut wheel, mut surface) = mounted_wheel(&["a", "b", "c", "d"]);
    let center = wheel.layout().center;
    let at = |angle: f64| point_on_circle(center, 120.0, angle);

    wheel.handle_pointer(PointerInput::Down(at(0.0)), 1000.0);
    for step in 1..=6 {
        let t = 1000.0 + f64::from(step) * 20.0;
        wheel.handle_pointer(PointerInput::Move(at(f64::from(step) * 10.0)), t);
        tick(&mut wheel, t);
    }
    assert!(wheel.is_dragging());
    assert!((wheel.rotation() - 60.0).abs() < 1e-9);
    wheel.handle_pointer(PointerInput::Up(at(60.0)), 1130.0);

    assert!((wheel.rotation_speed() - 90.0).abs() < 1e-9);
    let spin = wheel
        .pending_events()
        .iter()
        .find_map(|e| match e {
            WheelEvent::Spin(spin) => Some(spin.method),
            _ => None,
        });
    assert_eq!(spin, Some(SpinMethod::Drag));

    let events = run_until_rest(&mut wheel, &mut surface, 1130.0);
    assert_eq!(events.iter().filter(|e| e.is_rest()).count(), 1);
    assert!(wheel.rotation() > 60.0);
}

#[test]
fn test_spin_to_item_lands_on_item_over_frames() {
    let (mut wheel, mut surface) = mounted_wheel(&["a", "b", "c", "d", "e"]);
    let target = wheel.spin_to_item(3, 4000.0, false, 3, 1, Easing::default()).unwrap();
    assert!(target >= wheel.rotation() + 3.0 * 360.0);

    let events = run_until_rest(&mut wheel, &mut surface, 0.0);
    assert_eq!(wheel.rotation(), target);
    assert_eq!(wheel.current_index(), Some(3));
    assert!(matches!(
        events.last(),
        Some(WheelEvent::Rest { current_index: Some(3), .. })
    ));
}

#[test]
fn test_stop_mid_tween_then_spin_again() {
    let (mut wheel, mut surface) = mounted_wheel(&["a", "b"]);
    wheel.spin_to(720.0, 2000.0, Easing::Linear);
    for i in 0..30 {
        tick(&mut wheel, f64::from(i) * FRAME_MS);
    }
    wheel.stop();
    let frozen = wheel.rotation();
    assert!(frozen > 0.0 && frozen < 720.0);
    for i in 30..60 {
        tick(&mut wheel, f64::from(i) * FRAME_MS);
    }
    assert_eq!(wheel.rotation(), frozen);

    wheel.spin(-100.0);
    let events = run_until_rest(&mut wheel, &mut surface, 60.0 * FRAME_MS);
    assert!(wheel.rotation() < frozen);
    assert_eq!(events.iter().filter(|e| e.is_rest()).count(), 1);
}

#[test]
fn test_rendered_frame_tracks_rotation() {
    let (mut wheel, mut surface) = mounted_wheel(&["a", "b", "c", "d"]);
    wheel.set_rotation(45.0);
    render(&wheel, &mut surface);
    let first_wedge = surface.ops().iter().find_map(|op| match op {
        DrawOp::FillWedge { center, start, .. } => Some((*center, *start)),
        _ => None,
    });
    let (center, start) = first_wedge.unwrap();
    assert_eq!(center, DVec2::new(300.0, 200.0));
    assert!((start - (-45.0f64).to_radians()).abs() < 1e-12);
}

#[test]
fn test_json_options_drive_the_wheel() {
    let (mut wheel, report) = Wheel::from_json(
        r#"{
            "items": [{"label": "x", "weight": 3}, {"label": "y"}],
            "rotationResistance": "fast",
            "spinJitter": 0,
            "pointerAngle": 90
        }"#,
    )
    .unwrap();
    assert!(report.has_field("rotationResistance"));
    assert_eq!(wheel.pointer_angle(), 90.0);
    // Item x spans 0°..270°, so the east pointer starts over it
    assert_eq!(wheel.current_index(), Some(0));
    wheel.spin(50.0);
    assert_eq!(wheel.rotation_speed(), 50.0);
}

#[test]
fn test_bad_item_field_keeps_the_wheel_full() {
    let (wheel, report) =
        Wheel::from_json(r#"{"items":[{"label":"a"},{"label":"b","weight":"heavy"},{"label":"c"}]}"#).unwrap();
    assert_eq!(wheel.items().len(), 3);
    assert_eq!(wheel.items()[1].weight, 1.0);
    assert!(report.has_field("items[1].weight"));
    assert_eq!(wheel.weighted_item_angle(), 120.0);
}
