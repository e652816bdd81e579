//! Angle and point math for the wheel
//!
//! Wheel angles are in degrees with north at 0° and clockwise positive.
//! Canvas space is y-down, so "clockwise" matches the screen.

use glam::DVec2;

/// Degrees the canvas arc origin (east) sits from wheel north
pub const ARC_ADJUST: f64 = -90.0;

#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Add two angles, wrapping the result into [0, 360)
pub fn add_angle(a: f64, b: f64) -> f64 {
    let sum = (a + b).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if sum >= 360.0 { 0.0 } else { sum }
}

/// Signed shortest difference `a - b`, folded into [-180, 180]
pub fn diff_angle(a: f64, b: f64) -> f64 {
    let offset = a - b;
    if offset < -180.0 {
        offset + 360.0
    } else if offset > 180.0 {
        offset - 360.0
    } else {
        offset
    }
}

/// Check if `angle` lies in the arc `[start, end)`, wrapping through 0° when `start > end`.
///
/// All three values are expected in [0, 360).
pub fn is_angle_between(angle: f64, start: f64, end: f64) -> bool {
    if start < end {
        start <= angle && angle < end
    } else {
        start <= angle || angle < end
    }
}

/// Inclusive point-in-circle test
#[inline]
pub fn is_point_in_circle(point: DVec2, center: DVec2, radius: f64) -> bool {
    point.distance_squared(center) <= radius * radius
}

#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Convert a viewport point into canvas-local device pixels.
///
/// `origin` is the top-left of the canvas element's bounding box in viewport space.
pub fn translate_to_canvas(point: DVec2, origin: DVec2, pixel_ratio: f64) -> DVec2 {
    (point - origin) * pixel_ratio
}

/// Angle of `point` as seen from `center`, in wheel degrees [0, 360)
pub fn angle_from_center(point: DVec2, center: DVec2) -> f64 {
    let d = point - center;
    add_angle(rad_to_deg(d.y.atan2(d.x)), -ARC_ADJUST)
}

/// Point at `radius` from `center` along a wheel angle
pub fn point_on_circle(center: DVec2, radius: f64, angle: f64) -> DVec2 {
    let theta = deg_to_rad(angle + ARC_ADJUST);
    center + DVec2::new(theta.cos(), theta.sin()) * radius
}

/// Round away float drift (9 decimal places)
pub fn correct_float(value: f64) -> f64 {
    const SCALE: f64 = 1.0e9;
    let rounded = (value * SCALE).round() / SCALE;
    if rounded.is_finite() { rounded } else { value }
}

/// Sign of a rotation speed as -1, 0 or 1
pub fn rotation_direction(speed: f64) -> i8 {
    if speed > 0.0 {
        1
    } else if speed < 0.0 {
        -1
    } else {
        0
    }
}

/// Absolute wheel rotation that brings `target_angle` (relative to the pointer)
/// under the pointer, travelling from `current_rotation` in `direction`.
///
/// The returned delta is always in [0, 360) along the requested direction, so a
/// target already behind the wheel costs nearly a full turn rather than a reversal.
pub fn rotation_for_target_angle(current_rotation: f64, target_angle: f64, direction: i8) -> f64 {
    let angle = correct_float((current_rotation + target_angle).rem_euclid(360.0)) % 360.0;
    let delta = if direction < 0 {
        -angle
    } else {
        (360.0 - angle) % 360.0
    };
    correct_float(current_rotation + delta)
}
