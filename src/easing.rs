//! Easing curves for scripted rotation tweens

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Maps elapsed fraction `t ∈ [0, 1]` to progress
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    SineIn,
    #[default]
    SineOut,
    SineInOut,
    CubicOut,
    QuintOut,
    ExpoOut,
    BackOut,
    /// Caller-supplied curve (not serializable)
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Evaluate the curve, clamping `t` to [0, 1]
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Easing::SineOut => (t * FRAC_PI_2).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Easing::BackOut => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Easing::Custom(f) => f(t),
        }
    }

    /// Look up a curve by its option name (`"cubicOut"`); unknown names fall
    /// back to the default
    pub fn from_name(name: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(name.to_owned())).unwrap_or_else(|_| {
            log::warn!("Unknown easing `{name}`, using the default");
            Self::default()
        })
    }
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Custom(a), Easing::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::CubicOut,
        Easing::QuintOut,
        Easing::ExpoOut,
        Easing::BackOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_sine_out_midpoint() {
        let expected = (std::f64::consts::FRAC_PI_4).sin();
        assert!((Easing::SineOut.apply(0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_custom_curve() {
        fn square(t: f64) -> f64 {
            t * t
        }
        assert_eq!(Easing::Custom(square).apply(0.5), 0.25);
        assert_ne!(Easing::Custom(square), Easing::Linear);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Easing::from_name("cubicOut"), Easing::CubicOut);
        assert_eq!(Easing::from_name("linear"), Easing::Linear);
        assert_eq!(Easing::from_name("wobble"), Easing::SineOut);
        assert_eq!(Easing::from_name(""), Easing::default());
    }
}
