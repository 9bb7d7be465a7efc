//! Easing functions for scroll animations
//!
//! Classic Penner curves in absolute form: every curve maps
//! `(t, b, c, d)` (elapsed time, begin value, change, duration) to the eased
//! value at `t`.

use crate::error::AnimationError;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
}

impl Easing {
    /// Every curve, in declaration order
    pub const ALL: [Easing; 22] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
        Easing::CircIn,
        Easing::CircOut,
        Easing::CircInOut,
    ];

    /// Compute the eased value at elapsed time `t`
    ///
    /// `b` is the start value, `c` the total change and `d` the duration, which
    /// must be non-zero. `t == 0` yields exactly `b` and `t == d` exactly
    /// `b + c` for every curve. Outside `[0, d]` the formulas are continued
    /// as-is, no clamping is applied.
    pub fn compute(self, t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t == 0.0 {
            return b;
        }
        if t == d {
            return b + c;
        }

        match self {
            Easing::Linear => c * t / d + b,

            Easing::QuadIn => {
                let t = t / d;
                c * t * t + b
            }
            Easing::QuadOut => {
                let t = t / d;
                -c * t * (t - 2.0) + b
            }
            Easing::QuadInOut => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t + b
                } else {
                    let t = t - 1.0;
                    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
                }
            }

            Easing::CubicIn => c * (t / d).powi(3) + b,
            Easing::CubicOut => {
                let t = t / d - 1.0;
                c * (t.powi(3) + 1.0) + b
            }
            Easing::CubicInOut => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(3) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t.powi(3) + 2.0) + b
                }
            }

            Easing::QuartIn => c * (t / d).powi(4) + b,
            Easing::QuartOut => {
                let t = t / d - 1.0;
                -c * (t.powi(4) - 1.0) + b
            }
            Easing::QuartInOut => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(4) + b
                } else {
                    let t = t - 2.0;
                    -c / 2.0 * (t.powi(4) - 2.0) + b
                }
            }

            Easing::QuintIn => c * (t / d).powi(5) + b,
            Easing::QuintOut => {
                let t = t / d - 1.0;
                c * (t.powi(5) + 1.0) + b
            }
            Easing::QuintInOut => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(5) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t.powi(5) + 2.0) + b
                }
            }

            Easing::SineIn => -c * (t / d * (PI / 2.0)).cos() + c + b,
            Easing::SineOut => c * (t / d * (PI / 2.0)).sin() + b,
            Easing::SineInOut => -c / 2.0 * ((PI * t / d).cos() - 1.0) + b,

            Easing::ExpoIn => c * 2f32.powf(10.0 * (t / d - 1.0)) + b,
            Easing::ExpoOut => c * (-(2f32.powf(-10.0 * t / d)) + 1.0) + b,
            Easing::ExpoInOut => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * 2f32.powf(10.0 * (t - 1.0)) + b
                } else {
                    let t = t - 1.0;
                    c / 2.0 * (-(2f32.powf(-10.0 * t)) + 2.0) + b
                }
            }

            Easing::CircIn => {
                let t = t / d;
                -c * ((1.0 - t * t).sqrt() - 1.0) + b
            }
            Easing::CircOut => {
                let t = t / d - 1.0;
                c * (1.0 - t * t).sqrt() + b
            }
            Easing::CircInOut => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
                }
            }
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(self, progress: f32) -> f32 {
        self.compute(progress, 0.0, 1.0, 1.0)
    }

    /// Kebab-case name, as accepted by [`FromStr`] and serde
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad-in",
            Easing::QuadOut => "quad-out",
            Easing::QuadInOut => "quad-in-out",
            Easing::CubicIn => "cubic-in",
            Easing::CubicOut => "cubic-out",
            Easing::CubicInOut => "cubic-in-out",
            Easing::QuartIn => "quart-in",
            Easing::QuartOut => "quart-out",
            Easing::QuartInOut => "quart-in-out",
            Easing::QuintIn => "quint-in",
            Easing::QuintOut => "quint-out",
            Easing::QuintInOut => "quint-in-out",
            Easing::SineIn => "sine-in",
            Easing::SineOut => "sine-out",
            Easing::SineInOut => "sine-in-out",
            Easing::ExpoIn => "expo-in",
            Easing::ExpoOut => "expo-out",
            Easing::ExpoInOut => "expo-in-out",
            Easing::CircIn => "circ-in",
            Easing::CircOut => "circ-out",
            Easing::CircInOut => "circ-in-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    /// Parses kebab-case, snake_case and camelCase spellings alike
    /// (`sine-in-out`, `sine_in_out`, `sineInOut`). `circle` is accepted for
    /// `circ`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let folded = folded.replacen("circle", "circ", 1);

        Easing::ALL
            .iter()
            .copied()
            .find(|easing| easing.name().replace('-', "") == folded)
            .ok_or_else(|| AnimationError::UnknownEasing(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASES: [(f32, f32, f32); 5] = [
        (0.0, 500.0, 0.25),
        (120.0, -75.5, 1.0),
        (-3.0, 0.1, 0.016),
        (1e4, 333.3, 7.5),
        (42.0, 0.0, 2.0),
    ];

    #[test]
    fn test_boundaries_are_exact() {
        for easing in Easing::ALL {
            for (b, c, d) in CASES {
                assert_eq!(easing.compute(0.0, b, c, d), b, "{easing} at t=0");
                assert_eq!(easing.compute(d, b, c, d), b + c, "{easing} at t=d");
            }
        }
    }

    #[test]
    fn test_in_out_midpoint_is_half_way() {
        let in_outs = [
            Easing::QuadInOut,
            Easing::CubicInOut,
            Easing::QuartInOut,
            Easing::QuintInOut,
            Easing::SineInOut,
            Easing::ExpoInOut,
            Easing::CircInOut,
        ];
        for easing in in_outs {
            let mid = easing.compute(0.5, 10.0, 100.0, 1.0);
            assert!((mid - 60.0).abs() < 1e-3, "{easing} midpoint was {mid}");
        }
    }

    #[test]
    fn test_in_curves_lag_and_out_curves_lead() {
        let pairs = [
            (Easing::QuadIn, Easing::QuadOut),
            (Easing::CubicIn, Easing::CubicOut),
            (Easing::QuartIn, Easing::QuartOut),
            (Easing::QuintIn, Easing::QuintOut),
            (Easing::SineIn, Easing::SineOut),
            (Easing::ExpoIn, Easing::ExpoOut),
            (Easing::CircIn, Easing::CircOut),
        ];
        for (ease_in, ease_out) in pairs {
            for p in [0.1, 0.25, 0.5, 0.75, 0.9] {
                let linear = Easing::Linear.apply(p);
                assert!(ease_in.apply(p) < linear, "{ease_in} at {p}");
                assert!(ease_out.apply(p) > linear, "{ease_out} at {p}");
            }
        }
    }

    #[test]
    fn test_curves_are_monotonic_on_unit_interval() {
        for easing in Easing::ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value >= prev - 1e-6, "{easing} decreased at step {i}");
                prev = value;
            }
        }
    }

    #[test]
    fn test_sine_in_out_formula() {
        let t = 1.0 / 60.0;
        let d = 0.25;
        let expected = -500.0 / 2.0 * ((PI * t / d).cos() - 1.0);
        assert_eq!(Easing::SineInOut.compute(t, 0.0, 500.0, d), expected);
    }

    #[test]
    fn test_linear_extrapolates_out_of_range() {
        assert_eq!(Easing::Linear.compute(2.0, 0.0, 10.0, 1.0), 20.0);
        assert_eq!(Easing::Linear.compute(-1.0, 0.0, 10.0, 1.0), -10.0);
    }

    #[test]
    fn test_parse_names() {
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
        }
        assert_eq!("sineInOut".parse::<Easing>().unwrap(), Easing::SineInOut);
        assert_eq!("circle_in".parse::<Easing>().unwrap(), Easing::CircIn);
        assert_eq!("QUAD-OUT".parse::<Easing>().unwrap(), Easing::QuadOut);

        let err = "bounce".parse::<Easing>().unwrap_err();
        assert!(matches!(err, AnimationError::UnknownEasing(ref name) if name == "bounce"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Easing::ExpoInOut).unwrap();
        assert_eq!(json, "\"expo-in-out\"");
        let back: Easing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Easing::ExpoInOut);
    }
}
