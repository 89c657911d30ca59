// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe primitives: animatable values and easing curves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Easing applied to the normalized progress between two keyframes.
///
/// The easing governs the interpolation shape, not the timing of the
/// keyframes themselves. The exact curve forms below are part of the
/// sampling contract and are pinned by golden-output tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant-rate interpolation
    #[default]
    Linear,
    /// Quadratic ease-in: slow start
    EaseIn,
    /// Quadratic ease-out: slow finish
    EaseOut,
    /// Symmetric ease-in-out blend
    EaseInOut,
}

impl Easing {
    /// Apply the easing curve to a normalized progress value in `[0, 1]`.
    pub fn apply(self, p: f32) -> f32 {
        match self {
            Easing::Linear => p,
            Easing::EaseIn => p * p,
            Easing::EaseOut => 1.0 - (1.0 - p) * (1.0 - p),
            Easing::EaseInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - ((-2.0 * p + 2.0).powi(2)) / 2.0
                }
            }
        }
    }
}

/// Which property family a [`KeyframeValue`] belongs to.
///
/// Used for variant-mismatch reporting; not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// 2D position
    Position,
    /// Rotation in degrees
    Rotation,
    /// Uniform scale percentage
    Scale,
    /// Opacity percentage
    Opacity,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Position => "position",
            ValueKind::Rotation => "rotation",
            ValueKind::Scale => "scale",
            ValueKind::Opacity => "opacity",
        };
        f.write_str(name)
    }
}

/// Value stored in a keyframe.
///
/// The tagged encoding (`"type"` discriminant, snake_case variant names) is
/// the persisted wire contract and must remain stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeyframeValue {
    /// 2D position in canvas coordinates
    Position {
        /// Horizontal coordinate
        x: f32,
        /// Vertical coordinate
        y: f32,
    },
    /// Rotation in degrees
    Rotation {
        /// Clockwise rotation in degrees
        degrees: f32,
    },
    /// Uniform scale percentage; 100 is identity, no upper bound
    Scale {
        /// Scale percentage
        percent: f32,
    },
    /// Opacity percentage, clamped to `[0, 100]`
    Opacity {
        /// Opacity percentage
        percent: f32,
    },
}

impl KeyframeValue {
    /// Construct a position value.
    pub fn position(x: f32, y: f32) -> Self {
        Self::Position { x, y }
    }

    /// Construct a rotation value in degrees.
    pub fn rotation(degrees: f32) -> Self {
        Self::Rotation { degrees }
    }

    /// Construct a scale value (100 = identity).
    pub fn scale(percent: f32) -> Self {
        Self::Scale { percent }
    }

    /// Construct an opacity value, clamped to `[0, 100]`.
    pub fn opacity(percent: f32) -> Self {
        Self::Opacity {
            percent: percent.clamp(0.0, 100.0),
        }
    }

    /// Get the property family of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            KeyframeValue::Position { .. } => ValueKind::Position,
            KeyframeValue::Rotation { .. } => ValueKind::Rotation,
            KeyframeValue::Scale { .. } => ValueKind::Scale,
            KeyframeValue::Opacity { .. } => ValueKind::Opacity,
        }
    }

    /// Interpolate component-wise towards `other` at eased progress `t`.
    ///
    /// Returns `None` when the two values belong to different property
    /// families; the caller reports that as a configuration error.
    pub fn lerp(&self, other: &KeyframeValue, t: f32) -> Option<KeyframeValue> {
        match (self, other) {
            (KeyframeValue::Position { x: x0, y: y0 }, KeyframeValue::Position { x: x1, y: y1 }) => {
                Some(KeyframeValue::Position {
                    x: lerp(*x0, *x1, t),
                    y: lerp(*y0, *y1, t),
                })
            }
            (
                KeyframeValue::Rotation { degrees: a },
                KeyframeValue::Rotation { degrees: b },
            ) => Some(KeyframeValue::Rotation {
                degrees: lerp(*a, *b, t),
            }),
            (KeyframeValue::Scale { percent: a }, KeyframeValue::Scale { percent: b }) => {
                Some(KeyframeValue::Scale {
                    percent: lerp(*a, *b, t),
                })
            }
            (KeyframeValue::Opacity { percent: a }, KeyframeValue::Opacity { percent: b }) => {
                Some(KeyframeValue::Opacity {
                    percent: lerp(*a, *b, t).clamp(0.0, 100.0),
                })
            }
            _ => None,
        }
    }
}

/// Linear interpolation between two floats.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A single keyframe on an animation track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in milliseconds, relative to the owning motion path
    pub time_ms: u64,
    /// Value at this keyframe
    pub value: KeyframeValue,
    /// Easing applied between this keyframe and the next
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    /// Create a keyframe with linear easing.
    pub fn new(time_ms: u64, value: KeyframeValue) -> Self {
        Self {
            time_ms,
            value,
            easing: Easing::Linear,
        }
    }

    /// Set the easing mode.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_identity() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
    }

    #[test]
    fn ease_in_is_quadratic() {
        assert!((Easing::EaseIn.apply(0.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn ease_out_mirrors_ease_in() {
        assert!((Easing::EaseOut.apply(0.5) - 0.75).abs() < 1e-6);
        let p = 0.3;
        let mirrored = 1.0 - Easing::EaseIn.apply(1.0 - p);
        assert!((Easing::EaseOut.apply(p) - mirrored).abs() < 1e-6);
    }

    #[test]
    fn ease_in_out_is_symmetric_at_midpoint() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(0.25) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn opacity_constructor_clamps() {
        assert_eq!(
            KeyframeValue::opacity(150.0),
            KeyframeValue::Opacity { percent: 100.0 }
        );
        assert_eq!(
            KeyframeValue::opacity(-5.0),
            KeyframeValue::Opacity { percent: 0.0 }
        );
    }

    #[test]
    fn scale_has_no_upper_bound() {
        assert_eq!(
            KeyframeValue::scale(400.0),
            KeyframeValue::Scale { percent: 400.0 }
        );
    }

    #[test]
    fn lerp_position_component_wise() {
        let a = KeyframeValue::position(0.0, 10.0);
        let b = KeyframeValue::position(100.0, 30.0);
        let mid = a.lerp(&b, 0.5).unwrap();
        assert_eq!(mid, KeyframeValue::position(50.0, 20.0));
    }

    #[test]
    fn lerp_rejects_mismatched_variants() {
        let a = KeyframeValue::position(0.0, 0.0);
        let b = KeyframeValue::opacity(50.0);
        assert!(a.lerp(&b, 0.5).is_none());
    }

    #[test]
    fn lerp_opacity_clamps_result() {
        let a = KeyframeValue::Opacity { percent: 0.0 };
        let b = KeyframeValue::Opacity { percent: 100.0 };
        let v = a.lerp(&b, 1.5).unwrap();
        assert_eq!(v, KeyframeValue::Opacity { percent: 100.0 });
    }

    #[test]
    fn tagged_wire_encoding_is_stable() {
        let json = serde_json::to_value(KeyframeValue::position(1.0, 2.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "position", "x": 1.0, "y": 2.0 })
        );

        let json = serde_json::to_value(KeyframeValue::rotation(45.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "rotation", "degrees": 45.0 })
        );
    }

    #[test]
    fn keyframe_easing_defaults_to_linear() {
        let kf: Keyframe =
            serde_json::from_str(r#"{ "time_ms": 100, "value": { "type": "scale", "percent": 100.0 } }"#)
                .unwrap();
        assert_eq!(kf.easing, Easing::Linear);
    }
}
