// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation tracks: one property's ordered keyframe list.

use crate::error::EngineError;
use crate::keyframe::{Keyframe, KeyframeValue, ValueKind};
use serde::{Deserialize, Serialize};

/// Ordered keyframes driving one named property of one object.
///
/// Invariants: keyframes are sorted by `time_ms` with unique times (last
/// write wins on insert collision), and every keyframe carries the same
/// [`KeyframeValue`] variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTrack {
    /// Property name, e.g. `"position"` or `"opacity"`
    pub name: String,
    keyframes: Vec<Keyframe>,
}

impl AnimationTrack {
    /// Create an empty track for the given property name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyframes: Vec::new(),
        }
    }

    /// The value kind shared by this track's keyframes, if any exist.
    pub fn value_kind(&self) -> Option<ValueKind> {
        self.keyframes.first().map(|k| k.value.kind())
    }

    /// All keyframes, sorted by time.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Whether the track has no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Time of the last keyframe, or 0 for an empty track.
    pub fn duration_ms(&self) -> u64 {
        self.keyframes.last().map(|k| k.time_ms).unwrap_or(0)
    }

    /// Get the keyframe at an exact time, if present.
    pub fn keyframe_at(&self, time_ms: u64) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.time_ms == time_ms)
    }

    /// Insert a keyframe, keeping the track sorted.
    ///
    /// A keyframe at an already-occupied time replaces the existing one.
    /// Inserting a value of a different kind than the track already holds is
    /// rejected with [`EngineError::TrackVariantMismatch`].
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) -> Result<(), EngineError> {
        if let Some(expected) = self.value_kind() {
            let found = keyframe.value.kind();
            if found != expected {
                return Err(EngineError::TrackVariantMismatch {
                    track: self.name.clone(),
                    expected,
                    found,
                });
            }
        }
        self.upsert(keyframe);
        Ok(())
    }

    /// Remove the keyframe at an exact time.
    pub fn remove_keyframe(&mut self, time_ms: u64) -> Option<Keyframe> {
        let idx = self.keyframes.iter().position(|k| k.time_ms == time_ms)?;
        Some(self.keyframes.remove(idx))
    }

    /// Move a keyframe to a new time; last write wins at the destination.
    ///
    /// Returns `false` if no keyframe exists at `from_ms`.
    pub fn move_keyframe(&mut self, from_ms: u64, to_ms: u64) -> bool {
        let Some(mut keyframe) = self.remove_keyframe(from_ms) else {
            return false;
        };
        keyframe.time_ms = to_ms;
        self.upsert(keyframe);
        true
    }

    /// Check that every keyframe carries the track's value kind.
    ///
    /// Authoring operations maintain this invariant; deserialized documents
    /// are checked here before use.
    pub fn validate(&self) -> Result<(), EngineError> {
        let Some(expected) = self.value_kind() else {
            return Ok(());
        };
        for keyframe in &self.keyframes {
            let found = keyframe.value.kind();
            if found != expected {
                return Err(EngineError::TrackVariantMismatch {
                    track: self.name.clone(),
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Sample the track at `t_ms`.
    ///
    /// Returns `Ok(None)` for an empty track — the caller keeps the object's
    /// last-known value and does not move it. Before the first keyframe the
    /// first value is returned; past the last keyframe the last value is
    /// returned (clamp, no extrapolation). Between two keyframes the left
    /// keyframe's easing shapes the normalized progress before a
    /// component-wise lerp.
    pub fn sample(&self, t_ms: u64) -> Result<Option<KeyframeValue>, EngineError> {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return Ok(None);
        };

        if t_ms <= first.time_ms {
            return Ok(Some(first.value));
        }
        if t_ms >= last.time_ms {
            return Ok(Some(last.value));
        }

        for pair in self.keyframes.windows(2) {
            let (k0, k1) = (&pair[0], &pair[1]);
            if t_ms >= k0.time_ms && t_ms < k1.time_ms {
                let span = (k1.time_ms - k0.time_ms) as f32;
                let progress = (t_ms - k0.time_ms) as f32 / span;
                let eased = k0.easing.apply(progress);
                return match k0.value.lerp(&k1.value, eased) {
                    Some(value) => Ok(Some(value)),
                    None => Err(EngineError::TrackVariantMismatch {
                        track: self.name.clone(),
                        expected: k0.value.kind(),
                        found: k1.value.kind(),
                    }),
                };
            }
        }

        // Unreachable for a sorted track; mirrors the clamp-to-last contract.
        Ok(Some(last.value))
    }

    /// Insert without a variant check, replacing any keyframe at the same time.
    fn upsert(&mut self, keyframe: Keyframe) {
        if let Some(existing) = self
            .keyframes
            .iter_mut()
            .find(|k| k.time_ms == keyframe.time_ms)
        {
            *existing = keyframe;
        } else {
            self.keyframes.push(keyframe);
            self.keyframes.sort_by_key(|k| k.time_ms);
        }
    }
}
