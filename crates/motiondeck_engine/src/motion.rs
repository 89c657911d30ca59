// SPDX-License-Identifier: MIT OR Apache-2.0
//! Motion paths: the animation tracks driving one object over time.

use crate::error::EngineError;
use crate::keyframe::{Keyframe, KeyframeValue, ValueKind};
use crate::object::{ObjectId, ObjectKind};
use crate::track::AnimationTrack;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a motion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionPathId(pub Uuid);

impl MotionPathId {
    /// Create a new random motion path ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MotionPathId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MotionPathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The set of animation tracks driving one object's properties.
///
/// Owned by exactly one scene; `start_time_ms` is relative to that scene's
/// local clock, not the master timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    /// Unique motion path id
    pub id: MotionPathId,
    /// The object this path animates
    pub target_object_id: ObjectId,
    /// Family of the target object
    pub object_kind: ObjectKind,
    /// Offset from scene start, in milliseconds
    pub start_time_ms: u64,
    /// Length of the animation, in milliseconds
    pub duration_ms: u64,
    /// One track per animated property
    pub tracks: Vec<AnimationTrack>,
}

impl AnimationData {
    /// Create an empty motion path for an object.
    pub fn new(target_object_id: ObjectId, object_kind: ObjectKind, duration_ms: u64) -> Self {
        Self {
            id: MotionPathId::new(),
            target_object_id,
            object_kind,
            start_time_ms: 0,
            duration_ms,
            tracks: Vec::new(),
        }
    }

    /// Get a track by property name.
    pub fn track(&self, name: &str) -> Option<&AnimationTrack> {
        self.tracks.iter().find(|t| t.name == name)
    }

    /// Get a mutable track by property name.
    pub fn track_mut(&mut self, name: &str) -> Option<&mut AnimationTrack> {
        self.tracks.iter_mut().find(|t| t.name == name)
    }

    /// Get the track for a property name, creating it if absent.
    pub fn ensure_track(&mut self, name: &str) -> &mut AnimationTrack {
        if let Some(idx) = self.tracks.iter().position(|t| t.name == name) {
            &mut self.tracks[idx]
        } else {
            self.tracks.push(AnimationTrack::new(name));
            self.tracks.last_mut().expect("just pushed")
        }
    }

    /// Record a keyframe on the track named after the value's kind.
    ///
    /// Creates the track on demand; last write wins at an occupied time.
    pub fn record_keyframe(&mut self, keyframe: Keyframe) -> Result<(), EngineError> {
        let name = keyframe.value.kind().to_string();
        self.ensure_track(&name).insert_keyframe(keyframe)
    }

    /// Validate that every track is variant-homogeneous.
    pub fn validate(&self) -> Result<(), EngineError> {
        for track in &self.tracks {
            track.validate()?;
        }
        Ok(())
    }

    /// Sample every track at a path-local time, collecting the results by
    /// property family. Tracks that are empty contribute nothing, leaving
    /// the object's last-known value untouched.
    pub fn sample_tracks(&self, local_ms: u64) -> Result<SampledProperties, EngineError> {
        let mut sampled = SampledProperties::default();
        for track in &self.tracks {
            let Some(value) = track.sample(local_ms)? else {
                continue;
            };
            match value {
                KeyframeValue::Position { x, y } => sampled.position = Some((x, y)),
                KeyframeValue::Rotation { degrees } => sampled.rotation = Some(degrees),
                KeyframeValue::Scale { percent } => sampled.scale = Some(percent),
                KeyframeValue::Opacity { percent } => sampled.opacity = Some(percent),
            }
        }
        Ok(sampled)
    }

    /// The property kinds this path animates.
    pub fn animated_kinds(&self) -> Vec<ValueKind> {
        self.tracks.iter().filter_map(|t| t.value_kind()).collect()
    }
}

/// Interpolated property values for one object at one instant.
///
/// `None` means the corresponding property is not animated at this time and
/// the object keeps its last-known value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampledProperties {
    /// Interpolated position, if animated
    pub position: Option<(f32, f32)>,
    /// Interpolated rotation in degrees, if animated
    pub rotation: Option<f32>,
    /// Interpolated scale percentage, if animated
    pub scale: Option<f32>,
    /// Interpolated opacity percentage, if animated
    pub opacity: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::Keyframe;

    fn path_with_position() -> AnimationData {
        let mut path = AnimationData::new(ObjectId::new(), ObjectKind::Polygon, 2000);
        path.record_keyframe(Keyframe::new(0, KeyframeValue::position(0.0, 0.0)))
            .unwrap();
        path.record_keyframe(Keyframe::new(2000, KeyframeValue::position(100.0, 0.0)))
            .unwrap();
        path
    }

    #[test]
    fn record_keyframe_creates_track_named_by_kind() {
        let path = path_with_position();
        assert_eq!(path.tracks.len(), 1);
        assert_eq!(path.tracks[0].name, "position");
        assert_eq!(path.tracks[0].len(), 2);
    }

    #[test]
    fn sample_tracks_collects_by_property() {
        let mut path = path_with_position();
        path.record_keyframe(Keyframe::new(0, KeyframeValue::opacity(0.0)))
            .unwrap();
        path.record_keyframe(Keyframe::new(1000, KeyframeValue::opacity(100.0)))
            .unwrap();

        let sampled = path.sample_tracks(1000).unwrap();
        let (x, _) = sampled.position.unwrap();
        assert!((x - 50.0).abs() < 1e-4);
        assert!((sampled.opacity.unwrap() - 100.0).abs() < 1e-4);
        assert!(sampled.rotation.is_none());
        assert!(sampled.scale.is_none());
    }

    #[test]
    fn path_with_no_tracks_samples_nothing() {
        let path = AnimationData::new(ObjectId::new(), ObjectKind::Text, 1000);
        let sampled = path.sample_tracks(500).unwrap();
        assert_eq!(sampled, SampledProperties::default());
    }

    #[test]
    fn ensure_track_is_idempotent() {
        let mut path = AnimationData::new(ObjectId::new(), ObjectKind::Image, 1000);
        path.ensure_track("rotation");
        path.ensure_track("rotation");
        assert_eq!(path.tracks.len(), 1);
    }
}
