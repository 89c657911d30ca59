// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine error taxonomy.

use crate::keyframe::ValueKind;
use crate::object::ObjectId;
use crate::scene::SceneId;
use thiserror::Error;

/// Errors produced by the data-model layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A track holds (or would hold) keyframes of differing value kinds.
    #[error("track '{track}' mixes keyframe kinds: expected {expected}, found {found}")]
    TrackVariantMismatch {
        /// Name of the offending track
        track: String,
        /// Kind established by the track's existing keyframes
        expected: ValueKind,
        /// Kind of the conflicting keyframe
        found: ValueKind,
    },

    /// A scene id did not resolve against the project state.
    #[error("scene not found: {0}")]
    SceneNotFound(SceneId),

    /// A motion path targets an object that is not in the scene's active sets.
    #[error("motion path in scene {scene_id} targets unknown object {object_id}")]
    DanglingMotionTarget {
        /// Scene owning the motion path
        scene_id: SceneId,
        /// The unresolved target object
        object_id: ObjectId,
    },

    /// The master timeline references state that cannot be resolved.
    #[error("invalid timeline state: {0}")]
    InvalidTimelineState(String),

    /// The project document failed to (de)serialize.
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}
