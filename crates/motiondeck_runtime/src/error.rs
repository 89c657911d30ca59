// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime error taxonomy.

use motiondeck_engine::{EngineError, ObjectId, SceneId};
use thiserror::Error;

/// Errors produced by the live-object registry, scheduler, and collaborator
/// seams.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A scene or sample referenced an object with no live instance.
    ///
    /// Indicates a corrupt or stale project document, so the lookup is a
    /// hard error rather than a silent skip.
    #[error("object not found for id {0}")]
    ObjectNotFound(ObjectId),

    /// Generated motion data targets an object outside the scene's active
    /// sets; the data is rejected before merging.
    #[error("generated motion for scene {scene_id} targets unknown object {object_id}")]
    UnknownMotionTarget {
        /// Scene the motion was generated for
        scene_id: SceneId,
        /// The unresolved target object
        object_id: ObjectId,
    },

    /// The persistence collaborator failed; in-memory state is retained.
    #[error("project store failure: {0}")]
    StoreFailure(String),

    /// An error bubbled up from the data-model layer.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
