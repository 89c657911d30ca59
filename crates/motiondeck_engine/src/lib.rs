// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene/keyframe data model for MotionDeck.
//!
//! This crate holds the persisted data model of the animation engine:
//! - Typed keyframe values and easing curves
//! - Animation tracks with clamped, eased sampling
//! - Motion paths driving one object's properties
//! - Scenes with active-object sets and background fills
//! - The master timeline of scene placements
//! - The project document and its JSON persistence
//!
//! ## Architecture
//!
//! Everything here is pure data plus sampling: no clocks, no live objects,
//! no I/O. The `motiondeck_runtime` crate owns live object instances and
//! drives playback against this model.

pub mod color;
pub mod error;
pub mod keyframe;
pub mod motion;
pub mod object;
pub mod project;
pub mod scene;
pub mod timeline;
pub mod track;

pub use color::Rgba;
pub use error::EngineError;
pub use keyframe::{Easing, Keyframe, KeyframeValue, ValueKind};
pub use motion::{AnimationData, MotionPathId, SampledProperties};
pub use object::{
    ImageConfig, ObjectConfig, ObjectId, ObjectKind, ObjectTransform, PolygonConfig, TextConfig,
    VideoConfig,
};
pub use project::{CanvasDimensions, ProjectSettings, ProjectState};
pub use scene::{ActiveObjectIds, BackgroundFill, GradientKind, GradientStop, Scene, SceneId};
pub use timeline::{PlacementId, Timeline, TimelinePlacement, TimelineTrackKind};
pub use track::AnimationTrack;
