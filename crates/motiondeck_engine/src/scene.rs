// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scenes: self-contained sets of objects and their motion paths.

use crate::color::Rgba;
use crate::error::EngineError;
use crate::motion::AnimationData;
use crate::object::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub Uuid);

impl SceneId {
    /// Create a new random scene ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Interpolate along the start→end axis
    Linear,
    /// Interpolate outward from a center point
    Radial,
}

/// A single color stop on a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`
    pub offset: f32,
    /// Color at this stop
    pub color: Rgba,
}

/// Scene background fill. The tagged encoding is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackgroundFill {
    /// Flat color fill
    Color {
        /// The fill color
        color: Rgba,
    },
    /// Gradient fill
    Gradient {
        /// Ordered color stops
        stops: Vec<GradientStop>,
        /// Linear or radial geometry
        kind: GradientKind,
        /// Start point (linear), normalized canvas coordinates
        start: [f32; 2],
        /// End point (linear), normalized canvas coordinates
        end: [f32; 2],
        /// Center point (radial), normalized canvas coordinates
        center: [f32; 2],
        /// Radius (radial), normalized to the canvas diagonal
        radius: f32,
        /// Phase offset for animated gradients
        time_offset: f32,
        /// Animation speed multiplier; 0 freezes the gradient
        animation_speed: f32,
        /// Whether the gradient renders at all
        enabled: bool,
    },
}

impl BackgroundFill {
    /// A two-stop linear gradient spanning the canvas diagonal.
    pub fn linear_gradient(from: Rgba, to: Rgba) -> Self {
        BackgroundFill::Gradient {
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
            kind: GradientKind::Linear,
            start: [0.0, 0.0],
            end: [1.0, 1.0],
            center: [0.5, 0.5],
            radius: 0.5,
            time_offset: 0.0,
            animation_speed: 0.0,
            enabled: true,
        }
    }
}

impl Default for BackgroundFill {
    fn default() -> Self {
        BackgroundFill::Color { color: Rgba::WHITE }
    }
}

/// Ids of the objects a scene shows, partitioned by object family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveObjectIds {
    /// Active vector shapes
    #[serde(default)]
    pub polygons: Vec<ObjectId>,
    /// Active text blocks
    #[serde(default)]
    pub text: Vec<ObjectId>,
    /// Active images
    #[serde(default)]
    pub images: Vec<ObjectId>,
    /// Active video clips
    #[serde(default)]
    pub videos: Vec<ObjectId>,
}

impl ActiveObjectIds {
    /// Whether any set contains the id.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.polygons.contains(&id)
            || self.text.contains(&id)
            || self.images.contains(&id)
            || self.videos.contains(&id)
    }

    /// Iterate over every active id across all families.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.polygons
            .iter()
            .chain(&self.text)
            .chain(&self.images)
            .chain(&self.videos)
            .copied()
    }

    /// The set for one object family.
    pub fn for_kind(&self, kind: ObjectKind) -> &Vec<ObjectId> {
        match kind {
            ObjectKind::Polygon => &self.polygons,
            ObjectKind::Text => &self.text,
            ObjectKind::Image => &self.images,
            ObjectKind::Video => &self.videos,
        }
    }

    /// Add an id to its family's set (idempotent).
    pub fn insert(&mut self, kind: ObjectKind, id: ObjectId) {
        let set = self.for_kind_mut(kind);
        if !set.contains(&id) {
            set.push(id);
        }
    }

    /// Remove an id from every family's set.
    pub fn remove(&mut self, id: ObjectId) {
        self.polygons.retain(|o| *o != id);
        self.text.retain(|o| *o != id);
        self.images.retain(|o| *o != id);
        self.videos.retain(|o| *o != id);
    }

    /// Total number of active ids.
    pub fn len(&self) -> usize {
        self.polygons.len() + self.text.len() + self.images.len() + self.videos.len()
    }

    /// Whether no object is active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn for_kind_mut(&mut self, kind: ObjectKind) -> &mut Vec<ObjectId> {
        match kind {
            ObjectKind::Polygon => &mut self.polygons,
            ObjectKind::Text => &mut self.text,
            ObjectKind::Image => &mut self.images,
            ObjectKind::Video => &mut self.videos,
        }
    }
}

/// A named, independently playable collection of objects and motion paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique scene id
    pub id: SceneId,
    /// Scene name
    pub name: String,
    /// Background fill
    pub background_fill: BackgroundFill,
    /// Length of the scene's local clock, in milliseconds
    pub duration_ms: u64,
    /// Objects this scene shows
    pub active_objects: ActiveObjectIds,
    /// Motion paths animating the active objects
    pub motion_paths: Vec<AnimationData>,
}

impl Scene {
    /// Create an empty scene with the given name and duration.
    pub fn new(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: SceneId::new(),
            name: name.into(),
            background_fill: BackgroundFill::default(),
            duration_ms,
            active_objects: ActiveObjectIds::default(),
            motion_paths: Vec::new(),
        }
    }

    /// The motion path targeting an object, if one exists.
    pub fn motion_path_for(&self, object_id: ObjectId) -> Option<&AnimationData> {
        self.motion_paths
            .iter()
            .find(|p| p.target_object_id == object_id)
    }

    /// Mutable access to the motion path targeting an object.
    pub fn motion_path_for_mut(&mut self, object_id: ObjectId) -> Option<&mut AnimationData> {
        self.motion_paths
            .iter_mut()
            .find(|p| p.target_object_id == object_id)
    }

    /// Add a motion path, replacing any existing path for the same target.
    pub fn set_motion_path(&mut self, path: AnimationData) {
        self.motion_paths
            .retain(|p| p.target_object_id != path.target_object_id);
        self.motion_paths.push(path);
    }

    /// Remove every motion path targeting an object.
    pub fn remove_motion_paths_for(&mut self, object_id: ObjectId) {
        self.motion_paths
            .retain(|p| p.target_object_id != object_id);
    }

    /// Validate the scene's internal invariants: every motion path targets
    /// an active object, and every track is variant-homogeneous.
    pub fn validate(&self) -> Result<(), EngineError> {
        for path in &self.motion_paths {
            if !self.active_objects.contains(path.target_object_id) {
                return Err(EngineError::DanglingMotionTarget {
                    scene_id: self.id,
                    object_id: path.target_object_id,
                });
            }
            path.validate()?;
        }
        Ok(())
    }

    /// Latest end time across all motion paths, in scene-local milliseconds.
    pub fn content_duration_ms(&self) -> u64 {
        self.motion_paths
            .iter()
            .map(|p| p.start_time_ms + p.duration_ms)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::{Keyframe, KeyframeValue};

    #[test]
    fn active_ids_insert_is_idempotent() {
        let mut active = ActiveObjectIds::default();
        let id = ObjectId::new();
        active.insert(ObjectKind::Text, id);
        active.insert(ObjectKind::Text, id);
        assert_eq!(active.text.len(), 1);
        assert!(active.contains(id));
    }

    #[test]
    fn active_ids_remove_clears_all_families() {
        let mut active = ActiveObjectIds::default();
        let id = ObjectId::new();
        active.insert(ObjectKind::Image, id);
        active.remove(id);
        assert!(!active.contains(id));
        assert!(active.is_empty());
    }

    #[test]
    fn set_motion_path_replaces_same_target() {
        let mut scene = Scene::new("intro", 2000);
        let target = ObjectId::new();
        scene.active_objects.insert(ObjectKind::Polygon, target);

        scene.set_motion_path(AnimationData::new(target, ObjectKind::Polygon, 1000));
        scene.set_motion_path(AnimationData::new(target, ObjectKind::Polygon, 1500));

        assert_eq!(scene.motion_paths.len(), 1);
        assert_eq!(scene.motion_paths[0].duration_ms, 1500);
    }

    #[test]
    fn validate_rejects_dangling_motion_target() {
        let mut scene = Scene::new("intro", 2000);
        scene.set_motion_path(AnimationData::new(ObjectId::new(), ObjectKind::Text, 1000));
        assert!(matches!(
            scene.validate(),
            Err(EngineError::DanglingMotionTarget { .. })
        ));
    }

    #[test]
    fn validate_accepts_scene_without_motion_paths() {
        let scene = Scene::new("static", 1000);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn content_duration_accounts_for_path_offsets() {
        let mut scene = Scene::new("intro", 5000);
        let target = ObjectId::new();
        scene.active_objects.insert(ObjectKind::Polygon, target);

        let mut path = AnimationData::new(target, ObjectKind::Polygon, 1000);
        path.start_time_ms = 500;
        path.record_keyframe(Keyframe::new(0, KeyframeValue::rotation(0.0)))
            .unwrap();
        scene.set_motion_path(path);

        assert_eq!(scene.content_duration_ms(), 1500);
    }

    #[test]
    fn linear_gradient_helper_has_two_stops() {
        let BackgroundFill::Gradient { stops, kind, enabled, .. } =
            BackgroundFill::linear_gradient(Rgba::BLACK, Rgba::WHITE)
        else {
            panic!("expected gradient");
        };
        assert_eq!(stops.len(), 2);
        assert_eq!(kind, GradientKind::Linear);
        assert!(enabled);
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[1].offset, 1.0);
    }
}
