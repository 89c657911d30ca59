// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project state: the sole unit of persistence.
//!
//! A project document holds the object pool, the scene list, the optional
//! master timeline, and canvas settings. It is a versionless JSON document;
//! field names and the tagged-union encodings of the model types are the
//! wire contract, and round-tripping through serialization is lossless.

use crate::error::EngineError;
use crate::object::{ObjectConfig, ObjectId};
use crate::scene::{Scene, SceneId};
use crate::timeline::Timeline;
use serde::{Deserialize, Serialize};

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl Default for CanvasDimensions {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Project-level settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Canvas dimensions
    pub canvas: CanvasDimensions,
}

/// The complete persisted project document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    /// Object pool referenced by the scenes' active sets
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
    /// Ordered scene list
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Master timeline, if the project has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    /// Project settings
    #[serde(default)]
    pub settings: ProjectSettings,
}

impl ProjectState {
    /// Create an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a scene by id.
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Get a mutable scene by id.
    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    /// Get a scene by id, or a [`EngineError::SceneNotFound`] error.
    pub fn require_scene(&self, id: SceneId) -> Result<&Scene, EngineError> {
        self.scene(id).ok_or(EngineError::SceneNotFound(id))
    }

    /// Append a scene and return its id.
    pub fn add_scene(&mut self, scene: Scene) -> SceneId {
        let id = scene.id;
        self.scenes.push(scene);
        id
    }

    /// Remove a scene, dropping any timeline placements that referenced it.
    pub fn remove_scene(&mut self, id: SceneId) -> Option<Scene> {
        let idx = self.scenes.iter().position(|s| s.id == id)?;
        let scene = self.scenes.remove(idx);
        if let Some(timeline) = &mut self.timeline {
            timeline.remove_scene(id);
        }
        tracing::debug!(scene = %id, "removed scene");
        Some(scene)
    }

    /// Get an object config by id.
    pub fn object(&self, id: ObjectId) -> Option<&ObjectConfig> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Get a mutable object config by id.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut ObjectConfig> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Add an object to the pool and return its id.
    pub fn add_object(&mut self, config: ObjectConfig) -> ObjectId {
        let id = config.id();
        self.objects.push(config);
        id
    }

    /// Remove an object from the pool, every scene's active sets, and every
    /// motion path targeting it.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<ObjectConfig> {
        let idx = self.objects.iter().position(|o| o.id() == id)?;
        let config = self.objects.remove(idx);
        for scene in &mut self.scenes {
            scene.active_objects.remove(id);
            scene.remove_motion_paths_for(id);
        }
        Some(config)
    }

    /// End of the master timeline in milliseconds, or 0 without one.
    pub fn timeline_end_ms(&self) -> u64 {
        self.timeline
            .as_ref()
            .map(|t| t.end_time_ms(&self.scenes))
            .unwrap_or(0)
    }

    /// Validate the whole document: scene invariants, timeline references,
    /// and active-set references into the object pool.
    ///
    /// Returns the timeline's overlap warnings on success.
    pub fn validate(&self) -> Result<Vec<String>, EngineError> {
        for scene in &self.scenes {
            scene.validate()?;
            for object_id in scene.active_objects.iter() {
                if self.object(object_id).is_none() {
                    return Err(EngineError::InvalidTimelineState(format!(
                        "scene {} activates unknown object {}",
                        scene.id, object_id
                    )));
                }
            }
        }
        match &self.timeline {
            Some(timeline) => timeline.validate(&self.scenes),
            None => Ok(Vec::new()),
        }
    }

    /// Serialize to the persisted JSON document.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from the persisted JSON document.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::keyframe::{Easing, Keyframe, KeyframeValue};
    use crate::motion::AnimationData;
    use crate::object::{ObjectKind, ObjectTransform, PolygonConfig, TextConfig};
    use crate::scene::BackgroundFill;
    use crate::timeline::{TimelinePlacement, TimelineTrackKind};

    fn sample_project() -> ProjectState {
        let mut project = ProjectState::new();

        let polygon = PolygonConfig {
            id: ObjectId::new(),
            name: "square".into(),
            transform: ObjectTransform::default(),
            sides: 4,
            fill: Rgba::from_rgb(255, 0, 0),
            width: 100.0,
            height: 100.0,
        };
        let text = TextConfig {
            id: ObjectId::new(),
            name: "headline".into(),
            transform: ObjectTransform::default(),
            content: "Launch day".into(),
            fill: Rgba::BLACK,
            background: Rgba::WHITE,
            font_family: "Inter".into(),
            font_size: 48.0,
        };
        let polygon_id = project.add_object(ObjectConfig::Polygon(polygon));
        let text_id = project.add_object(ObjectConfig::Text(text));

        let mut scene = Scene::new("intro", 2000);
        scene.background_fill =
            BackgroundFill::linear_gradient(Rgba::from_rgb(10, 20, 30), Rgba::from_rgb(200, 210, 220));
        scene.active_objects.insert(ObjectKind::Polygon, polygon_id);
        scene.active_objects.insert(ObjectKind::Text, text_id);

        let mut path = AnimationData::new(polygon_id, ObjectKind::Polygon, 2000);
        path.record_keyframe(
            Keyframe::new(0, KeyframeValue::position(0.0, 0.0)).with_easing(Easing::EaseInOut),
        )
        .unwrap();
        path.record_keyframe(Keyframe::new(2000, KeyframeValue::position(100.0, 0.0)))
            .unwrap();
        scene.set_motion_path(path);

        let scene_id = project.add_scene(scene);

        let mut timeline = Timeline::new();
        timeline.add_placement(TimelinePlacement::new(scene_id, TimelineTrackKind::Video, 0));
        project.timeline = Some(timeline);

        project
    }

    #[test]
    fn round_trip_is_lossless() {
        let project = sample_project();
        let json = project.to_json().unwrap();
        let restored = ProjectState::from_json(&json).unwrap();
        assert_eq!(restored, project);
    }

    #[test]
    fn round_trip_preserves_keyframe_and_stop_order() {
        let project = sample_project();
        let restored = ProjectState::from_json(&project.to_json().unwrap()).unwrap();

        let scene = &restored.scenes[0];
        let track = scene.motion_paths[0].track("position").unwrap();
        let times: Vec<u64> = track.keyframes().iter().map(|k| k.time_ms).collect();
        assert_eq!(times, vec![0, 2000]);

        let BackgroundFill::Gradient { stops, .. } = &scene.background_fill else {
            panic!("expected gradient background");
        };
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[1].offset, 1.0);
    }

    #[test]
    fn validate_passes_for_consistent_project() {
        assert!(sample_project().validate().unwrap().is_empty());
    }

    #[test]
    fn validate_rejects_active_id_missing_from_pool() {
        let mut project = sample_project();
        project.scenes[0]
            .active_objects
            .insert(ObjectKind::Image, ObjectId::new());
        assert!(matches!(
            project.validate(),
            Err(EngineError::InvalidTimelineState(_))
        ));
    }

    #[test]
    fn remove_scene_drops_timeline_placements() {
        let mut project = sample_project();
        let scene_id = project.scenes[0].id;
        project.remove_scene(scene_id);
        assert!(project.timeline.as_ref().unwrap().placements.is_empty());
        assert_eq!(project.timeline_end_ms(), 0);
    }

    #[test]
    fn remove_object_scrubs_scenes_and_paths() {
        let mut project = sample_project();
        let polygon_id = project.objects[0].id();
        project.remove_object(polygon_id);

        let scene = &project.scenes[0];
        assert!(!scene.active_objects.contains(polygon_id));
        assert!(scene.motion_path_for(polygon_id).is_none());
    }

    #[test]
    fn missing_timeline_field_loads_as_none() {
        let json = r#"{ "objects": [], "scenes": [], "settings": { "canvas": { "width": 800, "height": 600 } } }"#;
        let project = ProjectState::from_json(json).unwrap();
        assert!(project.timeline.is_none());
        assert_eq!(project.settings.canvas.width, 800);
    }
}
