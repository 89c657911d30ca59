// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor runtime: live objects, authoring mutations, and playback glue.
//!
//! One `EditorRuntime` owns one object registry and one scheduler. Multiple
//! independent instances may coexist (one per canvas); they share nothing.
//! The project document stays authoritative: the registry is rebuilt from
//! it on load, and authoring operations write through to it.

use crate::clock::{Clock, SystemClock};
use crate::error::RuntimeError;
use crate::inference::MotionPrompt;
use crate::objects::{LiveObject, ObjectRegistry};
use crate::scheduler::{EndBehavior, PlaybackScheduler, PlaybackStatus};
use crate::store::ProjectStore;
use crate::theme::{self, FontScript, ThemePalette};
use motiondeck_engine::{
    AnimationData, EngineError, Keyframe, MotionPathId, ObjectConfig, ObjectId, ProjectState,
    SceneId,
};
use uuid::Uuid;

/// Live editing and playback over one project.
pub struct EditorRuntime<C: Clock = SystemClock> {
    project: ProjectState,
    registry: ObjectRegistry,
    scheduler: PlaybackScheduler<C>,
    current_scene: Option<SceneId>,
}

impl EditorRuntime<SystemClock> {
    /// Create a runtime over a project, using the system clock.
    pub fn new(project: ProjectState) -> Self {
        Self::with_clock(project, SystemClock::new())
    }

    /// Load a project from the persistence collaborator.
    pub fn load<S: ProjectStore>(store: &S, project_id: Uuid) -> Result<Self, RuntimeError> {
        let project = store.load_project(project_id)?;
        project.validate().map_err(RuntimeError::from)?;
        tracing::info!(project = %project_id, scenes = project.scenes.len(), "project loaded");
        Ok(Self::new(project))
    }
}

impl<C: Clock> EditorRuntime<C> {
    /// Create a runtime over a project with an injected clock.
    pub fn with_clock(project: ProjectState, clock: C) -> Self {
        let registry = ObjectRegistry::rebuild_from(&project.objects);
        Self {
            project,
            registry,
            scheduler: PlaybackScheduler::new(clock),
            current_scene: None,
        }
    }

    /// The authoritative project document.
    pub fn project(&self) -> &ProjectState {
        &self.project
    }

    /// The live object registry.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// The scene currently open for editing, if any.
    pub fn current_scene(&self) -> Option<SceneId> {
        self.current_scene
    }

    /// Whether any playback mode is active.
    pub fn is_playing(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// Discard and rebuild the live cache from the project document.
    pub fn rebuild(&mut self) {
        self.registry = ObjectRegistry::rebuild_from(&self.project.objects);
        tracing::debug!(objects = self.registry.len(), "registry rebuilt");
    }

    /// Open a scene for editing: applies its visibility and motion-path
    /// attachments to the live cache.
    pub fn open_scene(&mut self, scene_id: SceneId) -> Result<(), RuntimeError> {
        let scene = self
            .project
            .require_scene(scene_id)
            .map_err(RuntimeError::from)?;
        self.registry.restore(scene)?;
        self.current_scene = Some(scene_id);
        tracing::info!(scene = %scene_id, "scene opened");
        Ok(())
    }

    /// Add an object to the pool and a scene's active set.
    pub fn add_object(
        &mut self,
        scene_id: SceneId,
        config: ObjectConfig,
    ) -> Result<ObjectId, RuntimeError> {
        let id = config.id();
        let kind = config.kind();
        let scene = self
            .project
            .scene_mut(scene_id)
            .ok_or(EngineError::SceneNotFound(scene_id))
            .map_err(RuntimeError::from)?;
        scene.active_objects.insert(kind, id);

        let mut live = LiveObject::from_config(config.clone());
        // Objects added to the open scene become visible immediately.
        live.hidden = self.current_scene != Some(scene_id);
        self.registry.insert(live);
        self.project.add_object(config);
        tracing::debug!(object = %id, scene = %scene_id, "object added");
        Ok(id)
    }

    /// Remove an object everywhere: pool, live cache, active sets, and any
    /// motion paths targeting it.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<(), RuntimeError> {
        if self.project.remove_object(id).is_none() {
            return Err(RuntimeError::ObjectNotFound(id));
        }
        self.registry.remove(id);
        tracing::debug!(object = %id, "object removed");
        Ok(())
    }

    /// Replace an object's config in place, keeping its id and visibility.
    pub fn replace_object(&mut self, config: ObjectConfig) -> Result<(), RuntimeError> {
        let id = config.id();
        let slot = self
            .project
            .object_mut(id)
            .ok_or(RuntimeError::ObjectNotFound(id))?;
        *slot = config.clone();

        let hidden = self.registry.require_mut(id)?.hidden;
        let mut live = LiveObject::from_config(config);
        live.hidden = hidden;
        self.registry.insert(live);
        Ok(())
    }

    /// Record a keyframe for an object into a scene's motion path, creating
    /// the path and track on demand. Last write wins at an occupied time.
    pub fn record_keyframe(
        &mut self,
        scene_id: SceneId,
        object_id: ObjectId,
        keyframe: Keyframe,
    ) -> Result<(), RuntimeError> {
        let kind = self
            .registry
            .get(object_id)
            .ok_or(RuntimeError::ObjectNotFound(object_id))?
            .kind();

        let scene = self
            .project
            .scene_mut(scene_id)
            .ok_or(EngineError::SceneNotFound(scene_id))
            .map_err(RuntimeError::from)?;
        if !scene.active_objects.contains(object_id) {
            return Err(RuntimeError::UnknownMotionTarget {
                scene_id,
                object_id,
            });
        }

        let duration_ms = scene.duration_ms;
        if scene.motion_path_for(object_id).is_none() {
            scene.set_motion_path(AnimationData::new(object_id, kind, duration_ms));
        }
        let path = scene
            .motion_path_for_mut(object_id)
            .expect("path ensured above");
        path.record_keyframe(keyframe).map_err(RuntimeError::from)
    }

    /// Validate and merge generated motion paths into a scene, replacing
    /// any existing path for the same target.
    ///
    /// Paths targeting objects outside the scene's active sets are rejected
    /// before anything is merged, so a bad batch leaves the scene untouched.
    pub fn merge_generated_motion(
        &mut self,
        scene_id: SceneId,
        paths: Vec<AnimationData>,
    ) -> Result<Vec<MotionPathId>, RuntimeError> {
        let scene = self
            .project
            .scene_mut(scene_id)
            .ok_or(EngineError::SceneNotFound(scene_id))
            .map_err(RuntimeError::from)?;

        for path in &paths {
            if !scene.active_objects.contains(path.target_object_id) {
                return Err(RuntimeError::UnknownMotionTarget {
                    scene_id,
                    object_id: path.target_object_id,
                });
            }
            path.validate().map_err(RuntimeError::from)?;
        }

        let mut merged = Vec::with_capacity(paths.len());
        for path in paths {
            merged.push(path.id);
            scene.set_motion_path(path);
        }
        tracing::info!(scene = %scene_id, count = merged.len(), "generated motion merged");
        Ok(merged)
    }

    /// Describe the project for the motion generator.
    pub fn motion_prompt(&self) -> MotionPrompt {
        MotionPrompt::from_project(&self.project)
    }

    /// Apply a theme to a scene and sync the touched objects back into the
    /// project pool.
    pub fn apply_theme(
        &mut self,
        scene_id: SceneId,
        palette: &ThemePalette,
        script: FontScript,
    ) -> Result<Vec<ObjectId>, RuntimeError> {
        let scene = self
            .project
            .scene_mut(scene_id)
            .ok_or(EngineError::SceneNotFound(scene_id))
            .map_err(RuntimeError::from)?;
        let touched = theme::apply_theme(scene, &mut self.registry, palette, script);

        for id in &touched {
            if let (Some(live), Some(slot)) =
                (self.registry.get(*id), self.project.object_mut(*id))
            {
                *slot = live.to_config();
            }
        }
        Ok(touched)
    }

    /// Write every live object's current state back into the project pool.
    pub fn snapshot_to_project(&mut self) {
        for live in self.registry.iter() {
            if let Some(slot) = self.project.object_mut(live.id()) {
                *slot = live.to_config();
            }
        }
    }

    /// Persist the whole project through the storage collaborator.
    ///
    /// Sections are saved in order; the first failure propagates and the
    /// in-memory project is left untouched for a retry.
    pub fn save_all<S: ProjectStore>(&self, store: &mut S) -> Result<(), RuntimeError> {
        store.save_objects(&self.project.objects)?;
        store.save_scenes(&self.project.scenes)?;
        store.save_timeline(self.project.timeline.as_ref())?;
        store.save_settings(&self.project.settings)?;
        tracing::info!(
            scenes = self.project.scenes.len(),
            objects = self.project.objects.len(),
            "project saved"
        );
        Ok(())
    }

    /// Start previewing a scene.
    pub fn preview_scene(
        &mut self,
        scene_id: SceneId,
        behavior: EndBehavior,
    ) -> Result<(), RuntimeError> {
        self.scheduler
            .preview_scene(&self.project, &mut self.registry, scene_id, behavior)
    }

    /// Start full-timeline playback.
    pub fn play_timeline(&mut self) -> Result<(), RuntimeError> {
        self.scheduler
            .play_timeline(&self.project, &mut self.registry)
    }

    /// Run one scheduler tick, resolving visibility and transforms for the
    /// frame about to be rendered.
    pub fn tick(&mut self) -> Result<PlaybackStatus, RuntimeError> {
        self.scheduler.tick(&self.project, &mut self.registry)
    }

    /// Stop playback synchronously.
    pub fn stop_playback(&mut self) -> Result<(), RuntimeError> {
        self.scheduler.stop(&self.project, &mut self.registry)
    }

    /// Reposition a running preview to a scene-local time.
    pub fn seek_preview(&mut self, local_ms: u64) -> bool {
        self.scheduler.seek_preview(local_ms)
    }

    /// Reposition running timeline playback to a global time.
    pub fn seek_timeline(&mut self, global_ms: u64) -> bool {
        self.scheduler.seek_timeline(global_ms)
    }
}
