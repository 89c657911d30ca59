// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persistence collaborator seam.
//!
//! The engine treats project storage as an external collaborator with
//! atomic, all-or-nothing calls. A failed call leaves the in-memory project
//! untouched; the caller retries or surfaces the error.

use crate::error::RuntimeError;
use motiondeck_engine::{ObjectConfig, ProjectSettings, ProjectState, Scene, Timeline};
use uuid::Uuid;

/// External project storage.
pub trait ProjectStore {
    /// Load a complete project document by id.
    fn load_project(&self, id: Uuid) -> Result<ProjectState, RuntimeError>;

    /// Persist the object pool.
    fn save_objects(&mut self, objects: &[ObjectConfig]) -> Result<(), RuntimeError>;

    /// Persist the scene list.
    fn save_scenes(&mut self, scenes: &[Scene]) -> Result<(), RuntimeError>;

    /// Persist the master timeline (or its absence).
    fn save_timeline(&mut self, timeline: Option<&Timeline>) -> Result<(), RuntimeError>;

    /// Persist project settings.
    fn save_settings(&mut self, settings: &ProjectSettings) -> Result<(), RuntimeError>;
}

/// In-memory store used in tests and as a reference implementation.
///
/// Sections are kept as the persisted JSON documents, so loading exercises
/// the same wire contract as a database-backed store would.
#[derive(Debug)]
pub struct MemoryProjectStore {
    objects: String,
    scenes: String,
    timeline: Option<String>,
    settings: String,
}

impl Default for MemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            objects: "[]".into(),
            scenes: "[]".into(),
            timeline: None,
            settings: serde_json::to_string(&ProjectSettings::default())
                .unwrap_or_else(|_| "{}".into()),
        }
    }
}

impl ProjectStore for MemoryProjectStore {
    fn load_project(&self, id: Uuid) -> Result<ProjectState, RuntimeError> {
        let objects: Vec<ObjectConfig> = serde_json::from_str(&self.objects)
            .map_err(|e| RuntimeError::StoreFailure(e.to_string()))?;
        let scenes: Vec<Scene> = serde_json::from_str(&self.scenes)
            .map_err(|e| RuntimeError::StoreFailure(e.to_string()))?;
        let timeline: Option<Timeline> = match &self.timeline {
            Some(json) => Some(
                serde_json::from_str(json)
                    .map_err(|e| RuntimeError::StoreFailure(e.to_string()))?,
            ),
            None => None,
        };
        let settings: ProjectSettings = serde_json::from_str(&self.settings)
            .map_err(|e| RuntimeError::StoreFailure(e.to_string()))?;

        tracing::debug!(project = %id, "loaded project from memory store");
        Ok(ProjectState {
            objects,
            scenes,
            timeline,
            settings,
        })
    }

    fn save_objects(&mut self, objects: &[ObjectConfig]) -> Result<(), RuntimeError> {
        self.objects =
            serde_json::to_string(objects).map_err(|e| RuntimeError::StoreFailure(e.to_string()))?;
        Ok(())
    }

    fn save_scenes(&mut self, scenes: &[Scene]) -> Result<(), RuntimeError> {
        self.scenes =
            serde_json::to_string(scenes).map_err(|e| RuntimeError::StoreFailure(e.to_string()))?;
        Ok(())
    }

    fn save_timeline(&mut self, timeline: Option<&Timeline>) -> Result<(), RuntimeError> {
        self.timeline = match timeline {
            Some(t) => Some(
                serde_json::to_string(t).map_err(|e| RuntimeError::StoreFailure(e.to_string()))?,
            ),
            None => None,
        };
        Ok(())
    }

    fn save_settings(&mut self, settings: &ProjectSettings) -> Result<(), RuntimeError> {
        self.settings = serde_json::to_string(settings)
            .map_err(|e| RuntimeError::StoreFailure(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_empty_project() {
        let store = MemoryProjectStore::new();
        let project = store.load_project(Uuid::new_v4()).unwrap();
        assert!(project.objects.is_empty());
        assert!(project.scenes.is_empty());
        assert!(project.timeline.is_none());
    }

    #[test]
    fn sections_round_trip_through_the_store() {
        let mut store = MemoryProjectStore::new();
        let mut project = ProjectState::new();
        project.add_scene(Scene::new("intro", 1500));
        project.timeline = Some(Timeline::new());

        store.save_objects(&project.objects).unwrap();
        store.save_scenes(&project.scenes).unwrap();
        store.save_timeline(project.timeline.as_ref()).unwrap();
        store.save_settings(&project.settings).unwrap();

        let loaded = store.load_project(Uuid::new_v4()).unwrap();
        assert_eq!(loaded, project);
    }
}
