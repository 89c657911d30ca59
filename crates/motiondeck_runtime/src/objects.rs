// SPDX-License-Identifier: MIT OR Apache-2.0
//! Live object registry.
//!
//! Live objects mirror the project's object pool inside one runtime
//! instance: each wraps its authoring config plus the transient state the
//! scheduler writes every tick (visibility, resolved transform, attached
//! motion path). The registry is a derived cache keyed by object id — the
//! project document stays authoritative, and the registry can always be
//! rebuilt from it.

use crate::error::RuntimeError;
use indexmap::IndexMap;
use motiondeck_engine::{
    MotionPathId, ObjectConfig, ObjectId, ObjectKind, ObjectTransform, SampledProperties, Scene,
    TextConfig,
};

/// A live instance of one visual object.
#[derive(Debug, Clone)]
pub struct LiveObject {
    config: ObjectConfig,
    /// Whether the object is currently hidden
    pub hidden: bool,
    /// Resolved transform for the current frame
    pub transform: ObjectTransform,
    motion_path: Option<MotionPathId>,
}

impl LiveObject {
    /// Materialize a live object from its authoring config.
    ///
    /// The live transform starts at the authoring transform; objects are
    /// created hidden until a scene restore shows them.
    pub fn from_config(config: ObjectConfig) -> Self {
        let transform = *config.transform();
        Self {
            config,
            hidden: true,
            transform,
            motion_path: None,
        }
    }

    /// The object's id.
    pub fn id(&self) -> ObjectId {
        self.config.id()
    }

    /// The object's family.
    pub fn kind(&self) -> ObjectKind {
        self.config.kind()
    }

    /// The object's display name.
    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// The authoring config backing this instance.
    pub fn config(&self) -> &ObjectConfig {
        &self.config
    }

    /// Mutable access to the authoring config.
    pub fn config_mut(&mut self) -> &mut ObjectConfig {
        &mut self.config
    }

    /// The text config, if this object is a text block.
    pub fn as_text(&self) -> Option<&TextConfig> {
        match &self.config {
            ObjectConfig::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable text config, if this object is a text block.
    pub fn as_text_mut(&mut self) -> Option<&mut TextConfig> {
        match &mut self.config {
            ObjectConfig::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The motion path currently attached by a scene restore.
    pub fn motion_path(&self) -> Option<MotionPathId> {
        self.motion_path
    }

    /// Overwrite the live transform with sampled property values.
    ///
    /// Unsampled properties keep their last-known value.
    pub fn apply_sample(&mut self, sampled: &SampledProperties) {
        if let Some((x, y)) = sampled.position {
            self.transform.x = x;
            self.transform.y = y;
        }
        if let Some(rotation) = sampled.rotation {
            self.transform.rotation = rotation;
        }
        if let Some(scale) = sampled.scale {
            self.transform.scale = scale;
        }
        if let Some(opacity) = sampled.opacity {
            self.transform.opacity = opacity.clamp(0.0, 100.0);
        }
    }

    /// Capture this instance back into a persistable config, writing the
    /// current transform through.
    pub fn to_config(&self) -> ObjectConfig {
        let mut config = self.config.clone();
        *config.transform_mut() = self.transform;
        config
    }
}

/// All live objects of one runtime instance, keyed by id.
///
/// Insertion order is preserved; it doubles as draw order for the renderer.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: IndexMap<ObjectId, LiveObject>,
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the registry from a project's object pool, discarding all
    /// transient state.
    pub fn rebuild_from(configs: &[ObjectConfig]) -> Self {
        let objects = configs
            .iter()
            .map(|config| (config.id(), LiveObject::from_config(config.clone())))
            .collect();
        Self { objects }
    }

    /// Insert a live object, replacing any instance with the same id.
    pub fn insert(&mut self, object: LiveObject) {
        self.objects.insert(object.id(), object);
    }

    /// Remove a live object.
    pub fn remove(&mut self, id: ObjectId) -> Option<LiveObject> {
        self.objects.shift_remove(&id)
    }

    /// Get a live object.
    pub fn get(&self, id: ObjectId) -> Option<&LiveObject> {
        self.objects.get(&id)
    }

    /// Get a mutable live object.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut LiveObject> {
        self.objects.get_mut(&id)
    }

    /// Get a mutable live object, or [`RuntimeError::ObjectNotFound`].
    pub fn require_mut(&mut self, id: ObjectId) -> Result<&mut LiveObject, RuntimeError> {
        self.objects
            .get_mut(&id)
            .ok_or(RuntimeError::ObjectNotFound(id))
    }

    /// Iterate over all live objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LiveObject> {
        self.objects.values()
    }

    /// Iterate mutably over all live objects.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LiveObject> {
        self.objects.values_mut()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Hide every object.
    pub fn hide_all(&mut self) {
        for object in self.objects.values_mut() {
            object.hidden = true;
        }
    }

    /// Unhide the objects a scene activates, without touching the rest.
    ///
    /// A missing live object is a hard error.
    pub fn unhide_scene(&mut self, scene: &Scene) -> Result<(), RuntimeError> {
        for id in scene.active_objects.iter() {
            self.require_mut(id)?.hidden = false;
        }
        Ok(())
    }

    /// Restore a scene's visibility state and motion-path attachments.
    ///
    /// Hides everything, unhides the scene's active objects, then attaches
    /// the scene's motion paths to their targets. Idempotent: a second call
    /// produces the same state.
    pub fn restore(&mut self, scene: &Scene) -> Result<(), RuntimeError> {
        self.hide_all();
        self.unhide_scene(scene)?;

        for object in self.objects.values_mut() {
            object.motion_path = None;
        }
        for path in &scene.motion_paths {
            self.require_mut(path.target_object_id)?.motion_path = Some(path.id);
        }
        Ok(())
    }

    /// Apply sampled properties to one object's live transform.
    pub fn apply_sample(
        &mut self,
        id: ObjectId,
        sampled: &SampledProperties,
    ) -> Result<(), RuntimeError> {
        self.require_mut(id)?.apply_sample(sampled);
        Ok(())
    }

    /// Capture every live transform, for restoring after a preview.
    pub fn transform_snapshot(&self) -> Vec<(ObjectId, ObjectTransform)> {
        self.objects
            .values()
            .map(|o| (o.id(), o.transform))
            .collect()
    }

    /// Re-apply a transform snapshot. Objects removed since the snapshot
    /// was taken are skipped.
    pub fn apply_transform_snapshot(&mut self, snapshot: &[(ObjectId, ObjectTransform)]) {
        for (id, transform) in snapshot {
            if let Some(object) = self.objects.get_mut(id) {
                object.transform = *transform;
            }
        }
    }

    /// Capture the whole registry back into persistable configs.
    pub fn to_configs(&self) -> Vec<ObjectConfig> {
        self.objects.values().map(LiveObject::to_config).collect()
    }
}
