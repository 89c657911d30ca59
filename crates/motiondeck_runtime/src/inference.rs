// SPDX-License-Identifier: MIT OR Apache-2.0
//! Motion-generation collaborator seam.
//!
//! An external inference service receives a prompt describing the current
//! project (object ids, kinds, canvas dimensions, positions) and returns
//! predicted motion paths in the engine's own shape. The runtime validates
//! the returned data before merging it into a scene.

use crate::error::RuntimeError;
use motiondeck_engine::{
    AnimationData, CanvasDimensions, ObjectConfig, ObjectId, ObjectKind, ProjectState,
};
use serde::Serialize;

/// One object as described to the generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptObject {
    /// Object id; generated paths must target one of these
    pub id: ObjectId,
    /// Object family
    pub kind: ObjectKind,
    /// Authoring x position
    pub x: f32,
    /// Authoring y position
    pub y: f32,
    /// Layout width, when the object has intrinsic dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Layout height, when the object has intrinsic dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Serialized prompt handed to the motion generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionPrompt {
    /// Canvas the motion plays on
    pub canvas: CanvasDimensions,
    /// Objects available for animation
    pub objects: Vec<PromptObject>,
}

impl MotionPrompt {
    /// Describe a project's object pool for the generator.
    pub fn from_project(project: &ProjectState) -> Self {
        let objects = project
            .objects
            .iter()
            .map(|config| {
                let transform = config.transform();
                let (width, height) = match config {
                    ObjectConfig::Polygon(p) => (Some(p.width), Some(p.height)),
                    ObjectConfig::Image(i) => (Some(i.width as f32), Some(i.height as f32)),
                    ObjectConfig::Video(v) => (Some(v.width as f32), Some(v.height as f32)),
                    ObjectConfig::Text(_) => (None, None),
                };
                PromptObject {
                    id: config.id(),
                    kind: config.kind(),
                    x: transform.x,
                    y: transform.y,
                    width,
                    height,
                }
            })
            .collect();

        Self {
            canvas: project.settings.canvas,
            objects,
        }
    }

    /// Serialize the prompt for the wire.
    pub fn to_json(&self) -> Result<String, RuntimeError> {
        serde_json::to_string(self).map_err(|e| RuntimeError::StoreFailure(e.to_string()))
    }
}

/// External motion generator.
pub trait MotionGenerator {
    /// Produce motion paths for the prompted objects.
    fn generate(&self, prompt: &MotionPrompt) -> Result<Vec<AnimationData>, RuntimeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use motiondeck_engine::{ObjectTransform, PolygonConfig, Rgba, TextConfig};

    #[test]
    fn prompt_describes_pool_with_dimensions() {
        let mut project = ProjectState::new();
        project.add_object(ObjectConfig::Polygon(PolygonConfig {
            id: ObjectId::new(),
            name: "shape".into(),
            transform: ObjectTransform {
                x: 12.0,
                y: 34.0,
                ..Default::default()
            },
            sides: 6,
            fill: Rgba::WHITE,
            width: 80.0,
            height: 60.0,
        }));
        project.add_object(ObjectConfig::Text(TextConfig {
            id: ObjectId::new(),
            name: "caption".into(),
            transform: ObjectTransform::default(),
            content: "hi".into(),
            fill: Rgba::BLACK,
            background: Rgba::WHITE,
            font_family: "Inter".into(),
            font_size: 16.0,
        }));

        let prompt = MotionPrompt::from_project(&project);
        assert_eq!(prompt.objects.len(), 2);
        assert_eq!(prompt.objects[0].x, 12.0);
        assert_eq!(prompt.objects[0].width, Some(80.0));
        assert_eq!(prompt.objects[1].width, None);
        assert_eq!(prompt.canvas.width, 1920);

        let json = prompt.to_json().unwrap();
        assert!(json.contains("\"canvas\""));
    }
}
