// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authoring-time object definitions.
//!
//! Objects live in the project-level pool; scenes reference them by id
//! through their active sets. The editor runtime materializes these configs
//! into live instances, and any live instance can be written back to a
//! config, so the two representations stay mutually reconstructable.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a visual object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The four families of visual objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Vector shape
    Polygon,
    /// Text block
    Text,
    /// Still image
    Image,
    /// Video clip
    Video,
}

/// Resolved per-object transform: the unit handed to the renderer.
///
/// `scale` and `opacity` are percentages (100 = identity / fully opaque).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    /// Horizontal position in canvas coordinates
    pub x: f32,
    /// Vertical position in canvas coordinates
    pub y: f32,
    /// Rotation in degrees
    pub rotation: f32,
    /// Uniform scale percentage
    pub scale: f32,
    /// Opacity percentage in `[0, 100]`
    pub opacity: f32,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 100.0,
            opacity: 100.0,
        }
    }
}

/// Vector shape definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonConfig {
    /// Object id
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Authoring-time transform
    pub transform: ObjectTransform,
    /// Number of sides (3 = triangle, large values approximate a circle)
    pub sides: u32,
    /// Fill color
    pub fill: Rgba,
    /// Bounding width in canvas units
    pub width: f32,
    /// Bounding height in canvas units
    pub height: f32,
}

/// Text block definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Object id
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Authoring-time transform
    pub transform: ObjectTransform,
    /// Text content
    pub content: String,
    /// Glyph fill color
    pub fill: Rgba,
    /// Fill of the text block behind the glyphs
    pub background: Rgba,
    /// Font family name
    pub font_family: String,
    /// Font size in canvas units
    pub font_size: f32,
}

/// Still image definition. The runtime stores only the media URL and its
/// reported dimensions; bytes never flow through the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Object id
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Authoring-time transform
    pub transform: ObjectTransform,
    /// Stable media URL from the upload collaborator
    pub url: String,
    /// Intrinsic width in pixels
    pub width: u32,
    /// Intrinsic height in pixels
    pub height: u32,
}

/// Video clip definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Object id
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Authoring-time transform
    pub transform: ObjectTransform,
    /// Stable media URL from the upload collaborator
    pub url: String,
    /// Intrinsic width in pixels
    pub width: u32,
    /// Intrinsic height in pixels
    pub height: u32,
}

/// A persisted object definition.
///
/// The tagged encoding is part of the project wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectConfig {
    /// Vector shape
    Polygon(PolygonConfig),
    /// Text block
    Text(TextConfig),
    /// Still image
    Image(ImageConfig),
    /// Video clip
    Video(VideoConfig),
}

impl ObjectConfig {
    /// The object's id.
    pub fn id(&self) -> ObjectId {
        match self {
            ObjectConfig::Polygon(c) => c.id,
            ObjectConfig::Text(c) => c.id,
            ObjectConfig::Image(c) => c.id,
            ObjectConfig::Video(c) => c.id,
        }
    }

    /// The object's display name.
    pub fn name(&self) -> &str {
        match self {
            ObjectConfig::Polygon(c) => &c.name,
            ObjectConfig::Text(c) => &c.name,
            ObjectConfig::Image(c) => &c.name,
            ObjectConfig::Video(c) => &c.name,
        }
    }

    /// Which object family this config belongs to.
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectConfig::Polygon(_) => ObjectKind::Polygon,
            ObjectConfig::Text(_) => ObjectKind::Text,
            ObjectConfig::Image(_) => ObjectKind::Image,
            ObjectConfig::Video(_) => ObjectKind::Video,
        }
    }

    /// The authoring-time transform.
    pub fn transform(&self) -> &ObjectTransform {
        match self {
            ObjectConfig::Polygon(c) => &c.transform,
            ObjectConfig::Text(c) => &c.transform,
            ObjectConfig::Image(c) => &c.transform,
            ObjectConfig::Video(c) => &c.transform,
        }
    }

    /// Mutable access to the authoring-time transform.
    pub fn transform_mut(&mut self) -> &mut ObjectTransform {
        match self {
            ObjectConfig::Polygon(c) => &mut c.transform,
            ObjectConfig::Text(c) => &mut c.transform,
            ObjectConfig::Image(c) => &mut c.transform,
            ObjectConfig::Video(c) => &mut c.transform,
        }
    }
}
