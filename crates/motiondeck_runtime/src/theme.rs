// SPDX-License-Identifier: MIT OR Apache-2.0
//! Theme application: scene background and text styling from a palette.

use crate::objects::ObjectRegistry;
use motiondeck_engine::{BackgroundFill, ObjectId, Rgba, Scene};

/// Darkening applied to a themed text color to produce the text block's
/// secondary fill.
pub const TEXT_DARKEN_FACTOR: f32 = 0.15;

/// A background/text color pair from the discrete palette table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Scene background color; also applied to themed text glyphs
    pub background: Rgba,
    /// Contrasting color, used as the far gradient stop
    pub text: Rgba,
}

/// The discrete palette table themes are picked from.
pub const PALETTES: [ThemePalette; 6] = [
    ThemePalette {
        background: Rgba::from_rgb(24, 24, 32),
        text: Rgba::from_rgb(240, 240, 245),
    },
    ThemePalette {
        background: Rgba::from_rgb(250, 247, 240),
        text: Rgba::from_rgb(30, 30, 30),
    },
    ThemePalette {
        background: Rgba::from_rgb(12, 59, 46),
        text: Rgba::from_rgb(236, 223, 204),
    },
    ThemePalette {
        background: Rgba::from_rgb(43, 45, 66),
        text: Rgba::from_rgb(237, 242, 244),
    },
    ThemePalette {
        background: Rgba::from_rgb(255, 241, 230),
        text: Rgba::from_rgb(106, 76, 147),
    },
    ThemePalette {
        background: Rgba::from_rgb(8, 28, 21),
        text: Rgba::from_rgb(255, 203, 105),
    },
];

/// Script family used to pick a font pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontScript {
    /// Latin scripts
    #[default]
    Latin,
    /// Devanagari scripts
    Devanagari,
}

const LATIN_FONTS: &[&str] = &[
    "Inter",
    "Playfair Display",
    "Space Grotesk",
    "IBM Plex Sans",
    "Fraunces",
];

const DEVANAGARI_FONTS: &[&str] = &[
    "Mukta",
    "Hind",
    "Tiro Devanagari Sanskrit",
    "Noto Sans Devanagari",
];

impl FontScript {
    /// The disjoint font pool for this script.
    pub fn fonts(self) -> &'static [&'static str] {
        match self {
            FontScript::Latin => LATIN_FONTS,
            FontScript::Devanagari => DEVANAGARI_FONTS,
        }
    }
}

/// Pick a font from the script's pool, keyed off the palette so the same
/// theme always selects the same face.
fn select_font(palette: &ThemePalette, script: FontScript) -> &'static str {
    let pool = script.fonts();
    let key = palette.background.r as usize
        + palette.background.g as usize
        + palette.background.b as usize;
    pool[key % pool.len()]
}

/// Apply a theme to a scene and its currently visible text objects.
///
/// Rewrites the scene background to a two-stop linear gradient between the
/// palette colors, recolors every visible text object's glyph fill to the
/// palette's background color, sets the font family from the script pool,
/// and fills the text block behind the glyphs with a darkened variant of
/// the glyph color. Each invocation fully overwrites the previous theme;
/// themes do not compose.
///
/// Returns the ids of the text objects that were touched.
pub fn apply_theme(
    scene: &mut Scene,
    registry: &mut ObjectRegistry,
    palette: &ThemePalette,
    script: FontScript,
) -> Vec<ObjectId> {
    scene.background_fill = BackgroundFill::linear_gradient(palette.background, palette.text);

    let font = select_font(palette, script);
    let glyph_fill = palette.background;
    let block_fill = glyph_fill.darkened(TEXT_DARKEN_FACTOR);

    let mut touched = Vec::new();
    for object in registry.iter_mut() {
        if object.hidden {
            continue;
        }
        let id = object.id();
        let Some(text) = object.as_text_mut() else {
            continue;
        };
        text.fill = glyph_fill;
        text.background = block_fill;
        text.font_family = font.to_string();
        touched.push(id);
    }

    tracing::debug!(
        scene = %scene.id,
        touched = touched.len(),
        font,
        "theme applied"
    );
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::LiveObject;
    use motiondeck_engine::{
        GradientKind, ObjectConfig, ObjectTransform, TextConfig,
    };

    fn text_object(name: &str) -> ObjectConfig {
        ObjectConfig::Text(TextConfig {
            id: ObjectId::new(),
            name: name.into(),
            transform: ObjectTransform::default(),
            content: "sample".into(),
            fill: Rgba::from_rgb(1, 2, 3),
            background: Rgba::from_rgb(4, 5, 6),
            font_family: "Arial".into(),
            font_size: 24.0,
        })
    }

    #[test]
    fn theme_rewrites_background_to_two_stop_gradient() {
        let mut scene = Scene::new("intro", 1000);
        let mut registry = ObjectRegistry::new();
        apply_theme(&mut scene, &mut registry, &PALETTES[0], FontScript::Latin);

        let BackgroundFill::Gradient { stops, kind, .. } = &scene.background_fill else {
            panic!("expected gradient background");
        };
        assert_eq!(stops.len(), 2);
        assert_eq!(*kind, GradientKind::Linear);
        assert_eq!(stops[0].color, PALETTES[0].background);
        assert_eq!(stops[1].color, PALETTES[0].text);
    }

    #[test]
    fn theme_recolors_visible_text_only() {
        let mut scene = Scene::new("intro", 1000);
        let mut registry = ObjectRegistry::new();

        let mut visible = LiveObject::from_config(text_object("visible"));
        visible.hidden = false;
        let visible_id = visible.id();
        registry.insert(visible);

        let hidden = LiveObject::from_config(text_object("hidden"));
        let hidden_id = hidden.id();
        registry.insert(hidden);

        let palette = &PALETTES[1];
        let touched = apply_theme(&mut scene, &mut registry, palette, FontScript::Latin);

        assert_eq!(touched, vec![visible_id]);
        let themed = registry.get(visible_id).unwrap().as_text().unwrap().clone();
        assert_eq!(themed.fill, palette.background);
        assert_eq!(
            themed.background,
            palette.background.darkened(TEXT_DARKEN_FACTOR)
        );
        assert!(FontScript::Latin.fonts().contains(&themed.font_family.as_str()));

        let untouched = registry.get(hidden_id).unwrap().as_text().unwrap().clone();
        assert_eq!(untouched.fill, Rgba::from_rgb(1, 2, 3));
    }

    #[test]
    fn reapplying_a_different_theme_fully_overwrites() {
        let mut scene = Scene::new("intro", 1000);
        let mut registry = ObjectRegistry::new();

        let mut text = LiveObject::from_config(text_object("t"));
        text.hidden = false;
        let id = text.id();
        registry.insert(text);

        apply_theme(&mut scene, &mut registry, &PALETTES[0], FontScript::Latin);
        apply_theme(&mut scene, &mut registry, &PALETTES[2], FontScript::Devanagari);

        let themed = registry.get(id).unwrap().as_text().unwrap().clone();
        assert_eq!(themed.fill, PALETTES[2].background);
        assert!(FontScript::Devanagari
            .fonts()
            .contains(&themed.font_family.as_str()));

        let BackgroundFill::Gradient { stops, .. } = &scene.background_fill else {
            panic!("expected gradient background");
        };
        assert_eq!(stops[0].color, PALETTES[2].background);
    }

    #[test]
    fn font_pools_are_disjoint() {
        for latin in FontScript::Latin.fonts() {
            assert!(!FontScript::Devanagari.fonts().contains(latin));
        }
    }

    #[test]
    fn font_selection_is_deterministic_per_palette() {
        let a = select_font(&PALETTES[3], FontScript::Latin);
        let b = select_font(&PALETTES[3], FontScript::Latin);
        assert_eq!(a, b);
    }
}
