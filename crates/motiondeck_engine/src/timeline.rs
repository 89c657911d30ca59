// SPDX-License-Identifier: MIT OR Apache-2.0
//! Master timeline: scenes arranged on time-offset placements.

use crate::error::EngineError;
use crate::scene::{Scene, SceneId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a timeline placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementId(pub Uuid);

impl PlacementId {
    /// Create a new random placement ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlacementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Which master-timeline track a placement sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineTrackKind {
    /// Visual track
    Video,
    /// Audio track
    Audio,
}

/// One scene placed on the master timeline at a start offset.
///
/// A placement is active at global time `g` iff
/// `start_time_ms <= g < start_time_ms + scene.duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePlacement {
    /// Unique placement id
    pub id: PlacementId,
    /// The placed scene
    pub scene_id: SceneId,
    /// Track this placement sits on
    pub track_kind: TimelineTrackKind,
    /// Offset from timeline start, in milliseconds
    pub start_time_ms: u64,
}

impl TimelinePlacement {
    /// Create a placement for a scene.
    pub fn new(scene_id: SceneId, track_kind: TimelineTrackKind, start_time_ms: u64) -> Self {
        Self {
            id: PlacementId::new(),
            scene_id,
            track_kind,
            start_time_ms,
        }
    }
}

/// The master timeline: an ordered list of scene placements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Scene placements across all track kinds
    pub placements: Vec<TimelinePlacement>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placement.
    pub fn add_placement(&mut self, placement: TimelinePlacement) -> PlacementId {
        let id = placement.id;
        self.placements.push(placement);
        id
    }

    /// Remove a placement by id.
    pub fn remove_placement(&mut self, id: PlacementId) -> Option<TimelinePlacement> {
        let idx = self.placements.iter().position(|p| p.id == id)?;
        Some(self.placements.remove(idx))
    }

    /// Drop every placement referencing a scene.
    pub fn remove_scene(&mut self, scene_id: SceneId) {
        self.placements.retain(|p| p.scene_id != scene_id);
    }

    /// Placements on one track kind, in insertion order.
    pub fn placements_for(&self, kind: TimelineTrackKind) -> Vec<&TimelinePlacement> {
        self.placements
            .iter()
            .filter(|p| p.track_kind == kind)
            .collect()
    }

    /// End of the last placement across all tracks, in milliseconds.
    ///
    /// Placements whose scene cannot be resolved contribute nothing.
    pub fn end_time_ms(&self, scenes: &[Scene]) -> u64 {
        self.placements
            .iter()
            .filter_map(|p| {
                scene_duration(scenes, p.scene_id).map(|d| p.start_time_ms + d)
            })
            .max()
            .unwrap_or(0)
    }

    /// The placements active at a global time, at most one per track kind.
    ///
    /// When several placements on the same track are simultaneously active
    /// the one with the latest `start_time_ms` wins and a consistency
    /// warning is logged; overlapping placements are ambiguous input, never
    /// silently resolved to the first match.
    pub fn active_placements<'a>(
        &'a self,
        scenes: &[Scene],
        global_ms: u64,
    ) -> Vec<&'a TimelinePlacement> {
        let mut chosen = Vec::new();
        for kind in [TimelineTrackKind::Video, TimelineTrackKind::Audio] {
            let active: Vec<&TimelinePlacement> = self
                .placements
                .iter()
                .filter(|p| p.track_kind == kind)
                .filter(|p| {
                    let Some(duration) = scene_duration(scenes, p.scene_id) else {
                        return false;
                    };
                    global_ms >= p.start_time_ms && global_ms - p.start_time_ms < duration
                })
                .collect();

            if active.len() > 1 {
                tracing::warn!(
                    track = ?kind,
                    global_ms,
                    count = active.len(),
                    "ambiguous timeline overlap; picking latest start_time"
                );
            }
            if let Some(winner) = active.iter().max_by_key(|p| p.start_time_ms) {
                chosen.push(*winner);
            }
        }
        chosen
    }

    /// Validate the timeline against the scene list.
    ///
    /// A placement referencing an unknown scene is an error; same-track
    /// overlaps are reported as warnings (and logged), since playback
    /// resolves them with the latest-start policy.
    pub fn validate(&self, scenes: &[Scene]) -> Result<Vec<String>, EngineError> {
        for placement in &self.placements {
            if scene_duration(scenes, placement.scene_id).is_none() {
                return Err(EngineError::SceneNotFound(placement.scene_id));
            }
        }

        let mut warnings = Vec::new();
        for kind in [TimelineTrackKind::Video, TimelineTrackKind::Audio] {
            let mut spans: Vec<(u64, u64, SceneId)> = self
                .placements
                .iter()
                .filter(|p| p.track_kind == kind)
                .filter_map(|p| {
                    scene_duration(scenes, p.scene_id)
                        .map(|d| (p.start_time_ms, p.start_time_ms + d, p.scene_id))
                })
                .collect();
            spans.sort_by_key(|s| s.0);

            for pair in spans.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if b.0 < a.1 {
                    let warning = format!(
                        "placements for scenes {} and {} overlap on the {:?} track ({}ms..{}ms vs {}ms..)",
                        a.2, b.2, kind, a.0, a.1, b.0
                    );
                    tracing::warn!(track = ?kind, "{warning}");
                    warnings.push(warning);
                }
            }
        }
        Ok(warnings)
    }
}

/// Duration of a scene by id, if it exists.
fn scene_duration(scenes: &[Scene], id: SceneId) -> Option<u64> {
    scenes.iter().find(|s| s.id == id).map(|s| s.duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_scene_setup() -> (Vec<Scene>, Timeline) {
        let a = Scene::new("a", 1000);
        let b = Scene::new("b", 1000);
        let mut timeline = Timeline::new();
        timeline.add_placement(TimelinePlacement::new(a.id, TimelineTrackKind::Video, 0));
        timeline.add_placement(TimelinePlacement::new(b.id, TimelineTrackKind::Video, 1000));
        (vec![a, b], timeline)
    }

    #[test]
    fn placement_active_window_is_half_open() {
        let (scenes, timeline) = two_scene_setup();

        let active = timeline.active_placements(&scenes, 999);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].scene_id, scenes[0].id);

        let active = timeline.active_placements(&scenes, 1000);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].scene_id, scenes[1].id);
    }

    #[test]
    fn no_active_placement_past_the_end() {
        let (scenes, timeline) = two_scene_setup();
        assert!(timeline.active_placements(&scenes, 2000).is_empty());
        assert_eq!(timeline.end_time_ms(&scenes), 2000);
    }

    #[test]
    fn overlap_resolves_to_latest_start() {
        let a = Scene::new("a", 2000);
        let b = Scene::new("b", 2000);
        let mut timeline = Timeline::new();
        timeline.add_placement(TimelinePlacement::new(a.id, TimelineTrackKind::Video, 0));
        timeline.add_placement(TimelinePlacement::new(b.id, TimelineTrackKind::Video, 500));
        let scenes = vec![a, b];

        let active = timeline.active_placements(&scenes, 1000);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].scene_id, scenes[1].id);
    }

    #[test]
    fn tracks_are_independent() {
        let a = Scene::new("a", 1000);
        let b = Scene::new("b", 1000);
        let mut timeline = Timeline::new();
        timeline.add_placement(TimelinePlacement::new(a.id, TimelineTrackKind::Video, 0));
        timeline.add_placement(TimelinePlacement::new(b.id, TimelineTrackKind::Audio, 0));
        let scenes = vec![a, b];

        let active = timeline.active_placements(&scenes, 500);
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn validate_rejects_unknown_scene() {
        let mut timeline = Timeline::new();
        timeline.add_placement(TimelinePlacement::new(
            SceneId::new(),
            TimelineTrackKind::Video,
            0,
        ));
        assert!(matches!(
            timeline.validate(&[]),
            Err(EngineError::SceneNotFound(_))
        ));
    }

    #[test]
    fn validate_reports_overlap_as_warning() {
        let a = Scene::new("a", 2000);
        let b = Scene::new("b", 2000);
        let mut timeline = Timeline::new();
        timeline.add_placement(TimelinePlacement::new(a.id, TimelineTrackKind::Video, 0));
        timeline.add_placement(TimelinePlacement::new(b.id, TimelineTrackKind::Video, 500));
        let scenes = vec![a, b];

        let warnings = timeline.validate(&scenes).unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn adjacent_placements_do_not_warn() {
        let (scenes, timeline) = two_scene_setup();
        assert!(timeline.validate(&scenes).unwrap().is_empty());
    }

    #[test]
    fn remove_scene_drops_its_placements() {
        let (scenes, mut timeline) = two_scene_setup();
        timeline.remove_scene(scenes[0].id);
        assert_eq!(timeline.placements.len(), 1);
        assert_eq!(timeline.placements[0].scene_id, scenes[1].id);
    }
}
