// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback scheduler.
//!
//! A stateful clock that, given the project state and wall-clock time,
//! computes visibility and interpolated transforms for every live object.
//! Two playback modes exist — single-scene preview and full-timeline
//! playback — and at most one is active at a time; entering one stops the
//! other first. The scheduler only reads the project state; all its writes
//! go to the registry's transient per-object state.

use crate::clock::Clock;
use crate::error::RuntimeError;
use crate::objects::ObjectRegistry;
use motiondeck_engine::{
    EngineError, ObjectId, ObjectTransform, ProjectState, Scene, SceneId,
};

/// What a scene preview does when the local clock passes the scene's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndBehavior {
    /// Stop playback and restore the authoring snapshot
    #[default]
    StopAndRestore,
    /// Wrap the local clock and keep playing
    Loop,
}

/// Scheduler state machine.
#[derive(Debug)]
enum Mode {
    Idle,
    PreviewingScene {
        scene_id: SceneId,
        started_at: u64,
        behavior: EndBehavior,
        snapshot: Vec<(ObjectId, ObjectTransform)>,
    },
    PlayingTimeline {
        started_at: u64,
    },
}

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No playback mode is active
    Idle,
    /// A scene preview is running
    Previewing {
        /// The previewed scene
        scene_id: SceneId,
        /// Scene-local time of this tick
        local_ms: u64,
    },
    /// Full-timeline playback is running
    PlayingTimeline {
        /// Global timeline time of this tick
        global_ms: u64,
        /// Scenes active on this tick, at most one per track kind
        active_scenes: Vec<SceneId>,
    },
    /// Playback ended on this tick and the scheduler returned to idle
    Finished,
}

/// Frame-driven playback scheduler over an injectable clock.
#[derive(Debug)]
pub struct PlaybackScheduler<C: Clock> {
    clock: C,
    mode: Mode,
}

impl<C: Clock> PlaybackScheduler<C> {
    /// Create an idle scheduler.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            mode: Mode::Idle,
        }
    }

    /// Whether no playback mode is active.
    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Idle)
    }

    /// Whether a scene preview is running.
    pub fn is_previewing(&self) -> bool {
        matches!(self.mode, Mode::PreviewingScene { .. })
    }

    /// Whether full-timeline playback is running.
    pub fn is_playing_timeline(&self) -> bool {
        matches!(self.mode, Mode::PlayingTimeline { .. })
    }

    /// Start previewing one scene.
    ///
    /// Stops any active playback first, snapshots the authoring transforms
    /// so a later stop can restore them, and applies the scene's visibility.
    pub fn preview_scene(
        &mut self,
        project: &ProjectState,
        registry: &mut ObjectRegistry,
        scene_id: SceneId,
        behavior: EndBehavior,
    ) -> Result<(), RuntimeError> {
        self.stop(project, registry)?;

        let scene = project.require_scene(scene_id).map_err(RuntimeError::from)?;
        let snapshot = registry.transform_snapshot();
        registry.restore(scene)?;

        self.mode = Mode::PreviewingScene {
            scene_id,
            started_at: self.clock.now_ms(),
            behavior,
            snapshot,
        };
        tracing::info!(scene = %scene_id, ?behavior, "scene preview started");
        Ok(())
    }

    /// Start full-timeline playback.
    pub fn play_timeline(
        &mut self,
        project: &ProjectState,
        registry: &mut ObjectRegistry,
    ) -> Result<(), RuntimeError> {
        self.stop(project, registry)?;

        if project.timeline.is_none() {
            return Err(EngineError::InvalidTimelineState(
                "project has no master timeline".into(),
            )
            .into());
        }

        self.mode = Mode::PlayingTimeline {
            started_at: self.clock.now_ms(),
        };
        tracing::info!("timeline playback started");
        Ok(())
    }

    /// Stop playback synchronously.
    ///
    /// Stopping a preview restores the authoring snapshot (transforms and
    /// scene visibility) before returning, so editing can resume
    /// immediately. Stopping timeline playback leaves the last-rendered
    /// frame in place. Idle is a no-op.
    pub fn stop(
        &mut self,
        project: &ProjectState,
        registry: &mut ObjectRegistry,
    ) -> Result<(), RuntimeError> {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Idle => Ok(()),
            Mode::PreviewingScene {
                scene_id, snapshot, ..
            } => {
                registry.apply_transform_snapshot(&snapshot);
                let scene = project.require_scene(scene_id).map_err(RuntimeError::from)?;
                registry.restore(scene)?;
                tracing::info!(scene = %scene_id, "scene preview stopped");
                Ok(())
            }
            Mode::PlayingTimeline { .. } => {
                tracing::info!("timeline playback stopped");
                Ok(())
            }
        }
    }

    /// Reposition a running preview to a scene-local time.
    ///
    /// Returns `false` when no preview is active.
    pub fn seek_preview(&mut self, local_ms: u64) -> bool {
        let now = self.clock.now_ms();
        if let Mode::PreviewingScene { started_at, .. } = &mut self.mode {
            *started_at = now.saturating_sub(local_ms);
            true
        } else {
            false
        }
    }

    /// Reposition running timeline playback to a global time.
    ///
    /// Returns `false` when timeline playback is not active.
    pub fn seek_timeline(&mut self, global_ms: u64) -> bool {
        let now = self.clock.now_ms();
        if let Mode::PlayingTimeline { started_at } = &mut self.mode {
            *started_at = now.saturating_sub(global_ms);
            true
        } else {
            false
        }
    }

    /// Run one scheduler tick.
    ///
    /// Applies every track sample for the active scene(s) to the registry
    /// before returning, so a rendered frame never mixes samples from two
    /// ticks. Unrecoverable errors halt playback (the scheduler returns to
    /// idle) and surface as a structured error.
    pub fn tick(
        &mut self,
        project: &ProjectState,
        registry: &mut ObjectRegistry,
    ) -> Result<PlaybackStatus, RuntimeError> {
        enum Step {
            Preview(SceneId, u64, EndBehavior),
            Timeline(u64),
        }

        let step = match &self.mode {
            Mode::Idle => return Ok(PlaybackStatus::Idle),
            Mode::PreviewingScene {
                scene_id,
                started_at,
                behavior,
                ..
            } => Step::Preview(*scene_id, *started_at, *behavior),
            Mode::PlayingTimeline { started_at } => Step::Timeline(*started_at),
        };

        let result = match step {
            Step::Preview(scene_id, started_at, behavior) => {
                self.tick_preview(project, registry, scene_id, started_at, behavior)
            }
            Step::Timeline(started_at) => self.tick_timeline(project, registry, started_at),
        };

        if let Err(err) = &result {
            tracing::warn!(error = %err, "halting playback");
            self.mode = Mode::Idle;
        }
        result
    }

    fn tick_preview(
        &mut self,
        project: &ProjectState,
        registry: &mut ObjectRegistry,
        scene_id: SceneId,
        started_at: u64,
        behavior: EndBehavior,
    ) -> Result<PlaybackStatus, RuntimeError> {
        let scene = project.require_scene(scene_id).map_err(RuntimeError::from)?;
        let now = self.clock.now_ms();
        let mut local_ms = now.saturating_sub(started_at);

        if scene.duration_ms > 0 && local_ms >= scene.duration_ms {
            match behavior {
                EndBehavior::Loop => {
                    local_ms %= scene.duration_ms;
                    if let Mode::PreviewingScene { started_at, .. } = &mut self.mode {
                        *started_at = now - local_ms;
                    }
                    tracing::debug!(scene = %scene_id, local_ms, "preview looped");
                }
                EndBehavior::StopAndRestore => {
                    self.stop(project, registry)?;
                    return Ok(PlaybackStatus::Finished);
                }
            }
        }

        apply_scene_samples(scene, registry, local_ms)?;
        Ok(PlaybackStatus::Previewing { scene_id, local_ms })
    }

    fn tick_timeline(
        &mut self,
        project: &ProjectState,
        registry: &mut ObjectRegistry,
        started_at: u64,
    ) -> Result<PlaybackStatus, RuntimeError> {
        let timeline = project.timeline.as_ref().ok_or_else(|| {
            EngineError::InvalidTimelineState("master timeline disappeared during playback".into())
        })?;

        let global_ms = self.clock.now_ms().saturating_sub(started_at);
        let active = timeline.active_placements(&project.scenes, global_ms);

        if active.is_empty() && global_ms >= project.timeline_end_ms() {
            // Leave the last-rendered frame in place; no restore on the way
            // out of timeline playback.
            self.mode = Mode::Idle;
            tracing::info!(global_ms, "timeline playback finished");
            return Ok(PlaybackStatus::Finished);
        }

        registry.hide_all();
        let mut active_scenes = Vec::with_capacity(active.len());
        for placement in active {
            let scene = project
                .require_scene(placement.scene_id)
                .map_err(RuntimeError::from)?;
            registry.unhide_scene(scene)?;

            let local_ms = global_ms - placement.start_time_ms;
            apply_scene_samples(scene, registry, local_ms)?;
            active_scenes.push(scene.id);
        }

        Ok(PlaybackStatus::PlayingTimeline {
            global_ms,
            active_scenes,
        })
    }
}

/// Sample every motion path of a scene at a scene-local time and write the
/// results into the registry.
fn apply_scene_samples(
    scene: &Scene,
    registry: &mut ObjectRegistry,
    local_ms: u64,
) -> Result<(), RuntimeError> {
    for path in &scene.motion_paths {
        let path_local = local_ms.saturating_sub(path.start_time_ms);
        let sampled = path.sample_tracks(path_local).map_err(RuntimeError::from)?;
        registry.apply_sample(path.target_object_id, &sampled)?;
    }
    Ok(())
}
