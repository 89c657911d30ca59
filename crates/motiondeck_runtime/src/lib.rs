// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor runtime for MotionDeck.
//!
//! This crate drives playback and live editing over the
//! `motiondeck_engine` data model:
//! - Live object registry mirroring the project's object pool
//! - Frame-driven playback scheduler (scene preview and timeline playback)
//! - Scene restore and visibility handling
//! - Theme application to scene backgrounds and text objects
//! - Collaborator seams for persistence, motion generation, and media
//!
//! ## Architecture
//!
//! Everything is single-threaded and cooperative: one scheduler tick per
//! render frame resolves visibility and per-object transforms, which the
//! host hands to its renderer. Wall-clock time comes from an injectable
//! [`Clock`] so playback logic is deterministic under test. Multiple
//! runtime instances may coexist; they share no state.

pub mod clock;
pub mod error;
pub mod inference;
pub mod media;
pub mod objects;
pub mod runtime;
pub mod scheduler;
pub mod store;
pub mod theme;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::RuntimeError;
pub use inference::{MotionGenerator, MotionPrompt, PromptObject};
pub use media::{MediaStore, MemoryMediaStore, UploadedMedia};
pub use objects::{LiveObject, ObjectRegistry};
pub use runtime::EditorRuntime;
pub use scheduler::{EndBehavior, PlaybackScheduler, PlaybackStatus};
pub use store::{MemoryProjectStore, ProjectStore};
pub use theme::{apply_theme, FontScript, ThemePalette, PALETTES, TEXT_DARKEN_FACTOR};
