//! Sketch simulation module
//!
//! Timeline, frame storage and touch resolution. This module must stay pure:
//! - No DOM or drawing-surface access
//! - Frames before the playhead are never rewritten
//! - Stable iteration order (subject index, then touch order)

pub mod collision;
pub mod frames;
pub mod state;
pub mod timeline;
pub mod touch;
pub mod update;

pub use collision::{HitParams, Resolution, SubjectEdit, resolve, rings_intersect};
pub use frames::{Frame, FrameStore, Subject};
pub use state::SketchState;
pub use timeline::{Advance, PlaybackState, ScrubSource, Timeline};
pub use touch::{Touch, TouchPhase, TouchTracker};
pub use update::{PlaybackTick, playback_tick, update};
