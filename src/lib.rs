//! Flipsketch - touch-driven frame-by-frame choreography
//!
//! Core modules:
//! - `sim`: Timeline state machine, per-frame subject store, touch hit resolution
//! - `renderer`: Draw directives and the drawing-surface capability
//! - `scheduler`: Playback tick and draw loop driving
//! - `platform`: Surface metrics and raw touch conversion
//! - `settings`: Persisted configuration

pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use scheduler::Scheduler;
pub use settings::Settings;
pub use sim::SketchState;

use glam::Vec2;

/// Timeline and geometry defaults
pub mod consts {
    /// Last frame index (10 seconds @ 24 FPS)
    pub const TOTAL_FRAMES: u32 = 240;
    /// Upper bound on configured timeline length (10 minutes @ 24 FPS)
    pub const MAX_TOTAL_FRAMES: u32 = 14_400;
    /// Playback rate
    pub const FPS: u32 = 24;
    /// Scrubber pixels per frame
    pub const PIXELS_PER_FRAME: f32 = 10.0;

    /// Subject hit radius (device pixels)
    pub const SUBJECT_RADIUS: f32 = 100.0;
    /// Touch hit radius (device pixels)
    pub const TOUCH_RADIUS: f32 = 50.0;
    /// Halo is drawn this many times larger than the touch hit target
    pub const HALO_SCALE: f32 = 3.0;

    /// CSS pixels reserved below the canvas for the scrubber strip
    pub const SCRUBBER_HEIGHT: f32 = 100.0;
}

/// Clamp a signed frame index into [0, total_frames]
#[inline]
pub fn clamp_frame(frame: i64, total_frames: u32) -> u32 {
    frame.clamp(0, total_frames as i64) as u32
}

/// Squared euclidean distance between two points
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}
