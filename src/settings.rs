//! Sketch settings
//!
//! Read from LocalStorage when present. Frames themselves are never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Subject;

/// Timeline, geometry and display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timeline ===
    /// Last frame index
    pub total_frames: u32,
    /// Playback rate
    pub fps: u32,
    /// Scrubber pixels per frame
    pub pixels_per_frame: f32,

    // === Geometry (device pixels) ===
    pub subject_radius: f32,
    pub touch_radius: f32,
    /// Halo radius as a multiple of the touch radius
    pub halo_scale: f32,

    /// Starting pose shared by every frame (logical pixels)
    pub default_pose: Vec<Subject>,

    // === HUD ===
    /// Mirror the frame index into the play toggle
    pub show_frame_counter: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_frames: TOTAL_FRAMES,
            fps: FPS,
            pixels_per_frame: PIXELS_PER_FRAME,

            subject_radius: SUBJECT_RADIUS,
            touch_radius: TOUCH_RADIUS,
            halo_scale: HALO_SCALE,

            default_pose: vec![
                Subject::new(200.0, 200.0),
                Subject::new(500.0, 200.0),
                Subject::new(800.0, 200.0),
            ],

            show_frame_counter: true,
        }
    }
}

impl Settings {
    /// Copy with out-of-range values pulled back to something usable
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        };
        let non_negative = |v: f32, fallback: f32| {
            if v.is_finite() && v >= 0.0 { v } else { fallback }
        };

        Self {
            total_frames: self.total_frames.clamp(1, MAX_TOTAL_FRAMES),
            fps: self.fps.max(1),
            pixels_per_frame: positive(self.pixels_per_frame, defaults.pixels_per_frame),
            subject_radius: non_negative(self.subject_radius, defaults.subject_radius),
            touch_radius: non_negative(self.touch_radius, defaults.touch_radius),
            halo_scale: non_negative(self.halo_scale, defaults.halo_scale),
            default_pose: self
                .default_pose
                .iter()
                .filter(|s| s.pos.is_finite())
                .copied()
                .collect(),
            show_frame_counter: self.show_frame_counter,
        }
    }

    /// Playback tick period in milliseconds
    pub fn tick_period_ms(&self) -> f64 {
        1000.0 / self.fps.max(1) as f64
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flipsketch_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings.sanitized();
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
