//! Sketch context
//!
//! Everything the update step reads or writes lives in one `SketchState`
//! owned by the host controller.

use super::collision::HitParams;
use super::frames::FrameStore;
use super::timeline::{ScrubSource, Timeline};
use super::touch::{Touch, TouchPhase, TouchTracker};
use crate::settings::Settings;

/// Complete sketch state
#[derive(Debug, Clone)]
pub struct SketchState {
    pub timeline: Timeline,
    /// Written only by the update step, through `Resolution::commit`
    pub(super) frames: FrameStore,
    pub touches: TouchTracker,
    pub hit: HitParams,
    /// Mirror the frame index on every playback tick
    pub show_frame_counter: bool,
}

impl SketchState {
    /// Build from settings. `scale` is the device pixel ratio.
    pub fn new(settings: &Settings, scale: f32) -> Self {
        let settings = settings.sanitized();
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };

        log::info!(
            "sketch: {} frames @ {} fps, {} subjects, scale {}",
            settings.total_frames + 1,
            settings.fps,
            settings.default_pose.len(),
            scale
        );

        Self {
            timeline: Timeline::from_settings(&settings),
            frames: FrameStore::new(settings.total_frames, &settings.default_pose),
            touches: TouchTracker::new(),
            hit: HitParams {
                scale,
                subject_radius: settings.subject_radius,
                touch_radius: settings.touch_radius,
                halo_scale: settings.halo_scale,
            },
            show_frame_counter: settings.show_frame_counter,
        }
    }

    /// Read-only view of every frame
    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Canvas touch event
    pub fn on_touch(&mut self, phase: TouchPhase, touches: &[Touch]) {
        self.touches.ingest(phase, touches);
    }

    /// Scrub control moved by the user's finger
    pub fn on_scrub_gesture(&mut self, pixel_offset: f32) {
        self.timeline.scrub_to(pixel_offset, ScrubSource::Gesture);
    }

    /// Scrub control scrolled (including programmatic mirroring)
    pub fn on_scrub_scroll(&mut self, pixel_offset: f32) {
        self.timeline.scrub_to(pixel_offset, ScrubSource::Mirror);
    }

    /// Scrub control touched down
    pub fn on_scrub_touch_start(&mut self) {
        self.timeline.pause();
    }

    /// Play/pause toggle pressed
    pub fn on_play_toggle(&mut self) {
        self.timeline.toggle();
    }
}

impl Default for SketchState {
    fn default() -> Self {
        Self::new(&Settings::default(), 1.0)
    }
}
