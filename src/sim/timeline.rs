//! Playback and scrub state machine
//!
//! Two states, `Paused` and `Playing`. The current frame is clamped into
//! `[0, total_frames]` on every write.

use serde::{Deserialize, Serialize};

use crate::clamp_frame;
use crate::settings::Settings;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// Where a scrub request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubSource {
    /// Direct manipulation of the scrub control (pauses playback)
    Gesture,
    /// Scrub control mirroring the playhead during playback (never pauses)
    Mirror,
}

/// Result of a single `advance()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Timeline was paused, nothing happened
    Idle,
    /// Moved to `frame`; the scrub control should mirror it
    Stepped { frame: u32 },
    /// Hit the end of the timeline and paused on `frame`
    ReachedEnd { frame: u32 },
}

/// The playback/scrub state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    current_frame: u32,
    total_frames: u32,
    fps: u32,
    pixels_per_frame: f32,
    state: PlaybackState,
}

impl Timeline {
    pub fn new(total_frames: u32, fps: u32, pixels_per_frame: f32) -> Self {
        Self {
            current_frame: 0,
            total_frames,
            fps: fps.max(1),
            pixels_per_frame,
            state: PlaybackState::Paused,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.total_frames, settings.fps, settings.pixels_per_frame)
    }

    /// Start playback. Guarded by `current_frame <= total_frames`, which the
    /// clamp invariant keeps true.
    pub fn play(&mut self) {
        if self.current_frame <= self.total_frames {
            if self.state != PlaybackState::Playing {
                log::debug!("play from frame {}", self.current_frame);
            }
            self.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            log::debug!("pause at frame {}", self.current_frame);
        }
        self.state = PlaybackState::Paused;
    }

    /// Flip between play and pause (the single toggle control)
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Map a scrub control offset to a frame: `ceil(offset / pixels_per_frame)`,
    /// clamped. Gesture scrubs pause first.
    pub fn scrub_to(&mut self, pixel_offset: f32, source: ScrubSource) {
        if source == ScrubSource::Gesture {
            self.pause();
        }
        let desired = (pixel_offset / self.pixels_per_frame).ceil();
        // NaN casts to 0, infinities saturate
        self.set_frame(desired as i64);
    }

    /// Step one frame forward while playing. Reaching `total_frames` lands on
    /// it and pauses, so the final frame is shown by playback.
    pub fn advance(&mut self) -> Advance {
        if !self.is_playing() {
            return Advance::Idle;
        }

        let next = match self.current_frame().checked_add(1) {
            Some(next) => next,
            None => {
                self.pause();
                return Advance::ReachedEnd {
                    frame: self.current_frame(),
                };
            }
        };

        if next >= self.total_frames {
            self.set_frame(next as i64);
            self.pause();
            log::debug!("reached end of timeline at frame {}", self.current_frame);
            return Advance::ReachedEnd {
                frame: self.current_frame(),
            };
        }

        self.set_frame(next as i64);
        Advance::Stepped {
            frame: self.current_frame,
        }
    }

    /// Current frame, re-clamped
    pub fn current_frame(&self) -> u32 {
        self.current_frame.min(self.total_frames)
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Scrub control offset that shows `frame`
    pub fn scroll_offset_for(&self, frame: u32) -> f32 {
        frame as f32 * self.pixels_per_frame
    }

    /// Width of the scrub control's scrollable range
    pub fn scrub_extent(&self) -> f32 {
        self.scroll_offset_for(self.total_frames)
    }

    fn set_frame(&mut self, frame: i64) {
        self.current_frame = clamp_frame(frame, self.total_frames);
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timeline() -> Timeline {
        Timeline::new(240, 24, 10.0)
    }

    #[test]
    fn test_starts_paused_at_zero() {
        let t = timeline();
        assert_eq!(t.current_frame(), 0);
        assert!(!t.is_playing());
        assert_eq!(t.fps(), 24);
    }

    #[test]
    fn test_scrub_mapping() {
        let mut t = timeline();
        t.scrub_to(305.0, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 31);

        t.scrub_to(300.0, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 30);
    }

    #[test]
    fn test_scrub_clamps() {
        let mut t = timeline();
        t.scrub_to(99_999.0, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 240);

        t.scrub_to(-50.0, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 0);

        t.scrub_to(f32::NAN, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 0);

        t.scrub_to(f32::INFINITY, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 240);
    }

    #[test]
    fn test_gesture_scrub_pauses() {
        let mut t = timeline();
        t.play();
        t.scrub_to(100.0, ScrubSource::Gesture);
        assert!(!t.is_playing());
        assert_eq!(t.current_frame(), 10);
    }

    #[test]
    fn test_mirror_scrub_keeps_playing() {
        let mut t = timeline();
        t.play();
        t.scrub_to(100.0, ScrubSource::Mirror);
        assert!(t.is_playing());
        assert_eq!(t.current_frame(), 10);
    }

    #[test]
    fn test_advance_while_paused_is_idle() {
        let mut t = timeline();
        assert_eq!(t.advance(), Advance::Idle);
        assert_eq!(t.current_frame(), 0);
    }

    #[test]
    fn test_advance_steps() {
        let mut t = timeline();
        t.play();
        assert_eq!(t.advance(), Advance::Stepped { frame: 1 });
        assert_eq!(t.advance(), Advance::Stepped { frame: 2 });
        assert!(t.is_playing());
    }

    #[test]
    fn test_boundary_pause() {
        let mut t = timeline();
        t.scrub_to(2390.0, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 239);
        t.play();

        assert_eq!(t.advance(), Advance::ReachedEnd { frame: 240 });
        assert_eq!(t.current_frame(), 240);
        assert!(!t.is_playing());
    }

    #[test]
    fn test_advance_at_end_stays_put() {
        let mut t = timeline();
        t.scrub_to(2400.0, ScrubSource::Mirror);
        t.play();
        assert!(t.is_playing());

        assert_eq!(t.advance(), Advance::ReachedEnd { frame: 240 });
        assert_eq!(t.current_frame(), 240);
        assert!(!t.is_playing());
    }

    #[test]
    fn test_idempotent_pause() {
        let mut once = timeline();
        once.play();
        once.pause();

        let mut twice = timeline();
        twice.play();
        twice.pause();
        twice.pause();

        assert_eq!(once.state(), twice.state());
        assert_eq!(once.current_frame(), twice.current_frame());
    }

    #[test]
    fn test_toggle() {
        let mut t = timeline();
        t.toggle();
        assert!(t.is_playing());
        t.toggle();
        assert!(!t.is_playing());
    }

    #[test]
    fn test_scroll_offset_round_trips_to_frame() {
        let mut t = timeline();
        let offset = t.scroll_offset_for(57);
        t.scrub_to(offset, ScrubSource::Mirror);
        assert_eq!(t.current_frame(), 57);
        assert_eq!(t.scrub_extent(), 2400.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Play,
        Pause,
        Advance,
        Scrub(f32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Play),
            Just(Op::Pause),
            Just(Op::Advance),
            (-5000.0f32..5000.0).prop_map(Op::Scrub),
        ]
    }

    proptest! {
        #[test]
        fn test_clamp_invariant(ops in proptest::collection::vec(op(), 0..400)) {
            let mut t = timeline();
            for op in ops {
                match op {
                    Op::Play => t.play(),
                    Op::Pause => t.pause(),
                    Op::Advance => { t.advance(); }
                    Op::Scrub(px) => t.scrub_to(px, ScrubSource::Gesture),
                }
                prop_assert!(t.current_frame <= t.total_frames);
            }
        }
    }
}
