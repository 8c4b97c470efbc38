//! Per-tick updates
//!
//! `update` is the draw-loop body minus the drawing: it reads the current
//! frame and touch snapshot, commits propagated edits, and returns the
//! directives to render. `playback_tick` is the fixed-rate playback body.

use super::collision::resolve;
use super::state::SketchState;
use super::timeline::Advance;
use crate::renderer::DrawDirective;

/// Result of one playback tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackTick {
    pub advance: Advance,
    /// Frame shown after the tick
    pub frame: u32,
    /// Scrub control offset to mirror, when the playhead moved
    pub mirror_offset: Option<f32>,
    /// Frame counter text, when enabled
    pub label: Option<String>,
}

/// Advance the timeline if playing and report what the UI should mirror
pub fn playback_tick(state: &mut SketchState) -> PlaybackTick {
    let advance = state.timeline.advance();
    let frame = state.timeline.current_frame();

    let mirror_offset = match advance {
        Advance::Stepped { frame } | Advance::ReachedEnd { frame } => {
            Some(state.timeline.scroll_offset_for(frame))
        }
        Advance::Idle => None,
    };

    PlaybackTick {
        advance,
        frame,
        mirror_offset,
        label: state.show_frame_counter.then(|| frame.to_string()),
    }
}

/// Run one draw-loop iteration. Always starts with a clear; when the
/// current frame is missing nothing else is drawn.
pub fn update(state: &mut SketchState) -> Vec<DrawDirective> {
    let mut directives = vec![DrawDirective::Clear];

    let frame_index = state.timeline.current_frame();
    let Some(frame) = state.frames.read(frame_index as usize) else {
        return directives;
    };

    let resolution = resolve(&frame.subjects, state.touches.touches(), &state.hit);
    directives.extend(resolution.commit(&mut state.frames, frame_index));
    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{FrameStore, Subject, Touch, TouchPhase};
    use glam::Vec2;

    fn single_subject_state() -> SketchState {
        let settings = Settings {
            default_pose: vec![Subject::new(200.0, 200.0)],
            ..Default::default()
        };
        SketchState::new(&settings, 1.0)
    }

    #[test]
    fn test_playback_tick_paused() {
        let mut state = SketchState::default();
        let tick = playback_tick(&mut state);
        assert_eq!(tick.advance, Advance::Idle);
        assert_eq!(tick.frame, 0);
        assert_eq!(tick.mirror_offset, None);
        assert_eq!(tick.label.as_deref(), Some("0"));
    }

    #[test]
    fn test_playback_tick_mirrors() {
        let mut state = SketchState::default();
        state.timeline.play();
        let tick = playback_tick(&mut state);
        assert_eq!(tick.advance, Advance::Stepped { frame: 1 });
        assert_eq!(tick.mirror_offset, Some(10.0));
        assert_eq!(tick.label.as_deref(), Some("1"));
    }

    #[test]
    fn test_playback_tick_without_counter() {
        let mut state = SketchState::default();
        state.show_frame_counter = false;
        assert_eq!(playback_tick(&mut state).label, None);
    }

    #[test]
    fn test_update_draws_subjects() {
        let mut state = SketchState::default();
        let directives = update(&mut state);
        assert_eq!(directives[0], DrawDirective::Clear);
        assert_eq!(directives.len(), 4);
    }

    #[test]
    fn test_update_skips_missing_frame() {
        let mut state = single_subject_state();
        state.frames = FrameStore::new(10, &[Subject::new(200.0, 200.0)]);
        state.on_scrub_gesture(500.0);
        assert_eq!(state.timeline.current_frame(), 50);
        state.on_touch(TouchPhase::Move, &[Touch::new(260.0, 200.0)]);

        let before = state.frames().clone();
        let directives = update(&mut state);

        assert_eq!(directives, vec![DrawDirective::Clear]);
        assert_eq!(state.frames().len(), before.len());
        for i in 0..before.len() {
            assert_eq!(state.frames().read(i), before.read(i));
        }
    }

    #[test]
    fn test_update_drag_propagates_from_current_frame() {
        let mut state = single_subject_state();
        state.on_scrub_gesture(500.0);
        assert_eq!(state.timeline.current_frame(), 50);

        state.on_touch(TouchPhase::Move, &[Touch::new(260.0, 200.0)]);
        update(&mut state);

        assert_eq!(
            state.frames().read(49).unwrap().subjects[0].pos,
            Vec2::new(200.0, 200.0)
        );
        assert_eq!(
            state.frames().read(50).unwrap().subjects[0].pos,
            Vec2::new(260.0, 200.0)
        );
        assert_eq!(
            state.frames().read(240).unwrap().subjects[0].pos,
            Vec2::new(260.0, 200.0)
        );
    }

    #[test]
    fn test_update_halo_for_distant_touch() {
        let mut state = single_subject_state();
        state.on_touch(TouchPhase::Start, &[Touch::new(900.0, 900.0)]);

        let directives = update(&mut state);
        assert!(directives.contains(&DrawDirective::TouchHalo {
            center: Vec2::new(900.0, 900.0),
            radius: 150.0,
        }));
        assert_eq!(
            state.frames().read(0).unwrap().subjects[0].pos,
            Vec2::new(200.0, 200.0)
        );
    }

    #[test]
    fn test_update_never_writes_timeline_or_touches() {
        let mut state = single_subject_state();
        state.on_touch(TouchPhase::Move, &[Touch::new(260.0, 200.0)]);
        update(&mut state);
        assert_eq!(state.timeline.current_frame(), 0);
        assert!(!state.timeline.is_playing());
        assert_eq!(state.touches.touches().len(), 1);
    }

    #[test]
    fn test_choreography_keeps_earlier_frames() {
        let mut state = single_subject_state();

        state.on_touch(TouchPhase::Move, &[Touch::new(260.0, 200.0)]);
        update(&mut state);
        state.on_touch(TouchPhase::End, &[]);

        state.on_scrub_gesture(1000.0);
        state.on_touch(TouchPhase::Move, &[Touch::new(320.0, 200.0)]);
        update(&mut state);

        assert_eq!(
            state.frames().read(99).unwrap().subjects[0].pos,
            Vec2::new(260.0, 200.0)
        );
        assert_eq!(
            state.frames().read(100).unwrap().subjects[0].pos,
            Vec2::new(320.0, 200.0)
        );
    }
}
