//! Playback tick and draw loop driving
//!
//! Two independently timed loops: a fixed-period playback tick
//! (`1000 / fps` ms) and a draw iteration per display refresh. The browser
//! build hands each to its own timer; `pump` runs both from a single clock
//! for headless use.

use crate::renderer::{Renderer, render};
use crate::settings::Settings;
use crate::sim::{PlaybackTick, SketchState, playback_tick, update};

/// Maximum playback ticks caught up in one `pump` call
pub const MAX_CATCHUP_TICKS: u32 = 8;

#[derive(Debug, Clone)]
pub struct Scheduler {
    period_ms: f64,
    accumulator_ms: f64,
    last_time_ms: Option<f64>,
}

impl Scheduler {
    /// Non-positive or non-finite periods fall back to one tick per second
    pub fn new(period_ms: f64) -> Self {
        let period_ms = if period_ms.is_finite() && period_ms > 0.0 {
            period_ms
        } else {
            1000.0
        };
        Self {
            period_ms,
            accumulator_ms: 0.0,
            last_time_ms: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_period_ms())
    }

    /// Playback tick period in milliseconds
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Playback loop body: advance while playing, then refresh the frame
    /// label and hand any new scrub offset to `mirror`.
    pub fn playback_tick<R, M>(
        &self,
        state: &mut SketchState,
        renderer: &mut R,
        mut mirror: M,
    ) -> PlaybackTick
    where
        R: Renderer + ?Sized,
        M: FnMut(f32),
    {
        let tick = playback_tick(state);
        if let Some(offset) = tick.mirror_offset {
            mirror(offset);
        }
        if let Some(label) = &tick.label {
            renderer.draw_text(label);
        }
        tick
    }

    /// Draw loop body: update then render
    pub fn draw_frame<R: Renderer + ?Sized>(&self, state: &mut SketchState, renderer: &mut R) {
        let directives = update(state);
        render(&directives, renderer);
    }

    /// Run every playback tick that fell due by `now_ms`, then one draw
    /// iteration. Returns the number of playback ticks run.
    pub fn pump<R, M>(
        &mut self,
        now_ms: f64,
        state: &mut SketchState,
        renderer: &mut R,
        mut mirror: M,
    ) -> u32
    where
        R: Renderer + ?Sized,
        M: FnMut(f32),
    {
        let dt = match self.last_time_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator_ms = (self.accumulator_ms + dt)
            .min(self.period_ms * MAX_CATCHUP_TICKS as f64);

        let mut ticks = 0;
        while self.accumulator_ms >= self.period_ms && ticks < MAX_CATCHUP_TICKS {
            self.playback_tick(state, renderer, &mut mirror);
            self.accumulator_ms -= self.period_ms;
            ticks += 1;
        }

        self.draw_frame(state, renderer);
        ticks
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawDirective, RecordingRenderer};
    use crate::sim::{Touch, TouchPhase};

    #[test]
    fn test_period() {
        let s = Scheduler::default();
        assert!((s.period_ms() - 41.666).abs() < 0.01);

        let s = Scheduler::from_settings(&Settings {
            fps: 10,
            ..Default::default()
        });
        assert_eq!(s.period_ms(), 100.0);

        assert_eq!(Scheduler::new(0.0).period_ms(), 1000.0);
        assert_eq!(Scheduler::new(f64::NAN).period_ms(), 1000.0);
    }

    #[test]
    fn test_playback_tick_labels_and_mirrors() {
        let scheduler = Scheduler::default();
        let mut state = SketchState::default();
        let mut renderer = RecordingRenderer::default();
        let mut mirrored = Vec::new();

        scheduler.playback_tick(&mut state, &mut renderer, |o| mirrored.push(o));
        assert!(mirrored.is_empty());
        assert_eq!(renderer.last_text(), Some("0"));

        state.timeline.play();
        scheduler.playback_tick(&mut state, &mut renderer, |o| mirrored.push(o));
        assert_eq!(mirrored, vec![10.0]);
        assert_eq!(renderer.last_text(), Some("1"));
    }

    #[test]
    fn test_draw_frame_clears_first() {
        let scheduler = Scheduler::default();
        let mut state = SketchState::default();
        let mut renderer = RecordingRenderer::default();
        state.on_touch(TouchPhase::Start, &[Touch::new(5000.0, 5000.0)]);

        scheduler.draw_frame(&mut state, &mut renderer);
        assert_eq!(renderer.directives[0], DrawDirective::Clear);
        // one halo per subject for the stray touch
        assert_eq!(renderer.halo_count(), 3);
    }

    #[test]
    fn test_pump_runs_due_ticks() {
        let mut scheduler = Scheduler::new(100.0);
        let mut state = SketchState::default();
        let mut renderer = RecordingRenderer::default();
        state.timeline.play();

        assert_eq!(scheduler.pump(0.0, &mut state, &mut renderer, |_| {}), 0);
        assert_eq!(scheduler.pump(250.0, &mut state, &mut renderer, |_| {}), 2);
        assert_eq!(state.timeline.current_frame(), 2);
        assert_eq!(scheduler.pump(300.0, &mut state, &mut renderer, |_| {}), 1);
        assert_eq!(state.timeline.current_frame(), 3);
    }

    #[test]
    fn test_pump_caps_catchup() {
        let mut scheduler = Scheduler::new(100.0);
        let mut state = SketchState::default();
        let mut renderer = RecordingRenderer::default();
        state.timeline.play();

        scheduler.pump(0.0, &mut state, &mut renderer, |_| {});
        let ticks = scheduler.pump(60_000.0, &mut state, &mut renderer, |_| {});
        assert_eq!(ticks, MAX_CATCHUP_TICKS);
        assert_eq!(state.timeline.current_frame(), MAX_CATCHUP_TICKS);
    }

    #[test]
    fn test_pump_plays_to_end_and_pauses() {
        let mut scheduler = Scheduler::default();
        let mut state = SketchState::default();
        let mut renderer = RecordingRenderer::default();
        state.timeline.play();

        let mut now = 0.0;
        for _ in 0..2000 {
            scheduler.pump(now, &mut state, &mut renderer, |_| {});
            now += 16.0;
        }
        assert_eq!(state.timeline.current_frame(), 240);
        assert!(!state.timeline.is_playing());
    }
}
