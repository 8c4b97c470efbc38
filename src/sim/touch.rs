//! Active touch snapshot
//!
//! Rebuilt wholesale on every input event. Identity across events is not
//! tracked.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An active contact point in device pixels, already offset-corrected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub pos: Vec2,
}

impl Touch {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// Touch event kind from the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// Latest touch snapshot, read once per draw iteration
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    touches: Vec<Touch>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest an input event. `End` clears; `Start`/`Move` replace the
    /// snapshot. Non-finite points are dropped.
    pub fn ingest(&mut self, phase: TouchPhase, touches: &[Touch]) {
        self.touches.clear();
        if phase == TouchPhase::End {
            return;
        }
        self.touches
            .extend(touches.iter().filter(|t| t.pos.is_finite()).copied());
    }

    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }
}
