//! Per-frame subject positions
//!
//! One slot per frame, indices `0..=total_frames`. Subject identity is its
//! index within a frame. Writes rewrite a contiguous suffix of frames and
//! never touch anything before the write point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A drawable subject, positioned in logical (CSS pixel) space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub pos: Vec2,
}

impl Subject {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// All subject positions for one frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub subjects: Vec<Subject>,
}

/// Owns every frame of the animation
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    frames: Vec<Frame>,
}

impl FrameStore {
    /// Create `total_frames + 1` frames, each holding `pose`
    pub fn new(total_frames: u32, pose: &[Subject]) -> Self {
        let slots = (total_frames as usize).saturating_add(1);
        let frame = Frame {
            subjects: pose.to_vec(),
        };
        Self {
            frames: vec![frame; slots],
        }
    }

    /// Frame at `index`, or `None` past the end
    pub fn read(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Set subject `subject_index` to `pos` in every frame from `from_index`
    /// onward. Returns how many frames were rewritten.
    pub fn propagate_write(
        &mut self,
        from_index: usize,
        subject_index: usize,
        pos: Vec2,
    ) -> usize {
        let Some(suffix) = self.frames.get_mut(from_index..) else {
            return 0;
        };

        let mut written = 0;
        for frame in suffix {
            if let Some(subject) = frame.subjects.get_mut(subject_index) {
                subject.pos = pos;
                written += 1;
            }
        }

        if written > 0 {
            log::trace!(
                "subject {} -> ({:.1}, {:.1}) across frames {}..",
                subject_index,
                pos.x,
                pos.y,
                from_index
            );
        }
        written
    }

    /// Number of frame slots (`total_frames + 1`)
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Subjects per frame
    pub fn subject_count(&self) -> usize {
        self.frames.first().map(|f| f.subjects.len()).unwrap_or(0)
    }
}
