//! Touch/subject hit resolution
//!
//! Hit circles overlap as rings, not disks: a touch engages a subject when
//! `(Rs - Rt)^2 <= d^2 <= (Rs + Rt)^2`. A touch sitting well inside a large
//! subject therefore does not grab it.

use glam::Vec2;

use super::frames::{FrameStore, Subject};
use super::touch::Touch;
use crate::distance_squared;
use crate::renderer::DrawDirective;

/// Geometry used by the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitParams {
    /// Logical to device pixel ratio
    pub scale: f32,
    /// Subject hit radius (device pixels)
    pub subject_radius: f32,
    /// Touch hit radius (device pixels)
    pub touch_radius: f32,
    /// Halo radius multiplier
    pub halo_scale: f32,
}

/// A subject moved by a touch this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectEdit {
    pub subject_index: usize,
    /// New position in logical space
    pub pos: Vec2,
}

/// Outcome of one resolver pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub edits: Vec<SubjectEdit>,
    pub directives: Vec<DrawDirective>,
}

impl Resolution {
    /// Write edits through the store from `frame` onward. When several
    /// touches grabbed the same subject the last one wins. Consumes the
    /// resolution and hands back its draw directives.
    pub fn commit(self, store: &mut FrameStore, frame: u32) -> Vec<DrawDirective> {
        let mut applied: Vec<usize> = Vec::with_capacity(self.edits.len());
        for edit in self.edits.iter().rev() {
            if applied.contains(&edit.subject_index) {
                continue;
            }
            applied.push(edit.subject_index);
            store.propagate_write(frame as usize, edit.subject_index, edit.pos);
        }
        self.directives
    }
}

/// Ring overlap test on squared distances
#[inline]
pub fn rings_intersect(d_sq: f32, subject_radius: f32, touch_radius: f32) -> bool {
    let inner = (subject_radius - touch_radius).powi(2);
    let outer = (subject_radius + touch_radius).powi(2);
    inner <= d_sq && d_sq <= outer
}

/// Resolve every (subject, touch) pair in iteration order.
///
/// Subjects are drawn where they were at the start of the pass. For each
/// subject, non-engaging touches emit a halo before the subject itself.
pub fn resolve(subjects: &[Subject], touches: &[Touch], params: &HitParams) -> Resolution {
    let mut resolution = Resolution::default();
    let halo_radius = params.touch_radius * params.halo_scale;

    for (subject_index, subject) in subjects.iter().enumerate() {
        let center = subject.pos * params.scale;

        for touch in touches {
            let d_sq = distance_squared(center, touch.pos);
            if rings_intersect(d_sq, params.subject_radius, params.touch_radius) {
                resolution.edits.push(SubjectEdit {
                    subject_index,
                    pos: touch.pos / params.scale,
                });
            } else {
                resolution.directives.push(DrawDirective::TouchHalo {
                    center: touch.pos,
                    radius: halo_radius,
                });
            }
        }

        resolution.directives.push(DrawDirective::Subject {
            center,
            radius: params.subject_radius,
        });
    }

    resolution
}
