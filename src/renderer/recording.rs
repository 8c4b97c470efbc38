//! Headless renderer that records what it was asked to draw

use glam::Vec2;

use super::{DrawDirective, Renderer};

/// Keeps every call as a `DrawDirective`. Used by the native binary and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub directives: Vec<DrawDirective>,
}

impl RecordingRenderer {
    /// Directives since the most recent clear
    pub fn current_frame(&self) -> &[DrawDirective] {
        let start = self
            .directives
            .iter()
            .rposition(|d| *d == DrawDirective::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.directives[start..]
    }

    /// Last label passed to `draw_text`
    pub fn last_text(&self) -> Option<&str> {
        self.directives.iter().rev().find_map(|d| match d {
            DrawDirective::Text(value) => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn halo_count(&self) -> usize {
        self.current_frame()
            .iter()
            .filter(|d| matches!(d, DrawDirective::TouchHalo { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.directives.push(DrawDirective::Clear);
    }

    fn draw_subject(&mut self, x: f32, y: f32, radius: f32) {
        self.directives.push(DrawDirective::Subject {
            center: Vec2::new(x, y),
            radius,
        });
    }

    fn draw_touch_halo(&mut self, x: f32, y: f32, radius: f32) {
        self.directives.push(DrawDirective::TouchHalo {
            center: Vec2::new(x, y),
            radius,
        });
    }

    fn draw_text(&mut self, value: &str) {
        self.directives.push(DrawDirective::Text(value.to_string()));
    }
}
