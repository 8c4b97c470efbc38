//! Drawing surface capability
//!
//! The core never touches the surface directly. The update step produces a
//! list of `DrawDirective`s and `render` replays them onto a `Renderer`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use recording::RecordingRenderer;

use glam::Vec2;

/// Subject fill colour
pub const SUBJECT_FILL: &str = "rgba(0, 0, 200, 0.2)";
/// Halo stroke colour
pub const HALO_STROKE: &str = "rgba(0, 0, 200, 0.2)";
/// Halo stroke width (device pixels)
pub const HALO_LINE_WIDTH: f32 = 6.0;

/// Something that can draw subjects, halos and a frame label.
/// Coordinates and radii are in device pixels.
pub trait Renderer {
    fn clear(&mut self);
    fn draw_subject(&mut self, x: f32, y: f32, radius: f32);
    fn draw_touch_halo(&mut self, x: f32, y: f32, radius: f32);
    fn draw_text(&mut self, value: &str);
}

/// One drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawDirective {
    Clear,
    Subject { center: Vec2, radius: f32 },
    TouchHalo { center: Vec2, radius: f32 },
    Text(String),
}

/// Replay directives in order
pub fn render<R: Renderer + ?Sized>(directives: &[DrawDirective], renderer: &mut R) {
    for directive in directives {
        match directive {
            DrawDirective::Clear => renderer.clear(),
            DrawDirective::Subject { center, radius } => {
                renderer.draw_subject(center.x, center.y, *radius)
            }
            DrawDirective::TouchHalo { center, radius } => {
                renderer.draw_touch_halo(center.x, center.y, *radius)
            }
            DrawDirective::Text(value) => renderer.draw_text(value),
        }
    }
}
