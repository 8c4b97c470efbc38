//! Platform abstraction layer
//!
//! Converts host surface measurements and raw page-space touch points into
//! the device-space values the simulation works in.

use glam::Vec2;

use crate::consts::SCRUBBER_HEIGHT;
use crate::sim::Touch;

/// Drawing surface geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    /// Device pixel ratio
    pub scale: f32,
    /// Canvas offset from the page origin (CSS pixels)
    pub offset: Vec2,
    /// Canvas size (CSS pixels)
    pub css_size: Vec2,
}

impl SurfaceMetrics {
    /// Fill the viewport, leaving room for the scrubber strip below
    pub fn from_viewport(
        client_width: f32,
        client_height: f32,
        inner_width: f32,
        inner_height: f32,
        device_pixel_ratio: f32,
    ) -> Self {
        let width = client_width.max(inner_width).max(0.0);
        let height = (client_height.max(inner_height) - SCRUBBER_HEIGHT).max(0.0);
        let scale = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            scale,
            offset: Vec2::ZERO,
            css_size: Vec2::new(width, height),
        }
    }

    pub fn with_offset(mut self, left: f32, top: f32) -> Self {
        self.offset = Vec2::new(left, top);
        self
    }

    /// Canvas backing store size in device pixels
    pub fn device_size(&self) -> (u32, u32) {
        let size = self.css_size * self.scale;
        (size.x as u32, size.y as u32)
    }

    /// Page-space point to a device-space touch
    pub fn touch_from_page(&self, page_x: f32, page_y: f32) -> Touch {
        let pos = (Vec2::new(page_x, page_y) - self.offset) * self.scale;
        Touch { pos }
    }

    pub fn touches_from_page<I>(&self, points: I) -> Vec<Touch>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        points
            .into_iter()
            .map(|(x, y)| self.touch_from_page(x, y))
            .collect()
    }
}

impl Default for SurfaceMetrics {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            css_size: Vec2::ZERO,
        }
    }
}
