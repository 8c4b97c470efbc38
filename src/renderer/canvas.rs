//! Canvas 2D renderer for the browser build

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, Element};

use super::{HALO_LINE_WIDTH, HALO_STROKE, Renderer, SUBJECT_FILL};

/// Draws onto a `CanvasRenderingContext2d`. The frame label goes into a
/// separate DOM element (the play toggle) when one is attached.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    label: Option<Element>,
}

impl CanvasRenderer {
    /// `width`/`height` are the canvas backing size in device pixels
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
            label: None,
        }
    }

    pub fn with_label(mut self, label: Element) -> Self {
        self.label = Some(label);
        self
    }

    fn circle(&self, x: f32, y: f32, radius: f32) -> bool {
        self.ctx.begin_path();
        let ok = self
            .ctx
            .arc_with_anticlockwise(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU, true)
            .is_ok();
        self.ctx.close_path();
        if !ok {
            log::warn!("arc rejected at ({}, {}) r={}", x, y, radius);
        }
        ok
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_subject(&mut self, x: f32, y: f32, radius: f32) {
        if self.circle(x, y, radius) {
            self.ctx.set_fill_style_str(SUBJECT_FILL);
            self.ctx.fill();
        }
    }

    fn draw_touch_halo(&mut self, x: f32, y: f32, radius: f32) {
        if self.circle(x, y, radius) {
            self.ctx.set_stroke_style_str(HALO_STROKE);
            self.ctx.set_line_width(HALO_LINE_WIDTH as f64);
            self.ctx.stroke();
        }
    }

    fn draw_text(&mut self, value: &str) {
        if let Some(label) = &self.label {
            label.set_text_content(Some(value));
        }
    }
}
