//! Canvas 2D renderer (wasm32 only)

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{
    BODY_INSET, HEAD_FACE, HEAD_RING, OVERLAY_TEXT, board_color, body_color, cell_size,
    corner_radius,
};
use crate::game::Snapshot;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the CSS size times the device pixel ratio
    fn fit_to_display(&self) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .floor()
            .max(1.0);
        let rect = self.canvas.get_bounding_client_rect();
        let w = (rect.width() * dpr) as u32;
        let h = (rect.height() * dpr) as u32;
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
    }

    /// Trace a rounded rectangle as the current path
    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }

    pub fn render(&self, snap: &Snapshot) {
        self.fit_to_display();
        let ctx = &self.ctx;
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        let size = cell_size(w, h, &snap.grid);

        ctx.clear_rect(0.0, 0.0, w, h);

        for cell in snap.grid.cells() {
            ctx.set_fill_style_str(board_color(cell));
            ctx.fill_rect(cell.x as f64 * size, cell.y as f64 * size, size, size);
        }

        ctx.set_font(&format!("{}px serif", (size * 0.8).floor()));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for item in &snap.items {
            let _ = ctx.fill_text(
                item.kind.glyph(),
                item.pos.x as f64 * size + size / 2.0,
                item.pos.y as f64 * size + size / 2.0 + 1.0,
            );
        }

        let len = snap.snake.len();
        let radius = corner_radius(size);
        for (i, cell) in snap.snake.iter().take(len.saturating_sub(1)).enumerate() {
            ctx.set_fill_style_str(&body_color(i, len));
            self.rounded_rect(
                cell.x as f64 * size + BODY_INSET,
                cell.y as f64 * size + BODY_INSET,
                size - 2.0 * BODY_INSET,
                size - 2.0 * BODY_INSET,
                radius,
            );
            ctx.fill();
        }

        if let Some(head) = snap.head() {
            let (x, y) = (head.x as f64 * size, head.y as f64 * size);
            let (cx, cy) = (x + size / 2.0, y + size / 2.0);

            ctx.begin_path();
            let _ = ctx.arc(cx, cy, size * 0.48, 0.0, TAU);
            ctx.set_fill_style_str(HEAD_RING);
            ctx.fill();

            // Face inside the ring
            ctx.save();
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, size * 0.44, 0.0, TAU);
            ctx.clip();
            ctx.set_fill_style_str(HEAD_FACE);
            ctx.fill_rect(x, y, size, size);
            ctx.restore();
        }

        if let Some(message) = &snap.message {
            ctx.set_fill_style_str("rgba(0,0,0,.55)");
            ctx.fill_rect(0.0, 0.0, w, h);

            ctx.set_fill_style_str(OVERLAY_TEXT);
            ctx.set_font(&format!("{}px Impact, sans-serif", (size * 2.2).floor()));
            let _ = ctx.fill_text(message, w / 2.0, h / 2.0);

            ctx.set_fill_style_str("#fff");
            ctx.set_font(&format!(
                "{}px system-ui, sans-serif",
                (size * 0.9).floor().max(14.0)
            ));
            let _ = ctx.fill_text("Hit \"R\" to restart", w / 2.0, h / 2.0 + size * 2.0);
        }
    }
}
