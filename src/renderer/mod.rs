//! Canvas 2D rendering module
//!
//! Layout math is platform-independent; the drawing itself only exists on
//! wasm32 where a canvas is available.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{Cell, Grid};

/// Checkerboard colors for the board
pub const BOARD_DARK: &str = "#0b0b0b";
pub const BOARD_LIGHT: &str = "#111";
/// Overlay headline color
pub const OVERLAY_TEXT: &str = "#ff4444";
/// Head ring and face
pub const HEAD_RING: &str = "#fff";
pub const HEAD_FACE: &str = "#333";

/// Inset of a body segment from its cell edge (px)
pub const BODY_INSET: f64 = 2.0;

/// Largest square cell that fits the whole grid in the canvas
pub fn cell_size(canvas_w: f64, canvas_h: f64, grid: &Grid) -> f64 {
    (canvas_w / grid.width as f64).min(canvas_h / grid.height as f64)
}

/// Corner radius of a body segment, never more than 10px
pub fn corner_radius(size: f64) -> f64 {
    (size / 3.0).min(10.0)
}

/// Checkerboard shade for a cell
pub fn board_color(cell: Cell) -> &'static str {
    if (cell.x + cell.y) % 2 == 0 {
        BOARD_DARK
    } else {
        BOARD_LIGHT
    }
}

/// Body fill, fading from tail (index 0) toward the head
pub fn body_color(index: usize, len: usize) -> String {
    let t = if len > 1 {
        index as f64 / (len - 1) as f64
    } else {
        1.0
    };
    let alpha = 0.4 + 0.6 * t;
    format!("rgba(0,200,255,{:.3})", alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_fits_both_axes() {
        let grid = Grid::new(32, 18);
        assert_eq!(cell_size(640.0, 360.0, &grid), 20.0);
        assert_eq!(cell_size(640.0, 180.0, &grid), 10.0);
    }

    #[test]
    fn test_corner_radius_caps_at_ten() {
        assert_eq!(corner_radius(12.0), 4.0);
        assert_eq!(corner_radius(30.0), 10.0);
        assert_eq!(corner_radius(90.0), 10.0);
    }

    #[test]
    fn test_board_checkerboard() {
        assert_eq!(board_color(Cell::new(0, 0)), BOARD_DARK);
        assert_eq!(board_color(Cell::new(1, 0)), BOARD_LIGHT);
        assert_eq!(board_color(Cell::new(1, 1)), BOARD_DARK);
    }

    #[test]
    fn test_body_fades_toward_tail() {
        assert_eq!(body_color(0, 5), "rgba(0,200,255,0.400)");
        assert_eq!(body_color(4, 5), "rgba(0,200,255,1.000)");
        assert_eq!(body_color(0, 1), "rgba(0,200,255,1.000)");
    }
}
