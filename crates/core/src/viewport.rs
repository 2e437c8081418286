//! Scroll and geometry records reported by the render layer.

use serde::{Deserialize, Serialize};

/// Scroll position of a sheet viewport.
///
/// `sheet_view_start_*` is the first visible row/column; the offsets are the
/// sub-cell pixel remainder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub sheet_view_start_row: usize,
    pub sheet_view_start_column: usize,
}

/// Pixel rectangle of a cell on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
