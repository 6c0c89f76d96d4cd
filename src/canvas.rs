//! RGBA raster canvas plus the four edge boundary scans.
//!
//! The scans answer, for each edge, how far toward the center the first
//! scan line/column with any non-transparent pixel lies. They are the only
//! measurement the centering solver performs; nothing else inspects pixels.

use crate::color::NamedColor;

/// A width × height grid of RGBA pixels, zero-initialized (fully
/// transparent). Owned exclusively by the task that created it and
/// discarded after encoding.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Write a pixel. Out-of-range coordinates are ignored (glyphs larger
    /// than the canvas clip silently).
    pub fn put(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Stamp an opaque rectangle of the given color; used by tests and the
    /// synthetic render backends.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: &NamedColor) {
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                self.put(x + dx, y + dy, color.rgba());
            }
        }
    }

    /// Whether the pixel has any nonzero channel: a pixel counts as ink
    /// unless it is fully transparent black.
    pub fn has_ink(&self, x: u32, y: u32) -> bool {
        let i = self.index(x, y);
        self.data[i..i + 4].iter().any(|&b| b != 0)
    }
}

/// Rows of empty space at the top, scanning rows `0..height` across columns
/// `0..width`. Returns `height` when no ink is found (empty sentinel).
pub fn scan_from_top(canvas: &Canvas, width: u32, height: u32) -> u32 {
    for y in 0..height {
        for x in 0..width {
            if canvas.has_ink(x, y) {
                return y;
            }
        }
    }
    height
}

/// Rows of empty space at the bottom. The scan starts at row `height`
/// itself, so the canvas must be the one-pixel-larger probe canvas; the
/// empty sentinel is therefore `height + 1`.
pub fn scan_from_bottom(canvas: &Canvas, width: u32, height: u32) -> u32 {
    for y in (0..=height).rev() {
        for x in 0..width {
            if canvas.has_ink(x, y) {
                return height - y;
            }
        }
    }
    height + 1
}

/// Columns of empty space on the left, scanning columns `0..width` down
/// rows `0..height`. Returns `width` when no ink is found.
pub fn scan_from_left(canvas: &Canvas, width: u32, height: u32) -> u32 {
    for x in 0..width {
        for y in 0..height {
            if canvas.has_ink(x, y) {
                return x;
            }
        }
    }
    width
}

/// Columns of empty space on the right, starting at column `width` itself
/// (probe canvas); the empty sentinel is `width + 1`.
pub fn scan_from_right(canvas: &Canvas, width: u32, height: u32) -> u32 {
    for x in (0..=width).rev() {
        for y in 0..height {
            if canvas.has_ink(x, y) {
                return width - x;
            }
        }
    }
    width + 1
}
