//! Empirical glyph centering.
//!
//! Font ascent/descent metadata is unreliable across arbitrary fallback
//! typefaces and code points, so the solver discovers a glyph's ink extent
//! by re-rendering it at growing offsets onto a probe canvas one pixel
//! larger than the target and scanning from the edges. The expensive probe
//! runs once per (typeface, code point, size, dimensions); the resulting
//! `Centering` is reused for every color.

use crate::canvas::{scan_from_bottom, scan_from_left, scan_from_right, scan_from_top, Canvas};
use crate::color::NamedColor;
use crate::typeface::Typeface;

/// The draw offset that places a glyph's ink centered on the target
/// canvas. `offset_y` is the baseline row measured from the canvas top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centering {
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Probe renders use a fixed fully opaque color. Any opaque color works:
/// the boundary scans test for nonzero channels, never the color value.
fn probe_color() -> NamedColor {
    NamedColor::blue()
}

/// Compute the centering offset for a glyph on a `width` × `height`
/// canvas, or `None` when probing finds no ink that the canvas could hold
/// (blank glyphs, or ink lying entirely outside the probe canvas).
pub fn center_glyph(face: &dyn Typeface, code_point: u32, width: u32, height: u32) -> Option<Centering> {
    let probe = probe_color();
    let (probe_w, probe_h) = (width + 1, height + 1);

    // Vertical probe: raise the baseline until the bottom row clears
    // (ink found away from the very bottom) or the top clips.
    let mut bottom_boundary = 0u32;
    let mut top_boundary = 1u32;
    let mut bottom_offset = 0u32;
    while bottom_boundary == 0 && top_boundary > 0 {
        bottom_offset += 1;
        let img = face.render(
            code_point,
            &probe,
            1.0,
            height as f32 - bottom_offset as f32,
            probe_w,
            probe_h,
        );
        top_boundary = scan_from_top(&img, width, height);
        bottom_boundary = scan_from_bottom(&img, width, height);
    }

    // Horizontal probe with the vertical placement fixed: push right until
    // the left column clears or the glyph proves wider than the canvas.
    let mut left_boundary = 0u32;
    let mut right_boundary = 1u32;
    let mut left_offset = 0u32;
    while left_boundary == 0 && right_boundary < width.saturating_sub(1) {
        left_offset += 1;
        let img = face.render(
            code_point,
            &probe,
            left_offset as f32,
            height as f32 - bottom_offset as f32,
            probe_w,
            probe_h,
        );
        left_boundary = scan_from_left(&img, width, height);
        right_boundary = scan_from_right(&img, width, height);
    }

    // All four measurements at their empty-scan sentinels means the probe
    // canvas never saw ink: the glyph cannot be rendered on this canvas.
    if top_boundary == height
        && bottom_boundary == height + 1
        && left_boundary == width
        && right_boundary == width + 1
    {
        return None;
    }

    let offset_y = height as f64
        - (top_boundary as f64 + bottom_boundary as f64) / 2.0
        - bottom_offset as f64;
    let offset_x = (right_boundary as f64 - left_boundary as f64) / 2.0 + left_offset as f64;

    Some(Centering {
        offset_x: offset_x as f32,
        offset_y: offset_y as f32,
    })
}

/// Render the glyph at a previously computed centering in the given color
/// onto a target-sized canvas. Pure function of its inputs; pairs with
/// `center_glyph` so the boundary search runs once per glyph regardless of
/// color count.
pub fn render_centered(
    face: &dyn Typeface,
    code_point: u32,
    centering: Centering,
    color: &NamedColor,
    width: u32,
    height: u32,
) -> Canvas {
    face.render(
        code_point,
        color,
        centering.offset_x,
        centering.offset_y,
        width,
        height,
    )
}

/// Single-shot convenience: center and render in one call.
pub fn center_image(
    face: &dyn Typeface,
    code_point: u32,
    color: &NamedColor,
    height: u32,
    width: u32,
) -> Option<Canvas> {
    center_glyph(face, code_point, width, height)
        .map(|c| render_centered(face, code_point, c, color, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Synthetic typeface whose glyph is a solid `w` × `h` block sitting
    /// on the baseline (bottom edge at the baseline row, left edge at the
    /// x offset), mimicking a simple letterform.
    struct BlockFace {
        w: u32,
        h: u32,
        /// Rows the block floats above the baseline.
        rise: i64,
        renders: AtomicUsize,
    }

    impl BlockFace {
        fn new(w: u32, h: u32) -> Self {
            Self {
                w,
                h,
                rise: 0,
                renders: AtomicUsize::new(0),
            }
        }
    }

    impl Typeface for BlockFace {
        fn name(&self) -> &str {
            "block"
        }

        fn can_display(&self, _code_point: u32) -> bool {
            true
        }

        fn render(
            &self,
            _code_point: u32,
            color: &NamedColor,
            offset_x: f32,
            offset_y: f32,
            width: u32,
            height: u32,
        ) -> Canvas {
            self.renders.fetch_add(1, Ordering::Relaxed);
            let mut canvas = Canvas::new(width, height);
            let left = offset_x.round() as i64;
            let top = offset_y.round() as i64 - self.rise - self.h as i64;
            canvas.fill_rect(left, top, self.w, self.h, color);
            canvas
        }
    }

    fn ink_midpoint(canvas: &Canvas, w: u32, h: u32) -> (f64, f64) {
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (w, 0, h, 0);
        for y in 0..h {
            for x in 0..w {
                if canvas.has_ink(x, y) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        (
            (min_x as f64 + max_x as f64) / 2.0,
            (min_y as f64 + max_y as f64) / 2.0,
        )
    }

    #[test]
    fn block_glyph_lands_centered() {
        let face = BlockFace::new(6, 8);
        let (w, h) = (32u32, 32u32);
        let centering = center_glyph(&face, 'A' as u32, w, h).expect("renderable");
        let img = render_centered(&face, 'A' as u32, centering, &NamedColor::black(), w, h);
        let (cx, cy) = ink_midpoint(&img, w, h);
        let (mx, my) = ((w as f64 - 1.0) / 2.0, (h as f64 - 1.0) / 2.0);
        assert!((cx - mx).abs() <= 1.0, "x midpoint {cx} vs {mx}");
        assert!((cy - my).abs() <= 1.0, "y midpoint {cy} vs {my}");
    }

    #[test]
    fn solver_is_deterministic() {
        let face = BlockFace::new(5, 11);
        let a = center_glyph(&face, 'Q' as u32, 24, 24).unwrap();
        let b = center_glyph(&face, 'Q' as u32, 24, 24).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blank_glyph_is_unrenderable() {
        struct BlankFace;
        impl Typeface for BlankFace {
            fn name(&self) -> &str {
                "blank"
            }
            fn can_display(&self, _cp: u32) -> bool {
                true
            }
            fn render(
                &self,
                _cp: u32,
                _color: &NamedColor,
                _ox: f32,
                _oy: f32,
                width: u32,
                height: u32,
            ) -> Canvas {
                Canvas::new(width, height)
            }
        }
        assert!(center_glyph(&BlankFace, 0x0007, 16, 16).is_none());
    }

    #[test]
    fn ink_above_canvas_is_unrenderable() {
        // Block floats 40 rows above the baseline on a 4x4 canvas: no
        // probe placement brings any ink into view.
        let mut face = BlockFace::new(3, 3);
        face.rise = 40;
        assert!(center_glyph(&face, 'a' as u32, 4, 4).is_none());
    }

    #[test]
    fn probe_color_is_irrelevant() {
        // The solver renders in its fixed probe color; the scans only
        // care that channels are nonzero. A face that draws near-black
        // ink regardless of requested color centers identically.
        struct DimFace;
        impl Typeface for DimFace {
            fn name(&self) -> &str {
                "dim"
            }
            fn can_display(&self, _cp: u32) -> bool {
                true
            }
            fn render(
                &self,
                _cp: u32,
                _color: &NamedColor,
                offset_x: f32,
                offset_y: f32,
                width: u32,
                height: u32,
            ) -> Canvas {
                let mut canvas = Canvas::new(width, height);
                let dim = NamedColor::anonymous(0, 0, 0, 1);
                canvas.fill_rect(
                    offset_x.round() as i64,
                    offset_y.round() as i64 - 4,
                    4,
                    4,
                    &dim,
                );
                canvas
            }
        }
        let reference = BlockFace::new(4, 4);
        let a = center_glyph(&DimFace, 'x' as u32, 20, 20).unwrap();
        let b = center_glyph(&reference, 'x' as u32, 20, 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn render_centered_does_not_reprobe() {
        let face = BlockFace::new(6, 6);
        let centering = center_glyph(&face, 'A' as u32, 32, 32).unwrap();
        let probes = face.renders.load(Ordering::Relaxed);
        let _ = render_centered(&face, 'A' as u32, centering, &NamedColor::red(), 32, 32);
        let _ = render_centered(&face, 'A' as u32, centering, &NamedColor::green(), 32, 32);
        assert_eq!(face.renders.load(Ordering::Relaxed), probes + 2);
    }
}
