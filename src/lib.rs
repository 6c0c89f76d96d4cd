//! charpix
//!
//! Batch generator of individually centered per-glyph PNG files. Given a
//! pre-validated selection (fallback typefaces, colors, canvas size, code
//! point ranges), the build phase enumerates one render task per
//! (glyph, color) pair with the centering solver run once per glyph; the
//! export phase drains the tasks on a worker pool and reports when the
//! work counter reaches zero.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use charpix::typeface::{FontCatalog, FontStyle, Typeface};
//! use charpix::{CodePointRange, NamedColor, Selection};
//!
//! # fn main() -> charpix::Result<()> {
//! let mut catalog = FontCatalog::new();
//! catalog.load_file(Path::new("DejaVuSans.ttf"))?;
//! let face = catalog.face("DejaVuSans", 48.0, FontStyle::Plain).unwrap();
//!
//! let selection = Selection {
//!     name: "latin".to_string(),
//!     faces: vec![Arc::new(face) as Arc<dyn Typeface>],
//!     font_size: 48.0,
//!     style: FontStyle::Plain,
//!     width: 64,
//!     height: 64,
//!     colors: vec![NamedColor::black()],
//!     ranges: vec![CodePointRange::new(0x41, 0x5b)],
//! };
//!
//! let built = charpix::generate_image_files(Path::new("out"), &selection)?;
//! let pool = charpix::WorkerPool::with_default_size()?;
//! let summary = charpix::run_to_completion(&pool, built)?;
//! println!("{} files attempted", summary.files_attempted);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod error;
pub use error::{Error, Result};

pub mod canvas;
pub mod center;
pub mod color;
pub mod dispatch;
pub mod export;
pub mod jobs;
pub mod naming;
pub mod report;
pub mod typeface;

pub use canvas::Canvas;
pub use center::{center_glyph, center_image, render_centered, Centering};
pub use color::{ColorTable, NamedColor};
pub use dispatch::{clamp_workers, run_to_completion, RunSummary, WorkerPool};
pub use export::export_canvas;
pub use jobs::{generate_image_files, generate_range, BuiltRun, GlyphJob, RangeSummary, RenderTask};
pub use typeface::{FontCatalog, FontFace, FontStyle, Typeface};

/// Half-open code point range: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePointRange {
    pub start: u32,
    pub end: u32,
}

impl CodePointRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// One named batch of typefaces, colors, code point ranges and canvas
/// geometry to process together. Supplied fully formed and validated
/// before the pipeline runs; immutable per run.
#[derive(Clone)]
pub struct Selection {
    pub name: String,
    /// Fallback chain, highest priority first.
    pub faces: Vec<Arc<dyn Typeface>>,
    pub font_size: f32,
    pub style: FontStyle,
    /// Target canvas width in pixels.
    pub width: u32,
    /// Target canvas height in pixels.
    pub height: u32,
    pub colors: Vec<NamedColor>,
    pub ranges: Vec<CodePointRange>,
}

impl Selection {
    /// Check the request invariants; answers why the selection is
    /// unusable, if it is.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.is_empty() {
            return Err("selection name is empty".to_string());
        }
        if self.faces.is_empty() {
            return Err("no typefaces selected".to_string());
        }
        if !(self.font_size > 0.0) {
            return Err("font size must be positive".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err("canvas dimensions must be positive".to_string());
        }
        if self.colors.is_empty() {
            return Err("no colors selected".to_string());
        }
        if self.ranges.is_empty() || self.ranges.iter().any(CodePointRange::is_empty) {
            return Err("at least one non-empty code point range is required".to_string());
        }
        Ok(())
    }

    /// Smallest code point across all ranges.
    pub fn min_code_point(&self) -> u32 {
        self.ranges.iter().map(|r| r.start).min().unwrap_or(0)
    }

    /// Largest code point across all ranges (inclusive).
    pub fn max_code_point(&self) -> u32 {
        self.ranges
            .iter()
            .map(|r| r.end.saturating_sub(1))
            .max()
            .unwrap_or(0)
    }
}
