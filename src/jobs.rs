//! Build phase: enumerate glyph work for a selection.
//!
//! Single-threaded by design. For each code point the first typeface that
//! can display it wins; the centering solver runs once per glyph and its
//! result is shared by one render task per requested color. The two
//! diagnostic lists are append-only here and read-only once dispatch
//! starts, so the parallel phase needs no locking around them.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::center::{center_glyph, center_image, Centering};
use crate::color::NamedColor;
use crate::error::{Error, Result};
use crate::export::export_canvas;
use crate::naming;
use crate::typeface::Typeface;
use crate::Selection;

/// One render/export unit: a glyph in one color bound for one path.
/// Created here, consumed exactly once by the dispatcher.
impl std::fmt::Debug for RenderTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTask")
            .field("code_point", &self.code_point)
            .field("face", &self.face.name())
            .field("centering", &self.centering)
            .field("color", &self.color)
            .field("path", &self.path)
            .finish()
    }
}

pub struct RenderTask {
    pub code_point: u32,
    pub face: Arc<dyn Typeface>,
    pub centering: Centering,
    pub color: NamedColor,
    pub path: PathBuf,
}

/// All colors of one glyph, grouped so a single unit of work fans out the
/// per-color renders.
#[derive(Debug)]
pub struct GlyphJob {
    pub tasks: Vec<RenderTask>,
}

/// Output of the build phase: everything the dispatcher needs, with the
/// total task count known before any task starts.
#[derive(Debug)]
pub struct BuiltRun {
    pub jobs: Vec<GlyphJob>,
    pub task_count: usize,
    /// Target canvas dimensions the tasks render at.
    pub width: u32,
    pub height: u32,
    pub output_dirs: BTreeSet<PathBuf>,
    /// Code points no typeface in the fallback chain could display.
    pub no_font: Vec<u32>,
    /// Code points whose ink the canvas could not hold.
    pub no_image: Vec<u32>,
}

/// Enumerate the image files to generate for a selection under
/// `base_directory`. Creates the per-color output directories eagerly and
/// returns the full task set; nothing is rendered for export yet.
pub fn generate_image_files(base_directory: &Path, selection: &Selection) -> Result<BuiltRun> {
    if let Err(reason) = selection.validate() {
        return Err(Error::InvalidSelection(reason));
    }

    let min_cp = selection.min_code_point();
    let max_cp = selection.max_code_point();

    let mut dirs = Vec::with_capacity(selection.colors.len());
    for color in &selection.colors {
        let dir = naming::create_selection_dir(
            base_directory,
            &selection.name,
            color.name(),
            min_cp,
            max_cp,
        )?;
        dirs.push(dir);
    }

    let mut jobs = Vec::new();
    let mut task_count = 0usize;
    let mut no_font = Vec::new();
    let mut no_image = Vec::new();

    for range in &selection.ranges {
        for cp in range.start..range.end {
            let face = match selection.faces.iter().find(|f| f.can_display(cp)) {
                Some(face) => Arc::clone(face),
                None => {
                    no_font.push(cp);
                    continue;
                }
            };
            let centering = match center_glyph(face.as_ref(), cp, selection.width, selection.height)
            {
                Some(c) => c,
                None => {
                    no_image.push(cp);
                    continue;
                }
            };
            debug!(
                "glyph u+{cp:04x} via {} centered at ({}, {})",
                face.name(),
                centering.offset_x,
                centering.offset_y
            );

            let tasks = selection
                .colors
                .iter()
                .zip(&dirs)
                .map(|(color, dir)| RenderTask {
                    code_point: cp,
                    face: Arc::clone(&face),
                    centering,
                    color: color.clone(),
                    path: naming::glyph_file(dir, face.name(), cp, ".png"),
                })
                .collect::<Vec<_>>();
            task_count += tasks.len();
            jobs.push(GlyphJob { tasks });
        }
    }

    Ok(BuiltRun {
        jobs,
        task_count,
        width: selection.width,
        height: selection.height,
        output_dirs: dirs.into_iter().collect(),
        no_font,
        no_image,
    })
}

/// Center, render and export one glyph iff its ink fits the canvas.
/// Reports (but does not propagate) export trouble; answers whether a file
/// was attempted.
pub fn conditionally_export_centered_image(
    face: &dyn Typeface,
    code_point: u32,
    color: &NamedColor,
    height: u32,
    width: u32,
    dir: &Path,
) -> bool {
    let file_name = naming::glyph_file(dir, face.name(), code_point, ".png");
    match center_image(face, code_point, color, height, width) {
        Some(canvas) => {
            if let Err(e) = export_canvas(&canvas, &file_name) {
                log::error!("{e}");
            }
            true
        }
        None => {
            println!(
                "Could not render ({}): {}",
                code_point,
                file_name.display()
            );
            false
        }
    }
}

/// Tallies from a synchronous `generate_range` run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RangeSummary {
    pub created: usize,
    pub size_rejected: usize,
    pub unavailable: Vec<u32>,
}

/// Synchronous single-typeface, single-color convenience path: generate a
/// PNG for every displayable code point in `[start, end)` directly into
/// `dir`, printing its own created/size-rejected/unavailable summary.
pub fn generate_range(
    start: u32,
    end: u32,
    face: &dyn Typeface,
    dir: &Path,
    color: &NamedColor,
    height: u32,
    width: u32,
) -> RangeSummary {
    let mut summary = RangeSummary::default();

    for cp in start..end {
        if face.can_display(cp) {
            if conditionally_export_centered_image(face, cp, color, height, width, dir) {
                summary.created += 1;
            } else {
                summary.size_rejected += 1;
            }
        } else {
            summary.unavailable.push(cp);
        }
    }

    println!(
        "{} does not have:\n{}",
        face.name(),
        summary
            .unavailable
            .iter()
            .map(|cp| cp.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    );
    println!("==============\n");
    println!("Created: {}", summary.created);
    println!("Size issue: {}", summary.size_rejected);
    println!("No Image: {}", summary.unavailable.len());

    summary
}
