//! Output directory and file name construction.
//!
//! Layout: `{base}/{selection}/{color}/{minCp}_{maxCp}/` holding files
//! named `{typeface}_{label}.png`, where labels are lowercase `uXXXX`
//! code point tags.

use std::path::{Path, PathBuf};

/// Filesystem-friendly label for a code point, e.g. `u0041` for 'A'.
/// Code points beyond the BMP widen past four digits (`u1f600`).
pub fn unicode_label(code_point: u32) -> String {
    format!("u{code_point:04x}")
}

/// Directory for one (selection, color) pair.
pub fn selection_dir(
    base: &Path,
    selection_name: &str,
    color_name: &str,
    min_code_point: u32,
    max_code_point: u32,
) -> PathBuf {
    base.join(selection_name).join(color_name).join(format!(
        "{}_{}",
        unicode_label(min_code_point),
        unicode_label(max_code_point)
    ))
}

/// Build and create the directory for one (selection, color) pair.
pub fn create_selection_dir(
    base: &Path,
    selection_name: &str,
    color_name: &str,
    min_code_point: u32,
    max_code_point: u32,
) -> std::io::Result<PathBuf> {
    let dir = selection_dir(base, selection_name, color_name, min_code_point, max_code_point);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// File name for one glyph: `{dir}/{typeface}_{label}{suffix}`.
pub fn glyph_file(dir: &Path, typeface_name: &str, code_point: u32, suffix: &str) -> PathBuf {
    dir.join(format!(
        "{typeface_name}_{}{suffix}",
        unicode_label(code_point)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(unicode_label(0x41), "u0041");
        assert_eq!(unicode_label(0x1F600), "u1f600");
    }

    #[test]
    fn directory_layout() {
        let dir = selection_dir(Path::new("out"), "latin", "red", 0x41, 0x5a);
        assert_eq!(dir, Path::new("out/latin/red/u0041_u005a"));
    }

    #[test]
    fn file_names() {
        let f = glyph_file(Path::new("out/latin/red/u0041_u005a"), "DejaVuSans", 0x42, ".png");
        assert_eq!(
            f,
            Path::new("out/latin/red/u0041_u005a/DejaVuSans_u0042.png")
        );
    }
}
