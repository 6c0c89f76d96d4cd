//! PNG encoding of rendered canvases.

use std::path::Path;

use image::RgbaImage;

use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// Encode the canvas as a PNG at `path`. Callers in the batch pipeline
/// treat a failure as non-fatal: they log it and keep going.
pub fn export_canvas(canvas: &Canvas, path: &Path) -> Result<()> {
    let img = RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.data().to_vec())
        .ok_or_else(|| Error::Export {
            path: path.display().to_string(),
            cause: "canvas buffer does not match its dimensions".to_string(),
        })?;
    img.save(path).map_err(|e| Error::Export {
        path: path.display().to_string(),
        cause: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyph.png");
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_rect(2, 2, 4, 4, &NamedColor::red());
        export_canvas(&canvas, &path).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn missing_directory_reports_path() {
        let canvas = Canvas::new(4, 4);
        let path = Path::new("/nonexistent/charpix/out.png");
        let err = export_canvas(&canvas, path).unwrap_err();
        assert!(err.to_string().contains("out.png"));
    }
}
