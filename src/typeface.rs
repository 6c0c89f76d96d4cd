//! Typeface resolution and the glyph rendering backend.
//!
//! `Typeface` is the seam between the pipeline and the rasterizer: the
//! solver and job builder only ever ask "can you display this code point?"
//! and "render it at this offset". The production implementation is
//! fontdue-backed; tests substitute synthetic implementations.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::color::NamedColor;
use crate::error::{Error, Result};

/// Style requested for a selection. A style variant is a separate font
/// file in this backend, so the style is carried as request metadata and
/// used when resolving faces, not synthesized from outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FromStr for FontStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "regular" => Ok(Self::Plain),
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "bold-italic" | "bolditalic" => Ok(Self::BoldItalic),
            other => Err(format!("unknown font style: {other}")),
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BoldItalic => "bold-italic",
        };
        f.write_str(s)
    }
}

/// A renderable typeface at a fixed size and style.
///
/// `render` draws the glyph for `code_point` anchored at the baseline
/// origin `(offset_x, offset_y)`, where `offset_y` is measured from the
/// top of the canvas (the baseline row), onto a fresh transparent canvas
/// of the given dimensions. Ink outside the canvas clips silently.
/// Rendering quality settings are fixed by the implementation.
pub trait Typeface: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this face has a glyph for the code point.
    fn can_display(&self, code_point: u32) -> bool;

    fn render(
        &self,
        code_point: u32,
        color: &NamedColor,
        offset_x: f32,
        offset_y: f32,
        width: u32,
        height: u32,
    ) -> Canvas;
}

/// A fontdue-backed face at a fixed pixel size.
#[derive(Clone)]
pub struct FontFace {
    font: Arc<fontdue::Font>,
    name: String,
    size: f32,
    style: FontStyle,
}

impl FontFace {
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }
}

impl Typeface for FontFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_display(&self, code_point: u32) -> bool {
        match char::from_u32(code_point) {
            Some(ch) => self.font.lookup_glyph_index(ch) != 0,
            None => false,
        }
    }

    fn render(
        &self,
        code_point: u32,
        color: &NamedColor,
        offset_x: f32,
        offset_y: f32,
        width: u32,
        height: u32,
    ) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let ch = match char::from_u32(code_point) {
            Some(ch) => ch,
            None => return canvas,
        };
        let (metrics, coverage) = self.font.rasterize(ch, self.size);

        // Anchor the bitmap relative to the baseline origin: fontdue's
        // ymin is the bbox bottom relative to the baseline.
        let left = offset_x.round() as i64 + metrics.xmin as i64;
        let top = offset_y.round() as i64 - metrics.height as i64 - metrics.ymin as i64;
        let [r, g, b, a] = color.rgba();

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let cov = coverage[gy * metrics.width + gx];
                if cov == 0 {
                    continue;
                }
                let alpha = ((cov as u16 * a as u16) / 255) as u8;
                canvas.put(left + gx as i64, top + gy as i64, [r, g, b, alpha]);
            }
        }
        canvas
    }
}

/// Ordered registry of loaded fonts. Faces are resolved by name (file
/// stem) or by position, and turned into renderable handles at a given
/// size and style.
#[derive(Default)]
pub struct FontCatalog {
    fonts: Vec<(String, Arc<fontdue::Font>)>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TTF/OTF file into the catalog. The face is named after the
    /// file stem.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path).map_err(|e| Error::FontLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |reason| Error::FontLoad {
                path: path.display().to_string(),
                reason: reason.to_string(),
            },
        )?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        self.fonts.push((name, Arc::new(font)));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Numbered listing of the loaded faces, for console display.
    pub fn listing(&self) -> String {
        let mut out = String::from("Font Options\n============\n");
        for (i, (name, _)) in self.fonts.iter().enumerate() {
            out.push_str(&format!("\t{}.  {}\n", i + 1, name));
        }
        out
    }

    /// Resolve a renderable handle by face name.
    pub fn face(&self, name: &str, size: f32, style: FontStyle) -> Option<FontFace> {
        self.fonts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(n, font)| FontFace {
                font: Arc::clone(font),
                name: n.clone(),
                size,
                style,
            })
    }

    /// Resolve a renderable handle by position (zero-based).
    pub fn face_at(&self, index: usize, size: f32, style: FontStyle) -> Option<FontFace> {
        self.fonts.get(index).map(|(n, font)| FontFace {
            font: Arc::clone(font),
            name: n.clone(),
            size,
            style,
        })
    }

    /// Renderable handles for every loaded font, in load (priority) order.
    pub fn faces(&self, size: f32, style: FontStyle) -> Vec<FontFace> {
        self.fonts
            .iter()
            .map(|(n, font)| FontFace {
                font: Arc::clone(font),
                name: n.clone(),
                size,
                style,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parsing() {
        assert_eq!("plain".parse::<FontStyle>().unwrap(), FontStyle::Plain);
        assert_eq!("Bold".parse::<FontStyle>().unwrap(), FontStyle::Bold);
        assert_eq!(
            "bold-italic".parse::<FontStyle>().unwrap(),
            FontStyle::BoldItalic
        );
        assert!("wavy".parse::<FontStyle>().is_err());
    }

    #[test]
    fn empty_catalog_resolves_nothing() {
        let catalog = FontCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.face("missing", 12.0, FontStyle::Plain).is_none());
        assert!(catalog.face_at(0, 12.0, FontStyle::Plain).is_none());
    }

    #[test]
    fn load_rejects_non_font_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("charpix_not_a_font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let mut catalog = FontCatalog::new();
        assert!(catalog.load_file(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
