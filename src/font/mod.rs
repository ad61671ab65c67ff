//! # Fonts and Text Metrics
//!
//! A [`Font`] is a value: cloning it gives an independent copy of the
//! typeface handle and size, so a label that stores a clone is unaffected
//! by later changes to the font it was built from.
//!
//! Two typeface families are supported:
//!
//! | Typeface | Source | Metrics |
//! |----------|--------|---------|
//! | [`BuiltinFace`] | Spleen bitmap fonts compiled into the binary | fixed cell size |
//! | TrueType/OpenType | file or bytes, rasterized with `ab_glyph` | from font tables |
//!
//! ```
//! use barcanvas::font::{BuiltinFace, Font, Rotation};
//!
//! let font = Font::builtin(BuiltinFace::Spleen6x12);
//! let m = font.measure("ABC", Rotation::None);
//! assert_eq!((m.width, m.height), (18, 12));
//!
//! let m = font.measure("ABC", Rotation::Clockwise90);
//! assert_eq!((m.width, m.height), (12, 18));
//! ```

mod spleen;
mod ttf;

use ab_glyph::FontArc;
use serde::Deserialize;
use std::path::Path;

use crate::error::{BarcanvasError, Result};

/// Text rotation in degrees clockwise. Only right angles are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Normalize a degree value. Anything other than 90, 180 or 270
    /// (including 360 and negative angles) becomes no rotation.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees {
            90 => Rotation::Clockwise90,
            180 => Rotation::Clockwise180,
            270 => Rotation::Clockwise270,
            _ => Rotation::None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// True when the rotation swaps width and height.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let degrees = i32::deserialize(deserializer)?;
        Ok(Rotation::from_degrees(degrees))
    }
}

/// Built-in Spleen bitmap faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum BuiltinFace {
    #[serde(rename = "6x12")]
    Spleen6x12,
    #[serde(rename = "8x16")]
    Spleen8x16,
    #[serde(rename = "12x24")]
    Spleen12x24,
}

impl BuiltinFace {
    /// Character cell size in pixels (width, height).
    pub fn cell(self) -> (usize, usize) {
        match self {
            BuiltinFace::Spleen6x12 => (6, 12),
            BuiltinFace::Spleen8x16 => (8, 16),
            BuiltinFace::Spleen12x24 => (12, 24),
        }
    }
}

#[derive(Clone)]
enum Typeface {
    Builtin(BuiltinFace),
    Truetype(FontArc),
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::Builtin(face) => f.debug_tuple("Builtin").field(face).finish(),
            Typeface::Truetype(_) => f.write_str("Truetype"),
        }
    }
}

/// Measured size of a run of text, already rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    pub width: i32,
    pub height: i32,
    /// Distance from the top of the box to the baseline (unrotated).
    pub top: i32,
}

/// Unrotated anti-aliased coverage of a text run.
///
/// Coverage values: 0.0 = untouched, 1.0 = fully inked.
pub struct GlyphRun {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<f32>,
}

impl GlyphRun {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            coverage: vec![0.0; width * height],
        }
    }
}

/// A typeface at a given pixel size.
#[derive(Debug, Clone)]
pub struct Font {
    face: Typeface,
    size: f32,
}

impl Font {
    /// A built-in bitmap face at its native size.
    pub fn builtin(face: BuiltinFace) -> Self {
        Self {
            face: Typeface::Builtin(face),
            size: face.cell().1 as f32,
        }
    }

    /// Load a TrueType/OpenType font from bytes.
    pub fn from_bytes(bytes: Vec<u8>, pixel_size: f32) -> Result<Self> {
        if !(pixel_size > 0.0) {
            return Err(BarcanvasError::argument(
                "pixel_size",
                "The font size must be larger than 0.",
            ));
        }
        let font = FontArc::try_from_vec(bytes).map_err(|e| BarcanvasError::Font(e.to_string()))?;
        Ok(Self {
            face: Typeface::Truetype(font),
            size: pixel_size,
        })
    }

    /// Load a TrueType/OpenType font file.
    pub fn from_file(path: impl AsRef<Path>, pixel_size: f32) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| {
            BarcanvasError::Font(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_bytes(bytes, pixel_size)
    }

    pub fn pixel_size(&self) -> f32 {
        self.size
    }

    /// Measure `text` as it would be drawn with `rotation`.
    pub fn measure(&self, text: &str, rotation: Rotation) -> TextMetrics {
        let (width, height, top) = match &self.face {
            Typeface::Builtin(face) => spleen::measure(*face, text),
            Typeface::Truetype(font) => ttf::measure(font, self.size, text),
        };

        if rotation.is_quarter_turn() {
            TextMetrics {
                width: height as i32,
                height: width as i32,
                top: top as i32,
            }
        } else {
            TextMetrics {
                width: width as i32,
                height: height as i32,
                top: top as i32,
            }
        }
    }

    /// Rasterize `text` without rotation.
    pub fn rasterize(&self, text: &str) -> GlyphRun {
        match &self.face {
            Typeface::Builtin(face) => spleen::rasterize(*face, text),
            Typeface::Truetype(font) => ttf::rasterize(font, self.size, text),
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::builtin(BuiltinFace::Spleen6x12)
    }
}

/// Map a pixel of an unrotated run (`w` x `h`) into the rotated box.
pub(crate) fn rotate_point(px: usize, py: usize, w: usize, h: usize, rotation: Rotation) -> (usize, usize) {
    match rotation {
        Rotation::None => (px, py),
        Rotation::Clockwise90 => (h - 1 - py, px),
        Rotation::Clockwise180 => (w - 1 - px, h - 1 - py),
        Rotation::Clockwise270 => (py, w - 1 - px),
    }
}
