//! # Render Configuration
//!
//! A JSON description of one barcode render. Every field is optional.
//!
//! ```json
//! {
//!   "symbology": "ean13",
//!   "text": "400638133393",
//!   "scale": 2,
//!   "display_checksum": true,
//!   "font": { "builtin": "8x16" },
//!   "labels": [
//!     { "text": "SKU", "position": "left", "alignment": "center" }
//!   ],
//!   "rotation": 90
//! }
//! ```
//!
//! `label` controls the default label of linear barcodes: `"auto"` (the
//! default) shows the parsed text, `null` or `"none"` hides it, anything
//! else is shown verbatim.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::barcode::{
    Barcode, BarcodeCanvas, ErrorLevel, LabelText, LinearBarcode, MatrixBarcode, Symbology,
};
use crate::color::Color;
use crate::drawing::Drawing;
use crate::error::{BarcanvasError, Result};
use crate::font::{BuiltinFace, Font};
use crate::label::{Alignment, Label, Position};
use crate::layout::Dimension;
use crate::surface::Surface;

/// Barcode kinds a config can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeType {
    Code39,
    #[default]
    Code128,
    Ean13,
    Qr,
}

impl BarcodeType {
    fn linear(self) -> Option<Symbology> {
        match self {
            BarcodeType::Code39 => Some(Symbology::Code39),
            BarcodeType::Code128 => Some(Symbology::Code128),
            BarcodeType::Ean13 => Some(Symbology::Ean13),
            BarcodeType::Qr => None,
        }
    }
}

impl FromStr for BarcodeType {
    type Err = BarcanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "code39" => Ok(BarcodeType::Code39),
            "code128" => Ok(BarcodeType::Code128),
            "ean13" => Ok(BarcodeType::Ean13),
            "qr" => Ok(BarcodeType::Qr),
            other => Err(BarcanvasError::Config(format!(
                "unknown symbology {other:?} (expected code39, code128, ean13 or qr)"
            ))),
        }
    }
}

/// Either a built-in face or a TrueType file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FontConfig {
    Builtin { builtin: BuiltinFace },
    File { path: PathBuf, size: f32 },
}

impl FontConfig {
    pub fn load(&self) -> Result<Font> {
        match self {
            FontConfig::Builtin { builtin } => Ok(Font::builtin(*builtin)),
            FontConfig::File { path, size } => Font::from_file(path, *size),
        }
    }
}

/// One extra label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub text: String,
    pub position: Position,
    pub alignment: Alignment,
    pub spacing: i32,
    pub offset: i32,
    pub rotation: i32,
    pub foreground: Option<Color>,
    pub font: Option<FontConfig>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: Position::default(),
            alignment: Alignment::default(),
            spacing: Label::DEFAULT_SPACING,
            offset: 0,
            rotation: 0,
            foreground: None,
            font: None,
        }
    }
}

impl LabelConfig {
    /// Build the label, using `fallback` when no font is given.
    pub fn build(&self, fallback: &Font) -> Result<Label> {
        let font = match &self.font {
            Some(font) => font.load()?,
            None => fallback.clone(),
        };
        let mut label = Label::new(self.text.clone(), font)
            .position(self.position)
            .alignment(self.alignment)
            .spacing(self.spacing)
            .offset(self.offset)
            .rotation(self.rotation);
        if let Some(color) = self.foreground {
            label.set_foreground(color);
        }
        Ok(label)
    }
}

/// Complete description of a barcode render.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub symbology: BarcodeType,
    pub text: String,
    pub scale: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub thickness: Option<i32>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// Encode a Code 39 check character.
    pub checksum: bool,
    pub display_checksum: bool,
    pub label: Option<String>,
    pub font: Option<FontConfig>,
    pub labels: Vec<LabelConfig>,
    pub module_scale: Option<[i32; 2]>,
    pub quiet_zone: Option<i32>,
    pub error_level: ErrorLevel,
    /// Final image rotation in degrees, clockwise.
    pub rotation: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            symbology: BarcodeType::default(),
            text: String::new(),
            scale: 1,
            offset_x: 0,
            offset_y: 0,
            thickness: None,
            foreground: None,
            background: None,
            checksum: false,
            display_checksum: false,
            label: Some("auto".into()),
            font: None,
            labels: Vec::new(),
            module_scale: None,
            quiet_zone: None,
            error_level: ErrorLevel::default(),
            rotation: 0.0,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            BarcanvasError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&json)
    }

    fn label_text(&self) -> LabelText {
        match self.label.as_deref() {
            None | Some("none") => LabelText::None,
            Some("auto") => LabelText::Auto,
            Some(text) => LabelText::Custom(text.to_string()),
        }
    }

    /// Create, configure and parse the described barcode.
    pub fn build(&self) -> Result<AnyBarcode> {
        let font = match &self.font {
            Some(font) => font.load()?,
            None => Font::default(),
        };

        let mut barcode = match self.symbology.linear() {
            Some(symbology) => {
                let mut code = LinearBarcode::new(symbology);
                if let Some(thickness) = self.thickness {
                    code.set_thickness(thickness)?;
                }
                code.set_checksum(self.checksum);
                code.set_display_checksum(self.display_checksum);
                code.set_label_text(self.label_text());
                code.set_font(&font);
                if self.module_scale.is_some() || self.quiet_zone.is_some() {
                    log::warn!("module_scale and quiet_zone only apply to qr, ignoring");
                }
                AnyBarcode::Linear(code)
            }
            None => {
                let mut code = MatrixBarcode::new();
                code.set_error_level(self.error_level);
                if let Some([x, y]) = self.module_scale {
                    code.set_module_scale(x, y)?;
                }
                if let Some(quiet_zone) = self.quiet_zone {
                    code.set_quiet_zone(quiet_zone)?;
                }
                if self.thickness.is_some() || self.checksum || self.display_checksum {
                    log::warn!("thickness and checksum options only apply to linear barcodes, ignoring");
                }
                AnyBarcode::Matrix(code)
            }
        };

        let canvas = barcode.canvas_mut();
        canvas.set_scale(self.scale)?;
        canvas.set_offset_x(self.offset_x)?;
        canvas.set_offset_y(self.offset_y)?;
        if let Some(color) = self.foreground {
            canvas.set_foreground(color);
        }
        if let Some(color) = self.background {
            canvas.set_background(color);
        }
        for label in &self.labels {
            canvas.add_label(label.build(&font)?);
        }

        barcode.parse(&self.text)?;
        Ok(barcode)
    }

    /// Drawing settings: the barcode background and the final rotation.
    pub fn drawing(&self) -> Drawing {
        Drawing::new()
            .background(self.background.unwrap_or(Color::WHITE))
            .rotation(self.rotation)
    }
}

/// A configured barcode of any supported kind.
#[derive(Debug, Clone)]
pub enum AnyBarcode {
    Linear(LinearBarcode),
    Matrix(MatrixBarcode),
}

impl Barcode for AnyBarcode {
    fn canvas(&self) -> &BarcodeCanvas {
        match self {
            AnyBarcode::Linear(code) => code.canvas(),
            AnyBarcode::Matrix(code) => code.canvas(),
        }
    }

    fn canvas_mut(&mut self) -> &mut BarcodeCanvas {
        match self {
            AnyBarcode::Linear(code) => code.canvas_mut(),
            AnyBarcode::Matrix(code) => code.canvas_mut(),
        }
    }

    fn parse(&mut self, text: &str) -> Result<()> {
        match self {
            AnyBarcode::Linear(code) => code.parse(text),
            AnyBarcode::Matrix(code) => code.parse(text),
        }
    }

    fn dimension(&mut self) -> Dimension {
        match self {
            AnyBarcode::Linear(code) => code.dimension(),
            AnyBarcode::Matrix(code) => code.dimension(),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            AnyBarcode::Linear(code) => code.draw(surface),
            AnyBarcode::Matrix(code) => code.draw(surface),
        }
    }
}
