//! One-dimensional barcodes encoded with `barcoders`.
//!
//! The body is `modules` wide and `thickness` tall in logical units. Each
//! linear barcode has a default label (bottom center, Spleen 6x12) that by
//! default shows the parsed text.
//!
//! ```
//! use barcanvas::barcode::{Barcode, LinearBarcode, Symbology};
//!
//! let mut code = LinearBarcode::new(Symbology::Code128);
//! code.parse("HELLO").unwrap();
//! let d = code.dimension();
//! assert_eq!(d.height, 30 + 4 + 12);
//! ```

use barcoders::sym::code39::Code39;
use barcoders::sym::code128::Code128;
use barcoders::sym::ean13::EAN13;
use serde::Deserialize;

use super::{Barcode, BarcodeCanvas, Ink, ModuleScale};
use crate::error::{BarcanvasError, Result};
use crate::font::{BuiltinFace, Font};
use crate::label::{Label, Position};
use crate::layout::Dimension;
use crate::surface::Surface;

/// Code 39 character values, in mod-43 checksum order.
const CODE39_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// Character set B selector understood by `barcoders`.
const CODE128_SET_B: char = '\u{0181}';

/// Supported linear symbologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    /// A-Z, 0-9, space, `- . $ / + %`
    Code39,
    /// Printable ASCII (character set B)
    Code128,
    /// 12 digits, or 13 with a valid check digit
    Ean13,
}

impl Symbology {
    pub fn name(self) -> &'static str {
        match self {
            Symbology::Code39 => "code39",
            Symbology::Code128 => "code128",
            Symbology::Ean13 => "ean13",
        }
    }
}

/// What the default label shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelText {
    /// The parsed text, followed by the checksum when it is displayed.
    #[default]
    Auto,
    Custom(String),
    None,
}

/// Mod-43 check character for Code 39 data.
pub fn code39_checksum(data: &str) -> Option<char> {
    let mut sum = 0;
    for ch in data.chars() {
        sum += CODE39_CHARSET.find(ch)?;
    }
    CODE39_CHARSET.chars().nth(sum % 43)
}

/// EAN-13 check digit for the first 12 digits.
pub fn ean13_check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { d as u32 } else { d as u32 * 3 })
        .sum();
    ((10 - (sum % 10)) % 10) as u8
}

fn ean13_digits(text: &str) -> Result<Vec<u8>> {
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(BarcanvasError::Parse(format!(
            "EAN-13 accepts digits only, got {text:?}"
        )));
    }
    let digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
    match digits.len() {
        12 => Ok(digits),
        13 => {
            let expected = ean13_check_digit(&digits[..12]);
            if digits[12] != expected {
                return Err(BarcanvasError::Parse(format!(
                    "EAN-13 check digit should be {expected}, got {}",
                    digits[12]
                )));
            }
            Ok(digits[..12].to_vec())
        }
        n => Err(BarcanvasError::Parse(format!(
            "EAN-13 requires 12 or 13 digits, got {n}"
        ))),
    }
}

/// A Code 39, Code 128 or EAN-13 barcode.
#[derive(Debug, Clone)]
pub struct LinearBarcode {
    canvas: BarcodeCanvas,
    symbology: Symbology,
    text: String,
    modules: Vec<u8>,
    thickness: i32,
    checksum: bool,
    display_checksum: bool,
    label_text: LabelText,
    default_label: Label,
}

impl LinearBarcode {
    pub const DEFAULT_THICKNESS: i32 = 30;

    pub fn new(symbology: Symbology) -> Self {
        Self {
            canvas: BarcodeCanvas::new(ModuleScale::Linear),
            symbology,
            text: String::new(),
            modules: Vec::new(),
            thickness: Self::DEFAULT_THICKNESS,
            checksum: false,
            display_checksum: false,
            label_text: LabelText::Auto,
            default_label: Label::new("", Font::builtin(BuiltinFace::Spleen6x12))
                .position(Position::Bottom),
        }
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Text given to the last successful [`Barcode::parse`].
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Encoded modules, 1 = bar, 0 = space.
    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    pub fn thickness(&self) -> i32 {
        self.thickness
    }

    /// Bar height in logical units.
    pub fn set_thickness(&mut self, thickness: i32) -> Result<()> {
        if thickness <= 0 {
            return Err(BarcanvasError::argument(
                "thickness",
                "The thickness must be larger than 0.",
            ));
        }
        self.thickness = thickness;
        self.canvas.mark_dirty();
        Ok(())
    }

    /// Encode a mod-43 check character into Code 39 barcodes. Takes effect
    /// on the next parse.
    pub fn set_checksum(&mut self, checksum: bool) {
        self.checksum = checksum;
        self.canvas.mark_dirty();
    }

    /// Append the checksum to the auto label, when the symbology has one.
    pub fn set_display_checksum(&mut self, display: bool) {
        self.display_checksum = display;
        self.canvas.mark_dirty();
    }

    pub fn label_text(&self) -> &LabelText {
        &self.label_text
    }

    pub fn set_label_text(&mut self, text: LabelText) {
        self.label_text = text;
        self.canvas.mark_dirty();
    }

    pub fn font(&self) -> &Font {
        self.default_label.font()
    }

    /// Font used by the default label.
    pub fn set_font(&mut self, font: &Font) {
        self.default_label.set_font(font);
        self.canvas.mark_dirty();
    }

    /// Styling of the default label. Its text is replaced at layout time.
    pub fn default_label_mut(&mut self) -> &mut Label {
        self.canvas.mark_dirty();
        &mut self.default_label
    }

    /// Human-readable checksum, when the symbology displays one.
    pub fn checksum(&self) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        match self.symbology {
            Symbology::Code39 if self.checksum => code39_checksum(&self.text).map(String::from),
            Symbology::Code39 | Symbology::Code128 => None,
            Symbology::Ean13 => {
                let digits = ean13_digits(&self.text).ok()?;
                Some(ean13_check_digit(&digits).to_string())
            }
        }
    }

    /// Text of the default label, or None when there is nothing to show.
    pub fn resolved_label(&self) -> Option<String> {
        let text = match &self.label_text {
            LabelText::Auto => {
                let mut text = match self.symbology {
                    // The check digit is shown separately
                    Symbology::Ean13 => self.text.chars().take(12).collect::<String>(),
                    _ => self.text.clone(),
                };
                if self.display_checksum {
                    if let Some(checksum) = self.checksum() {
                        text.push_str(&checksum);
                    }
                }
                text
            }
            LabelText::Custom(text) => text.clone(),
            LabelText::None => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    fn label_for_layout(&self) -> Option<Label> {
        let text = self.resolved_label()?;
        let mut label = self.default_label.clone();
        label.set_text(text);
        label.set_background(self.canvas.background());
        Some(label)
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let modules = match self.symbology {
            Symbology::Code39 => {
                let data = if self.checksum {
                    let check = code39_checksum(text).ok_or_else(|| {
                        BarcanvasError::Parse(format!("Code 39 cannot encode {text:?}"))
                    })?;
                    format!("{text}{check}")
                } else {
                    text.to_string()
                };
                Code39::new(&data)
                    .map_err(|e| BarcanvasError::Parse(format!("Code 39 encoding error: {e:?}")))?
                    .encode()
            }
            Symbology::Code128 => {
                let data = format!("{CODE128_SET_B}{text}");
                Code128::new(&data)
                    .map_err(|e| BarcanvasError::Parse(format!("Code 128 encoding error: {e:?}")))?
                    .encode()
            }
            Symbology::Ean13 => {
                let digits: String = ean13_digits(text)?
                    .iter()
                    .map(|d| char::from(b'0' + d))
                    .collect();
                EAN13::new(&digits)
                    .map_err(|e| BarcanvasError::Parse(format!("EAN-13 encoding error: {e:?}")))?
                    .encode()
            }
        };
        Ok(modules)
    }
}

impl Barcode for LinearBarcode {
    fn canvas(&self) -> &BarcodeCanvas {
        &self.canvas
    }

    fn canvas_mut(&mut self) -> &mut BarcodeCanvas {
        &mut self.canvas
    }

    fn parse(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(BarcanvasError::Parse("No data has been entered.".into()));
        }
        self.modules = self.encode(text)?;
        self.text = text.to_string();
        self.canvas.mark_dirty();
        log::debug!(
            "parsed {} {:?}: {} modules",
            self.symbology.name(),
            text,
            self.modules.len()
        );
        Ok(())
    }

    fn dimension(&mut self) -> Dimension {
        let label = self.label_for_layout();
        let width = self.modules.len() as i32;
        self.canvas.layout(width, self.thickness, label.as_ref()).dimension
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let bottom = self.thickness - 1;
        let mut run_start: Option<usize> = None;

        for (i, &module) in self.modules.iter().chain(std::iter::once(&0)).enumerate() {
            match (module == 1, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    self.canvas.draw_filled_rectangle(
                        surface,
                        start as i32,
                        0,
                        i as i32 - 1,
                        bottom,
                        Ink::Foreground,
                    );
                    run_start = None;
                }
                _ => {}
            }
        }

        let label = self.label_for_layout();
        let width = self.modules.len() as i32;
        self.canvas
            .draw_labels(surface, 0, 0, width, self.thickness, label.as_ref());
    }
}
