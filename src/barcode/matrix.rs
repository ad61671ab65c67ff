//! Two-dimensional barcodes (QR Code) encoded with `qrcode`.
//!
//! Each module is `scale * module_x` by `scale * module_y` pixels. A quiet
//! zone of light modules surrounds the symbol.

use qrcode::{EcLevel, QrCode};
use serde::Deserialize;

use super::{Barcode, BarcodeCanvas, Ink, ModuleScale};
use crate::error::{BarcanvasError, Result};
use crate::layout::Dimension;
use crate::surface::Surface;

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum ErrorLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl From<ErrorLevel> for EcLevel {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::L => EcLevel::L,
            ErrorLevel::M => EcLevel::M,
            ErrorLevel::Q => EcLevel::Q,
            ErrorLevel::H => EcLevel::H,
        }
    }
}

/// A QR Code.
#[derive(Debug, Clone)]
pub struct MatrixBarcode {
    canvas: BarcodeCanvas,
    error_level: ErrorLevel,
    quiet_zone: i32,
    /// Row-major dark modules, `size * size`.
    modules: Vec<bool>,
    size: i32,
}

impl MatrixBarcode {
    pub const DEFAULT_QUIET_ZONE: i32 = 4;

    pub fn new() -> Self {
        Self {
            canvas: BarcodeCanvas::new(ModuleScale::Matrix { x: 1, y: 1 }),
            error_level: ErrorLevel::default(),
            quiet_zone: Self::DEFAULT_QUIET_ZONE,
            modules: Vec::new(),
            size: 0,
        }
    }

    pub fn error_level(&self) -> ErrorLevel {
        self.error_level
    }

    /// Takes effect on the next parse.
    pub fn set_error_level(&mut self, level: ErrorLevel) {
        self.error_level = level;
    }

    pub fn quiet_zone(&self) -> i32 {
        self.quiet_zone
    }

    pub fn set_quiet_zone(&mut self, modules: i32) -> Result<()> {
        if modules < 0 {
            return Err(BarcanvasError::argument(
                "quiet_zone",
                "The quiet zone must be 0 or larger.",
            ));
        }
        self.quiet_zone = modules;
        self.canvas.mark_dirty();
        Ok(())
    }

    /// Per-axis module size multiplier.
    pub fn set_module_scale(&mut self, x: i32, y: i32) -> Result<()> {
        if x <= 0 {
            return Err(BarcanvasError::argument("module_x", "The scale must be larger than 0."));
        }
        if y <= 0 {
            return Err(BarcanvasError::argument("module_y", "The scale must be larger than 0."));
        }
        self.canvas.set_module_scale(ModuleScale::Matrix { x, y });
        Ok(())
    }

    /// Symbol width in modules, without the quiet zone.
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.size || y >= self.size {
            return false;
        }
        self.modules[(y * self.size + x) as usize]
    }

    /// Body width and height in modules, including the quiet zone.
    fn body(&self) -> i32 {
        self.size + 2 * self.quiet_zone
    }
}

impl Default for MatrixBarcode {
    fn default() -> Self {
        Self::new()
    }
}

impl Barcode for MatrixBarcode {
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
        let code = QrCode::with_error_correction_level(text, self.error_level.into())
            .map_err(|e| BarcanvasError::Parse(format!("QR code generation failed: {}", e)))?;

        let width = code.width();
        let mut modules = Vec::with_capacity(width * width);
        for qy in 0..width {
            for qx in 0..width {
                modules.push(code[(qx, qy)] == qrcode::Color::Dark);
            }
        }

        self.modules = modules;
        self.size = width as i32;
        self.canvas.mark_dirty();
        log::debug!("parsed qr {:?}: {}x{} modules", text, width, width);
        Ok(())
    }

    fn dimension(&mut self) -> Dimension {
        let body = self.body();
        self.canvas.layout(body, body, None).dimension
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let q = self.quiet_zone;
        for y in 0..self.size {
            for x in 0..self.size {
                if self.is_dark(x, y) {
                    self.canvas.draw_pixel(surface, x + q, y + q, Ink::Foreground);
                }
            }
        }

        let body = self.body();
        self.canvas.draw_labels(surface, 0, 0, body, body, None);
    }
}
