//! # Barcodes
//!
//! Every barcode owns a [`BarcodeCanvas`]: its colors, scale, offsets,
//! attached labels and the push vector from the last layout. The canvas
//! maps logical module coordinates to device pixels:
//!
//! ```text
//! device_x = (x + offset_x) * scale * module_x + push.left
//! device_y = (y + offset_y) * scale * module_y + push.top
//! ```
//!
//! `module_x`/`module_y` are 1 for linear barcodes and the per-axis module
//! scale for matrix barcodes (see [`ModuleScale`]).
//!
//! ## Symbologies
//!
//! | Type | Module | Encoder |
//! |------|--------|---------|
//! | Code 39, Code 128, EAN-13 | [`linear`] | barcoders |
//! | QR Code | [`matrix`] | qrcode |
//!
//! ## Push vector lifetime
//!
//! The push vector is recomputed by every dimension query. Any setter that
//! changes the layout (scale, offsets, labels, parsed text) discards it, and
//! drawing falls back to a zero push until the next query.

pub mod linear;
pub mod matrix;

pub use linear::{LabelText, LinearBarcode, Symbology};
pub use matrix::{ErrorLevel, MatrixBarcode};

use crate::color::Color;
use crate::error::{BarcanvasError, Result};
use crate::label::Label;
use crate::layout::{Dimension, Layout, Push, ScaleConfig, compute_layout};
use crate::surface::Surface;

/// Which of the barcode's two colors to paint with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Foreground,
    Background,
}

/// Per-axis module multiplier, selected by barcode kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleScale {
    /// One-dimensional symbologies: modules are scaled uniformly.
    Linear,
    /// Two-dimensional symbologies: each module is `x` by `y` units.
    Matrix { x: i32, y: i32 },
}

impl ModuleScale {
    fn factors(self) -> (i32, i32) {
        match self {
            ModuleScale::Linear => (1, 1),
            ModuleScale::Matrix { x, y } => (x, y),
        }
    }
}

/// A barcode that can be sized and painted.
pub trait Barcode {
    fn canvas(&self) -> &BarcodeCanvas;

    fn canvas_mut(&mut self) -> &mut BarcodeCanvas;

    /// Encode `text`, replacing any previous content.
    fn parse(&mut self, text: &str) -> Result<()>;

    /// Final canvas size including labels. Refreshes the push vector.
    fn dimension(&mut self) -> Dimension;

    /// Paint the barcode and its labels. Call [`Barcode::dimension`] first
    /// so the push vector matches the current configuration.
    fn draw(&self, surface: &mut dyn Surface);
}

/// Shared state and drawing primitives for all barcodes.
#[derive(Debug, Clone)]
pub struct BarcodeCanvas {
    foreground: Color,
    background: Color,
    scale: i32,
    offset_x: i32,
    offset_y: i32,
    module_scale: ModuleScale,
    labels: Vec<Label>,
    layout: Option<Layout>,
}

impl BarcodeCanvas {
    pub fn new(module_scale: ModuleScale) -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            scale: 1,
            offset_x: 0,
            offset_y: 0,
            module_scale,
            labels: Vec::new(),
            layout: None,
        }
    }

    fn invalidate(&mut self) {
        self.layout = None;
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Set the background; attached labels follow it.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        for label in &mut self.labels {
            label.set_background(color);
        }
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: i32) -> Result<()> {
        if scale <= 0 {
            return Err(BarcanvasError::argument("scale", "The scale must be larger than 0."));
        }
        self.scale = scale;
        self.invalidate();
        Ok(())
    }

    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    pub fn set_offset_x(&mut self, offset_x: i32) -> Result<()> {
        if offset_x < 0 {
            return Err(BarcanvasError::argument("offset_x", "The offset X must be 0 or larger."));
        }
        self.offset_x = offset_x;
        self.invalidate();
        Ok(())
    }

    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    pub fn set_offset_y(&mut self, offset_y: i32) -> Result<()> {
        if offset_y < 0 {
            return Err(BarcanvasError::argument("offset_y", "The offset Y must be 0 or larger."));
        }
        self.offset_y = offset_y;
        self.invalidate();
        Ok(())
    }

    pub fn module_scale(&self) -> ModuleScale {
        self.module_scale
    }

    pub(crate) fn set_module_scale(&mut self, module_scale: ModuleScale) {
        self.module_scale = module_scale;
        self.invalidate();
    }

    /// Attach a label. It takes on the barcode's background color.
    pub fn add_label(&mut self, mut label: Label) {
        label.set_background(self.background);
        self.labels.push(label);
        self.invalidate();
    }

    /// Detach the label at `index`.
    pub fn remove_label(&mut self, index: usize) -> Option<Label> {
        if index >= self.labels.len() {
            return None;
        }
        self.invalidate();
        Some(self.labels.remove(index))
    }

    pub fn clear_labels(&mut self) {
        self.labels.clear();
        self.invalidate();
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Mutable access to one attached label. Discards the push vector.
    pub fn label_mut(&mut self, index: usize) -> Option<&mut Label> {
        self.invalidate();
        self.labels.get_mut(index)
    }

    /// Discard the push vector after a change the canvas cannot see, such
    /// as new encoded content.
    pub fn mark_dirty(&mut self) {
        self.invalidate();
    }

    /// True while the push vector matches the current configuration.
    pub fn is_layout_current(&self) -> bool {
        self.layout.is_some()
    }

    /// Push vector from the last layout, or zero when it was discarded.
    pub fn push(&self) -> Push {
        self.layout.map(|l| l.push).unwrap_or_default()
    }

    fn device_factors(&self) -> (i32, i32) {
        let (mx, my) = self.module_scale.factors();
        (self.scale.saturating_mul(mx), self.scale.saturating_mul(my))
    }

    fn color(&self, ink: Ink) -> Color {
        match ink {
            Ink::Foreground => self.foreground,
            Ink::Background => self.background,
        }
    }

    /// Lay out a body of `width` x `height` modules with the attached labels
    /// and, when given, the barcode's own default label.
    pub fn layout(&mut self, width: i32, height: i32, default_label: Option<&Label>) -> Layout {
        let (mx, my) = self.module_scale.factors();
        let config = ScaleConfig {
            scale: self.scale,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        };

        let layout = match default_label {
            Some(extra) => {
                let mut labels = self.labels.clone();
                let mut extra = extra.clone();
                extra.set_background(self.background);
                labels.push(extra);
                compute_layout(
                    &labels,
                    width.saturating_mul(mx),
                    height.saturating_mul(my),
                    config,
                )
            }
            None => compute_layout(
                &self.labels,
                width.saturating_mul(mx),
                height.saturating_mul(my),
                config,
            ),
        };

        self.layout = Some(layout);
        layout
    }

    /// Map a logical point to device pixels.
    pub fn map(&self, x: i32, y: i32) -> (i32, i32) {
        let (sx, sy) = self.device_factors();
        let push = self.push();
        (
            x.saturating_add(self.offset_x)
                .saturating_mul(sx)
                .saturating_add(push.left),
            y.saturating_add(self.offset_y)
                .saturating_mul(sy)
                .saturating_add(push.top),
        )
    }

    /// Fill one module.
    pub fn draw_pixel(&self, surface: &mut dyn Surface, x: i32, y: i32, ink: Ink) {
        let (sx, sy) = self.device_factors();
        let (dx, dy) = self.map(x, y);
        surface.fill_rectangle(
            dx,
            dy,
            dx.saturating_add(sx - 1),
            dy.saturating_add(sy - 1),
            self.color(ink),
        );
    }

    /// Outline the modules from `(x1, y1)` to `(x2, y2)`, one module thick.
    pub fn draw_rectangle(&self, surface: &mut dyn Surface, x1: i32, y1: i32, x2: i32, y2: i32, ink: Ink) {
        let color = self.color(ink);
        let (ax, ay) = self.map(x1, y1);
        let (bx, by) = self.map(x2, y2);

        if self.scale == 1 {
            surface.fill_rectangle(ax, ay, bx, by, color);
            return;
        }

        let (sx, sy) = self.device_factors();
        surface.fill_rectangle(ax, ay, bx.saturating_add(sx - 1), ay.saturating_add(sy - 1), color);
        surface.fill_rectangle(ax, ay, ax.saturating_add(sx - 1), by.saturating_add(sy - 1), color);
        surface.fill_rectangle(bx, ay, bx.saturating_add(sx - 1), by.saturating_add(sy - 1), color);
        surface.fill_rectangle(ax, by, bx.saturating_add(sx - 1), by.saturating_add(sy - 1), color);
    }

    /// Fill every module from `(x1, y1)` to `(x2, y2)` inclusive. Corners
    /// may be given in any order.
    pub fn draw_filled_rectangle(
        &self,
        surface: &mut dyn Surface,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        ink: Ink,
    ) {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };

        let (sx, sy) = self.device_factors();
        let (ax, ay) = self.map(x1, y1);
        let (bx, by) = self.map(x2, y2);
        surface.fill_rectangle(
            ax,
            ay,
            bx.saturating_add(sx - 1),
            by.saturating_add(sy - 1),
            self.color(ink),
        );
    }

    /// Draw attached labels (and the default label) around the body whose
    /// logical corners are `(x1, y1)` and `(x2, y2)`.
    pub fn draw_labels(
        &self,
        surface: &mut dyn Surface,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        default_label: Option<&Label>,
    ) {
        let (ax, ay) = self.map(x1, y1);
        let (bx, by) = self.map(x2, y2);

        for label in self.labels.iter().chain(default_label) {
            label.draw(surface, ax, ay, bx, by);
        }
    }
}

impl Default for BarcodeCanvas {
    fn default() -> Self {
        Self::new(ModuleScale::Linear)
    }
}
