//! # Labels
//!
//! A label is a block of text attached to one side of the barcode body.
//!
//! ```text
//!                 Top
//!         ┌─────────────────┐
//!   Left  │  barcode body   │  Right
//!         └─────────────────┘
//!               Bottom
//! ```
//!
//! `spacing` is the gap between the label and the body. `alignment` and
//! `offset` place the label along the side it sits on: a Bottom label with
//! `Alignment::Left` starts at the body's left edge, a positive `offset`
//! pushes it further right.
//!
//! ```
//! use barcanvas::font::{BuiltinFace, Font};
//! use barcanvas::label::{Alignment, Label, Position};
//!
//! let label = Label::new("HELLO", Font::builtin(BuiltinFace::Spleen6x12))
//!     .position(Position::Top)
//!     .alignment(Alignment::Left)
//!     .spacing(2);
//!
//! // 5 chars * 6 px wide, 12 px tall + 2 px spacing
//! assert_eq!(label.dimension(), (30, 14).into());
//! ```

use serde::Deserialize;

use crate::color::Color;
use crate::font::{Font, Rotation};
use crate::layout::Dimension;
use crate::surface::Surface;

/// Side of the barcode body a label is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Top, Position::Right, Position::Bottom, Position::Left];

    /// True for labels sitting beside the body (Left/Right).
    pub fn is_vertical_side(self) -> bool {
        matches!(self, Position::Left | Position::Right)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Position::Top => 0,
            Position::Right => 1,
            Position::Bottom => 2,
            Position::Left => 3,
        }
    }
}

/// Placement along the side of the body the label is attached to.
///
/// Top/Bottom labels use Left, Center, Right. Left/Right labels use Top,
/// Center, Bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Top,
    #[default]
    Center,
    Right,
    Bottom,
}

/// A positioned text block.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    font: Font,
    position: Position,
    alignment: Alignment,
    offset: i32,
    spacing: i32,
    rotation: Rotation,
    foreground: Color,
    background: Color,
}

impl Label {
    pub const DEFAULT_SPACING: i32 = 4;

    /// Create a label at the bottom center, 4 px away from the body.
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
            position: Position::Bottom,
            alignment: Alignment::Center,
            offset: 0,
            spacing: Self::DEFAULT_SPACING,
            rotation: Rotation::None,
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    pub fn spacing(mut self, spacing: i32) -> Self {
        self.set_spacing(spacing);
        self
    }

    pub fn rotation(mut self, degrees: i32) -> Self {
        self.set_rotation(degrees);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Store a private copy of `font`.
    pub fn set_font(&mut self, font: &Font) {
        self.font = font.clone();
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn get_alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn get_offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    pub fn get_spacing(&self) -> i32 {
        self.spacing
    }

    /// Negative spacing clamps to 0.
    pub fn set_spacing(&mut self, spacing: i32) {
        self.spacing = spacing.max(0);
    }

    pub fn get_rotation(&self) -> Rotation {
        self.rotation
    }

    /// Set the rotation in degrees; values other than 90/180/270 become 0.
    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation = Rotation::from_degrees(degrees);
    }

    pub fn get_foreground(&self) -> Color {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    pub fn get_background(&self) -> Color {
        self.background
    }

    /// Informational only: text is drawn without a backdrop. The owning
    /// barcode copies its own background here for every label it lays out
    /// or draws.
    pub(crate) fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Size of the text alone, rotated.
    fn text_dimension(&self) -> Dimension {
        let m = self.font.measure(&self.text, self.rotation);
        Dimension::new(m.width, m.height)
    }

    /// Space the label occupies, including spacing and positive offset.
    pub fn dimension(&self) -> Dimension {
        let Dimension { mut width, mut height } = self.text_dimension();
        if self.position.is_vertical_side() {
            width = width.saturating_add(self.spacing);
            height = height.saturating_add(self.offset.max(0));
        } else {
            height = height.saturating_add(self.spacing);
            width = width.saturating_add(self.offset.max(0));
        }
        Dimension::new(width, height)
    }

    /// Top-left corner of the text for a body spanning `(x1, y1)`-`(x2, y2)`
    /// in device space.
    pub fn anchor(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> (i32, i32) {
        let Dimension { width: w, height: h } = self.text_dimension();

        match self.position {
            Position::Top | Position::Bottom => {
                let y = if self.position == Position::Top {
                    y1.saturating_sub(self.spacing).saturating_sub(h)
                } else {
                    y2.saturating_add(self.spacing)
                };
                let x = match self.alignment {
                    Alignment::Center => centered(x1, x2, w).saturating_add(self.offset),
                    Alignment::Left => x1.saturating_add(self.offset),
                    _ => x2.saturating_add(self.offset).saturating_sub(w),
                };
                (x, y)
            }
            Position::Left | Position::Right => {
                let x = if self.position == Position::Left {
                    x1.saturating_sub(self.spacing).saturating_sub(w)
                } else {
                    x2.saturating_add(self.spacing)
                };
                let y = match self.alignment {
                    Alignment::Center => centered(y1, y2, h).saturating_add(self.offset),
                    Alignment::Top => y1.saturating_add(self.offset),
                    _ => y2.saturating_add(self.offset).saturating_sub(h),
                };
                (x, y)
            }
        }
    }

    /// Draw the text next to a body spanning `(x1, y1)`-`(x2, y2)` in
    /// device space.
    pub fn draw(&self, surface: &mut dyn Surface, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (x, y) = self.anchor(x1, y1, x2, y2);
        surface.draw_text(&self.text, x, y, &self.font, self.rotation, self.foreground);
    }
}

/// Start of a span of `len` centered between `a` and `b`.
fn centered(a: i32, b: i32, len: i32) -> i32 {
    (b.saturating_sub(a) / 2).saturating_add(a).saturating_sub(len / 2)
}
