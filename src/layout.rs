//! # Canvas Layout
//!
//! Computes how large a canvas must be to hold a scaled barcode body and
//! all of its labels, and how far the body must be pushed right/down so
//! labels on the top and left are not clipped.
//!
//! ## Algorithm
//!
//! ```text
//! 1. Per side, keep the label that is largest across the side
//!    (height for Top/Bottom, width for Left/Right).
//! 2. W = (width + offset_x) * scale, H = (height + offset_y) * scale
//! 3. Pad each side by its representative's size across the side.
//! 4. Per side, keep the label that is largest *along* the side and grow
//!    the padding where it overflows W or H, according to its alignment.
//!    Padding only ever grows (max, never assignment).
//! 5. push = (left, top)
//! 6. canvas = (W + left + right, H + top + bottom)
//! ```
//!
//! ## Example
//!
//! ```
//! use barcanvas::font::{BuiltinFace, Font};
//! use barcanvas::label::{Label, Position};
//! use barcanvas::layout::{compute_layout, Dimension, Push, ScaleConfig};
//!
//! let caption = Label::new("1234567890", Font::builtin(BuiltinFace::Spleen6x12));
//! let config = ScaleConfig { scale: 2, offset_x: 0, offset_y: 0 };
//! let layout = compute_layout(&[caption], 100, 30, config);
//!
//! // 60x12 text + 4 spacing under a 200x60 body
//! assert_eq!(layout.dimension, Dimension::new(200, 76));
//! assert_eq!(layout.push, Push::default());
//! ```

use std::fmt;

use crate::label::{Alignment, Label, Position};

/// A (width, height) pair in pixels or modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<(i32, i32)> for Dimension {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Translation applied to every draw call (left, top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Push {
    pub left: i32,
    pub top: i32,
}

/// Extra pixels around the scaled body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

/// Uniform scale and pre-scale translation of the barcode body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleConfig {
    pub scale: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    /// Final canvas size.
    pub dimension: Dimension,
    pub push: Push,
    pub padding: Padding,
}

/// One representative label per side, indexed Top, Right, Bottom, Left.
pub type SideLabels<'a> = [Option<&'a Label>; 4];

/// Pick, per side, the label with the largest extent.
///
/// Without `reversed` the extent is the one across the side (width for
/// Left/Right, height for Top/Bottom); with `reversed` it is the one along
/// the side. Ties keep the earlier label.
pub fn biggest_labels(labels: &[Label], reversed: bool) -> SideLabels<'_> {
    let mut sides: SideLabels<'_> = [None; 4];

    for label in labels {
        let index = label.get_position().index();
        let replace = match sides[index] {
            None => true,
            Some(saved) => extent(label, reversed) > extent(saved, reversed),
        };
        if replace {
            sides[index] = Some(label);
        }
    }

    sides
}

fn extent(label: &Label, reversed: bool) -> i32 {
    let d = label.dimension();
    let across_is_width = label.get_position().is_vertical_side() != reversed;
    if across_is_width { d.width } else { d.height }
}

/// Ceiling of `n / 2` for possibly negative `n`.
fn half_ceil(n: i32) -> i32 {
    (n as f64 / 2.0).ceil() as i32
}

/// Compute canvas size and push vector for a body of `width` x `height`
/// modules carrying `labels`.
pub fn compute_layout(labels: &[Label], width: i32, height: i32, config: ScaleConfig) -> Layout {
    let mut padding = Padding::default();

    for (side, label) in Position::ALL.iter().zip(biggest_labels(labels, false)) {
        let Some(label) = label else { continue };
        let d = label.dimension();
        match side {
            Position::Top => padding.top = padding.top.saturating_add(d.height),
            Position::Right => padding.right = padding.right.saturating_add(d.width),
            Position::Bottom => padding.bottom = padding.bottom.saturating_add(d.height),
            Position::Left => padding.left = padding.left.saturating_add(d.width),
        }
    }

    // Saturates instead of wrapping; callers cap the canvas they allocate.
    let body_w = width.saturating_add(config.offset_x).saturating_mul(config.scale);
    let body_h = height.saturating_add(config.offset_y).saturating_mul(config.scale);

    // Labels longer than the side they sit on spill past the body.
    for label in biggest_labels(labels, true).into_iter().flatten() {
        let d = label.dimension();
        let alignment = label.get_alignment();

        if label.get_position().is_vertical_side() {
            let overflow = d.height.saturating_sub(body_h);
            match alignment {
                Alignment::Top => padding.bottom = padding.bottom.max(overflow),
                Alignment::Center => {
                    let half = half_ceil(overflow);
                    padding.top = padding.top.max(half);
                    padding.bottom = padding.bottom.max(half);
                }
                Alignment::Bottom => padding.top = padding.top.max(overflow),
                Alignment::Left | Alignment::Right => {}
            }
        } else {
            let overflow = d.width.saturating_sub(body_w);
            match alignment {
                Alignment::Left => padding.right = padding.right.max(overflow),
                Alignment::Center => {
                    let half = half_ceil(overflow);
                    padding.right = padding.right.max(half);
                    padding.left = padding.left.max(half);
                }
                Alignment::Right => padding.left = padding.left.max(overflow),
                Alignment::Top | Alignment::Bottom => {}
            }
        }
    }

    let layout = Layout {
        dimension: Dimension::new(
            body_w.saturating_add(padding.left).saturating_add(padding.right),
            body_h.saturating_add(padding.top).saturating_add(padding.bottom),
        ),
        push: Push {
            left: padding.left,
            top: padding.top,
        },
        padding,
    };

    log::debug!(
        "layout: body {}x{} scale {} -> canvas {} push ({}, {})",
        width,
        height,
        config.scale,
        layout.dimension,
        layout.push.left,
        layout.push.top
    );

    layout
}
