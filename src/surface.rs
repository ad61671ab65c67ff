//! # Pixel Surfaces
//!
//! The drawing primitives never touch pixel buffers directly; they go
//! through [`Surface`]. [`ImageSurface`] backs it with an `image::RgbaImage`.
//!
//! All coordinates are device pixels and rectangles are inclusive on both
//! corners. Anything outside the surface is clipped.

use image::RgbaImage;

use crate::color::Color;
use crate::font::{Font, Rotation, rotate_point};

/// Minimal pixel surface used by barcodes and labels.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill the inclusive rectangle `(x1, y1)`-`(x2, y2)`.
    fn fill_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color);

    /// Blend `color` into one pixel with the given coverage (0.0-1.0).
    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32);

    /// Draw `text` with the top-left corner of its rotated box at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &Font, rotation: Rotation, color: Color) {
        let run = font.rasterize(text);
        if run.width == 0 || run.height == 0 {
            return;
        }

        for py in 0..run.height {
            for px in 0..run.width {
                let coverage = run.coverage[py * run.width + px];
                if coverage <= 0.0 {
                    continue;
                }
                let (dx, dy) = rotate_point(px, py, run.width, run.height, rotation);
                self.blend(x.saturating_add(dx as i32), y.saturating_add(dy as i32), color, coverage);
            }
        }
    }
}

/// A surface backed by an RGBA image buffer.
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Allocate a `width` x `height` surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background.to_rgba()),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.image.width() && y < self.image.height() {
            Some((*self.image.get_pixel(x, y)).into())
        } else {
            None
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Clamp an inclusive span to `0..limit`. None when fully outside.
    fn clip(a: i32, b: i32, limit: u32) -> Option<(u32, u32)> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if hi < 0 || lo >= limit as i32 {
            return None;
        }
        Some((lo.max(0) as u32, hi.min(limit as i32 - 1) as u32))
    }
}

impl Surface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let Some((x_lo, x_hi)) = Self::clip(x1, x2, self.image.width()) else {
            return;
        };
        let Some((y_lo, y_hi)) = Self::clip(y1, y2, self.image.height()) else {
            return;
        };

        let px = color.to_rgba();
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                self.image.put_pixel(x, y, px);
            }
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let src = [color.r(), color.g(), color.b()];
        for (channel, &s) in dst.0.iter_mut().zip(src.iter()) {
            let mixed = *channel as f32 + (s as f32 - *channel as f32) * coverage;
            *channel = mixed.round() as u8;
        }
        if !color.is_transparent() {
            dst.0[3] = 255;
        }
    }
}

/// Surface double that records every call instead of drawing.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub fills: Vec<(i32, i32, i32, i32, Color)>,
    pub texts: Vec<(String, i32, i32, Rotation)>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.fills.push((x1, y1, x2, y2, color));
    }

    fn blend(&mut self, _x: i32, _y: i32, _color: Color, _coverage: f32) {}

    fn draw_text(&mut self, text: &str, x: i32, y: i32, _font: &Font, rotation: Rotation, _color: Color) {
        self.texts.push((text.to_string(), x, y, rotation));
    }
}
