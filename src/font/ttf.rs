//! TrueType/OpenType rendering with ab_glyph.
//!
//! Glyphs are laid out on a single line by horizontal advance. The box
//! height is the ascent-to-descent line height; the baseline sits at the
//! ascent.

use ab_glyph::{Font, FontArc, ScaleFont};

use super::GlyphRun;

/// (width, height, top)
pub(super) fn measure(font: &FontArc, pixel_height: f32, text: &str) -> (usize, usize, usize) {
    let scaled = font.as_scaled(pixel_height);
    let advance: f32 = text.chars().map(|ch| scaled.h_advance(font.glyph_id(ch))).sum();

    let ascent = scaled.ascent();
    let descent = scaled.descent();
    let line_height = (ascent - descent).ceil() as usize;

    (advance.ceil() as usize, line_height, ascent.ceil() as usize)
}

pub(super) fn rasterize(font: &FontArc, pixel_height: f32, text: &str) -> GlyphRun {
    let scaled = font.as_scaled(pixel_height);
    let (width, height, _) = measure(font, pixel_height, text);
    let mut run = GlyphRun::blank(width, height);
    let baseline_y = scaled.ascent();

    let mut caret_x = 0.0f32;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(pixel_height, ab_glyph::point(caret_x, baseline_y));
        caret_x += scaled.h_advance(glyph_id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                    let idx = y as usize * width + x as usize;
                    run.coverage[idx] = (run.coverage[idx] + coverage).min(1.0);
                }
            });
        }
    }

    run
}
