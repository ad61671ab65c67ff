//! Spleen bitmap faces.
//!
//! Every character occupies one fixed cell, so metrics are exact and do not
//! depend on the glyph. Characters missing from the font render as an empty
//! box outline.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use super::{BuiltinFace, GlyphRun};

fn font_data(face: BuiltinFace) -> &'static [u8] {
    match face {
        BuiltinFace::Spleen6x12 => &FONT_6X12[..],
        BuiltinFace::Spleen8x16 => &FONT_8X16[..],
        BuiltinFace::Spleen12x24 => &FONT_12X24[..],
    }
}

/// (width, height, top)
pub(super) fn measure(face: BuiltinFace, text: &str) -> (usize, usize, usize) {
    let (cw, ch) = face.cell();
    (text.chars().count() * cw, ch, 0)
}

pub(super) fn rasterize(face: BuiltinFace, text: &str) -> GlyphRun {
    let (cw, ch) = face.cell();
    let (width, height, _) = measure(face, text);
    let mut run = GlyphRun::blank(width, height);

    let Ok(mut spleen) = PSF2Font::new(font_data(face)) else {
        return run;
    };

    for (i, c) in text.chars().enumerate() {
        let origin = i * cw;
        let utf8 = c.to_string();

        match spleen.glyph_for_utf8(utf8.as_bytes()) {
            Some(glyph) => {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if on && row_y < ch && col_x < cw {
                            run.coverage[row_y * width + origin + col_x] = 1.0;
                        }
                    }
                }
            }
            None if c == ' ' => {}
            None => draw_box(&mut run, origin, cw, ch),
        }
    }

    run
}

fn draw_box(run: &mut GlyphRun, origin: usize, cw: usize, ch: usize) {
    let width = run.width;
    for x in origin..origin + cw {
        run.coverage[x] = 1.0;
        run.coverage[(ch - 1) * width + x] = 1.0;
    }
    for y in 0..ch {
        run.coverage[y * width + origin] = 1.0;
        run.coverage[y * width + origin + cw - 1] = 1.0;
    }
}
