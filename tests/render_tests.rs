//! # Render Tests
//!
//! End-to-end checks through the public API: configure a barcode, ask for
//! its dimension, render it and inspect the resulting pixels.
//!
//! Most labels use the built-in Spleen 6x12 face so text metrics are exact:
//! every character is 6 px wide and 12 px tall. The TrueType section loads
//! DejaVu Sans Mono from `tests/fonts/` (Bitstream Vera license, see the
//! file next to it).

use barcanvas::barcode::{Barcode, LabelText, LinearBarcode, MatrixBarcode, Symbology};
use barcanvas::config::RenderConfig;
use barcanvas::drawing::{Drawing, ImageFormat};
use barcanvas::font::{BuiltinFace, Font, Rotation};
use barcanvas::surface::{ImageSurface, Surface};
use barcanvas::label::{Alignment, Label, Position};
use barcanvas::{BarcanvasError, Color, Dimension, Push};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPERS
// ============================================================================

fn small_font() -> Font {
    Font::builtin(BuiltinFace::Spleen6x12)
}

/// EAN-13 body: 95 modules wide.
fn ean(label: LabelText) -> LinearBarcode {
    let mut code = LinearBarcode::new(Symbology::Ean13);
    code.set_label_text(label);
    code.parse("400638133393").unwrap();
    code
}

fn mono_font(pixel_size: f32) -> Font {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf");
    Font::from_file(path, pixel_size).unwrap()
}

fn is_ink(image: &image::RgbaImage, x: u32, y: u32) -> bool {
    Color::from(*image.get_pixel(x, y)) == Color::BLACK
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_no_labels_is_scaled_body() {
    let mut code = ean(LabelText::None);
    code.set_thickness(20).unwrap();
    let canvas = code.canvas_mut();
    canvas.set_scale(3).unwrap();
    canvas.set_offset_x(5).unwrap();
    canvas.set_offset_y(2).unwrap();

    assert_eq!(code.dimension(), Dimension::new((95 + 5) * 3, (20 + 2) * 3));
    assert_eq!(code.canvas().push(), Push::default());
}

#[test]
fn test_bottom_label_that_fits_only_adds_height() {
    let mut code = ean(LabelText::None);
    let bare = code.dimension();

    code.set_label_text(LabelText::Auto);
    let labelled = code.dimension();

    assert_eq!(labelled.width, bare.width);
    assert_eq!(labelled.height, bare.height + 12 + Label::DEFAULT_SPACING);
}

#[test]
fn test_wide_centered_caption_grows_both_sides() {
    let mut code = ean(LabelText::None);
    // 20 chars = 120 px against a 95 px body: 25 px overflow
    code.canvas_mut()
        .add_label(Label::new("A".repeat(20), small_font()));

    let d = code.dimension();
    assert_eq!(code.canvas().push(), Push { left: 13, top: 0 });
    assert_eq!(d, Dimension::new(95 + 13 + 13, 30 + 16));
}

#[test]
fn test_left_aligned_caption_grows_right_only() {
    let mut code = ean(LabelText::None);
    code.canvas_mut().add_label(
        Label::new("A".repeat(20), small_font()).alignment(Alignment::Left),
    );

    assert_eq!(code.dimension(), Dimension::new(95 + 25, 30 + 16));
    assert_eq!(code.canvas().push(), Push::default());
}

#[test]
fn test_labels_on_every_side() {
    let mut code = ean(LabelText::None);
    let canvas = code.canvas_mut();
    for (position, text) in [
        (Position::Top, "T"),
        (Position::Right, "RR"),
        (Position::Bottom, "B"),
        (Position::Left, "LLL"),
    ] {
        canvas.add_label(Label::new(text, small_font()).position(position));
    }

    let d = code.dimension();
    // Left: 18 + 4, Right: 12 + 4, Top/Bottom: 12 + 4
    assert_eq!(code.canvas().push(), Push { left: 22, top: 16 });
    assert_eq!(d, Dimension::new(22 + 95 + 16, 16 + 30 + 16));
}

#[test]
fn test_only_largest_label_per_side_counts() {
    let mut code = ean(LabelText::None);
    let canvas = code.canvas_mut();
    canvas.add_label(Label::new("small", small_font()).position(Position::Top));
    canvas.add_label(
        Label::new("big", Font::builtin(BuiltinFace::Spleen12x24)).position(Position::Top),
    );

    assert_eq!(code.dimension().height, 24 + 4 + 30);
}

#[test]
fn test_tall_side_label_overflow() {
    let mut code = ean(LabelText::None);
    code.set_thickness(10).unwrap();
    // Rotated 90: 12 wide, 60 tall, against a 10 px body
    code.canvas_mut().add_label(
        Label::new("ABCDEFGHIJ", small_font())
            .position(Position::Right)
            .alignment(Alignment::Top)
            .rotation(90),
    );

    let d = code.dimension();
    assert_eq!(code.canvas().push(), Push::default());
    assert_eq!(d, Dimension::new(95 + 16, 60));
}

#[test]
fn test_repeated_queries_are_stable() {
    let mut code = ean(LabelText::Auto);
    code.canvas_mut().add_label(
        Label::new("a long caption on top", small_font()).position(Position::Top),
    );
    let first = (code.dimension(), code.canvas().push());
    let second = (code.dimension(), code.canvas().push());
    assert_eq!(first, second);
}

#[test]
fn test_stale_push_after_mutation() {
    let mut code = ean(LabelText::None);
    code.canvas_mut()
        .add_label(Label::new("TOP", small_font()).position(Position::Top));
    code.dimension();
    assert_eq!(code.canvas().push().top, 16);

    code.canvas_mut().clear_labels();
    assert!(!code.canvas().is_layout_current());
    assert_eq!(code.canvas().push(), Push::default());
}

#[test]
fn test_matrix_module_scale() {
    let mut qr = MatrixBarcode::new();
    qr.parse("HELLO").unwrap();
    qr.set_module_scale(3, 1).unwrap();
    qr.canvas_mut().set_scale(2).unwrap();
    // 21 modules + 2 * 4 quiet zone
    assert_eq!(qr.dimension(), Dimension::new(29 * 3 * 2, 29 * 2));
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_bars_shifted_by_push() {
    let mut code = ean(LabelText::None);
    code.canvas_mut()
        .add_label(Label::new("LEFT", small_font()).position(Position::Left));

    let image = Drawing::new().render(Some(&mut code));
    let push = code.canvas().push();
    assert_eq!(push.left, 24 + 4);

    // EAN-13 opens with a 101 guard
    let y = 5;
    assert!(!is_ink(&image, push.left as u32 - 1, y));
    assert!(is_ink(&image, push.left as u32, y));
    assert!(!is_ink(&image, push.left as u32 + 1, y));
    assert!(is_ink(&image, push.left as u32 + 2, y));
}

#[test]
fn test_label_text_is_inked_inside_canvas() {
    let mut code = ean(LabelText::Auto);
    code.set_thickness(10).unwrap();
    let image = Drawing::new().render(Some(&mut code));
    assert_eq!((image.width(), image.height()), (95, 10 + 16));

    let label_rows = 14..26;
    let inked = image
        .enumerate_pixels()
        .filter(|(_, y, _)| label_rows.contains(y))
        .filter(|(_, _, px)| Color::from(**px) == Color::BLACK)
        .count();
    assert!(inked > 0);

    // Spacing rows between bars and text stay clear
    for x in 0..image.width() {
        assert!(!is_ink(&image, x, 11));
    }
}

#[test]
fn test_colors_applied() {
    let mut code = ean(LabelText::None);
    let red = Color::parse("#ff0000").unwrap();
    assert_eq!(red, Color::from_name("RED"));
    let canvas = code.canvas_mut();
    canvas.set_foreground(red);
    canvas.set_background(Color::from_name("silver"));

    let image = Drawing::new()
        .background(Color::from_name("silver"))
        .render(Some(&mut code));
    assert_eq!(Color::from(*image.get_pixel(0, 0)), red);
    assert_eq!(Color::from(*image.get_pixel(1, 0)), Color::from_name("silver"));
}

#[test]
fn test_qr_scale_renders_square_modules() {
    let mut qr = MatrixBarcode::new();
    qr.parse("HELLO").unwrap();
    qr.canvas_mut().set_scale(2).unwrap();
    let image = Drawing::new().render(Some(&mut qr));
    assert_eq!((image.width(), image.height()), (58, 58));

    // Quiet zone is blank, finder pattern starts at module 4
    assert!(!is_ink(&image, 7, 7));
    assert!(is_ink(&image, 8, 8));
    assert!(is_ink(&image, 9, 9));
}

#[test]
fn test_error_message_replaces_barcode() {
    let mut drawing = Drawing::new();
    drawing.draw_error("oops");
    let mut code = ean(LabelText::Auto);
    let image = drawing.render(Some(&mut code));
    assert_eq!((image.width(), image.height()), (4 * 8, 16));
}

// ============================================================================
// TRUETYPE
// ============================================================================

#[test]
fn test_truetype_measure() {
    let font = mono_font(20.0);
    let one = font.measure("M", Rotation::None);
    let four = font.measure("MMMM", Rotation::None);

    assert!(one.width > 0);
    assert!(four.width > 3 * one.width);
    assert!(four.width <= 4 * one.width);
    // Line height does not depend on the text
    assert_eq!(one.height, four.height);
    assert!(one.top > 0 && one.top < one.height);
    // Monospaced: every glyph advances the same
    assert_eq!(font.measure("iiii", Rotation::None).width, four.width);

    let bigger = mono_font(40.0).measure("MMMM", Rotation::None);
    assert!(bigger.width > four.width);
    assert!(bigger.height > four.height);
}

#[test]
fn test_truetype_quarter_turn_swaps() {
    let font = mono_font(16.0);
    let flat = font.measure("PKG-0042", Rotation::None);
    for rotation in [Rotation::Clockwise90, Rotation::Clockwise270] {
        let turned = font.measure("PKG-0042", rotation);
        assert_eq!((turned.width, turned.height), (flat.height, flat.width));
    }
    let upside_down = font.measure("PKG-0042", Rotation::Clockwise180);
    assert_eq!((upside_down.width, upside_down.height), (flat.width, flat.height));
}

#[test]
fn test_truetype_text_inks_within_its_box() {
    let font = mono_font(16.0);
    let m = font.measure("AB", Rotation::Clockwise90);
    let mut surface = ImageSurface::new(m.width as u32, m.height as u32, Color::WHITE);
    surface.draw_text("AB", 0, 0, &font, Rotation::Clockwise90, Color::BLACK);

    let inked = surface
        .image()
        .pixels()
        .filter(|px| Color::from(**px) != Color::WHITE)
        .count();
    assert!(inked > 0);
}

#[test]
fn test_truetype_label_layout() {
    let font = mono_font(16.0);
    let text_height = font.measure("CAPTION", Rotation::None).height;

    let mut code = ean(LabelText::None);
    code.canvas_mut()
        .add_label(Label::new("CAPTION", font).position(Position::Top));
    let d = code.dimension();
    assert_eq!(code.canvas().push().top, text_height + Label::DEFAULT_SPACING);
    assert_eq!(d.height, text_height + Label::DEFAULT_SPACING + 30);
}

#[test]
fn test_truetype_load_errors() {
    assert!(matches!(
        Font::from_file("tests/fonts/missing.ttf", 12.0),
        Err(BarcanvasError::Font(_))
    ));
    assert!(matches!(
        Font::from_bytes(b"not a font".to_vec(), 12.0),
        Err(BarcanvasError::Font(_))
    ));
    let bytes = std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf")).unwrap();
    assert!(matches!(
        Font::from_bytes(bytes, 0.0),
        Err(BarcanvasError::Argument { name: "pixel_size", .. })
    ));
}

// ============================================================================
// CONFIG PIPELINE
// ============================================================================

#[test]
fn test_config_to_png() {
    let json = r#"{
        "symbology": "code39",
        "text": "ABC",
        "scale": 2,
        "checksum": true,
        "display_checksum": true,
        "labels": [{ "text": "PART", "position": "top", "alignment": "left" }],
        "rotation": 90
    }"#;
    let config = RenderConfig::from_json(json).unwrap();
    let mut barcode = config.build().unwrap();
    let d = barcode.dimension();
    assert_eq!(d.height, 16 + 60 + 16);

    let png = config.drawing().finish(ImageFormat::Png, Some(&mut barcode)).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    // Rotated a quarter turn
    assert_eq!((decoded.width(), decoded.height()), (d.height as u32, d.width as u32));
}

#[test]
fn test_config_rejects_invalid_scale() {
    let config = RenderConfig::from_json(r#"{"text": "A", "scale": -1}"#).unwrap();
    assert!(config.build().is_err());
}
