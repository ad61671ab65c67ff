//! # Drawing
//!
//! Turns a configured barcode into an image:
//!
//! 1. Ask the barcode for its dimension (this refreshes the push vector).
//! 2. Allocate a surface of at least 1x1 and clear it to the background.
//! 3. Let the barcode paint itself.
//! 4. Rotate the result by the drawing's angle, if any.
//!
//! When an error was recorded with [`Drawing::draw_error`], or there is no
//! barcode, a small image with the message is produced instead. The same
//! happens when the layout asks for more than [`MAX_CANVAS_PIXELS`].
//!
//! ## Output formats
//!
//! | Format | Extensions | Alpha |
//! |--------|------------|-------|
//! | PNG | `png` | kept |
//! | JPEG | `jpg`, `jpeg` | flattened onto the background |
//! | BMP | `bmp` | kept |
//! | GIF | `gif` | kept |
//! | WebP | `webp` | kept (lossless) |
//!
//! ```
//! use barcanvas::barcode::{Barcode, LinearBarcode, Symbology};
//! use barcanvas::drawing::{Drawing, ImageFormat};
//!
//! let mut code = LinearBarcode::new(Symbology::Code39);
//! code.parse("ABC").unwrap();
//!
//! let png = Drawing::new().finish(ImageFormat::Png, Some(&mut code)).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage, imageops};

use crate::barcode::Barcode;
use crate::color::Color;
use crate::error::{BarcanvasError, Result};
use crate::font::{BuiltinFace, Font, Rotation};
use crate::surface::{ImageSurface, Surface};

const NO_BARCODE: &str = "No barcode available";

/// Largest canvas (width * height) a render will allocate.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Format for a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "bmp" => Some(ImageFormat::Bmp),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// Format for an output path. A path without extension is PNG.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(ImageFormat::Png),
            Some(ext) => Self::from_extension(ext).ok_or_else(|| {
                BarcanvasError::Config(format!(
                    "{}: unsupported image format {ext:?} (expected png, jpg, bmp, gif or webp)",
                    path.display()
                ))
            }),
        }
    }
}

/// Canvas allocation, background and final rotation for one render.
#[derive(Debug, Clone)]
pub struct Drawing {
    background: Color,
    rotation: f32,
    error: Option<String>,
}

impl Drawing {
    pub fn new() -> Self {
        Self {
            background: Color::WHITE,
            rotation: 0.0,
            error: None,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn get_background(&self) -> Color {
        self.background
    }

    pub fn get_rotation(&self) -> f32 {
        self.rotation
    }

    /// Final image rotation in degrees, clockwise. Any angle is accepted.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    /// Render `message` instead of the barcode.
    pub fn draw_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Render to an RGBA image.
    pub fn render(&self, barcode: Option<&mut dyn Barcode>) -> RgbaImage {
        let image = match (&self.error, barcode) {
            (None, Some(barcode)) => {
                let d = barcode.dimension();
                let width = d.width.max(1) as u32;
                let height = d.height.max(1) as u32;

                if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
                    let message = format!("Canvas {}x{} is too large", width, height);
                    log::warn!("{}", message);
                    self.message_image(&message)
                } else {
                    log::debug!("allocating {}x{} canvas", width, height);
                    let mut surface = ImageSurface::new(width, height, self.background);
                    barcode.draw(&mut surface);
                    surface.into_image()
                }
            }
            (error, _) => {
                let message = error.as_deref().unwrap_or(NO_BARCODE);
                log::warn!("rendering message instead of barcode: {}", message);
                self.message_image(message)
            }
        };

        rotate(image, self.rotation)
    }

    fn message_image(&self, message: &str) -> RgbaImage {
        let font = Font::builtin(BuiltinFace::Spleen8x16);
        let m = font.measure(message, Rotation::None);
        let mut surface = ImageSurface::new(
            m.width.max(1) as u32,
            m.height.max(1) as u32,
            self.background,
        );
        surface.draw_text(message, 0, 0, &font, Rotation::None, Color::BLACK);
        surface.into_image()
    }

    /// Render and encode.
    pub fn finish(&self, format: ImageFormat, barcode: Option<&mut dyn Barcode>) -> Result<Vec<u8>> {
        let image = self.render(barcode);
        match format {
            ImageFormat::Png => encode_png(&image),
            ImageFormat::Jpeg => encode_jpeg(&flatten(&image, self.background)),
            ImageFormat::Bmp => encode_with(&image, image::ImageFormat::Bmp),
            ImageFormat::Gif => encode_with(&image, image::ImageFormat::Gif),
            ImageFormat::Webp => encode_with(&image, image::ImageFormat::WebP),
        }
    }

    /// Render and write a file; the format follows the extension.
    pub fn finish_to_file(&self, barcode: Option<&mut dyn Barcode>, path: impl AsRef<Path>) -> Result<()> {
        let format = ImageFormat::from_path(path.as_ref())?;
        let bytes = self.finish(format, barcode)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e: image::ImageError| BarcanvasError::Draw(e.to_string()))?;

    Ok(png_bytes)
}

/// Encode an RGB image as JPEG bytes at full quality.
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>> {
    let mut jpeg_bytes = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_bytes, 100);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(jpeg_bytes)
}

fn encode_with(image: &RgbaImage, format: image::ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image.clone()).write_to(&mut Cursor::new(&mut bytes), format)?;
    Ok(bytes)
}

/// Composite `image` over an opaque `background`.
pub fn flatten(image: &RgbaImage, background: Color) -> RgbImage {
    let bg = [background.r(), background.g(), background.b()];
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let alpha = a as u32;
        let mix = |c: u8, under: u8| ((c as u32 * alpha + under as u32 * (255 - alpha) + 127) / 255) as u8;
        Rgb([mix(r, bg[0]), mix(g, bg[1]), mix(b, bg[2])])
    })
}

/// Rotate clockwise by `degrees`. Right angles are exact; other angles
/// grow the canvas to the rotated bounding box and leave the corners
/// transparent.
pub fn rotate(image: RgbaImage, degrees: f32) -> RgbaImage {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        return image;
    }
    if normalized == 90.0 {
        return imageops::rotate90(&image);
    }
    if normalized == 180.0 {
        return imageops::rotate180(&image);
    }
    if normalized == 270.0 {
        return imageops::rotate270(&image);
    }

    let radians = (degrees as f64).to_radians();
    let (sin, cos) = radians.sin_cos();
    let (ow, oh) = (image.width() as f64, image.height() as f64);
    let rw = (cos.abs() * ow + sin.abs() * oh) as u32;
    let rh = (cos.abs() * oh + sin.abs() * ow) as u32;

    let (rcx, rcy) = ((rw / 2) as f64, (rh / 2) as f64);
    let (ocx, ocy) = ((image.width() / 2) as f64, (image.height() / 2) as f64);

    let mut rotated = RgbaImage::from_pixel(rw, rh, Rgba([0, 0, 0, 0]));
    for (dx, dy, pixel) in rotated.enumerate_pixels_mut() {
        let vx = dx as f64 + 0.5 - rcx;
        let vy = dy as f64 + 0.5 - rcy;
        let sx = (vx * cos + vy * sin + ocx).floor();
        let sy = (-vx * sin + vy * cos + ocy).floor();
        if sx >= 0.0 && sy >= 0.0 && sx < ow && sy < oh {
            *pixel = *image.get_pixel(sx as u32, sy as u32);
        }
    }

    log::debug!(
        "rotated {}x{} by {} degrees to {}x{}",
        image.width(),
        image.height(),
        degrees,
        rw,
        rh
    );
    rotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::{LabelText, LinearBarcode, MatrixBarcode, Symbology};
    use pretty_assertions::assert_eq;

    fn ean() -> LinearBarcode {
        let mut code = LinearBarcode::new(Symbology::Ean13);
        code.parse("400638133393").unwrap();
        code
    }

    #[test]
    fn test_canvas_matches_dimension() {
        let mut code = ean();
        let image = Drawing::new().render(Some(&mut code));
        assert_eq!((image.width(), image.height()), (95, 46));
        // Guard bar at the left edge, label area below is background
        assert_eq!(Color::from(*image.get_pixel(0, 0)), Color::BLACK);
        assert_eq!(Color::from(*image.get_pixel(1, 0)), Color::WHITE);
    }

    #[test]
    fn test_background_color() {
        let mut code = ean();
        code.set_label_text(LabelText::None);
        let yellow = Color::from_name("yellow");
        let image = Drawing::new().background(yellow).render(Some(&mut code));
        assert_eq!(Color::from(*image.get_pixel(1, 0)), yellow);
    }

    #[test]
    fn test_empty_barcode_is_at_least_one_pixel() {
        let mut qr = MatrixBarcode::new();
        qr.set_quiet_zone(0).unwrap();
        let image = Drawing::new().render(Some(&mut qr));
        assert_eq!((image.width(), image.height()), (1, 1));
    }

    #[test]
    fn test_no_barcode_and_error_messages() {
        let image = Drawing::new().render(None);
        assert_eq!((image.width(), image.height()), (8 * NO_BARCODE.len() as u32, 16));

        let mut drawing = Drawing::new();
        drawing.draw_error("bad input");
        let mut code = ean();
        let image = drawing.render(Some(&mut code));
        assert_eq!((image.width(), image.height()), (72, 16));
    }

    #[test]
    fn test_right_angle_rotation_swaps() {
        let mut code = ean();
        let image = Drawing::new().rotation(90.0).render(Some(&mut code));
        assert_eq!((image.width(), image.height()), (46, 95));
        let image = Drawing::new().rotation(-180.0).render(Some(&mut code));
        assert_eq!((image.width(), image.height()), (95, 46));
    }

    #[test]
    fn test_arbitrary_rotation_grows_canvas() {
        let image = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let rotated = rotate(image, 45.0);
        // 10 * cos45 + 10 * sin45 = 14.14
        assert_eq!((rotated.width(), rotated.height()), (14, 14));
        assert_eq!(rotated.get_pixel(0, 0).0[3], 0);
        assert_eq!(rotated.get_pixel(7, 7).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_oversized_canvas_renders_message() {
        let mut code = ean();
        code.canvas_mut().set_scale(1_000_000).unwrap();
        let image = Drawing::new().render(Some(&mut code));
        assert_eq!(image.height(), 16);
        assert!((image.width() as u64) < MAX_CANVAS_PIXELS);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path("out.PNG").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("out.jpg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("out.jpeg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("dir/out.webp").unwrap(), ImageFormat::Webp);
        assert_eq!(ImageFormat::from_path("out").unwrap(), ImageFormat::Png);
        assert!(matches!(ImageFormat::from_path("out.tiff"), Err(BarcanvasError::Config(_))));
    }

    #[test]
    fn test_format_signatures() {
        let mut code = ean();
        let drawing = Drawing::new();

        let png = drawing.finish(ImageFormat::Png, Some(&mut code)).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);

        let jpeg = drawing.finish(ImageFormat::Jpeg, Some(&mut code)).unwrap();
        assert_eq!(&jpeg[..3], &[0xFF, 0xD8, 0xFF]);

        let bmp = drawing.finish(ImageFormat::Bmp, Some(&mut code)).unwrap();
        assert_eq!(&bmp[..2], b"BM");

        let gif = drawing.finish(ImageFormat::Gif, Some(&mut code)).unwrap();
        assert_eq!(&gif[..3], b"GIF");

        let webp = drawing.finish(ImageFormat::Webp, Some(&mut code)).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_finish_to_file_follows_extension() {
        let path = std::env::temp_dir().join(format!("barcanvas-{}.jpg", std::process::id()));
        let mut code = ean();
        Drawing::new().finish_to_file(Some(&mut code), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let err = Drawing::new().finish_to_file(Some(&mut code), path.with_extension("svg"));
        assert!(matches!(err, Err(BarcanvasError::Config(_))));
    }

    #[test]
    fn test_jpeg_flattens_transparent_corners() {
        let rotated = rotate(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])), 45.0);
        let flat = flatten(&rotated, Color::WHITE);
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(7, 7).0, [0, 0, 0]);
    }

    #[test]
    fn test_png_signature() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([255, 0, 0, 255]));
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
