//! # barcanvas - Barcode Canvas Layout
//!
//! barcanvas draws barcodes onto pixel images and sizes the image
//! automatically so text labels on any side of the barcode fit without
//! clipping. It provides:
//!
//! - **Layout engine**: canvas size and push vector from body size, scale,
//!   offsets and labels
//! - **Labels**: positioned, aligned, rotated text with its own font
//! - **Drawing primitives**: module-to-pixel mapping for linear and matrix
//!   barcodes
//! - **Symbologies**: Code 39, Code 128, EAN-13 and QR Code
//!
//! ## Quick Start
//!
//! ```
//! use barcanvas::{
//!     barcode::{Barcode, LinearBarcode, Symbology},
//!     drawing::Drawing,
//!     font::{BuiltinFace, Font},
//!     label::{Label, Position},
//! };
//!
//! let mut code = LinearBarcode::new(Symbology::Code128);
//! code.canvas_mut().set_scale(2)?;
//! code.canvas_mut().add_label(
//!     Label::new("SHIPPING", Font::builtin(BuiltinFace::Spleen8x16)).position(Position::Top),
//! );
//! code.parse("PKG-0042")?;
//!
//! let image = Drawing::new().render(Some(&mut code));
//! assert_eq!(image.height(), 20 + 60 + 16);
//!
//! # Ok::<(), barcanvas::error::BarcanvasError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Canvas size and push vector computation |
//! | [`label`] | Positioned text blocks |
//! | [`barcode`] | Shared barcode state, drawing primitives, symbologies |
//! | [`drawing`] | Canvas allocation, rotation, PNG/JPEG/BMP/GIF/WebP output |
//! | [`font`] | Built-in bitmap faces and TrueType fonts |
//! | [`surface`] | Pixel surface abstraction |
//! | [`color`] | Colors and the named palette |
//! | [`config`] | JSON render descriptions |
//! | [`error`] | Error types |

pub mod barcode;
pub mod color;
pub mod config;
pub mod drawing;
pub mod error;
pub mod font;
pub mod label;
pub mod layout;
pub mod surface;

// Re-exports for convenience
pub use barcode::{Barcode, BarcodeCanvas};
pub use color::Color;
pub use error::BarcanvasError;
pub use label::Label;
pub use layout::{Dimension, Layout, Push};
