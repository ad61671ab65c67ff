//! # barcanvas CLI
//!
//! Command-line interface for rendering barcodes to PNG, JPEG, BMP, GIF or
//! WebP. The output extension picks the format.
//!
//! ## Usage
//!
//! ```bash
//! # Code 128 with its text underneath
//! barcanvas render code128 "PKG-0042" -o out.png
//!
//! # EAN-13, doubled in size, check digit shown in the label
//! barcanvas render ean13 400638133393 --scale 2 --checksum -o ean.png
//!
//! # QR code rotated a quarter turn, as JPEG
//! barcanvas render qr "https://example.com" --scale 4 --rotate 90 -o qr.jpg
//!
//! # Everything from a JSON file
//! barcanvas render --config label.json -o out.png
//!
//! # Print the canvas size without drawing
//! barcanvas measure code39 ABC --scale 3
//! ```
//!
//! Set `RUST_LOG=debug` to see the computed layouts.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use barcanvas::{
    BarcanvasError, Barcode,
    config::{BarcodeType, RenderConfig},
    drawing::ImageFormat,
};

/// barcanvas - Barcode rendering with automatic label layout
#[derive(Parser, Debug)]
#[command(name = "barcanvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a barcode to an image file
    Render {
        #[command(flatten)]
        barcode: BarcodeArgs,

        /// Final image rotation in degrees (clockwise, any angle)
        #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
        rotate: Option<f32>,

        /// Output file (.png, .jpg, .bmp, .gif or .webp)
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print the canvas size and push vector
    Measure {
        #[command(flatten)]
        barcode: BarcodeArgs,
    },
}

#[derive(Args, Debug)]
struct BarcodeArgs {
    /// Symbology: code39, code128, ean13, qr
    #[arg(required_unless_present = "config")]
    symbology: Option<BarcodeType>,

    /// Text to encode
    #[arg(required_unless_present = "config")]
    text: Option<String>,

    /// Load a JSON render description instead
    #[arg(long, value_name = "FILE", conflicts_with_all = ["symbology", "text"])]
    config: Option<PathBuf>,

    /// Pixels per module
    #[arg(long, default_value = "1")]
    scale: i32,

    /// Horizontal offset in modules
    #[arg(long, default_value = "0")]
    offset_x: i32,

    /// Vertical offset in modules
    #[arg(long, default_value = "0")]
    offset_y: i32,

    /// Bar height in modules (linear barcodes)
    #[arg(long)]
    thickness: Option<i32>,

    /// Show the checksum in the label (and encode it for Code 39)
    #[arg(long)]
    checksum: bool,

    /// Hide the default label
    #[arg(long)]
    no_label: bool,
}

impl BarcodeArgs {
    fn into_config(self) -> Result<RenderConfig, BarcanvasError> {
        if let Some(path) = self.config {
            return RenderConfig::from_file(path);
        }

        let (Some(symbology), Some(text)) = (self.symbology, self.text) else {
            return Err(BarcanvasError::Config(
                "a symbology and text are required without --config".to_string(),
            ));
        };

        Ok(RenderConfig {
            symbology,
            text,
            scale: self.scale,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            thickness: self.thickness,
            checksum: self.checksum,
            display_checksum: self.checksum,
            label: if self.no_label { None } else { Some("auto".to_string()) },
            ..RenderConfig::default()
        })
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BarcanvasError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            barcode,
            rotate,
            output,
        } => {
            let format = ImageFormat::from_path(&output)?;
            let mut config = barcode.into_config()?;
            if let Some(degrees) = rotate {
                config.rotation = degrees;
            }

            let mut barcode = config.build()?;
            let d = barcode.dimension();
            config
                .drawing()
                .finish_to_file(Some(&mut barcode), &output)?;
            println!(
                "Saved {} barcode ({}) as {:?} to {}",
                config.text,
                d,
                format,
                output.display()
            );
        }

        Commands::Measure { barcode } => {
            let config = barcode.into_config()?;
            let mut barcode = config.build()?;
            let d = barcode.dimension();
            let push = barcode.canvas().push();
            println!("{} (push {}, {})", d, push.left, push.top);
        }
    }

    Ok(())
}
