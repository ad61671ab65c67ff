//! # Colors
//!
//! RGB color value used for bars, spaces, label text and canvas background.
//!
//! ```
//! use barcanvas::Color;
//!
//! let red = Color::parse("#ff0000").unwrap();
//! assert_eq!(red, Color::from_name("red"));
//! assert_eq!(red, Color::from_packed(0xff0000));
//! ```

use image::{Rgb, Rgba};
use log::warn;
use serde::Deserialize;

use crate::error::{BarcanvasError, Result};

/// Fixed palette of named colors (lowercase name, packed 0xRRGGBB).
const PALETTE: &[(&str, u32)] = &[
    ("white", 0xffffff),
    ("black", 0x000000),
    ("maroon", 0x800000),
    ("red", 0xff0000),
    ("orange", 0xffa500),
    ("yellow", 0xffff00),
    ("olive", 0x808000),
    ("purple", 0x800080),
    ("fuchsia", 0xff00ff),
    ("lime", 0x00ff00),
    ("green", 0x008000),
    ("navy", 0x000080),
    ("blue", 0x0000ff),
    ("aqua", 0x00ffff),
    ("teal", 0x008080),
    ("silver", 0xc0c0c0),
    ("gray", 0x808080),
];

/// Look up a palette name (case-insensitive). The empty name is white.
pub fn palette_lookup(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    if name.is_empty() {
        return Some(0xffffff);
    }
    PALETTE
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|&(_, packed)| packed)
}

/// An RGB color with an informational transparency flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    transparent: bool,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            transparent: false,
        }
    }

    /// Build from a packed 24-bit `0xRRGGBB` value. Higher bits are ignored.
    pub const fn from_packed(packed: u32) -> Self {
        Self::rgb(
            ((packed & 0xff0000) >> 16) as u8,
            ((packed & 0x00ff00) >> 8) as u8,
            (packed & 0x0000ff) as u8,
        )
    }

    /// Parse a `#rrggbb` string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| BarcanvasError::argument("color", format!("not a #rrggbb color: {hex:?}")))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                BarcanvasError::argument("color", format!("invalid hex digits in {hex:?}"))
            })
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Resolve a palette name, falling back to white.
    pub fn from_name(name: &str) -> Self {
        Self::from_name_or(name, "white")
    }

    /// Resolve a palette name, falling back to `default` (itself a palette
    /// name; an unknown default resolves to white).
    pub fn from_name_or(name: &str, default: &str) -> Self {
        match palette_lookup(name) {
            Some(packed) => Self::from_packed(packed),
            None => {
                warn!("Unknown color name {name:?}, using {default:?}");
                Self::from_packed(palette_lookup(default).unwrap_or(0xffffff))
            }
        }
    }

    /// Parse either a `#rrggbb` string or a palette name.
    ///
    /// The empty string is black, matching an unset color.
    pub fn parse(color: &str) -> Result<Self> {
        if color.is_empty() {
            return Ok(Self::BLACK);
        }
        if color.len() == 7 && color.starts_with('#') {
            Self::from_hex(color)
        } else {
            Ok(Self::from_name(color))
        }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn set_transparent(&mut self, transparent: bool) {
        self.transparent = transparent;
    }

    /// Packed `0xRRGGBB` value.
    pub fn packed(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Native pixel value. Transparent colors get zero alpha.
    pub fn to_rgba(&self) -> Rgba<u8> {
        let alpha = if self.transparent { 0 } else { 255 };
        Rgba([self.r, self.g, self.b, alpha])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgb<u8>> for Color {
    fn from(px: Rgb<u8>) -> Self {
        Self::rgb(px[0], px[1], px[2])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        Self::rgb(px[0], px[1], px[2])
    }
}

impl TryFrom<String> for Color {
    type Error = BarcanvasError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_name_agree() {
        let hex = Color::parse("#ff0000").unwrap();
        let name = Color::parse("red").unwrap();
        assert_eq!(hex, name);
        assert_eq!((hex.r(), hex.g(), hex.b()), (255, 0, 0));
    }

    #[test]
    fn test_name_is_case_insensitive() {
        assert_eq!(Color::from_name("NaVy"), Color::from_packed(0x000080));
    }

    #[test]
    fn test_unknown_name_falls_back_to_white() {
        assert_eq!(Color::from_name("chartreuse"), Color::WHITE);
    }

    #[test]
    fn test_unknown_name_uses_default() {
        assert_eq!(Color::from_name_or("chartreuse", "teal"), Color::from_packed(0x008080));
        assert_eq!(Color::from_name_or("chartreuse", "nope"), Color::WHITE);
    }

    #[test]
    fn test_empty_string_is_black() {
        assert_eq!(Color::parse("").unwrap(), Color::BLACK);
        assert_eq!(Color::from_name(""), Color::WHITE);
    }

    #[test]
    fn test_bad_hex_digits_rejected() {
        assert!(Color::parse("#gg0000").is_err());
        assert!(Color::from_hex("ff0000").is_err());
    }

    #[test]
    fn test_packed_ignores_high_bits() {
        let c = Color::from_packed(0x7f12_3456);
        assert_eq!(c.packed(), 0x123456);
    }

    #[test]
    fn test_transparent_alpha() {
        let mut c = Color::from_name("blue");
        assert_eq!(c.to_rgba(), Rgba([0, 0, 255, 255]));
        c.set_transparent(true);
        assert!(c.is_transparent());
        assert_eq!(c.to_rgba(), Rgba([0, 0, 255, 0]));
    }

    #[test]
    fn test_native_conversion() {
        let c: Color = Rgb([1, 2, 3]).into();
        assert_eq!(c, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_deserialize_from_string() {
        let c: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(c, Color::from_name("lime"));
        assert!(serde_json::from_str::<Color>("\"#zz0000\"").is_err());
    }
}
