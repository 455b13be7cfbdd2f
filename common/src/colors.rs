//! Packed watchface colors.
//!
//! # Packed Format
//!
//! Colors are stored and exchanged as a single byte, `0bAARRGGBB`, with two
//! bits per channel. This is the byte written to the settings record, so the
//! encoding must never change.
//!
//! | Bits | Channel |
//! |------|---------|
//! | 7..6 | Alpha   |
//! | 5..4 | Red     |
//! | 3..2 | Green   |
//! | 1..0 | Blue    |
//!
//! Drawing happens in `Rgb565` (ST7789 native format) or `Rgb888`; each 2-bit
//! channel is expanded to 8 bits by multiplying with `0x55` before conversion.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};

/// A 2-bit-per-channel color as stored in the settings record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedColor(u8);

impl PackedColor {
    /// Opaque alpha bits (`0b11`) in position.
    const OPAQUE: u8 = 0b1100_0000;

    /// Wrap a raw packed byte.
    pub const fn from_raw(raw: u8) -> Self { Self(raw) }

    /// The raw packed byte.
    pub const fn raw(self) -> u8 { self.0 }

    /// Convert a `0xRRGGBB` value, keeping the two most significant bits of
    /// each channel. Bits above the 24-bit color are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 22) & 0b11) as u8;
        let g = ((hex >> 14) & 0b11) as u8;
        let b = ((hex >> 6) & 0b11) as u8;
        Self(Self::OPAQUE | (r << 4) | (g << 2) | b)
    }

    /// Red channel, 0..=3.
    pub const fn red(self) -> u8 { (self.0 >> 4) & 0b11 }

    /// Green channel, 0..=3.
    pub const fn green(self) -> u8 { (self.0 >> 2) & 0b11 }

    /// Blue channel, 0..=3.
    pub const fn blue(self) -> u8 { self.0 & 0b11 }

    /// Expand back to `0xRRGGBB`.
    pub const fn to_hex(self) -> u32 {
        ((self.red() as u32 * 0x55) << 16) | ((self.green() as u32 * 0x55) << 8) | (self.blue() as u32 * 0x55)
    }
}

impl From<PackedColor> for Rgb888 {
    fn from(color: PackedColor) -> Self {
        Self::new(color.red() * 0x55, color.green() * 0x55, color.blue() * 0x55)
    }
}

impl From<PackedColor> for Rgb565 {
    fn from(color: PackedColor) -> Self { Self::from(Rgb888::from(color)) }
}

// =============================================================================
// Named Colors
// =============================================================================

/// Black (0x000000). Default background.
pub const BLACK: PackedColor = PackedColor::from_hex(0x00_00_00);

/// White (0xFFFFFF). Default color of the outer digits.
pub const WHITE: PackedColor = PackedColor::from_hex(0xFF_FF_FF);

/// Light gray (0xAAAAAA). Default color of the inner digits.
pub const LIGHT_GRAY: PackedColor = PackedColor::from_hex(0xAA_AA_AA);

/// Dark gray (0x555555).
pub const DARK_GRAY: PackedColor = PackedColor::from_hex(0x55_55_55);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;

    #[test]
    fn test_named_color_bytes() {
        assert_eq!(BLACK.raw(), 0b1100_0000);
        assert_eq!(WHITE.raw(), 0b1111_1111);
        assert_eq!(LIGHT_GRAY.raw(), 0b1110_1010);
        assert_eq!(DARK_GRAY.raw(), 0b1101_0101);
    }

    #[test]
    fn test_from_hex_keeps_top_bits() {
        // 0xCC = 0b1100_1100, top bits 0b11
        assert_eq!(PackedColor::from_hex(0xCC_CC_CC), WHITE);
        // 0x7F = 0b0111_1111, top bits 0b01
        assert_eq!(PackedColor::from_hex(0x7F_00_00).red(), 1);
        assert_eq!(PackedColor::from_hex(0xFF_00_00).raw(), 0b1111_0000);
        assert_eq!(PackedColor::from_hex(0x00_00_FF).raw(), 0b1100_0011);
    }

    #[test]
    fn test_to_hex_expands_channels() {
        assert_eq!(WHITE.to_hex(), 0xFF_FF_FF);
        assert_eq!(LIGHT_GRAY.to_hex(), 0xAA_AA_AA);
        assert_eq!(BLACK.to_hex(), 0);
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(Rgb888::from(WHITE), Rgb888::WHITE);
        assert_eq!(Rgb565::from(BLACK), Rgb565::BLACK);
        assert_eq!(Rgb565::from(WHITE), Rgb565::WHITE);
        assert_eq!(Rgb888::from(DARK_GRAY), Rgb888::new(0x55, 0x55, 0x55));
    }
}
