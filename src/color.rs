//! 8-bit RGB colors and their packed controller encodings.

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};

use crate::options::ColorMode;

/// An 8 bit per channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

/// Rescales an 8-bit channel to `max`, rounding half up.
const fn scale(channel: u8, max: u32) -> u32 {
    (channel as u32 * max + 127) / 255
}

impl Color {
    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Red
    pub const RED: Self = Self::new(255, 0, 0);
    /// Green
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Blue
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs the color as 4/4/4 in the low 12 bits.
    pub const fn to_12bit(self) -> u16 {
        ((scale(self.r, 15) << 8) | (scale(self.g, 15) << 4) | scale(self.b, 15)) as u16
    }

    /// Packs the color as 5/6/5.
    pub const fn to_16bit(self) -> u16 {
        ((scale(self.r, 31) << 11) | (scale(self.g, 63) << 5) | scale(self.b, 31)) as u16
    }

    /// Packs the color as 6/6/6 in the low 18 bits.
    pub const fn to_18bit(self) -> u32 {
        (scale(self.r, 63) << 12) | (scale(self.g, 63) << 6) | scale(self.b, 63)
    }

    /// Packs the color for the given controller mode.
    pub const fn pack(self, mode: ColorMode) -> u32 {
        match mode {
            ColorMode::Rgb444 => self.to_12bit() as u32,
            ColorMode::Rgb565 => self.to_16bit() as u32,
            ColorMode::Rgb666 => self.to_18bit(),
        }
    }
}

impl From<Rgb888> for Color {
    fn from(color: Rgb888) -> Self {
        Self::new(color.r(), color.g(), color.b())
    }
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.r, color.g, color.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
