//! [ModelOptions] and other helper types.

/// Native pixel format of the controller's memory interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorMode {
    /// 12 bits per pixel (4/4/4), two pixels per three bytes.
    Rgb444,
    /// 16 bits per pixel (5/6/5), two bytes per pixel.
    #[default]
    Rgb565,
    /// 18 bits per pixel (6/6/6), three bytes per pixel.
    Rgb666,
}

impl ColorMode {
    /// Value written to the pixel format register.
    pub const fn colmod(self) -> u8 {
        match self {
            Self::Rgb444 => 0x03,
            Self::Rgb565 => 0x05,
            Self::Rgb666 => 0x06,
        }
    }

    /// Bits used by one packed pixel word.
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Rgb444 => 12,
            Self::Rgb565 => 16,
            Self::Rgb666 => 18,
        }
    }
}

/// Display color channel order.
///
/// GC9A01 panels are wired BGR, so that is the default. The flag is folded
/// into every access control write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    /// RGB subpixel order
    Rgb,
    /// BGR subpixel order
    #[default]
    Bgr,
}

/// Color inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorInversion {
    /// Normal colors.
    Normal,
    /// Inverted colors. IPS panels built around the GC9A01 need this.
    #[default]
    Inverted,
}

/// Display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90° clockwise rotation.
    Deg90,
    /// 180° clockwise rotation.
    Deg180,
    /// 270° clockwise rotation.
    Deg270,
}

/// Display orientation: a rotation with optional mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Rotation.
    pub rotation: Rotation,
    /// Mirrored.
    pub mirrored: bool,
}

impl Orientation {
    /// Creates a new non-mirrored orientation with the given rotation.
    pub const fn new(rotation: Rotation) -> Self {
        Self {
            rotation,
            mirrored: false,
        }
    }

    /// Returns a mirrored copy of this orientation.
    pub const fn flip(self) -> Self {
        Self {
            rotation: self.rotation,
            mirrored: !self.mirrored,
        }
    }

    /// Maps a numeric rotation onto one of the eight orientations.
    ///
    /// Values wrap modulo 8: `0..=3` are the plain rotations 0°, 90°, 180° and
    /// 270°, `4..=7` the same rotations mirrored.
    pub const fn from_index(index: u8) -> Self {
        let rotation = match index % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        };
        Self {
            rotation,
            mirrored: index % 8 >= 4,
        }
    }
}

/// Memory access control (MADCTL) register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessControl(u8);

impl AccessControl {
    /// Row address order (MY).
    pub const ROW_MIRROR: u8 = 0x80;
    /// Column address order (MX).
    pub const COLUMN_MIRROR: u8 = 0x40;
    /// Row/column exchange (MV).
    pub const AXIS_SWAP: u8 = 0x20;
    /// BGR subpixel order.
    pub const BGR: u8 = 0x08;

    /// Builds the register value for an orientation and color order.
    pub const fn new(orientation: Orientation, color_order: ColorOrder) -> Self {
        let mut bits = match orientation.rotation {
            Rotation::Deg0 => Self::COLUMN_MIRROR,
            Rotation::Deg90 => Self::AXIS_SWAP,
            Rotation::Deg180 => Self::ROW_MIRROR,
            Rotation::Deg270 => Self::ROW_MIRROR | Self::COLUMN_MIRROR | Self::AXIS_SWAP,
        };
        if orientation.mirrored {
            bits ^= Self::COLUMN_MIRROR;
        }
        if let ColorOrder::Bgr = color_order {
            bits |= Self::BGR;
        }
        Self(bits)
    }

    /// Raw register byte.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<&ModelOptions> for AccessControl {
    fn from(options: &ModelOptions) -> Self {
        Self::new(options.orientation, options.color_order)
    }
}

/// Fixed delays used around reset and initialization, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Hold time of each hardware reset phase.
    pub reset_ms: u32,
    /// Settle time after the software reset command.
    pub soft_reset_ms: u32,
    /// Pause after every initialization command.
    pub command_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reset_ms: 200,
            soft_reset_ms: 100,
            command_ms: 10,
        }
    }
}

/// [ModelOptions] are passed to the initialization sequence and kept by the
/// display for runtime updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelOptions {
    /// Pixel format.
    pub color_mode: ColorMode,
    /// Subpixel order.
    pub color_order: ColorOrder,
    /// Initial display orientation.
    pub orientation: Orientation,
    /// Whether to invert colors for this display/model.
    pub invert_colors: ColorInversion,
    /// Reset and init delays.
    pub timing: Timing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_formats() {
        for (mode, colmod, bits) in [
            (ColorMode::Rgb444, 0x03, 12),
            (ColorMode::Rgb565, 0x05, 16),
            (ColorMode::Rgb666, 0x06, 18),
        ] {
            assert_eq!(mode.colmod(), colmod);
            assert_eq!(mode.bits_per_pixel(), bits);
        }
        assert_eq!(ColorMode::default(), ColorMode::Rgb565);
    }

    #[test]
    fn index_wraps_modulo_eight() {
        assert_eq!(Orientation::from_index(9), Orientation::from_index(1));
        assert_eq!(Orientation::from_index(255), Orientation::from_index(7));
        assert_eq!(
            Orientation::from_index(6),
            Orientation::new(Rotation::Deg180).flip()
        );
    }

    #[test]
    fn eight_distinct_access_modes_share_bgr() {
        let mut seen = [0u8; 8];
        for (i, slot) in seen.iter_mut().enumerate() {
            let bits = AccessControl::new(Orientation::from_index(i as u8), ColorOrder::Bgr).bits();
            assert_eq!(bits & AccessControl::BGR, AccessControl::BGR);
            *slot = bits;
        }
        for i in 0..seen.len() {
            for j in i + 1..seen.len() {
                assert_ne!(seen[i], seen[j]);
            }
        }
    }

    #[test]
    fn default_orientation_bits() {
        let options = ModelOptions::default();
        assert_eq!(AccessControl::from(&options).bits(), 0x48);
        assert_eq!(
            AccessControl::new(Orientation::new(Rotation::Deg90), ColorOrder::Rgb).bits(),
            0x20
        );
    }
}
