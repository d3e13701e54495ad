//! Controller command set.
//!
//! Opcodes of the standard MIPI DCS subset understood by the GC9A01 and the
//! descriptor type used to store opaque register writes.

/// Software reset
pub const SOFT_RESET: u8 = 0x01;
/// Enter sleep mode
pub const ENTER_SLEEP_MODE: u8 = 0x10;
/// Exit sleep mode
pub const EXIT_SLEEP_MODE: u8 = 0x11;
/// Display inversion off
pub const EXIT_INVERT_MODE: u8 = 0x20;
/// Display inversion on
pub const ENTER_INVERT_MODE: u8 = 0x21;
/// Display off
pub const SET_DISPLAY_OFF: u8 = 0x28;
/// Display on
pub const SET_DISPLAY_ON: u8 = 0x29;
/// Column address set
pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
/// Row (page) address set
pub const SET_PAGE_ADDRESS: u8 = 0x2B;
/// Memory write
pub const WRITE_MEMORY_START: u8 = 0x2C;
/// Tearing effect line on
pub const SET_TEAR_ON: u8 = 0x35;
/// Memory access control (MADCTL)
pub const SET_ADDRESS_MODE: u8 = 0x36;
/// Pixel format set (COLMOD)
pub const SET_PIXEL_FORMAT: u8 = 0x3A;
/// Write display brightness
pub const SET_DISPLAY_BRIGHTNESS: u8 = 0x51;

// Extended command set
pub(crate) const DISPLAY_FUNCTION_CTRL: u8 = 0xB6;
pub(crate) const VREG1A_VOLTAGE_CTRL: u8 = 0xC3;
pub(crate) const VREG1B_VOLTAGE_CTRL: u8 = 0xC4;
pub(crate) const VREG2A_VOLTAGE_CTRL: u8 = 0xC9;
pub(crate) const FRAME_RATE: u8 = 0xE8;
pub(crate) const INNER_REG_EN_1: u8 = 0xFE;
pub(crate) const INNER_REG_EN_2: u8 = 0xEF;
pub(crate) const SET_GAMMA_1: u8 = 0xF0;
pub(crate) const SET_GAMMA_2: u8 = 0xF1;
pub(crate) const SET_GAMMA_3: u8 = 0xF2;
pub(crate) const SET_GAMMA_4: u8 = 0xF3;

/// A command byte with an opaque payload of at most
/// [`InitCommand::CAPACITY`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitCommand {
    command: u8,
    payload: [u8; InitCommand::CAPACITY],
    len: u8,
}

impl InitCommand {
    /// Maximum payload length.
    pub const CAPACITY: usize = 16;

    /// Creates a descriptor.
    ///
    /// # Panics
    ///
    /// Panics if `payload` is longer than [`Self::CAPACITY`]. In a `const` or
    /// `static` initializer this is a compile error.
    pub const fn new(command: u8, payload: &[u8]) -> Self {
        assert!(
            payload.len() <= Self::CAPACITY,
            "init command payload exceeds 16 bytes"
        );
        let mut bytes = [0u8; Self::CAPACITY];
        let mut i = 0;
        while i < payload.len() {
            bytes[i] = payload[i];
            i += 1;
        }
        Self {
            command,
            payload: bytes,
            len: payload.len() as u8,
        }
    }

    /// The command byte.
    pub const fn command(&self) -> u8 {
        self.command
    }

    /// The payload bytes, possibly empty.
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.len as usize]
    }
}
