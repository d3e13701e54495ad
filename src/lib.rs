#![cfg_attr(not(test), no_std)]
//! Blocking, framebuffer-less driver for the GC9A01 240x240 TFT controller.
//!
//! The driver streams pixel data straight into the controller's memory: every
//! drawing call programs a write window and sends the pixels for it, blocking
//! until the transport reports completion. Nothing is buffered between calls.
//!
//! ## Usage
//!
//! 1. Wrap an [`embedded_hal::spi::SpiDevice`] and the data/command pin in an
//!    [`interface::SpiInterface`] (or implement [`interface::Interface`] for
//!    another transport).
//! 2. Configure the display with a [`Builder`] and run [`Builder::init`].
//! 3. Draw with the primitives on [`Display`], or through `embedded-graphics`
//!    since [`Display`] is a `DrawTarget<Color = Rgb888>`.
//!
//! ```
//! use gc9a01::{Builder, Color};
//!
//! # let di = gc9a01::_mock::MockDisplayInterface;
//! # let rst = gc9a01::_mock::MockOutputPin;
//! # let mut delay = gc9a01::_mock::MockDelay;
//! let mut display = Builder::new(di).reset_pin(rst).init(&mut delay).unwrap();
//!
//! display.fill_rect(20, 20, 100, 50, Color::RED).unwrap();
//! display.draw_rect(10, 10, 220, 220, Color::WHITE).unwrap();
//! display.set_rotation(1).unwrap();
//! ```
//!
//! ## Feature flags
//!
//! - `batch` (default): pixel words are collected into fixed-size chunks
//!   before being sent, instead of one transfer per pixel.
//! - `defmt`: derives `defmt::Format` for the public types.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

pub mod interface;
use interface::{Interface, InterfaceExt};

pub mod options;
use options::{AccessControl, ModelOptions, Orientation};

mod builder;
pub use builder::*;

pub mod dcs;

mod color;
pub use color::Color;

mod error;
pub use error::Error;

mod init;
pub use init::{InitState, INIT_SEQUENCE};

mod window;
pub use window::Window;

mod graphics;
mod primitives;

#[doc(hidden)]
pub mod _mock;

#[cfg(test)]
mod test_support;

/// Panel width in pixels.
pub const WIDTH: u16 = 240;
/// Panel height in pixels.
pub const HEIGHT: u16 = 240;

///
/// Display driver for the GC9A01.
///
/// Owns the interface and the reset pin; the controller's memory is the only
/// frame store. All operations take `&mut self`, so sharing a display between
/// threads requires an external mutex.
///
pub struct Display<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    // DCS provider
    di: DI,
    // Reset pin
    rst: Option<RST>,
    // Options, includes current orientation
    options: ModelOptions,
    // Last access control value written
    madctl: AccessControl,
    init_sequence: &'static [dcs::InitCommand],
    state: InitState,
    sleeping: bool,
}

impl<DI, RST> Display<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    ///
    /// Returns currently set [options::Orientation]
    ///
    pub fn orientation(&self) -> Orientation {
        self.options.orientation
    }

    ///
    /// Sets display [options::Orientation] with mirror image parameter.
    ///
    /// The configured color order is applied along with it.
    ///
    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        let madctl = AccessControl::new(orientation, self.options.color_order);
        log::debug!("orientation {:?}, madctl={:#04x}", orientation, madctl.bits());
        self.di
            .write_raw(dcs::SET_ADDRESS_MODE, &[madctl.bits()])
            .map_err(Error::Interface)?;
        self.options.orientation = orientation;
        self.madctl = madctl;
        Ok(())
    }

    ///
    /// Sets one of the eight orientations by index.
    ///
    /// `rotation` wraps modulo 8, see [`Orientation::from_index`], so this
    /// never fails on its argument.
    ///
    pub fn set_rotation(&mut self, rotation: u8) -> Result<(), Error<DI::Error, RST::Error>> {
        self.set_orientation(Orientation::from_index(rotation))
    }

    /// Returns the last access control register value written.
    pub fn access_control(&self) -> AccessControl {
        self.madctl
    }

    /// Returns the configured pixel format.
    pub fn color_mode(&self) -> options::ColorMode {
        self.options.color_mode
    }

    /// Turns the panel output on.
    pub fn display_on(&mut self) -> Result<(), Error<DI::Error, RST::Error>> {
        self.di
            .write_raw(dcs::SET_DISPLAY_ON, &[])
            .map_err(Error::Interface)
    }

    /// Turns the panel output off. Memory content is kept.
    pub fn display_off(&mut self) -> Result<(), Error<DI::Error, RST::Error>> {
        self.di
            .write_raw(dcs::SET_DISPLAY_OFF, &[])
            .map_err(Error::Interface)
    }

    /// Enables or disables color inversion.
    pub fn invert(&mut self, invert: bool) -> Result<(), Error<DI::Error, RST::Error>> {
        let command = if invert {
            dcs::ENTER_INVERT_MODE
        } else {
            dcs::EXIT_INVERT_MODE
        };
        self.di.write_raw(command, &[]).map_err(Error::Interface)?;
        self.options.invert_colors = if invert {
            options::ColorInversion::Inverted
        } else {
            options::ColorInversion::Normal
        };
        Ok(())
    }

    /// Writes the display brightness register.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Error<DI::Error, RST::Error>> {
        self.di
            .write_raw(dcs::SET_DISPLAY_BRIGHTNESS, &[level])
            .map_err(Error::Interface)
    }

    ///
    /// Returns `true` if display is currently set to sleep.
    ///
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    ///
    /// Puts the display to sleep, reducing power consumption.
    /// Need to call [Self::wake] before issuing other commands
    ///
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error, RST::Error>> {
        self.di
            .write_raw(dcs::ENTER_SLEEP_MODE, &[])
            .map_err(Error::Interface)?;
        delay.delay_ms(120);
        self.sleeping = true;
        Ok(())
    }

    ///
    /// Wakes the display after it's been set to sleep via [Self::sleep]
    ///
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error, RST::Error>> {
        self.di
            .write_raw(dcs::EXIT_SLEEP_MODE, &[])
            .map_err(Error::Interface)?;
        delay.delay_ms(120);
        self.sleeping = false;
        Ok(())
    }

    ///
    /// Release resources allocated to this driver back.
    /// This returns the display interface and the reset pin, deconstructing the driver.
    ///
    pub fn release(self) -> (DI, Option<RST>) {
        (self.di, self.rst)
    }

    /// Returns the interface for sending raw commands.
    ///
    /// Useful for controller registers this driver has no method for, such
    /// as the tearing effect line.
    ///
    /// ```
    /// use gc9a01::{dcs, interface::InterfaceExt, Builder};
    ///
    /// # let di = gc9a01::_mock::MockDisplayInterface;
    /// # let mut delay = gc9a01::_mock::MockDelay;
    /// let mut display = Builder::new(di).init(&mut delay).unwrap();
    ///
    /// // tearing effect output, V-blank only
    /// unsafe { display.dcs() }.write_raw(dcs::SET_TEAR_ON, &[0x00]).unwrap();
    /// ```
    ///
    /// # Safety
    ///
    /// Sending raw commands to the controller can lead to undefined behaviour,
    /// because the rest of the code isn't aware of any state changes that were caused by sending raw commands.
    /// The user must ensure that the state of the controller isn't altered in a way that interferes with the normal
    /// operation of this crate.
    pub unsafe fn dcs(&mut self) -> &mut DI {
        &mut self.di
    }
}
