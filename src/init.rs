//! Reset handshake and initialization sequence.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    dcs::{self, InitCommand},
    interface::{Interface, InterfaceExt},
    options::AccessControl,
    options::ColorInversion,
    Display, Error,
};

/// Vendor register tuning replayed after the software reset.
///
/// Most of these registers are undocumented. The table is reproduced as the
/// panel vendor ships it; entries must not be reordered or dropped.
pub static INIT_SEQUENCE: [InitCommand; 44] = [
    InitCommand::new(dcs::INNER_REG_EN_2, &[]),
    InitCommand::new(0xEB, &[0x14]),
    InitCommand::new(dcs::INNER_REG_EN_1, &[]),
    InitCommand::new(dcs::INNER_REG_EN_2, &[]),
    InitCommand::new(0xEB, &[0x14]),
    InitCommand::new(0x84, &[0x40]),
    InitCommand::new(0x85, &[0xFF]),
    InitCommand::new(0x86, &[0xFF]),
    InitCommand::new(0x87, &[0xFF]),
    InitCommand::new(0x88, &[0x0A]),
    InitCommand::new(0x89, &[0x21]),
    InitCommand::new(0x8A, &[0x00]),
    InitCommand::new(0x8B, &[0x80]),
    InitCommand::new(0x8C, &[0x01]),
    InitCommand::new(0x8D, &[0x01]),
    InitCommand::new(0x8E, &[0xFF]),
    InitCommand::new(0x8F, &[0xFF]),
    InitCommand::new(dcs::DISPLAY_FUNCTION_CTRL, &[0x00, 0x20]),
    InitCommand::new(0x90, &[0x08, 0x08, 0x08, 0x08]),
    InitCommand::new(0xBD, &[0x06]),
    InitCommand::new(0xBC, &[0x00]),
    InitCommand::new(0xFF, &[0x60, 0x01, 0x04]),
    InitCommand::new(dcs::VREG1A_VOLTAGE_CTRL, &[0x13]),
    InitCommand::new(dcs::VREG1B_VOLTAGE_CTRL, &[0x13]),
    InitCommand::new(dcs::VREG2A_VOLTAGE_CTRL, &[0x22]),
    InitCommand::new(0xBE, &[0x11]),
    InitCommand::new(0xE1, &[0x10, 0x0E]),
    InitCommand::new(0xDF, &[0x21, 0x0C, 0x02]),
    InitCommand::new(dcs::SET_GAMMA_1, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    InitCommand::new(dcs::SET_GAMMA_2, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    InitCommand::new(dcs::SET_GAMMA_3, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    InitCommand::new(dcs::SET_GAMMA_4, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    InitCommand::new(0xED, &[0x1B, 0x0B]),
    InitCommand::new(0xAE, &[0x77]),
    InitCommand::new(0xCD, &[0x63]),
    InitCommand::new(dcs::FRAME_RATE, &[0x34]),
    InitCommand::new(
        0x62,
        &[
            0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70,
        ],
    ),
    InitCommand::new(
        0x63,
        &[
            0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70,
        ],
    ),
    InitCommand::new(0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    InitCommand::new(
        0x66,
        &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00],
    ),
    InitCommand::new(
        0x67,
        &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98],
    ),
    InitCommand::new(0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    InitCommand::new(0x98, &[0x3E, 0x07]),
    InitCommand::new(dcs::SET_TEAR_ON, &[]),
];

/// Bring-up progress of a [`Display`].
///
/// After a failed [`Display::init`] this holds the phase that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// Nothing sent yet.
    Unreset,
    /// Pulsing the reset line.
    HardResetting,
    /// Software reset issued, waiting for the controller to settle.
    SoftResetting,
    /// Replaying the initialization table.
    Replaying,
    /// Initialized and cleared, ready for drawing.
    Ready,
}

const SLEEP_OUT_MS: u32 = 120;
const DISPLAY_ON_MS: u32 = 20;

impl<DI, RST> Display<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    /// Runs the full bring-up sequence.
    ///
    /// Hardware reset, software reset, table replay, pixel format, access
    /// control, inversion, sleep out and display on, then the panel is
    /// cleared to black. The first transport error aborts the sequence and is
    /// returned unchanged; [`Self::init_state`] then tells where it stopped.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error, RST::Error>> {
        self.enter(InitState::HardResetting);
        self.hard_reset(delay)?;

        self.enter(InitState::SoftResetting);
        self.soft_reset(delay)?;

        self.enter(InitState::Replaying);
        let timing = self.options.timing;
        let sequence = self.init_sequence;
        for (i, cmd) in sequence.iter().enumerate() {
            log::trace!("init[{}] cmd={:#04x} len={}", i, cmd.command(), cmd.payload().len());
            self.di
                .write_raw(cmd.command(), cmd.payload())
                .map_err(Error::Interface)?;
            delay.delay_ms(timing.command_ms);
        }
        self.configure(delay)?;

        self.clear()?;
        self.enter(InitState::Ready);
        Ok(())
    }

    /// Pulses the reset line: high, low, high, holding each level for the
    /// configured reset time.
    ///
    /// Does nothing when the display was built without a reset pin.
    pub fn hard_reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        let hold = self.options.timing.reset_ms;
        match self.rst {
            Some(ref mut rst) => {
                log::debug!("hard reset, {} ms phases", hold);
                rst.set_high().map_err(Error::ResetPin)?;
                delay.delay_ms(hold);
                rst.set_low().map_err(Error::ResetPin)?;
                delay.delay_ms(hold);
                rst.set_high().map_err(Error::ResetPin)?;
                delay.delay_ms(hold);
            }
            None => log::debug!("no reset pin, skipping hard reset"),
        }
        Ok(())
    }

    /// Issues the software reset command and waits for the controller to
    /// settle.
    pub fn soft_reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        self.di
            .send_command(dcs::SOFT_RESET)
            .map_err(Error::Interface)?;
        delay.delay_ms(self.options.timing.soft_reset_ms);
        self.sleeping = true;
        Ok(())
    }

    /// Returns how far the last bring-up got.
    pub fn init_state(&self) -> InitState {
        self.state
    }

    // Configuration tail written after the vendor table.
    fn configure<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error, RST::Error>> {
        let options = self.options;
        self.madctl = AccessControl::from(&options);
        self.di
            .write_raw(dcs::SET_ADDRESS_MODE, &[self.madctl.bits()])
            .map_err(Error::Interface)?;
        self.di
            .write_raw(dcs::SET_PIXEL_FORMAT, &[options.color_mode.colmod()])
            .map_err(Error::Interface)?;
        let invert = match options.invert_colors {
            ColorInversion::Normal => dcs::EXIT_INVERT_MODE,
            ColorInversion::Inverted => dcs::ENTER_INVERT_MODE,
        };
        self.di.write_raw(invert, &[]).map_err(Error::Interface)?;

        self.di
            .write_raw(dcs::EXIT_SLEEP_MODE, &[])
            .map_err(Error::Interface)?;
        delay.delay_ms(SLEEP_OUT_MS);
        self.sleeping = false;

        self.di
            .write_raw(dcs::SET_DISPLAY_ON, &[])
            .map_err(Error::Interface)?;
        delay.delay_ms(DISPLAY_ON_MS);
        Ok(())
    }

    fn enter(&mut self, state: InitState) {
        log::debug!("init: {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}
