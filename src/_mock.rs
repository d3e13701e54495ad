//! No-op peripherals for doc examples.

use core::convert::Infallible;

use embedded_hal::{delay::DelayNs, digital};

use crate::interface::Interface;

pub struct MockOutputPin;

impl digital::OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl digital::ErrorType for MockOutputPin {
    type Error = Infallible;
}

pub struct MockDelay;

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub struct MockDisplayInterface;

impl Interface for MockDisplayInterface {
    type Error = Infallible;

    fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> {
        Ok(())
    }

    fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }
}
