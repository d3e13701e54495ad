//!
//! SPI interface for the GC9A01.
//!
//! This module provides the [`Interface`] implementation for a 4-line serial
//! connection: an [`SpiDevice`] carrying the bytes (chip select is handled by
//! the device) and a data/command (DC) output pin. The DC pin is driven low
//! for command bytes and high for data payloads, always before the transfer
//! starts since the controller samples it during transfer setup.
//!
//! # Example
//!
//! ```rust,ignore
//! use gc9a01::interface::SpiInterface;
//!
//! let spi = /* your SPI device */;
//! let dc = /* your DC OutputPin */;
//! let mut iface = SpiInterface::new(spi, dc);
//! // Use iface with the display builder
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::Interface;

/// Error type for the SPI interface.
///
/// Wraps errors from the SPI bus or the data/command (DC) pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError<SPI, DC> {
    /// SPI bus error
    Spi(SPI),
    /// Data/command pin error
    Dc(DC),
}

/// SPI interface with a data/command select pin.
///
/// Use [`SpiInterface::new`] to construct, and [`SpiInterface::release`] to
/// deconstruct and recover the SPI and DC resources.
pub struct SpiInterface<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new SPI interface from an SPI device and DC pin.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Release the DC pin and SPI peripheral back, deconstructing the interface.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> Interface for SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    type Error = SpiError<SPI::Error, DC::Error>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(SpiError::Dc)?;
        self.spi.write(&[command]).map_err(SpiError::Spi)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(SpiError::Dc)?;
        self.spi.write(data).map_err(SpiError::Spi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        DcLow,
        DcHigh,
        Write(Vec<u8>),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    impl embedded_hal::spi::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct RecordingSpi {
        log: Log,
        fail: bool,
    }

    impl ErrorType for RecordingSpi {
        type Error = BusFault;
    }

    impl SpiDevice for RecordingSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), BusFault> {
            if self.fail {
                return Err(BusFault);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.log.borrow_mut().push(Event::Write(bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    struct RecordingPin {
        log: Log,
    }

    impl embedded_hal::digital::ErrorType for RecordingPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::DcLow);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::DcHigh);
            Ok(())
        }
    }

    fn interface(fail: bool) -> (SpiInterface<RecordingSpi, RecordingPin>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let spi = RecordingSpi {
            log: log.clone(),
            fail,
        };
        let dc = RecordingPin { log: log.clone() };
        (SpiInterface::new(spi, dc), log)
    }

    #[test]
    fn command_sets_dc_low_before_transfer() {
        let (mut di, log) = interface(false);
        di.send_command(0x2C).unwrap();
        assert_eq!(
            *log.borrow(),
            [Event::DcLow, Event::Write(Vec::from([0x2C]))]
        );
    }

    #[test]
    fn data_sets_dc_high_before_transfer() {
        let (mut di, log) = interface(false);
        di.send_data(&[0x00, 0x10, 0x00, 0xEF]).unwrap();
        assert_eq!(
            *log.borrow(),
            [Event::DcHigh, Event::Write(Vec::from([0x00, 0x10, 0x00, 0xEF]))]
        );
    }

    #[test]
    fn empty_data_is_a_noop() {
        let (mut di, log) = interface(true);
        assert_eq!(di.send_data(&[]), Ok(()));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn bus_failure_is_surfaced() {
        let (mut di, _log) = interface(true);
        assert_eq!(di.send_command(0x01), Err(SpiError::Spi(BusFault)));
        assert_eq!(di.send_data(&[0x01]), Err(SpiError::Spi(BusFault)));
    }
}
