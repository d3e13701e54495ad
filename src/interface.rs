//! Interface traits and implementations

mod spi;
pub use spi::*;

/// Command/data transport to the controller.
///
/// Every call is one discrete, blocking bus transaction. Implementations must
/// switch the data/command select line before the transfer starts and must
/// not retry or buffer internally.
pub trait Interface {
    /// Error type
    type Error: core::fmt::Debug;

    /// Send a single command byte with the select line in the "command" state.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send a data payload with the select line in the "data" state.
    ///
    /// An empty slice is a no-op: nothing is transmitted and the select line
    /// is left untouched.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        T::send_command(self, command)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::send_data(self, data)
    }
}

/// Helpers layered on top of [`Interface`].
pub trait InterfaceExt: Interface {
    /// Send a command followed by its (possibly empty) payload.
    ///
    /// The payload is always forwarded to [`Interface::send_data`], so an
    /// empty payload still counts as one protocol call.
    fn write_raw(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error> {
        self.send_command(command)?;
        self.send_data(payload)
    }
}

impl<T: Interface + ?Sized> InterfaceExt for T {}
