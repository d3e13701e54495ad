/// Error returned by display operations.
///
/// `InvalidArgument` is always detected before any bus traffic. Transport
/// errors are forwarded unchanged from whichever call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<DiError, RstError> {
    /// Geometry or buffer outside the panel or too short.
    InvalidArgument,
    /// The display interface reported a failed transaction.
    Interface(DiError),
    /// Driving the reset pin failed.
    ResetPin(RstError),
}

impl<DiError, RstError> Error<DiError, RstError> {
    /// Returns `true` for errors raised by the transport rather than by
    /// argument validation.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::InvalidArgument)
    }
}
