//! [Builder] for the [Display] device handle.

use embedded_hal::{delay::DelayNs, digital};

use crate::{
    dcs::InitCommand,
    init::{InitState, INIT_SEQUENCE},
    interface::Interface,
    options::{
        AccessControl, ColorInversion, ColorMode, ColorOrder, ModelOptions, Orientation, Timing,
    },
    Display, Error,
};

/// Builder for [Display] instances.
///
/// Exposes all possible display options.
///
/// # Examples
///
/// ```
/// use gc9a01::{Builder, options::{ColorMode, Orientation, Rotation}};
///
/// # let di = gc9a01::_mock::MockDisplayInterface;
/// # let rst = gc9a01::_mock::MockOutputPin;
/// # let mut delay = gc9a01::_mock::MockDelay;
/// let mut display = Builder::new(di)
///     .reset_pin(rst)
///     .color_mode(ColorMode::Rgb565)
///     .orientation(Orientation::new(Rotation::Deg90))
///     .init(&mut delay)
///     .unwrap();
/// ```
pub struct Builder<DI, RST> {
    di: DI,
    rst: Option<RST>,
    options: ModelOptions,
    init_sequence: &'static [InitCommand],
}

impl<DI> Builder<DI, NoResetPin>
where
    DI: Interface,
{
    ///
    /// Constructs a new builder for the given interface, with default options
    /// and the vendor initialization table.
    ///
    #[must_use]
    pub fn new(di: DI) -> Self {
        Self {
            di,
            rst: None,
            options: ModelOptions::default(),
            init_sequence: &INIT_SEQUENCE,
        }
    }
}

impl<DI, RST> Builder<DI, RST>
where
    DI: Interface,
    RST: digital::OutputPin,
{
    ///
    /// Sets the pixel format used for streaming.
    ///
    #[must_use]
    pub fn color_mode(mut self, color_mode: ColorMode) -> Self {
        self.options.color_mode = color_mode;
        self
    }

    ///
    /// Sets the subpixel order folded into every access control write.
    ///
    #[must_use]
    pub fn color_order(mut self, color_order: ColorOrder) -> Self {
        self.options.color_order = color_order;
        self
    }

    ///
    /// Sets the initial orientation.
    ///
    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.options.orientation = orientation;
        self
    }

    ///
    /// Sets color inversion.
    ///
    #[must_use]
    pub fn invert_colors(mut self, color_inversion: ColorInversion) -> Self {
        self.options.invert_colors = color_inversion;
        self
    }

    ///
    /// Overrides the reset and init delays.
    ///
    #[must_use]
    pub fn timing(mut self, timing: Timing) -> Self {
        self.options.timing = timing;
        self
    }

    ///
    /// Replaces the vendor initialization table, for panel variants that
    /// ship their own register tuning.
    ///
    #[must_use]
    pub fn init_sequence(mut self, init_sequence: &'static [InitCommand]) -> Self {
        self.init_sequence = init_sequence;
        self
    }

    /// Sets the reset pin.
    ///
    /// ### WARNING
    /// The reset pin needs to be in *high* state in order for the display to operate.
    /// If it wasn't provided the user needs to ensure this is the case.
    ///
    #[must_use]
    pub fn reset_pin<RST2>(self, rst: RST2) -> Builder<DI, RST2> {
        Builder {
            di: self.di,
            rst: Some(rst),
            options: self.options,
            init_sequence: self.init_sequence,
        }
    }

    ///
    /// Consumes the builder to create a new [Display] and runs its
    /// initialization sequence.
    ///
    /// The display is returned only once it reached [`InitState::Ready`]. To
    /// keep the resources around after a failed bring-up, use [Self::build]
    /// and call [`Display::init`] yourself.
    ///
    pub fn init(
        self,
        delay_source: &mut impl DelayNs,
    ) -> Result<Display<DI, RST>, Error<DI::Error, RST::Error>> {
        let mut display = self.build();
        display.init(delay_source)?;
        Ok(display)
    }

    ///
    /// Consumes the builder without talking to the controller.
    ///
    pub fn build(self) -> Display<DI, RST> {
        Display {
            di: self.di,
            rst: self.rst,
            madctl: AccessControl::from(&self.options),
            options: self.options,
            init_sequence: self.init_sequence,
            state: InitState::Unreset,
            sleeping: true,
        }
    }
}

/// Marker type for no reset pin.
pub enum NoResetPin {}

impl digital::OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl digital::ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}
