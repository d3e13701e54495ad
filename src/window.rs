//! Addressable write window.

use embedded_hal::digital::OutputPin;

use crate::{
    dcs,
    interface::{Interface, InterfaceExt},
    Display, Error, HEIGHT, WIDTH,
};

/// A rectangle of panel memory, always fully inside the panel and never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

/// The requested origin lies outside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutOfBounds;

impl Window {
    /// The whole panel.
    pub const FULL: Self = Self {
        x: 0,
        y: 0,
        width: WIDTH,
        height: HEIGHT,
    };

    /// Returns the window if it is non-empty and fits inside the panel.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Option<Self> {
        let fits_x = u32::from(x) + u32::from(width) <= u32::from(WIDTH);
        let fits_y = u32::from(y) + u32::from(height) <= u32::from(HEIGHT);
        if width == 0 || height == 0 || !fits_x || !fits_y {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Narrows the extent of a rectangle to the panel.
    ///
    /// The origin is never moved: an origin outside the panel is an error,
    /// an empty extent yields `Ok(None)`.
    pub(crate) fn clip(
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<Option<Self>, OutOfBounds> {
        if x >= WIDTH || y >= HEIGHT {
            return Err(OutOfBounds);
        }
        let width = width.min(WIDTH - x);
        let height = height.min(HEIGHT - y);
        Ok(Self::new(x, y, width, height))
    }

    /// Left column.
    pub const fn x(&self) -> u16 {
        self.x
    }

    /// Top row.
    pub const fn y(&self) -> u16 {
        self.y
    }

    /// Width in pixels.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    fn columns(&self) -> [u8; 4] {
        address_range(self.x, self.x + self.width - 1)
    }

    fn rows(&self) -> [u8; 4] {
        address_range(self.y, self.y + self.height - 1)
    }
}

fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [s0, s1] = start.to_be_bytes();
    let [e0, e1] = end.to_be_bytes();
    [s0, s1, e0, e1]
}

impl<DI, RST> Display<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    /// Programs the controller's write window and arms memory write.
    ///
    /// Emits column address set, row address set and memory write, in that
    /// order. The caller is expected to stream exactly `w * h` pixel words
    /// right after this returns.
    ///
    /// Returns [`Error::InvalidArgument`] without touching the bus unless
    /// the rectangle is non-empty and fully inside the panel.
    pub fn set_window(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        let window = Window::new(x, y, w, h).ok_or(Error::InvalidArgument)?;
        self.write_window(&window)
    }

    pub(crate) fn write_window(
        &mut self,
        window: &Window,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        log::trace!(
            "window x={} y={} w={} h={}",
            window.x,
            window.y,
            window.width,
            window.height
        );
        self.di
            .write_raw(dcs::SET_COLUMN_ADDRESS, &window.columns())
            .map_err(Error::Interface)?;
        self.di
            .write_raw(dcs::SET_PAGE_ADDRESS, &window.rows())
            .map_err(Error::Interface)?;
        self.di
            .write_raw(dcs::WRITE_MEMORY_START, &[])
            .map_err(Error::Interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{display, Call};
    use std::vec;

    #[test]
    fn emits_column_row_and_memory_write() {
        let (mut display, log) = display();
        display.set_window(10, 20, 30, 40).unwrap();
        assert_eq!(
            log.calls(),
            vec![
                Call::Command(0x2A),
                Call::Data(vec![0, 10, 0, 39]),
                Call::Command(0x2B),
                Call::Data(vec![0, 20, 0, 59]),
                Call::Command(0x2C),
                Call::Data(vec![]),
            ]
        );
    }

    #[test]
    fn encodes_bounds_big_endian() {
        let (mut display, log) = display();
        display.set_window(0, 0, WIDTH, HEIGHT).unwrap();
        let calls = log.calls();
        assert_eq!(calls[1], Call::Data(vec![0x00, 0x00, 0x00, 0xEF]));
        assert_eq!(calls[3], Call::Data(vec![0x00, 0x00, 0x00, 0xEF]));
    }

    #[test]
    fn every_valid_window_is_three_pairs() {
        for (x, y, w, h) in [(0, 0, 1, 1), (239, 239, 1, 1), (100, 5, 140, 235)] {
            let (mut display, log) = display();
            display.set_window(x, y, w, h).unwrap();
            let calls = log.calls();
            assert_eq!(calls.len(), 6);
            let end_x = x + w - 1;
            let end_y = y + h - 1;
            let [sx0, sx1] = x.to_be_bytes();
            let [ex0, ex1] = end_x.to_be_bytes();
            let [sy0, sy1] = y.to_be_bytes();
            let [ey0, ey1] = end_y.to_be_bytes();
            assert_eq!(calls[1], Call::Data(vec![sx0, sx1, ex0, ex1]));
            assert_eq!(calls[3], Call::Data(vec![sy0, sy1, ey0, ey1]));
        }
    }

    #[test]
    fn rejects_windows_outside_the_panel() {
        let (mut display, log) = display();
        assert_eq!(
            display.set_window(200, 0, 41, 1),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            display.set_window(0, 240, 1, 1),
            Err(Error::InvalidArgument)
        );
        assert_eq!(display.set_window(0, 0, 0, 5), Err(Error::InvalidArgument));
        assert_eq!(
            display.set_window(u16::MAX, 0, 2, 1),
            Err(Error::InvalidArgument)
        );
        assert!(log.calls().is_empty());
    }

    #[test]
    fn transport_failure_aborts_remaining_steps() {
        let (mut display, log) = display();
        log.fail_on_command(0x2B);
        assert!(matches!(
            display.set_window(0, 0, 10, 10),
            Err(Error::Interface(_))
        ));
        assert_eq!(log.commands(), vec![0x2A, 0x2B]);
    }

    #[test]
    fn clip_narrows_extent_only() {
        assert_eq!(
            Window::clip(235, 0, 20, 10),
            Ok(Window::new(235, 0, 5, 10))
        );
        let clipped = Window::clip(235, 7, 20, 10).unwrap().unwrap();
        assert_eq!((clipped.x(), clipped.y()), (235, 7));
        assert_eq!((clipped.width(), clipped.height()), (5, 10));
        assert_eq!(Window::clip(240, 0, 1, 1), Err(OutOfBounds));
        assert_eq!(Window::clip(0, 0, 0, 10), Ok(None));
    }
}
