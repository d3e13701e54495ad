//! Drawing primitives.
//!
//! Every primitive reduces to "program a window, stream N pixel words".
//! Rectangles are clipped to the panel by narrowing their extent; an origin
//! outside the panel is rejected before anything is sent.

use embedded_hal::digital::OutputPin;

use crate::{
    color::Color,
    interface::Interface,
    options::ColorMode,
    window::{OutOfBounds, Window},
    Display, Error, HEIGHT, WIDTH,
};

/// Bytes collected before a transfer. Multiple of 6 so neither 16-bit
/// pixels, 18-bit pixels nor 12-bit pixel pairs straddle two transfers.
#[cfg(feature = "batch")]
const BATCH_BYTES: usize = 510;

/// Serializes packed pixel words into the controller's byte stream.
pub(crate) struct PixelWriter<'a, DI: Interface> {
    di: &'a mut DI,
    mode: ColorMode,
    // First half of a 12-bit pixel pair.
    pending: Option<u16>,
    #[cfg(feature = "batch")]
    buffer: heapless::Vec<u8, BATCH_BYTES>,
}

impl<'a, DI: Interface> PixelWriter<'a, DI> {
    pub(crate) fn new(di: &'a mut DI, mode: ColorMode) -> Self {
        Self {
            di,
            mode,
            pending: None,
            #[cfg(feature = "batch")]
            buffer: heapless::Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, word: u32) -> Result<(), DI::Error> {
        match self.mode {
            ColorMode::Rgb565 => self.emit(&(word as u16).to_be_bytes()),
            ColorMode::Rgb666 => self.emit(&[
                ((word >> 12) as u8 & 0x3F) << 2,
                ((word >> 6) as u8 & 0x3F) << 2,
                (word as u8 & 0x3F) << 2,
            ]),
            ColorMode::Rgb444 => {
                let word = word as u16 & 0x0FFF;
                match self.pending.take() {
                    Some(first) => self.emit(&[
                        (first >> 4) as u8,
                        ((first << 4) as u8 & 0xF0) | (word >> 8) as u8,
                        word as u8,
                    ]),
                    None => {
                        self.pending = Some(word);
                        Ok(())
                    }
                }
            }
        }
    }

    pub(crate) fn repeat(&mut self, word: u32, count: u32) -> Result<(), DI::Error> {
        for _ in 0..count {
            self.push(word)?;
        }
        Ok(())
    }

    /// Sends whatever is still held back. Must be called once the stream is
    /// complete.
    pub(crate) fn finish(mut self) -> Result<(), DI::Error> {
        if let Some(last) = self.pending.take() {
            self.emit(&[(last >> 4) as u8, (last << 4) as u8 & 0xF0])?;
        }
        self.flush()
    }

    #[cfg(feature = "batch")]
    fn emit(&mut self, bytes: &[u8]) -> Result<(), DI::Error> {
        if self.buffer.capacity() - self.buffer.len() < bytes.len() {
            self.flush()?;
        }
        // room was made above, pixel encodings are at most three bytes
        let pushed = self.buffer.extend_from_slice(bytes);
        debug_assert!(pushed.is_ok(), "pixel batch overflow");
        Ok(())
    }

    #[cfg(not(feature = "batch"))]
    fn emit(&mut self, bytes: &[u8]) -> Result<(), DI::Error> {
        self.di.send_data(bytes)
    }

    #[cfg(feature = "batch")]
    fn flush(&mut self) -> Result<(), DI::Error> {
        let result = self.di.send_data(&self.buffer);
        self.buffer.clear();
        result
    }

    #[cfg(not(feature = "batch"))]
    fn flush(&mut self) -> Result<(), DI::Error> {
        Ok(())
    }
}

impl<DI, RST> Display<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    /// Fills the whole panel with `color`.
    pub fn fill(&mut self, color: Color) -> Result<(), Error<DI::Error, RST::Error>> {
        self.fill_window(&Window::FULL, color)
    }

    /// Fills the whole panel with black.
    pub fn clear(&mut self) -> Result<(), Error<DI::Error, RST::Error>> {
        self.fill(Color::BLACK)
    }

    /// Sets a single pixel.
    pub fn set_pixel(
        &mut self,
        x: u16,
        y: u16,
        color: Color,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        self.fill_rect(x, y, 1, 1, color)
    }

    /// Fills a rectangle, clipped to the panel.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Color,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        match Window::clip(x, y, w, h).map_err(invalid)? {
            Some(window) => self.fill_window(&window, color),
            None => Ok(()),
        }
    }

    /// Draws a horizontal line of `w` pixels starting at `(x, y)`.
    pub fn draw_hline(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        color: Color,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        self.fill_rect(x, y, w, 1, color)
    }

    /// Draws a vertical line of `h` pixels starting at `(x, y)`.
    pub fn draw_vline(
        &mut self,
        x: u16,
        y: u16,
        h: u16,
        color: Color,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        self.fill_rect(x, y, 1, h, color)
    }

    /// Draws a one pixel wide rectangle outline as four lines.
    ///
    /// Edges that fall outside the panel after clipping are skipped.
    pub fn draw_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Color,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        if Window::clip(x, y, w, h).map_err(invalid)?.is_none() {
            return Ok(());
        }
        let right = u32::from(x) + u32::from(w) - 1;
        let bottom = u32::from(y) + u32::from(h) - 1;

        self.draw_hline(x, y, w, color)?;
        if bottom < u32::from(HEIGHT) {
            self.draw_hline(x, bottom as u16, w, color)?;
        }
        self.draw_vline(x, y, h, color)?;
        if right < u32::from(WIDTH) {
            self.draw_vline(right as u16, y, h, color)?;
        }
        Ok(())
    }

    /// Copies pre-packed pixel words to the panel.
    ///
    /// `pixels` holds `w * h` words in row-major order, already encoded for
    /// the configured [`ColorMode`]. Only the part inside the panel is sent;
    /// the rest of each source row is skipped.
    pub fn draw_bitmap<W>(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        pixels: &[W],
    ) -> Result<(), Error<DI::Error, RST::Error>>
    where
        W: Copy + Into<u32>,
    {
        let window = Window::clip(x, y, w, h).map_err(invalid)?;
        if pixels.len() < usize::from(w) * usize::from(h) {
            return Err(Error::InvalidArgument);
        }
        let Some(window) = window else {
            return Ok(());
        };

        self.write_window(&window)?;
        let mut writer = PixelWriter::new(&mut self.di, self.options.color_mode);
        let stride = usize::from(w);
        let visible = usize::from(window.width());
        for row in pixels.chunks(stride).take(usize::from(window.height())) {
            for &word in &row[..visible] {
                writer.push(word.into()).map_err(Error::Interface)?;
            }
        }
        writer.finish().map_err(Error::Interface)
    }

    /// Draws a straight line between two points, both inclusive.
    ///
    /// Both endpoints must lie inside the panel. Horizontal and vertical
    /// lines use a single window, anything else is plotted pixel by pixel.
    pub fn draw_line(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Color,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        if x0 >= WIDTH || x1 >= WIDTH || y0 >= HEIGHT || y1 >= HEIGHT {
            return Err(Error::InvalidArgument);
        }
        if y0 == y1 {
            return self.draw_hline(x0.min(x1), y0, x0.abs_diff(x1) + 1, color);
        }
        if x0 == x1 {
            return self.draw_vline(x0, y0.min(y1), y0.abs_diff(y1) + 1, color);
        }

        // Bresenham, all octants
        let (mut x, mut y) = (i32::from(x0), i32::from(y0));
        let (x1, y1) = (i32::from(x1), i32::from(y1));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x as u16, y as u16, color)?;
            if x == x1 && y == y1 {
                return Ok(());
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_window(
        &mut self,
        window: &Window,
        color: Color,
    ) -> Result<(), Error<DI::Error, RST::Error>> {
        self.write_window(window)?;
        let mode = self.options.color_mode;
        let mut writer = PixelWriter::new(&mut self.di, mode);
        writer
            .repeat(color.pack(mode), window.area())
            .map_err(Error::Interface)?;
        writer.finish().map_err(Error::Interface)
    }
}

fn invalid<DiError, RstError>(_: OutOfBounds) -> Error<DiError, RstError> {
    Error::InvalidArgument
}
