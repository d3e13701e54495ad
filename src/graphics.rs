use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::Rgb888,
    primitives::{PointsIter, Rectangle},
    Pixel,
};
use embedded_hal::digital::OutputPin;

use crate::{
    color::Color, interface::Interface, primitives::PixelWriter, window::Window, Display, Error,
    HEIGHT, WIDTH,
};

impl<DI, RST> DrawTarget for Display<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    type Error = Error<DI::Error, RST::Error>;
    type Color = Rgb888;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = panel_point(point) {
                self.set_pixel(x, y, color.into())?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let Some(window) = window_for(area) else {
            // partially visible: fall back to per-pixel clipping
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        };

        self.write_window(&window)?;
        let mode = self.options.color_mode;
        let mut writer = PixelWriter::new(&mut self.di, mode);
        for color in colors.into_iter().take(window.area() as usize) {
            writer
                .push(Color::from(color).pack(mode))
                .map_err(Error::Interface)?;
        }
        writer.finish().map_err(Error::Interface)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        if visible.is_zero_sized() {
            return Ok(());
        }
        // intersection keeps the area on the panel, so these fit in u16
        self.fill_rect(
            visible.top_left.x as u16,
            visible.top_left.y as u16,
            visible.size.width as u16,
            visible.size.height as u16,
            color.into(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into())
    }
}

impl<DI, RST> OriginDimensions for Display<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

fn panel_point(point: Point) -> Option<(u16, u16)> {
    let x = u16::try_from(point.x).ok().filter(|&x| x < WIDTH)?;
    let y = u16::try_from(point.y).ok().filter(|&y| y < HEIGHT)?;
    Some((x, y))
}

/// The window covering `area`, if `area` is non-empty and fully on the panel.
fn window_for(area: &Rectangle) -> Option<Window> {
    let (x, y) = panel_point(area.top_left)?;
    let width = u16::try_from(area.size.width).ok()?;
    let height = u16::try_from(area.size.height).ok()?;
    Window::new(x, y, width, height)
}
