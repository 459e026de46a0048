//! `embedded-graphics` support, so the display can be used as a `DrawTarget`.

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{
        raw::{RawData, RawU16},
        Rgb565 as EgRgb565,
    },
    primitives::Rectangle,
    Pixel,
};

use crate::color::{ByteOrder, Rgb565};
use crate::display::Display;
use crate::error::Error;
use crate::interface;

impl From<EgRgb565> for Rgb565 {
    fn from(color: EgRgb565) -> Self {
        Rgb565(RawU16::from(color).into_inner())
    }
}

impl<DI> OriginDimensions for Display<DI>
where
    DI: interface::DisplayInterface,
{
    fn size(&self) -> Size {
        let (width, height) = Display::size(self);
        Size::new(width.into(), height.into())
    }
}

impl<DI> DrawTarget for Display<DI>
where
    DI: interface::DisplayInterface,
{
    type Color = EgRgb565;
    type Error = Error<DI::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.plot(coord.x, coord.y, color.into(), true)?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.blit_cropped(
            area.top_left.x,
            area.top_left.y,
            area.size.width.min(i32::MAX as u32) as i32,
            area.size.height.min(i32::MAX as u32) as i32,
            colors.into_iter().map(|c| Rgb565::from(c).to_wire(ByteOrder::Native)),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        match visible.bottom_right() {
            Some(br) => self.fill_rect(
                visible.top_left.x as i16,
                visible.top_left.y as i16,
                br.x as i16 + 1,
                br.y as i16 + 1,
                color.into(),
            ),
            None => Ok(()),
        }
    }
}
