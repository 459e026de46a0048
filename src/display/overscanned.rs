//! Image blits whose rectangle may overscan the panel, i.e. lie partly or wholly outside the
//! viewable area. Pixels that fall outside are silently dropped, so callers computing positions
//! dynamically do not have to handle the boundary themselves.

use itertools::iproduct;

use crate::color::{ByteOrder, Rgb565};
use crate::display::Display;
use crate::error::Error;
use crate::interface;

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Copy a `w` x `h` image stored row by row in `pixels` to (x, y), cropping whatever lies off
    /// the panel. `pixels` must hold at least `w * h` colours even if part of the image is cropped.
    pub fn draw_image_overscanned(
        &mut self,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        pixels: &[Rgb565],
        order: ByteOrder,
    ) -> Result<(), Error<DI::Error>> {
        let expected = w as usize * h as usize;
        if pixels.len() < expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        self.blit_cropped(
            x.into(),
            y.into(),
            w.into(),
            h.into(),
            pixels.iter().map(|p| p.to_wire(order)),
        )
    }

    /// Address the visible part of the rectangle at (x, y) sized `w` x `h` and stream only the
    /// pixels of `pixels` that land inside it. Nothing is sent when the rectangle is entirely off
    /// the panel.
    pub(crate) fn blit_cropped<I>(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        pixels: I,
    ) -> Result<(), Error<DI::Error>>
    where
        I: IntoIterator<Item = [u8; 2]>,
    {
        let (width, height) = self.size();
        let (width, height) = (i32::from(width), i32::from(height));
        let (right, bottom) = (x.saturating_add(w), y.saturating_add(h));
        let (x1, x2) = (x.clamp(0, width), right.clamp(0, width));
        let (y1, y2) = (y.clamp(0, height), bottom.clamp(0, height));
        if x1 >= x2 || y1 >= y2 {
            return Ok(());
        }

        self.set_address_window(x1 as u16, y1 as u16, (x2 - 1) as u16, (y2 - 1) as u16)?;
        let visible = iproduct!(y..bottom, x..right)
            .zip(pixels)
            .filter(|((r, c), _)| (0..height).contains(r) && (0..width).contains(c))
            .map(|(_, px)| px);
        self.stream(visible)
    }
}
