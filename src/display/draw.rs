//! Rasterization primitives. Every pixel goes through `Display::set_address_window` followed by
//! a pixel stream; nothing here touches the bus directly.

use core::iter;

use crate::color::{ByteOrder, Rgb565};
use crate::display::Display;
use crate::error::Error;
use crate::interface;

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Fill the half-open rectangle [x1, x2) x [y1, y2) with `color`, row by row.
    pub fn fill_rect(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Rgb565,
    ) -> Result<(), Error<DI::Error>> {
        if x1 >= x2 || y1 >= y2 {
            return Err(Error::InvalidWindow);
        }
        let (x1, y1, x2, y2) = self.window(
            x1.into(),
            y1.into(),
            i32::from(x2) - 1,
            i32::from(y2) - 1,
        )?;
        let count = (x2 - x1 + 1) as usize * (y2 - y1 + 1) as usize;
        self.set_address_window(x1, y1, x2, y2)?;
        self.stream(iter::repeat(color.to_wire(ByteOrder::Native)).take(count))
    }

    /// Set a single pixel. Fails with `InvalidWindow` if it lies off the panel.
    pub fn draw_point(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), Error<DI::Error>> {
        self.plot(x.into(), y.into(), color, false)
    }

    /// Draw a straight line including both end points. Parts of the line off the panel are
    /// dropped.
    pub fn draw_line(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Rgb565,
    ) -> Result<(), Error<DI::Error>> {
        let (x1, y1, x2, y2) = (i32::from(x1), i32::from(y1), i32::from(x2), i32::from(y2));
        let (dx, dy) = ((x2 - x1).abs(), (y2 - y1).abs());
        let (step_x, step_y) = ((x2 - x1).signum(), (y2 - y1).signum());
        let distance = dx.max(dy);

        // Each axis accumulates its extent per step and advances once the accumulator reaches the
        // major extent. Starting half way rounds the minor axis to the nearest pixel.
        let (mut err_x, mut err_y) = (distance / 2, distance / 2);
        let (mut x, mut y) = (x1, y1);
        for _ in 0..=distance {
            self.plot(x, y, color, true)?;
            err_x += dx;
            err_y += dy;
            if err_x >= distance && distance > 0 {
                err_x -= distance;
                x += step_x;
            }
            if err_y >= distance && distance > 0 {
                err_y -= distance;
                y += step_y;
            }
        }
        Ok(())
    }

    /// Draw the outline of the rectangle with corners (x1, y1) and (x2, y2), both inclusive.
    pub fn draw_rect(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Rgb565,
    ) -> Result<(), Error<DI::Error>> {
        self.draw_line(x1, y1, x2, y1, color)?;
        self.draw_line(x1, y1, x1, y2, color)?;
        self.draw_line(x1, y2, x2, y2, color)?;
        self.draw_line(x2, y1, x2, y2, color)
    }

    /// Draw the outline of a circle of radius `r` around (x0, y0). Parts off the panel are
    /// dropped.
    pub fn draw_circle(
        &mut self,
        x0: i16,
        y0: i16,
        r: u16,
        color: Rgb565,
    ) -> Result<(), Error<DI::Error>> {
        let (x0, y0) = (i32::from(x0), i32::from(y0));
        if r == 0 {
            return self.plot(x0, y0, color, true);
        }

        // Midpoint recurrence over the octant from 90° down to 45°, mirrored into the other seven.
        let mut x = 0;
        let mut y = i32::from(r);
        let mut decision = 1 - y;
        while x <= y {
            for &(px, py) in octants(x, y).iter() {
                self.plot(x0 + px, y0 + py, color, true)?;
            }
            x += 1;
            if decision < 0 {
                decision += 2 * x + 1;
            } else {
                y -= 1;
                decision += 2 * (x - y) + 1;
            }
        }
        Ok(())
    }

    /// Copy a `w` x `h` image stored row by row in `pixels` to (x, y). The whole image must lie on
    /// the panel. `pixels` must hold at least `w * h` colours; it is checked before anything is
    /// sent.
    pub fn draw_image(
        &mut self,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        pixels: &[Rgb565],
        order: ByteOrder,
    ) -> Result<(), Error<DI::Error>> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidWindow);
        }
        let (x1, y1, x2, y2) = self.window(
            x.into(),
            y.into(),
            i32::from(x) + i32::from(w) - 1,
            i32::from(y) + i32::from(h) - 1,
        )?;
        let expected = w as usize * h as usize;
        if pixels.len() < expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        self.set_address_window(x1, y1, x2, y2)?;
        self.stream(pixels[..expected].iter().map(|p| p.to_wire(order)))
    }

    /// Set one pixel given in wide coordinates. With `crop`, pixels off the panel are silently
    /// skipped instead of reported.
    pub(crate) fn plot(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
        crop: bool,
    ) -> Result<(), Error<DI::Error>> {
        let (x, y) = match self.window(x, y, x, y) {
            Ok((x, y, _, _)) => (x, y),
            Err(_) if crop => return Ok(()),
            Err(e) => return Err(e),
        };
        self.set_address_window(x, y, x, y)?;
        self.stream(iter::once(color.to_wire(ByteOrder::Native)))
    }
}

/// The eight points symmetric to (x, y) about the axes and diagonals.
fn octants(x: i32, y: i32) -> [(i32, i32); 8] {
    [
        (x, y),
        (y, x),
        (-x, y),
        (-y, x),
        (x, -y),
        (y, -x),
        (-x, -y),
        (-y, -x),
    ]
}

#[cfg(test)]
mod tests {
    use crate::color::{ByteOrder, Rgb565};
    use crate::config::Config;
    use crate::display::Display;
    use crate::error::Error;
    use crate::interface::test_spy::{Sent, TestSpyInterface};
    use std::collections::BTreeSet;

    // No RAM offsets, so panel model addresses equal logical coordinates.
    fn initialized() -> (Display<TestSpyInterface>, TestSpyInterface) {
        let mut di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Config::new().offsets(0, 0));
        disp.init(&mut di.delay()).unwrap();
        di.clear();
        (disp, di)
    }

    #[test]
    fn fill_rect_counts() {
        let (mut disp, di) = initialized();
        disp.fill_rect(10, 20, 15, 23, Rgb565::BLUE).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(&[
            Sent::Cmd(0x2A), Sent::Data(vec![0, 10, 0, 14]),
            Sent::Cmd(0x2B), Sent::Data(vec![0, 20, 0, 22]),
            Sent::Cmd(0x2C), Sent::Data([0x00, 0x1F].repeat(5 * 3)),
        ]);
    }

    #[test]
    fn fill_rect_whole_panel() {
        let (mut disp, di) = initialized();
        disp.fill_rect(0, 0, 128, 128, Rgb565::WHITE).unwrap();
        let panel = di.panel();
        assert_eq!(panel.windows(), 1);
        assert_eq!(panel.total_writes(), 128 * 128);
        assert_eq!(panel.color_at(127, 127), Some(0xFFFF));
    }

    #[test]
    fn fill_rect_invalid() {
        let (mut disp, di) = initialized();
        assert_eq!(
            disp.fill_rect(5, 5, 5, 10, Rgb565::RED),
            Err(Error::InvalidWindow)
        );
        assert_eq!(
            disp.fill_rect(5, 10, 10, 5, Rgb565::RED),
            Err(Error::InvalidWindow)
        );
        assert_eq!(
            disp.fill_rect(-1, 0, 10, 5, Rgb565::RED),
            Err(Error::InvalidWindow)
        );
        assert_eq!(
            disp.fill_rect(0, 0, 129, 5, Rgb565::RED),
            Err(Error::InvalidWindow)
        );
        di.check_multi(sends!());
    }

    #[test]
    fn draw_point() {
        let (mut disp, di) = initialized();
        disp.draw_point(3, 4, Rgb565(0x1234)).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 3, 0, 3],
            0x2B, [0, 4, 0, 4],
            0x2C, [0x12, 0x34]
        ));
        assert_eq!(
            disp.draw_point(128, 0, Rgb565::RED),
            Err(Error::InvalidWindow)
        );
        assert_eq!(
            disp.draw_point(0, -1, Rgb565::RED),
            Err(Error::InvalidWindow)
        );
    }

    #[test]
    fn degenerate_line_is_one_point() {
        let (mut disp, di) = initialized();
        disp.draw_line(7, 9, 7, 9, Rgb565::GREEN).unwrap();
        let panel = di.panel();
        assert_eq!(panel.touched(), vec![(7u16, 9u16)]);
        assert_eq!(panel.total_writes(), 1);
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        let (mut disp, mut di) = initialized();
        disp.draw_line(2, 5, 8, 5, Rgb565::RED).unwrap();
        assert_eq!(
            di.panel().touched(),
            (2..=8u16).map(|x| (x, 5u16)).collect::<Vec<_>>()
        );
        di.clear();
        disp.draw_line(4, 9, 4, 1, Rgb565::RED).unwrap();
        assert_eq!(
            di.panel().touched(),
            (1..=9u16).map(|y| (4u16, y)).collect::<Vec<_>>()
        );
        assert_eq!(di.panel().total_writes(), 9);
    }

    #[test]
    fn sloped_line_hits_both_ends_once_per_step() {
        let (mut disp, di) = initialized();
        disp.draw_line(0, 0, 10, 4, Rgb565::RED).unwrap();
        let panel = di.panel();
        assert_eq!(panel.total_writes(), 11);
        assert_eq!(panel.writes_at(0, 0), 1);
        assert_eq!(panel.writes_at(10, 4), 1);
        // One pixel per column, and rows never jump by more than one.
        let touched = panel.touched();
        let columns: BTreeSet<u16> = touched.iter().map(|p| p.0).collect();
        assert_eq!(columns.len(), 11);
        for pair in touched.windows(2) {
            assert!(pair[1].1 - pair[0].1 <= 1);
        }
    }

    #[test]
    fn steep_line_reversed() {
        let (mut disp, di) = initialized();
        disp.draw_line(6, 12, 3, 0, Rgb565::RED).unwrap();
        let panel = di.panel();
        assert_eq!(panel.total_writes(), 13);
        assert_eq!(panel.writes_at(6, 12), 1);
        assert_eq!(panel.writes_at(3, 0), 1);
        let rows: BTreeSet<u16> = panel.touched().iter().map(|p| p.1).collect();
        assert_eq!(rows.len(), 13);
    }

    #[test]
    fn diagonal_line() {
        let (mut disp, di) = initialized();
        disp.draw_line(0, 5, 5, 0, Rgb565::RED).unwrap();
        assert_eq!(
            di.panel().touched(),
            vec![(0u16, 5u16), (1, 4), (2, 3), (3, 2), (4, 1), (5, 0)]
        );
    }

    #[test]
    fn line_off_panel_is_cropped() {
        let (mut disp, di) = initialized();
        disp.draw_line(-5, 3, 4, 3, Rgb565::RED).unwrap();
        assert_eq!(
            di.panel().touched(),
            (0..=4u16).map(|x| (x, 3u16)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rect_outline_only() {
        let (mut disp, di) = initialized();
        disp.draw_rect(10, 10, 20, 15, Rgb565::CYAN).unwrap();
        let panel = di.panel();
        for y in 10..=15u16 {
            for x in 10..=20u16 {
                let edge = x == 10 || x == 20 || y == 10 || y == 15;
                assert_eq!(panel.writes_at(x, y) > 0, edge, "pixel ({}, {})", x, y);
            }
        }
        assert!(panel
            .touched()
            .iter()
            .all(|&(x, y)| (10..=20).contains(&x) && (10..=15).contains(&y)));
    }

    #[test]
    fn zero_radius_circle_is_one_point() {
        let (mut disp, di) = initialized();
        disp.draw_circle(40, 50, 0, Rgb565::RED).unwrap();
        let panel = di.panel();
        assert_eq!(panel.touched(), vec![(40u16, 50u16)]);
        assert_eq!(panel.total_writes(), 1);
    }

    #[test]
    fn circle_is_symmetric_and_on_radius() {
        let (mut disp, di) = initialized();
        let (cx, cy, r) = (60i32, 60i32, 10i32);
        disp.draw_circle(cx as i16, cy as i16, r as u16, Rgb565::RED)
            .unwrap();
        let touched: BTreeSet<(i32, i32)> = di
            .panel()
            .touched()
            .iter()
            .map(|&(x, y)| (x as i32 - cx, y as i32 - cy))
            .collect();
        for &(x, y) in touched.iter() {
            assert!(touched.contains(&(-x, y)));
            assert!(touched.contains(&(x, -y)));
            assert!(touched.contains(&(y, x)));
            let d2 = x * x + y * y;
            assert!((r - 1) * (r - 1) < d2 && d2 < (r + 1) * (r + 1));
        }
        for &p in [(r, 0), (-r, 0), (0, r), (0, -r)].iter() {
            assert!(touched.contains(&p));
        }
        // The interior is never touched.
        assert!(!touched.contains(&(0, 0)));
    }

    #[test]
    fn circle_near_edge_is_cropped() {
        let (mut disp, di) = initialized();
        disp.draw_circle(0, 0, 5, Rgb565::RED).unwrap();
        let touched = di.panel().touched();
        assert!(touched.contains(&(5, 0)));
        assert!(touched.contains(&(0, 5)));
        assert!(touched.iter().all(|&(x, y)| x <= 5 && y <= 5));
    }

    #[test]
    fn image_native_order() {
        let (mut disp, di) = initialized();
        let pixels = [Rgb565(0x0102), Rgb565(0x0304), Rgb565(0x0506), Rgb565(0x0708)];
        disp.draw_image(1, 2, 2, 2, &pixels, ByteOrder::Native)
            .unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 1, 0, 2],
            0x2B, [0, 2, 0, 3],
            0x2C, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        ));
    }

    #[test]
    fn image_swapped_order() {
        let (mut disp, di) = initialized();
        let pixels = [Rgb565(0x0102), Rgb565(0x0304)];
        disp.draw_image(0, 0, 2, 1, &pixels, ByteOrder::Swapped)
            .unwrap();
        let sent = di.sent();
        assert_eq!(sent.last(), Some(&Sent::Data(vec![0x02, 0x01, 0x04, 0x03])));
    }

    #[test]
    fn image_extra_pixels_ignored() {
        let (mut disp, di) = initialized();
        let pixels = [Rgb565::RED; 10];
        disp.draw_image(0, 0, 3, 3, &pixels, ByteOrder::Native)
            .unwrap();
        assert_eq!(di.panel().total_writes(), 9);
    }

    #[test]
    fn image_short_buffer() {
        let (mut disp, di) = initialized();
        let pixels = [Rgb565::RED; 8];
        assert_eq!(
            disp.draw_image(0, 0, 3, 3, &pixels, ByteOrder::Native),
            Err(Error::BufferSizeMismatch {
                expected: 9,
                actual: 8
            })
        );
        di.check_multi(sends!());
    }

    #[test]
    fn image_off_panel() {
        let (mut disp, di) = initialized();
        let pixels = [Rgb565::RED; 16];
        assert_eq!(
            disp.draw_image(126, 0, 4, 4, &pixels, ByteOrder::Native),
            Err(Error::InvalidWindow)
        );
        assert_eq!(
            disp.draw_image(0, 0, 0, 4, &pixels, ByteOrder::Native),
            Err(Error::InvalidWindow)
        );
        di.check_multi(sends!());
    }
}
