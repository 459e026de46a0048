//! The main API to the display driver: power-up and sleep control, orientation, and the address
//! window through which every pixel reaches frame memory. Drawing primitives live in `draw` and
//! `overscanned`.

pub mod draw;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod overscanned;

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::color::{ByteOrder, Rgb565};
use crate::command::consts::*;
use crate::command::*;
use crate::config::{Config, Offsets};
use crate::error::Error;
use crate::interface;

/// Where the controller is in its power-up sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerState {
    /// Nothing has been sent since construction.
    Uninitialized,
    /// The reset line has been pulsed.
    Resetting,
    /// The vendor register sequence is being written.
    ConfiguringRegisters,
    /// Sleep-out has been issued; panel output is still off.
    SleepOut,
    /// The panel is scanning frame memory.
    DisplayOn,
    /// Sleep-in has been issued; frame memory is retained but not shown.
    Sleeping,
}

/// A driver for a GC9107 panel.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    config: Config,
    orientation: Orientation,
    state: PowerState,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for the panel described by `config`, connected to `iface`.
    /// Nothing is sent until `init` or `reset` is called.
    ///
    /// Panics if the panel is empty, or if it does not fit controller frame memory once the RAM
    /// offsets are added.
    pub fn new(iface: DI, config: Config) -> Self {
        let Offsets { col, row } = config.offsets;
        if false
            || config.width == 0
            || config.height == 0
            || u32::from(config.width) + u32::from(col) > u32::from(RAM_COLUMNS)
            || u32::from(config.height) + u32::from(row) > u32::from(RAM_ROWS)
        {
            panic!("Display size or RAM offset not supported by GC9107.");
        }
        let config = config.clamped();
        Display {
            iface,
            orientation: config.orientation,
            config,
            state: PowerState::Uninitialized,
        }
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Width and height of the logical coordinate space in the current orientation.
    pub fn size(&self) -> (u16, u16) {
        if self.orientation.is_landscape() {
            (self.config.height, self.config.width)
        } else {
            (self.config.width, self.config.height)
        }
    }

    /// Reset, run the power-up register sequence, and apply the configured orientation.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayNs,
    {
        self.reset(delay)?;
        self.init_registers(delay)?;
        self.set_orientation(self.config.orientation)
    }

    /// Pulse the hardware reset line, holding it and then waiting for the controller to settle.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayNs,
    {
        debug!("gc9107: hardware reset");
        self.state = PowerState::Resetting;
        self.iface.set_reset(true).map_err(Error::Interface)?;
        delay.delay_ms(self.config.reset_delay_ms);
        self.iface.set_reset(false).map_err(Error::Interface)?;
        delay.delay_ms(self.config.reset_delay_ms);
        Ok(())
    }

    /// Write the panel vendor's power-up sequence, leave sleep and turn the display on. The
    /// order and the delays are mandatory; the panel stays blank if either is cut short.
    pub fn init_registers<D>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayNs,
    {
        debug!("gc9107: writing power-on registers");
        self.state = PowerState::ConfiguringRegisters;
        Command::InterRegisterEnable1.send(&mut self.iface)?;
        Command::InterRegisterEnable2.send(&mut self.iface)?;
        for cmd in POWER_ON_REGISTERS.iter() {
            cmd.send(&mut self.iface)?;
        }
        BufCommand::SetPositiveGamma(&POSITIVE_GAMMA).send(&mut self.iface)?;
        BufCommand::SetNegativeGamma(&NEGATIVE_GAMMA).send(&mut self.iface)?;
        Command::SetInversion(self.config.inverted).send(&mut self.iface)?;
        delay.delay_ms(POWER_ON_DELAY_MS);

        Command::SleepOut.send(&mut self.iface)?;
        self.state = PowerState::SleepOut;
        delay.delay_ms(POWER_ON_DELAY_MS);

        Command::SetDisplayOn(true).send(&mut self.iface)?;
        self.state = PowerState::DisplayOn;
        delay.delay_ms(POWER_ON_DELAY_MS);
        debug!("gc9107: display on");
        Ok(())
    }

    /// Rotate the logical coordinate system. Every later address window is computed for the new
    /// orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), Error<DI::Error>> {
        debug!("gc9107: orientation {:?}", orientation);
        Command::SetOrientation(orientation).send(&mut self.iface)?;
        self.orientation = orientation;
        Ok(())
    }

    /// Control colour inversion.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<DI::Error>> {
        Command::SetInversion(inverted).send(&mut self.iface)
    }

    /// Enter sleep. Frame memory is kept; call `wake` to show it again.
    pub fn sleep<D>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayNs,
    {
        debug!("gc9107: sleep in");
        Command::SleepIn.send(&mut self.iface)?;
        self.state = PowerState::Sleeping;
        delay.delay_ms(self.config.sleep_delay_ms);
        Ok(())
    }

    /// Leave sleep.
    pub fn wake<D>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayNs,
    {
        debug!("gc9107: sleep out");
        Command::SleepOut.send(&mut self.iface)?;
        delay.delay_ms(self.config.sleep_delay_ms.max(POWER_ON_DELAY_MS));
        self.state = PowerState::DisplayOn;
        Ok(())
    }

    /// Address the inclusive rectangle (x1, y1)-(x2, y2) in logical coordinates and start a memory
    /// write. Pixels streamed afterwards fill the window row by row.
    pub fn set_address_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), Error<DI::Error>> {
        let (width, height) = self.size();
        if x1 > x2 || y1 > y2 || x2 >= width || y2 >= height {
            return Err(Error::InvalidWindow);
        }

        // Landscape orientations exchange the RAM axes, so the offsets swap with them.
        let offsets = self.config.offsets;
        let (col_offset, row_offset) = if self.orientation.is_landscape() {
            (offsets.row, offsets.col)
        } else {
            (offsets.col, offsets.row)
        };
        trace!("gc9107: window ({}, {})-({}, {})", x1, y1, x2, y2);
        Command::SetColumnAddress(x1 + col_offset, x2 + col_offset).send(&mut self.iface)?;
        Command::SetRowAddress(y1 + row_offset, y2 + row_offset).send(&mut self.iface)?;
        BufCommand::WriteMemory(&[]).send(&mut self.iface)
    }

    /// Stream the first `count` colours of `buffer` into the window addressed last, without
    /// re-addressing. Used to continue a window that was partially filled by an earlier call.
    pub fn push_colors(&mut self, buffer: &[Rgb565], count: usize) -> Result<(), Error<DI::Error>> {
        if buffer.len() < count {
            return Err(Error::BufferSizeMismatch {
                expected: count,
                actual: buffer.len(),
            });
        }
        self.stream(buffer[..count].iter().map(|c| c.to_wire(ByteOrder::Native)))
    }

    /// Check an inclusive rectangle given in signed logical coordinates against the panel bounds.
    pub(crate) fn window(
        &self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Result<(u16, u16, u16, u16), Error<DI::Error>> {
        let (width, height) = self.size();
        if false
            || x1 < 0
            || y1 < 0
            || x1 > x2
            || y1 > y2
            || x2 >= width as i32
            || y2 >= height as i32
        {
            return Err(Error::InvalidWindow);
        }
        Ok((x1 as u16, y1 as u16, x2 as u16, y2 as u16))
    }

    pub(crate) fn stream<I>(&mut self, pixels: I) -> Result<(), Error<DI::Error>>
    where
        I: IntoIterator<Item = [u8; 2]>,
    {
        self.iface.send_pixels(pixels).map_err(Error::Interface)
    }
}
