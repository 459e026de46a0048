//! The command set of the GC9107.
//!
//! Every command is a single byte sent with D/C low, followed by zero or more parameter bytes sent
//! with D/C high. Address parameters are 16-bit and travel most significant byte first.

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    //! Panel geometry and timing limits.

    /// Width of the T-QT panel in pixels.
    pub const PANEL_WIDTH: u16 = 128;
    /// Height of the T-QT panel in pixels.
    pub const PANEL_HEIGHT: u16 = 128;
    /// Column of controller RAM wired to the panel's first pixel column.
    pub const PANEL_COL_OFFSET: u16 = 2;
    /// Row of controller RAM wired to the panel's first pixel row.
    pub const PANEL_ROW_OFFSET: u16 = 1;

    /// Columns of controller frame memory. Panel width plus column offset must fit.
    pub const RAM_COLUMNS: u16 = 132;
    /// Rows of controller frame memory. Panel height plus row offset must fit.
    pub const RAM_ROWS: u16 = 162;

    /// Shortest reset pulse, and shortest settle time after releasing reset, in milliseconds.
    pub const MIN_RESET_DELAY_MS: u32 = 100;
    /// Settle time after inversion-on, sleep-out and display-on during power up, in milliseconds.
    pub const POWER_ON_DELAY_MS: u32 = 120;
    /// Shortest wait after entering or leaving sleep, in milliseconds.
    pub const MIN_SLEEP_DELAY_MS: u32 = 100;

    /// MADCTL bits.
    pub const MADCTL_MY: u8 = 0x80;
    pub const MADCTL_MX: u8 = 0x40;
    pub const MADCTL_MV: u8 = 0x20;
    pub const MADCTL_ML: u8 = 0x10;
    pub const MADCTL_BGR: u8 = 0x08;
    pub const MADCTL_MH: u8 = 0x04;
}

use self::consts::*;

/// Orientation of the logical coordinate system relative to the panel glass. Selects the
/// memory-access-control register value and which RAM offset applies to which axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// 0°, the panel's native scan order.
    Portrait,
    /// 90°, rows and columns exchanged.
    Landscape,
    /// 180°.
    InvertedPortrait,
    /// 270°, rows and columns exchanged.
    InvertedLandscape,
}

impl Orientation {
    /// Orientation from its rotation index, taken modulo 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Orientation::Portrait,
            1 => Orientation::Landscape,
            2 => Orientation::InvertedPortrait,
            _ => Orientation::InvertedLandscape,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Orientation::Portrait => 0,
            Orientation::Landscape => 1,
            Orientation::InvertedPortrait => 2,
            Orientation::InvertedLandscape => 3,
        }
    }

    /// Whether the logical axes are exchanged with respect to the panel's native axes.
    pub fn is_landscape(self) -> bool {
        self.index() % 2 == 1
    }

    /// The memory-access-control register value. The panel is wired BGR, so that bit is always
    /// set.
    pub fn madctl(self) -> u8 {
        match self {
            Orientation::Portrait => MADCTL_BGR,
            Orientation::Landscape => MADCTL_MX | MADCTL_MV | MADCTL_BGR,
            Orientation::InvertedPortrait => MADCTL_MX | MADCTL_MY | MADCTL_BGR,
            Orientation::InvertedLandscape => MADCTL_MV | MADCTL_MY | MADCTL_BGR,
        }
    }
}

/// Setting of the interface pixel format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 12 bits per pixel, 4-4-4.
    Bits12,
    /// 16 bits per pixel, 5-6-5.
    Bits16,
    /// 18 bits per pixel, 6-6-6 in three bytes.
    Bits18,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Enter sleep: the panel stops scanning and the booster shuts down. Wait before any further
    /// sleep transition.
    SleepIn,
    /// Leave sleep. The panel needs 120 ms before it accepts a display-on.
    SleepOut,
    /// Show frame memory with inverted colours, or not.
    SetInversion(bool),
    /// Turn panel output off or on without touching frame memory.
    SetDisplayOn(bool),
    /// Set the inclusive column range (in RAM addresses) of subsequent memory writes, and move the
    /// column pointer to its start.
    SetColumnAddress(u16, u16),
    /// Set the inclusive row range (in RAM addresses) of subsequent memory writes, and move the
    /// row pointer to its start.
    SetRowAddress(u16, u16),
    /// Set the memory access order and colour order for the given orientation.
    SetOrientation(Orientation),
    /// Set the interface pixel format.
    SetPixelFormat(PixelFormat),
    /// Inter-register enable 1 (FEh). Must precede any write to the vendor registers.
    InterRegisterEnable1,
    /// Inter-register enable 2 (EFh).
    InterRegisterEnable2,
    /// Write one parameter byte to a vendor register (power, VCOM, frame rate and similar). The
    /// meaning of these is panel-specific and only documented by the panel vendor's init code.
    SetRegister(u8, u8),
}

pub enum BufCommand<'buf> {
    /// Set the positive-polarity gamma curve. Exactly 14 bytes.
    SetPositiveGamma(&'buf [u8]),
    /// Set the negative-polarity gamma curve. Exactly 14 bytes.
    SetNegativeGamma(&'buf [u8]),
    /// Start writing frame memory at the window set by `SetColumnAddress` and `SetRowAddress`.
    /// Pixel data following the command fills the window row by row.
    WriteMemory(&'buf [u8]),
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr,[]) => {
        Ok(($cmd, &$buf[..0]))
    };
    ($buf:ident, $cmd:expr,[$arg0:expr]) => {{
        $buf[0] = $arg0;
        Ok(($cmd, &$buf[..1]))
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr, $arg1:expr]) => {{
        let [a0, a1] = u16::to_be_bytes($arg0);
        let [a2, a3] = u16::to_be_bytes($arg1);
        $buf[0] = a0;
        $buf[1] = a1;
        $buf[2] = a2;
        $buf[3] = a3;
        Ok(($cmd, &$buf[..4]))
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut arg_buf = [0u8; 4];
        let encoded: Result<(u8, &[u8]), Error<DI::Error>> = match self {
            Command::SleepIn => ok_command!(arg_buf, 0x10, []),
            Command::SleepOut => ok_command!(arg_buf, 0x11, []),
            Command::SetInversion(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0x21,
                    false => 0x20,
                },
                []
            ),
            Command::SetDisplayOn(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0x29,
                    false => 0x28,
                },
                []
            ),
            Command::SetColumnAddress(start, end) => match (start, end) {
                (start, end) if start <= end => ok_command!(arg_buf, 0x2A, [start, end]),
                _ => Err(Error::InvalidWindow),
            },
            Command::SetRowAddress(start, end) => match (start, end) {
                (start, end) if start <= end => ok_command!(arg_buf, 0x2B, [start, end]),
                _ => Err(Error::InvalidWindow),
            },
            Command::SetOrientation(orientation) => {
                ok_command!(arg_buf, 0x36, [orientation.madctl()])
            }
            Command::SetPixelFormat(format) => {
                let f = match format {
                    PixelFormat::Bits12 => 0x03,
                    PixelFormat::Bits16 => 0x05,
                    PixelFormat::Bits18 => 0x06,
                };
                ok_command!(arg_buf, 0x3A, [f])
            }
            Command::InterRegisterEnable1 => ok_command!(arg_buf, 0xFE, []),
            Command::InterRegisterEnable2 => ok_command!(arg_buf, 0xEF, []),
            Command::SetRegister(reg, value) => ok_command!(arg_buf, reg, [value]),
        };
        let (cmd, data) = encoded?;
        iface.send_command(cmd).map_err(Error::Interface)?;
        if data.is_empty() {
            Ok(())
        } else {
            iface.send_data(data).map_err(Error::Interface)
        }
    }
}

impl<'a> BufCommand<'a> {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let encoded: Result<(u8, &[u8]), Error<DI::Error>> = match self {
            BufCommand::SetPositiveGamma(table) => match table.len() {
                GAMMA_LEN => Ok((0xF0, table)),
                actual => Err(Error::BufferSizeMismatch {
                    expected: GAMMA_LEN,
                    actual,
                }),
            },
            BufCommand::SetNegativeGamma(table) => match table.len() {
                GAMMA_LEN => Ok((0xF1, table)),
                actual => Err(Error::BufferSizeMismatch {
                    expected: GAMMA_LEN,
                    actual,
                }),
            },
            BufCommand::WriteMemory(buf) => Ok((0x2C, buf)),
        };
        let (cmd, data) = encoded?;
        iface.send_command(cmd).map_err(Error::Interface)?;
        if data.is_empty() {
            Ok(())
        } else {
            iface.send_data(data).map_err(Error::Interface)
        }
    }
}

/// Number of parameter bytes in each gamma table.
pub const GAMMA_LEN: usize = 14;

/// Vendor register writes that follow the inter-register enables in the power-on sequence, in
/// the order the panel vendor issues them.
pub const POWER_ON_REGISTERS: [Command; 16] = [
    Command::SetRegister(0xB0, 0xC0),
    Command::SetRegister(0xB2, 0x27),
    Command::SetRegister(0xB3, 0x03),
    Command::SetRegister(0xB7, 0x01),
    Command::SetRegister(0xB6, 0x19),
    Command::SetRegister(0xAC, 0xDB),
    Command::SetRegister(0xAB, 0x0F),
    Command::SetPixelFormat(PixelFormat::Bits16),
    Command::SetRegister(0xB4, 0x04),
    Command::SetRegister(0xA8, 0x0C),
    Command::SetRegister(0xB8, 0x08),
    Command::SetRegister(0xEA, 0x0E),
    Command::SetRegister(0xE8, 0x2A),
    Command::SetRegister(0xE9, 0x46),
    Command::SetRegister(0xC6, 0x25),
    Command::SetRegister(0xC7, 0x10),
];

pub const POSITIVE_GAMMA: [u8; GAMMA_LEN] = [
    0x09, 0x32, 0x29, 0x46, 0xC9, 0x37, 0x33, 0x60, 0x00, 0x14, 0x0A, 0x16, 0x10, 0x1F,
];

pub const NEGATIVE_GAMMA: [u8; GAMMA_LEN] = [
    0x15, 0x28, 0x5D, 0x3F, 0xC8, 0x16, 0x3F, 0x60, 0x0A, 0x06, 0x0D, 0x1F, 0x1C, 0x10,
];
