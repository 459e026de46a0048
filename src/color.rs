//! 16-bit pixel colours as understood by the panel in its 16 bits/pixel mode.

/// A 5-6-5 packed RGB colour. The panel receives the packed value most significant byte first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);
    pub const CYAN: Rgb565 = Rgb565(0x07FF);
    pub const MAGENTA: Rgb565 = Rgb565(0xF81F);

    /// Pack 8-bit channels, discarding the low bits of each.
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Rgb565(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// The two bytes of this colour in the order the panel expects them on the wire.
    pub const fn to_wire(self, order: ByteOrder) -> [u8; 2] {
        match order {
            ByteOrder::Native => self.0.to_be_bytes(),
            ByteOrder::Swapped => self.0.to_le_bytes(),
        }
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Rgb565(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}

/// How the bytes of a caller's pixel buffer relate to the wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Each pixel is a native 16-bit value and is sent most significant byte first.
    Native,
    /// The buffer was produced with the opposite endianness (e.g. a little-endian image dump
    /// read back as words), so the two bytes of every pixel are exchanged before sending.
    Swapped,
}
