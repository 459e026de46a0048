//! Transports that carry commands and pixel data to the controller.

/// Bytes buffered per bus write when streaming pixels.
pub const CHUNK_BYTES: usize = 64;

pub trait DisplayInterface {
    type Error: core::fmt::Debug;

    /// Send a single command byte with the D/C line low.
    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Send parameter or image bytes with the D/C line high, as one burst.
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

    /// Send one 16-bit parameter, most significant byte first.
    fn send_data_word(&mut self, word: u16) -> Result<(), Self::Error> {
        self.send_data(&word.to_be_bytes())
    }

    /// Stream pixels that are already in wire byte order into the addressed window.
    fn send_pixels<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = [u8; 2]>,
    {
        write_chunked(pixels, |chunk| self.send_data(chunk))
    }

    /// Drive the active-low reset line. `true` holds the controller in reset.
    fn set_reset(&mut self, asserted: bool) -> Result<(), Self::Error>;
}

/// Pack pixels into a fixed-size buffer and hand each filled chunk to `write`, so that streams of
/// any length run in constant memory.
pub(crate) fn write_chunked<I, F, E>(pixels: I, mut write: F) -> Result<(), E>
where
    I: IntoIterator<Item = [u8; 2]>,
    F: FnMut(&[u8]) -> Result<(), E>,
{
    let mut pixels = pixels.into_iter();
    let mut buf = [0u8; CHUNK_BYTES];
    loop {
        let mut chunk_len = 0;
        while chunk_len < buf.len() {
            match pixels.next() {
                Some([hi, lo]) => {
                    buf[chunk_len] = hi;
                    buf[chunk_len + 1] = lo;
                    chunk_len += 2;
                }
                None => break,
            }
        }
        if chunk_len > 0 {
            write(&buf[..chunk_len])?;
        }
        // A short chunk means the iterator ran dry.
        if chunk_len != buf.len() {
            return Ok(());
        }
    }
}

pub mod spi {
    //! The "4-wire" SPI interface: SCLK and MOSI on the bus, plus chip-select, data/command and
    //! reset GPIOs driven by this module.
    //!
    //! The bus must be configured by the HAL for MSB-first transfers in `board::SPI_MODE`. Chip
    //! select is managed here rather than by an `SpiDevice`, because the controller requires D/C
    //! to settle before chip select falls. Between frames D/C rests high (data mode).

    use embedded_hal::digital::OutputPin;
    use embedded_hal::spi::SpiBus;

    use super::{write_chunked, DisplayInterface};

    /// Failure of either the SPI bus or one of the control pins.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum InterfaceError<S, P> {
        Spi(S),
        Pin(P),
    }

    /// Level of the D/C line for one frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Frame {
        Command,
        Data,
    }

    pub struct SpiInterface<SPI, DC, CS, RST> {
        /// The SPI bus the controller is attached to.
        spi: SPI,
        /// Data/command select, low for command bytes.
        dc: DC,
        /// Active-low chip select.
        cs: CS,
        /// Active-low hardware reset.
        rst: RST,
    }

    /// Error type of an `SpiInterface` built from `SPI` and pins sharing `DC`'s error type.
    pub type ErrorOf<SPI, DC> = InterfaceError<
        <SPI as embedded_hal::spi::ErrorType>::Error,
        <DC as embedded_hal::digital::ErrorType>::Error,
    >;

    impl<SPI, DC, CS, RST> SpiInterface<SPI, DC, CS, RST>
    where
        SPI: SpiBus<u8>,
        DC: OutputPin,
        CS: OutputPin<Error = DC::Error>,
        RST: OutputPin<Error = DC::Error>,
    {
        /// Take ownership of the bus and control pins, and park them idle: chip deselected, D/C
        /// high, reset released.
        pub fn new(
            spi: SPI,
            mut dc: DC,
            mut cs: CS,
            mut rst: RST,
        ) -> Result<Self, ErrorOf<SPI, DC>> {
            dc.set_high().map_err(InterfaceError::Pin)?;
            cs.set_high().map_err(InterfaceError::Pin)?;
            rst.set_high().map_err(InterfaceError::Pin)?;
            Ok(Self { spi, dc, cs, rst })
        }

        /// Open a transaction. D/C is driven for `frame` first, then chip select is asserted. The
        /// returned guard owns the bus until it is finished or dropped.
        pub fn transaction(
            &mut self,
            frame: Frame,
        ) -> Result<Transaction<'_, SPI, DC, CS, RST>, ErrorOf<SPI, DC>> {
            let dc = match frame {
                Frame::Command => self.dc.set_low(),
                Frame::Data => self.dc.set_high(),
            };
            dc.map_err(InterfaceError::Pin)?;
            self.cs.set_low().map_err(InterfaceError::Pin)?;
            Ok(Transaction {
                iface: self,
                open: true,
            })
        }

        /// Give back the bus and pins.
        pub fn release(self) -> (SPI, DC, CS, RST) {
            (self.spi, self.dc, self.cs, self.rst)
        }
    }

    /// Exclusive use of the bus with the chip selected. Chip select is released when the guard is
    /// finished or dropped, including on early return through `?`.
    pub struct Transaction<'a, SPI, DC, CS, RST>
    where
        SPI: SpiBus<u8>,
        DC: OutputPin,
        CS: OutputPin<Error = DC::Error>,
        RST: OutputPin<Error = DC::Error>,
    {
        iface: &'a mut SpiInterface<SPI, DC, CS, RST>,
        open: bool,
    }

    impl<'a, SPI, DC, CS, RST> Transaction<'a, SPI, DC, CS, RST>
    where
        SPI: SpiBus<u8>,
        DC: OutputPin,
        CS: OutputPin<Error = DC::Error>,
        RST: OutputPin<Error = DC::Error>,
    {
        pub fn send_byte(&mut self, byte: u8) -> Result<(), ErrorOf<SPI, DC>> {
            self.send_burst(&[byte])
        }

        /// Send a 16-bit word, most significant byte first.
        pub fn send_word(&mut self, word: u16) -> Result<(), ErrorOf<SPI, DC>> {
            self.send_burst(&word.to_be_bytes())
        }

        pub fn send_burst(&mut self, bytes: &[u8]) -> Result<(), ErrorOf<SPI, DC>> {
            self.iface.spi.write(bytes).map_err(InterfaceError::Spi)
        }

        /// Wait for the bus to drain and deselect the chip, reporting any failure.
        pub fn finish(mut self) -> Result<(), ErrorOf<SPI, DC>> {
            self.close()
        }

        fn close(&mut self) -> Result<(), ErrorOf<SPI, DC>> {
            if !self.open {
                return Ok(());
            }
            self.open = false;
            let flushed = self.iface.spi.flush().map_err(InterfaceError::Spi);
            let deselected = self.iface.cs.set_high().map_err(InterfaceError::Pin);
            flushed.and(deselected)
        }
    }

    impl<'a, SPI, DC, CS, RST> Drop for Transaction<'a, SPI, DC, CS, RST>
    where
        SPI: SpiBus<u8>,
        DC: OutputPin,
        CS: OutputPin<Error = DC::Error>,
        RST: OutputPin<Error = DC::Error>,
    {
        fn drop(&mut self) {
            // Errors here were either already reported by the write that failed or are
            // reported by `finish`.
            let _ = self.close();
        }
    }

    impl<SPI, DC, CS, RST> DisplayInterface for SpiInterface<SPI, DC, CS, RST>
    where
        SPI: SpiBus<u8>,
        DC: OutputPin,
        CS: OutputPin<Error = DC::Error>,
        RST: OutputPin<Error = DC::Error>,
    {
        type Error = ErrorOf<SPI, DC>;

        fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
            let mut t = self.transaction(Frame::Command)?;
            t.send_byte(cmd)?;
            t.finish()?;
            // Between frames D/C rests high, as after `new`.
            self.dc.set_high().map_err(InterfaceError::Pin)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            let mut t = self.transaction(Frame::Data)?;
            t.send_burst(buf)?;
            t.finish()
        }

        fn send_data_word(&mut self, word: u16) -> Result<(), Self::Error> {
            let mut t = self.transaction(Frame::Data)?;
            t.send_word(word)?;
            t.finish()
        }

        fn send_pixels<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = [u8; 2]>,
        {
            // The whole stream is one burst; chip select stays low across chunks.
            let mut t = self.transaction(Frame::Data)?;
            write_chunked(pixels, |chunk| t.send_burst(chunk))?;
            t.finish()
        }

        fn set_reset(&mut self, asserted: bool) -> Result<(), Self::Error> {
            let rst = if asserted {
                self.rst.set_low()
            } else {
                self.rst.set_high()
            };
            rst.map_err(InterfaceError::Pin)
        }
    }

}
