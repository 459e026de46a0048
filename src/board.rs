//! Pin assignments and bus settings of boards carrying the panel. The driver itself never reads
//! these; they are consumed by the application when it builds the HAL's SPI bus and pins.

use embedded_hal::spi::{Mode, MODE_3};

/// The panel samples on the rising edge with the clock idling high.
pub const SPI_MODE: Mode = MODE_3;

/// GPIO numbers and bus clock for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub clk: u8,
    pub mosi: u8,
    pub cs: u8,
    pub dc: u8,
    pub rst: u8,
    pub backlight: u8,
    pub frequency_hz: u32,
}

/// LilyGO T-QT (ESP32-S3).
pub const T_QT: BoardConfig = BoardConfig {
    clk: 3,
    mosi: 2,
    cs: 5,
    dc: 6,
    rst: 1,
    backlight: 10,
    frequency_hz: 80_000_000,
};

impl BoardConfig {
    /// The same board clocked at a different SPI frequency.
    pub const fn with_frequency(self, frequency_hz: u32) -> Self {
        BoardConfig {
            frequency_hz,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{Phase, Polarity};

    #[test]
    fn spi_mode_is_3() {
        assert_eq!(SPI_MODE.polarity, Polarity::IdleHigh);
        assert_eq!(SPI_MODE.phase, Phase::CaptureOnSecondTransition);
    }

    #[test]
    fn frequency_override_keeps_pins() {
        let slow = T_QT.with_frequency(27_000_000);
        assert_eq!(slow.frequency_hz, 27_000_000);
        assert_eq!(BoardConfig { frequency_hz: T_QT.frequency_hz, ..slow }, T_QT);
    }
}
