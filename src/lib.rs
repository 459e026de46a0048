//! Driver library for the GalaxyCore GC9107 TFT display controller, as found on square 128x128
//! SPI panels.

#![cfg_attr(not(feature = "std"), no_std)]

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
mod testing {
    macro_rules! send {
        ([$($d:tt),*]) => {Sent::Data(vec![$($d,)*])};
        ($c:tt) => {Sent::Cmd($c)};
    }
    macro_rules! sends {
        ($($e:tt),*) => {&[$(send!($e),)*]};
    }
}

pub mod board;
pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod interface;

// Re-exports for primary API.
pub use color::{ByteOrder, Rgb565};
pub use command::{consts, Orientation};
pub use config::Config;
pub use display::{Display, PowerState};
pub use error::Error;
pub use interface::spi::SpiInterface;
pub use interface::DisplayInterface;
