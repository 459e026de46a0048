//! Full example code for bringing up the GC9107 panel of a LilyGO T-QT (ESP32-S3). The pins come
//! from `gc9107::board::T_QT`, and the bus runs in `board::SPI_MODE`. The backlight on GPIO10 is
//! active low.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::spi;
use esp_hal::time::Rate;
use log::info;

use gc9107::board::T_QT;
use gc9107::{Config, Display, Orientation, Rgb565, SpiInterface};

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let p = esp_hal::init(esp_hal::Config::default());
    let mut delay = Delay::new();

    let dc = Output::new(p.GPIO6, Level::High, OutputConfig::default());
    let cs = Output::new(p.GPIO5, Level::High, OutputConfig::default());
    let rst = Output::new(p.GPIO1, Level::High, OutputConfig::default());
    let _backlight = Output::new(p.GPIO10, Level::Low, OutputConfig::default());

    let spi_cfg = spi::master::Config::default()
        .with_frequency(Rate::from_hz(T_QT.frequency_hz))
        .with_mode(spi::Mode::_3);
    let spi_bus = spi::master::Spi::new(p.SPI2, spi_cfg)
        .unwrap()
        .with_sck(p.GPIO3)
        .with_mosi(p.GPIO2);

    let iface = SpiInterface::new(spi_bus, dc, cs, rst).unwrap();
    let mut disp = Display::new(iface, Config::new().orientation(Orientation::Portrait));
    disp.init(&mut delay).unwrap();
    info!("display initialized.");

    let (w, h) = disp.size();
    disp.fill_rect(0, 0, w as i16, h as i16, Rgb565::BLACK).unwrap();
    disp.draw_rect(0, 0, w as i16 - 1, h as i16 - 1, Rgb565::WHITE).unwrap();
    disp.draw_circle(w as i16 / 2, h as i16 / 2, 40, Rgb565::CYAN).unwrap();
    disp.draw_line(0, 0, w as i16 - 1, h as i16 - 1, Rgb565::RED).unwrap();

    loop {
        delay.delay_millis(1000);
    }
}
