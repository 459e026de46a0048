//! Static configuration of the panel: geometry, RAM offsets, power-up timing and the orientation
//! applied at init.

use log::warn;

use crate::command::consts::*;
use crate::command::Orientation;

/// Column and row of controller RAM that correspond to pixel (0, 0) of the panel in portrait
/// orientation. Landscape orientations apply them to the opposite axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Offsets {
    pub col: u16,
    pub row: u16,
}

/// A configuration for the display. Builder methods override the defaults, which describe the
/// 128x128 panel of the LilyGO T-QT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) offsets: Offsets,
    pub(crate) orientation: Orientation,
    pub(crate) reset_delay_ms: u32,
    pub(crate) sleep_delay_ms: u32,
    pub(crate) inverted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            offsets: Offsets {
                col: PANEL_COL_OFFSET,
                row: PANEL_ROW_OFFSET,
            },
            orientation: Orientation::Portrait,
            reset_delay_ms: MIN_RESET_DELAY_MS,
            sleep_delay_ms: MIN_SLEEP_DELAY_MS,
            inverted: true,
        }
    }

    /// Panel size in pixels, in portrait orientation.
    pub fn size(self, width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// RAM offsets of the panel's first column and row. See `Offsets`.
    pub fn offsets(self, col: u16, row: u16) -> Self {
        Self {
            offsets: Offsets { col, row },
            ..self
        }
    }

    /// Orientation written to the controller at the end of `Display::init`.
    pub fn orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// Length of the reset pulse and of the settle time after it.
    pub fn reset_delay_ms(self, ms: u32) -> Self {
        Self {
            reset_delay_ms: ms,
            ..self
        }
    }

    /// Wait after `Display::sleep` and `Display::wake`.
    pub fn sleep_delay_ms(self, ms: u32) -> Self {
        Self {
            sleep_delay_ms: ms,
            ..self
        }
    }

    /// Whether colour inversion is left on after init. The T-QT panel needs it on to show true
    /// colours.
    pub fn inverted(self, inverted: bool) -> Self {
        Self { inverted, ..self }
    }

    /// Raise any delay shorter than the datasheet minimum to that minimum. A shorter delay leaves
    /// the panel blank rather than failing, so it is reported here instead.
    pub(crate) fn clamped(self) -> Self {
        let mut cfg = self;
        if cfg.reset_delay_ms < MIN_RESET_DELAY_MS {
            warn!(
                "reset delay {} ms below minimum, using {} ms",
                cfg.reset_delay_ms, MIN_RESET_DELAY_MS
            );
            cfg.reset_delay_ms = MIN_RESET_DELAY_MS;
        }
        if cfg.sleep_delay_ms < MIN_SLEEP_DELAY_MS {
            warn!(
                "sleep delay {} ms below minimum, using {} ms",
                cfg.sleep_delay_ms, MIN_SLEEP_DELAY_MS
            );
            cfg.sleep_delay_ms = MIN_SLEEP_DELAY_MS;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_t_qt() {
        let cfg = Config::new();
        assert_eq!((cfg.width, cfg.height), (128, 128));
        assert_eq!(cfg.offsets, Offsets { col: 2, row: 1 });
        assert_eq!(cfg.orientation, Orientation::Portrait);
        assert!(cfg.inverted);
    }

    #[test]
    fn builder_overrides() {
        let cfg = Config::new()
            .size(128, 160)
            .offsets(0, 0)
            .orientation(Orientation::Landscape)
            .reset_delay_ms(150)
            .sleep_delay_ms(200)
            .inverted(false);
        assert_eq!((cfg.width, cfg.height), (128, 160));
        assert_eq!(cfg.offsets, Offsets { col: 0, row: 0 });
        assert_eq!(cfg.orientation, Orientation::Landscape);
        assert_eq!(cfg.clamped().reset_delay_ms, 150);
        assert_eq!(cfg.clamped().sleep_delay_ms, 200);
        assert!(!cfg.inverted);
    }

    #[test]
    fn short_delays_are_clamped() {
        let cfg = Config::new().reset_delay_ms(10).sleep_delay_ms(0).clamped();
        assert_eq!(cfg.reset_delay_ms, MIN_RESET_DELAY_MS);
        assert_eq!(cfg.sleep_delay_ms, MIN_SLEEP_DELAY_MS);
    }
}
