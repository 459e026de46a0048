//! Errors reported by the driver at its API boundary.

use core::fmt;

/// Errors returned by `Display` and `Command` operations. `E` is the error type of the
/// underlying `DisplayInterface`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The transport failed while clocking out a command or data.
    Interface(E),
    /// The requested rectangle is inverted or lies outside the addressable area of the panel in
    /// its current orientation.
    InvalidWindow,
    /// The caller supplied fewer pixels than the addressed window requires.
    BufferSizeMismatch { expected: usize, actual: usize },
    /// The bus is held by another master. Only reported by transports that can detect it; the
    /// whole operation (address window and pixel stream) may be retried.
    BusBusy,
    /// A transfer did not complete in time. Only reported by transports that can detect it; the
    /// panel write pointer is undefined afterwards, so retry the whole operation.
    BusTimeout,
}

impl<E> Error<E> {
    /// Whether retrying the whole operation can be expected to succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::BusBusy | Error::BusTimeout)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::InvalidWindow => f.write_str("address window out of bounds or inverted"),
            Error::BufferSizeMismatch { expected, actual } => write!(
                f,
                "pixel buffer too short: expected {} pixels, got {}",
                expected, actual
            ),
            Error::BusBusy => f.write_str("bus busy"),
            Error::BusTimeout => f.write_str("bus transfer timed out"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bus_faults_are_recoverable() {
        assert!(Error::<()>::BusBusy.is_recoverable());
        assert!(Error::<()>::BusTimeout.is_recoverable());
        assert!(!Error::<()>::InvalidWindow.is_recoverable());
        assert!(!Error::Interface(()).is_recoverable());
    }

    #[test]
    fn display_messages() {
        let e: Error<()> = Error::BufferSizeMismatch {
            expected: 9,
            actual: 4,
        };
        assert_eq!(
            e.to_string(),
            "pixel buffer too short: expected 9 pixels, got 4"
        );
        assert_eq!(
            Error::Interface("nack").to_string(),
            "display interface error: \"nack\""
        );
    }
}
