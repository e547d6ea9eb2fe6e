// src/common/error.rs

use super::response::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum EzoError<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Io error
{
    /// Underlying I/O error from the transport implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// The bus or address could not be claimed. Fatal to the session.
    #[error("Transport unavailable")]
    TransportUnavailable,

    /// Device answered `0xFF`: nothing in its output buffer.
    #[error("No data in EZO buffer")]
    NoData,

    /// Device answered `0xFE`: the previous command is still running.
    #[error("EZO still processing request")]
    StillProcessing,

    /// Device answered `0x02`: the command was rejected.
    #[error("Command syntax error")]
    SyntaxError,

    /// Payload was malformed or shorter than expected.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Argument rejected, usually before anything was transmitted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// Summed export line lengths disagree with the byte count the device declared.
    #[error("Calibration corrupted during export: declared {declared} bytes, received {received}")]
    CalibrationCorrupted { declared: usize, received: usize },
}

impl<E: core::fmt::Debug> EzoError<E> {
    /// True for the per-call conditions a caller can wait out and re-issue.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EzoError::NoData | EzoError::StillProcessing)
    }
}

/// Arguments the driver refuses to act on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("I2C address {0} outside 1..=127")]
    AddressOutOfRange(u8),

    /// Input was not a boolean. `fallback` is the value that was sent instead.
    #[error("expected a boolean, fell back to {fallback}")]
    NotBoolean { fallback: bool },

    #[error("command does not fit the command buffer")]
    CommandTooLong,

    #[error("read length {requested} exceeds buffer of {max} bytes")]
    ReadLengthTooLarge { requested: usize, max: usize },

    #[error("calibration text has more lines than can be imported")]
    TooManyLines,

    #[error("numeric argument is not finite")]
    NotFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(EzoError::<()>::NoData.is_retryable());
        assert!(EzoError::<()>::StillProcessing.is_retryable());
        assert!(!EzoError::<()>::SyntaxError.is_retryable());
        assert!(!EzoError::<()>::CalibrationCorrupted { declared: 1, received: 2 }.is_retryable());
        assert!(!EzoError::Io(()).is_retryable());
    }

    #[test]
    fn test_conversions() {
        let e: EzoError<()> = InvalidArgument::AddressOutOfRange(200).into();
        assert!(matches!(e, EzoError::InvalidArgument(InvalidArgument::AddressOutOfRange(200))));
        let e: EzoError<()> = DecodeError::InvalidUtf8.into();
        assert!(matches!(e, EzoError::Decode(DecodeError::InvalidUtf8)));
    }
}
