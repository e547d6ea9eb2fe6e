// src/common/response/error.rs

/// Error type specific to decoding and parsing EZO responses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Response bytes were not valid UTF-8.
    #[error("response is not valid UTF-8")]
    InvalidUtf8,
    /// Payload did not fit the driver's response buffer.
    #[error("payload too long")]
    PayloadTooLong,
    /// Fewer comma-delimited fields than the response format requires.
    #[error("missing field at position {index}")]
    MissingField { index: usize },
    /// More comma-delimited fields than the driver can hold.
    #[error("too many fields")]
    TooManyFields,
    /// Leading `?TAG` did not name the command that was issued.
    #[error("unexpected response tag")]
    UnexpectedTag,
    /// Field was expected to be a number and was not.
    #[error("field {index} is not a number")]
    InvalidNumber { index: usize },
    /// Field held a code outside the documented set.
    #[error("unexpected value in field {index}")]
    UnexpectedValue { index: usize },
    /// Text field longer than the driver stores.
    #[error("field {index} too long")]
    TokenTooLong { index: usize },
}
