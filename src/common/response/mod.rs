// src/common/response/mod.rs

mod error;
pub mod parse; // Make parse functions public

// Re-export items for external use
pub use error::DecodeError;
pub use parse::{
    parse_calibration_state, parse_export_counts, parse_flag, parse_info, parse_led_state,
    parse_name, parse_output_selection, parse_sample, parse_status, parse_tagged_number,
    parse_toggle,
};

use arrayvec::ArrayString;

/// Size of the driver's receive buffer; the largest read a caller can request.
pub const MAX_RESPONSE_LEN: usize = 128;
/// Read length for ordinary commands.
pub const DEFAULT_READ_LEN: usize = 32;
/// Read length for a single calibration export line.
pub const EXPORT_READ_LEN: usize = 120;
/// Most lines a `?EXPORT` reply may declare.
pub const MAX_EXPORT_LINES: usize = 64;

// --- Wire sentinels ---
pub const NO_DATA: u8 = 0xFF;
pub const STILL_PROCESSING: u8 = 0xFE;
pub const SYNTAX_ERROR: u8 = 0x02;
pub const SUCCESS: u8 = 0x01;
pub const NULL_PADDING: u8 = 0x00;

/// Response text with framing bytes removed.
pub type Payload = ArrayString<MAX_RESPONSE_LEN>;

/// Classification of one raw response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    /// `0xFF` present: the output buffer is empty.
    NoData,
    /// `0xFE` present: the device is busy.
    StillProcessing,
    /// `0x02` present: the command was rejected.
    SyntaxError,
    /// Text payload with every `0x01` and `0x00` stripped.
    Ok(Payload),
}

/// Classifies a raw response. Sentinels are checked in fixed priority order:
/// `0xFF`, then `0xFE`, then `0x02`; the first one found anywhere in `raw` wins.
pub fn decode_response(raw: &[u8]) -> Result<ResponseStatus, DecodeError> {
    if raw.contains(&NO_DATA) {
        return Ok(ResponseStatus::NoData);
    }
    if raw.contains(&STILL_PROCESSING) {
        return Ok(ResponseStatus::StillProcessing);
    }
    if raw.contains(&SYNTAX_ERROR) {
        return Ok(ResponseStatus::SyntaxError);
    }

    let text = core::str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8)?;
    let mut payload = Payload::new();
    for c in text
        .chars()
        .filter(|c| *c != char::from(SUCCESS) && *c != char::from(NULL_PADDING))
    {
        payload.try_push(c).map_err(|_| DecodeError::PayloadTooLong)?;
    }
    Ok(ResponseStatus::Ok(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(text: &str) -> ResponseStatus {
        ResponseStatus::Ok(Payload::from(text).unwrap())
    }

    #[test]
    fn test_success_framing_stripped() {
        let raw = b"\x01?I,EC,2.10\x00\x00\x00\x00";
        assert_eq!(decode_response(raw), Ok(ok("?I,EC,2.10")));
    }

    #[test]
    fn test_embedded_control_bytes_stripped() {
        let raw = b"\x011.0\x00,\x01500\x00";
        let status = decode_response(raw).unwrap();
        match status {
            ResponseStatus::Ok(payload) => {
                assert_eq!(payload.as_str(), "1.0,500");
                assert!(!payload.as_bytes().contains(&SUCCESS));
                assert!(!payload.as_bytes().contains(&NULL_PADDING));
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_all_padding_is_empty_payload() {
        assert_eq!(decode_response(&[0x01, 0, 0, 0]), Ok(ok("")));
        assert_eq!(decode_response(&[]), Ok(ok("")));
    }

    #[test]
    fn test_no_data_has_top_priority() {
        assert_eq!(decode_response(&[0xFF]), Ok(ResponseStatus::NoData));
        assert_eq!(decode_response(&[0x02, 0xFE, 0xFF]), Ok(ResponseStatus::NoData));
        assert_eq!(decode_response(b"\x01abc\xff\x00"), Ok(ResponseStatus::NoData));
        // A full buffer of 0xFF as returned by an idle board.
        assert_eq!(decode_response(&[0xFF; 32]), Ok(ResponseStatus::NoData));
    }

    #[test]
    fn test_still_processing_over_syntax_error() {
        assert_eq!(decode_response(&[0xFE, 0, 0]), Ok(ResponseStatus::StillProcessing));
        assert_eq!(decode_response(&[0x02, 0xFE]), Ok(ResponseStatus::StillProcessing));
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(decode_response(&[0x02, 0, 0, 0]), Ok(ResponseStatus::SyntaxError));
        assert_eq!(decode_response(b"\x01ok\x02"), Ok(ResponseStatus::SyntaxError));
    }

    #[test]
    fn test_sentinel_free_bytes_never_leak_control_bytes() {
        // Every byte sequence drawn from {0x00, 0x01, 'a', ','} decodes without control bytes.
        let alphabet = [0x00u8, 0x01, b'a', b','];
        for a in alphabet {
            for b in alphabet {
                for c in alphabet {
                    for d in alphabet {
                        let raw = [a, b, c, d];
                        match decode_response(&raw).unwrap() {
                            ResponseStatus::Ok(p) => {
                                assert!(!p.as_bytes().iter().any(|x| *x == 0x00 || *x == 0x01));
                                let expected = raw.iter().filter(|x| **x > 0x01).count();
                                assert_eq!(p.len(), expected);
                            }
                            other => panic!("unexpected status {:?}", other),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(decode_response(&[0x01, 0xC3, 0x28]), Err(DecodeError::InvalidUtf8));
    }
}
