// src/common/response/parse.rs

use super::{error::DecodeError, EXPORT_READ_LEN, MAX_EXPORT_LINES};

use crate::common::types::{
    CalibrationState, DeviceInfo, DeviceStatus, ExportCounts, LedState, OutputField,
    OutputSelection, RestartReason, MAX_SAMPLE_VALUES, MAX_TOKEN_LEN,
};

use arrayvec::{ArrayString, ArrayVec};
use core::str::FromStr;

/// Most comma-delimited fields any response carries (labelled four-field sample).
const MAX_FIELDS: usize = 16;

// --- Internal Helpers ---

/// Comma-split view of one payload with bounds-checked access.
struct Fields<'a> {
    parts: ArrayVec<&'a str, MAX_FIELDS>,
}

impl<'a> Fields<'a> {
    fn split(payload: &'a str) -> Result<Self, DecodeError> {
        let mut parts = ArrayVec::new();
        for part in payload.split(',') {
            parts.try_push(part.trim()).map_err(|_| DecodeError::TooManyFields)?;
        }
        Ok(Fields { parts })
    }

    /// Splits and checks that field 0 is `tag` (compared case-insensitively;
    /// firmware revisions differ on `?STATUS` vs `?Status`).
    fn tagged(payload: &'a str, tag: &str) -> Result<Self, DecodeError> {
        let fields = Self::split(payload)?;
        if !fields.get(0)?.eq_ignore_ascii_case(tag) {
            return Err(DecodeError::UnexpectedTag);
        }
        Ok(fields)
    }

    fn get(&self, index: usize) -> Result<&'a str, DecodeError> {
        self.parts
            .get(index)
            .copied()
            .ok_or(DecodeError::MissingField { index })
    }

    fn number<T: FromStr>(&self, index: usize) -> Result<T, DecodeError> {
        self.get(index)?
            .parse()
            .map_err(|_| DecodeError::InvalidNumber { index })
    }

    /// Like `number`, but `inf` and `NaN` are not readings.
    fn finite(&self, index: usize) -> Result<f64, DecodeError> {
        let value: f64 = self.number(index)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(DecodeError::InvalidNumber { index })
        }
    }

    fn text(&self, index: usize) -> Result<ArrayString<MAX_TOKEN_LEN>, DecodeError> {
        ArrayString::from(self.get(index)?).map_err(|_| DecodeError::TokenTooLong { index })
    }

    fn len(&self) -> usize {
        self.parts.len()
    }
}

// --- Public Parsing Functions ---

/// `?I,<type>,<firmware>`
pub fn parse_info(payload: &str) -> Result<DeviceInfo, DecodeError> {
    let fields = Fields::tagged(payload, "?I")?;
    Ok(DeviceInfo {
        device_type: fields.text(1)?,
        firmware: fields.finite(2)?,
    })
}

/// `?STATUS,<code>,<vcc>`
pub fn parse_status(payload: &str) -> Result<DeviceStatus, DecodeError> {
    let fields = Fields::tagged(payload, "?STATUS")?;
    let code_field = fields.get(1)?;
    let mut chars = code_field.chars();
    let restart_code = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(DecodeError::UnexpectedValue { index: 1 }),
    };
    Ok(DeviceStatus {
        restart_code,
        restart_reason: RestartReason::from_code(restart_code),
        vcc: fields.finite(2)?,
    })
}

/// `?NAME,<name>`; the name may be empty.
pub fn parse_name(payload: &str) -> Result<ArrayString<MAX_TOKEN_LEN>, DecodeError> {
    Fields::tagged(payload, "?NAME")?.text(1)
}

/// `?L,<0|1>`
pub fn parse_led_state(payload: &str) -> Result<LedState, DecodeError> {
    Ok(if parse_flag(payload, "?L")? {
        LedState::On
    } else {
        LedState::Off
    })
}

/// `?CAL,<0|1|2>`
pub fn parse_calibration_state(payload: &str) -> Result<CalibrationState, DecodeError> {
    let fields = Fields::tagged(payload, "?CAL")?;
    match fields.get(1)? {
        "0" => Ok(CalibrationState::None),
        "1" => Ok(CalibrationState::SinglePoint),
        "2" => Ok(CalibrationState::TwoPoint),
        _ => Err(DecodeError::UnexpectedValue { index: 1 }),
    }
}

/// `?<TAG>,<0|1>` for the boolean queries (`?L`, `?PLOCK`, `?*OK`).
pub fn parse_flag(payload: &str, tag: &str) -> Result<bool, DecodeError> {
    let fields = Fields::tagged(payload, tag)?;
    match fields.get(1)? {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(DecodeError::UnexpectedValue { index: 1 }),
    }
}

/// `?<TAG>,<number>` for the numeric queries (`?K`, `?T`).
pub fn parse_tagged_number(payload: &str, tag: &str) -> Result<f64, DecodeError> {
    Fields::tagged(payload, tag)?.finite(1)
}

/// `?O[,<label>...]` - the labels currently enabled.
pub fn parse_output_selection(payload: &str) -> Result<OutputSelection, DecodeError> {
    let fields = Fields::tagged(payload, "?O")?;
    let mut selection = OutputSelection::empty();
    for index in 1..fields.len() {
        let label = fields.get(index)?;
        if label.is_empty() {
            continue;
        }
        let field = OutputField::from_label(label).ok_or(DecodeError::UnexpectedValue { index })?;
        selection.insert(field);
    }
    Ok(selection)
}

/// `?EXPORT,<lines>,<bytes>`
///
/// Counts the board could not actually deliver are rejected: at most
/// `MAX_EXPORT_LINES` lines, each no longer than one `EXPORT_READ_LEN` read.
pub fn parse_export_counts(payload: &str) -> Result<ExportCounts, DecodeError> {
    let fields = Fields::tagged(payload, "?EXPORT")?;
    let lines: usize = fields.number(1)?;
    if lines > MAX_EXPORT_LINES {
        return Err(DecodeError::UnexpectedValue { index: 1 });
    }
    let bytes: usize = fields.number(2)?;
    if bytes > lines * EXPORT_READ_LEN {
        return Err(DecodeError::UnexpectedValue { index: 2 });
    }
    Ok(ExportCounts { lines, bytes })
}

/// Reading from `R`: every numeric field as `f64`, in order.
///
/// Accepts the plain form (`1.000,500,0.50,1.000`) as well as a tagged and
/// labelled form (`?,EC,1.000,TDS,500`): a leading `?` tag and field labels are skipped.
pub fn parse_sample(payload: &str) -> Result<ArrayVec<f64, MAX_SAMPLE_VALUES>, DecodeError> {
    let fields = Fields::split(payload)?;
    let mut values = ArrayVec::new();
    for index in 0..fields.len() {
        let token = fields.get(index)?;
        if (index == 0 && token.starts_with('?')) || OutputField::from_label(token).is_some() {
            continue;
        }
        let value = fields.finite(index)?;
        values.try_push(value).map_err(|_| DecodeError::TooManyFields)?;
    }
    if values.is_empty() {
        return Err(DecodeError::MissingField { index: 0 });
    }
    Ok(values)
}

/// Lenient boolean for caller-supplied toggles: `1/0`, `true/false`, `on/off`.
pub fn parse_toggle(input: &str) -> Option<bool> {
    let input = input.trim();
    let matches = |options: [&str; 3]| options.iter().any(|t| input.eq_ignore_ascii_case(t));
    if matches(["1", "true", "on"]) {
        Some(true)
    } else if matches(["0", "false", "off"]) {
        Some(false)
    } else {
        None
    }
}
