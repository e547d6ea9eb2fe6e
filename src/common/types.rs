// src/common/types.rs

use arrayvec::{ArrayString, ArrayVec};
use core::fmt;

/// Longest token the driver keeps from a parsed response (device type, name).
pub const MAX_TOKEN_LEN: usize = 32;

/// Upper bound on values in one sample: one per output field.
pub const MAX_SAMPLE_VALUES: usize = OutputField::ALL.len();

// --- Output fields ---

/// Measurement parameters the EC EZO can include in a reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OutputField {
    /// Electrical conductivity.
    Ec,
    /// Total dissolved solids.
    Tds,
    /// Salinity.
    Salinity,
    /// Specific gravity.
    SpecificGravity,
}

impl OutputField {
    /// The full fixed domain, in device order.
    pub const ALL: [OutputField; 4] = [
        OutputField::Ec,
        OutputField::Tds,
        OutputField::Salinity,
        OutputField::SpecificGravity,
    ];

    /// Label used on the wire (`O,<label>,<0|1>`).
    pub const fn label(&self) -> &'static str {
        match self {
            OutputField::Ec => "EC",
            OutputField::Tds => "TDS",
            OutputField::Salinity => "S",
            OutputField::SpecificGravity => "SG",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.label() == label)
    }

    const fn bit(&self) -> u8 {
        match self {
            OutputField::Ec => 0b0001,
            OutputField::Tds => 0b0010,
            OutputField::Salinity => 0b0100,
            OutputField::SpecificGravity => 0b1000,
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of output fields, as reported by the device.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct OutputSelection(u8);

impl OutputSelection {
    pub const fn empty() -> Self {
        OutputSelection(0)
    }

    pub fn all() -> Self {
        Self::from_fields(&OutputField::ALL)
    }

    pub fn from_fields(fields: &[OutputField]) -> Self {
        let mut selection = Self::empty();
        for field in fields {
            selection.insert(*field);
        }
        selection
    }

    pub fn insert(&mut self, field: OutputField) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: OutputField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Enabled fields in device order.
    pub fn iter(&self) -> impl Iterator<Item = OutputField> + '_ {
        OutputField::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

// --- Status & info ---

/// Reason the device gives for its last restart (`STATUS`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RestartReason {
    PoweredOff,
    SoftwareReset,
    BrownOut,
    Watchdog,
    Unknown,
}

impl RestartReason {
    /// Maps the single-character restart code. Anything outside `P/S/B/W` is `Unknown`.
    pub fn from_code(code: char) -> Self {
        match code {
            'P' => RestartReason::PoweredOff,
            'S' => RestartReason::SoftwareReset,
            'B' => RestartReason::BrownOut,
            'W' => RestartReason::Watchdog,
            _ => RestartReason::Unknown,
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            RestartReason::PoweredOff => "Powered Off",
            RestartReason::SoftwareReset => "Software Reset",
            RestartReason::BrownOut => "Brown Out",
            RestartReason::Watchdog => "Watchdog",
            RestartReason::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RestartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Parsed `I` response.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub device_type: ArrayString<MAX_TOKEN_LEN>,
    pub firmware: f64,
}

/// Parsed `STATUS` response.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DeviceStatus {
    pub restart_code: char,
    pub restart_reason: RestartReason,
    /// Supply voltage at VCC, in volts.
    pub vcc: f64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LedState {
    Off,
    On,
}

/// Calibration points stored on the device (`CAL,?`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CalibrationState {
    None,
    SinglePoint,
    TwoPoint,
}

/// Line and byte counts announced by `EXPORT,?`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ExportCounts {
    pub lines: usize,
    pub bytes: usize,
}

// --- Samples ---

/// One reading. Single-field configurations get a bare scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    Single(f64),
    Multi(ArrayVec<f64, MAX_SAMPLE_VALUES>),
}

impl Sample {
    pub fn from_values(values: ArrayVec<f64, MAX_SAMPLE_VALUES>) -> Self {
        if values.len() == 1 {
            Sample::Single(values[0])
        } else {
            Sample::Multi(values)
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            Sample::Single(v) => core::slice::from_ref(v),
            Sample::Multi(values) => values.as_slice(),
        }
    }
}

// --- Argument formatting ---

/// Renders a float argument as a plain decimal with the point always present
/// (`12880.0`, `0.5`, `0.00005`), which is what the device echoes back.
///
/// Non-finite values have no wire form; `Command::format_into` rejects them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Decimal(pub f64);

/// Forwards to the formatter and notes whether a `.` went past.
struct PointTracker<'a, 'b> {
    inner: &'a mut fmt::Formatter<'b>,
    seen_point: bool,
}

impl fmt::Write for PointTracker<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.seen_point |= s.contains('.');
        self.inner.write_str(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display on f64 never switches to exponent notation and round-trips exactly.
        let mut out = PointTracker {
            inner: f,
            seen_point: false,
        };
        fmt::Write::write_fmt(&mut out, format_args!("{}", self.0))?;
        if !out.seen_point && self.0.is_finite() {
            out.inner.write_str(".0")?;
        }
        Ok(())
    }
}
