//! EC EZO command definitions.
//!
//! Every variant renders (via `Display`) to the exact ASCII the board expects on the wire.
//! No terminator is appended; the I2C transaction boundary delimits the command.

use arrayvec::ArrayString;
use core::fmt::{self, Write};

use super::{
    address::I2cAddress,
    error::InvalidArgument,
    timing::DelayClass,
    types::{Decimal, OutputField},
};

/// Capacity of the formatted command buffer. `IMPORT,<line>` is the longest command.
pub const MAX_COMMAND_LEN: usize = 64;

pub type CommandBuffer = ArrayString<MAX_COMMAND_LEN>;

/// Calibration sub-commands (`CAL,...`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CalibrationCommand {
    /// `CAL,DRY`
    Dry,
    /// `CAL,<n>`
    Single(f64),
    /// `CAL,LOW,<n>`
    Low(f64),
    /// `CAL,HIGH,<n>`
    High(f64),
    /// `CAL,CLEAR`
    Clear,
    /// `CAL,?`
    Query,
}

/// Represents an EC EZO command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// `O,<field>,<0|1>` - enable or disable one output field.
    SetOutput { field: OutputField, enabled: bool },
    /// `O,?`
    QueryOutput,
    /// `R` - take a single reading.
    Read,
    /// `L,<0|1>`
    SetLed(bool),
    /// `L,?`
    QueryLed,
    /// `FIND` - blink the LED so the board can be located.
    Find,
    /// `I`
    Info,
    /// `STATUS`
    Status,
    /// `SLEEP`
    Sleep,
    /// `I2C,<n>` - move the board to a new address (it reboots).
    ChangeAddress(I2cAddress),
    /// `FACTORY`
    FactoryReset,
    /// `BAUD,<n>` - switch the board to UART mode.
    SwitchToUart { baud: u32 },
    /// `K,<n>`
    SetProbeType(f64),
    /// `K,?`
    QueryProbeType,
    /// `T,<n>`
    SetTemperatureCompensation(f64),
    /// `T,?`
    QueryTemperatureCompensation,
    /// `PLOCK,<0|1>`
    SetProtocolLock(bool),
    /// `PLOCK,?`
    QueryProtocolLock,
    /// `NAME,<name>`
    SetName(&'a str),
    /// `NAME,?`
    QueryName,
    Calibration(CalibrationCommand),
    /// `EXPORT,?`
    ExportInfo,
    /// `EXPORT` - next calibration line.
    Export,
    /// `IMPORT,<line>`
    Import(&'a str),
    /// `*OK,<0|1>`
    SetResponseCodes(bool),
    /// `*OK,?`
    QueryResponseCodes,
    /// Any datasheet command text not modelled above, sent verbatim.
    Raw(&'a str),
}

fn flag(enabled: bool) -> char {
    if enabled {
        '1'
    } else {
        '0'
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetOutput { field, enabled } => write!(f, "O,{},{}", field, flag(*enabled)),
            Command::QueryOutput => f.write_str("O,?"),
            Command::Read => f.write_str("R"),
            Command::SetLed(on) => write!(f, "L,{}", flag(*on)),
            Command::QueryLed => f.write_str("L,?"),
            Command::Find => f.write_str("FIND"),
            Command::Info => f.write_str("I"),
            Command::Status => f.write_str("STATUS"),
            Command::Sleep => f.write_str("SLEEP"),
            Command::ChangeAddress(address) => write!(f, "I2C,{}", address),
            Command::FactoryReset => f.write_str("FACTORY"),
            Command::SwitchToUart { baud } => write!(f, "BAUD,{}", baud),
            Command::SetProbeType(k) => write!(f, "K,{}", Decimal(*k)),
            Command::QueryProbeType => f.write_str("K,?"),
            Command::SetTemperatureCompensation(t) => write!(f, "T,{}", Decimal(*t)),
            Command::QueryTemperatureCompensation => f.write_str("T,?"),
            Command::SetProtocolLock(locked) => write!(f, "PLOCK,{}", flag(*locked)),
            Command::QueryProtocolLock => f.write_str("PLOCK,?"),
            Command::SetName(name) => write!(f, "NAME,{}", name),
            Command::QueryName => f.write_str("NAME,?"),
            Command::Calibration(cal) => match cal {
                CalibrationCommand::Dry => f.write_str("CAL,DRY"),
                CalibrationCommand::Single(n) => write!(f, "CAL,{}", Decimal(*n)),
                CalibrationCommand::Low(n) => write!(f, "CAL,LOW,{}", Decimal(*n)),
                CalibrationCommand::High(n) => write!(f, "CAL,HIGH,{}", Decimal(*n)),
                CalibrationCommand::Clear => f.write_str("CAL,CLEAR"),
                CalibrationCommand::Query => f.write_str("CAL,?"),
            },
            Command::ExportInfo => f.write_str("EXPORT,?"),
            Command::Export => f.write_str("EXPORT"),
            Command::Import(line) => write!(f, "IMPORT,{}", line),
            Command::SetResponseCodes(enabled) => write!(f, "*OK,{}", flag(*enabled)),
            Command::QueryResponseCodes => f.write_str("*OK,?"),
            Command::Raw(text) => f.write_str(text),
        }
    }
}

impl Command<'_> {
    /// Settle delay the board needs before this command's response can be read.
    pub fn delay_class(&self) -> DelayClass {
        match self {
            Command::SetOutput { .. }
            | Command::QueryOutput
            | Command::SetLed(_)
            | Command::QueryLed
            | Command::Info
            | Command::Status
            | Command::SetProbeType(_)
            | Command::SetTemperatureCompensation(_)
            | Command::QueryTemperatureCompensation
            | Command::QueryProtocolLock
            | Command::SetResponseCodes(_)
            | Command::QueryResponseCodes
            | Command::Calibration(CalibrationCommand::Clear | CalibrationCommand::Query) => {
                DelayClass::Short
            }
            Command::Read
            | Command::QueryProbeType
            | Command::SetName(_)
            | Command::QueryName
            | Command::Calibration(_)
            | Command::ExportInfo
            | Command::Export
            | Command::Import(_)
            | Command::Raw(_) => DelayClass::Long,
            Command::Find => DelayClass::Find,
            Command::Sleep
            | Command::ChangeAddress(_)
            | Command::FactoryReset
            | Command::SwitchToUart { .. }
            | Command::SetProtocolLock(_) => DelayClass::None,
        }
    }

    /// The float argument carried by this command, if any.
    fn numeric_argument(&self) -> Option<f64> {
        match self {
            Command::SetProbeType(n)
            | Command::SetTemperatureCompensation(n)
            | Command::Calibration(
                CalibrationCommand::Single(n) | CalibrationCommand::Low(n) | CalibrationCommand::High(n),
            ) => Some(*n),
            _ => None,
        }
    }

    /// Renders the command into a fixed-size buffer.
    ///
    /// `NaN` and infinite arguments are refused since the device grammar only
    /// takes plain decimals.
    pub fn format_into(&self) -> Result<CommandBuffer, InvalidArgument> {
        if self.numeric_argument().is_some_and(|n| !n.is_finite()) {
            return Err(InvalidArgument::NotFinite);
        }
        let mut buffer = CommandBuffer::new();
        write!(buffer, "{}", self).map_err(|_| InvalidArgument::CommandTooLong)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    fn render(cmd: &Command<'_>) -> HeaplessString<MAX_COMMAND_LEN> {
        let mut out = HeaplessString::new();
        write!(out, "{}", cmd).unwrap();
        out
    }

    #[test]
    fn test_command_formatting() {
        assert_eq!(render(&Command::SetOutput { field: OutputField::Ec, enabled: true }), "O,EC,1");
        assert_eq!(render(&Command::SetOutput { field: OutputField::SpecificGravity, enabled: false }), "O,SG,0");
        assert_eq!(render(&Command::QueryOutput), "O,?");
        assert_eq!(render(&Command::Read), "R");
        assert_eq!(render(&Command::SetLed(false)), "L,0");
        assert_eq!(render(&Command::QueryLed), "L,?");
        assert_eq!(render(&Command::Find), "FIND");
        assert_eq!(render(&Command::Info), "I");
        assert_eq!(render(&Command::Status), "STATUS");
        assert_eq!(render(&Command::Sleep), "SLEEP");
        assert_eq!(render(&Command::ChangeAddress(I2cAddress::new(99).unwrap())), "I2C,99");
        assert_eq!(render(&Command::FactoryReset), "FACTORY");
        assert_eq!(render(&Command::SwitchToUart { baud: 9600 }), "BAUD,9600");
        assert_eq!(render(&Command::SetProbeType(1.0)), "K,1.0");
        assert_eq!(render(&Command::QueryProbeType), "K,?");
        assert_eq!(render(&Command::SetTemperatureCompensation(25.5)), "T,25.5");
        assert_eq!(render(&Command::QueryTemperatureCompensation), "T,?");
        assert_eq!(render(&Command::SetProtocolLock(true)), "PLOCK,1");
        assert_eq!(render(&Command::QueryProtocolLock), "PLOCK,?");
        assert_eq!(render(&Command::SetName("tank3")), "NAME,tank3");
        assert_eq!(render(&Command::QueryName), "NAME,?");
        assert_eq!(render(&Command::ExportInfo), "EXPORT,?");
        assert_eq!(render(&Command::Export), "EXPORT");
        assert_eq!(render(&Command::Import("ABCDEF0123")), "IMPORT,ABCDEF0123");
        assert_eq!(render(&Command::SetResponseCodes(true)), "*OK,1");
        assert_eq!(render(&Command::QueryResponseCodes), "*OK,?");
        assert_eq!(render(&Command::Raw("Sleep")), "Sleep");
    }

    #[test]
    fn test_calibration_formatting() {
        use CalibrationCommand::*;
        assert_eq!(render(&Command::Calibration(Dry)), "CAL,DRY");
        assert_eq!(render(&Command::Calibration(Single(84.0))), "CAL,84.0");
        assert_eq!(render(&Command::Calibration(Low(12880.0))), "CAL,LOW,12880.0");
        assert_eq!(render(&Command::Calibration(High(80000.0))), "CAL,HIGH,80000.0");
        assert_eq!(render(&Command::Calibration(High(1413.5))), "CAL,HIGH,1413.5");
        assert_eq!(render(&Command::Calibration(Clear)), "CAL,CLEAR");
        assert_eq!(render(&Command::Calibration(Query)), "CAL,?");
    }

    #[test]
    fn test_cal_high_value_round_trips() {
        for x in [0.1_f64, 1413.0, 12880.0, 80000.25, 3.0e-3, 5e-5, 1e17] {
            let text = render(&Command::Calibration(CalibrationCommand::High(x)));
            let echoed = text.strip_prefix("CAL,HIGH,").unwrap();
            assert!(!echoed.contains('e'));
            assert!(echoed.contains('.'));
            assert_eq!(echoed.parse::<f64>().unwrap(), x);
        }
    }

    #[test]
    fn test_small_and_large_arguments_stay_plain() {
        assert_eq!(
            Command::Calibration(CalibrationCommand::High(0.00005)).format_into().unwrap().as_str(),
            "CAL,HIGH,0.00005"
        );
        assert_eq!(
            Command::SetTemperatureCompensation(1e17).format_into().unwrap().as_str(),
            "T,100000000000000000.0"
        );
    }

    #[test]
    fn test_non_finite_arguments_rejected() {
        assert_eq!(
            Command::Calibration(CalibrationCommand::Single(f64::NAN)).format_into(),
            Err(InvalidArgument::NotFinite)
        );
        assert_eq!(Command::SetProbeType(f64::INFINITY).format_into(), Err(InvalidArgument::NotFinite));
        assert_eq!(
            Command::SetTemperatureCompensation(f64::NEG_INFINITY).format_into(),
            Err(InvalidArgument::NotFinite)
        );
    }

    #[test]
    fn test_delay_classes() {
        assert_eq!(Command::QueryLed.delay_class(), DelayClass::Short);
        assert_eq!(Command::Read.delay_class(), DelayClass::Long);
        assert_eq!(Command::Calibration(CalibrationCommand::Clear).delay_class(), DelayClass::Short);
        assert_eq!(Command::Calibration(CalibrationCommand::Query).delay_class(), DelayClass::Short);
        assert_eq!(Command::Calibration(CalibrationCommand::Dry).delay_class(), DelayClass::Long);
        assert_eq!(Command::SetProbeType(1.0).delay_class(), DelayClass::Short);
        assert_eq!(Command::QueryProbeType.delay_class(), DelayClass::Long);
        assert_eq!(Command::Find.delay_class(), DelayClass::Find);
        assert_eq!(Command::Sleep.delay_class(), DelayClass::None);
        assert_eq!(Command::SetProtocolLock(false).delay_class(), DelayClass::None);
    }

    #[test]
    fn test_format_into_rejects_overflow() {
        let long_line = core::str::from_utf8(&[b'X'; MAX_COMMAND_LEN]).unwrap();
        assert_eq!(
            Command::Import(long_line).format_into(),
            Err(InvalidArgument::CommandTooLong)
        );
        assert_eq!(Command::Status.format_into().unwrap().as_str(), "STATUS");
    }
}
