// src/driver/sync_driver/calibration.rs

use super::EcEzo;
use crate::common::{
    calibration::{calibration_lines, strip_line_terminators},
    command::{CalibrationCommand, Command, MAX_COMMAND_LEN},
    error::{EzoError, InvalidArgument},
    hal_traits::EzoTransport,
    response::{parse_calibration_state, parse_export_counts},
    types::{CalibrationState, ExportCounts},
};
use arrayvec::{ArrayString, ArrayVec};
use embedded_hal::delay::DelayNs;

#[cfg(feature = "alloc")]
use crate::common::{
    calibration::{CalibrationExport, ExportTransfer},
    response::EXPORT_READ_LEN,
};

/// One stored calibration line with `\r`/`\n` removed.
type ImportLine = ArrayString<MAX_COMMAND_LEN>;

fn import_line(line: &str) -> Result<ImportLine, InvalidArgument> {
    let mut stripped = ImportLine::new();
    for c in strip_line_terminators(line) {
        stripped.try_push(c).map_err(|_| InvalidArgument::CommandTooLong)?;
    }
    // The full `IMPORT,<line>` command must fit as well.
    Command::Import(&stripped).format_into()?;
    Ok(stripped)
}

impl<T, D> EcEzo<T, D>
where
    T: EzoTransport,
    D: DelayNs,
{
    /// Dry calibration; run with the probe in air before any point calibration.
    pub fn calibrate_dry(&mut self) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::Calibration(CalibrationCommand::Dry))
    }

    /// Single-point calibration at `value` µS/cm.
    pub fn calibrate_single(&mut self, value: f64) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::Calibration(CalibrationCommand::Single(value)))
    }

    /// Low point of a two-point calibration.
    pub fn calibrate_low(&mut self, value: f64) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::Calibration(CalibrationCommand::Low(value)))
    }

    /// High point of a two-point calibration.
    pub fn calibrate_high(&mut self, value: f64) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::Calibration(CalibrationCommand::High(value)))
    }

    pub fn clear_calibration(&mut self) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::Calibration(CalibrationCommand::Clear))
    }

    pub fn calibration_state(&mut self) -> Result<CalibrationState, EzoError<T::Error>> {
        let payload = self.query(&Command::Calibration(CalibrationCommand::Query))?;
        Ok(parse_calibration_state(&payload)?)
    }

    /// Line and byte counts the next export will deliver.
    pub fn export_counts(&mut self) -> Result<ExportCounts, EzoError<T::Error>> {
        let payload = self.query(&Command::ExportInfo)?;
        Ok(parse_export_counts(&payload)?)
    }

    /// Pulls the stored calibration off the board.
    ///
    /// Asks for the counts first, then reads one `EXPORT` line per declared line.
    /// The export is only returned when the summed line length matches the
    /// declared byte count; otherwise the lines are discarded and
    /// `CalibrationCorrupted` is returned.
    #[cfg(feature = "alloc")]
    pub fn export_calibration(&mut self) -> Result<CalibrationExport, EzoError<T::Error>> {
        let counts = self.export_counts()?;
        ezo_debug!("export: {} lines, {} bytes", counts.lines, counts.bytes);
        let mut transfer = ExportTransfer::new(counts);
        while transfer.remaining() > 0 {
            let line = self.query_with_len(&Command::Export, EXPORT_READ_LEN)?;
            transfer.push(&line);
        }
        transfer.finish().map_err(|(declared, received)| {
            ezo_warn!("export checksum mismatch: declared {} bytes, received {}", declared, received);
            EzoError::CalibrationCorrupted { declared, received }
        })
    }

    /// Writes saved calibration lines back to the board and returns how many
    /// were sent.
    ///
    /// Every line is checked before the first `IMPORT` goes out, so an oversized
    /// line leaves the board untouched. The configured [`ImportPolicy`] decides
    /// whether the final line is included.
    ///
    /// [`ImportPolicy`]: crate::common::calibration::ImportPolicy
    pub fn import_calibration<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<usize, EzoError<T::Error>> {
        let count = self.config.import_policy.lines_to_send(lines.len());
        let lines = &lines[..count];
        for line in lines {
            import_line(line.as_ref())?;
        }
        for line in lines {
            let stripped = import_line(line.as_ref())?;
            self.execute(&Command::Import(&stripped))?;
        }
        Ok(count)
    }

    /// [`import_calibration`](Self::import_calibration) for file contents as
    /// produced by `CalibrationExport::to_file_contents`.
    pub fn import_calibration_text(&mut self, contents: &str) -> Result<usize, EzoError<T::Error>> {
        let mut lines: ArrayVec<&str, MAX_IMPORT_LINES> = ArrayVec::new();
        for line in calibration_lines(contents) {
            lines.try_push(line).map_err(|_| InvalidArgument::TooManyLines)?;
        }
        self.import_calibration(&lines)
    }
}

/// Most lines accepted by `import_calibration_text`.
pub const MAX_IMPORT_LINES: usize = 64;
