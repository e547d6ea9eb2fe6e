// src/common/calibration.rs

//! Calibration transfer bookkeeping: the byte-count checksum, the accumulated
//! export, and the flat one-line-per-string file format.

#[cfg(feature = "alloc")]
use {
    super::{response::MAX_EXPORT_LINES, types::ExportCounts},
    alloc::{string::String, vec::Vec},
};

/// Which lines of a saved calibration are re-transmitted on import.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ImportPolicy {
    /// Send every line except the last. The final exported line is the board's
    /// end-of-transfer marker, not calibration payload.
    #[default]
    SkipFinalLine,
    /// Send every line, marker included.
    AllLines,
}

impl ImportPolicy {
    /// Number of leading lines to transmit out of `total`.
    pub fn lines_to_send(&self, total: usize) -> usize {
        match self {
            ImportPolicy::SkipFinalLine => total.saturating_sub(1),
            ImportPolicy::AllLines => total,
        }
    }
}

/// Removes line terminators (`\r`, `\n`) anywhere in a stored calibration line.
pub fn strip_line_terminators(line: &str) -> impl Iterator<Item = char> + '_ {
    line.chars().filter(|c| *c != '\r' && *c != '\n')
}

/// Sum of line lengths, in bytes.
pub fn received_bytes<'a, I>(lines: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().map(str::len).sum()
}

/// Splits saved calibration text back into lines. A trailing newline does not
/// produce an empty final line; `\r\n` endings are accepted.
pub fn calibration_lines(contents: &str) -> impl Iterator<Item = &str> + '_ {
    contents.lines()
}

/// Lines collected during one export, checked against the declared counts.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTransfer {
    counts: ExportCounts,
    lines: Vec<String>,
}

#[cfg(feature = "alloc")]
impl ExportTransfer {
    pub fn new(counts: ExportCounts) -> Self {
        ExportTransfer {
            counts,
            lines: Vec::with_capacity(counts.lines.min(MAX_EXPORT_LINES)),
        }
    }

    pub fn counts(&self) -> ExportCounts {
        self.counts
    }

    pub fn push(&mut self, line: &str) {
        self.lines.push(String::from(line));
    }

    /// Lines still to be requested.
    pub fn remaining(&self) -> usize {
        self.counts.lines.saturating_sub(self.lines.len())
    }

    /// Verifies the byte count and yields the export, or the mismatch.
    /// On mismatch the collected lines are dropped.
    pub fn finish(self) -> Result<CalibrationExport, (usize, usize)> {
        let received = received_bytes(self.lines.iter().map(String::as_str));
        if received == self.counts.bytes {
            Ok(CalibrationExport { lines: self.lines })
        } else {
            Err((self.counts.bytes, received))
        }
    }
}

/// A verified calibration export, in device order.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalibrationExport {
    lines: Vec<String>,
}

#[cfg(feature = "alloc")]
impl CalibrationExport {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// File contents: one line each, newline-terminated.
    pub fn to_file_contents(&self) -> String {
        let bytes = received_bytes(self.lines.iter().map(String::as_str));
        let mut out = String::with_capacity(bytes + self.lines.len());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}
