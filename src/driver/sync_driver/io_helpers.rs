// src/driver/sync_driver/io_helpers.rs

use super::EcEzo;
use crate::common::{
    command::Command,
    error::{EzoError, InvalidArgument},
    hal_traits::EzoTransport,
    response::{decode_response, Payload, ResponseStatus, MAX_RESPONSE_LEN},
    timing::DelayClass,
};
use core::time::Duration;
use embedded_hal::delay::DelayNs;

// Implementation block for I/O related helpers
impl<T, D> EcEzo<T, D>
where
    T: EzoTransport,
    D: DelayNs,
{
    /// Formats `command` and transmits it. Nothing is sent if it does not fit the buffer.
    pub(super) fn send_command(&mut self, command: &Command<'_>) -> Result<(), EzoError<T::Error>> {
        let buffer = command.format_into()?;
        ezo_debug!("ezo <- {}", buffer.as_str());
        self.transport.send(buffer.as_bytes()).map_err(EzoError::Io)
    }

    /// Blocks for the settle delay of `class`.
    pub(super) fn settle(&mut self, class: DelayClass) {
        let duration = self.config.delays.for_class(class);
        self.settle_for(duration);
    }

    pub(super) fn settle_for(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        if duration.subsec_nanos() % 1_000_000 == 0 {
            let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
            self.delay.delay_ms(ms);
        } else {
            let us = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
            self.delay.delay_us(us);
        }
    }

    /// Reads up to `len` bytes and classifies them.
    pub fn read_response(&mut self, len: usize) -> Result<ResponseStatus, EzoError<T::Error>> {
        Self::check_read_len(len)?;
        let mut buffer = [0u8; MAX_RESPONSE_LEN];
        let filled = self
            .transport
            .receive(&mut buffer[..len])
            .map_err(EzoError::Io)?
            .min(len);
        let raw = &buffer[..filled];
        ezo_trace!("ezo -> {:02x?}", raw);
        Ok(decode_response(raw)?)
    }

    /// Reads a response and turns every non-success status into its error.
    pub(super) fn read_payload(&mut self, len: usize) -> Result<Payload, EzoError<T::Error>> {
        match self.read_response(len)? {
            ResponseStatus::Ok(payload) => Ok(payload),
            ResponseStatus::NoData => Err(EzoError::NoData),
            ResponseStatus::StillProcessing => Err(EzoError::StillProcessing),
            ResponseStatus::SyntaxError => Err(EzoError::SyntaxError),
        }
    }

    pub(super) fn check_read_len(len: usize) -> Result<(), InvalidArgument> {
        if len > MAX_RESPONSE_LEN {
            Err(InvalidArgument::ReadLengthTooLarge {
                requested: len,
                max: MAX_RESPONSE_LEN,
            })
        } else {
            Ok(())
        }
    }
}
