// src/driver/sync_driver/transaction.rs

use super::EcEzo;
use crate::common::{
    command::Command, error::EzoError, hal_traits::EzoTransport, response::Payload,
};
use embedded_hal::delay::DelayNs;

impl<T, D> EcEzo<T, D>
where
    T: EzoTransport,
    D: DelayNs,
{
    /// Transmits a command that has no response to collect, then waits out its settle delay.
    pub(super) fn execute(&mut self, command: &Command<'_>) -> Result<(), EzoError<T::Error>> {
        self.send_command(command)?;
        self.settle(command.delay_class());
        Ok(())
    }

    /// Transmit, settle, read with the configured length.
    pub(super) fn query(&mut self, command: &Command<'_>) -> Result<Payload, EzoError<T::Error>> {
        let len = self.config.read_len;
        self.query_with_len(command, len)
    }

    /// Transmit, settle, read `len` bytes. No retries: busy or empty answers are
    /// returned to the caller as errors.
    pub(super) fn query_with_len(
        &mut self,
        command: &Command<'_>,
        len: usize,
    ) -> Result<Payload, EzoError<T::Error>> {
        // Reject an impossible read before anything reaches the bus.
        Self::check_read_len(len)?;
        self.execute(command)?;
        self.read_payload(len)
    }

    /// Sends any datasheet command verbatim and waits the long settle delay.
    pub fn send_raw(&mut self, command: &str) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::Raw(command))
    }

    /// Sends any datasheet command verbatim and returns its decoded reply.
    pub fn query_raw(&mut self, command: &str, len: usize) -> Result<Payload, EzoError<T::Error>> {
        self.query_with_len(&Command::Raw(command), len)
    }
}
