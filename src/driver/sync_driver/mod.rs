// src/driver/sync_driver/mod.rs

mod admin;
mod calibration;
mod io_helpers;
mod transaction;

#[cfg(test)]
mod mock;

use crate::common::{
    calibration::ImportPolicy,
    hal_traits::EzoTransport,
    response::DEFAULT_READ_LEN,
    timing::SettleDelays,
};
use embedded_hal::delay::DelayNs;

/// Tunables for one driver instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Settle delays per command class.
    pub delays: SettleDelays,
    /// Bytes read for an ordinary response.
    pub read_len: usize,
    /// Which saved calibration lines are re-sent on import.
    pub import_policy: ImportPolicy,
}

impl DriverConfig {
    pub fn with_delays(mut self, delays: SettleDelays) -> Self {
        self.delays = delays;
        self
    }

    pub fn with_read_len(mut self, read_len: usize) -> Self {
        self.read_len = read_len;
        self
    }

    pub fn with_import_policy(mut self, import_policy: ImportPolicy) -> Self {
        self.import_policy = import_policy;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            delays: SettleDelays::default(),
            read_len: DEFAULT_READ_LEN,
            import_policy: ImportPolicy::default(),
        }
    }
}

/// Synchronous driver for one EC EZO board.
///
/// Owns the transport for the whole session. Every operation runs to completion
/// (transmit, settle, read) before returning, so the board never holds a stale
/// response for the next caller. Every method takes `&mut self`; share the
/// driver behind a single mutex if several tasks need the board.
#[derive(Debug)]
pub struct EcEzo<T, D>
where
    T: EzoTransport,
    D: DelayNs,
{
    transport: T,
    delay: D,
    config: DriverConfig,
}

impl<T, D> EcEzo<T, D>
where
    T: EzoTransport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D) -> Self {
        Self::with_config(transport, delay, DriverConfig::default())
    }

    pub fn with_config(transport: T, delay: D, config: DriverConfig) -> Self {
        EcEzo {
            transport,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DriverConfig {
        &mut self.config
    }

    /// Gives the transport and delay provider back to the caller.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::mock::Wire;
    use super::*;
    use core::time::Duration;

    #[test]
    fn test_driver_construction() {
        let wire = Wire::new();
        let ezo = EcEzo::new(wire.transport(), wire.delay());
        assert_eq!(ezo.config(), &DriverConfig::default());
        assert_eq!(ezo.config().read_len, 32);
        let _ = ezo.release();
    }

    #[test]
    fn test_config_builders() {
        let config = DriverConfig::default()
            .with_delays(SettleDelays::none())
            .with_read_len(64)
            .with_import_policy(ImportPolicy::AllLines);
        assert_eq!(config.delays.long, Duration::ZERO);
        assert_eq!(config.read_len, 64);
        assert_eq!(config.import_policy, ImportPolicy::AllLines);

        let wire = Wire::new();
        let mut ezo = EcEzo::with_config(wire.transport(), wire.delay(), config);
        ezo.config_mut().read_len = 16;
        assert_eq!(ezo.config().read_len, 16);
    }
}
