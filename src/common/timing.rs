// src/common/timing.rs

use core::time::Duration;

// Processing latencies the EZO firmware needs between receiving a command and
// having its response ready. Values are the nominal figures from the datasheet.

/// Short administrative commands (LED, output toggles, status/info, lock queries).
pub const SHORT_SETTLE: Duration = Duration::from_millis(300);
/// Sampling, naming, calibration points and calibration transfer.
pub const LONG_SETTLE: Duration = Duration::from_millis(600);
/// How long `FIND` blinks the indicator before the driver moves on.
pub const FIND_DURATION: Duration = Duration::from_secs(30);

/// Which settle delay a command needs after transmission.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DelayClass {
    /// Fire-and-forget: no delay, no response read.
    None,
    Short,
    Long,
    /// Uses the configured (or per-call) find duration.
    Find,
}

/// Per-class settle delays. Tests shrink these to zero; production keeps the defaults.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SettleDelays {
    pub short: Duration,
    pub long: Duration,
    pub find: Duration,
}

impl SettleDelays {
    /// All delays set to zero.
    pub const fn none() -> Self {
        SettleDelays {
            short: Duration::ZERO,
            long: Duration::ZERO,
            find: Duration::ZERO,
        }
    }

    pub fn for_class(&self, class: DelayClass) -> Duration {
        match class {
            DelayClass::None => Duration::ZERO,
            DelayClass::Short => self.short,
            DelayClass::Long => self.long,
            DelayClass::Find => self.find,
        }
    }
}

impl Default for SettleDelays {
    fn default() -> Self {
        SettleDelays {
            short: SHORT_SETTLE,
            long: LONG_SETTLE,
            find: FIND_DURATION,
        }
    }
}
