// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// Logging shims: forward to the `log` facade when the feature is on, vanish otherwise.
macro_rules! ezo_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        { log::trace!($($arg)*); }
    };
}

macro_rules! ezo_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        { log::debug!($($arg)*); }
    };
}

macro_rules! ezo_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        { log::warn!($($arg)*); }
    };
}

pub mod common;
pub mod driver;

// Re-export key types for convenience
pub use common::{EzoError, I2cAddress};
pub use driver::EcEzo;
