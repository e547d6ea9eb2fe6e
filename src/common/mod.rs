// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod calibration;
pub mod command;
pub mod error;
pub mod hal_traits;
pub mod response;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From address.rs
pub use address::I2cAddress;

// From calibration.rs
pub use calibration::{calibration_lines, ImportPolicy};

// From command.rs
pub use command::{CalibrationCommand, Command};

// From error.rs
pub use error::{EzoError, InvalidArgument};

// From hal_traits.rs
pub use hal_traits::{EzoTransport, I2cTransport};

// From response/mod.rs (and its sub-modules via its own `pub use`)
pub use response::{decode_response, DecodeError, Payload, ResponseStatus};

// From timing.rs
pub use timing::{DelayClass, SettleDelays};

// From types.rs
pub use types::{
    CalibrationState, DeviceInfo, DeviceStatus, ExportCounts, LedState, OutputField,
    OutputSelection, RestartReason, Sample,
};

// --- Feature-gated re-exports ---

// Alloc-dependent calibration export types
#[cfg(feature = "alloc")]
pub use calibration::{CalibrationExport, ExportTransfer};
