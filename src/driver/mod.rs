// src/driver/mod.rs

// Declare the sub-module
pub mod sync_driver;

// Re-export the public driver and its configuration
pub use sync_driver::{DriverConfig, EcEzo};
