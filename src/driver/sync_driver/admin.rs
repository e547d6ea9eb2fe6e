// src/driver/sync_driver/admin.rs

use super::EcEzo;
use crate::common::{
    address::I2cAddress,
    command::Command,
    error::{EzoError, InvalidArgument},
    hal_traits::EzoTransport,
    response::{
        parse_flag, parse_info, parse_led_state, parse_name, parse_output_selection,
        parse_sample, parse_status, parse_tagged_number, parse_toggle, Payload,
    },
    types::{
        DeviceInfo, DeviceStatus, LedState, OutputField, OutputSelection, Sample,
        MAX_SAMPLE_VALUES, MAX_TOKEN_LEN,
    },
};
use arrayvec::{ArrayString, ArrayVec};
use core::time::Duration;
use embedded_hal::delay::DelayNs;

impl<T, D> EcEzo<T, D>
where
    T: EzoTransport,
    D: DelayNs,
{
    // --- Output fields & sampling ---

    /// Makes the board emit exactly `fields`.
    ///
    /// Every field is switched off, the requested ones are switched back on, and
    /// the board's own `O,?` answer is returned. Nothing is cached locally.
    pub fn set_output(&mut self, fields: &[OutputField]) -> Result<OutputSelection, EzoError<T::Error>> {
        for field in OutputField::ALL {
            self.execute(&Command::SetOutput { field, enabled: false })?;
        }
        for field in fields {
            self.execute(&Command::SetOutput { field: *field, enabled: true })?;
        }
        self.output_selection()
    }

    /// Fields the board currently emits.
    pub fn output_selection(&mut self) -> Result<OutputSelection, EzoError<T::Error>> {
        let payload = self.query(&Command::QueryOutput)?;
        Ok(parse_output_selection(&payload)?)
    }

    /// One reading, one value per enabled field, in device order.
    pub fn take_sample_values(&mut self) -> Result<ArrayVec<f64, MAX_SAMPLE_VALUES>, EzoError<T::Error>> {
        let payload = self.query(&Command::Read)?;
        Ok(parse_sample(&payload)?)
    }

    /// One reading; a bare scalar when a single field is enabled.
    pub fn take_sample(&mut self) -> Result<Sample, EzoError<T::Error>> {
        Ok(Sample::from_values(self.take_sample_values()?))
    }

    // --- LED ---

    pub fn led_on(&mut self) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::SetLed(true))
    }

    pub fn led_off(&mut self) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::SetLed(false))
    }

    pub fn led_status(&mut self) -> Result<LedState, EzoError<T::Error>> {
        let payload = self.query(&Command::QueryLed)?;
        Ok(parse_led_state(&payload)?)
    }

    /// Blinks the LED for the configured find duration, then leaves it on.
    pub fn find(&mut self) -> Result<(), EzoError<T::Error>> {
        let duration = self.config.delays.find;
        self.find_for(duration)
    }

    /// Blinks the LED for `duration`, then leaves it on.
    pub fn find_for(&mut self, duration: Duration) -> Result<(), EzoError<T::Error>> {
        self.send_command(&Command::Find)?;
        self.settle_for(duration);
        // Any command ends the blinking.
        self.led_off()?;
        self.led_on()
    }

    // --- Device info & housekeeping ---

    pub fn info(&mut self) -> Result<DeviceInfo, EzoError<T::Error>> {
        let payload = self.query(&Command::Info)?;
        Ok(parse_info(&payload)?)
    }

    /// Last restart reason and supply voltage.
    pub fn status(&mut self) -> Result<DeviceStatus, EzoError<T::Error>> {
        let payload = self.query(&Command::Status)?;
        Ok(parse_status(&payload)?)
    }

    /// Puts the board to sleep. Any following command wakes it.
    pub fn sleep(&mut self) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::Sleep)
    }

    /// Moves the board to `address`. It reboots and answers only at the new
    /// address afterwards; repoint the transport before the next call.
    pub fn change_i2c_address(&mut self, address: u8) -> Result<I2cAddress, EzoError<T::Error>> {
        let address = I2cAddress::new(address)?;
        self.execute(&Command::ChangeAddress(address))?;
        Ok(address)
    }

    /// Clears calibration, turns the LED on and re-enables response codes.
    pub fn factory_reset(&mut self) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::FactoryReset)
    }

    /// Switches the board to UART mode at `baud`. The I2C session ends here.
    pub fn switch_to_uart(&mut self, baud: u32) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::SwitchToUart { baud })
    }

    // --- Probe & compensation ---

    /// Sets the probe cell constant K and returns the value the board reports back.
    pub fn set_probe_type(&mut self, k: f64) -> Result<f64, EzoError<T::Error>> {
        self.execute(&Command::SetProbeType(k))?;
        self.probe_type()
    }

    pub fn probe_type(&mut self) -> Result<f64, EzoError<T::Error>> {
        let payload = self.query(&Command::QueryProbeType)?;
        Ok(parse_tagged_number(&payload, "?K")?)
    }

    /// Temperature used for compensation, in °C.
    pub fn temperature_compensation(&mut self) -> Result<f64, EzoError<T::Error>> {
        let payload = self.query(&Command::QueryTemperatureCompensation)?;
        Ok(parse_tagged_number(&payload, "?T")?)
    }

    pub fn set_temperature_compensation(&mut self, celsius: f64) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::SetTemperatureCompensation(celsius))
    }

    // --- Protocol lock ---

    pub fn protocol_lock_status(&mut self) -> Result<bool, EzoError<T::Error>> {
        let payload = self.query(&Command::QueryProtocolLock)?;
        Ok(parse_flag(&payload, "?PLOCK")?)
    }

    pub fn set_protocol_lock(&mut self, locked: bool) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::SetProtocolLock(locked))
    }

    /// Lenient form of [`set_protocol_lock`](Self::set_protocol_lock) for text input.
    ///
    /// Input that is not a boolean unlocks (`PLOCK,0`) and is still reported as
    /// `InvalidArgument::NotBoolean { fallback: false }`.
    pub fn set_protocol_lock_from(&mut self, input: &str) -> Result<bool, EzoError<T::Error>> {
        match parse_toggle(input) {
            Some(locked) => {
                self.set_protocol_lock(locked)?;
                Ok(locked)
            }
            None => {
                // The argument error wins over any failure of the fallback itself.
                if let Err(_err) = self.set_protocol_lock(false) {
                    ezo_warn!("PLOCK fallback not applied: {:?}", _err);
                }
                Err(InvalidArgument::NotBoolean { fallback: false }.into())
            }
        }
    }

    // --- Naming ---

    pub fn set_name(&mut self, name: &str) -> Result<(), EzoError<T::Error>> {
        self.execute(&Command::SetName(name))
    }

    pub fn name(&mut self) -> Result<ArrayString<MAX_TOKEN_LEN>, EzoError<T::Error>> {
        let payload = self.query(&Command::QueryName)?;
        Ok(parse_name(&payload)?)
    }

    // --- Response codes ---

    /// Turns the board's explicit success code (`*OK`) on or off and returns its reply.
    pub fn set_response_codes(&mut self, enabled: bool) -> Result<Payload, EzoError<T::Error>> {
        self.query(&Command::SetResponseCodes(enabled))
    }

    /// Lenient form of [`set_response_codes`](Self::set_response_codes) for text input.
    ///
    /// Input that is not a boolean disables response codes and is still reported
    /// as `InvalidArgument::NotBoolean { fallback: false }`.
    pub fn set_response_codes_from(&mut self, input: &str) -> Result<Payload, EzoError<T::Error>> {
        match parse_toggle(input) {
            Some(enabled) => self.set_response_codes(enabled),
            None => {
                if let Err(_err) = self.set_response_codes(false) {
                    ezo_warn!("*OK fallback not applied: {:?}", _err);
                }
                Err(InvalidArgument::NotBoolean { fallback: false }.into())
            }
        }
    }

    pub fn response_codes_enabled(&mut self) -> Result<bool, EzoError<T::Error>> {
        let payload = self.query(&Command::QueryResponseCodes)?;
        // Older firmware drops the asterisk from the tag.
        let tag = if payload.starts_with("?*") { "?*OK" } else { "?OK" };
        Ok(parse_flag(&payload, tag)?)
    }
}
