//! Defines the driver seam used to reach the GPIO controller.

mod data;
mod raspi;

use std::any::type_name;
use std::fmt::{Debug, Display};
use std::sync::Arc;

use dyn_clone::DynClone;
use parking_lot::RwLock;

use crate::errors::Error;
pub use data::*;
pub use raspi::RaspiGpio;

// Makes a Box<dyn GpioDriver> clone (used for Board cloning).
dyn_clone::clone_trait_object!(GpioDriver);

/// Defines the trait all GPIO drivers must implement.
///
/// The crate depends on these operations only: how a driver reaches the controller (memory-mapped
/// registers, a kernel driver, an in-memory fake) is entirely its own business.
pub trait GpioDriver: DynClone + Send + Sync + Debug + Display {
    // ########################################
    // Inner data related functions

    /// Returns a protected arc to the shared [`GpioData`] pin table.
    fn get_data(&self) -> &Arc<RwLock<GpioData>>;

    /// Returns the driver name (used for Display only)
    fn get_driver_name(&self) -> &'static str {
        type_name::<Self>().split("::").last().unwrap()
    }

    // ########################################
    // Functions specifically bound to the driver.

    /// Opens the access to the GPIO peripheral.
    fn open(&mut self) -> Result<(), Error>;
    /// Gracefully shuts down the access, releasing all configured pins.
    fn close(&mut self) -> Result<(), Error>;
    /// Checks if the peripheral is reachable.
    fn is_connected(&self) -> bool;

    /// Selects the pin numbering scheme used to interpret pin identifiers.
    ///
    /// Must be called once, before any pin is configured; the scheme is immutable afterwards.
    fn set_numbering(&mut self, scheme: NumberingScheme) -> Result<(), Error>;

    // ########################################
    // Read/Write on pins

    /// Sets the `mode` of the specified `pin`. A pin must be bound to a mode before any
    /// read or write is accepted on it.
    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Error>;

    /// Writes `level` to the digital `pin` (valid in OUTPUT mode only).
    fn digital_write(&mut self, pin: u8, level: bool) -> Result<(), Error>;

    /// Samples the current `pin` level synchronously (valid in INPUT mode only).
    /// No debouncing, no edge detection.
    fn digital_read(&mut self, pin: u8) -> Result<bool, Error>;

    // ########################################
    // PWM

    /// Begins continuous PWM signal generation on `pin` (valid in PWM mode only).
    /// `duty` is a percentage in [0, 100]; values outside the range are clamped.
    fn pwm_start(&mut self, pin: u8, frequency_hz: f64, duty: f32) -> Result<(), Error>;

    /// Updates the duty cycle of the running PWM signal; takes effect on the next signal
    /// period. No bound on the update rate is enforced here.
    fn pwm_set_duty(&mut self, pin: u8, duty: f32) -> Result<(), Error>;

    /// Stops PWM signal generation on `pin`.
    fn pwm_stop(&mut self, pin: u8) -> Result<(), Error>;
}

impl Default for Box<dyn GpioDriver> {
    fn default() -> Self {
        Box::new(RaspiGpio::default())
    }
}
