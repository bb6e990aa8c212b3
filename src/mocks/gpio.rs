use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::Error;
use crate::errors::HardwareError::{IncompatibleMode, PwmNotStarted};
use crate::io::{GpioData, GpioDriver, NumberingScheme, PinMode, PwmState};
use crate::mocks::create_test_gpio_data;

/// An in-memory [`GpioDriver`]: pin state lives in the shared [`GpioData`] table only,
/// no hardware is touched. Digital writes and duty updates are journaled so tests can
/// assert on the exact sequence of operations a device or a loop performed.
#[derive(Clone, Debug)]
pub struct MockGpio {
    /// The shared pin table.
    pub data: Arc<RwLock<GpioData>>,
    /// Every digital write performed, in order: (pin, level).
    pub writes: Arc<RwLock<Vec<(u8, bool)>>>,
    /// Every duty cycle update performed, in order: (pin, duty).
    pub duty_updates: Arc<RwLock<Vec<(u8, f32)>>>,
}

impl Default for MockGpio {
    fn default() -> Self {
        Self {
            data: Arc::new(RwLock::new(create_test_gpio_data())),
            writes: Arc::new(RwLock::new(vec![])),
            duty_updates: Arc::new(RwLock::new(vec![])),
        }
    }
}

impl Display for MockGpio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [model={}]",
            self.get_driver_name(),
            self.data.read().hardware_model
        )
    }
}

impl GpioDriver for MockGpio {
    fn get_data(&self) -> &Arc<RwLock<GpioData>> {
        &self.data
    }

    fn open(&mut self) -> Result<(), Error> {
        self.data.write().connected = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.data.write().connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.data.read().connected
    }

    fn set_numbering(&mut self, scheme: NumberingScheme) -> Result<(), Error> {
        self.data.write().set_scheme(scheme)
    }

    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Error> {
        let mut data = self.data.write();
        // The scheme resolution only validates the identifier: the table stays keyed by the
        // logical pin id, so reads and writes use the same key the caller configured.
        data.get_scheme()?.to_bcm(pin)?;
        let pin = data.get_pin_mut(pin)?;
        if !pin.supports_mode(mode) {
            return Err(Error::from(IncompatibleMode {
                pin: pin.id,
                mode,
                context: "try to set pin mode",
            }));
        }
        pin.mode = mode;
        if mode != PinMode::PWM {
            pin.pwm = None;
        }
        Ok(())
    }

    fn digital_write(&mut self, pin: u8, level: bool) -> Result<(), Error> {
        let mut data = self.data.write();
        let pin = data.get_pin_mut(pin)?;
        pin.validate_current_mode(PinMode::OUTPUT)?;
        pin.value = u16::from(level);
        self.writes.write().push((pin.id, level));
        Ok(())
    }

    fn digital_read(&mut self, pin: u8) -> Result<bool, Error> {
        let data = self.data.read();
        let pin = data.get_pin(pin)?;
        pin.validate_current_mode(PinMode::INPUT)?;
        Ok(pin.value != 0)
    }

    fn pwm_start(&mut self, pin: u8, frequency_hz: f64, duty: f32) -> Result<(), Error> {
        let mut data = self.data.write();
        let pin = data.get_pin_mut(pin)?;
        pin.validate_current_mode(PinMode::PWM)?;
        pin.pwm = Some(PwmState {
            frequency_hz,
            duty: duty.clamp(0.0, 100.0),
        });
        Ok(())
    }

    fn pwm_set_duty(&mut self, pin: u8, duty: f32) -> Result<(), Error> {
        let mut data = self.data.write();
        let pin = data.get_pin_mut(pin)?;
        pin.validate_current_mode(PinMode::PWM)?;
        let pwm = pin.pwm.as_mut().ok_or(Error::from(PwmNotStarted { pin: pin.id }))?;
        pwm.duty = duty.clamp(0.0, 100.0);
        self.duty_updates.write().push((pin.id, pwm.duty));
        Ok(())
    }

    fn pwm_stop(&mut self, pin: u8) -> Result<(), Error> {
        let mut data = self.data.write();
        let pin = data.get_pin_mut(pin)?;
        pin.validate_current_mode(PinMode::PWM)?;
        pin.pwm = None;
        Ok(())
    }
}
