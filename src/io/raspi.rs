use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::{Mutex, RwLock};
use rppal::gpio::{Gpio, IoPin, Level, Mode};
use rppal::system::DeviceInfo;

use crate::errors::DriverError::{IoException, NotInitialized};
use crate::errors::Error;
use crate::errors::HardwareError::{IncompatibleMode, PwmNotStarted, UnknownPin};
use crate::io::{GpioData, GpioDriver, NumberingScheme, Pin, PinMode, PwmState};

/// GPIO driver for the Raspberry Pi, backed by the `rppal` crate.
///
/// Pin identifiers are resolved to BCM GPIO numbers through the driver's [`NumberingScheme`]
/// before touching the hardware. PWM is generated in software on any pin
/// (`rppal`'s soft-PWM).
#[derive(Clone, Debug)]
pub struct RaspiGpio {
    /// Handle to the GPIO peripheral, present once [`RaspiGpio::open`] succeeded.
    gpio: Option<Gpio>,
    /// Claimed hardware pins, keyed by BCM number. An [`IoPin`] reverts to its previous
    /// mode when dropped, so clearing this map on close releases the pins.
    pins: Arc<Mutex<HashMap<u8, IoPin>>>,
    /// The shared pin table.
    data: Arc<RwLock<GpioData>>,
}

impl Default for RaspiGpio {
    fn default() -> Self {
        Self {
            gpio: None,
            pins: Arc::new(Mutex::new(HashMap::new())),
            data: Arc::new(RwLock::new(GpioData::default())),
        }
    }
}

impl RaspiGpio {
    /// Resolves a logical pin to its BCM number and validates it is in the expected mode.
    fn validate_pin(&self, pin: u8, mode: PinMode) -> Result<u8, Error> {
        let data = self.data.read();
        data.get_pin(pin)?.validate_current_mode(mode)?;
        data.get_scheme()?.to_bcm(pin)
    }
}

impl Display for RaspiGpio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [model={}]",
            self.get_driver_name(),
            self.data.read().hardware_model,
        )
    }
}

impl GpioDriver for RaspiGpio {
    fn get_data(&self) -> &Arc<RwLock<GpioData>> {
        &self.data
    }

    fn open(&mut self) -> Result<(), Error> {
        let gpio = Gpio::new()?;
        let model = DeviceInfo::new()
            .map_err(|_| {
                Error::from(IoException {
                    info: String::from("unknown Raspberry Pi model"),
                })
            })?
            .model()
            .to_string();
        self.gpio = Some(gpio);

        let mut data = self.data.write();
        data.hardware_model = model;
        data.connected = true;
        trace!("GPIO peripheral opened: {}", data.hardware_model);
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        // Dropping the IoPins hands the pins back in their previous mode.
        self.pins.lock().clear();
        self.gpio = None;
        self.data.write().connected = false;
        trace!("GPIO peripheral closed");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.data.read().connected
    }

    fn set_numbering(&mut self, scheme: NumberingScheme) -> Result<(), Error> {
        self.data.write().set_scheme(scheme)
    }

    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Error> {
        let gpio = self.gpio.as_ref().ok_or(Error::from(NotInitialized))?;
        let scheme = self.data.read().get_scheme()?;
        let bcm = scheme.to_bcm(pin)?;

        // PWM rides on an output pin: the signal itself is started through `pwm_start`.
        let target = match mode {
            PinMode::INPUT => Mode::Input,
            PinMode::OUTPUT | PinMode::PWM => Mode::Output,
            PinMode::UNSUPPORTED => {
                return Err(Error::from(IncompatibleMode {
                    pin,
                    mode,
                    context: "set pin mode",
                }))
            }
        };

        {
            let mut pins = self.pins.lock();
            match pins.get_mut(&bcm) {
                Some(io_pin) => io_pin.set_mode(target),
                None => {
                    let io_pin = gpio.get(bcm)?.into_io(target);
                    pins.insert(bcm, io_pin);
                }
            }
        }

        let mut data = self.data.write();
        let name = match scheme {
            NumberingScheme::Board => format!("PIN{}", pin),
            NumberingScheme::Bcm => format!("GPIO{}", pin),
        };
        let entry = data.pins.entry(pin).or_insert_with(|| Pin {
            id: pin,
            name,
            supported_modes: vec![PinMode::INPUT, PinMode::OUTPUT, PinMode::PWM],
            ..Default::default()
        });
        entry.mode = mode;
        if mode != PinMode::PWM {
            entry.pwm = None;
        }
        trace!("Pin {} ({}) configured as {}", pin, entry.name, mode);
        Ok(())
    }

    fn digital_write(&mut self, pin: u8, level: bool) -> Result<(), Error> {
        let bcm = self.validate_pin(pin, PinMode::OUTPUT)?;

        let mut pins = self.pins.lock();
        let io_pin = pins.get_mut(&bcm).ok_or(Error::from(UnknownPin { pin }))?;
        match level {
            true => io_pin.set_high(),
            false => io_pin.set_low(),
        }
        drop(pins);

        self.data.write().get_pin_mut(pin)?.value = u16::from(level);
        debug!("Pin {} driven {}", pin, if level { "HIGH" } else { "LOW" });
        Ok(())
    }

    fn digital_read(&mut self, pin: u8) -> Result<bool, Error> {
        let bcm = self.validate_pin(pin, PinMode::INPUT)?;

        let mut pins = self.pins.lock();
        let io_pin = pins.get_mut(&bcm).ok_or(Error::from(UnknownPin { pin }))?;
        let level = io_pin.read() == Level::High;
        drop(pins);

        self.data.write().get_pin_mut(pin)?.value = u16::from(level);
        Ok(level)
    }

    fn pwm_start(&mut self, pin: u8, frequency_hz: f64, duty: f32) -> Result<(), Error> {
        let duty = duty.clamp(0.0, 100.0);
        let bcm = self.validate_pin(pin, PinMode::PWM)?;

        let mut pins = self.pins.lock();
        let io_pin = pins.get_mut(&bcm).ok_or(Error::from(UnknownPin { pin }))?;
        io_pin.set_pwm_frequency(frequency_hz, f64::from(duty) / 100.0)?;
        drop(pins);

        self.data.write().get_pin_mut(pin)?.pwm = Some(PwmState { frequency_hz, duty });
        debug!("Pin {} PWM started at {}Hz, duty {}%", pin, frequency_hz, duty);
        Ok(())
    }

    fn pwm_set_duty(&mut self, pin: u8, duty: f32) -> Result<(), Error> {
        let duty = duty.clamp(0.0, 100.0);
        let (bcm, frequency_hz) = {
            let data = self.data.read();
            let state = data
                .get_pin(pin)?
                .pwm
                .ok_or(Error::from(PwmNotStarted { pin }))?;
            (data.get_scheme()?.to_bcm(pin)?, state.frequency_hz)
        };

        let mut pins = self.pins.lock();
        let io_pin = pins.get_mut(&bcm).ok_or(Error::from(UnknownPin { pin }))?;
        io_pin.set_pwm_frequency(frequency_hz, f64::from(duty) / 100.0)?;
        drop(pins);

        if let Some(state) = self.data.write().get_pin_mut(pin)?.pwm.as_mut() {
            state.duty = duty;
        }
        Ok(())
    }

    fn pwm_stop(&mut self, pin: u8) -> Result<(), Error> {
        let bcm = self.validate_pin(pin, PinMode::PWM)?;

        let mut pins = self.pins.lock();
        let io_pin = pins.get_mut(&bcm).ok_or(Error::from(UnknownPin { pin }))?;
        io_pin.clear_pwm()?;
        drop(pins);

        self.data.write().get_pin_mut(pin)?.pwm = None;
        debug!("Pin {} PWM stopped", pin);
        Ok(())
    }
}
