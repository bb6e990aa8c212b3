use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};

use crate::errors::Error;
use crate::errors::HardwareError::{
    IncompatibleMode, NumberingLocked, NumberingNotSet, UnknownPin,
};

/// Maps the 40-pin header positions (J8) to BCM GPIO numbers.
/// `None` entries are power and ground pins; index 0 is unused.
const PHYSICAL_TO_BCM: [Option<u8>; 41] = [
    None,
    None, None, Some(2), None, Some(3), None, Some(4), Some(14), None, Some(15),
    Some(17), Some(18), Some(27), None, Some(22), Some(23), None, Some(24), Some(10), None,
    Some(9), Some(25), Some(11), Some(8), None, Some(7), Some(0), Some(1), Some(5), None,
    Some(6), Some(12), Some(13), None, Some(19), Some(16), Some(26), Some(20), None, Some(21),
];

/// Highest BCM GPIO number exposed on the 40-pin header.
const BCM_MAX: u8 = 27;

/// Represents the shared pin table a [`GpioDriver`](crate::io::GpioDriver) handles.
///
/// This struct is hidden behind an `Arc<RwLock<GpioData>>` so devices, loops and the driver can
/// all observe the same state: no process-wide globals, the pin table is an explicit object.
#[derive(Clone, Debug, Default)]
pub struct GpioData {
    /// All `Pin` instances configured so far, keyed by their logical id.
    pub pins: HashMap<u8, Pin>,
    /// The pin numbering scheme, selected once before any pin is configured.
    pub scheme: Option<NumberingScheme>,
    /// A string describing the detected hardware (board model).
    pub hardware_model: String,
    /// A boolean indicating whether the driver is connected.
    pub connected: bool,
}

impl GpioData {
    /// Retrieves a reference to a pin by its logical id.
    ///
    /// # Errors
    /// * `UnknownPin` - An `Error` returned if the pin was never configured.
    pub fn get_pin(&self, pin: u8) -> Result<&Pin, Error> {
        self.pins.get(&pin).ok_or(Error::from(UnknownPin { pin }))
    }

    /// Retrieves a mutable reference to a pin by its logical id.
    ///
    /// # Errors
    /// * `UnknownPin` - An `Error` returned if the pin was never configured.
    pub fn get_pin_mut(&mut self, pin: u8) -> Result<&mut Pin, Error> {
        self.pins
            .get_mut(&pin)
            .ok_or(Error::from(UnknownPin { pin }))
    }

    /// Selects the pin numbering scheme for this driver.
    ///
    /// Selecting the same scheme twice is a no-op. Selecting a different scheme, or any scheme
    /// once a pin has been configured, fails: the scheme is immutable for the driver's lifetime.
    ///
    /// # Errors
    /// * `NumberingLocked` - the scheme cannot be changed anymore.
    pub fn set_scheme(&mut self, scheme: NumberingScheme) -> Result<(), Error> {
        let configured = self.pins.values().any(|pin| pin.mode != PinMode::UNSUPPORTED);
        match self.scheme {
            Some(current) if current == scheme && !configured => Ok(()),
            Some(current) => Err(Error::from(NumberingLocked { scheme: current })),
            None if configured => Err(Error::from(NumberingLocked { scheme })),
            None => {
                self.scheme = Some(scheme);
                Ok(())
            }
        }
    }

    /// Returns the selected numbering scheme.
    ///
    /// # Errors
    /// * `NumberingNotSet` - no scheme was selected yet (pins cannot be configured).
    pub fn get_scheme(&self) -> Result<NumberingScheme, Error> {
        self.scheme.ok_or(Error::from(NumberingNotSet))
    }
}

// ########################################

/// Represents the current state and configuration of a pin.
#[derive(Clone, Default)]
pub struct Pin {
    /// The logical pin id, which also corresponds to the index of the [`GpioData::pins`] hashmap.
    /// Its meaning depends on the driver's [`NumberingScheme`].
    pub id: u8,
    /// The pin name: 'GPIO18' or 'PIN12' for instance.
    pub name: String,
    /// Currently configured mode.
    pub mode: PinMode,
    /// All pin supported modes.
    pub supported_modes: Vec<PinMode>,
    /// Last digital level driven or sampled (0 or 1).
    pub value: u16,
    /// PWM signal state, present once PWM generation has started.
    pub pwm: Option<PwmState>,
}

impl Pin {
    /// Verifies if the pin supports the given mode.
    pub fn supports_mode(&self, mode: PinMode) -> bool {
        self.supported_modes.iter().any(|m| *m == mode)
    }

    /// Validates that the pin is in the given mode.
    ///
    /// # Errors
    /// *`IncompatibleMode`: the pin's current mode does not match the expected mode.
    pub fn validate_current_mode(&self, mode: PinMode) -> Result<(), Error> {
        match self.mode == mode {
            true => Ok(()),
            false => Err(Error::from(IncompatibleMode {
                mode: self.mode,
                pin: self.id,
                context: "check_current_mode",
            })),
        }
    }
}

impl Debug for Pin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug_struct = f.debug_struct("Pin");
        debug_struct
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mode", &format!("{}", self.mode))
            .field("supported modes", &self.supported_modes)
            .field("value", &self.value);
        if let Some(pwm) = &self.pwm {
            debug_struct.field("pwm", pwm);
        }
        debug_struct.finish()
    }
}

// ########################################

/// State of a running PWM signal on a pin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PwmState {
    /// The signal frequency, in hertz.
    pub frequency_hz: f64,
    /// The duty cycle, as a percentage in [0, 100].
    pub duty: f32,
}

// ########################################

/// Enumerates the possible modes for a pin.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum PinMode {
    /// Digital input: the pin level can be sampled.
    INPUT,
    /// Digital output: the pin can be driven HIGH or LOW.
    OUTPUT,
    /// PWM output: the pin carries a square wave with an adjustable duty cycle.
    PWM,
    /// Pin not configured yet: read and write are rejected.
    #[default]
    UNSUPPORTED,
}

impl Display for PinMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ########################################

/// Enumerates the conventions mapping a human-facing pin identifier to a controller pin.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NumberingScheme {
    /// Identifiers are physical positions on the 40-pin header.
    Board,
    /// Identifiers are the Broadcom GPIO numbers.
    Bcm,
}

impl NumberingScheme {
    /// Resolves a logical pin identifier to its BCM GPIO number.
    ///
    /// # Errors
    /// * `UnknownPin`: the identifier does not name a usable GPIO under this scheme
    ///   (out of range, or a power/ground position on the header).
    pub fn to_bcm(self, pin: u8) -> Result<u8, Error> {
        let bcm = match self {
            NumberingScheme::Board => *PHYSICAL_TO_BCM.get(pin as usize).unwrap_or(&None),
            NumberingScheme::Bcm => (pin <= BCM_MAX).then_some(pin),
        };
        bcm.ok_or(Error::from(UnknownPin { pin }))
    }
}

impl Display for NumberingScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberingScheme::Board => write!(f, "BOARD"),
            NumberingScheme::Bcm => write!(f, "BCM"),
        }
    }
}
