use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::devices::Device;
use crate::errors::Error;
use crate::hardware::Board;
use crate::io::{GpioDriver, PinMode};

/// Represents a digital actuator of unspecified type (a LED most of the time): an output
/// [`Device`] that writes HIGH/LOW levels to an OUTPUT compatible pin.
#[derive(Clone, Debug)]
pub struct DigitalOutput {
    // ########################################
    // # Basics
    /// The pin (id) of the [`Board`] used to drive the output level.
    pin: u8,
    /// The last level driven.
    state: Arc<RwLock<bool>>,
    /// The output default level (default: LOW).
    default: bool,

    // ########################################
    // # Volatile utility data.
    driver: Box<dyn GpioDriver>,
}

impl DigitalOutput {
    /// Creates an instance of a [`DigitalOutput`] attached to a given board.
    ///
    /// The pin is bound to OUTPUT mode but not driven yet: the line stays untouched until
    /// the first write.
    ///
    /// # Parameters
    /// * `board`: the [`Board`] which the DigitalOutput is attached to.
    /// * `pin`: the output pin used to drive the level.
    /// * `default`: the default level assumed by this device.
    ///
    /// # Errors
    /// * `UnknownPin`: this function will bail an error if the pin does not exist for this board.
    /// * `IncompatibleMode`: this function will bail an error if the pin does not support OUTPUT mode.
    pub fn new(board: &Board, pin: u8, default: bool) -> Result<Self, Error> {
        let mut output = Self {
            pin,
            state: Arc::new(RwLock::new(default)),
            default,
            driver: board.get_driver(),
        };

        // Set pin mode to OUTPUT.
        output.driver.set_pin_mode(output.pin, PinMode::OUTPUT)?;

        Ok(output)
    }

    /// Drives the output to the given level.
    pub fn write(&mut self, level: bool) -> Result<&Self, Error> {
        self.driver.digital_write(self.pin, level)?;
        *self.state.write() = level;
        Ok(self)
    }

    /// Turn the output HIGH.
    pub fn turn_on(&mut self) -> Result<&Self, Error> {
        self.write(true)
    }

    /// Turn the output LOW.
    pub fn turn_off(&mut self) -> Result<&Self, Error> {
        self.write(false)
    }

    /// Toggle the current state, if on then turn off, if off then turn on.
    pub fn toggle(&mut self) -> Result<&Self, Error> {
        match self.is_high() {
            true => self.turn_off(),
            false => self.turn_on(),
        }
    }

    // ########################################
    // Setters and Getters.

    /// Retrieves the pin (id) used to drive the output.
    pub fn get_pin(&self) -> u8 {
        self.pin
    }

    /// Indicates if the device state is HIGH.
    pub fn is_high(&self) -> bool {
        *self.state.read()
    }

    /// Indicates if the device state is LOW.
    pub fn is_low(&self) -> bool {
        !*self.state.read()
    }

    /// Retrieves the device default level.
    pub fn get_default(&self) -> bool {
        self.default
    }
}

impl Display for DigitalOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DigitalOutput (pin={}) [state={}, default={}]",
            self.pin,
            self.state.read(),
            self.default,
        )
    }
}

impl Device for DigitalOutput {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::NumberingScheme;
    use crate::mocks::MockGpio;

    fn test_board() -> Board {
        Board::new(MockGpio::default())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap()
    }

    #[test]
    fn test_creation() {
        let board = test_board();

        // Default LOW state.
        let output = DigitalOutput::new(&board, 18, false).unwrap();
        assert_eq!(output.get_pin(), 18);
        assert!(output.is_low());
        assert!(!output.is_high());
        assert!(!output.get_default());

        // Default HIGH state.
        let output = DigitalOutput::new(&board, 13, true).unwrap();
        assert_eq!(output.get_pin(), 13);
        assert!(output.is_high());
        assert!(!output.is_low());

        // The pin is bound to OUTPUT mode on creation.
        assert_eq!(board.get_io().get_pin(18).unwrap().mode, PinMode::OUTPUT);
    }

    #[test]
    fn test_creation_failures() {
        let board = test_board();

        // Unknown pin.
        assert!(DigitalOutput::new(&board, 66, false).is_err());
        // Input-only pin does not support OUTPUT mode.
        assert!(DigitalOutput::new(&board, 24, false).is_err());
        // No scheme selected yet.
        let board = Board::new(MockGpio::default());
        assert!(DigitalOutput::new(&board, 18, false).is_err());
    }

    #[test]
    fn test_set_high_low() {
        let mut output = DigitalOutput::new(&test_board(), 18, false).unwrap();
        assert!(output.turn_on().is_ok());
        assert!(output.is_high());
        assert!(output.turn_off().is_ok());
        assert!(output.is_low());
    }

    #[test]
    fn test_toggle() {
        let mut output = DigitalOutput::new(&test_board(), 13, false).unwrap();
        assert!(output.toggle().is_ok()); // Toggle to HIGH
        assert!(output.is_high());
        assert!(output.toggle().is_ok()); // Toggle to LOW
        assert!(output.is_low());
    }

    #[test]
    fn test_board_numbering_write() {
        let mock = MockGpio::default();
        let board = Board::new(mock.clone())
            .with_numbering(NumberingScheme::Board)
            .unwrap();

        // Physical pin 12: configured then driven under the same identifier.
        let mut output = DigitalOutput::new(&board, 12, false).unwrap();
        output.turn_on().unwrap();
        assert_eq!(*mock.writes.read(), vec![(12, true)]);
    }

    #[test]
    fn test_write_reaches_the_driver() {
        let mock = MockGpio::default();
        let board = Board::new(mock.clone())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let mut output = DigitalOutput::new(&board, 18, false).unwrap();

        output.write(true).unwrap();
        output.write(false).unwrap();
        assert_eq!(*mock.writes.read(), vec![(18, true), (18, false)]);
        assert_eq!(board.get_io().get_pin(18).unwrap().value, 0);
    }

    #[test]
    fn test_display_impl() {
        let mut output = DigitalOutput::new(&test_board(), 18, true).unwrap();
        let _ = output.turn_off();
        assert_eq!(
            format!("{}", output),
            "DigitalOutput (pin=18) [state=false, default=true]"
        );
    }
}
