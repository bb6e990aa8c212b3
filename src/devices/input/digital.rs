use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::devices::Device;
use crate::errors::Error;
use crate::hardware::Board;
use crate::io::{GpioDriver, PinMode};

/// Represents a digital sensor of unspecified type (a push button typically): an input
/// [`Device`] that samples the level of an INPUT compatible pin.
#[derive(Clone, Debug)]
pub struct DigitalInput {
    // ########################################
    // # Basics
    /// The pin (id) of the [`Board`] used to read the digital value.
    pin: u8,
    /// The last sampled level.
    state: Arc<RwLock<bool>>,

    // ########################################
    // # Volatile utility data.
    driver: Box<dyn GpioDriver>,
}

impl DigitalInput {
    /// Creates an instance of a [`DigitalInput`] attached to a given board.
    ///
    /// # Parameters
    /// * `board`: the [`Board`] which the DigitalInput is attached to
    /// * `pin`: the input pin used to read the DigitalInput value
    ///
    /// # Errors
    /// * `UnknownPin`: this function will bail an error if the pin does not exist for this board.
    /// * `IncompatibleMode`: this function will bail an error if the pin does not support INPUT mode.
    pub fn new(board: &Board, pin: u8) -> Result<Self, Error> {
        let mut input = Self {
            pin,
            state: Arc::new(RwLock::new(false)),
            driver: board.get_driver(),
        };

        // Set pin mode to INPUT.
        input.driver.set_pin_mode(input.pin, PinMode::INPUT)?;

        Ok(input)
    }

    /// Samples the current pin level synchronously: no debouncing, no edge detection.
    pub fn read(&mut self) -> Result<bool, Error> {
        let level = self.driver.digital_read(self.pin)?;
        *self.state.write() = level;
        Ok(level)
    }

    // ########################################
    // Getters and Setters

    /// Retrieves the pin (id) used to read the input.
    pub fn get_pin(&self) -> u8 {
        self.pin
    }

    /// Indicates if the last sampled level was HIGH.
    pub fn is_high(&self) -> bool {
        *self.state.read()
    }
}

impl Display for DigitalInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DigitalInput (pin={}) [state={}]",
            self.pin,
            self.state.read(),
        )
    }
}

impl Device for DigitalInput {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::NumberingScheme;
    use crate::mocks::MockGpio;

    #[test]
    fn test_new_digital_input() {
        let board = Board::new(MockGpio::default())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let input = DigitalInput::new(&board, 23).unwrap();
        assert_eq!(input.get_pin(), 23);
        assert_eq!(board.get_io().get_pin(23).unwrap().mode, PinMode::INPUT);

        // Unknown pin.
        assert!(DigitalInput::new(&board, 66).is_err());
    }

    #[test]
    fn test_read() {
        let mock = MockGpio::default();
        let board = Board::new(mock.clone())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let mut input = DigitalInput::new(&board, 23).unwrap();

        assert!(!input.read().unwrap());
        assert!(!input.is_high());

        // Simulate the pin level rising in the driver.
        mock.data.write().get_pin_mut(23).unwrap().value = 1;
        assert!(input.read().unwrap());
        assert!(input.is_high());
    }

    #[test]
    fn test_read_wrong_mode() {
        let board = Board::new(MockGpio::default())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let output_pin = DigitalInput::new(&board, 23).unwrap().get_pin();
        assert_eq!(output_pin, 23);

        // A pin bound to OUTPUT cannot be read.
        let mut board = board;
        board.set_pin_mode(23, PinMode::OUTPUT).unwrap();
        let mut input = DigitalInput {
            pin: 23,
            state: Arc::new(RwLock::new(false)),
            driver: board.get_driver(),
        };
        assert!(input.read().is_err());
    }

    #[test]
    fn test_digital_display() {
        let board = Board::new(MockGpio::default())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let input = DigitalInput::new(&board, 23).unwrap();
        assert_eq!(
            format!("{}", input),
            "DigitalInput (pin=23) [state=false]"
        );
    }
}
