use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::devices::Device;
use crate::errors::Error;
use crate::hardware::Board;
use crate::io::{GpioDriver, PinMode, PwmState};

/// Represents a PWM actuator (a dimmable LED for instance): an output [`Device`] that drives a
/// square wave with an adjustable duty cycle on a PWM compatible pin.
#[derive(Clone, Debug)]
pub struct PwmOutput {
    // ########################################
    // # Basics
    /// The pin (id) of the [`Board`] used to generate the signal.
    pin: u8,
    /// The running signal state, present once [`PwmOutput::start`] has been called.
    state: Arc<RwLock<Option<PwmState>>>,

    // ########################################
    // # Volatile utility data.
    driver: Box<dyn GpioDriver>,
}

impl PwmOutput {
    /// Creates an instance of a [`PwmOutput`] attached to a given board.
    ///
    /// The pin is bound to PWM mode; no signal is generated until [`PwmOutput::start`].
    ///
    /// # Errors
    /// * `UnknownPin`: this function will bail an error if the pin does not exist for this board.
    /// * `IncompatibleMode`: this function will bail an error if the pin does not support PWM mode.
    pub fn new(board: &Board, pin: u8) -> Result<Self, Error> {
        let mut output = Self {
            pin,
            state: Arc::new(RwLock::new(None)),
            driver: board.get_driver(),
        };

        // Set pin mode to PWM.
        output.driver.set_pin_mode(output.pin, PinMode::PWM)?;

        Ok(output)
    }

    /// Begins continuous signal generation at the given frequency and duty cycle.
    ///
    /// # Parameters
    /// * `frequency_hz`: the signal frequency, in hertz.
    /// * `duty`: the initial duty cycle, in percent (clamped to [0, 100]).
    pub fn start(&mut self, frequency_hz: f64, duty: f32) -> Result<&Self, Error> {
        let duty = duty.clamp(0.0, 100.0);
        self.driver.pwm_start(self.pin, frequency_hz, duty)?;
        *self.state.write() = Some(PwmState { frequency_hz, duty });
        Ok(self)
    }

    /// Updates the running signal's duty cycle (percent, clamped to [0, 100]).
    ///
    /// Takes effect on the next signal period. No bound on the update rate is enforced:
    /// a caller may starve the hardware with rapid updates.
    ///
    /// # Errors
    /// * `PwmNotStarted`: signal generation was not started on this pin.
    pub fn set_duty_cycle(&mut self, duty: f32) -> Result<&Self, Error> {
        let duty = duty.clamp(0.0, 100.0);
        self.driver.pwm_set_duty(self.pin, duty)?;
        if let Some(state) = self.state.write().as_mut() {
            state.duty = duty;
        }
        Ok(self)
    }

    /// Stops the signal generation. The pin stays in PWM mode and can be started again.
    pub fn stop(&mut self) -> Result<&Self, Error> {
        self.driver.pwm_stop(self.pin)?;
        *self.state.write() = None;
        Ok(self)
    }

    // ########################################
    // Setters and Getters.

    /// Retrieves the pin (id) used to generate the signal.
    pub fn get_pin(&self) -> u8 {
        self.pin
    }

    /// Gets the current duty cycle (percent), if the signal is running.
    pub fn get_duty_cycle(&self) -> Option<f32> {
        self.state.read().map(|state| state.duty)
    }

    /// Gets the signal frequency (hertz), if the signal is running.
    pub fn get_frequency(&self) -> Option<f64> {
        self.state.read().map(|state| state.frequency_hz)
    }
}

impl Display for PwmOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self.state.read() {
            Some(state) => write!(
                f,
                "PwmOutput (pin={}) [frequency={}Hz, duty={}%]",
                self.pin, state.frequency_hz, state.duty,
            ),
            None => write!(f, "PwmOutput (pin={}) [stopped]", self.pin),
        }
    }
}

impl Device for PwmOutput {}

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
        let output = PwmOutput::new(&board, 18).unwrap();
        assert_eq!(output.get_pin(), 18);
        assert_eq!(output.get_duty_cycle(), None);
        assert_eq!(board.get_io().get_pin(18).unwrap().mode, PinMode::PWM);

        // Input-only pin does not support PWM mode.
        assert!(PwmOutput::new(&board, 24).is_err());
    }

    #[test]
    fn test_start() {
        let mut output = PwmOutput::new(&test_board(), 18).unwrap();
        assert!(output.start(1000.0, 0.0).is_ok());
        assert_eq!(output.get_duty_cycle(), Some(0.0));
        assert_eq!(output.get_frequency(), Some(1000.0));
    }

    #[test]
    fn test_set_duty_cycle() {
        let mut output = PwmOutput::new(&test_board(), 18).unwrap();

        // Updating the duty cycle before start is a hardware misuse.
        assert!(output.set_duty_cycle(50.0).is_err());

        output.start(1000.0, 0.0).unwrap();
        assert!(output.set_duty_cycle(25.0).is_ok());
        assert_eq!(output.get_duty_cycle(), Some(25.0));

        // Values outside [0, 100] are clamped.
        assert!(output.set_duty_cycle(150.0).is_ok());
        assert_eq!(output.get_duty_cycle(), Some(100.0));
        assert!(output.set_duty_cycle(-5.0).is_ok());
        assert_eq!(output.get_duty_cycle(), Some(0.0));
    }

    #[test]
    fn test_stop() {
        let mut output = PwmOutput::new(&test_board(), 18).unwrap();
        output.start(1000.0, 25.0).unwrap();
        assert!(output.stop().is_ok());
        assert_eq!(output.get_duty_cycle(), None);
        assert!(output.set_duty_cycle(50.0).is_err());
    }

    #[test]
    fn test_display_impl() {
        let mut output = PwmOutput::new(&test_board(), 18).unwrap();
        assert_eq!(format!("{}", output), "PwmOutput (pin=18) [stopped]");
        output.start(1000.0, 25.0).unwrap();
        assert_eq!(
            format!("{}", output),
            "PwmOutput (pin=18) [frequency=1000Hz, duty=25%]"
        );
    }
}
