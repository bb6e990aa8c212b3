use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::devices::{Device, DigitalOutput};
use crate::errors::Error;
use crate::hardware::Board;

/// Spin direction of a stepper drive, expressed as the level written to the direction pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    /// Direction pin driven LOW.
    Clockwise,
    /// Direction pin driven HIGH.
    CounterClockwise,
}

impl StepDirection {
    fn level(self) -> bool {
        match self {
            StepDirection::Clockwise => false,
            StepDirection::CounterClockwise => true,
        }
    }
}

/// Represents a stepper motor behind a step/direction driver carrier (a DRV8825 typically):
/// an output [`Device`] built on three [`DigitalOutput`] lines.
///
/// The enable line is active-low, as on the DRV8825: the carrier is held disabled between
/// drives so the motor does not draw current while idle.
#[derive(Clone, Debug)]
pub struct StepperOutput {
    /// Step pulse line: one rising edge per step.
    step: DigitalOutput,
    /// Direction line, sampled by the carrier on each step pulse.
    direction: DigitalOutput,
    /// Active-low enable line.
    enable: DigitalOutput,
}

impl StepperOutput {
    /// Creates an instance of a [`StepperOutput`] attached to a given board.
    ///
    /// All three pins are bound to OUTPUT mode and driven to their idle levels: enable HIGH
    /// (carrier disabled), direction LOW, step LOW.
    ///
    /// # Parameters
    /// * `board`: the [`Board`] which the StepperOutput is attached to.
    /// * `step_pin`: the pin pulsed once per step.
    /// * `direction_pin`: the pin selecting the spin direction.
    /// * `enable_pin`: the active-low enable pin of the carrier.
    ///
    /// # Errors
    /// * `UnknownPin`: this function will bail an error if a pin does not exist for this board.
    /// * `IncompatibleMode`: this function will bail an error if a pin does not support OUTPUT mode.
    pub fn new(board: &Board, step_pin: u8, direction_pin: u8, enable_pin: u8) -> Result<Self, Error> {
        let mut stepper = Self {
            step: DigitalOutput::new(board, step_pin, false)?,
            direction: DigitalOutput::new(board, direction_pin, false)?,
            enable: DigitalOutput::new(board, enable_pin, true)?,
        };

        // Idle levels: carrier disabled, direction and step LOW.
        stepper.enable.turn_on()?;
        stepper.direction.turn_off()?;
        stepper.step.turn_off()?;

        Ok(stepper)
    }

    /// Drives `steps` step pulses in the given direction, `pulse` apart on each edge.
    ///
    /// The carrier is enabled for the duration of the drive only, then disabled again. Each
    /// step is one HIGH/LOW cycle on the step pin, holding `pulse` after each edge.
    pub async fn drive(
        &mut self,
        steps: u32,
        direction: StepDirection,
        pulse: Duration,
    ) -> Result<(), Error> {
        self.direction.write(direction.level())?;
        self.enable.turn_off()?;
        for _ in 0..steps {
            self.step.turn_on()?;
            tokio::time::sleep(pulse).await;
            self.step.turn_off()?;
            tokio::time::sleep(pulse).await;
        }
        self.enable.turn_on()?;
        Ok(())
    }

    // ########################################
    // Setters and Getters.

    /// Retrieves the pin (id) pulsed once per step.
    pub fn get_step_pin(&self) -> u8 {
        self.step.get_pin()
    }

    /// Retrieves the pin (id) selecting the spin direction.
    pub fn get_direction_pin(&self) -> u8 {
        self.direction.get_pin()
    }

    /// Retrieves the active-low enable pin (id).
    pub fn get_enable_pin(&self) -> u8 {
        self.enable.get_pin()
    }

    /// Indicates if the carrier is currently enabled (enable line LOW).
    pub fn is_enabled(&self) -> bool {
        self.enable.is_low()
    }
}

impl Display for StepperOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StepperOutput (step={}, direction={}, enable={}) [enabled={}]",
            self.step.get_pin(),
            self.direction.get_pin(),
            self.enable.get_pin(),
            self.is_enabled(),
        )
    }
}

impl Device for StepperOutput {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{NumberingScheme, PinMode};
    use crate::mocks::MockGpio;

    fn setup() -> (MockGpio, StepperOutput) {
        let mock = MockGpio::default();
        let board = Board::new(mock.clone())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let stepper = StepperOutput::new(&board, 18, 13, 4).unwrap();
        (mock, stepper)
    }

    #[test]
    fn test_creation() {
        let (mock, stepper) = setup();

        assert_eq!(stepper.get_step_pin(), 18);
        assert_eq!(stepper.get_direction_pin(), 13);
        assert_eq!(stepper.get_enable_pin(), 4);
        assert!(!stepper.is_enabled());

        // All three pins bound to OUTPUT, then driven to their idle levels.
        let data = mock.data.read();
        assert_eq!(data.get_pin(18).unwrap().mode, PinMode::OUTPUT);
        assert_eq!(data.get_pin(13).unwrap().mode, PinMode::OUTPUT);
        assert_eq!(data.get_pin(4).unwrap().mode, PinMode::OUTPUT);
        assert_eq!(
            *mock.writes.read(),
            vec![(4, true), (13, false), (18, false)],
            "Idle levels: carrier disabled, direction and step LOW"
        );
    }

    #[test]
    fn test_creation_failures() {
        let board = Board::new(MockGpio::default())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();

        // Input-only pin cannot carry the step line.
        assert!(StepperOutput::new(&board, 24, 13, 4).is_err());
        // Unknown enable pin.
        assert!(StepperOutput::new(&board, 18, 13, 66).is_err());
    }

    #[tokio::test]
    async fn test_drive_sequence() {
        let (mock, mut stepper) = setup();
        mock.writes.write().clear();

        stepper
            .drive(2, StepDirection::CounterClockwise, Duration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(
            *mock.writes.read(),
            vec![
                (13, true),  // direction
                (4, false),  // enable the carrier
                (18, true),  // step 1
                (18, false),
                (18, true),  // step 2
                (18, false),
                (4, true),   // disable the carrier
            ],
        );
        assert!(!stepper.is_enabled());
    }

    #[tokio::test]
    async fn test_drive_direction_levels() {
        let (mock, mut stepper) = setup();
        mock.writes.write().clear();

        stepper
            .drive(0, StepDirection::Clockwise, Duration::from_millis(1))
            .await
            .unwrap();

        // Zero steps: the direction is latched and the carrier enabled then released,
        // without a single step pulse.
        assert_eq!(*mock.writes.read(), vec![(13, false), (4, false), (4, true)]);
    }

    #[test]
    fn test_display_impl() {
        let (_mock, stepper) = setup();
        assert_eq!(
            format!("{}", stepper),
            "StepperOutput (step=18, direction=13, enable=4) [enabled=false]"
        );
    }
}
