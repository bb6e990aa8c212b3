use crate::devices::{DigitalInput, PwmOutput};
use crate::errors::Error;
use crate::loops::LoopControl;
use crate::utils::task;
use crate::utils::task::TaskHandler;

/// Duty cycle applied while the input reads HIGH.
const HIGH_DUTY: f32 = 100.0;
/// Duty cycle applied while the input reads LOW.
const LOW_DUTY: f32 = 25.0;

/// Button-driven dimmer: samples the input each iteration and sets the PWM duty cycle to
/// 100% (input HIGH) or 25% (input LOW). No pacing.
#[derive(Clone, Debug)]
pub struct DutyFollow {
    input: DigitalInput,
    output: PwmOutput,
}

impl DutyFollow {
    pub fn new(input: DigitalInput, output: PwmOutput) -> Self {
        Self { input, output }
    }

    /// Runs a single iteration: read the input, re-apply the derived duty cycle.
    pub fn step(&mut self) -> Result<(), Error> {
        match self.input.read()? {
            true => self.output.set_duty_cycle(HIGH_DUTY)?,
            false => self.output.set_duty_cycle(LOW_DUTY)?,
        };
        Ok(())
    }

    /// Follows the input until `control` is stopped. The loop never sleeps; it only yields
    /// to the scheduler between iterations.
    pub async fn run(mut self, control: LoopControl) -> Result<(), Error> {
        while control.should_continue() {
            self.step()?;
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Runs the policy as a background task.
    pub fn spawn(self, control: LoopControl) -> TaskHandler {
        task::run(self.run(control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::Board;
    use crate::io::NumberingScheme;
    use crate::mocks::MockGpio;

    fn setup() -> (MockGpio, DutyFollow) {
        let mock = MockGpio::default();
        let board = Board::new(mock.clone())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let input = DigitalInput::new(&board, 23).unwrap();
        let mut output = PwmOutput::new(&board, 18).unwrap();
        output.start(1000.0, 0.0).unwrap();
        (mock, DutyFollow::new(input, output))
    }

    #[test]
    fn test_duty_boundaries() {
        let (mock, mut follow) = setup();

        // Input LOW => duty exactly 25.
        follow.step().unwrap();
        // Input HIGH => duty exactly 100.
        mock.data.write().get_pin_mut(23).unwrap().value = 1;
        follow.step().unwrap();
        mock.data.write().get_pin_mut(23).unwrap().value = 0;
        follow.step().unwrap();

        assert_eq!(
            *mock.duty_updates.read(),
            vec![(18, 25.0), (18, 100.0), (18, 25.0)],
            "No duty values other than 25 and 100 are ever produced"
        );
    }

    #[test]
    fn test_duty_requires_started_pwm() {
        let (mock, mut follow) = setup();
        follow.output.stop().unwrap();

        // PWM no longer running: the next iteration fails fast.
        assert!(follow.step().is_err());
        assert!(mock.duty_updates.read().is_empty());
    }
}
