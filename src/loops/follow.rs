use crate::devices::{DigitalInput, DigitalOutput};
use crate::errors::Error;
use crate::loops::LoopControl;
use crate::utils::task;
use crate::utils::task::TaskHandler;

/// Level-inverted button follower: samples the input each iteration and drives the output to
/// the opposite level. No debounce, no pacing.
#[derive(Clone, Debug)]
pub struct LevelFollow {
    input: DigitalInput,
    output: DigitalOutput,
}

impl LevelFollow {
    pub fn new(input: DigitalInput, output: DigitalOutput) -> Self {
        Self { input, output }
    }

    /// Runs a single iteration: the output level is a pure function of the current sample,
    /// re-applied identically every time.
    pub fn step(&mut self) -> Result<(), Error> {
        match self.input.read()? {
            true => self.output.turn_off()?,
            false => self.output.turn_on()?,
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
    use crate::pause;

    fn setup() -> (MockGpio, LevelFollow) {
        let mock = MockGpio::default();
        let board = Board::new(mock.clone())
            .with_numbering(NumberingScheme::Bcm)
            .unwrap();
        let input = DigitalInput::new(&board, 23).unwrap();
        let output = DigitalOutput::new(&board, 18, false).unwrap();
        (mock, LevelFollow::new(input, output))
    }

    #[test]
    fn test_inverted_mapping() {
        let (mock, mut follow) = setup();

        // Input LOW => output HIGH.
        follow.step().unwrap();
        assert_eq!(mock.data.read().get_pin(18).unwrap().value, 1);

        // Input HIGH => output LOW.
        mock.data.write().get_pin_mut(23).unwrap().value = 1;
        follow.step().unwrap();
        assert_eq!(mock.data.read().get_pin(18).unwrap().value, 0);
    }

    #[test]
    fn test_idempotence() {
        let (mock, mut follow) = setup();

        // A constant input produces the same derived output on every iteration,
        // written unconditionally each time.
        for _ in 0..5 {
            follow.step().unwrap();
            assert_eq!(mock.data.read().get_pin(18).unwrap().value, 1);
        }
        assert_eq!(mock.writes.read().len(), 5);
    }

    #[test]
    fn test_toggle_applies_next_iteration() {
        let (mock, mut follow) = setup();

        follow.step().unwrap();
        assert_eq!(mock.data.read().get_pin(18).unwrap().value, 1);

        // Flip the input: the very next iteration flips the output. No hysteresis, no delay.
        mock.data.write().get_pin_mut(23).unwrap().value = 1;
        follow.step().unwrap();
        assert_eq!(mock.data.read().get_pin(18).unwrap().value, 0);

        mock.data.write().get_pin_mut(23).unwrap().value = 0;
        follow.step().unwrap();
        assert_eq!(mock.data.read().get_pin(18).unwrap().value, 1);
    }

    #[tokio::test]
    async fn test_run_stops() {
        let (_mock, follow) = setup();
        let control = LoopControl::default();
        let handler = follow.spawn(control.clone());

        pause!(20);
        control.stop();
        handler.await.unwrap().unwrap();
    }
}
