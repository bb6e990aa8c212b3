use std::time::Duration;

use crate::devices::DigitalOutput;
use crate::errors::Error;
use crate::loops::LoopControl;
use crate::pause;
use crate::utils::task;
use crate::utils::task::TaskHandler;

/// Unconditional fixed-rate square wave: drives the output LOW then HIGH, pausing one interval
/// after each write.
#[derive(Clone, Debug)]
pub struct Blink {
    output: DigitalOutput,
    interval: Duration,
}

impl Blink {
    /// Creates a blink policy toggling `output` every `interval_ms` milliseconds.
    pub fn new(output: DigitalOutput, interval_ms: u64) -> Self {
        Self {
            output,
            interval: Duration::from_millis(interval_ms),
        }
    }

    /// Runs a single iteration: write LOW, pause, write HIGH, pause.
    pub async fn step(&mut self) -> Result<(), Error> {
        self.output.turn_off()?;
        pause!(self.interval.as_millis());
        self.output.turn_on()?;
        pause!(self.interval.as_millis());
        Ok(())
    }

    /// Blinks until `control` is stopped. The first error halts the loop and propagates.
    pub async fn run(mut self, control: LoopControl) -> Result<(), Error> {
        while control.should_continue() {
            self.step().await?;
        }
        Ok(())
    }

    /// Runs the policy as a background task.
    pub fn spawn(self, control: LoopControl) -> TaskHandler {
        task::run(self.run(control))
    }
}
