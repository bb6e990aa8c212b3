//! Drives the LED brightness on GPIO18 from the button on GPIO23: a 1kHz PWM
//! signal holds a 100% duty cycle while GPIO23 reads HIGH, 25% while it reads LOW.

use pinloop::devices::{DigitalInput, PwmOutput};
use pinloop::errors::Error;
use pinloop::hardware::Board;
use pinloop::io::NumberingScheme;
use pinloop::loops::{DutyFollow, LoopControl};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let board = Board::default()
        .with_numbering(NumberingScheme::Bcm)?
        .open()?;

    let mut led = PwmOutput::new(&board, 18)?;
    led.start(1000.0, 0.0)?;
    let button = DigitalInput::new(&board, 23)?;
    DutyFollow::new(button, led).run(LoopControl::default()).await
}
