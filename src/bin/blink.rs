//! Blinks an LED on GPIO18 (BCM numbering), 50ms per half-period.

use pinloop::devices::DigitalOutput;
use pinloop::errors::Error;
use pinloop::hardware::Board;
use pinloop::io::NumberingScheme;
use pinloop::loops::{Blink, LoopControl};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let board = Board::default()
        .with_numbering(NumberingScheme::Bcm)?
        .open()?;

    let led = DigitalOutput::new(&board, 18, false)?;
    Blink::new(led, 50).run(LoopControl::default()).await
}
