//! Drives the LED on GPIO18 from the button on GPIO23, inverted: the LED turns
//! off while the button reads HIGH.

use pinloop::devices::{DigitalInput, DigitalOutput};
use pinloop::errors::Error;
use pinloop::hardware::Board;
use pinloop::io::NumberingScheme;
use pinloop::loops::{LevelFollow, LoopControl};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let board = Board::default()
        .with_numbering(NumberingScheme::Bcm)?
        .open()?;

    let led = DigitalOutput::new(&board, 18, false)?;
    let button = DigitalInput::new(&board, 23)?;
    LevelFollow::new(button, led).run(LoopControl::default()).await
}
