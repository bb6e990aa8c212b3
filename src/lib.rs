//! <h1 align="center">PINLOOP - Raspberry Pi GPIO control loops</h1>
//! <div style="text-align:center;font-style:italic;">Pinloop drives a Raspberry Pi's GPIO header to blink LEDs, follow buttons and dim PWM outputs - written in Rust.</div>
//!
//! # Features
//!
//! **Pinloop** is a small Rust library (and a set of ready-made binaries) built around a single
//! pattern: configure one or two pins, then run a control loop forever.
//!
//! - Access the GPIO header through a [`Board`](hardware::Board) backed by a swappable
//!   [`GpioDriver`](io::GpioDriver) ([`RaspiGpio`](io::RaspiGpio) on real hardware)
//! - Attach [`DigitalOutput`](devices::DigitalOutput), [`DigitalInput`](devices::DigitalInput),
//!   [`PwmOutput`](devices::PwmOutput) and [`StepperOutput`](devices::StepperOutput) devices
//!   to its pins
//! - Run a loop policy from the [`loops`] module: [`Blink`](loops::Blink),
//!   [`LevelFollow`](loops::LevelFollow) or [`DutyFollow`](loops::DutyFollow), each halted
//!   deterministically through a [`LoopControl`](loops::LoopControl)
//!
//! # Getting Started
//!
//! - Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! pinloop = "0.1.0"
//! ```
//!
//! The following code demonstrates the simplest program we could imagine: blink an LED wired to
//! GPIO 18.
//! ```no_run
//! use pinloop::devices::DigitalOutput;
//! use pinloop::errors::Error;
//! use pinloop::hardware::Board;
//! use pinloop::io::NumberingScheme;
//! use pinloop::loops::{Blink, LoopControl};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let board = Board::default()
//!         .with_numbering(NumberingScheme::Bcm)?
//!         .open()?;
//!
//!     // Register a LED on GPIO 18; OFF by default.
//!     let led = DigitalOutput::new(&board, 18, false)?;
//!
//!     // Blinks the LED every 50ms: indefinitely.
//!     Blink::new(led, 50).run(LoopControl::default()).await
//! }
//! ```
//!
//! # Feature flags
//!
//! - **mocks** -- Provides the [`MockGpio`](mocks::MockGpio) driver (useful for tests mostly).

pub mod devices;
pub mod errors;
pub mod hardware;
pub mod io;
pub mod loops;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod utils;
