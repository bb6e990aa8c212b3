//! Defines the board-level handle giving access to pins through a [`crate::io::GpioDriver`].

mod board;

pub use board::Board;
