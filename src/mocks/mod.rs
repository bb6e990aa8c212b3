//! Mocked entities of all kinds (useful for tests mostly).

pub mod gpio;
pub mod hardware;

pub use gpio::MockGpio;
pub use hardware::*;
