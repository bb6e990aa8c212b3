use std::fmt::Display;
use std::ops::{Deref, DerefMut};

use log::trace;
use parking_lot::RwLockReadGuard;

use crate::errors::Error;
use crate::io::{GpioData, GpioDriver, NumberingScheme};

/// Represents the single-board computer whose GPIO header your
/// [`crate::devices::Device`]s are attached to and controlled through this API.
/// The board gives access to the [`GpioData`] pin table through a [`GpioDriver`].
#[derive(Debug, Clone)]
pub struct Board {
    /// The inner driver used by this Board.
    driver: Box<dyn GpioDriver>,
}

impl Default for Board {
    /// Default implementation for a board.
    ///
    /// This method creates a board using the [`RaspiGpio`](crate::io::RaspiGpio) driver.
    ///
    /// **_/!\ The board cannot reach the hardware until [`Board::open`] is called._**
    fn default() -> Self {
        Self {
            driver: Default::default(),
        }
    }
}

impl Board {
    /// Creates a board using a given driver.
    ///
    /// # Example
    /// ```no_run
    /// use pinloop::hardware::Board;
    /// use pinloop::io::RaspiGpio;
    ///
    /// let board = Board::new(RaspiGpio::default());
    /// ```
    pub fn new<D: GpioDriver + 'static>(driver: D) -> Self {
        Self {
            driver: Box::new(driver),
        }
    }

    /// Selects the pin numbering scheme used by this board.
    ///
    /// Must be done before any pin is configured; the scheme is immutable afterwards.
    ///
    /// # Errors
    /// * `NumberingLocked`: a scheme was already chosen, or pins are already configured.
    pub fn with_numbering(mut self, scheme: NumberingScheme) -> Result<Self, Error> {
        self.driver.set_numbering(scheme)?;
        Ok(self)
    }

    /// Opens the board access through the configured driver.
    ///
    /// Any failure here is fatal for the calling script: there is no recovery path, the
    /// error simply propagates to `main`.
    pub fn open(mut self) -> Result<Self, Error> {
        self.driver.open()?;
        trace!("Board is ready: {:#?}", self.get_io());
        Ok(self)
    }

    /// Closes the board access, releasing all configured pins.
    pub fn close(mut self) -> Result<Self, Error> {
        self.driver.close()?;
        trace!("Board is closed");
        Ok(self)
    }

    /// Returns the driver used.
    ///
    /// NOTE: this is private to the crate since board already gives access to driver methods
    /// via Deref. This method is only used internally in all `Device::new()` methods to clone
    /// the driver into the device.
    pub(crate) fn get_driver(&self) -> Box<dyn GpioDriver> {
        self.driver.clone()
    }

    /// Easy access to the pin table through the board.
    pub fn get_io(&self) -> RwLockReadGuard<GpioData> {
        self.driver.get_data().read()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board ({})", self.driver)
    }
}

impl Deref for Board {
    type Target = Box<dyn GpioDriver>;

    fn deref(&self) -> &Self::Target {
        &self.driver
    }
}

impl DerefMut for Board {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.driver
    }
}
