use log::error;
use snafu::Snafu;

pub use crate::errors::Error::*;
use crate::io::{NumberingScheme, PinMode};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Hardware error: {source}.
    HardwareError { source: HardwareError },
    /// Driver error: {source}.
    DriverError { source: DriverError },
    /// Unknown error: {info}.
    Unknown { info: String },
}

impl From<HardwareError> for Error {
    fn from(value: HardwareError) -> Self {
        Self::HardwareError { source: value }
    }
}

impl From<DriverError> for Error {
    fn from(value: DriverError) -> Self {
        Self::DriverError { source: value }
    }
}

impl From<rppal::gpio::Error> for Error {
    fn from(error: rppal::gpio::Error) -> Self {
        error!("rppal error {:?}", error);
        match error {
            rppal::gpio::Error::PinNotAvailable(pin) => Self::HardwareError {
                source: HardwareError::UnknownPin { pin },
            },
            rppal::gpio::Error::PermissionDenied(info) => Self::DriverError {
                source: DriverError::AccessDenied { info },
            },
            rppal::gpio::Error::Io(err) => Self::DriverError {
                source: DriverError::IoException {
                    info: err.to_string(),
                },
            },
            other => Self::DriverError {
                source: DriverError::IoException {
                    info: other.to_string(),
                },
            },
        }
    }
}

/// Failures raised while reaching the GPIO peripheral itself.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DriverError {
    /// {info}
    IoException { info: String },
    /// Access to the GPIO peripheral denied - {info}
    AccessDenied { info: String },
    /// Driver has not been initialized
    NotInitialized,
}

/// Failures raised by misusing a pin or the numbering scheme.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum HardwareError {
    /// Unknown pin {pin}
    UnknownPin { pin: u8 },
    /// Pin ({pin}) not compatible with mode ({mode}) - {context}
    IncompatibleMode {
        pin: u8,
        mode: PinMode,
        context: &'static str,
    },
    /// PWM generation was not started on pin {pin}
    PwmNotStarted { pin: u8 },
    /// Pin numbering scheme has not been selected
    NumberingNotSet,
    /// Pin numbering scheme is locked to {scheme}
    NumberingLocked { scheme: NumberingScheme },
}
