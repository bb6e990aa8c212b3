//! Defines devices attachable to a [`Board`](crate::hardware::Board) pin.

use std::fmt::Debug;

use dyn_clone::DynClone;

mod input;
mod output;

pub use input::DigitalInput;
pub use output::{DigitalOutput, PwmOutput, StepDirection, StepperOutput};

/// Marker trait for anything attached to a board pin.
pub trait Device: Debug + DynClone + Send + Sync {}
dyn_clone::clone_trait_object!(Device);
