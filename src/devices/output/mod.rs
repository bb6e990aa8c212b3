mod digital;
mod pwm;
mod stepper;

pub use digital::DigitalOutput;
pub use pwm::PwmOutput;
pub use stepper::{StepDirection, StepperOutput};
