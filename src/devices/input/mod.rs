mod digital;

pub use digital::DigitalInput;
