use std::collections::HashMap;

use crate::io::{GpioData, Pin, PinMode};

/// Creates a pin supporting every mode (digital in/out and PWM), not configured yet.
pub fn create_gpio_pin(id: u8) -> Pin {
    Pin {
        id,
        name: format!("GPIO{}", id),
        mode: Default::default(),
        supported_modes: vec![PinMode::INPUT, PinMode::OUTPUT, PinMode::PWM],
        value: 0,
        pwm: None,
    }
}

/// Creates a digital-only pin (no PWM), not configured yet.
pub fn create_digital_pin(id: u8) -> Pin {
    Pin {
        id,
        name: format!("GPIO{}", id),
        mode: Default::default(),
        supported_modes: vec![PinMode::INPUT, PinMode::OUTPUT],
        value: 0,
        pwm: None,
    }
}

/// Creates an input-only pin, not configured yet.
pub fn create_input_pin(id: u8) -> Pin {
    Pin {
        id,
        name: format!("GPIO{}", id),
        mode: Default::default(),
        supported_modes: vec![PinMode::INPUT],
        value: 0,
        pwm: None,
    }
}

/// Creates a pin supporting nothing at all.
pub fn create_unsupported_pin(id: u8) -> Pin {
    Pin {
        id,
        name: format!("GPIO{}", id),
        mode: Default::default(),
        supported_modes: vec![],
        value: 0,
        pwm: None,
    }
}

/// Builds the pin table the [`MockGpio`](crate::mocks::MockGpio) driver starts with.
///
/// No numbering scheme is selected and no pin is configured: tests exercise the same
/// start-up sequence the binaries do.
pub fn create_test_gpio_data() -> GpioData {
    GpioData {
        pins: HashMap::from([
            (0, create_unsupported_pin(0)),
            (1, create_unsupported_pin(1)),
            (4, create_gpio_pin(4)),
            (12, create_gpio_pin(12)),
            (13, create_gpio_pin(13)),
            (16, create_gpio_pin(16)),
            (18, create_gpio_pin(18)),
            (23, create_digital_pin(23)),
            (24, create_input_pin(24)),
        ]),
        scheme: None,
        hardware_model: "Mock GPIO".to_string(),
        connected: false,
    }
}
