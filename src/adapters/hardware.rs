//! Hardware adapter: bridges the servo driver to the domain port trait.
//!
//! Owns the [`ServoDriver`] and exposes it through [`ActuatorPort`].
//! Generic over the PWM channel, so the same adapter wraps LEDC on the
//! device and a mock channel on the host.

use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::ActuatorPort;
use crate::drivers::servo::ServoDriver;
use crate::error::ActuatorError;

/// Concrete adapter that puts the servo behind the port trait.
pub struct ServoActuator<PWM> {
    servo: ServoDriver<PWM>,
}

impl<PWM: SetDutyCycle> ServoActuator<PWM> {
    pub fn new(servo: ServoDriver<PWM>) -> Self {
        Self { servo }
    }

    pub fn servo(&self) -> &ServoDriver<PWM> {
        &self.servo
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<PWM: SetDutyCycle> ActuatorPort for ServoActuator<PWM> {
    fn pin(&self) -> i32 {
        self.servo.pin()
    }

    fn attach(&mut self) -> Result<(), ActuatorError> {
        self.servo.attach()
    }

    fn write_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        self.servo.write_angle(degrees)
    }
}
