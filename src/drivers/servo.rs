//! Hobby servo driver (50 Hz pulse-width positioning).
//!
//! Maps an angle in degrees to a pulse width between the calibrated
//! minimum and maximum, then writes it as a duty-cycle fraction of the
//! PWM frame.  Any [`SetDutyCycle`] channel works: LEDC on the ESP32-S3,
//! a recording mock on the host.
//!
//! ## Safety contract
//!
//! The servo is a dumb actuator.  There is no position feedback; the
//! "current angle" is simply the last angle written.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::{ControllerConfig, MAX_ANGLE_DEG};
use crate::error::{ActuatorError, ConfigError};

/// Pulse width at 0 degrees for a standard hobby servo (microseconds).
pub const DEFAULT_MIN_PULSE_US: u16 = 544;
/// Pulse width at 180 degrees (microseconds).
pub const DEFAULT_MAX_PULSE_US: u16 = 2400;
/// 50 Hz frame (microseconds).
pub const DEFAULT_FRAME_PERIOD_US: u16 = 20_000;

/// Pulse-width calibration for one servo.
///
/// Only constructible through [`new`](Self::new) / [`from_config`](Self::from_config),
/// so `min < max <= frame` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCalibration {
    min_pulse_us: u16,
    max_pulse_us: u16,
    frame_period_us: u16,
}

impl ServoCalibration {
    pub fn new(
        min_pulse_us: u16,
        max_pulse_us: u16,
        frame_period_us: u16,
    ) -> Result<Self, ConfigError> {
        if min_pulse_us >= max_pulse_us {
            return Err(ConfigError::ValidationFailed(
                "min_pulse_us must be below max_pulse_us",
            ));
        }
        if max_pulse_us > frame_period_us {
            return Err(ConfigError::ValidationFailed(
                "max_pulse_us exceeds frame_period_us",
            ));
        }
        Ok(Self {
            min_pulse_us,
            max_pulse_us,
            frame_period_us,
        })
    }

    pub fn from_config(config: &ControllerConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.min_pulse_us,
            config.max_pulse_us,
            config.frame_period_us,
        )
    }

    /// Pulse width for `degrees`, clamped to 0-180.
    pub fn pulse_width_us(&self, degrees: u8) -> u16 {
        let degrees = degrees.min(MAX_ANGLE_DEG) as u32;
        let span = (self.max_pulse_us - self.min_pulse_us) as u32;
        self.min_pulse_us + (span * degrees / MAX_ANGLE_DEG as u32) as u16
    }

    pub fn min_pulse_us(&self) -> u16 {
        self.min_pulse_us
    }

    pub fn max_pulse_us(&self) -> u16 {
        self.max_pulse_us
    }

    pub fn frame_period_us(&self) -> u16 {
        self.frame_period_us
    }
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self {
            min_pulse_us: DEFAULT_MIN_PULSE_US,
            max_pulse_us: DEFAULT_MAX_PULSE_US,
            frame_period_us: DEFAULT_FRAME_PERIOD_US,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoState {
    Detached,
    /// Attached; `angle` is `None` until the first write.
    Attached { angle: Option<u8> },
}

pub struct ServoDriver<PWM> {
    pwm: PWM,
    pin: i32,
    calibration: ServoCalibration,
    state: ServoState,
}

impl<PWM: SetDutyCycle> ServoDriver<PWM> {
    pub fn new(pwm: PWM, pin: i32, calibration: ServoCalibration) -> Self {
        Self {
            pwm,
            pin,
            calibration,
            state: ServoState::Detached,
        }
    }

    /// Begin driving the pin.  No pulses are emitted until the first write.
    pub fn attach(&mut self) -> Result<(), ActuatorError> {
        if let ServoState::Detached = self.state {
            self.pwm
                .set_duty_cycle_fully_off()
                .map_err(|_| ActuatorError::PwmWriteFailed)?;
            self.state = ServoState::Attached { angle: None };
        }
        Ok(())
    }

    /// Stop pulsing; the servo goes limp.
    pub fn detach(&mut self) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.state = ServoState::Detached;
        Ok(())
    }

    pub fn write_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        if let ServoState::Detached = self.state {
            return Err(ActuatorError::NotAttached);
        }
        let degrees = degrees.min(MAX_ANGLE_DEG);
        let pulse = self.calibration.pulse_width_us(degrees);
        self.pwm
            .set_duty_cycle_fraction(pulse, self.calibration.frame_period_us())
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.state = ServoState::Attached {
            angle: Some(degrees),
        };
        Ok(())
    }

    pub fn state(&self) -> ServoState {
        self.state
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    pub fn is_attached(&self) -> bool {
        !matches!(self.state, ServoState::Detached)
    }

    /// Last commanded angle, if any.
    pub fn current_angle(&self) -> Option<u8> {
        match self.state {
            ServoState::Attached { angle } => angle,
            ServoState::Detached => None,
        }
    }

    pub fn pwm(&self) -> &PWM {
        &self.pwm
    }
}
