//! System configuration parameters
//!
//! All tunable parameters for the ServoTrigger controller.
//! Values are compiled-in defaults; pin assignments live in `pins`.

use serde::{Deserialize, Serialize};

use crate::drivers::servo::{
    DEFAULT_FRAME_PERIOD_US, DEFAULT_MAX_PULSE_US, DEFAULT_MIN_PULSE_US, ServoCalibration,
};
use crate::error::ConfigError;

/// Largest angle a hobby servo accepts, in degrees.
pub const MAX_ANGLE_DEG: u8 = 180;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Serial ---
    /// Command UART baud rate (8N1)
    pub baud_rate: u32,
    /// Byte value that starts the motion sequence
    pub trigger_byte: u8,

    // --- Motion ---
    /// Angle commanded at startup and after every hold (degrees)
    pub rest_angle_deg: u8,
    /// Angle commanded when the trigger byte arrives (degrees)
    pub active_angle_deg: u8,
    /// Blocking hold at the active angle (milliseconds)
    pub hold_ms: u32,

    // --- Servo calibration ---
    /// Pulse width at 0 degrees (microseconds)
    pub min_pulse_us: u16,
    /// Pulse width at 180 degrees (microseconds)
    pub max_pulse_us: u16,
    /// PWM frame period (microseconds, 20000 = 50 Hz)
    pub frame_period_us: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Serial
            baud_rate: 9600,
            trigger_byte: b'A',

            // Motion
            rest_angle_deg: 0,
            active_angle_deg: 90,
            hold_ms: 2000,

            // Servo calibration
            min_pulse_us: DEFAULT_MIN_PULSE_US,
            max_pulse_us: DEFAULT_MAX_PULSE_US,
            frame_period_us: DEFAULT_FRAME_PERIOD_US, // 50 Hz
        }
    }
}

impl ControllerConfig {
    /// Reject out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::ValidationFailed("baud_rate must be non-zero"));
        }
        if self.rest_angle_deg > MAX_ANGLE_DEG {
            return Err(ConfigError::ValidationFailed("rest_angle_deg exceeds 180"));
        }
        if self.active_angle_deg > MAX_ANGLE_DEG {
            return Err(ConfigError::ValidationFailed("active_angle_deg exceeds 180"));
        }
        if self.rest_angle_deg == self.active_angle_deg {
            return Err(ConfigError::ValidationFailed(
                "active_angle_deg must differ from rest_angle_deg",
            ));
        }
        if self.hold_ms == 0 {
            return Err(ConfigError::ValidationFailed("hold_ms must be non-zero"));
        }
        ServoCalibration::from_config(self)?;
        Ok(())
    }
}
