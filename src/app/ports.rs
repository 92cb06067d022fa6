//! Port traits: the hexagonal boundary between the controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (UART, servo PWM, event sinks) implement these traits.
//! The [`ControllerService`](super::service::ControllerService) consumes them
//! via generics, so the domain core never touches hardware directly.  The
//! blocking hold is expressed through [`embedded_hal::delay::DelayNs`] rather
//! than a port of our own.

use crate::error::ActuatorError;

// ───────────────────────────────────────────────────────────────
// Serial channel port (driving adapter: UART → domain)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented command channel.
///
/// Availability must be polled with [`available`](Self::available) before
/// a byte is consumed with [`read_byte`](Self::read_byte).
pub trait SerialChannel {
    /// Error type for this channel.
    type Error: core::fmt::Debug;

    /// Check whether at least one unread byte is buffered.
    fn available(&mut self) -> bool;

    /// Consume exactly one byte.
    /// Returns `Ok(None)` if the buffer turned out to be empty.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the servo.
///
/// There is no position feedback; a successful return only means the
/// PWM output was updated.
pub trait ActuatorPort {
    /// Control pin the servo is bound to.
    fn pin(&self) -> i32;

    /// Start driving the control pin.
    fn attach(&mut self) -> Result<(), ActuatorError>;

    /// Command the servo to `degrees` (0–180).
    fn write_angle(&mut self, degrees: u8) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
