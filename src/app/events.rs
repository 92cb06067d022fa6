//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Nothing is ever
//! sent back over the serial link; adapters log or record them.

use crate::error::ActuatorError;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The servo was attached and parked at the rest angle.
    Started { pin: i32, rest_angle: u8 },

    /// A non-trigger byte was received and discarded.
    ByteIgnored(u8),

    /// The trigger arrived; the servo was commanded to the active angle.
    MotionStarted { angle: u8 },

    /// The blocking hold finished.
    HoldElapsed { hold_ms: u32 },

    /// The servo was commanded back to rest; `count` sequences completed so far.
    MotionCompleted { rest_angle: u8, count: u32 },

    /// A servo write failed.  The sequence carries on regardless.
    ActuatorFault(ActuatorError),
}
