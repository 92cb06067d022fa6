//! Inbound commands to the controller service.
//!
//! The wire protocol is a single byte: the configured trigger value maps
//! to [`ControllerCommand::Actuate`], everything else decodes to `None`
//! and is discarded by the [`ControllerService`](super::service::ControllerService).

/// Commands that the serial channel can send into the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerCommand {
    /// Move to the active angle, hold, return to rest.
    Actuate,
}

impl ControllerCommand {
    /// Decode one received byte.
    pub fn decode(byte: u8, trigger: u8) -> Option<Self> {
        (byte == trigger).then_some(Self::Actuate)
    }
}
