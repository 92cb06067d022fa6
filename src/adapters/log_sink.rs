//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to
//! the logger (UART0 / USB-CDC console in production, never the command
//! UART).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { pin, rest_angle } => {
                info!("START | servo=GPIO{} rest={}\u{00b0}", pin, rest_angle);
            }
            AppEvent::ByteIgnored(byte) => {
                debug!("RX    | ignored {:#04x}", byte);
            }
            AppEvent::MotionStarted { angle } => {
                info!("MOTION | -> {}\u{00b0}", angle);
            }
            AppEvent::HoldElapsed { hold_ms } => {
                info!("MOTION | held {} ms", hold_ms);
            }
            AppEvent::MotionCompleted { rest_angle, count } => {
                info!("MOTION | -> {}\u{00b0} (sequence #{})", rest_angle, count);
            }
            AppEvent::ActuatorFault(e) => {
                warn!("FAULT | {}", e);
            }
        }
    }
}
