//! Controller service: the hexagonal core.
//!
//! [`ControllerService`] owns the controller configuration and the small
//! amount of run-time state (last byte, counters).  The serial channel,
//! servo and delay provider are injected at each call site, making the
//! whole service testable with mock adapters.
//!
//! ```text
//!  SerialChannel ──▶ ┌─────────────────────┐ ──▶ EventSink
//!                    │  ControllerService  │
//!  ActuatorPort  ◀── │  decode · sequence  │ ◀── DelayNs
//!                    └─────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::ConfigError;

use super::commands::ControllerCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SerialChannel};

/// Result of a single [`ControllerService::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No byte was available.
    Idle,
    /// A non-trigger byte was consumed and discarded.
    Ignored(u8),
    /// The trigger byte was consumed and the motion sequence ran to completion.
    Actuated,
}

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

/// The controller service: one owner, no sharing, no locks.
pub struct ControllerService {
    config: ControllerConfig,
    last_byte: Option<u8>,
    motions_completed: u32,
    bytes_ignored: u32,
}

impl ControllerService {
    /// Construct the service, rejecting a configuration that fails
    /// [`ControllerConfig::validate`].
    ///
    /// Does **not** touch the servo; call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            last_byte: None,
            motions_completed: 0,
            bytes_ignored: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bind the servo to its pin and park it at the rest angle.
    pub fn start(&mut self, actuator: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if let Err(e) = actuator.attach() {
            warn!("Servo attach on GPIO{} failed: {}", actuator.pin(), e);
            sink.emit(&AppEvent::ActuatorFault(e));
        }
        let rest = self.config.rest_angle_deg;
        self.command_angle(actuator, rest, sink);
        sink.emit(&AppEvent::Started {
            pin: actuator.pin(),
            rest_angle: rest,
        });
        info!(
            "Controller started: servo on GPIO{} at {}°, trigger {:#04x}",
            actuator.pin(),
            rest,
            self.config.trigger_byte
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one loop iteration: check the channel, consume at most one byte,
    /// and run the motion sequence if it is the trigger.
    ///
    /// Blocks for the full hold when the trigger arrives; bytes received in
    /// the meantime stay in the channel for later polls.
    pub fn poll<S: SerialChannel>(
        &mut self,
        serial: &mut S,
        actuator: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> PollOutcome {
        if !serial.available() {
            return PollOutcome::Idle;
        }

        let byte = match serial.read_byte() {
            Ok(Some(b)) => b,
            Ok(None) => return PollOutcome::Idle,
            Err(e) => {
                warn!("Serial read failed: {:?}", e);
                return PollOutcome::Idle;
            }
        };
        self.last_byte = Some(byte);

        match ControllerCommand::decode(byte, self.config.trigger_byte) {
            Some(cmd) => {
                self.handle_command(cmd, actuator, delay, sink);
                PollOutcome::Actuated
            }
            None => {
                self.bytes_ignored = self.bytes_ignored.saturating_add(1);
                debug!("Ignoring byte {:#04x}", byte);
                sink.emit(&AppEvent::ByteIgnored(byte));
                PollOutcome::Ignored(byte)
            }
        }
    }

    /// Poll until the channel runs dry.  Returns the number of motion
    /// sequences executed.
    pub fn drain<S: SerialChannel>(
        &mut self,
        serial: &mut S,
        actuator: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> u32 {
        let mut actuated = 0;
        loop {
            match self.poll(serial, actuator, delay, sink) {
                PollOutcome::Idle => return actuated,
                PollOutcome::Actuated => actuated += 1,
                PollOutcome::Ignored(_) => {}
            }
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Execute a decoded command.
    pub fn handle_command(
        &mut self,
        cmd: ControllerCommand,
        actuator: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            ControllerCommand::Actuate => {
                let active = self.config.active_angle_deg;
                let rest = self.config.rest_angle_deg;
                let hold_ms = self.config.hold_ms;

                info!("Trigger: {}° for {} ms", active, hold_ms);
                self.command_angle(actuator, active, sink);
                sink.emit(&AppEvent::MotionStarted { angle: active });

                delay.delay_ms(hold_ms);
                sink.emit(&AppEvent::HoldElapsed { hold_ms });

                self.command_angle(actuator, rest, sink);
                self.motions_completed = self.motions_completed.saturating_add(1);
                sink.emit(&AppEvent::MotionCompleted {
                    rest_angle: rest,
                    count: self.motions_completed,
                });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Most recent byte consumed from the channel, trigger or not.
    pub fn last_byte(&self) -> Option<u8> {
        self.last_byte
    }

    /// Motion sequences completed since startup.
    pub fn motions_completed(&self) -> u32 {
        self.motions_completed
    }

    /// Non-trigger bytes discarded since startup.
    pub fn bytes_ignored(&self) -> u32 {
        self.bytes_ignored
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Servo writes are fire-and-forget: a failure is reported, never retried.
    fn command_angle(
        &self,
        actuator: &mut impl ActuatorPort,
        degrees: u8,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = actuator.write_angle(degrees) {
            warn!("Servo write {}° failed: {}", degrees, e);
            sink.emit(&AppEvent::ActuatorFault(e));
        }
    }
}
