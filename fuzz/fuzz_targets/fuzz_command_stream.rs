//! Fuzz target: `ControllerService::drain`
//!
//! Pushes arbitrary byte streams through the bounded serial buffer and
//! the controller, and checks that the servo only ever sees complete
//! rest/active pairs, one per buffered trigger byte.
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;
use servotrigger::adapters::serial::HostSerial;
use servotrigger::app::events::AppEvent;
use servotrigger::app::ports::{ActuatorPort, EventSink};
use servotrigger::app::service::ControllerService;
use servotrigger::config::ControllerConfig;
use servotrigger::error::ActuatorError;

struct Servo(Vec<u8>);

impl ActuatorPort for Servo {
    fn pin(&self) -> i32 {
        9
    }
    fn attach(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }
    fn write_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        self.0.push(degrees);
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut serial = HostSerial::new(9600);
    let accepted = serial.feed(data);
    let triggers = data[..accepted].iter().filter(|&&b| b == b'A').count();

    let mut servo = Servo(Vec::new());
    let mut app = ControllerService::new(ControllerConfig::default()).unwrap();
    let actuated = app.drain(&mut serial, &mut servo, &mut NoDelay, &mut Discard);

    assert_eq!(actuated as usize, triggers);
    assert_eq!(servo.0.len(), 2 * triggers);
    assert!(servo.0.chunks(2).all(|pair| pair == [90, 0]));
    assert!(serial.is_empty());
});
