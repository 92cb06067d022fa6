//! Integration tests for the serial → ControllerService → servo pipeline.
//!
//! These run on the host (x86_64) against the mock hardware in
//! [`mock_hw`](super::mock_hw); holds are recorded, not slept.

use super::mock_hw::{
    Call, MockDelay, RecordingSink, SEQUENCE, SharedSerial, rig, total_wait_ms, writes,
};

use servotrigger::adapters::serial::HostSerial;
use servotrigger::app::events::AppEvent;
use servotrigger::app::service::{ControllerService, PollOutcome};
use servotrigger::config::ControllerConfig;
use servotrigger::error::ActuatorError;

/// Service on the default configuration.  Not started: tests that need
/// the startup park call [`ControllerService::start`] themselves.
fn new_app() -> ControllerService {
    ControllerService::new(ControllerConfig::default()).unwrap()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_attaches_then_parks_at_rest() {
    let (mut servo, _delay, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut app = new_app();

    app.start(&mut servo, &mut sink);

    assert_eq!(*timeline.borrow(), vec![Call::Attach, Call::Write(0)]);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            pin: 9,
            rest_angle: 0
        }]
    );
}

// ── Scenario 1: "A" ───────────────────────────────────────────

#[test]
fn single_trigger_runs_one_sequence() {
    let (mut servo, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = HostSerial::new(9600);
    let mut app = new_app();

    serial.feed(b"A");
    let outcome = app.poll(&mut serial, &mut servo, &mut delay, &mut sink);

    assert_eq!(outcome, PollOutcome::Actuated);
    assert_eq!(*timeline.borrow(), SEQUENCE.to_vec());
    assert_eq!(app.motions_completed(), 1);
    assert_eq!(app.last_byte(), Some(b'A'));
    assert_eq!(
        sink.events,
        vec![
            AppEvent::MotionStarted { angle: 90 },
            AppEvent::HoldElapsed { hold_ms: 2000 },
            AppEvent::MotionCompleted {
                rest_angle: 0,
                count: 1
            },
        ]
    );
}

// ── Scenario 2: "XYZ" ─────────────────────────────────────────

#[test]
fn non_trigger_bytes_never_move_the_servo() {
    let (mut servo, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = HostSerial::new(9600);
    let mut app = new_app();

    app.start(&mut servo, &mut sink);
    let parked = vec![Call::Attach, Call::Write(0)];
    assert_eq!(*timeline.borrow(), parked);

    serial.feed(b"XYZ");
    let actuated = app.drain(&mut serial, &mut servo, &mut delay, &mut sink);

    assert_eq!(actuated, 0);
    assert_eq!(*timeline.borrow(), parked, "servo must stay parked at rest");
    assert_eq!(app.bytes_ignored(), 3);
    assert_eq!(app.last_byte(), Some(b'Z'));
    assert_eq!(
        sink.events,
        vec![
            AppEvent::Started {
                pin: 9,
                rest_angle: 0
            },
            AppEvent::ByteIgnored(b'X'),
            AppEvent::ByteIgnored(b'Y'),
            AppEvent::ByteIgnored(b'Z'),
        ]
    );
}

#[test]
fn lowercase_trigger_is_ignored() {
    let (mut servo, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = HostSerial::new(9600);
    let mut app = new_app();

    serial.feed(b"a");
    assert_eq!(
        app.poll(&mut serial, &mut servo, &mut delay, &mut sink),
        PollOutcome::Ignored(b'a')
    );
    assert!(timeline.borrow().is_empty());
}

// ── Scenario 3: "AA" ──────────────────────────────────────────

#[test]
fn back_to_back_triggers_run_strictly_in_sequence() {
    let (mut servo, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = HostSerial::new(9600);
    let mut app = new_app();

    serial.feed(b"AA");

    // One trigger per poll.
    assert_eq!(
        app.poll(&mut serial, &mut servo, &mut delay, &mut sink),
        PollOutcome::Actuated
    );
    assert_eq!(timeline.borrow().len(), 3);
    assert_eq!(
        app.poll(&mut serial, &mut servo, &mut delay, &mut sink),
        PollOutcome::Actuated
    );
    assert_eq!(
        app.poll(&mut serial, &mut servo, &mut delay, &mut sink),
        PollOutcome::Idle
    );

    let expected: Vec<Call> = SEQUENCE.iter().chain(SEQUENCE.iter()).copied().collect();
    assert_eq!(*timeline.borrow(), expected);
    assert!(total_wait_ms(&timeline) >= 4000);
    assert_eq!(app.motions_completed(), 2);
}

#[test]
fn mixed_stream_only_acts_on_triggers() {
    let (mut servo, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = HostSerial::new(9600);
    let mut app = new_app();

    serial.feed(b"xAyzA\n");
    let actuated = app.drain(&mut serial, &mut servo, &mut delay, &mut sink);

    assert_eq!(actuated, 2);
    assert_eq!(writes(&timeline), vec![90, 0, 90, 0]);
    assert_eq!(app.bytes_ignored(), 4);
}

// ── Boundary: trigger arrives mid-hold ────────────────────────

#[test]
fn trigger_during_hold_waits_for_return_to_rest() {
    let (mut servo, _, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = SharedSerial::new();
    let mut delay = MockDelay::with_arrivals(timeline.clone(), serial.clone(), b"A");
    let mut app = new_app();

    serial.0.borrow_mut().feed(b"A");

    assert_eq!(
        app.poll(&mut serial, &mut servo, &mut delay, &mut sink),
        PollOutcome::Actuated
    );
    // The second trigger is buffered, not acted on, until the first
    // sequence has returned to rest.
    assert_eq!(*timeline.borrow(), SEQUENCE.to_vec());
    assert_eq!(serial.0.borrow().len(), 1);

    assert_eq!(
        app.poll(&mut serial, &mut servo, &mut delay, &mut sink),
        PollOutcome::Actuated
    );
    let expected: Vec<Call> = SEQUENCE.iter().chain(SEQUENCE.iter()).copied().collect();
    assert_eq!(*timeline.borrow(), expected);
}

#[test]
fn bytes_beyond_buffer_during_hold_are_dropped() {
    let (mut servo, _, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = SharedSerial::new();

    // 100 triggers arrive while the first hold is in progress; only the
    // buffer's worth survive.
    let burst = [b'A'; 100];
    let mut delay = MockDelay::with_arrivals(timeline.clone(), serial.clone(), &burst);
    let mut app = new_app();

    serial.0.borrow_mut().feed(b"A");
    let actuated = app.drain(&mut serial, &mut servo, &mut delay, &mut sink);

    let capacity = serial.0.borrow().capacity() as u32;
    assert_eq!(serial.0.borrow().dropped(), 100 - capacity);
    assert_eq!(actuated, 1 + capacity);
    assert_eq!(app.motions_completed(), 1 + capacity);
    assert_eq!(writes(&timeline).len() as u32, 2 * (1 + capacity));
}

#[test]
fn sustained_trigger_flood_is_bounded_by_the_receive_buffer() {
    let (mut servo, _, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = SharedSerial::new();

    // A sender repeating the trigger on every detection frame: roughly 60
    // bytes land during each 2 s hold, for five consecutive holds.
    const BURST: usize = 60;
    const HOLDS: u32 = 5;
    let mut delay = MockDelay::with_sustained_arrivals(
        timeline.clone(),
        serial.clone(),
        &[b'A'; BURST],
        HOLDS,
    );
    let mut app = new_app();

    serial.0.borrow_mut().feed(b"A");
    let actuated = app.drain(&mut serial, &mut servo, &mut delay, &mut sink);

    let capacity = serial.0.borrow().capacity() as u32;
    let dropped = serial.0.borrow().dropped();
    let sent = BURST as u32 * HOLDS;

    assert!(dropped > 0, "flood must overflow the receive buffer");
    assert_eq!(actuated, 1 + (sent - dropped));
    assert!(actuated <= 1 + capacity + HOLDS);
    // 60 + 5 + 1 + 1 + 1 accepted with a 64-byte buffer.
    assert_eq!(dropped, 232);
    assert_eq!(app.motions_completed(), 69);
    assert!(serial.0.borrow().is_empty());

    // Every accepted trigger still runs one full, ordered sequence.
    let expected: Vec<Call> = (0..actuated).flat_map(|_| SEQUENCE).collect();
    assert_eq!(*timeline.borrow(), expected);
}

// ── Actuator faults ───────────────────────────────────────────

#[test]
fn failed_writes_do_not_skip_hold_or_return() {
    let (mut servo, mut delay, timeline) = rig();
    servo.fail_writes = true;
    let mut sink = RecordingSink::new();
    let mut serial = HostSerial::new(9600);
    let mut app = new_app();

    serial.feed(b"A");
    assert_eq!(
        app.poll(&mut serial, &mut servo, &mut delay, &mut sink),
        PollOutcome::Actuated
    );

    assert_eq!(*timeline.borrow(), SEQUENCE.to_vec());
    let faults = sink
        .events
        .iter()
        .filter(|e| **e == AppEvent::ActuatorFault(ActuatorError::PwmWriteFailed))
        .count();
    assert_eq!(faults, 2);
    assert_eq!(app.motions_completed(), 1);
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn custom_config_drives_angles_and_hold() {
    let (mut servo, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut serial = HostSerial::new(9600);
    let config = ControllerConfig {
        trigger_byte: b'G',
        rest_angle_deg: 10,
        active_angle_deg: 170,
        hold_ms: 500,
        ..ControllerConfig::default()
    };
    let mut app = ControllerService::new(config).unwrap();

    serial.feed(b"AG");
    let actuated = app.drain(&mut serial, &mut servo, &mut delay, &mut sink);

    assert_eq!(actuated, 1);
    assert_eq!(
        *timeline.borrow(),
        vec![Call::Write(170), Call::Wait { ms: 500 }, Call::Write(10)]
    );
}

#[test]
fn inverted_pulse_range_never_reaches_the_servo() {
    let config = ControllerConfig {
        min_pulse_us: 2400,
        max_pulse_us: 544,
        ..ControllerConfig::default()
    };
    assert!(ControllerService::new(config).is_err());
}
