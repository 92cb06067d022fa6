//! ServoTrigger Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  UartSerial        ServoActuator      LogEventSink       │
//! │  (SerialChannel)   (ActuatorPort)     (EventSink)        │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │        ControllerService (pure logic)              │  │
//! │  │  decode byte · 90° · hold 2 s · 0°                 │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Result, ensure};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, Pin};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{self, UartDriver};
use esp_idf_hal::units::Hertz;
use log::{error, info};

use servotrigger::adapters::hardware::ServoActuator;
use servotrigger::adapters::log_sink::LogEventSink;
use servotrigger::adapters::serial::UartSerial;
use servotrigger::app::service::{ControllerService, PollOutcome};
use servotrigger::config::ControllerConfig;
use servotrigger::drivers::servo::{ServoCalibration, ServoDriver};
use servotrigger::error::Error;
use servotrigger::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ServoTrigger v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let mut app = ControllerService::new(ControllerConfig::default()).map_err(Error::from)?;
    let config = app.config().clone();
    info!("Config: {}", serde_json::to_string(&config)?);

    let p = Peripherals::take()?;

    // ── 3. Command UART ───────────────────────────────────────
    let uart_cfg = uart::config::Config::default()
        .baudrate(Hertz(config.baud_rate))
        .rx_fifo_size(pins::CMD_UART_RX_BUFFER);
    let (tx, rx) = (p.pins.gpio17, p.pins.gpio18);
    check_pin("UART1 tx", tx.pin(), pins::CMD_UART_TX_GPIO)?;
    check_pin("UART1 rx", rx.pin(), pins::CMD_UART_RX_GPIO)?;
    let uart = match UartDriver::new(
        p.uart1,
        tx,
        rx,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_cfg,
    ) {
        Ok(d) => d,
        Err(e) => {
            // No command channel means nothing to do: park without ever
            // driving the servo.
            error!("{}: {}; halting", Error::Init("UART1 driver install failed"), e);
            loop {
                FreeRtos::delay_ms(1000);
            }
        }
    };
    info!(
        "UART1 at {} baud (tx=GPIO{}, rx=GPIO{})",
        config.baud_rate,
        pins::CMD_UART_TX_GPIO,
        pins::CMD_UART_RX_GPIO
    );

    // ── 4. Servo PWM ──────────────────────────────────────────
    let timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::default()
            .frequency(Hertz(pins::SERVO_PWM_FREQ_HZ))
            .resolution(Resolution::Bits14),
    )?;
    let servo_pin = p.pins.gpio9;
    check_pin("servo", servo_pin.pin(), pins::SERVO_GPIO)?;
    let channel = LedcDriver::new(p.ledc.channel0, &timer, servo_pin)?;
    let calibration = ServoCalibration::from_config(&config).map_err(Error::from)?;
    let servo = ServoDriver::new(channel, pins::SERVO_GPIO, calibration);

    // ── 5. Adapters + controller ──────────────────────────────
    let mut serial = UartSerial::new(uart);
    let mut actuator = ServoActuator::new(servo);
    let mut delay = FreeRtos;
    let mut sink = LogEventSink::new();

    app.start(&mut actuator, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        if app.poll(&mut serial, &mut actuator, &mut delay, &mut sink) == PollOutcome::Idle {
            // Give up one tick so the idle task keeps the task watchdog fed.
            FreeRtos::delay_ms(1);
        }
    }
}

/// The typed peripheral handles above must agree with the `pins` table,
/// which is what every log line and event reports.
fn check_pin(role: &str, actual: impl Into<i32>, expected: i32) -> Result<()> {
    let actual = actual.into();
    ensure!(
        actual == expected,
        "{} wired to GPIO{} but pins table says GPIO{}",
        role,
        actual,
        expected
    );
    Ok(())
}
