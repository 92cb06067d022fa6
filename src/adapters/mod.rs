//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements     | Connects to                        |
//! |-------------|----------------|------------------------------------|
//! | `hardware`  | ActuatorPort   | Servo PWM (LEDC / any SetDutyCycle)|
//! | `log_sink`  | EventSink      | Console log output                 |
//! | `serial`    | SerialChannel  | UART1 / bounded host buffer        |
//! | `time`      | DelayNs        | `std::thread::sleep` (host only)   |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
