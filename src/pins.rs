//! GPIO / peripheral pin assignments for the ServoTrigger board.
//!
//! Single source of truth for pin numbers.  `main` checks the typed
//! peripheral handles it takes against these values at startup.

// ---------------------------------------------------------------------------
// Servo (LEDC PWM)
// ---------------------------------------------------------------------------

/// Servo signal line.
pub const SERVO_GPIO: i32 = 9;
/// Servo PWM refresh rate (one pulse every 20 ms).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;

// ---------------------------------------------------------------------------
// Command UART (UART1)
// ---------------------------------------------------------------------------

/// UART1 TX (unused by the protocol, wired for completeness).
pub const CMD_UART_TX_GPIO: i32 = 17;
/// UART1 RX: command bytes arrive here.
pub const CMD_UART_RX_GPIO: i32 = 18;
/// UART driver RX ring buffer size in bytes.
pub const CMD_UART_RX_BUFFER: usize = 256;
