//! Serial channel adapters.
//!
//! - [`BufferedSerial`]: a bounded receive buffer on every target.  Bytes
//!   that arrive while it is full are silently dropped, the way a UART RX
//!   FIFO overflows.  Used for host-side runs and tests.
//! - `UartSerial` (**`target_os = "espidf"`** only): wraps the ESP-IDF
//!   UART driver in non-blocking mode.

use heapless::Deque;

use crate::app::ports::SerialChannel;

/// Receive buffer depth of the classic AVR hardware serial port.
pub const DEFAULT_RX_CAPACITY: usize = 64;

/// Bounded in-memory receive buffer implementing [`SerialChannel`].
pub struct BufferedSerial<const N: usize> {
    rx: Deque<u8, N>,
    baud_rate: u32,
    dropped: u32,
}

/// [`BufferedSerial`] with the default receive depth.
pub type HostSerial = BufferedSerial<DEFAULT_RX_CAPACITY>;

impl<const N: usize> BufferedSerial<N> {
    pub fn new(baud_rate: u32) -> Self {
        Self {
            rx: Deque::new(),
            baud_rate,
            dropped: 0,
        }
    }

    /// Deliver one byte from the wire.  Returns `false` if the buffer was
    /// full and the byte was dropped.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.rx.push_back(byte).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        true
    }

    /// Deliver a burst of bytes.  Returns how many were accepted.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut accepted = 0;
        for &b in bytes {
            if self.push(b) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Bytes currently buffered.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Bytes lost to overflow since construction.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl<const N: usize> SerialChannel for BufferedSerial<N> {
    type Error = core::convert::Infallible;

    fn available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.rx.pop_front())
    }
}

// ── ESP-IDF UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp::UartSerial;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_hal::delay::NON_BLOCK;
    use esp_idf_hal::uart::UartDriver;
    use log::warn;

    use crate::app::ports::SerialChannel;
    use crate::error::SerialError;

    /// UART command channel.  The driver owns its own RX ring buffer; this
    /// adapter only polls it.
    pub struct UartSerial<'d> {
        driver: UartDriver<'d>,
    }

    impl<'d> UartSerial<'d> {
        pub fn new(driver: UartDriver<'d>) -> Self {
            Self { driver }
        }
    }

    impl SerialChannel for UartSerial<'_> {
        type Error = SerialError;

        fn available(&mut self) -> bool {
            match self.driver.remaining_read() {
                Ok(n) => n > 0,
                Err(e) => {
                    warn!("{}", SerialError::StatusFailed(e.code()));
                    false
                }
            }
        }

        fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
            let mut buf = [0u8; 1];
            match self.driver.read(&mut buf, NON_BLOCK) {
                Ok(0) => Ok(None),
                Ok(_) => Ok(Some(buf[0])),
                Err(e) => Err(SerialError::ReadFailed(e.code())),
            }
        }
    }
}
