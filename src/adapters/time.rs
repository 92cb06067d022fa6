//! Host delay adapter.
//!
//! On the device the hold uses `esp_idf_hal::delay::FreeRtos`, which
//! already implements [`DelayNs`].  For host-side runs this adapter
//! sleeps the calling thread instead.

#[cfg(not(target_os = "espidf"))]
use embedded_hal::delay::DelayNs;

/// Blocking delay backed by `std::thread::sleep`.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct HostDelay;

#[cfg(not(target_os = "espidf"))]
impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}
