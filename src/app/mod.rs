//! Application core: pure controller logic, zero I/O.
//!
//! This module contains the behaviour of the ServoTrigger controller:
//! decoding command bytes and running the motion sequence.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
